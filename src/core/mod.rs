pub mod clock;
pub mod errors;
pub mod filter;
pub mod services;
pub mod tracker;

pub use clock::{Clock, FixedClock, SystemClock};
pub use errors::{Result, TrackerError};
pub use filter::{filter_transactions, DateRange, FilterCriteria, TypeFilter};
pub use tracker::Tracker;
