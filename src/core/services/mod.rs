pub mod category_service;
pub mod export_service;
pub mod summary_service;
pub mod transaction_service;

pub use category_service::CategoryService;
pub use export_service::ExportService;
pub use summary_service::{BalanceSummary, CategoryTotals, MonthKey, MonthlyTotals, SummaryService};
pub use transaction_service::TransactionService;
