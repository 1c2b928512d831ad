/// Version string with the build metadata embedded by `build.rs`.
pub const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "\ncommit: ",
    env!("FINANCE_TRACKER_BUILD_HASH"),
    " (",
    env!("FINANCE_TRACKER_BUILD_STATUS"),
    ")\nbuilt: ",
    env!("FINANCE_TRACKER_BUILD_TIMESTAMP"),
    "\ntarget: ",
    env!("FINANCE_TRACKER_BUILD_TARGET"),
    "\nrustc: ",
    env!("FINANCE_TRACKER_BUILD_RUSTC"),
);
