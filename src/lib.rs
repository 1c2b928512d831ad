#![doc(test(attr(deny(warnings))))]

//! Finance Tracker records income and expenses, derives filtered views and
//! summaries from them, and keeps everything in local JSON files.

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!(version = env!("CARGO_PKG_VERSION"), "finance tracker starting");
    });
}
