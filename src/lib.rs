//! Temposaurus - Tempo timesheet approval report.
//!
//! Resolves the Atlassian account behind a set of credentials, lists the
//! Tempo timesheet periods in a date range, fetches required and approved
//! time for each period and renders the overtime per period and in total.

pub mod config;
pub mod error;
pub mod models;
pub mod services;

use std::env;

/// Initialise `env_logger`, defaulting to `info` when `RUST_LOG` is unset.
pub fn init_logging() {
    let mut builder = env_logger::Builder::new();

    match env::var("RUST_LOG") {
        Ok(filters) => builder.parse_filters(&filters),
        Err(_) => builder.filter_level(log::LevelFilter::Info),
    };

    if !cfg!(debug_assertions) {
        builder.format_timestamp(None);
    }

    builder.init();
}
