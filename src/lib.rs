#![doc(test(attr(deny(warnings))))]

//! Pocket Ledger is the state core of a single-user personal finance ledger:
//! a pure reducer over accounts, categories, transactions, and monthly
//! budgets, with per-slice persistence and a budget alert ledger.

pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod notifications;
pub mod persistence;
pub mod reducer;
pub mod reports;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Pocket Ledger tracing initialized.");
    });
}

/// Like [`init`], but filters with the directive saved in `config`.
pub fn init_with_config(config: &config::Config) {
    INIT_TRACING.call_once(|| {
        utils::init_tracing_with(&config.log_filter);
        tracing::info!(filter = %config.log_filter, "Pocket Ledger tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }

    #[test]
    fn init_with_config_after_init_is_a_no_op() {
        super::init();
        let config = crate::config::Config {
            log_filter: "pocket_ledger=trace".into(),
            ..Default::default()
        };
        super::init_with_config(&config);
    }
}
