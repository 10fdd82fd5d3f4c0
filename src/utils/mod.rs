use std::sync::Once;

use tracing_subscriber::{filter::Directive, fmt, EnvFilter};

use crate::config::DEFAULT_LOG_FILTER;

static TRACING_INIT: Once = Once::new();

/// Initializes the global tracing subscriber with sensible defaults.
pub fn init_tracing() {
    init_tracing_with(DEFAULT_LOG_FILTER);
}

/// Initializes tracing with an extra filter directive, such as
/// `Config::log_filter`. Only the first call has any effect.
pub fn init_tracing_with(directive: &str) {
    TRACING_INIT.call_once(|| {
        let _ = fmt().with_env_filter(build_filter(directive)).try_init();
    });
}

/// `RUST_LOG` plus `directive`. An unparsable directive is replaced by the
/// default one.
pub fn build_filter(directive: &str) -> EnvFilter {
    let filter = EnvFilter::from_default_env();
    match directive
        .parse::<Directive>()
        .or_else(|_| DEFAULT_LOG_FILTER.parse::<Directive>())
    {
        Ok(parsed) => filter.add_directive(parsed),
        Err(_) => filter,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_directive_is_added() {
        let filter = build_filter("pocket_ledger=debug");
        assert!(filter.to_string().contains("pocket_ledger=debug"));
    }

    #[test]
    fn garbage_directive_falls_back_to_default() {
        let filter = build_filter("pocket_ledger=loudly");
        assert!(filter.to_string().contains(DEFAULT_LOG_FILTER));
    }
}
