// src/infra/logger.rs — Structured logging with tracing

use tracing_subscriber::{fmt, EnvFilter};

/// Install the global subscriber. `RUST_LOG` wins over `level`, which only
/// applies to this crate; dependencies stay at `warn`.
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(level)));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

fn default_directives(level: &str) -> String {
    format!("warn,prodkit={level}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives_scope_crate_level() {
        assert_eq!(default_directives("info"), "warn,prodkit=info");
        assert!(EnvFilter::try_new(default_directives("debug")).is_ok());
    }
}
