//! Logging setup for the pipeline and the command line tools.
//!
//! Set `SKIPGRAM_LOG_FORMAT=json` for JSON lines, anything else gives readable output.
//! `RUST_LOG` controls the filter (default: info).

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {

    pub fn from_env() -> Self {
        Self::parse(&std::env::var("SKIPGRAM_LOG_FORMAT").unwrap_or_default())
    }

    fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Pretty,
        }
    }
}

pub fn init() {
    init_with_level_and_format("info", LogFormat::from_env());
}

/// `level` is used when `RUST_LOG` is not set (e.g. `"debug"`, `"warn"`).
pub fn init_with_level(level: &str) {
    init_with_level_and_format(level, LogFormat::from_env());
}

/// Installs the global subscriber. Calling it again once a subscriber is set does nothing.
pub fn init_with_level_and_format(level: &str, format: LogFormat) {

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // an Err here only means a subscriber was installed before
    let _ = match format {
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_target(true))
            .try_init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json().with_target(true).with_current_span(true))
            .try_init(),
    };
}


#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn log_format_parse_test() {
        assert_eq!(LogFormat::parse(""), LogFormat::Pretty);
        assert_eq!(LogFormat::parse("json"), LogFormat::Json);
        assert_eq!(LogFormat::parse("JSON"), LogFormat::Json);
        assert_eq!(LogFormat::parse("pretty"), LogFormat::Pretty);
    }

    #[test]
    fn repeated_init_test() {
        init_with_level("warn");
        init_with_level_and_format("debug", LogFormat::Json);
        tracing::info!("still running");
    }

}
