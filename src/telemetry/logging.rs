use tracing::Level;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Registry,
};

use crate::config::Settings;
use crate::error::Error;

/// Parse a configured log level, falling back to `info`
pub fn parse_level(level: &str) -> Level {
    match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// Initialize the logging system
pub fn init_logging(settings: &Settings) -> Result<(), Error> {
    let log_level = parse_level(&settings.telemetry.log_level);

    // Create environment filter
    let filter = EnvFilter::from_default_env().add_directive(log_level.into());

    let result = if settings.telemetry.structured_logging {
        let fmt_layer = fmt::Layer::default()
            .with_target(true)
            .with_span_events(FmtSpan::CLOSE)
            .json();
        Registry::default().with(filter).with(fmt_layer).try_init()
    } else {
        let fmt_layer = fmt::Layer::default()
            .with_target(true)
            .with_span_events(FmtSpan::CLOSE)
            .with_ansi(true);
        Registry::default().with(filter).with(fmt_layer).try_init()
    };

    result.map_err(|e| Error::Internal(format!("Failed to set global default subscriber: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("DEBUG"), Level::DEBUG);
        assert_eq!(parse_level("warn"), Level::WARN);
        assert_eq!(parse_level("verbose"), Level::INFO);
    }

    #[test]
    fn test_second_init_fails() {
        let settings = Settings::default();
        let _ = init_logging(&settings);
        assert!(init_logging(&settings).is_err());
    }
}
