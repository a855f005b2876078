use tracing::span;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn to_log_level(&self) -> tracing::Level {
        match self {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

impl From<&str> for LogLevel {
    fn from(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "trace" => LogLevel::Trace,
            "debug" => LogLevel::Debug,
            "info" => LogLevel::Info,
            "warn" | "warning" => LogLevel::Warn,
            "error" => LogLevel::Error,
            _ => LogLevel::default(),
        }
    }
}

const SPAN_NAME: &str = "remark_classifier";

pub struct Logger;

impl Logger {
    /// Initialize the logger. Later calls are no-ops.
    pub fn init(level: LogLevel) {
        let _ = tracing_subscriber::fmt()
            .with_max_level(level.to_log_level())
            .with_writer(std::io::stderr)
            .try_init();
    }

    pub fn with_span<T>(command: &str, f: impl FnOnce() -> T) -> T {
        let span = span!(tracing::Level::INFO, SPAN_NAME, command = %command);
        let _guard = span.enter();
        f()
    }
}

pub fn setup_logger(level: &str) {
    Logger::init(LogLevel::from(level));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_parsing() {
        assert_eq!(LogLevel::from("debug"), LogLevel::Debug);
        assert_eq!(LogLevel::from(" WARN "), LogLevel::Warn);
        assert_eq!(LogLevel::from("nonsense"), LogLevel::Info);
        assert_eq!(LogLevel::from("error").to_log_level(), tracing::Level::ERROR);
    }

    #[test]
    fn test_with_span_returns_value() {
        setup_logger("trace");
        setup_logger("info");
        assert_eq!(Logger::with_span("test", || 41 + 1), 42);
    }
}
