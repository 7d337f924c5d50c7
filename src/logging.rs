//! Log subscriber setup for the CLI and other native hosts

use tracing_subscriber::{fmt, EnvFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Compact,
    Json,
}

impl LogFormat {
    /// `ALGOVOTE_LOG_JSON=1` wins; otherwise `ALGOVOTE_LOG_FORMAT` picks
    /// `pretty` / `compact` / `json`.
    pub fn from_env() -> Self {
        if std::env::var("ALGOVOTE_LOG_JSON").map(|v| v == "1").unwrap_or(false) {
            return LogFormat::Json;
        }
        match std::env::var("ALGOVOTE_LOG_FORMAT").as_deref() {
            Ok("json") => LogFormat::Json,
            Ok("compact") => LogFormat::Compact,
            _ => LogFormat::Pretty,
        }
    }
}

/// Install a stderr subscriber. `RUST_LOG` overrides `default_level`.
/// Calling twice is harmless; the second call is ignored.
pub fn init_logging(default_level: &str, format: LogFormat) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let builder = fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr);

    let _ = match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
    };
}
