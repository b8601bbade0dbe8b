use dioxus_logger::tracing::Level;
use serde::Deserialize;
use serde::Serialize;
use std::env;
use std::str::FromStr;

/// Verbosity for the launchers' logger, serialisable unlike `tracing::Level`.
#[derive(
    Clone,
    Copy,
    PartialEq,
    Eq,
    Debug,
    Default,
    Serialize,
    Deserialize,
    strum::EnumString,
    strum::Display,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Reads `STOREFRONT_LOG` ("error" .. "trace"), defaulting to `info`.
    pub fn from_env() -> Self {
        env::var("STOREFRONT_LOG")
            .ok()
            .and_then(|s| LogLevel::from_str(s.trim()).ok())
            .unwrap_or_default()
    }
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}
