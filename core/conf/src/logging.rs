//! Logging configuration options.
use serde::Deserialize;
use serde::Serialize;

/// List of supported logging drains.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoggingDrain {
    /// Discard all log records.
    Discard,

    /// Log JSON objects to standard error.
    #[default]
    Json,

    /// Log human readable lines to standard error.
    Term,
}

/// Enumerate valid log verbosity levels.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Critical,
    Error,
    Warning,
    #[default]
    Info,
    Debug,
}

/// Logging configuration options.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct LoggingConf {
    /// Flush logs asynchronously.
    #[serde(default = "LoggingConf::default_async", rename = "async")]
    pub async_flush: bool,

    /// The drain to send logs to.
    #[serde(default)]
    pub drain: LoggingDrain,

    /// The minimum level of log records to emit.
    #[serde(default)]
    pub level: LogLevel,
}

impl Default for LoggingConf {
    fn default() -> LoggingConf {
        LoggingConf {
            async_flush: LoggingConf::default_async(),
            drain: LoggingDrain::default(),
            level: LogLevel::default(),
        }
    }
}

impl LoggingConf {
    fn default_async() -> bool {
        true
    }
}
