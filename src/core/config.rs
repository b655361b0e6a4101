//! Logger configuration

use super::error::Result;
use serde::{Deserialize, Serialize};

/// Caller-skip of the process-wide default logger.
pub const DEFAULT_CALLER_SKIP: usize = 3;

/// Settings accepted by [`Logger::from_config`](crate::Logger::from_config)
/// and the facade's `configure` family.
///
/// Level names are kept as strings: an unrecognized name disables the sink it
/// applies to instead of failing. An empty `log_path` disables file output.
///
/// # Examples
///
/// ```
/// use rust_logger_facade::LoggerConfig;
///
/// let config = LoggerConfig::from_json(r#"{"log_level": "info", "log_path": "/var/log/svc"}"#)
///     .unwrap();
/// assert_eq!(config.log_level, "info");
/// assert!(config.file_enabled());
/// assert!(!config.is_structured);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Console threshold name
    pub log_level: String,
    /// Directory for the log file; empty disables the file sink
    pub log_path: String,
    /// Suffix of the generated log file name
    pub log_file_name: String,
    /// File threshold name
    pub file_log_level: String,
    /// Frames between the engine and the reported call site
    pub caller_skip: usize,
    /// JSON output instead of bracketed text
    pub is_structured: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            log_level: "DEBUG".to_string(),
            log_path: String::new(),
            log_file_name: String::new(),
            file_log_level: String::new(),
            caller_skip: DEFAULT_CALLER_SKIP,
            is_structured: false,
        }
    }
}

impl LoggerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Enable the file sink in `path` with the given name suffix and threshold
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_file(
        mut self,
        path: impl Into<String>,
        file_name: impl Into<String>,
        level: impl Into<String>,
    ) -> Self {
        self.log_path = path.into();
        self.log_file_name = file_name.into();
        self.file_log_level = level.into();
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_caller_skip(mut self, caller_skip: usize) -> Self {
        self.caller_skip = caller_skip;
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_structured(mut self, is_structured: bool) -> Self {
        self.is_structured = is_structured;
        self
    }

    #[must_use]
    pub fn file_enabled(&self) -> bool {
        !self.log_path.is_empty()
    }
}
