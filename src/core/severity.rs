//! Severity definitions and name mapping

use super::error::LoggerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ordered record severity.
///
/// `Invalid` is a threshold sentinel: a sink whose threshold is `Invalid`
/// emits nothing. It is never the severity of an emitted record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    #[default]
    Debug = 0,
    Info = 1,
    Warn = 2,
    Error = 3,
    #[serde(rename = "DPANIC")]
    DPanic = 4,
    Panic = 5,
    Fatal = 6,
    Invalid = 7,
}

impl Severity {
    /// All severities a record can carry, lowest first.
    pub const ALL: [Severity; 7] = [
        Severity::Debug,
        Severity::Info,
        Severity::Warn,
        Severity::Error,
        Severity::DPanic,
        Severity::Panic,
        Severity::Fatal,
    ];

    /// Map a level name to a severity, case-insensitively.
    ///
    /// Unrecognized or empty names map to [`Severity::Invalid`]; this never
    /// fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use rust_logger_facade::Severity;
    ///
    /// assert_eq!(Severity::from_name("warn"), Severity::Warn);
    /// assert_eq!(Severity::from_name("verbose"), Severity::Invalid);
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.to_uppercase().as_str() {
            "DEBUG" => Severity::Debug,
            "INFO" => Severity::Info,
            "WARN" => Severity::Warn,
            "ERROR" => Severity::Error,
            "DPANIC" => Severity::DPanic,
            "PANIC" => Severity::Panic,
            "FATAL" => Severity::Fatal,
            _ => Severity::Invalid,
        }
    }

    /// Whether a sink with this threshold emits a record of `level`.
    #[inline]
    #[must_use]
    pub fn enables(self, level: Severity) -> bool {
        self != Severity::Invalid && level != Severity::Invalid && level >= self
    }

    pub fn capital_name(&self) -> &'static str {
        match self {
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
            Severity::DPanic => "DPANIC",
            Severity::Panic => "PANIC",
            Severity::Fatal => "FATAL",
            Severity::Invalid => "INVALID",
        }
    }

    pub fn lowercase_name(&self) -> &'static str {
        match self {
            Severity::Debug => "debug",
            Severity::Info => "info",
            Severity::Warn => "warn",
            Severity::Error => "error",
            Severity::DPanic => "dpanic",
            Severity::Panic => "panic",
            Severity::Fatal => "fatal",
            Severity::Invalid => "invalid",
        }
    }

    /// Terminal colour used for the capital name on console sinks.
    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            Severity::Debug => Magenta,
            Severity::Info => Blue,
            Severity::Warn => Yellow,
            Severity::Error | Severity::DPanic | Severity::Panic | Severity::Fatal => Red,
            Severity::Invalid => Red,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.capital_name())
    }
}

/// Strict parsing: unlike [`Severity::from_name`], unknown names are an error.
impl FromStr for Severity {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Severity::from_name(s) {
            Severity::Invalid => Err(LoggerError::invalid_severity(s)),
            severity => Ok(severity),
        }
    }
}
