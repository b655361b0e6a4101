//! Timestamp formatting utilities
//!
//! Named layouts used by the encoders and by log file naming. All of them
//! render local time.

use chrono::{DateTime, Local};

/// Timestamp layout options
///
/// # Examples
///
/// ```
/// use rust_logger_facade::TimestampFormat;
/// use chrono::{Local, TimeZone};
///
/// let at = Local.with_ymd_and_hms(2025, 1, 8, 10, 30, 45).unwrap();
/// assert_eq!(TimestampFormat::DateTime.format(&at), "2025-01-08 10:30:45");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TimestampFormat {
    /// ISO 8601 with milliseconds and offset: `2025-01-08T10:30:45.123+0900`
    ///
    /// Used by the structured encoder.
    #[default]
    Iso8601,

    /// Human layout with milliseconds: `2025-01-08 10:30:45.123`
    HumanMillis,

    /// Date and time to the second: `2025-01-08 10:30:45`
    ///
    /// Base of log file names before character stripping.
    DateTime,

    /// Rotated backup suffix: `2025-01-08T10-30-45.123`
    Backup,
}

impl TimestampFormat {
    /// Format a local timestamp according to this layout
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Local>) -> String {
        datetime.format(self.pattern()).to_string()
    }

    /// strftime pattern behind this layout
    #[must_use]
    pub fn pattern(&self) -> &'static str {
        match self {
            TimestampFormat::Iso8601 => "%Y-%m-%dT%H:%M:%S%.3f%z",
            TimestampFormat::HumanMillis => "%Y-%m-%d %H:%M:%S%.3f",
            TimestampFormat::DateTime => "%Y-%m-%d %H:%M:%S",
            TimestampFormat::Backup => "%Y-%m-%dT%H-%M-%S%.3f",
        }
    }
}
