//! File sink and log path resolution

use super::rolling_file::{RollingFileWriter, RotationPolicy};
use crate::core::encoder::{build_file_encoder, Encoder};
use crate::core::error::Result;
use crate::core::severity::Severity;
use crate::core::sink::SinkBuilder;
use crate::core::timestamp::TimestampFormat;
use crate::core::writer::WriteSyncer;
use chrono::{DateTime, Local};
use std::env;
use std::path::{Path, PathBuf};

/// Name of a log file created at `at`.
///
/// `<date time>.log` or `<date time>_<file_name>.log`, with spaces turned
/// into `_` and every `-` and `:` removed.
///
/// # Examples
///
/// ```
/// use rust_logger_facade::sinks::compute_log_file_name;
/// use chrono::{Local, TimeZone};
///
/// let at = Local.with_ymd_and_hms(2025, 1, 8, 10, 30, 45).unwrap();
/// assert_eq!(compute_log_file_name("", &at), "20250108_103045.log");
/// assert_eq!(compute_log_file_name("svc", &at), "20250108_103045_svc.log");
/// ```
#[must_use]
pub fn compute_log_file_name(file_name: &str, at: &DateTime<Local>) -> String {
    let stamp = TimestampFormat::DateTime.format(at);
    let name = if file_name.is_empty() {
        format!("{}.log", stamp)
    } else {
        format!("{}_{}.log", stamp, file_name)
    };

    name.replace(' ', "_").replace(['-', ':'], "")
}

/// Directory logs go to when no path is configured: the parent of the
/// working directory, or `./` if that cannot be determined.
fn default_log_dir() -> PathBuf {
    env::current_dir()
        .ok()
        .and_then(|cwd| cwd.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("./"))
}

/// Full path of the log file for `dir` and `file_name` at `at`.
///
/// A non-empty `dir` is used verbatim.
#[must_use]
pub fn resolve_log_path(dir: &str, file_name: &str, at: &DateTime<Local>) -> PathBuf {
    let dir = if dir.is_empty() {
        default_log_dir()
    } else {
        PathBuf::from(dir)
    };
    dir.join(compute_log_file_name(file_name, at))
}

fn absolute(path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        return path;
    }
    match env::current_dir() {
        Ok(cwd) => cwd.join(path),
        Err(_) => path,
    }
}

/// Rotating file sink. Human records are never coloured.
///
/// The target path is resolved once, when the sink is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSink {
    path: PathBuf,
    level: Severity,
    is_structured: bool,
    policy: RotationPolicy,
}

impl FileSink {
    pub fn new(log_path: &str, file_name: &str, level: Severity, is_structured: bool) -> Self {
        let path = absolute(resolve_log_path(log_path, file_name, &Local::now()));
        Self {
            path,
            level,
            is_structured,
            policy: RotationPolicy::default(),
        }
    }

    /// Override the rotation policy
    #[must_use]
    pub fn with_policy(mut self, policy: RotationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Absolute path of the active log file
    pub fn resolved_path(&self) -> &Path {
        &self.path
    }

    pub fn policy(&self) -> &RotationPolicy {
        &self.policy
    }
}

impl SinkBuilder for FileSink {
    fn name(&self) -> &str {
        "file"
    }

    fn level(&self) -> Severity {
        self.level
    }

    fn encoder(&self) -> Encoder {
        build_file_encoder(self.is_structured)
    }

    fn writer(&self) -> Result<Box<dyn WriteSyncer>> {
        let writer = RollingFileWriter::with_policy(&self.path, self.policy.clone())?;
        Ok(Box::new(writer))
    }
}
