//! Error types for the logger facade

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Unrecognized severity name (strict parsing only)
    #[error("Invalid severity: '{name}'")]
    InvalidSeverity { name: String },

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// File sink error with path
    #[error("File sink error for '{path}': {message}")]
    FileSinkError { path: String, message: String },

    /// File rotation error
    #[error("File rotation failed for '{path}': {message}")]
    FileRotationError { path: String, message: String },

    /// Writer error (generic)
    #[error("Writer error: {0}")]
    WriterError(String),
}

impl LoggerError {
    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    pub fn invalid_severity(name: impl Into<String>) -> Self {
        LoggerError::InvalidSeverity { name: name.into() }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a file sink error
    pub fn file_sink(path: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::FileSinkError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a file rotation error
    pub fn file_rotation(path: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::FileRotationError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a writer error (generic)
    pub fn writer<S: Into<String>>(msg: S) -> Self {
        LoggerError::WriterError(msg.into())
    }
}

/// Exit status used by the fatal family.
pub const FATAL_EXIT_CODE: i32 = 1;

/// Terminal outcome of a fatal or panic call.
///
/// The record has already been emitted and synced when a `Termination` is
/// returned. Nothing terminates until [`Termination::execute`] runs, which
/// lets callers (and tests) intercept the outcome.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Termination {
    /// Exit the process with `code`.
    #[error("fatal: {message} (exit status {code})")]
    Exit { code: i32, message: String },

    /// Raise a panic carrying `message` as its payload.
    #[error("panic: {message}")]
    Panic { message: String },
}

impl Termination {
    pub fn exit(message: impl Into<String>) -> Self {
        Termination::Exit {
            code: FATAL_EXIT_CODE,
            message: message.into(),
        }
    }

    pub fn panic(message: impl Into<String>) -> Self {
        Termination::Panic {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Termination::Exit { message, .. } | Termination::Panic { message } => message,
        }
    }

    /// Carry out the termination. Never returns.
    ///
    /// A panic payload is the formatted message as a `String`, so a
    /// `catch_unwind` boundary can downcast it.
    pub fn execute(self) -> ! {
        match self {
            Termination::Exit { code, .. } => std::process::exit(code),
            Termination::Panic { message } => std::panic::panic_any(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = LoggerError::config("FileSink", "Invalid path");
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));

        let err = LoggerError::file_sink("/var/log/app.log", "Permission denied");
        assert!(matches!(err, LoggerError::FileSinkError { .. }));

        let err = LoggerError::invalid_severity("LOUD");
        assert!(matches!(err, LoggerError::InvalidSeverity { .. }));
    }

    #[test]
    fn test_error_display() {
        let err = LoggerError::file_rotation("/var/log/app.log", "Disk full");
        assert_eq!(
            err.to_string(),
            "File rotation failed for '/var/log/app.log': Disk full"
        );

        let err = LoggerError::invalid_severity("LOUD");
        assert_eq!(err.to_string(), "Invalid severity: 'LOUD'");
    }

    #[test]
    fn test_io_operation_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = LoggerError::io_operation("writing log file", "cannot write to file", io_err);

        assert!(matches!(err, LoggerError::IoOperation { .. }));
        assert!(err.to_string().contains("writing log file"));
        assert!(err.to_string().contains("cannot write to file"));
    }

    #[test]
    fn test_termination_message() {
        let exit = Termination::exit("disk gone");
        assert_eq!(exit.message(), "disk gone");
        assert!(matches!(exit, Termination::Exit { code: FATAL_EXIT_CODE, .. }));

        let panic = Termination::panic("bad state");
        assert_eq!(panic.to_string(), "panic: bad state");
    }

    #[test]
    fn test_termination_panic_payload() {
        let result = std::panic::catch_unwind(|| Termination::panic("boom").execute());
        let payload = result.unwrap_err();
        assert_eq!(payload.downcast_ref::<String>().map(String::as_str), Some("boom"));
    }
}
