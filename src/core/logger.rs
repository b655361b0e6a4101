//! Composite logger
//!
//! A [`Logger`] owns a fixed, non-empty set of [`Core`]s and offers every
//! record to each of them; every core applies its own threshold and encoding.
//! After each emission all cores are synced.

use super::{
    config::LoggerConfig,
    error::{LoggerError, Result, Termination},
    message::{concat_args, format_args_string, join_args_line, strip_trailing_newline},
    metrics::LoggerMetrics,
    record::Record,
    severity::Severity,
    sink::{Core, SinkBuilder},
    stacktrace,
};
use crate::sinks::{ConsoleSink, FileSink, RotationPolicy};
use std::fmt::{self, Display};
use std::panic::Location;
use std::path::{Path, PathBuf};

/// Severity at and above which a stack trace is attached
pub const DEFAULT_STACK_THRESHOLD: Severity = Severity::Error;

/// Wrapper frames between the engine and a direct `Logger` call
pub(crate) const DIRECT_DEPTH: usize = 1;

/// Wrapper frames between the engine and a facade call
pub(crate) const FACADE_DEPTH: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoggerOptions {
    /// Frames between the engine and the reported call site. The logger's own
    /// wrapper frames count toward it; any surplus walks further up the
    /// caller's stack.
    pub caller_skip: usize,
    pub stack_threshold: Severity,
}

impl Default for LoggerOptions {
    fn default() -> Self {
        Self {
            caller_skip: 0,
            stack_threshold: DEFAULT_STACK_THRESHOLD,
        }
    }
}

#[derive(Debug)]
pub struct Logger {
    cores: Vec<Core>,
    options: LoggerOptions,
    log_path: Option<PathBuf>,
    metrics: LoggerMetrics,
}

impl Logger {
    /// Console logger plus, when `file_path` is non-empty, a rotating file
    /// logger.
    ///
    /// Unrecognized level names silently disable the sink they apply to.
    ///
    /// # Errors
    ///
    /// Returns error if a sink cannot be built (for example the log file
    /// cannot be created).
    ///
    /// # Example
    ///
    /// ```
    /// use rust_logger_facade::Logger;
    ///
    /// let logger = Logger::new("INFO", "", "", "", 1, false).unwrap();
    /// assert_eq!(logger.sink_count(), 1);
    /// logger.printf(format_args!("listening on port {}", 8080));
    /// ```
    pub fn new(
        console_level: &str,
        file_path: &str,
        file_name: &str,
        file_level: &str,
        caller_skip: usize,
        is_structured: bool,
    ) -> Result<Self> {
        Self::builder()
            .console_level(console_level)
            .file(file_path, file_name, file_level)
            .caller_skip(caller_skip)
            .structured(is_structured)
            .build()
    }

    pub fn from_config(config: &LoggerConfig) -> Result<Self> {
        LoggerBuilder::from_config(config.clone()).build()
    }

    /// Tee over arbitrary cores.
    ///
    /// # Errors
    ///
    /// Returns error if `cores` is empty.
    pub fn from_cores(cores: Vec<Core>, options: LoggerOptions) -> Result<Self> {
        if cores.is_empty() {
            return Err(LoggerError::config("Logger", "at least one core is required"));
        }
        Ok(Self {
            cores,
            options,
            log_path: None,
            metrics: LoggerMetrics::new(),
        })
    }

    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    pub fn sink_count(&self) -> usize {
        self.cores.len()
    }

    pub fn cores(&self) -> &[Core] {
        &self.cores
    }

    /// Resolved path of the file sink, if there is one
    pub fn log_path(&self) -> Option<&Path> {
        self.log_path.as_deref()
    }

    pub fn caller_skip(&self) -> usize {
        self.options.caller_skip
    }

    pub fn options(&self) -> &LoggerOptions {
        &self.options
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// Whether any core would emit a record of `severity`
    pub fn enabled(&self, severity: Severity) -> bool {
        self.cores.iter().any(|core| core.enabled(severity))
    }

    #[track_caller]
    pub fn log(&self, severity: Severity, message: impl Into<String>) {
        self.emit(severity, message.into(), Location::caller(), DIRECT_DEPTH);
    }

    /// Arguments concatenated, logged at INFO.
    #[track_caller]
    pub fn print(&self, args: &[&dyn Display]) {
        self.emit(Severity::Info, concat_args(args), Location::caller(), DIRECT_DEPTH);
    }

    #[track_caller]
    pub fn printf(&self, args: fmt::Arguments<'_>) {
        self.emit(Severity::Info, format_args_string(args), Location::caller(), DIRECT_DEPTH);
    }

    /// Arguments space-separated, logged at INFO.
    #[track_caller]
    pub fn println(&self, args: &[&dyn Display]) {
        self.emit(Severity::Info, join_args_line(args), Location::caller(), DIRECT_DEPTH);
    }

    /// Log at FATAL, then exit the process with status 1.
    #[track_caller]
    pub fn fatal(&self, args: &[&dyn Display]) -> ! {
        self.emit_fatal(concat_args(args)).execute()
    }

    #[track_caller]
    pub fn fatalf(&self, args: fmt::Arguments<'_>) -> ! {
        self.emit_fatal(format_args_string(args)).execute()
    }

    #[track_caller]
    pub fn fatalln(&self, args: &[&dyn Display]) -> ! {
        self.emit_fatal(join_args_line(args)).execute()
    }

    /// Log at PANIC, then panic with the message as payload.
    #[track_caller]
    pub fn panic(&self, args: &[&dyn Display]) -> ! {
        self.emit_panic(concat_args(args)).execute()
    }

    #[track_caller]
    pub fn panicf(&self, args: fmt::Arguments<'_>) -> ! {
        self.emit_panic(format_args_string(args)).execute()
    }

    #[track_caller]
    pub fn panicln(&self, args: &[&dyn Display]) -> ! {
        self.emit_panic(join_args_line(args)).execute()
    }

    /// Log at FATAL and return the exit without performing it.
    #[track_caller]
    pub fn emit_fatal(&self, message: impl Into<String>) -> Termination {
        self.terminal(Severity::Fatal, message.into(), Location::caller(), DIRECT_DEPTH)
    }

    /// Log at PANIC and return the panic without raising it.
    #[track_caller]
    pub fn emit_panic(&self, message: impl Into<String>) -> Termination {
        self.terminal(Severity::Panic, message.into(), Location::caller(), DIRECT_DEPTH)
    }

    pub(crate) fn terminal(
        &self,
        severity: Severity,
        message: String,
        location: &Location<'_>,
        depth: usize,
    ) -> Termination {
        let message = strip_trailing_newline(message);
        self.emit_stripped(severity, message.clone(), location, depth);
        match severity {
            Severity::Fatal => Termination::exit(message),
            _ => Termination::panic(message),
        }
    }

    pub(crate) fn emit(
        &self,
        severity: Severity,
        message: String,
        location: &Location<'_>,
        depth: usize,
    ) {
        self.emit_stripped(severity, strip_trailing_newline(message), location, depth);
    }

    /// Emit a message whose trailing newline has already been handled
    fn emit_stripped(
        &self,
        severity: Severity,
        message: String,
        location: &Location<'_>,
        depth: usize,
    ) {
        if self.enabled(severity) {
            let record = self.build_record(severity, message, location, depth);
            self.write_record(&record);
        }
        self.sync_cores(location, depth);
    }

    fn build_record(
        &self,
        severity: Severity,
        message: String,
        location: &Location<'_>,
        depth: usize,
    ) -> Record {
        let extra_skip = self.options.caller_skip.saturating_sub(depth);
        let capture_stack = severity >= self.options.stack_threshold;
        let (caller, stack) = stacktrace::resolve(location, extra_skip, capture_stack);

        let record = Record::new(severity, message).with_caller(caller);
        match stack {
            Some(stack) => record.with_stack(stack),
            None => record,
        }
    }

    /// Offer `record` to every core, isolating failures per core
    fn write_record(&self, record: &Record) {
        let mut has_error = false;

        for (idx, core) in self.cores.iter().enumerate() {
            if let Err(e) = core.write(record) {
                eprintln!("[LOGGER ERROR] Sink #{} ({}) failed: {}", idx, core.name(), e);
                has_error = true;
            }
        }

        if has_error {
            self.metrics.record_dropped();
        } else {
            self.metrics.record_logged();
        }
    }

    /// Sync every core.
    ///
    /// A failing sync is reported as an ERROR record through the cores and
    /// counted; it is never returned to the caller.
    #[track_caller]
    pub fn sync(&self) {
        self.sync_cores(Location::caller(), DIRECT_DEPTH);
    }

    /// Sync failures are attributed like any other record from `location`
    fn sync_cores(&self, location: &Location<'_>, depth: usize) {
        for core in &self.cores {
            if let Err(e) = core.sync() {
                self.metrics.record_sync_failure();
                let record =
                    self.build_record(Severity::Error, format!("Logging error: {}", e), location, depth);
                self.write_record(&record);
            }
        }
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        for core in &self.cores {
            if let Err(e) = core.sync() {
                eprintln!("[LOGGER ERROR] Failed to sync during shutdown: {}", e);
            }
        }

        let dropped = self.metrics.dropped_count();
        if dropped > 0 {
            eprintln!(
                "[LOGGER WARNING] Logger shutting down with {} dropped logs (drop rate: {:.2}%)",
                dropped,
                self.metrics.drop_rate()
            );
        }
    }
}

/// Builder for constructing a Logger with a fluent API
///
/// The console sink is always present; the file sink is added when a file
/// path is set. Extra cores are appended after both.
///
/// # Example
/// ```
/// use rust_logger_facade::prelude::*;
///
/// let logger = Logger::builder()
///     .console_level("info")
///     .caller_skip(1)
///     .structured(true)
///     .build()
///     .unwrap();
/// assert_eq!(logger.sink_count(), 1);
/// ```
pub struct LoggerBuilder {
    config: LoggerConfig,
    rotation_policy: RotationPolicy,
    extra_cores: Vec<Core>,
    stack_threshold: Severity,
}

impl LoggerBuilder {
    /// Create a new builder with the process-default configuration
    pub fn new() -> Self {
        Self::from_config(LoggerConfig::default())
    }

    pub fn from_config(config: LoggerConfig) -> Self {
        Self {
            config,
            rotation_policy: RotationPolicy::default(),
            extra_cores: Vec::new(),
            stack_threshold: DEFAULT_STACK_THRESHOLD,
        }
    }

    /// Set the console threshold by name
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn console_level(mut self, level: impl Into<String>) -> Self {
        self.config.log_level = level.into();
        self
    }

    /// Set the file sink; an empty `path` leaves file output off
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn file(
        mut self,
        path: impl Into<String>,
        file_name: impl Into<String>,
        level: impl Into<String>,
    ) -> Self {
        self.config.log_path = path.into();
        self.config.log_file_name = file_name.into();
        self.config.file_log_level = level.into();
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn caller_skip(mut self, caller_skip: usize) -> Self {
        self.config.caller_skip = caller_skip;
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn structured(mut self, is_structured: bool) -> Self {
        self.config.is_structured = is_structured;
        self
    }

    /// Rotation policy of the file sink
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn rotation_policy(mut self, policy: RotationPolicy) -> Self {
        self.rotation_policy = policy;
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn stack_threshold(mut self, severity: Severity) -> Self {
        self.stack_threshold = severity;
        self
    }

    /// Append a custom core
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn core(mut self, core: Core) -> Self {
        self.extra_cores.push(core);
        self
    }

    /// Build the Logger
    ///
    /// # Errors
    ///
    /// Returns error if a sink cannot be built.
    pub fn build(self) -> Result<Logger> {
        let config = self.config;
        let mut cores = Vec::with_capacity(2 + self.extra_cores.len());
        let mut log_path = None;

        let console = ConsoleSink::new(Severity::from_name(&config.log_level), config.is_structured);
        cores.push(console.build_core()?);

        if config.file_enabled() {
            let file = FileSink::new(
                &config.log_path,
                &config.log_file_name,
                Severity::from_name(&config.file_log_level),
                config.is_structured,
            )
            .with_policy(self.rotation_policy);
            cores.push(file.build_core()?);
            log_path = Some(file.resolved_path().to_path_buf());
        }

        cores.extend(self.extra_cores);

        Ok(Logger {
            cores,
            options: LoggerOptions {
                caller_skip: config.caller_skip,
                stack_threshold: self.stack_threshold,
            },
            log_path,
            metrics: LoggerMetrics::new(),
        })
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
