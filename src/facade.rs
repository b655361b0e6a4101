//! Process-wide logging facade
//!
//! One active [`Logger`] sits behind a read/write lock. Emitting calls clone
//! the handle under a read lock and never block each other; reconfiguration
//! is serialized by its own mutex and only takes the write lock for the swap.
//!
//! The first access installs a console logger at DEBUG with human-readable
//! output and caller-skip 3. While logging is disabled every call is a no-op,
//! fatal and panic calls included. With logging enabled but no logger
//! installed, messages fall back to a timestamped line on stderr and keep
//! their termination semantics.
//!
//! # Example
//!
//! ```
//! use rust_logger_facade::facade;
//!
//! facade::printf(format_args!("worker {} ready", 3));
//! facade::println(&[&"queue", &"drained"]);
//!
//! facade::disable();
//! facade::print(&[&"not emitted"]);
//! facade::enable();
//! ```

use crate::core::config::LoggerConfig;
use crate::core::error::{Result, Termination};
use crate::core::logger::{Logger, FACADE_DEPTH};
use crate::core::message::{concat_args, format_args_string, join_args_line, strip_trailing_newline};
use crate::core::severity::Severity;
use chrono::Local;
use parking_lot::{Mutex, RwLock};
use std::fmt::{self, Display};
use std::panic::Location;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

/// Prefix of fallback lines written when no logger is installed
const FALLBACK_TIME_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

struct Facade {
    active: RwLock<Option<Arc<Logger>>>,
    configure_lock: Mutex<()>,
    enabled: AtomicBool,
}

static FACADE: OnceLock<Facade> = OnceLock::new();

fn facade() -> &'static Facade {
    FACADE.get_or_init(|| {
        let active = match Logger::from_config(&LoggerConfig::default()) {
            Ok(logger) => Some(Arc::new(logger)),
            Err(e) => {
                eprintln!("[LOGGER ERROR] Failed to build default logger: {}", e);
                None
            }
        };
        Facade {
            active: RwLock::new(active),
            configure_lock: Mutex::new(()),
            enabled: AtomicBool::new(true),
        }
    })
}

/// The active logger, if one is installed
pub fn logger() -> Option<Arc<Logger>> {
    facade().active.read().clone()
}

pub fn enable() {
    facade().enabled.store(true, Ordering::SeqCst);
}

pub fn disable() {
    facade().enabled.store(false, Ordering::SeqCst);
}

pub fn is_enabled() -> bool {
    facade().enabled.load(Ordering::SeqCst)
}

/// Replace the active logger with one built from the given settings.
///
/// Exits the process with status 1 if a sink cannot be built; use
/// [`try_configure`] to handle the error instead.
pub fn configure(
    log_level: &str,
    log_path: &str,
    log_file_name: &str,
    file_log_level: &str,
    caller_skip: usize,
    is_structured: bool,
) {
    let config = LoggerConfig::new()
        .with_log_level(log_level)
        .with_file(log_path, log_file_name, file_log_level)
        .with_caller_skip(caller_skip)
        .with_structured(is_structured);
    configure_with(&config);
}

pub fn configure_with(config: &LoggerConfig) {
    if let Err(e) = try_configure(config) {
        eprintln!("{}", e);
        Termination::exit(e.to_string()).execute();
    }
}

/// Build a logger from `config` and install it.
///
/// The previous logger stays active if construction fails.
pub fn try_configure(config: &LoggerConfig) -> Result<()> {
    let facade = facade();
    let _guard = facade.configure_lock.lock();
    let logger = Logger::from_config(config)?;
    install(facade, Some(Arc::new(logger)));
    Ok(())
}

/// Install an already built logger.
pub fn set_logger(logger: Logger) {
    let facade = facade();
    let _guard = facade.configure_lock.lock();
    install(facade, Some(Arc::new(logger)));
}

/// Remove the active logger; later calls use the stderr fallback.
pub fn clear_logger() {
    let facade = facade();
    let _guard = facade.configure_lock.lock();
    install(facade, None);
}

fn install(facade: &Facade, logger: Option<Arc<Logger>>) {
    let previous = std::mem::replace(&mut *facade.active.write(), logger);
    // Synced and dropped outside the write lock
    drop(previous);
}

/// Logger to emit through, or `None` while disabled
fn target() -> Option<Target> {
    let facade = facade();
    if !facade.enabled.load(Ordering::SeqCst) {
        return None;
    }
    Some(match facade.active.read().clone() {
        Some(logger) => Target::Logger(logger),
        None => Target::Fallback,
    })
}

enum Target {
    Logger(Arc<Logger>),
    Fallback,
}

fn fallback_line(message: &str) {
    eprintln!("{} {}", Local::now().format(FALLBACK_TIME_FORMAT), message);
}

fn emit(message: String, location: &Location<'_>) {
    match target() {
        Some(Target::Logger(logger)) => {
            logger.emit(Severity::Info, message, location, FACADE_DEPTH)
        }
        Some(Target::Fallback) => fallback_line(&strip_trailing_newline(message)),
        None => {}
    }
}

fn terminate(severity: Severity, message: String, location: &Location<'_>) {
    let termination = match target() {
        Some(Target::Logger(logger)) => {
            logger.terminal(severity, message, location, FACADE_DEPTH)
        }
        Some(Target::Fallback) => {
            let message = strip_trailing_newline(message);
            fallback_line(&message);
            match severity {
                Severity::Fatal => Termination::exit(message),
                _ => Termination::panic(message),
            }
        }
        None => return,
    };
    termination.execute()
}

/// Arguments concatenated, logged at INFO.
#[track_caller]
pub fn print(args: &[&dyn Display]) {
    emit(concat_args(args), Location::caller());
}

#[track_caller]
pub fn printf(args: fmt::Arguments<'_>) {
    emit(format_args_string(args), Location::caller());
}

/// Arguments space-separated, logged at INFO.
#[track_caller]
pub fn println(args: &[&dyn Display]) {
    emit(join_args_line(args), Location::caller());
}

/// Log at FATAL and exit with status 1. Returns only while disabled.
#[track_caller]
pub fn fatal(args: &[&dyn Display]) {
    terminate(Severity::Fatal, concat_args(args), Location::caller());
}

#[track_caller]
pub fn fatalf(args: fmt::Arguments<'_>) {
    terminate(Severity::Fatal, format_args_string(args), Location::caller());
}

#[track_caller]
pub fn fatalln(args: &[&dyn Display]) {
    terminate(Severity::Fatal, join_args_line(args), Location::caller());
}

/// Log at PANIC and panic with the message. Returns only while disabled.
#[track_caller]
pub fn panic(args: &[&dyn Display]) {
    terminate(Severity::Panic, concat_args(args), Location::caller());
}

#[track_caller]
pub fn panicf(args: fmt::Arguments<'_>) {
    terminate(Severity::Panic, format_args_string(args), Location::caller());
}

#[track_caller]
pub fn panicln(args: &[&dyn Display]) {
    terminate(Severity::Panic, join_args_line(args), Location::caller());
}
