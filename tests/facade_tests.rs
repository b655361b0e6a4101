//! Tests for the process-wide facade
//!
//! The facade is global state, so every test holds `SERIAL` for its whole
//! body and restores logging to enabled with a fresh logger when done.

use parking_lot::Mutex;
use rust_logger_facade::prelude::*;
use rust_logger_facade::{
    log_fatal, log_panicf, log_panicln, log_print, log_printf, log_println, LoggerOptions,
};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::process::Command;

static SERIAL: Mutex<()> = parking_lot::const_mutex(());

const FATAL_CHILD_ENV: &str = "RUST_LOGGER_FACADE_FATAL_CHILD";

/// Install a logger writing human lines into a buffer, attributing records
/// to the facade's caller.
fn install_buffer(threshold: Severity) -> SharedBuffer {
    let buffer = SharedBuffer::new();
    let core = Core::new("memory", Encoder::human(LevelStyle::Capital), buffer.clone(), threshold);
    let options = LoggerOptions {
        caller_skip: 2,
        ..LoggerOptions::default()
    };
    facade::set_logger(Logger::from_cores(vec![core], options).unwrap());
    buffer
}

fn restore_defaults() {
    facade::enable();
    facade::configure_with(&LoggerConfig::default());
}

#[test]
fn test_default_logger_installed() {
    let _serial = SERIAL.lock();
    restore_defaults();

    assert!(facade::is_enabled());
    let logger = facade::logger().expect("default logger installed");
    assert_eq!(logger.sink_count(), 1);
    assert_eq!(logger.caller_skip(), 3);
    assert_eq!(logger.cores()[0].threshold(), Severity::Debug);
    assert!(!logger.cores()[0].encoder().is_structured());
}

#[test]
fn test_print_family_delegates() {
    let _serial = SERIAL.lock();
    let buffer = install_buffer(Severity::Debug);

    facade::print(&[&"a", &1]);
    facade::printf(format_args!("{}-{}\n", "b", 2));
    facade::println(&[&"c", &3]);

    let lines = buffer.lines();
    assert_eq!(lines.len(), 3);
    assert!(lines.iter().all(|line| line.contains("[INFO]")));
    assert!(lines[0].ends_with("] a1"));
    assert!(lines[1].ends_with("] b-2"));
    assert!(lines[2].ends_with("] c 3"));

    restore_defaults();
}

#[test]
fn test_caller_is_facade_call_site() {
    let _serial = SERIAL.lock();
    let buffer = install_buffer(Severity::Debug);

    let line = line!() + 1;
    facade::print(&[&"located"]);

    assert!(buffer.contents().contains(&format!("[tests/facade_tests.rs:{}] located", line)));
    restore_defaults();
}

#[inline(never)]
fn report_progress(step: u32) {
    facade::printf(format_args!("step {}", step));
}

#[test]
fn test_default_skip_reports_callers_caller() {
    let _serial = SERIAL.lock();
    let buffer = SharedBuffer::new();
    let core = Core::new("memory", Encoder::human(LevelStyle::Capital), buffer.clone(), Severity::Debug);
    let options = LoggerOptions {
        caller_skip: rust_logger_facade::core::DEFAULT_CALLER_SKIP,
        ..LoggerOptions::default()
    };
    facade::set_logger(Logger::from_cores(vec![core], options).unwrap());

    let line = line!() + 1;
    report_progress(4);

    let expected = format!("[tests/facade_tests.rs:{}] step 4", line);
    assert!(buffer.lines()[0].ends_with(&expected), "got {:?}", buffer.lines());
    restore_defaults();
}

#[test]
fn test_macros_forward_to_facade() {
    let _serial = SERIAL.lock();
    let buffer = install_buffer(Severity::Debug);

    let line = line!() + 1;
    log_print!("jobs=", 4);
    log_printf!("{} queued", 9);
    log_println!("shard", 2, "ready");

    let lines = buffer.lines();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].ends_with(&format!("[tests/facade_tests.rs:{}] jobs=4", line)));
    assert!(lines[1].ends_with("] 9 queued"));
    assert!(lines[2].ends_with("] shard 2 ready"));

    restore_defaults();
}

#[test]
fn test_disabled_facade_is_silent() {
    let _serial = SERIAL.lock();
    let buffer = install_buffer(Severity::Debug);

    facade::disable();
    assert!(!facade::is_enabled());

    facade::print(&[&"hidden"]);
    facade::fatalf(format_args!("not fatal while disabled"));
    facade::panicln(&[&"no", &"panic"]);
    log_fatal!("still returns");

    assert!(buffer.contents().is_empty());

    facade::enable();
    facade::print(&[&"visible"]);
    assert!(buffer.contents().contains("visible"));

    restore_defaults();
}

#[test]
fn test_panic_family_emits_then_panics() {
    let _serial = SERIAL.lock();
    let buffer = install_buffer(Severity::Debug);

    let result = catch_unwind(AssertUnwindSafe(|| log_panicf!("shard {} lost", 7)));
    let payload = result.expect_err("panic must be raised");
    assert_eq!(payload.downcast_ref::<String>().unwrap(), "shard 7 lost");

    let result = catch_unwind(AssertUnwindSafe(|| log_panicln!("split", "brain")));
    assert_eq!(result.unwrap_err().downcast_ref::<String>().unwrap(), "split brain");

    let contents = buffer.contents();
    assert!(contents.contains("[PANIC]"));
    assert!(contents.contains("] shard 7 lost"));
    assert!(contents.contains("] split brain"));

    restore_defaults();
}

#[test]
fn test_panic_with_suppressed_record_still_panics() {
    let _serial = SERIAL.lock();
    let buffer = install_buffer(Severity::Invalid);

    let result = catch_unwind(|| facade::panic(&[&"quiet"]));
    assert!(result.is_err());
    assert!(buffer.contents().is_empty());

    restore_defaults();
}

#[test]
fn test_fallback_without_logger() {
    let _serial = SERIAL.lock();
    facade::clear_logger();
    assert!(facade::logger().is_none());

    facade::print(&[&"to stderr"]);
    facade::println(&[&"still", &"fine"]);

    let result = catch_unwind(|| facade::panicf(format_args!("fallback {}", "panic")));
    let payload = result.expect_err("fallback keeps panic semantics");
    assert_eq!(payload.downcast_ref::<String>().unwrap(), "fallback panic");

    restore_defaults();
    assert!(facade::logger().is_some());
}

#[test]
fn test_configure_replaces_logger() {
    let _serial = SERIAL.lock();

    facade::configure("DEBUG", "", "", "", 2, true);
    let logger = facade::logger().unwrap();
    assert_eq!(logger.sink_count(), 1);
    assert_eq!(logger.caller_skip(), 2);
    assert!(logger.cores()[0].encoder().is_structured());

    let temp_dir = tempfile::TempDir::new().unwrap();
    facade::configure("INFO", temp_dir.path().to_str().unwrap(), "facade", "ERROR", 2, false);
    let logger = facade::logger().unwrap();
    assert_eq!(logger.sink_count(), 2);
    assert!(logger.log_path().unwrap().starts_with(temp_dir.path()));

    facade::print(&[&"info only on console"]);
    let contents = std::fs::read_to_string(logger.log_path().unwrap()).unwrap();
    assert!(!contents.contains("info only on console"));

    drop(logger);
    restore_defaults();
}

#[test]
fn test_try_configure_keeps_previous_on_error() {
    let _serial = SERIAL.lock();
    restore_defaults();

    let temp_dir = tempfile::TempDir::new().unwrap();
    let blocker = temp_dir.path().join("a_file");
    std::fs::write(&blocker, "not a directory").unwrap();

    let config = LoggerConfig::new().with_file(blocker.to_str().unwrap(), "", "DEBUG");
    assert!(facade::try_configure(&config).is_err());

    let logger = facade::logger().unwrap();
    assert_eq!(logger.sink_count(), 1);
    assert!(logger.log_path().is_none());
}

#[test]
fn test_fatal_exits_with_status_one() {
    if std::env::var_os(FATAL_CHILD_ENV).is_some() {
        facade::configure("DEBUG", "", "", "", 2, false);
        facade::fatalln(&[&"shutting", &"down"]);
        unreachable!("fatal returned while enabled");
    }

    let exe = std::env::current_exe().unwrap();
    let output = Command::new(exe)
        .args(["--exact", "test_fatal_exits_with_status_one", "--nocapture"])
        .env(FATAL_CHILD_ENV, "1")
        .output()
        .expect("Failed to spawn test binary");

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("FATAL"));
    assert!(stdout.contains("shutting down"));
}
