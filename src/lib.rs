//! # Rust Logger Facade
//!
//! A process-wide logging facade that tees every record to several sinks,
//! each with its own severity threshold and encoding.
//!
//! ## Features
//!
//! - **Sink Composition**: console and rotating file sinks behind one logger
//! - **Two Encodings**: JSON records or bracketed human-readable lines
//! - **Flush Guarantees**: every emission is synced; fatal and panic calls
//!   sync before terminating
//! - **Process-wide Facade**: enable, disable and reconfigure at runtime
//!
//! ## Example
//!
//! ```
//! use rust_logger_facade::prelude::*;
//!
//! let logger = Logger::builder()
//!     .console_level("INFO")
//!     .caller_skip(1)
//!     .build()
//!     .unwrap();
//!
//! logger.printf(format_args!("cache warmed in {}ms", 42));
//! logger.println(&[&"ready", &true]);
//! ```

pub mod core;
pub mod facade;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        Caller, Core, Encoder, LevelStyle, Logger, LoggerBuilder, LoggerConfig, LoggerError,
        LoggerMetrics, Record, Result, Severity, SharedBuffer, SinkBuilder, Termination,
        TimestampFormat, WriteSyncer,
    };
    pub use crate::facade;
    pub use crate::sinks::{ConsoleSink, FileSink, RotationPolicy};
}

pub use crate::core::{
    Caller, Core, Encoder, LevelStyle, Logger, LoggerBuilder, LoggerConfig, LoggerError,
    LoggerMetrics, LoggerOptions, Record, Result, Severity, SharedBuffer, SinkBuilder,
    Termination, TimestampFormat, WriteSyncer,
};
pub use sinks::{ConsoleSink, FileSink, RollingFileWriter, RotationPolicy};
