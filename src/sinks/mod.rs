//! Sink implementations

pub mod console;
pub mod file;
pub mod rolling_file;

pub use console::ConsoleSink;
pub use file::{compute_log_file_name, resolve_log_path, FileSink};
pub use rolling_file::{RollingFileWriter, RotationPolicy};

pub use crate::core::SinkBuilder;
