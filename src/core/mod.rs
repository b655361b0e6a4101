//! Core logger types and traits

pub mod config;
pub mod encoder;
pub mod error;
pub mod logger;
pub mod message;
pub mod metrics;
pub mod record;
pub mod severity;
pub mod sink;
pub(crate) mod stacktrace;
pub mod timestamp;
pub mod writer;

pub use config::{LoggerConfig, DEFAULT_CALLER_SKIP};
pub use encoder::{build_encoder, build_file_encoder, Encoder, HumanEncoder, LevelStyle};
pub use error::{LoggerError, Result, Termination, FATAL_EXIT_CODE};
pub use logger::{Logger, LoggerBuilder, LoggerOptions, DEFAULT_STACK_THRESHOLD};
pub use metrics::LoggerMetrics;
pub use record::{Caller, Record};
pub use severity::Severity;
pub use sink::{Core, SinkBuilder};
pub use timestamp::TimestampFormat;
pub use writer::{SharedBuffer, StdoutSyncer, WriteSyncer};
