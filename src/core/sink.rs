//! Sink cores and the capability trait used to build them

use super::encoder::Encoder;
use super::error::{LoggerError, Result};
use super::record::Record;
use super::severity::Severity;
use super::writer::WriteSyncer;
use parking_lot::Mutex;
use std::fmt;

/// One output destination with its own encoder and threshold.
///
/// Records are encoded outside the writer lock; the lock only covers the
/// write itself, so concurrent emissions never interleave within a line.
pub struct Core {
    name: String,
    encoder: Encoder,
    writer: Mutex<Box<dyn WriteSyncer>>,
    threshold: Severity,
}

impl Core {
    pub fn new<W: WriteSyncer + 'static>(
        name: impl Into<String>,
        encoder: Encoder,
        writer: W,
        threshold: Severity,
    ) -> Self {
        Self::from_boxed(name, encoder, Box::new(writer), threshold)
    }

    pub fn from_boxed(
        name: impl Into<String>,
        encoder: Encoder,
        writer: Box<dyn WriteSyncer>,
        threshold: Severity,
    ) -> Self {
        Self {
            name: name.into(),
            encoder,
            writer: Mutex::new(writer),
            threshold,
        }
    }

    #[inline]
    pub fn enabled(&self, severity: Severity) -> bool {
        self.threshold.enables(severity)
    }

    /// Encode and write `record` if it passes the threshold.
    ///
    /// Returns whether the record was written.
    pub fn write(&self, record: &Record) -> Result<bool> {
        if !self.enabled(record.severity) {
            return Ok(false);
        }
        let bytes = self.encoder.encode(record)?;
        self.writer.lock().write_all(&bytes).map_err(|e| {
            LoggerError::io_operation("writing record", format!("sink '{}'", self.name), e)
        })?;
        Ok(true)
    }

    pub fn sync(&self) -> Result<()> {
        self.writer.lock().sync().map_err(|e| {
            LoggerError::io_operation("syncing sink", format!("sink '{}'", self.name), e)
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn encoder(&self) -> &Encoder {
        &self.encoder
    }

    pub fn threshold(&self) -> Severity {
        self.threshold
    }
}

impl fmt::Debug for Core {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Core")
            .field("name", &self.name)
            .field("encoder", &self.encoder)
            .field("threshold", &self.threshold)
            .finish_non_exhaustive()
    }
}

/// Capabilities a sink type provides to become a [`Core`].
///
/// Each sink supplies its own encoder and writer; `build_core` combines them
/// with the sink's threshold.
pub trait SinkBuilder {
    fn name(&self) -> &str;
    fn level(&self) -> Severity;
    fn encoder(&self) -> Encoder;
    fn writer(&self) -> Result<Box<dyn WriteSyncer>>;

    fn build_core(&self) -> Result<Core> {
        let encoder = self.encoder();
        let writer = self.writer()?;
        Ok(Core::from_boxed(self.name(), encoder, writer, self.level()))
    }
}
