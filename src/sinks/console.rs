//! Console sink

use crate::core::encoder::{build_encoder, Encoder};
use crate::core::error::Result;
use crate::core::severity::Severity;
use crate::core::sink::SinkBuilder;
use crate::core::writer::{StdoutSyncer, WriteSyncer};

/// Standard output sink; human records get coloured levels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleSink {
    level: Severity,
    is_structured: bool,
}

impl ConsoleSink {
    pub fn new(level: Severity, is_structured: bool) -> Self {
        Self {
            level,
            is_structured,
        }
    }

    pub fn is_structured(&self) -> bool {
        self.is_structured
    }
}

impl SinkBuilder for ConsoleSink {
    fn name(&self) -> &str {
        "console"
    }

    fn level(&self) -> Severity {
        self.level
    }

    fn encoder(&self) -> Encoder {
        build_encoder(self.is_structured)
    }

    fn writer(&self) -> Result<Box<dyn WriteSyncer>> {
        Ok(Box::new(StdoutSyncer))
    }
}
