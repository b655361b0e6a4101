//! Record encoders
//!
//! Two encodings are supported:
//! - Structured: one JSON object per line with default field names
//! - Human: `[timestamp][LEVEL][dir/file.rs:line] message`
//!
//! Console sinks colour the level; file sinks never emit ANSI sequences.

use super::error::Result;
use super::record::Record;
use super::timestamp::TimestampFormat;
use colored::Colorize;
use serde::Serialize;

/// How the level field is rendered by the human encoder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelStyle {
    /// Capital name wrapped in an ANSI colour
    CapitalColor,
    /// Plain capital name
    Capital,
}

/// Field renderers of the human encoder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HumanEncoder {
    pub time_format: TimestampFormat,
    pub level_style: LevelStyle,
}

impl HumanEncoder {
    pub fn new(level_style: LevelStyle) -> Self {
        Self {
            time_format: TimestampFormat::HumanMillis,
            level_style,
        }
    }

    fn encode(&self, record: &Record) -> String {
        let timestamp = wrap(&self.time_format.format(&record.timestamp));

        let level_name = record.severity.capital_name();
        let level = match self.level_style {
            LevelStyle::CapitalColor => {
                wrap(&level_name.color(record.severity.color_code()).to_string())
            }
            LevelStyle::Capital => wrap(level_name),
        };

        // Only the last two path components are kept
        let caller = match record.caller {
            Some(ref caller) => wrap(&caller.trimmed_path()),
            None => String::new(),
        };

        let mut line = format!("{}{}{} {}\n", timestamp, level, caller, record.message);
        if let Some(ref stack) = record.stack {
            line.push_str(stack);
            line.push('\n');
        }
        line
    }
}

fn wrap(contents: &str) -> String {
    format!("[{}]", contents)
}

#[derive(Serialize)]
struct StructuredLine<'a> {
    level: &'static str,
    ts: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    caller: Option<String>,
    msg: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    stacktrace: Option<&'a str>,
}

/// Encoding strategy of one sink. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Encoder {
    /// JSON, default field names, ISO 8601 timestamps
    Structured,
    /// Bracket-delimited text
    Human(HumanEncoder),
}

impl Encoder {
    #[must_use]
    pub fn human(level_style: LevelStyle) -> Self {
        Encoder::Human(HumanEncoder::new(level_style))
    }

    #[must_use]
    pub fn is_structured(&self) -> bool {
        matches!(self, Encoder::Structured)
    }

    /// Encode one record as a newline-terminated line.
    pub fn encode(&self, record: &Record) -> Result<Vec<u8>> {
        match self {
            Encoder::Structured => {
                let line = StructuredLine {
                    level: record.severity.lowercase_name(),
                    ts: TimestampFormat::Iso8601.format(&record.timestamp),
                    caller: record.caller.as_ref().map(|c| c.trimmed_path()),
                    msg: &record.message,
                    stacktrace: record.stack.as_deref(),
                };
                let mut bytes = serde_json::to_vec(&line)?;
                bytes.push(b'\n');
                Ok(bytes)
            }
            Encoder::Human(human) => Ok(human.encode(record).into_bytes()),
        }
    }
}

/// Encoder for a console sink: defaults when structured, coloured levels otherwise.
#[must_use]
pub fn build_encoder(is_structured: bool) -> Encoder {
    if is_structured {
        Encoder::Structured
    } else {
        Encoder::human(LevelStyle::CapitalColor)
    }
}

/// Encoder for a file sink: like [`build_encoder`] but never coloured.
#[must_use]
pub fn build_file_encoder(is_structured: bool) -> Encoder {
    if is_structured {
        Encoder::Structured
    } else {
        Encoder::human(LevelStyle::Capital)
    }
}
