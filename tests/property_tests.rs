//! Property-based tests for rust_logger_facade using proptest

use chrono::{Local, TimeZone};
use proptest::prelude::*;
use rust_logger_facade::core::message::strip_trailing_newline;
use rust_logger_facade::prelude::*;
use rust_logger_facade::sinks::compute_log_file_name;
use rust_logger_facade::LoggerOptions;

fn any_severity() -> impl Strategy<Value = Severity> {
    prop_oneof![
        Just(Severity::Debug),
        Just(Severity::Info),
        Just(Severity::Warn),
        Just(Severity::Error),
        Just(Severity::DPanic),
        Just(Severity::Panic),
        Just(Severity::Fatal),
    ]
}

/// Randomly upper/lower-case every character of `name`
fn mixed_case(name: &str, mask: &[bool]) -> String {
    name.chars()
        .zip(mask.iter().cycle())
        .map(|(c, upper)| if *upper { c.to_ascii_uppercase() } else { c.to_ascii_lowercase() })
        .collect()
}

// ============================================================================
// Severity Mapper
// ============================================================================

proptest! {
    /// Level names map regardless of case
    #[test]
    fn test_from_name_case_insensitive(
        severity in any_severity(),
        mask in prop::collection::vec(any::<bool>(), 1..8),
    ) {
        let name = mixed_case(severity.capital_name(), &mask);
        prop_assert_eq!(Severity::from_name(&name), severity);
    }

    /// Anything that is not a level name disables the sink
    #[test]
    fn test_unknown_names_are_invalid(name in "[a-zA-Z_ ]{0,12}") {
        let known = Severity::ALL
            .iter()
            .any(|severity| severity.capital_name().eq_ignore_ascii_case(&name));
        prop_assume!(!known);
        prop_assert_eq!(Severity::from_name(&name), Severity::Invalid);
    }

    /// A threshold emits exactly the records at or above it
    #[test]
    fn test_threshold_enables(threshold in any_severity(), level in any_severity()) {
        prop_assert_eq!(threshold.enables(level), level >= threshold);
        prop_assert!(!Severity::Invalid.enables(level));
    }
}

// ============================================================================
// Message handling
// ============================================================================

proptest! {
    /// At most one trailing newline is removed and nothing else changes
    #[test]
    fn test_strip_trailing_newline(body in ".{0,40}", newlines in 0usize..3) {
        let message = format!("{}{}", body, "\n".repeat(newlines));
        let stripped = strip_trailing_newline(message.clone());

        if message.ends_with('\n') {
            prop_assert_eq!(stripped.len(), message.len() - 1);
        } else {
            prop_assert_eq!(&stripped, &message);
        }
        prop_assert!(message.starts_with(&stripped));
    }

    /// Print and terminal families strip exactly one trailing newline
    #[test]
    fn test_emitted_messages_strip_one_newline(body in "[a-z ]{0,20}", newlines in 0usize..3) {
        let message = format!("{}{}", body, "\n".repeat(newlines));
        let expected = strip_trailing_newline(message.clone());

        let buffer = SharedBuffer::new();
        let core = Core::new("memory", Encoder::human(LevelStyle::Capital), buffer.clone(), Severity::Debug);
        let logger = Logger::from_cores(vec![core], LoggerOptions::default()).unwrap();

        logger.printf(format_args!("{}", message));
        let expected_tail = format!("] {}\n", expected);
        prop_assert!(buffer.contents().ends_with(&expected_tail));

        buffer.clear();
        let exit = logger.emit_fatal(message.clone());
        prop_assert_eq!(exit.message(), expected.as_str());
        prop_assert!(buffer.contents().contains("[FATAL]"));
        prop_assert!(buffer.contents().contains(&expected_tail));

        buffer.clear();
        let panic = logger.emit_panic(message);
        prop_assert_eq!(panic.message(), expected.as_str());
        prop_assert!(buffer.contents().contains(&expected_tail));
    }

    /// Human records are a single bracketed line plus the message as given
    #[test]
    fn test_human_encoding_keeps_message(message in "[^\n]{0,60}", severity in any_severity()) {
        let record = Record::new(severity, message.clone());
        let bytes = Encoder::human(LevelStyle::Capital).encode(&record).unwrap();
        let line = String::from_utf8(bytes).unwrap();

        prop_assert!(line.starts_with('['));
        let expected_tail = format!("] {}\n", message);
        prop_assert!(line.ends_with(&expected_tail));
        let level_tag = format!("[{}]", severity.capital_name());
        prop_assert!(line.contains(&level_tag));
    }

    /// Structured records always parse back to the same message
    #[test]
    fn test_structured_encoding_parses(message in ".{0,60}", severity in any_severity()) {
        let record = Record::new(severity, message.clone());
        let bytes = Encoder::Structured.encode(&record).unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        prop_assert_eq!(parsed["msg"].as_str(), Some(message.as_str()));
        prop_assert_eq!(parsed["level"].as_str(), Some(severity.lowercase_name()));
    }
}

// ============================================================================
// File naming
// ============================================================================

proptest! {
    /// Generated names never contain spaces, dashes or colons
    #[test]
    fn test_file_name_characters(
        suffix in "[a-z0-9 :_-]{0,16}",
        secs in 0i64..4_000_000_000,
    ) {
        let at = Local.timestamp_opt(secs, 0).single();
        prop_assume!(at.is_some());
        let name = compute_log_file_name(&suffix, &at.unwrap());

        prop_assert!(name.ends_with(".log"));
        prop_assert!(!name.contains(' '));
        prop_assert!(!name.contains('-'));
        prop_assert!(!name.contains(':'));
        // YYYYMMDD_HHMMSS
        prop_assert_eq!(name.as_bytes()[8], b'_');
    }
}
