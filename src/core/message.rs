//! Message formatting for the print family

use std::fmt::{self, Display, Write};

/// Concatenate arguments with no separator (the `print` variants).
#[must_use]
pub fn concat_args(args: &[&dyn Display]) -> String {
    let mut out = String::new();
    for arg in args {
        let _ = write!(out, "{}", arg);
    }
    out
}

/// Join arguments with single spaces and end with a newline (the `println`
/// variants).
#[must_use]
pub fn join_args_line(args: &[&dyn Display]) -> String {
    let mut out = String::new();
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{}", arg);
    }
    out.push('\n');
    out
}

/// Render pattern arguments (the `f` variants).
#[must_use]
pub fn format_args_string(args: fmt::Arguments<'_>) -> String {
    match args.as_str() {
        Some(s) => s.to_string(),
        None => fmt::format(args),
    }
}

/// Remove exactly one trailing `\n`, leaving everything else untouched.
///
/// # Examples
///
/// ```
/// use rust_logger_facade::core::message::strip_trailing_newline;
///
/// assert_eq!(strip_trailing_newline("done\n\n".to_string()), "done\n");
/// assert_eq!(strip_trailing_newline("a\nb".to_string()), "a\nb");
/// ```
#[must_use]
pub fn strip_trailing_newline(mut message: String) -> String {
    if message.ends_with('\n') {
        message.pop();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concat_args() {
        assert_eq!(concat_args(&[&"a", &1, &"b", &2.5]), "a1b2.5");
        assert_eq!(concat_args(&[]), "");
    }

    #[test]
    fn test_join_args_line() {
        assert_eq!(join_args_line(&[&"status", &200]), "status 200\n");
        assert_eq!(join_args_line(&[]), "\n");
    }

    #[test]
    fn test_format_args_string() {
        assert_eq!(format_args_string(format_args!("static")), "static");
        assert_eq!(format_args_string(format_args!("{} of {}", 3, 5)), "3 of 5");
    }

    #[test]
    fn test_strip_trailing_newline() {
        assert_eq!(strip_trailing_newline("line\n".to_string()), "line");
        assert_eq!(strip_trailing_newline("line".to_string()), "line");
        assert_eq!(strip_trailing_newline("\n".to_string()), "");
        assert_eq!(strip_trailing_newline("a\nb\n".to_string()), "a\nb");
        assert_eq!(strip_trailing_newline("crlf\r\n".to_string()), "crlf\r");
    }
}
