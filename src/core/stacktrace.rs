//! Caller attribution and stack capture
//!
//! The public logging calls are `#[track_caller]`, so the location of the
//! user's call is always known without walking the stack. A backtrace is only
//! taken when a stack trace must be attached, or when the caller-skip asks for
//! frames beyond that location.

use super::record::Caller;
use backtrace::Backtrace;
use std::panic::Location;
use std::path::{Path, PathBuf};

const CRATE_PREFIX: &str = concat!(env!("CARGO_CRATE_NAME"), "::");

#[derive(Debug, Clone)]
struct Frame {
    function: Option<String>,
    file: Option<PathBuf>,
    line: Option<u32>,
}

impl Frame {
    fn is_internal(&self) -> bool {
        match self.function.as_deref() {
            Some(name) => {
                let name = name.trim_start_matches('<');
                name.starts_with(CRATE_PREFIX) || name.starts_with("backtrace::")
            }
            None => true,
        }
    }

    fn matches(&self, location: &Location<'_>) -> bool {
        match (&self.file, self.line) {
            (Some(file), Some(line)) => {
                line == location.line() && file.ends_with(Path::new(location.file()))
            }
            _ => false,
        }
    }

    fn to_caller(&self) -> Option<Caller> {
        let file = self.file.as_ref()?;
        let mut caller = Caller::new(file.display().to_string(), self.line.unwrap_or(0));
        if let Some(ref function) = self.function {
            caller = caller.with_function(function.clone());
        }
        Some(caller)
    }
}

/// Resolved frames of the current thread, one per (possibly inlined) symbol.
fn capture_frames() -> Vec<Frame> {
    let backtrace = Backtrace::new();
    backtrace
        .frames()
        .iter()
        .flat_map(|frame| frame.symbols().iter())
        .map(|symbol| Frame {
            function: symbol.name().map(|name| format!("{:#}", name)),
            file: symbol.filename().map(Path::to_path_buf),
            line: symbol.lineno(),
        })
        .collect()
}

/// Attribute a record and optionally capture its stack.
///
/// `extra_skip` is the number of frames above the call site to elide. When the
/// call site cannot be found in the backtrace (no debug info), attribution
/// falls back to `location` and the stack starts at the first frame outside
/// this crate.
pub(crate) fn resolve(
    location: &Location<'_>,
    extra_skip: usize,
    capture_stack: bool,
) -> (Caller, Option<String>) {
    if extra_skip == 0 && !capture_stack {
        return (Caller::from(location), None);
    }

    let frames = capture_frames();
    let call_site = frames.iter().position(|frame| frame.matches(location));

    let (caller, start) = match call_site {
        Some(index) => {
            let attributed = index + extra_skip;
            match frames.get(attributed).and_then(Frame::to_caller) {
                Some(caller) => (caller, attributed),
                None => (Caller::from(location), index),
            }
        }
        None => {
            let first_external = frames
                .iter()
                .position(|frame| !frame.is_internal())
                .unwrap_or(frames.len());
            (Caller::from(location), first_external)
        }
    };

    let stack = if capture_stack {
        Some(format_frames(frames.get(start..).unwrap_or_default()))
    } else {
        None
    };

    (caller, stack)
}

fn format_frames(frames: &[Frame]) -> String {
    frames
        .iter()
        .map(|frame| {
            let function = frame.function.as_deref().unwrap_or("<unknown>");
            match (&frame.file, frame.line) {
                (Some(file), Some(line)) => format!("{}\n\t{}:{}", function, file.display(), line),
                (Some(file), None) => format!("{}\n\t{}", function, file.display()),
                _ => function.to_string(),
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
