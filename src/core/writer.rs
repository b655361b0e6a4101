//! Write destinations for sinks

use parking_lot::Mutex;
use std::io::{self, Write};
use std::sync::Arc;

/// An append-only byte destination that can be synchronized.
///
/// `sync` is called after every emission; destinations that cannot be
/// synchronized must make it a no-op rather than fail.
pub trait WriteSyncer: Write + Send {
    fn sync(&mut self) -> io::Result<()>;
}

/// Standard output with a no-op `sync`.
///
/// Syncing a console stream fails on several platforms ("inappropriate ioctl
/// for device", "invalid argument"), which must never surface as a logging
/// error. Buffered bytes are still pushed out by `flush`.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSyncer;

impl Write for StdoutSyncer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stdout().lock().write(buf)
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        io::stdout().lock().write_all(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stdout().flush()
    }
}

impl WriteSyncer for StdoutSyncer {
    fn sync(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// In-memory destination whose contents stay readable through clones.
///
/// # Examples
///
/// ```
/// use rust_logger_facade::SharedBuffer;
/// use std::io::Write;
///
/// let buffer = SharedBuffer::new();
/// let mut writer = buffer.clone();
/// writer.write_all(b"line\n").unwrap();
/// assert_eq!(buffer.contents(), "line\n");
/// ```
#[derive(Debug, Default, Clone)]
pub struct SharedBuffer {
    inner: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffered bytes as (lossy) UTF-8
    #[must_use]
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.inner.lock()).into_owned()
    }

    /// Buffered contents split into lines
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(String::from).collect()
    }

    pub fn clear(&self) {
        self.inner.lock().clear();
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl WriteSyncer for SharedBuffer {
    fn sync(&mut self) -> io::Result<()> {
        Ok(())
    }
}
