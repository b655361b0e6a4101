//! Size-based rolling file writer
//!
//! When a write would push the active file past the size limit, the file is
//! renamed to a timestamped backup (`<stem>-<YYYY-MM-DDTHH-MM-SS.mmm><ext>`) and
//! a fresh file is opened in its place. Backups are then pruned by count and
//! age and gzip-compressed.

use crate::core::error::{LoggerError, Result};
use crate::core::timestamp::TimestampFormat;
use crate::core::writer::WriteSyncer;
use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

const MEGABYTE: u64 = 1024 * 1024;
const DAY: Duration = Duration::from_secs(24 * 60 * 60);

/// Retention and rotation settings
///
/// The default is 10 MB per file, 100 backups, one day of age and
/// compression on.
///
/// # Examples
///
/// ```
/// use rust_logger_facade::sinks::RotationPolicy;
/// use std::time::Duration;
///
/// let policy = RotationPolicy::new()
///     .with_max_size(50 * 1024 * 1024)
///     .with_max_backups(7)
///     .with_max_age(Some(Duration::from_secs(7 * 24 * 3600)))
///     .with_compression(false);
/// assert_eq!(policy.max_backups, 7);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationPolicy {
    /// Maximum size of the active file in bytes
    pub max_size: u64,
    /// Maximum number of backups to keep; 0 keeps all
    pub max_backups: usize,
    /// Backups older than this are removed; `None` keeps them regardless of age
    pub max_age: Option<Duration>,
    /// Whether to gzip rotated files
    pub compress: bool,
}

impl Default for RotationPolicy {
    fn default() -> Self {
        Self {
            max_size: 10 * MEGABYTE,
            max_backups: 100,
            max_age: Some(DAY),
            compress: true,
        }
    }
}

impl RotationPolicy {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_max_size(mut self, bytes: u64) -> Self {
        self.max_size = bytes;
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_max_backups(mut self, count: usize) -> Self {
        self.max_backups = count;
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_max_age(mut self, max_age: Option<Duration>) -> Self {
        self.max_age = max_age;
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_compression(mut self, enabled: bool) -> Self {
        self.compress = enabled;
        self
    }
}

#[derive(Debug)]
struct Backup {
    path: PathBuf,
    rotated_at: DateTime<Local>,
    compressed: bool,
}

/// Append-only writer that rotates its file by size.
///
/// # Examples
///
/// ```no_run
/// use rust_logger_facade::sinks::{RollingFileWriter, RotationPolicy};
/// use std::io::Write;
///
/// let mut writer = RollingFileWriter::with_policy("/var/log/app.log", RotationPolicy::default())?;
/// writer.write_all(b"started\n")?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct RollingFileWriter {
    path: PathBuf,
    policy: RotationPolicy,
    writer: Option<BufWriter<File>>,
    current_size: u64,
}

impl RollingFileWriter {
    /// Open `path` for appending, creating parent directories as needed
    ///
    /// # Errors
    ///
    /// Returns error if the directory or file cannot be created or opened
    pub fn with_policy<P: AsRef<Path>>(path: P, policy: RotationPolicy) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                LoggerError::io_operation(
                    "create log directory",
                    format!("Failed to create directory '{}'", parent.display()),
                    e,
                )
            })?;
        }

        let (file, current_size) = Self::open(&path)?;

        Ok(Self {
            path,
            policy,
            writer: Some(BufWriter::new(file)),
            current_size,
        })
    }

    fn open(path: &Path) -> Result<(File, u64)> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| {
                LoggerError::file_sink(path.display().to_string(), format!("Failed to open: {}", e))
            })?;

        let size = file
            .metadata()
            .map_err(|e| {
                LoggerError::file_sink(
                    path.display().to_string(),
                    format!("Cannot access file metadata: {}", e),
                )
            })?
            .len();
        Ok((file, size))
    }

    /// Write a whole buffer, rotating first if it would not fit
    pub fn write_bytes(&mut self, buf: &[u8]) -> Result<()> {
        let len = buf.len() as u64;
        if len > self.policy.max_size {
            return Err(LoggerError::file_sink(
                self.path.display().to_string(),
                format!(
                    "write length {} exceeds maximum file size {}",
                    len, self.policy.max_size
                ),
            ));
        }

        if self.current_size + len > self.policy.max_size {
            if let Err(e) = self.rotate() {
                eprintln!(
                    "[LOGGER WARNING] Log rotation failed: {}. Continuing with current file.",
                    e
                );

                if self.writer.is_none() {
                    let (file, size) = Self::open(&self.path)?;
                    self.writer = Some(BufWriter::new(file));
                    self.current_size = size;
                }

                // Let the file grow past the limit rather than retry on every write
                self.current_size = 0;
            }
        }

        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| LoggerError::writer("Writer not initialized"))?;
        writer.write_all(buf).map_err(|e| {
            LoggerError::file_sink(
                self.path.display().to_string(),
                format!("Failed to write log entry: {}", e),
            )
        })?;
        self.current_size += len;
        Ok(())
    }

    fn rotate(&mut self) -> Result<()> {
        if let Some(mut writer) = self.writer.take() {
            writer.flush().map_err(|e| {
                LoggerError::file_rotation(
                    self.path.display().to_string(),
                    format!("Failed to flush before rotation: {}", e),
                )
            })?;
        }

        if self.path.exists() {
            let backup = self.free_backup_path(Local::now());
            fs::rename(&self.path, &backup).map_err(|e| {
                LoggerError::file_rotation(
                    self.path.display().to_string(),
                    format!("Failed to rotate current log file: {}", e),
                )
            })?;
        }

        let (file, size) = Self::open(&self.path)?;
        self.writer = Some(BufWriter::new(file));
        self.current_size = size;

        self.prune_backups();
        Ok(())
    }

    fn stem_and_ext(&self) -> (String, String) {
        let stem = self
            .path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("app")
            .to_string();
        let ext = self
            .path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{}", e))
            .unwrap_or_default();
        (stem, ext)
    }

    /// Backup path for a rotation at `at`
    fn backup_path(&self, at: &DateTime<Local>) -> PathBuf {
        let (stem, ext) = self.stem_and_ext();
        self.path.with_file_name(format!(
            "{}-{}{}",
            stem,
            TimestampFormat::Backup.format(at),
            ext
        ))
    }

    /// Backup path that collides with neither a plain nor a compressed backup
    fn free_backup_path(&self, mut at: DateTime<Local>) -> PathBuf {
        loop {
            let candidate = self.backup_path(&at);
            if !candidate.exists() && !gz_path(&candidate).exists() {
                return candidate;
            }
            at += chrono::Duration::milliseconds(1);
        }
    }

    fn list_backups(&self) -> Vec<Backup> {
        let (stem, ext) = self.stem_and_ext();
        let prefix = format!("{}-", stem);
        let compressed_suffix = format!("{}.gz", ext);
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) => {
                eprintln!(
                    "[LOGGER WARNING] Cannot list backups in {}: {}",
                    dir.display(),
                    e
                );
                return Vec::new();
            }
        };

        entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                let name = entry.file_name().to_str()?.to_string();
                let rest = name.strip_prefix(&prefix)?;
                let (stamp, compressed) = match rest.strip_suffix(&compressed_suffix) {
                    Some(stamp) => (stamp, true),
                    None => (rest.strip_suffix(ext.as_str())?, false),
                };
                let naive =
                    NaiveDateTime::parse_from_str(stamp, TimestampFormat::Backup.pattern()).ok()?;
                let rotated_at = Local.from_local_datetime(&naive).earliest()?;
                Some(Backup {
                    path: entry.path(),
                    rotated_at,
                    compressed,
                })
            })
            .collect()
    }

    /// Remove backups beyond the count and age limits, then compress the rest
    fn prune_backups(&self) {
        let mut backups = self.list_backups();
        backups.sort_by(|a, b| b.rotated_at.cmp(&a.rotated_at));

        let cutoff = self
            .policy
            .max_age
            .and_then(|age| chrono::Duration::from_std(age).ok())
            .map(|age| Local::now() - age);

        let mut kept = Vec::with_capacity(backups.len());
        for (index, backup) in backups.into_iter().enumerate() {
            let over_count = self.policy.max_backups > 0 && index >= self.policy.max_backups;
            let too_old = cutoff.is_some_and(|cutoff| backup.rotated_at < cutoff);

            if over_count || too_old {
                if let Err(e) = fs::remove_file(&backup.path) {
                    eprintln!(
                        "[LOGGER WARNING] Failed to remove old backup {}: {}",
                        backup.path.display(),
                        e
                    );
                }
            } else {
                kept.push(backup);
            }
        }

        if self.policy.compress {
            for backup in kept.iter().filter(|b| !b.compressed) {
                if let Err(e) = compress_file(&backup.path) {
                    eprintln!("[LOGGER WARNING] {}", e);
                }
            }
        }
    }

    /// Bytes written to the active file
    #[must_use]
    pub fn current_size(&self) -> u64 {
        self.current_size
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn policy(&self) -> &RotationPolicy {
        &self.policy
    }
}

fn gz_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".gz");
    PathBuf::from(name)
}

/// Gzip `path` into `path.gz`, streaming through a temporary file.
///
/// The original is only removed once the compressed file is complete.
fn compress_file(path: &Path) -> Result<()> {
    use std::io::{BufReader, Read};

    let gz = gz_path(path);
    let mut temp_name = gz.as_os_str().to_os_string();
    temp_name.push(".tmp");
    let temp_gz = PathBuf::from(temp_name);

    let input = File::open(path).map_err(|e| {
        LoggerError::io_operation(
            "compress log file",
            format!("Failed to open file for compression: {}", path.display()),
            e,
        )
    })?;
    let mut reader = BufReader::with_capacity(64 * 1024, input);

    let output = File::create(&temp_gz).map_err(|e| {
        LoggerError::io_operation(
            "compress log file",
            format!("Failed to create temporary compressed file: {}", temp_gz.display()),
            e,
        )
    })?;
    let mut encoder = flate2::write::GzEncoder::new(
        BufWriter::with_capacity(64 * 1024, output),
        flate2::Compression::default(),
    );

    let mut buffer = vec![0u8; 64 * 1024];
    loop {
        let bytes_read = reader.read(&mut buffer).map_err(|e| {
            let _ = fs::remove_file(&temp_gz);
            LoggerError::io_operation(
                "compress log file",
                format!("Failed to read from file: {}", path.display()),
                e,
            )
        })?;

        if bytes_read == 0 {
            break;
        }

        encoder.write_all(&buffer[..bytes_read]).map_err(|e| {
            let _ = fs::remove_file(&temp_gz);
            LoggerError::io_operation("compress log file", "Failed to compress data chunk", e)
        })?;
    }

    encoder
        .finish()
        .and_then(|mut inner| inner.flush())
        .map_err(|e| {
            let _ = fs::remove_file(&temp_gz);
            LoggerError::io_operation("compress log file", "Failed to finish compression", e)
        })?;

    fs::rename(&temp_gz, &gz).map_err(|e| {
        let _ = fs::remove_file(&temp_gz);
        LoggerError::io_operation(
            "compress log file",
            format!("Failed to rename compressed file to: {}", gz.display()),
            e,
        )
    })?;

    if let Err(e) = fs::remove_file(path) {
        eprintln!(
            "[LOGGER WARNING] Compression succeeded but failed to remove original file {}: {}",
            path.display(),
            e
        );
    }

    Ok(())
}

impl Write for RollingFileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_bytes(buf)
            .map(|()| buf.len())
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.writer {
            Some(ref mut writer) => writer.flush(),
            None => Ok(()),
        }
    }
}

impl WriteSyncer for RollingFileWriter {
    fn sync(&mut self) -> io::Result<()> {
        self.flush()
    }
}

impl Drop for RollingFileWriter {
    fn drop(&mut self) {
        if let Some(mut writer) = self.writer.take() {
            let _ = writer.flush();
        }
    }
}
