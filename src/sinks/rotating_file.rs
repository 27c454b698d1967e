//! Size-rotated log file with optional gzip compression and age pruning
//!
//! The active file is `<path>`. When the next line would push it past the
//! size limit, it is renamed to `<path>.1` (older backups shift to `.2`,
//! `.3`, ...), optionally compressed to `<path>.1.gz`, and a fresh file is
//! opened. Backups older than `max_age` are deleted, and so are backups
//! beyond `max_backups` when a count limit is set. Without a limit every
//! rotated segment is kept.

use crate::core::error::{LoggerError, Result};
use crate::core::sink::Sink;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

const MEGABYTE: u64 = 1024 * 1024;

/// Size used when a limit of zero megabytes is requested
pub const DEFAULT_MAX_SIZE_MB: u64 = 100;

/// Age limit of the file sink built from a (path, size) pair
pub const DEFAULT_MAX_AGE: Duration = Duration::from_secs(24 * 60 * 60);

/// Configuration for the rotating file sink
///
/// # Examples
///
/// ```
/// use rust_leveled_logger::sinks::RotationPolicy;
/// use std::time::Duration;
///
/// let policy = RotationPolicy::new()
///     .with_max_size_mb(50)
///     .with_max_backups(7)
///     .with_max_age(Duration::from_secs(86_400))
///     .with_compression(true);
/// assert_eq!(policy.max_bytes, 50 * 1024 * 1024);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RotationPolicy {
    /// Rotate before a write would take the file past this size
    pub max_bytes: u64,
    /// Maximum number of rotated files to keep; `None` keeps all of them
    pub max_backups: Option<usize>,
    /// Delete rotated files older than this
    pub max_age: Option<Duration>,
    /// Whether to gzip rotated files
    pub compress: bool,
}

impl Default for RotationPolicy {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_SIZE_MB * MEGABYTE,
            max_backups: None,
            max_age: None,
            compress: false,
        }
    }
}

impl RotationPolicy {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Policy used for file destinations given as (path, size in MB):
    /// one day of retention, compressed backups.
    #[must_use]
    pub fn daily_compressed(max_size_mb: u64) -> Self {
        Self::new()
            .with_max_size_mb(max_size_mb)
            .with_max_age(DEFAULT_MAX_AGE)
            .with_compression(true)
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_max_size(mut self, bytes: u64) -> Self {
        self.max_bytes = bytes.max(1);
        self
    }

    /// Set the size limit in megabytes; zero selects [`DEFAULT_MAX_SIZE_MB`]
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_max_size_mb(mut self, megabytes: u64) -> Self {
        let megabytes = if megabytes == 0 {
            DEFAULT_MAX_SIZE_MB
        } else {
            megabytes
        };
        self.max_bytes = megabytes.saturating_mul(MEGABYTE);
        self
    }

    /// Set maximum backup files (at least one is always kept)
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_max_backups(mut self, count: usize) -> Self {
        self.max_backups = Some(count.max(1));
        self
    }

    /// Keep every rotated file (age pruning still applies)
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_unlimited_backups(mut self) -> Self {
        self.max_backups = None;
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_max_age(mut self, age: Duration) -> Self {
        self.max_age = Some(age);
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_compression(mut self, enabled: bool) -> Self {
        self.compress = enabled;
        self
    }
}

/// Rotating file sink
///
/// # Examples
///
/// ```no_run
/// use rust_leveled_logger::sinks::{RotatingFileSink, RotationPolicy};
///
/// let sink = RotatingFileSink::with_policy(
///     "/var/log/app/message",
///     RotationPolicy::daily_compressed(512),
/// ).unwrap();
/// ```
pub struct RotatingFileSink {
    base_path: PathBuf,
    name: String,
    policy: RotationPolicy,
    writer: Option<BufWriter<File>>,
    current_size: u64,
}

impl RotatingFileSink {
    /// Create a sink with the default policy
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be created or opened
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::with_policy(path, RotationPolicy::default())
    }

    /// Create a sink with a custom policy
    ///
    /// # Errors
    ///
    /// Returns error if the directory or file cannot be created or opened
    pub fn with_policy<P: AsRef<Path>>(path: P, policy: RotationPolicy) -> Result<Self> {
        let base_path = path.as_ref().to_path_buf();

        if let Some(parent) = base_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                LoggerError::io_operation(
                    "create log directory",
                    format!("Failed to create directory '{}'", parent.display()),
                    e,
                )
            })?;
        }

        let (file, current_size) = Self::open_append(&base_path)?;

        Ok(Self {
            name: base_path.display().to_string(),
            base_path,
            policy,
            writer: Some(BufWriter::new(file)),
            current_size,
        })
    }

    fn open_append(path: &Path) -> Result<(File, u64)> {
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

    fn should_rotate(&self, incoming: u64) -> bool {
        self.current_size > 0 && self.current_size.saturating_add(incoming) > self.policy.max_bytes
    }

    /// Get backup file path for given index
    fn backup_path(&self, index: usize) -> PathBuf {
        let mut path = self.base_path.clone();
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("message");
        path.set_file_name(format!("{}.{}", filename, index));
        path
    }

    fn backup_exists(&self, index: usize) -> bool {
        let plain = self.backup_path(index);
        Self::compressed_path(&plain).exists() || plain.exists()
    }

    /// Count of consecutive backups present, starting at `.1`
    fn existing_backups(&self) -> usize {
        let mut count = 0;
        while self.backup_exists(count + 1) {
            count += 1;
        }
        count
    }

    fn compressed_path(path: &Path) -> PathBuf {
        let mut name = path.as_os_str().to_os_string();
        name.push(".gz");
        PathBuf::from(name)
    }

    /// Move `from` (plain or compressed) onto `to`
    fn shift_backup(from: &Path, to: &Path) -> Result<()> {
        for (src, dst) in [
            (Self::compressed_path(from), Self::compressed_path(to)),
            (from.to_path_buf(), to.to_path_buf()),
        ] {
            if !src.exists() {
                continue;
            }
            if fs::rename(&src, &dst).is_err() {
                // Some platforms refuse to rename over an existing file
                let _ = fs::remove_file(&dst);
                fs::rename(&src, &dst).map_err(|e| {
                    LoggerError::file_rotation(
                        src.display().to_string(),
                        format!("Failed to rotate backup files: {}", e),
                    )
                })?;
            }
        }
        Ok(())
    }

    fn rotate(&mut self) -> Result<()> {
        if let Some(mut writer) = self.writer.take() {
            writer.flush().map_err(|e| {
                LoggerError::file_rotation(
                    self.base_path.display().to_string(),
                    format!("Failed to flush before rotation: {}", e),
                )
            })?;
        }

        let shift_from = match self.policy.max_backups {
            Some(max_backups) => {
                let oldest = self.backup_path(max_backups);
                for path in [Self::compressed_path(&oldest), oldest] {
                    if path.exists() {
                        if let Err(e) = fs::remove_file(&path) {
                            eprintln!(
                                "[LOGGER WARNING] Failed to remove oldest backup {}: {}",
                                path.display(),
                                e
                            );
                        }
                    }
                }
                max_backups - 1
            }
            None => self.existing_backups(),
        };

        for i in (1..=shift_from).rev() {
            Self::shift_backup(&self.backup_path(i), &self.backup_path(i + 1))?;
        }

        let first_backup = self.backup_path(1);
        if self.base_path.exists() {
            fs::rename(&self.base_path, &first_backup).map_err(|e| {
                LoggerError::file_rotation(
                    self.base_path.display().to_string(),
                    format!("Failed to rotate current log file: {}", e),
                )
            })?;

            if self.policy.compress {
                Self::compress_file(&first_backup)?;
            }
        }

        let (file, _) = Self::open_append(&self.base_path)?;
        self.writer = Some(BufWriter::new(file));
        self.current_size = 0;

        self.prune_expired();
        Ok(())
    }

    /// Delete backups whose last modification is older than `max_age`
    fn prune_expired(&self) {
        let Some(max_age) = self.policy.max_age else {
            return;
        };
        let now = SystemTime::now();

        let last = self
            .policy
            .max_backups
            .unwrap_or_else(|| self.existing_backups());
        for i in 1..=last {
            let plain = self.backup_path(i);
            for path in [Self::compressed_path(&plain), plain] {
                let expired = fs::metadata(&path)
                    .and_then(|m| m.modified())
                    .map(|modified| now.duration_since(modified).unwrap_or(Duration::ZERO) > max_age)
                    .unwrap_or(false);
                if expired {
                    if let Err(e) = fs::remove_file(&path) {
                        eprintln!(
                            "[LOGGER WARNING] Failed to remove expired backup {}: {}",
                            path.display(),
                            e
                        );
                    }
                }
            }
        }
    }

    /// Gzip `path` to `path.gz`, removing the original only once the
    /// compressed copy is complete
    fn compress_file(path: &Path) -> Result<()> {
        use std::io::BufReader;

        let gz_path = Self::compressed_path(path);
        let mut temp_name = gz_path.as_os_str().to_os_string();
        temp_name.push(".tmp");
        let temp_gz_path = PathBuf::from(temp_name);

        let result = (|| -> std::io::Result<()> {
            let mut reader = BufReader::with_capacity(64 * 1024, File::open(path)?);
            let output = BufWriter::with_capacity(64 * 1024, File::create(&temp_gz_path)?);
            let mut encoder = flate2::write::GzEncoder::new(output, flate2::Compression::default());
            std::io::copy(&mut reader, &mut encoder)?;
            encoder.finish()?.flush()?;
            fs::rename(&temp_gz_path, &gz_path)
        })();

        if let Err(e) = result {
            let _ = fs::remove_file(&temp_gz_path);
            return Err(LoggerError::io_operation(
                "compress log file",
                format!("Failed to compress {}", path.display()),
                e,
            ));
        }

        if let Err(e) = fs::remove_file(path) {
            eprintln!(
                "[LOGGER WARNING] Compression succeeded but failed to remove original file {}: {}",
                path.display(),
                e
            );
        }
        Ok(())
    }

    #[must_use]
    pub fn current_size(&self) -> u64 {
        self.current_size
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.base_path
    }

    #[must_use]
    pub fn policy(&self) -> &RotationPolicy {
        &self.policy
    }
}

impl Sink for RotatingFileSink {
    fn write_line(&mut self, line: &[u8]) -> Result<()> {
        let incoming = line.len() as u64;

        if self.should_rotate(incoming) {
            if let Err(e) = self.rotate() {
                // Keep logging into whatever file we can get rather than
                // losing the line
                eprintln!(
                    "[LOGGER WARNING] Log rotation failed: {}. Continuing with current file.",
                    e
                );
                if self.writer.is_none() {
                    let (file, size) = Self::open_append(&self.base_path)?;
                    self.writer = Some(BufWriter::new(file));
                    self.current_size = size;
                }
                // Allow the file to outgrow the limit instead of retrying on every line
                self.current_size = 0;
            }
        }

        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| LoggerError::writer("Writer not initialized"))?;
        writer.write_all(line).map_err(|e| {
            LoggerError::file_sink(
                self.base_path.display().to_string(),
                format!("Failed to write log line: {}", e),
            )
        })?;
        self.current_size += incoming;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(ref mut writer) = self.writer {
            writer.flush().map_err(|e| {
                LoggerError::file_sink(
                    self.base_path.display().to_string(),
                    format!("Failed to flush: {}", e),
                )
            })?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Drop for RotatingFileSink {
    fn drop(&mut self) {
        if let Some(mut writer) = self.writer.take() {
            let _ = writer.flush();
        }
    }
}
