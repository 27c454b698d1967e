//! Per-severity writers and the standard mirror

use super::error::{LoggerError, Result};
use super::flags::LogFlags;
use super::log_level::LogLevel;
use super::log_record::LogRecord;
use super::sink::Destination;
use parking_lot::RwLock;

/// Prefix of the standard (console mirror) writer
pub const STANDARD_PREFIX: &str = "[Std] ";

/// One (destination, prefix, flags) triple.
///
/// Cloning is cheap: the destination is a shared handle.
#[derive(Debug, Clone)]
pub struct LevelWriter {
    destination: Destination,
    prefix: String,
    flags: LogFlags,
}

impl LevelWriter {
    pub fn new(destination: Destination, prefix: impl Into<String>, flags: LogFlags) -> Self {
        Self {
            destination,
            prefix: prefix.into(),
            flags,
        }
    }

    /// Render one line: prefix, header, message, newline.
    ///
    /// With [`LogFlags::MSG_PREFIX`] the prefix moves after the header.
    pub fn render(&self, record: &LogRecord) -> String {
        let mut line = String::with_capacity(self.prefix.len() + record.message.len() + 40);
        let msg_prefix = self.flags.contains(LogFlags::MSG_PREFIX);

        if !msg_prefix {
            line.push_str(&self.prefix);
        }
        self.flags
            .write_header(&mut line, &record.timestamp, record.location);
        if msg_prefix {
            line.push_str(&self.prefix);
        }
        line.push_str(&record.message);
        line.push('\n');
        line
    }

    pub fn output(&self, record: &LogRecord) -> Result<()> {
        self.destination
            .write_line(self.render(record).as_bytes())
            .and_then(|_| self.destination.flush())
    }

    pub fn destination(&self) -> &Destination {
        &self.destination
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn flags(&self) -> LogFlags {
        self.flags
    }
}

/// Outcome of one logical write
#[derive(Debug, Default)]
pub struct FanOutReport {
    pub written: usize,
    pub errors: Vec<(String, LoggerError)>,
}

impl FanOutReport {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// One logical write, N physical writes.
///
/// Every target is attempted even when an earlier one fails.
pub struct FanOut<'a> {
    targets: &'a [LevelWriter],
}

impl<'a> FanOut<'a> {
    pub fn new(targets: &'a [LevelWriter]) -> Self {
        Self { targets }
    }

    pub fn write(&self, record: &LogRecord) -> FanOutReport {
        let mut report = FanOutReport::default();
        for target in self.targets {
            match target.output(record) {
                Ok(()) => report.written += 1,
                Err(e) => report
                    .errors
                    .push((target.destination().name().to_string(), e)),
            }
        }
        report
    }
}

/// Four severity writers plus the standard mirror.
///
/// Configuration lives behind a `RwLock`. A write snapshots the two writers
/// it needs and releases the lock before touching any sink, so
/// administrative calls never wait on slow I/O; a write that already took
/// its snapshot finishes against the old configuration.
pub struct LeveledWriterSet {
    severity: RwLock<[LevelWriter; 4]>,
    standard: RwLock<LevelWriter>,
}

impl LeveledWriterSet {
    /// All four severity writers on `destination` with their default tags;
    /// the standard writer on `standard`.
    pub fn new(destination: Destination, standard: Destination, flags: LogFlags) -> Self {
        let severity = LogLevel::ALL.map(|level| LevelWriter::new(destination.clone(), level.tag(), flags));
        Self {
            severity: RwLock::new(severity),
            standard: RwLock::new(LevelWriter::new(standard, STANDARD_PREFIX, flags)),
        }
    }

    /// Write `record` to its severity writer and to the standard writer.
    pub fn write_at(&self, record: &LogRecord) -> FanOutReport {
        let targets = [
            self.severity.read()[record.level.index()].clone(),
            self.standard.read().clone(),
        ];
        FanOut::new(&targets).write(record)
    }

    /// Re-point the four severity writers. The standard writer is untouched.
    pub fn set_destination(&self, destination: Destination) {
        let mut writers = self.severity.write();
        for writer in writers.iter_mut() {
            writer.destination = destination.clone();
        }
    }

    pub fn set_prefix(&self, prefix: &str) {
        let mut writers = self.severity.write();
        for writer in writers.iter_mut() {
            writer.prefix = prefix.to_string();
        }
    }

    pub fn set_flags(&self, flags: LogFlags) {
        let mut writers = self.severity.write();
        for writer in writers.iter_mut() {
            writer.flags = flags;
        }
    }

    /// Snapshot of the writer for `level`
    pub fn writer(&self, level: LogLevel) -> LevelWriter {
        self.severity.read()[level.index()].clone()
    }

    /// Snapshot of the standard writer
    pub fn standard(&self) -> LevelWriter {
        self.standard.read().clone()
    }

    /// Flush every distinct destination once
    pub fn flush(&self) -> Result<()> {
        let mut seen: Vec<Destination> = Vec::with_capacity(5);
        let writers = self.severity.read().clone();
        let standard = self.standard();
        for writer in writers.iter().chain(std::iter::once(&standard)) {
            if seen.iter().any(|d| d.same_sink(&writer.destination)) {
                continue;
            }
            writer.destination.flush()?;
            seen.push(writer.destination.clone());
        }
        Ok(())
    }
}
