//! Sink trait for log output destinations

use super::error::Result;
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

/// A byte-stream destination for rendered log lines.
///
/// Every call to [`Sink::write_line`] carries exactly one complete line,
/// terminated by `\n`. Rotation, compression and buffering are the sink's own
/// business; the dispatch layer never retries a failed write.
pub trait Sink: Send {
    fn write_line(&mut self, line: &[u8]) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}

/// Shared, cloneable handle to a sink.
///
/// Several writers may point at the same destination; the inner mutex keeps
/// their lines from interleaving.
#[derive(Clone)]
pub struct Destination {
    name: Arc<str>,
    inner: Arc<Mutex<Box<dyn Sink>>>,
}

impl Destination {
    pub fn new<S: Sink + 'static>(sink: S) -> Self {
        let name: Arc<str> = Arc::from(sink.name());
        Self {
            name,
            inner: Arc::new(Mutex::new(Box::new(sink))),
        }
    }

    pub fn write_line(&self, line: &[u8]) -> Result<()> {
        self.inner.lock().write_line(line)
    }

    pub fn flush(&self) -> Result<()> {
        self.inner.lock().flush()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// True when both handles refer to the same underlying sink
    pub fn same_sink(&self, other: &Destination) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Destination").field("name", &self.name).finish()
    }
}
