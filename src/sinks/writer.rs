//! Adapter turning any `io::Write` into a sink

use crate::core::{LoggerError, Result, Sink};
use std::io::Write;

/// Wraps an arbitrary writer (a socket, a pipe, an open file).
pub struct WriterSink<W: Write + Send> {
    name: String,
    writer: W,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(name: impl Into<String>, writer: W) -> Self {
        Self {
            name: name.into(),
            writer,
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> Sink for WriterSink<W> {
    fn write_line(&mut self, line: &[u8]) -> Result<()> {
        self.writer.write_all(line).map_err(|e| {
            LoggerError::io_operation("writing log line", format!("sink '{}'", self.name), e)
        })
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_through() {
        let mut sink = WriterSink::new("vec", Vec::new());
        sink.write_line(b"hello\n").unwrap();
        sink.flush().unwrap();
        assert_eq!(sink.name(), "vec");
        assert_eq!(sink.into_inner(), b"hello\n".to_vec());
    }
}
