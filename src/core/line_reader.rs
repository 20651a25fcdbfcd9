use crate::utils::error::{CounterError, Result};
use std::io::{BufRead, Read};

pub const DEFAULT_MAX_LINE_BYTES: usize = 1 << 20;

/// Splits a buffered stream into lines with `\n` / `\r\n` stripped.
///
/// A line whose content is longer than `max_line_bytes` is an error rather
/// than being split or truncated. At most `max_line_bytes + 2` bytes are
/// buffered for any one line.
pub struct LineReader<R> {
    inner: R,
    buf: Vec<u8>,
    max_line_bytes: usize,
    line_number: usize,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(inner: R, max_line_bytes: usize) -> Self {
        Self {
            inner,
            buf: Vec::new(),
            max_line_bytes,
            line_number: 0,
        }
    }

    /// Returns the next line and its 1-based number, or `None` at end of stream.
    pub fn next_line(&mut self) -> Result<Option<(usize, &[u8])>> {
        self.buf.clear();

        // room for the content plus a "\r\n" terminator
        let limit = self.max_line_bytes as u64 + 2;
        let read = (&mut self.inner).take(limit).read_until(b'\n', &mut self.buf)?;
        if read == 0 {
            return Ok(None);
        }
        self.line_number += 1;

        if self.buf.last() == Some(&b'\n') {
            self.buf.pop();
            if self.buf.last() == Some(&b'\r') {
                self.buf.pop();
            }
        }

        if self.buf.len() > self.max_line_bytes {
            return Err(CounterError::LineTooLongError {
                line: self.line_number,
                limit: self.max_line_bytes,
            });
        }

        Ok(Some((self.line_number, &self.buf)))
    }
}
