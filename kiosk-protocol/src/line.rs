//! Line reassembly for the receiving end of the serial link.
//!
//! Bytes arrive one at a time. A line is complete at `\n`; `\r` is dropped
//! so CRLF senders work too. Lines are trimmed and blank lines are skipped.
//! A line that overflows the buffer or carries a non-ASCII byte is reported
//! once and the rest of it is discarded up to the next terminator.

use heapless::Vec;

use crate::command::{Line, MAX_LINE_LEN};

/// Errors that can occur while reassembling lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineError {
    /// Line exceeds `MAX_LINE_LEN` bytes
    LineTooLong,
    /// Byte outside 7-bit ASCII
    NonAscii,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    /// Accumulating bytes of the current line
    Collecting,
    /// Dropping bytes until the next terminator
    Discarding,
}

/// State machine for splitting a byte stream into lines
#[derive(Debug, Clone)]
pub struct LineParser {
    state: ParseState,
    buffer: Vec<u8, MAX_LINE_LEN>,
}

impl Default for LineParser {
    fn default() -> Self {
        Self::new()
    }
}

impl LineParser {
    /// Create a new line parser
    pub fn new() -> Self {
        Self {
            state: ParseState::Collecting,
            buffer: Vec::new(),
        }
    }

    /// Reset the parser state
    pub fn reset(&mut self) {
        self.state = ParseState::Collecting;
        self.buffer.clear();
    }

    /// Feed a single byte to the parser
    ///
    /// Returns `Ok(Some(line))` when a non-blank line completes,
    /// `Ok(None)` when more bytes are needed, or `Err` when the current
    /// line is rejected.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Line>, LineError> {
        match (self.state, byte) {
            (ParseState::Discarding, b'\n') => {
                self.reset();
                Ok(None)
            }
            (ParseState::Discarding, _) => Ok(None),
            (ParseState::Collecting, b'\n') => {
                let line = self.take_line();
                self.reset();
                Ok(line)
            }
            (ParseState::Collecting, b'\r') => Ok(None),
            (ParseState::Collecting, byte) if !byte.is_ascii() => {
                self.discard();
                Err(LineError::NonAscii)
            }
            (ParseState::Collecting, byte) => {
                if self.buffer.push(byte).is_err() {
                    self.discard();
                    return Err(LineError::LineTooLong);
                }
                Ok(None)
            }
        }
    }

    /// Feed multiple bytes to the parser
    ///
    /// Returns the first complete line found, if any.
    /// Remaining bytes after a complete line are not consumed.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> Result<Option<Line>, LineError> {
        for &byte in bytes {
            if let Some(line) = self.feed(byte)? {
                return Ok(Some(line));
            }
        }
        Ok(None)
    }

    fn discard(&mut self) {
        self.state = ParseState::Discarding;
        self.buffer.clear();
    }

    fn take_line(&self) -> Option<Line> {
        // Only ASCII bytes are ever buffered
        let text = core::str::from_utf8(&self.buffer).ok()?.trim();
        if text.is_empty() {
            return None;
        }

        let mut line = Line::new();
        line.push_str(text).ok()?;
        Some(line)
    }
}
