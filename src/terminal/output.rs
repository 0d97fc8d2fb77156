//! `OutputBuffer`: Single-write output buffer for text and ANSI sequences.

use super::style::Rgb;
use std::fmt::Write as _;
use std::io::{self, Write};

/// Pre-allocated buffer for a frame's text and escape sequences.
///
/// A render pass accumulates everything here, then flushes it with a single
/// `write_all` to keep the terminal from showing half-drawn frames.
#[derive(Debug, Default)]
pub struct OutputBuffer {
    data: String,
}

impl OutputBuffer {
    /// Create a new output buffer with the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: String::with_capacity(capacity),
        }
    }

    /// Create a buffer sized for a typical frame (4KB).
    pub fn new() -> Self {
        Self::with_capacity(4096)
    }

    /// Clear the buffer for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Get the buffer contents.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.data
    }

    /// Consume the buffer, returning its contents.
    pub fn into_string(self) -> String {
        self.data
    }

    /// Check if buffer is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Write a string.
    #[inline]
    pub fn write_str(&mut self, s: &str) {
        self.data.push_str(s);
    }

    /// Return to column 0.
    #[inline]
    pub fn carriage_return(&mut self) {
        self.data.push('\r');
    }

    /// Move up one line and erase it.
    #[inline]
    pub fn erase_line_above(&mut self) {
        // CSI A (cursor up), CSI K (erase to end of line)
        self.data.push_str("\x1b[A\x1b[K");
    }

    /// Emit a single SGR parameter.
    #[inline]
    pub fn sgr(&mut self, code: u8) {
        let _ = write!(self.data, "\x1b[{code}m");
    }

    /// Set foreground color (true color).
    #[inline]
    pub fn set_fg(&mut self, color: Rgb) {
        let _ = write!(self.data, "\x1b[38;2;{};{};{}m", color.r, color.g, color.b);
    }

    /// Reset all attributes.
    #[inline]
    pub fn reset_attrs(&mut self) {
        self.data.push_str("\x1b[0m");
    }

    /// Flush to a writer in a single write.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    pub fn flush_to<W: Write + ?Sized>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(self.data.as_bytes())?;
        writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_erase_sequence() {
        let mut out = OutputBuffer::new();
        out.carriage_return();
        out.erase_line_above();
        out.erase_line_above();
        assert_eq!(out.as_str(), "\r\x1b[A\x1b[K\x1b[A\x1b[K");
    }

    #[test]
    fn test_flush_to_writes_everything() {
        let mut out = OutputBuffer::new();
        out.write_str("done\n");
        let mut sink = Vec::new();
        out.flush_to(&mut sink).unwrap();
        assert_eq!(sink, b"done\n");

        out.clear();
        assert!(out.is_empty());
    }
}
