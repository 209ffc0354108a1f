//! Pattern buffer with tail-search optimization.
//!
//! Only the last N bytes of accumulated output are searched for prompt
//! patterns. Long outputs such as `sh running-config` would otherwise be
//! rescanned on every received chunk.

use memchr::memrchr;
use regex::bytes::Regex;
use vte::{Parser, Perform};

/// Buffer for accumulating device output and searching it for prompts.
///
/// Incoming bytes are run through a VT parser so ANSI escape sequences never
/// reach the buffer, even when a sequence is split across two reads.
pub struct PatternBuffer {
    /// The accumulated (escape-free) output.
    buffer: Vec<u8>,

    /// How many bytes from the end to search for patterns.
    search_depth: usize,

    /// VT parser, kept across reads.
    parser: Parser,
}

impl PatternBuffer {
    /// Create a new pattern buffer with the specified search depth.
    pub fn new(search_depth: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(4096),
            search_depth,
            parser: Parser::new(),
        }
    }

    /// Extend the buffer with new data, stripping ANSI escape codes.
    pub fn extend(&mut self, data: &[u8]) {
        let mut sink = Printable {
            out: &mut self.buffer,
        };
        self.parser.advance(&mut sink, data);
    }

    /// Search only the tail of the buffer for the pattern.
    ///
    /// The tail starts at a line boundary so `^` never matches mid-line.
    /// Returns the match end as an offset into the full buffer.
    pub fn search_tail(&self, pattern: &Regex) -> Option<usize> {
        let start = self.buffer.len().saturating_sub(self.search_depth);
        let start = match start {
            0 => 0,
            _ => memrchr(b'\n', &self.buffer[..start]).map_or(0, |nl| nl + 1),
        };
        pattern
            .find(&self.buffer[start..])
            .map(|m| start + m.end())
    }

    /// Take everything up to `end` (a match end) and keep the remainder.
    pub fn take_through(&mut self, end: usize) -> Vec<u8> {
        let rest = self.buffer.split_off(end.min(self.buffer.len()));
        std::mem::replace(&mut self.buffer, rest)
    }

    /// Take ownership of the buffer contents and reset.
    pub fn take(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.buffer)
    }

    /// Get a reference to the buffer contents.
    pub fn as_slice(&self) -> &[u8] {
        &self.buffer
    }

    /// Get the current buffer length.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Check if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Clear the buffer.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}

impl Default for PatternBuffer {
    fn default() -> Self {
        Self::new(1000)
    }
}

impl std::fmt::Debug for PatternBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PatternBuffer")
            .field("len", &self.buffer.len())
            .field("search_depth", &self.search_depth)
            .finish()
    }
}

/// VT performer that keeps printable text and line-control bytes.
struct Printable<'a> {
    out: &'a mut Vec<u8>,
}

impl Perform for Printable<'_> {
    fn print(&mut self, c: char) {
        let mut utf8 = [0u8; 4];
        self.out
            .extend_from_slice(c.encode_utf8(&mut utf8).as_bytes());
    }

    fn execute(&mut self, byte: u8) {
        if matches!(byte, b'\n' | b'\r' | b'\t') {
            self.out.push(byte);
        }
    }
}
