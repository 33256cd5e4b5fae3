//! Peekable, rewindable cursor over the physical lines of a WND source.

use std::fmt;

/// Returned by [`Cursor::peek`] and [`Cursor::advance`] once every line is consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndOfInput;

impl fmt::Display for EndOfInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("end of input")
    }
}

#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    path: &'a str,
    lines: Vec<&'a str>,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(text: &'a str, path: &'a str) -> Self {
        Self {
            path,
            lines: text.lines().collect(),
            pos: 0,
        }
    }

    pub fn path(&self) -> &'a str {
        self.path
    }

    /// Current line, not consumed.
    pub fn peek(&self) -> Result<&'a str, EndOfInput> {
        self.lines.get(self.pos).copied().ok_or(EndOfInput)
    }

    /// Consume the current line.
    pub fn advance(&mut self) -> Result<&'a str, EndOfInput> {
        let line = self.peek()?;
        self.pos += 1;
        Ok(line)
    }

    /// Un-consume the last consumed line. No-op at the start of input.
    pub fn rewind_one(&mut self) {
        self.pos = self.pos.saturating_sub(1);
    }

    /// 1-based number of the line [`peek`](Self::peek) returns.
    pub fn line_number(&self) -> usize {
        self.pos + 1
    }

    /// Skip blank lines and `;` comment lines.
    pub fn skip_trivia(&mut self) {
        while let Ok(line) = self.peek() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with(';') {
                self.pos += 1;
            } else {
                break;
            }
        }
    }
}
