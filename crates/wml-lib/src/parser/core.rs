//! Parser state machine and low-level operations.
//!
//! The parser walks the source as bytes. Every delimiter in the grammar is
//! ASCII, so multi-byte UTF-8 sequences pass through opaque and positions
//! always land on character boundaries. All newline consumption funnels
//! through [`Parser::bump`]/[`Parser::advance_to`] so the cursor line count
//! stays exact, including across backtracking.

use super::error::ParseError;
use super::preprocessor::PpState;

/// How many bytes of context a parse error carries.
const CONTEXT_BYTES: usize = 80;

pub(super) struct Parser<'src> {
    pub(super) src: &'src str,
    bytes: &'src [u8],
    pub(super) pos: usize,
    pub(super) pp: PpState,
}

/// Saved position for backtracking; restores the line counter too.
#[derive(Debug, Clone, Copy)]
pub(super) struct Checkpoint {
    pos: usize,
    line: u32,
}

impl<'src> Parser<'src> {
    pub(super) fn new(src: &'src str, filename: &str) -> Self {
        Self {
            src,
            bytes: src.as_bytes(),
            pos: 0,
            pp: PpState::new(filename),
        }
    }

    pub(super) fn at_eof(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    pub(super) fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    pub(super) fn peek_at(&self, lookahead: usize) -> Option<u8> {
        self.bytes.get(self.pos + lookahead).copied()
    }

    pub(super) fn starts_with(&self, prefix: &str) -> bool {
        self.bytes[self.pos..].starts_with(prefix.as_bytes())
    }

    /// Consumes one byte, counting newlines.
    pub(super) fn bump(&mut self) {
        debug_assert!(!self.at_eof(), "bump called at EOF");
        if self.bytes[self.pos] == b'\n' {
            self.pp.new_line();
        }
        self.pos += 1;
    }

    /// Moves to an absolute position, counting the newlines in between.
    pub(super) fn advance_to(&mut self, new_pos: usize) {
        debug_assert!(new_pos >= self.pos && new_pos <= self.bytes.len());
        for &b in &self.bytes[self.pos..new_pos] {
            if b == b'\n' {
                self.pp.new_line();
            }
        }
        self.pos = new_pos;
    }

    pub(super) fn eat(&mut self, byte: u8) -> bool {
        if self.peek() == Some(byte) {
            self.bump();
            true
        } else {
            false
        }
    }

    pub(super) fn eat_str(&mut self, prefix: &str) -> bool {
        if self.starts_with(prefix) {
            self.advance_to(self.pos + prefix.len());
            true
        } else {
            false
        }
    }

    /// Consumes the longest run satisfying `pred` and returns it as a slice.
    pub(super) fn take_while(&mut self, pred: impl Fn(u8) -> bool) -> &'src str {
        let start = self.pos;
        let mut end = self.pos;
        while end < self.bytes.len() && pred(self.bytes[end]) {
            end += 1;
        }
        self.advance_to(end);
        &self.src[start..end]
    }

    pub(super) fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            pos: self.pos,
            line: self.pp.line(),
        }
    }

    pub(super) fn restore(&mut self, cp: Checkpoint) {
        self.pos = cp.pos;
        self.pp.set_line(cp.line);
    }

    pub(super) fn into_state(self) -> PpState {
        self.pp
    }

    /// Builds a parse error describing what was expected at the current
    /// position.
    pub(super) fn fail(&self, expected: impl Into<String>) -> ParseError {
        let cursor = self.pp.cursor();

        let mut context_end = (self.pos + CONTEXT_BYTES).min(self.src.len());
        while !self.src.is_char_boundary(context_end) {
            context_end -= 1;
        }
        let context = self.src[self.pos..context_end].to_owned();

        let line_start = self.src[..self.pos].rfind('\n').map_or(0, |i| i + 1);
        let line_end = self.src[self.pos..]
            .find('\n')
            .map_or(self.src.len(), |i| self.pos + i);
        let source_line = self.src[line_start..line_end].to_owned();

        ParseError {
            file: cursor.file.clone(),
            line: cursor.line,
            offset: self.pos,
            expected: expected.into(),
            source_line,
            context,
        }
    }
}
