use crate::lookahead::{self, Lookahead};
use cursor_common::{Fault, Position, Tally};
use std::io::Read;

/// Initial lookahead capacity in bytes.
pub const DEFAULT_CAPACITY: usize = 4096;

/// A rune-oriented cursor for hand-written text parsers.
///
/// Every method shares one latched fault. After any method fails, later calls
/// fail immediately without reading, so a parse routine can chain calls and
/// inspect [`TextCursor::error`] once at the end.
///
/// End of input is treated two ways. Greedy scans ([`scan_while`],
/// [`skip_while`], [`match_literal`]) stop cleanly at the end. Operations that
/// require more input ([`must_next`], [`scan_until_char`], [`scan_until_any`])
/// latch [`Fault::UnexpectedEof`] instead.
///
/// [`scan_while`]: TextCursor::scan_while
/// [`skip_while`]: TextCursor::skip_while
/// [`match_literal`]: TextCursor::match_literal
/// [`must_next`]: TextCursor::must_next
/// [`scan_until_char`]: TextCursor::scan_until_char
/// [`scan_until_any`]: TextCursor::scan_until_any
#[derive(Debug)]
pub struct TextCursor<R> {
    source: Lookahead<R>,
    tally: Tally,
    position: Position,
}

/// Outcome of decoding the next char without consuming it.
enum Step {
    Char(char, usize),
    End,
    Failed,
}

impl<R: Read> TextCursor<R> {
    /// Creates a cursor over `reader`. Nothing is read until the first call.
    pub fn new(reader: R) -> Self {
        Self::with_capacity(DEFAULT_CAPACITY, reader)
    }

    /// Creates a cursor whose lookahead buffer starts with `capacity` bytes.
    pub fn with_capacity(capacity: usize, reader: R) -> Self {
        Self {
            source: Lookahead::with_capacity(capacity, reader),
            tally: Tally::new(),
            position: Position::new(),
        }
    }

    /// Returns the number of bytes consumed so far.
    pub fn consumed(&self) -> u64 {
        self.tally.consumed()
    }

    /// Returns the latched fault, if any.
    pub fn error(&self) -> Option<&Fault> {
        self.tally.fault()
    }

    /// Returns the number of bytes consumed and the latched fault.
    pub fn end(&self) -> (u64, Option<&Fault>) {
        self.tally.end()
    }

    /// Returns the position of the next unread char.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Returns a reference to the wrapped reader.
    pub fn get_ref(&self) -> &R {
        self.source.get_ref()
    }

    /// Returns the wrapped reader. Bytes already pulled into the lookahead
    /// buffer but not consumed are lost.
    pub fn into_inner(self) -> R {
        self.source.into_inner()
    }

    /// Consumes the cursor, yielding the byte count or the latched fault.
    pub fn finish(self) -> Result<u64, Fault> {
        self.tally.into_result()
    }

    fn step(&mut self) -> Step {
        match self.source.peek_char() {
            Ok(Some((ch, width))) => Step::Char(ch, width),
            Ok(None) => Step::End,
            Err(err) => {
                self.tally.latch(Fault::from_io(err));
                Step::Failed
            }
        }
    }

    #[inline]
    fn take(&mut self, ch: char, width: usize) {
        self.source.consume(width);
        self.tally.add(width);
        self.position.advance(ch, width);
    }

    /// Reads and consumes the next char.
    ///
    /// Returns `None` on failure, latching the cause. Plain end of input is
    /// latched as [`Fault::Eof`].
    pub fn next(&mut self) -> Option<char> {
        if self.tally.is_faulted() {
            return None;
        }
        match self.step() {
            Step::Char(ch, width) => {
                self.take(ch, width);
                Some(ch)
            }
            Step::End => {
                self.tally.latch(Fault::Eof);
                None
            }
            Step::Failed => None,
        }
    }

    /// Like [`next`](TextCursor::next), but end of input latches
    /// [`Fault::UnexpectedEof`].
    pub fn must_next(&mut self) -> Option<char> {
        if self.tally.is_faulted() {
            return None;
        }
        let ch = self.next();
        if ch.is_none() {
            self.tally.upgrade_eof();
        }
        ch
    }

    /// Returns the next char without consuming it.
    ///
    /// End of input yields `None` and latches nothing. An I/O error is latched.
    pub fn peek(&mut self) -> Option<char> {
        if self.tally.is_faulted() {
            return None;
        }
        match self.step() {
            Step::Char(ch, _) => Some(ch),
            Step::End | Step::Failed => None,
        }
    }

    /// Consumes `literal` if the input continues with exactly its bytes.
    ///
    /// On mismatch nothing is consumed. Running out of input before
    /// `literal.len()` bytes is a mismatch, not a fault. An I/O error while
    /// peeking is latched only if the bytes already buffered could still
    /// begin `literal`. The empty literal always matches.
    pub fn match_literal(&mut self, literal: &str) -> bool {
        if self.tally.is_faulted() {
            return false;
        }
        if literal.is_empty() {
            return true;
        }
        match self.source.peek(literal.len()) {
            Ok(bytes) if bytes == literal.as_bytes() => {}
            Ok(_) => return false,
            Err(err) => {
                if literal.as_bytes().starts_with(self.source.buffered()) {
                    self.tally.latch(Fault::from_io(err));
                }
                return false;
            }
        }
        self.source.consume(literal.len());
        self.tally.add(literal.len());
        self.position.advance_str(literal);
        true
    }

    fn consume_while<F>(
        &mut self,
        mut predicate: F,
        mut span: Option<&mut String>,
    ) -> Option<()>
    where
        F: FnMut(char) -> bool,
    {
        if self.tally.is_faulted() {
            return None;
        }
        loop {
            match self.step() {
                Step::Char(ch, width) if predicate(ch) => {
                    self.take(ch, width);
                    if let Some(span) = span.as_mut() {
                        span.push(ch);
                    }
                }
                Step::Char(..) | Step::End => return Some(()),
                Step::Failed => return None,
            }
        }
    }

    /// Consumes chars while `predicate` holds and returns them.
    ///
    /// The first rejected char stays unread. End of input ends the span
    /// cleanly. Returns `None` only when a fault other than end of input
    /// occurs.
    pub fn scan_while<F>(&mut self, predicate: F) -> Option<String>
    where
        F: FnMut(char) -> bool,
    {
        let mut span = String::new();
        self.consume_while(predicate, Some(&mut span))?;
        Some(span)
    }

    /// Same traversal as [`scan_while`](TextCursor::scan_while), discarding
    /// the chars.
    pub fn skip_while<F>(&mut self, predicate: F) -> Option<()>
    where
        F: FnMut(char) -> bool,
    {
        self.consume_while(predicate, None)
    }

    /// Returns the chars before the next `target`.
    ///
    /// `target` itself is consumed but not returned. End of input before
    /// `target` latches [`Fault::UnexpectedEof`].
    pub fn scan_until_char(&mut self, target: char) -> Option<String> {
        if self.tally.is_faulted() {
            return None;
        }
        let mut span = String::new();
        loop {
            match self.step() {
                Step::Char(ch, width) => {
                    self.take(ch, width);
                    if ch == target {
                        return Some(span);
                    }
                    span.push(ch);
                }
                Step::End => {
                    self.tally.latch(Fault::UnexpectedEof);
                    return None;
                }
                Step::Failed => return None,
            }
        }
    }

    /// Returns the chars before the first one satisfying `predicate`.
    ///
    /// The matching char is left unread for the next call. End of input before
    /// a match latches [`Fault::UnexpectedEof`].
    pub fn scan_until_any<F>(&mut self, mut predicate: F) -> Option<String>
    where
        F: FnMut(char) -> bool,
    {
        if self.tally.is_faulted() {
            return None;
        }
        let mut span = String::new();
        loop {
            match self.step() {
                Step::Char(ch, _) if predicate(ch) => return Some(span),
                Step::Char(ch, width) => {
                    self.take(ch, width);
                    span.push(ch);
                }
                Step::End => {
                    self.tally.latch(Fault::UnexpectedEof);
                    return None;
                }
                Step::Failed => return None,
            }
        }
    }

    /// Reports whether the input is exhausted.
    ///
    /// True when the latched fault is exactly [`Fault::Eof`], or when no
    /// further byte is available. Never consumes and never latches; an I/O
    /// error while checking reads as "not at end".
    pub fn at_end(&mut self) -> bool {
        if self.tally.is_faulted() {
            return self.tally.is_clean_eof();
        }
        matches!(self.source.peek(1), Ok(bytes) if bytes.is_empty())
    }

    /// Consumes and returns everything left in the input.
    ///
    /// Malformed UTF-8 is replaced byte by byte with
    /// `char::REPLACEMENT_CHARACTER`, exactly as [`next`](TextCursor::next)
    /// would yield it. The byte count still reflects the raw input.
    pub fn scan_remainder(&mut self) -> Option<String> {
        if self.tally.is_faulted() {
            return None;
        }
        let mut bytes = Vec::new();
        let result = self.source.read_to_end(&mut bytes);
        self.tally.add(bytes.len());
        let text = lookahead::decode_lossy(&bytes);
        self.position.advance_str(&text);
        // Replacement chars change byte widths.
        self.position.offset = self.tally.consumed();
        match result {
            Ok(_) => Some(text),
            Err(err) => {
                self.tally.latch(Fault::from_io(err));
                None
            }
        }
    }
}
