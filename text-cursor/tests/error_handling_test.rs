//! Fault latching and boundary scenario tests.

use std::io::{self, Read};
use text_cursor::{Fault, TextCursor};

/// Yields `data`, then fails every read with `kind`.
struct FailAfter<'a> {
    data: &'a [u8],
    kind: io::ErrorKind,
    reads: usize,
}

impl<'a> FailAfter<'a> {
    fn new(data: &'a [u8], kind: io::ErrorKind) -> Self {
        Self {
            data,
            kind,
            reads: 0,
        }
    }
}

impl Read for FailAfter<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reads += 1;
        if self.data.is_empty() {
            return Err(io::Error::new(self.kind, "source failed"));
        }
        let n = self.data.len().min(buf.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

fn assert_io(cursor: &TextCursor<FailAfter<'_>>) {
    match cursor.error() {
        Some(Fault::Io(err)) => assert_eq!(err.kind(), io::ErrorKind::BrokenPipe),
        other => panic!("expected Io fault, got {:?}", other),
    }
}

#[test]
fn test_sticky_after_eof() {
    let mut cursor = TextCursor::new(&b"x"[..]);
    cursor.next();
    assert_eq!(cursor.next(), None);
    let consumed = cursor.consumed();

    assert_eq!(cursor.peek(), None);
    assert!(!cursor.match_literal(""));
    assert_eq!(cursor.scan_while(|_| true), None);
    assert_eq!(cursor.skip_while(|_| true), None);
    assert_eq!(cursor.scan_until_char('x'), None);
    assert_eq!(cursor.scan_until_any(|_| true), None);
    assert_eq!(cursor.scan_remainder(), None);
    assert_eq!(cursor.consumed(), consumed);
    assert!(cursor.error().is_some_and(Fault::is_eof));
}

#[test]
fn test_sticky_fault_does_not_touch_source() {
    let mut cursor = TextCursor::new(FailAfter::new(b"", io::ErrorKind::BrokenPipe));
    assert_eq!(cursor.next(), None);
    assert_io(&cursor);
    let reads = cursor.get_ref().reads;

    assert_eq!(cursor.next(), None);
    assert_eq!(cursor.must_next(), None);
    assert!(!cursor.match_literal("a"));
    assert!(!cursor.at_end());
    assert_eq!(cursor.scan_remainder(), None);
    assert_eq!(cursor.get_ref().reads, reads);
    assert_eq!(cursor.consumed(), 0);
    assert_io(&cursor);
}

#[test]
fn test_must_next_keeps_io_error() {
    let mut cursor = TextCursor::new(FailAfter::new(b"", io::ErrorKind::BrokenPipe));
    assert_eq!(cursor.must_next(), None);
    assert_io(&cursor);
}

#[test]
fn test_scan_while_reports_io_error() {
    let source = FailAfter::new(b"abcd", io::ErrorKind::BrokenPipe);
    let mut cursor = TextCursor::with_capacity(4, source);
    assert_eq!(cursor.scan_while(|c| c.is_alphabetic()), None);
    assert_io(&cursor);
    assert_eq!(cursor.consumed(), 4);
}

#[test]
fn test_skip_while_reports_io_error() {
    let mut cursor = TextCursor::new(FailAfter::new(b"  ", io::ErrorKind::BrokenPipe));
    assert_eq!(cursor.skip_while(char::is_whitespace), None);
    assert_io(&cursor);
}

#[test]
fn test_scan_until_char_reports_io_error() {
    let mut cursor = TextCursor::new(FailAfter::new(b"abc", io::ErrorKind::BrokenPipe));
    assert_eq!(cursor.scan_until_char(';'), None);
    assert_io(&cursor);
    assert_eq!(cursor.consumed(), 3);
}

#[test]
fn test_match_literal_latches_io_error() {
    let mut cursor = TextCursor::new(FailAfter::new(b"GE", io::ErrorKind::BrokenPipe));
    assert!(!cursor.match_literal("GET"));
    assert_io(&cursor);
    assert_eq!(cursor.consumed(), 0);
}

#[test]
fn test_match_literal_mismatch_before_io_error() {
    let mut cursor = TextCursor::new(FailAfter::new(b"P", io::ErrorKind::BrokenPipe));
    assert!(!cursor.match_literal("GET"));
    assert!(cursor.error().is_none());

    // The buffered "P" could still begin "POST", so the failure counts.
    assert!(!cursor.match_literal("POST"));
    assert_io(&cursor);
    assert_eq!(cursor.consumed(), 0);
}

#[test]
fn test_at_end_does_not_latch_io_error() {
    let mut cursor = TextCursor::new(FailAfter::new(b"", io::ErrorKind::BrokenPipe));
    assert!(!cursor.at_end());
    assert!(cursor.error().is_none());
}

#[test]
fn test_io_unexpected_eof_keeps_class() {
    let mut cursor = TextCursor::new(FailAfter::new(b"", io::ErrorKind::UnexpectedEof));
    assert_eq!(cursor.next(), None);
    assert!(cursor.error().is_some_and(Fault::is_unexpected_eof));
}

#[test]
fn test_scan_remainder_counts_partial_read() {
    let mut cursor = TextCursor::new(FailAfter::new(b"tail", io::ErrorKind::BrokenPipe));
    assert_eq!(cursor.scan_remainder(), None);
    assert_io(&cursor);
    assert_eq!(cursor.consumed(), 4);
}

#[test]
fn test_unexpected_eof_is_not_at_end() {
    let mut cursor = TextCursor::new(&b"open"[..]);
    assert_eq!(cursor.scan_until_any(|c| c == ')'), None);
    assert!(!cursor.at_end());
    assert_eq!(cursor.peek(), None);
}
