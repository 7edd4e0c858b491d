use log::trace;
use std::io::{self, Read};

/// Growable read-ahead buffer over a byte source.
///
/// Bytes are only dropped from the buffer by `consume`, so any amount of input
/// can be inspected before deciding whether to take it.
#[derive(Debug)]
pub(crate) struct Lookahead<R> {
    inner: R,
    buf: Vec<u8>,
    pos: usize,
    chunk: usize,
}

impl<R: Read> Lookahead<R> {
    pub(crate) fn with_capacity(capacity: usize, inner: R) -> Self {
        let chunk = capacity.max(1);
        Self {
            inner,
            buf: Vec::with_capacity(chunk),
            pos: 0,
            chunk,
        }
    }

    pub(crate) fn get_ref(&self) -> &R {
        &self.inner
    }

    pub(crate) fn into_inner(self) -> R {
        self.inner
    }

    /// Bytes read from the source but not yet consumed.
    #[inline]
    pub(crate) fn buffered(&self) -> &[u8] {
        &self.buf[self.pos..]
    }

    /// Reads until at least `n` bytes are buffered or the source is exhausted.
    /// Returns the number of buffered bytes, which is below `n` only at end of
    /// input.
    fn fill(&mut self, n: usize) -> io::Result<usize> {
        while self.buffered().len() < n {
            if self.pos > 0 {
                self.buf.drain(..self.pos);
                self.pos = 0;
            }
            let start = self.buf.len();
            let want = self.chunk.max(n - start);
            self.buf.resize(start + want, 0);
            let read = loop {
                match self.inner.read(&mut self.buf[start..]) {
                    Ok(read) => break read,
                    Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                    Err(err) => {
                        self.buf.truncate(start);
                        return Err(err);
                    }
                }
            };
            self.buf.truncate(start + read);
            trace!("lookahead refilled {} bytes", read);
            if read == 0 {
                break;
            }
        }
        Ok(self.buffered().len())
    }

    /// Returns up to `n` upcoming bytes without consuming them. Fewer than `n`
    /// bytes means the source ended first.
    pub(crate) fn peek(&mut self, n: usize) -> io::Result<&[u8]> {
        let available = self.fill(n)?.min(n);
        Ok(&self.buffered()[..available])
    }

    /// Decodes the next char without consuming it, returning it together with
    /// the number of source bytes it occupies. `None` means end of input.
    ///
    /// Malformed or truncated UTF-8 yields `char::REPLACEMENT_CHARACTER` with a
    /// width of one byte, so decoding always makes progress.
    pub(crate) fn peek_char(&mut self) -> io::Result<Option<(char, usize)>> {
        if self.fill(1)? == 0 {
            return Ok(None);
        }
        let width = utf8_width(self.buffered()[0]);
        if width > 1 {
            self.fill(width)?;
        }
        Ok(Some(decode_char(self.buffered())))
    }

    /// Drops `n` buffered bytes. `n` must not exceed `buffered().len()`.
    #[inline]
    pub(crate) fn consume(&mut self, n: usize) {
        debug_assert!(n <= self.buffered().len());
        self.pos += n;
        if self.pos == self.buf.len() {
            self.buf.clear();
            self.pos = 0;
        }
    }

    /// Moves every remaining byte of the source into `out`, returning how many
    /// bytes were appended. On error the bytes appended before the failure are
    /// left in `out`.
    pub(crate) fn read_to_end(&mut self, out: &mut Vec<u8>) -> io::Result<usize> {
        let before = out.len();
        out.extend_from_slice(self.buffered());
        self.buf.clear();
        self.pos = 0;
        let result = self.inner.read_to_end(out);
        let appended = out.len() - before;
        result.map(|_| appended)
    }
}

/// Decodes the char at the start of the non-empty `bytes`, returning it with
/// its width. Anything but a complete valid sequence becomes
/// `char::REPLACEMENT_CHARACTER` with a width of one byte.
pub(crate) fn decode_char(bytes: &[u8]) -> (char, usize) {
    let width = utf8_width(bytes[0]);
    let decoded = bytes
        .get(..width)
        .filter(|_| width > 0)
        .and_then(|seq| std::str::from_utf8(seq).ok())
        .and_then(|s| s.chars().next());
    match decoded {
        Some(ch) => (ch, width),
        None => (char::REPLACEMENT_CHARACTER, 1),
    }
}

/// Decodes all of `bytes` with the same replacement rule as [`decode_char`],
/// so every invalid byte yields its own `char::REPLACEMENT_CHARACTER`.
pub(crate) fn decode_lossy(mut bytes: &[u8]) -> String {
    let mut text = String::with_capacity(bytes.len());
    while !bytes.is_empty() {
        match std::str::from_utf8(bytes) {
            Ok(valid) => {
                text.push_str(valid);
                break;
            }
            Err(err) => {
                let (valid, rest) = bytes.split_at(err.valid_up_to());
                // `valid_up_to` marks a boundary of well-formed UTF-8.
                text.push_str(std::str::from_utf8(valid).unwrap_or_default());
                let (ch, width) = decode_char(rest);
                text.push(ch);
                bytes = &rest[width..];
            }
        }
    }
    text
}

/// Encoded length announced by a UTF-8 lead byte, or 0 if `lead` cannot start
/// a char.
fn utf8_width(lead: u8) -> usize {
    match lead {
        0x00..=0x7F => 1,
        0xC2..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF4 => 4,
        _ => 0,
    }
}
