use crate::{Endian, Number, Value};
use cursor_common::{Fault, Tally};
use log::trace;
use std::io::{self, Write};

/// Sequential encoder of fixed-width numbers and raw bytes.
///
/// Mirrors [`BinaryReader`](crate::BinaryReader): each method returns `None`
/// on failure, and after the first fault every call fails without writing.
#[derive(Debug)]
pub struct BinaryWriter<W> {
    inner: W,
    order: Endian,
    tally: Tally,
}

impl<W: Write> BinaryWriter<W> {
    /// Creates a little-endian writer over `inner`.
    pub fn new(inner: W) -> Self {
        Self::with_byte_order(inner, Endian::Little)
    }

    pub fn with_byte_order(inner: W, order: Endian) -> Self {
        Self {
            inner,
            order,
            tally: Tally::new(),
        }
    }

    pub fn byte_order(&self) -> Endian {
        self.order
    }

    /// Sets the byte order for numbers written from now on.
    pub fn set_byte_order(&mut self, order: Endian) {
        self.order = order;
    }

    /// Returns the number of bytes written so far.
    pub fn consumed(&self) -> u64 {
        self.tally.consumed()
    }

    pub fn error(&self) -> Option<&Fault> {
        self.tally.fault()
    }

    pub fn end(&self) -> (u64, Option<&Fault>) {
        self.tally.end()
    }

    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Returns the sink for a transfer done outside this writer. Report its
    /// outcome with [`add_external`](BinaryWriter::add_external).
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.inner
    }

    pub fn into_inner(self) -> W {
        self.inner
    }

    /// Consumes the writer, yielding the byte count or the latched fault.
    pub fn finish(self) -> Result<u64, Fault> {
        self.tally.into_result()
    }

    /// Folds the result of an out-of-band write of `n` bytes into this writer.
    pub fn add_external(&mut self, n: u64, result: io::Result<()>) -> Option<()> {
        self.tally.record(n, result)
    }

    /// Writes all of `buf`.
    ///
    /// A sink that stops accepting bytes latches [`Fault::ShortWrite`]. The
    /// bytes it did accept are still counted.
    pub fn write_bytes(&mut self, buf: &[u8]) -> Option<()> {
        if self.tally.is_faulted() {
            return None;
        }
        let (written, result) = write_full(&mut self.inner, buf);
        self.tally.add(written);
        match result {
            Ok(()) => Some(()),
            Err(fault) => {
                self.tally.latch(fault);
                None
            }
        }
    }

    /// Writes `value` in the current byte order.
    pub fn write<T: Number>(&mut self, value: T) -> Option<()> {
        if self.tally.is_faulted() {
            return None;
        }
        let mut raw = [0u8; 8];
        let buf = &mut raw[..T::SIZE];
        value.encode(self.order, buf);
        self.write_bytes(buf)
    }

    /// Writes a number whose type is only known at runtime.
    pub fn write_value(&mut self, value: Value) -> Option<()> {
        if self.tally.is_faulted() {
            return None;
        }
        let mut raw = [0u8; 8];
        let buf = &mut raw[..value.kind().size()];
        value.encode(self.order, buf);
        self.write_bytes(buf)
    }

    /// Flushes the sink.
    pub fn flush(&mut self) -> Option<()> {
        if self.tally.is_faulted() {
            return None;
        }
        match self.inner.flush() {
            Ok(()) => Some(()),
            Err(err) => {
                self.tally.latch(Fault::from_io(err));
                None
            }
        }
    }
}

/// Writes until `buf` is drained, the sink stops accepting bytes, or it fails.
/// Returns the number of bytes accepted alongside the outcome.
fn write_full<W: Write>(writer: &mut W, buf: &[u8]) -> (usize, Result<(), Fault>) {
    let mut written = 0;
    while written < buf.len() {
        match writer.write(&buf[written..]) {
            Ok(0) => {
                trace!("sink stopped after {} of {} bytes", written, buf.len());
                let fault = Fault::ShortWrite {
                    written,
                    expected: buf.len(),
                };
                return (written, Err(fault));
            }
            Ok(n) => written += n,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => {
                trace!("write failed after {} of {} bytes: {}", written, buf.len(), err);
                return (written, Err(Fault::from_io(err)));
            }
        }
    }
    (written, Ok(()))
}
