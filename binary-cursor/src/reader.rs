use crate::{Endian, Number, NumberKind, Value};
use cursor_common::{Fault, Tally};
use log::trace;
use std::io::{self, Read};

/// Sequential decoder of fixed-width numbers and raw bytes.
///
/// Every method that reads returns `None` on failure and latches the cause.
/// Once a fault is latched, later calls return `None` without touching the
/// source, so a decode routine can use `?` on each field and look at
/// [`BinaryReader::error`] afterwards.
#[derive(Debug)]
pub struct BinaryReader<R> {
    inner: R,
    order: Endian,
    tally: Tally,
}

impl<R: Read> BinaryReader<R> {
    /// Creates a little-endian reader over `inner`.
    pub fn new(inner: R) -> Self {
        Self::with_byte_order(inner, Endian::Little)
    }

    pub fn with_byte_order(inner: R, order: Endian) -> Self {
        Self {
            inner,
            order,
            tally: Tally::new(),
        }
    }

    pub fn byte_order(&self) -> Endian {
        self.order
    }

    /// Sets the byte order for numbers read from now on.
    pub fn set_byte_order(&mut self, order: Endian) {
        self.order = order;
    }

    /// Returns the number of bytes read so far.
    pub fn consumed(&self) -> u64 {
        self.tally.consumed()
    }

    /// Returns the latched fault, if any.
    pub fn error(&self) -> Option<&Fault> {
        self.tally.fault()
    }

    /// Returns the number of bytes read and the latched fault.
    pub fn end(&self) -> (u64, Option<&Fault>) {
        self.tally.end()
    }

    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    /// Returns the source for a transfer done outside this reader. Report its
    /// outcome with [`add_external`](BinaryReader::add_external).
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.inner
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Consumes the reader, yielding the byte count or the latched fault.
    pub fn finish(self) -> Result<u64, Fault> {
        self.tally.into_result()
    }

    /// Folds the result of an out-of-band read of `n` bytes into this reader.
    pub fn add_external(&mut self, n: u64, result: io::Result<()>) -> Option<()> {
        self.tally.record(n, result)
    }

    /// Fills `buf` completely.
    ///
    /// If the source ends before any byte arrives, [`Fault::Eof`] is latched;
    /// if it ends part way, [`Fault::UnexpectedEof`]. Bytes read before a
    /// failure still count toward [`consumed`](BinaryReader::consumed).
    pub fn read_bytes(&mut self, buf: &mut [u8]) -> Option<()> {
        if self.tally.is_faulted() {
            return None;
        }
        let (filled, result) = read_full(&mut self.inner, buf);
        self.tally.add(filled);
        match result {
            Ok(()) => Some(()),
            Err(fault) => {
                self.tally.latch(fault);
                None
            }
        }
    }

    /// Reads one `T` in the current byte order.
    pub fn read<T: Number>(&mut self) -> Option<T> {
        let mut raw = [0u8; 8];
        let buf = &mut raw[..T::SIZE];
        self.read_bytes(buf)?;
        Some(T::decode(self.order, buf))
    }

    /// Reads one number whose type is only known at runtime.
    pub fn read_value(&mut self, kind: NumberKind) -> Option<Value> {
        let mut raw = [0u8; 8];
        let buf = &mut raw[..kind.size()];
        self.read_bytes(buf)?;
        Some(Value::decode(kind, self.order, buf))
    }

    /// Reads everything left in the source. Reaching the end is success.
    pub fn read_all(&mut self) -> Option<Vec<u8>> {
        if self.tally.is_faulted() {
            return None;
        }
        let mut data = Vec::new();
        let result = self.inner.read_to_end(&mut data);
        self.tally.add(data.len());
        match result {
            Ok(_) => Some(data),
            Err(err) => {
                self.tally.latch(Fault::from_io(err));
                None
            }
        }
    }
}

/// Reads until `buf` is full, the source ends, or it fails. Returns the number
/// of bytes placed in `buf` alongside the outcome.
fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> (usize, Result<(), Fault>) {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => {
                trace!("read failed after {} of {} bytes: {}", filled, buf.len(), err);
                return (filled, Err(Fault::from_io(err)));
            }
        }
    }
    let result = if filled == buf.len() {
        Ok(())
    } else if filled == 0 {
        Err(Fault::Eof)
    } else {
        trace!("source ended after {} of {} bytes", filled, buf.len());
        Err(Fault::UnexpectedEof)
    };
    (filled, result)
}
