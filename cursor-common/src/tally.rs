use crate::Fault;
use log::debug;
use std::io;

/// The byte count and latched fault shared by every cursor.
///
/// A `Tally` is the single source of truth for how far a cursor got and why
/// it stopped. Once a fault is latched it is never replaced, except that a
/// clean end of input may be upgraded to an unexpected one.
#[derive(Debug, Default)]
pub struct Tally {
    consumed: u64,
    fault: Option<Fault>,
}

impl Tally {
    /// Creates a clean tally with nothing consumed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of bytes transferred so far.
    pub fn consumed(&self) -> u64 {
        self.consumed
    }

    /// Returns the latched fault, if any.
    pub fn fault(&self) -> Option<&Fault> {
        self.fault.as_ref()
    }

    /// Returns true once any fault has been latched.
    #[inline]
    pub fn is_faulted(&self) -> bool {
        self.fault.is_some()
    }

    /// Returns true if the latched fault is exactly a clean end of input.
    pub fn is_clean_eof(&self) -> bool {
        matches!(self.fault, Some(Fault::Eof))
    }

    /// Adds `n` transferred bytes to the count.
    #[inline]
    pub fn add(&mut self, n: usize) {
        self.consumed += n as u64;
    }

    /// Latches `fault` unless a fault is already held.
    pub fn latch(&mut self, fault: Fault) {
        if self.fault.is_some() {
            return;
        }
        debug!("fault latched after {} bytes: {}", self.consumed, fault);
        self.fault = Some(fault);
    }

    /// Turns a latched clean end of input into an unexpected one.
    pub fn upgrade_eof(&mut self) {
        if self.is_clean_eof() {
            debug!("end of input at {} bytes was required data", self.consumed);
            self.fault = Some(Fault::UnexpectedEof);
        }
    }

    /// Folds the outcome of a transfer done outside the cursor primitives.
    ///
    /// Does nothing when a fault is already latched. Otherwise `n` is added and
    /// an error in `result` is latched.
    pub fn record(&mut self, n: u64, result: io::Result<()>) -> Option<()> {
        if self.is_faulted() {
            return None;
        }
        self.consumed += n;
        match result {
            Ok(()) => Some(()),
            Err(err) => {
                self.latch(Fault::from_io(err));
                None
            }
        }
    }

    /// Returns the byte count together with the latched fault.
    pub fn end(&self) -> (u64, Option<&Fault>) {
        (self.consumed, self.fault.as_ref())
    }

    /// Consumes the tally, yielding the count or the latched fault.
    pub fn into_result(self) -> Result<u64, Fault> {
        match self.fault {
            Some(fault) => Err(fault),
            None => Ok(self.consumed),
        }
    }
}
