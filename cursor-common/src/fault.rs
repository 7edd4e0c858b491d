use std::io;
use thiserror::Error;

/// A data or stream fault latched by a cursor.
///
/// Faults describe bad or insufficient input and I/O failures. They are the
/// recoverable error class: a caller inspects them through the cursor's
/// `error()`/`end()` accessors once a chain of calls reports failure.
/// Misuse of the API is never represented here.
#[derive(Debug, Error)]
pub enum Fault {
    /// Clean end of input. Acceptable at an optional stopping point.
    #[error("end of input")]
    Eof,
    /// End of input where more data was required.
    #[error("unexpected end of input")]
    UnexpectedEof,
    /// The sink stopped accepting bytes before the write completed.
    #[error("short write: wrote {written} of {expected} bytes")]
    ShortWrite { written: usize, expected: usize },
    /// The underlying source or sink failed.
    #[error("i/o error: {0}")]
    Io(#[source] io::Error),
}

impl Fault {
    /// Classifies an I/O error, keeping the end-of-input flavour when the
    /// error carries one.
    ///
    /// An error built from a `Fault` yields that fault back, so a clean
    /// [`Fault::Eof`] is not widened to [`Fault::UnexpectedEof`].
    pub fn from_io(err: io::Error) -> Self {
        if let Some(fault) = err.get_ref().and_then(|inner| inner.downcast_ref::<Fault>()) {
            match fault {
                Fault::Eof => return Fault::Eof,
                Fault::UnexpectedEof => return Fault::UnexpectedEof,
                Fault::ShortWrite { written, expected } => {
                    return Fault::ShortWrite {
                        written: *written,
                        expected: *expected,
                    }
                }
                Fault::Io(_) => {}
            }
        }
        match err.kind() {
            io::ErrorKind::UnexpectedEof => Fault::UnexpectedEof,
            _ => Fault::Io(err),
        }
    }

    /// Returns true for a clean end of input.
    pub fn is_eof(&self) -> bool {
        matches!(self, Fault::Eof)
    }

    /// Returns true when required input was missing.
    pub fn is_unexpected_eof(&self) -> bool {
        matches!(self, Fault::UnexpectedEof)
    }
}

impl From<io::Error> for Fault {
    fn from(err: io::Error) -> Self {
        Fault::from_io(err)
    }
}

impl From<Fault> for io::Error {
    fn from(fault: Fault) -> Self {
        match fault {
            Fault::Eof | Fault::UnexpectedEof => {
                io::Error::new(io::ErrorKind::UnexpectedEof, fault)
            }
            Fault::ShortWrite { .. } => io::Error::new(io::ErrorKind::WriteZero, fault),
            Fault::Io(err) => err,
        }
    }
}
