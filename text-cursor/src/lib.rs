pub mod cursor;
mod lookahead;

pub use cursor::{TextCursor, DEFAULT_CAPACITY};
pub use cursor_common::{Fault, Position};
