pub mod endian;
pub mod number;
pub mod reader;
pub mod writer;

pub use cursor_common::Fault;
pub use endian::Endian;
pub use number::{number_size, Number, NumberKind, Value};
pub use reader::BinaryReader;
pub use writer::BinaryWriter;
