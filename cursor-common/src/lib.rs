//! Cursor Common
//!
//! 提供 text-cursor 和 binary-cursor 之间共享的故障与计数状态。

pub mod fault;
pub mod position;
pub mod tally;

pub use fault::Fault;
pub use position::Position;
pub use tally::Tally;
