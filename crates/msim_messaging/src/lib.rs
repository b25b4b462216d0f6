//! # msim-messaging
//!
//! Non-blocking send/receive, broadcast, and packed-row transport
//! consumed by the emitted simulation runtime: C5 of the compiler.
//!
//! Two [`MsgExec`] implementations: [`EmptyMsgExec`] for a single-process
//! run, and [`ThreadMsgExec`] (built with [`new_world`]) for a real
//! multi-rank transport over OS threads.

pub mod error;
pub mod exec;
pub mod groups;
pub mod packed;
pub mod state;
pub mod tag;
pub mod thread;

pub use error::MessagingError;
pub use exec::{EmptyMsgExec, MsgExec};
pub use packed::{pack_rows, unpack_rows};
pub use state::{PackedReceive, ReceiveState};
pub use tag::RowKind;
pub use thread::{new_world, ThreadMsgExec};
