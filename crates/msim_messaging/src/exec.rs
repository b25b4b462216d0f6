//! The messaging executor interface and the empty
//! single-process implementation.

use crate::error::MessagingError;
use crate::tag::RowKind;

/// Non-blocking send/receive, broadcast, and packed-row transport consumed
/// by the emitted simulation runtime. Every entry point is expected
/// to be called behind a single recursive-mutex guard;
/// implementations of this trait do not re-enter that guard themselves.
pub trait MsgExec: Send + Sync {
    fn world_size(&self) -> usize;
    fn rank(&self) -> usize;
    fn group_rank(&self) -> usize;

    /// Partitions non-root ranks into `group_count` groups of at most
    /// `group_size`, root included in every group. A no-op if the
    /// shape cannot be honoured.
    fn create_groups(&self, group_size: usize, group_count: usize);

    /// Broadcasts a primitive array from the root. Non-root
    /// callers must pass a `buffer` whose length already matches what the
    /// root sends; a mismatch is a [`MessagingError`].
    fn bcast(&self, group_one: bool, buffer: &mut Vec<f64>) -> Result<(), MessagingError>;

    /// Broadcasts a packed row buffer from the root. On the root, `buffer`
    /// holds the bytes to send (already produced by [`crate::pack_rows`]);
    /// on non-root callers it is overwritten with the received packed
    /// bytes, which the caller unpacks with [`crate::unpack_rows`].
    fn bcast_packed(
        &self,
        group_one: bool,
        tag: RowKind,
        buffer: &mut Vec<u8>,
    ) -> Result<(), MessagingError>;

    /// Registers a non-blocking send; the executor owns it until drained
    /// by [`MsgExec::wait_send_all`].
    fn start_send(&self, dst: usize, tag: RowKind, payload: Vec<u8>);

    /// Registers a non-blocking receive; completion is observed through
    /// [`MsgExec::try_receive`] or [`MsgExec::wait_recv_all`].
    fn start_recv(&self, src: usize, tag: RowKind);

    /// One-shot non-blocking probe + receive. `None` if no
    /// matching message is waiting yet; idempotent once completed.
    fn try_receive(&self, src: usize, tag: RowKind) -> Option<Vec<u8>>;

    /// Blocks until every registered send completes, then drops them.
    fn wait_send_all(&self);

    /// Blocks until every registered receive completes, then drops them.
    fn wait_recv_all(&self);
}

/// A single-process stand-in cluster of size 1 at rank 0. Every operation is a no-op or immediate success.
#[derive(Debug, Default)]
pub struct EmptyMsgExec;

impl EmptyMsgExec {
    pub fn new() -> Self {
        Self
    }
}

impl MsgExec for EmptyMsgExec {
    fn world_size(&self) -> usize {
        1
    }

    fn rank(&self) -> usize {
        0
    }

    fn group_rank(&self) -> usize {
        0
    }

    fn create_groups(&self, _group_size: usize, _group_count: usize) {}

    fn bcast(&self, _group_one: bool, _buffer: &mut Vec<f64>) -> Result<(), MessagingError> {
        Ok(())
    }

    fn bcast_packed(
        &self,
        _group_one: bool,
        _tag: RowKind,
        _buffer: &mut Vec<u8>,
    ) -> Result<(), MessagingError> {
        Ok(())
    }

    fn start_send(&self, _dst: usize, _tag: RowKind, _payload: Vec<u8>) {}

    fn start_recv(&self, _src: usize, _tag: RowKind) {}

    fn try_receive(&self, _src: usize, _tag: RowKind) -> Option<Vec<u8>> {
        None
    }

    fn wait_send_all(&self) {}

    fn wait_recv_all(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_rank_world() {
        let exec = EmptyMsgExec::new();
        assert_eq!(exec.world_size(), 1);
        assert_eq!(exec.rank(), 0);
        assert_eq!(exec.group_rank(), 0);
    }

    #[test]
    fn every_operation_is_a_no_op() {
        let exec = EmptyMsgExec::new();
        let mut buf = vec![1.0, 2.0];
        assert!(exec.bcast(true, &mut buf).is_ok());
        assert_eq!(buf, vec![1.0, 2.0]);
        exec.start_send(0, RowKind::ModelDic, vec![1, 2, 3]);
        exec.wait_send_all();
        assert!(exec.try_receive(0, RowKind::ModelDic).is_none());
    }
}
