//! State machine of a packed receive.
//!
//! `Queued → Probed → Sized → Allocated → Received → Unpacked → Completed`.
//! Once `Completed`, further drives are no-ops: the cached result is
//! returned without touching the transport again.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceiveState {
    Queued,
    Probed,
    Sized,
    Allocated,
    Received,
    Unpacked,
    Completed,
}

/// One pending packed receive, tracked by its executor until it completes.
pub struct PackedReceive {
    state: ReceiveState,
    result: Option<Vec<u8>>,
}

impl PackedReceive {
    pub fn new() -> Self {
        Self {
            state: ReceiveState::Queued,
            result: None,
        }
    }

    pub fn state(&self) -> ReceiveState {
        self.state
    }

    pub fn is_completed(&self) -> bool {
        self.state == ReceiveState::Completed
    }

    /// The unpacked payload, available once `Completed`.
    pub fn result(&self) -> Option<&[u8]> {
        self.result.as_deref()
    }

    /// Advances the machine given a matched message body, or does nothing
    /// if no message is waiting yet (stays `Queued`). Already-`Completed`
    /// receives are untouched regardless of `probed`.
    pub fn drive(&mut self, probed: Option<Vec<u8>>) -> bool {
        if self.state == ReceiveState::Completed {
            return true;
        }
        let Some(bytes) = probed else {
            return false;
        };
        self.state = ReceiveState::Probed;
        self.state = ReceiveState::Sized;
        self.state = ReceiveState::Allocated;
        self.state = ReceiveState::Received;
        self.state = ReceiveState::Unpacked;
        self.result = Some(bytes);
        self.state = ReceiveState::Completed;
        true
    }
}

impl Default for PackedReceive {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stays_queued_until_a_message_arrives() {
        let mut r = PackedReceive::new();
        assert_eq!(r.state(), ReceiveState::Queued);
        assert!(!r.drive(None));
        assert_eq!(r.state(), ReceiveState::Queued);
    }

    #[test]
    fn completes_once_a_message_is_probed() {
        let mut r = PackedReceive::new();
        assert!(r.drive(Some(vec![1, 2, 3])));
        assert!(r.is_completed());
        assert_eq!(r.result(), Some(&[1, 2, 3][..]));
    }

    #[test]
    fn completed_receive_is_idempotent() {
        let mut r = PackedReceive::new();
        r.drive(Some(vec![9]));
        assert!(r.drive(None));
        assert_eq!(r.result(), Some(&[9][..]));
    }
}
