//! Messaging-layer error taxonomy.

use std::fmt;

/// A failed send/recv/probe, always carrying the rank that observed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessagingError {
    pub rank: usize,
    pub message: String,
}

impl MessagingError {
    pub fn new(rank: usize, message: impl Into<String>) -> Self {
        let message = message.into();
        log::error!("rank {rank}: {message}");
        Self { rank, message }
    }
}

impl fmt::Display for MessagingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rank {}: {}", self.rank, self.message)
    }
}

impl std::error::Error for MessagingError {}
