//! Byte transport abstraction and the in-process loopback implementation.
//!
//! Implementations:
//! - [`LoopbackTransport`]: shared in-memory queues for single-process runs
//!   and tests
//! - (future) a remote transport over an actual socket
//!
//! The transport deals only in encoded envelopes; it knows nothing about
//! directive semantics, ordering across kinds, or session membership.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use bevy::prelude::*;

#[derive(Debug, PartialEq, Eq)]
pub enum TrySendError {
    Full,
    Disconnected,
}

/// Minimal transport contract for envelope bytes.
///
/// Per-peer send order is preserved; nothing else is guaranteed.
pub trait Transport: Send + Sync {
    fn try_send(&self, bytes: Vec<u8>) -> Result<(), TrySendError>;
    fn try_recv(&self) -> Option<Vec<u8>>;
}

type SharedQueue = Arc<Mutex<VecDeque<Vec<u8>>>>;

/// One end of an in-memory duplex pair.
#[derive(Clone)]
pub struct LoopbackTransport {
    tx: SharedQueue,
    rx: SharedQueue,
    capacity: usize,
}

impl LoopbackTransport {
    /// Create both ends of a duplex pair with a bounded queue per direction.
    pub fn pair(capacity: usize) -> (Self, Self) {
        let a_to_b: SharedQueue = Arc::new(Mutex::new(VecDeque::new()));
        let b_to_a: SharedQueue = Arc::new(Mutex::new(VecDeque::new()));
        let a = Self {
            tx: a_to_b.clone(),
            rx: b_to_a.clone(),
            capacity,
        };
        let b = Self {
            tx: b_to_a,
            rx: a_to_b,
            capacity,
        };
        (a, b)
    }

    /// An end whose sends are simply dropped and that never receives.
    /// Used by the single-participant demo where no remote peer exists.
    pub fn detached() -> Self {
        Self {
            tx: Arc::new(Mutex::new(VecDeque::new())),
            rx: Arc::new(Mutex::new(VecDeque::new())),
            capacity: 0,
        }
    }
}

impl Transport for LoopbackTransport {
    fn try_send(&self, bytes: Vec<u8>) -> Result<(), TrySendError> {
        let mut queue = self.tx.lock().map_err(|_| TrySendError::Disconnected)?;
        if self.capacity == 0 {
            // Detached end: silently drop, matching fire-and-forget semantics.
            return Ok(());
        }
        if queue.len() >= self.capacity {
            return Err(TrySendError::Full);
        }
        queue.push_back(bytes);
        Ok(())
    }

    fn try_recv(&self) -> Option<Vec<u8>> {
        self.rx.lock().ok()?.pop_front()
    }
}

/// The transport this process drains its outbox into.
#[derive(Resource)]
pub struct NetLink {
    pub transport: Box<dyn Transport>,
}

impl NetLink {
    pub fn new(transport: impl Transport + 'static) -> Self {
        Self {
            transport: Box::new(transport),
        }
    }
}
