//! Network abstraction
//!
//! Runs are fully re-derivable from (level id, run id), so a future peer
//! only needs the run key plus find events to stay symmetric with this
//! client. Only the local loopback is implemented: it accepts everything
//! and delivers nothing.

use serde::{Deserialize, Serialize};

/// Messages a peer would need for run symmetry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WireMessage {
    /// Enough to regenerate the whole layout on the other side
    RunKey {
        level_id: String,
        run_id: String,
        difficulty: String,
    },
    TargetFound { id: String },
    WrongSelection { id: String },
    RunWon { final_score: f64 },
}

/// Message transport between peers
pub trait Transport {
    /// Queue a message for the other side; never blocks
    fn send(&mut self, msg: &WireMessage);
    /// Next inbound message, if any
    fn poll(&mut self) -> Option<WireMessage>;
}

/// Single-player stand-in: swallows sends, never receives
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalLoopback {
    sent: u64,
}

impl LocalLoopback {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages swallowed so far
    pub fn sent_count(&self) -> u64 {
        self.sent
    }
}

impl Transport for LocalLoopback {
    fn send(&mut self, msg: &WireMessage) {
        self.sent += 1;
        log::trace!("loopback dropped {msg:?}");
    }

    fn poll(&mut self) -> Option<WireMessage> {
        None
    }
}
