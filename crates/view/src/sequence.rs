//! Fetch sequencing
//!
//! Every fetch is issued as a [`FetchTicket`] carrying a monotonically
//! increasing sequence number. Only the completion of the most recently
//! issued ticket replaces the snapshot; anything older is stale and dropped,
//! so a slow response can never overwrite a newer one.

use roster_core::ActiveFilter;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Handle for one in-flight fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchTicket {
    /// Sequence number, starting at 1
    pub seq: u64,
    /// Status filter the fetch was issued with
    pub active: ActiveFilter,
}

/// Issues tickets and decides which completions to keep
#[derive(Debug, Clone, Default)]
pub struct FetchSequencer {
    issued: u64,
    pending: Option<u64>,
}

impl FetchSequencer {
    /// Create a sequencer with nothing issued
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket for a new fetch, superseding any pending one
    pub fn issue(&mut self, active: ActiveFilter) -> FetchTicket {
        self.issued += 1;
        self.pending = Some(self.issued);
        FetchTicket {
            seq: self.issued,
            active,
        }
    }

    /// Decide whether a completion may be applied
    ///
    /// Returns true exactly once, for the latest issued ticket.
    pub fn accept(&mut self, ticket: &FetchTicket) -> bool {
        if self.pending == Some(ticket.seq) {
            self.pending = None;
            true
        } else {
            debug!(
                target: "roster::view",
                seq = ticket.seq,
                latest = self.issued,
                "discarding stale fetch completion"
            );
            false
        }
    }

    /// A fetch is awaiting completion: the loading state
    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Sequence number of the last issued ticket
    pub fn latest(&self) -> u64 {
        self.issued
    }
}
