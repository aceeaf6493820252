use serde::{Deserialize, Serialize};

/// Aggregated pending/expiring counts produced by one poll cycle. Never
/// persisted; recomputed from scratch on every poll.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationSnapshot {
    pub pending_requests: u64,
    pub pending_approvals: u64,
    pub expiring_soon: u64,
}

impl NotificationSnapshot {
    /// Requests plus approvals. Expiring licenses are informational only and
    /// stay out of the header total.
    pub fn header_total(&self) -> u64 {
        self.pending_requests + self.pending_approvals
    }
}
