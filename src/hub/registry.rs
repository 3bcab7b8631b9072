use dashmap::DashSet;

use crate::board::ParticipantId;

/// Tracks which participants are currently connected.
///
/// The live count is the set size, so it can never go negative and a
/// disconnect for an unknown participant is a no-op.
#[derive(Default)]
pub struct SessionRegistry {
    participants: DashSet<ParticipantId>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a participant. Returns the updated live count.
    pub fn connect(&self, id: &str) -> usize {
        self.participants.insert(id.to_string());
        self.participants.len()
    }

    /// Deregister a participant. Returns the updated live count.
    pub fn disconnect(&self, id: &str) -> usize {
        self.participants.remove(id);
        self.participants.len()
    }

    pub fn count(&self) -> usize {
        self.participants.len()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.participants.contains(id)
    }
}
