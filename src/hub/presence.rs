use std::collections::HashMap;

use dashmap::DashMap;

use crate::board::{ParticipantId, TaskId};

/// Read-only copy of the presence state, broadcast in full on every change.
pub type InteractionMap = HashMap<TaskId, ParticipantId>;

/// Maps each task to the participant currently touching it.
///
/// Entries are ephemeral advisory signals for the presentation layer, not
/// enforced locks: a `begin` from a second participant overwrites the
/// existing entry, while `end` only removes an entry the caller owns so a
/// stale stop cannot evict someone else's interaction.
#[derive(Default)]
pub struct InteractionTracker {
    active: DashMap<TaskId, ParticipantId>,
}

impl InteractionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `participant` as interacting with `task`. Last interactor wins.
    pub fn begin(&self, task: &str, participant: &str) {
        self.active.insert(task.to_string(), participant.to_string());
    }

    /// Stop interacting. Returns false if the entry belonged to someone
    /// else (or did not exist), in which case the map is left untouched.
    pub fn end(&self, task: &str, participant: &str) -> bool {
        self.active.remove_if(task, |_, owner| owner == participant).is_some()
    }

    /// Drop every entry owned by `participant`. Invoked on disconnect.
    /// Returns how many entries were removed.
    pub fn clear(&self, participant: &str) -> usize {
        let before = self.active.len();
        self.active.retain(|_, owner| owner != participant);
        before - self.active.len()
    }

    pub fn snapshot(&self) -> InteractionMap {
        self.active
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_overwrites_existing_entry() {
        let tracker = InteractionTracker::new();
        tracker.begin("t1", "p1");
        tracker.begin("t1", "p2");

        let map = tracker.snapshot();
        assert_eq!(map.get("t1").map(String::as_str), Some("p2"));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn end_requires_ownership() {
        let tracker = InteractionTracker::new();
        tracker.begin("t1", "p1");

        // A stale stop from another participant leaves the entry alone.
        assert!(!tracker.end("t1", "p2"));
        assert_eq!(tracker.snapshot().get("t1").map(String::as_str), Some("p1"));

        assert!(tracker.end("t1", "p1"));
        assert!(tracker.snapshot().is_empty());
    }

    #[test]
    fn end_of_absent_entry_is_noop() {
        let tracker = InteractionTracker::new();
        assert!(!tracker.end("t1", "p1"));
        assert!(tracker.snapshot().is_empty());
    }

    #[test]
    fn clear_removes_only_the_owners_entries() {
        let tracker = InteractionTracker::new();
        tracker.begin("t1", "p1");
        tracker.begin("t2", "p1");
        tracker.begin("t3", "p2");

        assert_eq!(tracker.clear("p1"), 2);

        let map = tracker.snapshot();
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("t3").map(String::as_str), Some("p2"));
    }

    #[test]
    fn snapshot_is_detached() {
        let tracker = InteractionTracker::new();
        tracker.begin("t1", "p1");

        let map = tracker.snapshot();
        tracker.begin("t2", "p2");
        assert_eq!(map.len(), 1);
    }
}
