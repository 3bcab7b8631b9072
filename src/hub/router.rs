use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::board::{Board, ParticipantId};
use crate::sync::protocol::{ClientEvent, ServerEvent};

use super::presence::{InteractionMap, InteractionTracker};
use super::registry::SessionRegistry;
use super::store::BoardStore;

/// Outbound queue handle for one participant. Delivery is fire-and-forget:
/// a failed send is never retried, the next full snapshot heals the gap.
pub type PeerSender = mpsc::UnboundedSender<ServerEvent>;

/// Inbound envelope consumed by the hub loop.
#[derive(Debug)]
pub enum HubEvent {
    Connected { id: ParticipantId, peer: PeerSender },
    Inbound { id: ParticipantId, event: ClientEvent },
    Disconnected { id: ParticipantId },
}

/// The coordination point: routes every participant event through the
/// session registry, board store, and interaction tracker, then fans the
/// resulting snapshot out to connected peers.
///
/// All state hangs off the hub instance; constructing a fresh hub yields a
/// fully isolated board. The routing methods are synchronous and apply one
/// event to completion; the server funnels every connection through a
/// single `run` loop so no event interleaves with another.
pub struct SyncHub {
    registry: SessionRegistry,
    store: BoardStore,
    tracker: InteractionTracker,
    peers: DashMap<ParticipantId, PeerSender>,
}

impl SyncHub {
    pub fn new() -> Self {
        Self {
            registry: SessionRegistry::new(),
            store: BoardStore::new(),
            tracker: InteractionTracker::new(),
            peers: DashMap::new(),
        }
    }

    /// Consume hub events one at a time until every inbound sender is gone.
    pub async fn run(self: Arc<Self>, mut rx: mpsc::UnboundedReceiver<HubEvent>) {
        while let Some(event) = rx.recv().await {
            match event {
                HubEvent::Connected { id, peer } => self.connect(&id, peer),
                HubEvent::Inbound { id, event } => self.apply(&id, event),
                HubEvent::Disconnected { id } => self.disconnect(&id),
            }
        }
    }

    /// Register a participant: announce the new count to everyone, then
    /// hand the newcomer the current board and interaction snapshot.
    pub fn connect(&self, id: &str, peer: PeerSender) {
        self.peers.insert(id.to_string(), peer);
        let count = self.registry.connect(id);
        info!(participant = %id, count, "participant connected");

        self.broadcast(&ServerEvent::ClientCount(count));
        self.unicast(id, ServerEvent::UpdateBoard(self.store.get()));
        self.unicast(id, ServerEvent::HighlightTask(self.tracker.snapshot()));
    }

    /// Deregister a participant and release everything it was touching.
    pub fn disconnect(&self, id: &str) {
        let released = self.tracker.clear(id);
        let count = self.registry.disconnect(id);
        self.peers.remove(id);
        info!(participant = %id, count, released, "participant disconnected");

        self.broadcast(&ServerEvent::ClientCount(count));
        self.broadcast(&ServerEvent::HighlightTask(self.tracker.snapshot()));
    }

    /// Route one inbound event from `sender` per the protocol table.
    pub fn apply(&self, sender: &str, event: ClientEvent) {
        match event {
            ClientEvent::TaskUpdate(board) => {
                let stored = self.store.replace(board);
                debug!(participant = %sender, tasks = stored.task_count(), "board replaced");
                // The originator already applied its mutation locally, so
                // the rebroadcast skips it.
                self.broadcast_except(sender, &ServerEvent::UpdateBoard(stored));
            }
            ClientEvent::InteractTask { task_id } => {
                self.tracker.begin(&task_id, sender);
                self.broadcast(&ServerEvent::HighlightTask(self.tracker.snapshot()));
            }
            ClientEvent::StopInteractTask { task_id } => {
                if !self.tracker.end(&task_id, sender) {
                    debug!(participant = %sender, task = %task_id, "stale interaction end ignored");
                }
                self.broadcast(&ServerEvent::HighlightTask(self.tracker.snapshot()));
            }
        }
    }

    /// Current authoritative board snapshot.
    pub fn board(&self) -> Board {
        self.store.get()
    }

    /// Current interaction snapshot.
    pub fn interactions(&self) -> InteractionMap {
        self.tracker.snapshot()
    }

    pub fn participant_count(&self) -> usize {
        self.registry.count()
    }

    fn broadcast(&self, event: &ServerEvent) {
        for entry in self.peers.iter() {
            if entry.value().send(event.clone()).is_err() {
                debug!(participant = %entry.key(), "dropped broadcast to closed channel");
            }
        }
    }

    fn broadcast_except(&self, skip: &str, event: &ServerEvent) {
        for entry in self.peers.iter() {
            if entry.key() == skip {
                continue;
            }
            if entry.value().send(event.clone()).is_err() {
                debug!(participant = %entry.key(), "dropped broadcast to closed channel");
            }
        }
    }

    fn unicast(&self, id: &str, event: ServerEvent) {
        if let Some(peer) = self.peers.get(id) {
            if peer.send(event).is_err() {
                debug!(participant = %id, "dropped unicast to closed channel");
            }
        }
    }
}

impl Default for SyncHub {
    fn default() -> Self {
        Self::new()
    }
}
