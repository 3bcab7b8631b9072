pub mod presence;
pub mod registry;
pub mod router;
pub mod store;

pub use presence::{InteractionMap, InteractionTracker};
pub use registry::SessionRegistry;
pub use router::{HubEvent, PeerSender, SyncHub};
pub use store::BoardStore;

// The protocol core. Session registry, board store, and interaction
// tracker are plain data holders; every fan-out decision (all vs.
// all-but-sender) lives in the router so it stays testable without a
// transport.
