//! # Syncboard - Real-Time Collaborative Task Board Core
//!
//! State-synchronization and presence-signaling engine for a shared task
//! board: many participants mutate one authoritative board and watch each
//! other's edits live over WebSocket.
//!
//! ## Features
//!
//! - **Snapshot Replication**: every change rebroadcasts the complete
//!   board, never a delta, so a missed message heals on the next one
//! - **Last-Write-Wins**: concurrent mutations are arbitrated by arrival
//!   order at the single-threaded hub, no merge machinery
//! - **Presence Signaling**: live `highlight-task` map of who is touching
//!   which card, released automatically on disconnect
//! - **No Ambient State**: all board state hangs off a `SyncHub` instance,
//!   so every test (and every server) gets a fully isolated board
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     // Serves /ws (the sync protocol) plus /board for read-only peeks.
//!     syncboard::server::start(5001, "0.0.0.0").await
//! }
//! ```

pub mod board;
pub mod hub;
pub mod server;
pub mod sync;

// Re-export main types for library consumers
pub use board::{Board, ColumnName, ParticipantId, Task, TaskId, Urgency};
pub use hub::{BoardStore, InteractionMap, InteractionTracker, SessionRegistry, SyncHub};
pub use sync::{ClientEvent, ServerEvent};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
