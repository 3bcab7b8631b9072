pub mod protocol;
pub mod remote;

pub use protocol::{ClientEvent, ServerEvent};

// Real-time board sync protocol: the wire envelope shared by server and
// client, plus a typed WebSocket client (BoardClient) used by the `join`
// command and the integration tests.
