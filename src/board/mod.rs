pub mod model;

pub use model::{Board, ColumnName, ParticipantId, Task, TaskId, Urgency, CONTENT_LIMIT};
