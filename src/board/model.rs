use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Opaque task identifier, chosen by the client that created the task.
pub type TaskId = String;

/// Opaque connection identifier, assigned by the server on connect.
pub type ParticipantId = String;

/// Maximum task description length enforced by the presentation layer.
/// The core itself stays permissive and never rejects longer content.
pub const CONTENT_LIMIT: usize = 50;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    #[default]
    Medium,
    High,
}

/// A single card on the board. Belongs to exactly one column at a time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub content: String,
    /// Tasks created before the urgency field existed carry no value;
    /// they deserialize as medium rather than failing the whole board.
    #[serde(default)]
    pub urgency: Urgency,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,
    /// Display string only, never used for ordering.
    #[serde(rename = "createdAt", default)]
    pub created_at: String,
}

impl Task {
    pub fn new(
        id: impl Into<TaskId>,
        content: impl Into<String>,
        urgency: Urgency,
        deadline: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            urgency,
            deadline: Some(deadline),
            created_at: Utc::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }

    pub fn content_within_limit(&self) -> bool {
        self.content.chars().count() <= CONTENT_LIMIT
    }
}

/// The three fixed task groupings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColumnName {
    Todo,
    InProgress,
    Done,
}

impl ColumnName {
    pub const ALL: [ColumnName; 3] = [ColumnName::Todo, ColumnName::InProgress, ColumnName::Done];

    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnName::Todo => "todo",
            ColumnName::InProgress => "inProgress",
            ColumnName::Done => "done",
        }
    }
}

/// The authoritative board: one ordered task list per column.
///
/// Every participant's local copy is a cache of this value, replaced in
/// full on each `update-board` broadcast. Invariant: a task id appears in
/// at most one column, at most one position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Board {
    pub todo: Vec<Task>,
    pub in_progress: Vec<Task>,
    pub done: Vec<Task>,
}

impl Board {
    pub fn column(&self, name: ColumnName) -> &[Task] {
        match name {
            ColumnName::Todo => &self.todo,
            ColumnName::InProgress => &self.in_progress,
            ColumnName::Done => &self.done,
        }
    }

    pub fn column_mut(&mut self, name: ColumnName) -> &mut Vec<Task> {
        match name {
            ColumnName::Todo => &mut self.todo,
            ColumnName::InProgress => &mut self.in_progress,
            ColumnName::Done => &mut self.done,
        }
    }

    pub fn columns(&self) -> impl Iterator<Item = (ColumnName, &[Task])> {
        ColumnName::ALL.into_iter().map(|name| (name, self.column(name)))
    }

    /// Locate a task by id across all columns.
    pub fn find_task(&self, id: &str) -> Option<(ColumnName, usize, &Task)> {
        self.columns().find_map(|(name, tasks)| {
            tasks
                .iter()
                .position(|t| t.id == id)
                .map(|idx| (name, idx, &tasks[idx]))
        })
    }

    pub fn task_count(&self) -> usize {
        self.todo.len() + self.in_progress.len() + self.done.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn board_wire_field_names() {
        let mut board = Board::default();
        board
            .in_progress
            .push(Task::new("7", "Ship it", Urgency::High, date(2025, 1, 1)));

        let json = serde_json::to_value(&board).unwrap();
        assert!(json.get("inProgress").is_some());
        assert!(json.get("todo").is_some());
        assert!(json.get("done").is_some());

        let task = &json["inProgress"][0];
        assert_eq!(task["urgency"], "high");
        assert_eq!(task["deadline"], "2025-01-01");
        assert!(task.get("createdAt").is_some());
    }

    #[test]
    fn task_defaults_tolerate_sparse_payloads() {
        // Early clients created tasks with only id/content/createdAt.
        let task: Task = serde_json::from_str(
            r#"{"id":"1","content":"Write spec","createdAt":"1/1/2025, 10:00:00 AM"}"#,
        )
        .unwrap();
        assert_eq!(task.urgency, Urgency::Medium);
        assert_eq!(task.deadline, None);
    }

    #[test]
    fn partial_board_payload_fills_missing_columns() {
        // The reference accepted whatever the sender shipped; a payload
        // missing a column becomes that column empty, not a parse error.
        let board: Board = serde_json::from_str(r#"{"todo":[]}"#).unwrap();
        assert!(board.in_progress.is_empty());
        assert!(board.done.is_empty());
    }

    #[test]
    fn find_task_scans_every_column() {
        let mut board = Board::default();
        board.todo.push(Task::new("a", "one", Urgency::Low, date(2025, 3, 1)));
        board.done.push(Task::new("b", "two", Urgency::Medium, date(2025, 3, 2)));

        let (col, idx, task) = board.find_task("b").unwrap();
        assert_eq!(col, ColumnName::Done);
        assert_eq!(idx, 0);
        assert_eq!(task.content, "two");
        assert!(board.find_task("missing").is_none());
    }

    #[test]
    fn content_limit() {
        let mut task = Task::new("1", "x".repeat(CONTENT_LIMIT), Urgency::Low, date(2025, 1, 1));
        assert!(task.content_within_limit());
        task.content.push('y');
        assert!(!task.content_within_limit());
    }
}
