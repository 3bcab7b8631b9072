use serde::{Deserialize, Serialize};

use crate::board::{Board, TaskId};
use crate::hub::presence::InteractionMap;

/// Events a participant sends to the hub.
///
/// Every frame on the wire is one JSON object of the form
/// `{"event": <name>, "data": <payload>}`. A `task-update` always carries
/// the sender's complete local board, never a delta.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ClientEvent {
    TaskUpdate(Board),
    InteractTask {
        #[serde(rename = "taskId")]
        task_id: TaskId,
    },
    StopInteractTask {
        #[serde(rename = "taskId")]
        task_id: TaskId,
    },
}

/// Events the hub sends to participants. Board and interaction payloads
/// are full snapshots, so a missed broadcast is recovered by the next one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ServerEvent {
    UpdateBoard(Board),
    HighlightTask(InteractionMap),
    ClientCount(usize),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Task, Urgency};
    use chrono::NaiveDate;

    #[test]
    fn client_event_names_match_the_wire() {
        let interact = ClientEvent::InteractTask { task_id: "1".into() };
        let json = serde_json::to_value(&interact).unwrap();
        assert_eq!(json["event"], "interact-task");
        assert_eq!(json["data"]["taskId"], "1");

        let stop = ClientEvent::StopInteractTask { task_id: "1".into() };
        assert_eq!(serde_json::to_value(&stop).unwrap()["event"], "stop-interact-task");

        let update = ClientEvent::TaskUpdate(Board::default());
        assert_eq!(serde_json::to_value(&update).unwrap()["event"], "task-update");
    }

    #[test]
    fn server_event_names_match_the_wire() {
        let count = ServerEvent::ClientCount(3);
        let json = serde_json::to_value(&count).unwrap();
        assert_eq!(json["event"], "client-count");
        assert_eq!(json["data"], 3);

        let board = ServerEvent::UpdateBoard(Board::default());
        assert_eq!(serde_json::to_value(&board).unwrap()["event"], "update-board");

        let mut map = InteractionMap::new();
        map.insert("1".into(), "p1".into());
        let highlight = ServerEvent::HighlightTask(map);
        let json = serde_json::to_value(&highlight).unwrap();
        assert_eq!(json["event"], "highlight-task");
        assert_eq!(json["data"]["1"], "p1");
    }

    #[test]
    fn task_update_parses_a_full_board_payload() {
        let frame = r#"{
            "event": "task-update",
            "data": {
                "todo": [{"id":"1","content":"Write spec","urgency":"high","deadline":"2025-01-01","createdAt":"x"}],
                "inProgress": [],
                "done": []
            }
        }"#;

        let event: ClientEvent = serde_json::from_str(frame).unwrap();
        let ClientEvent::TaskUpdate(board) = event else {
            panic!("expected task-update");
        };
        assert_eq!(board.todo.len(), 1);
        assert_eq!(board.todo[0].urgency, Urgency::High);
        assert_eq!(
            board.todo[0].deadline,
            NaiveDate::from_ymd_opt(2025, 1, 1)
        );
    }

    #[test]
    fn unknown_event_names_fail_to_parse() {
        let frame = r#"{"event":"drop-table","data":{}}"#;
        assert!(serde_json::from_str::<ClientEvent>(frame).is_err());
    }

    #[test]
    fn board_payload_round_trips_through_a_frame() {
        let mut board = Board::default();
        board.todo.push(Task::new(
            "9",
            "Review sync hub",
            Urgency::Low,
            NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
        ));
        let sent = ServerEvent::UpdateBoard(board.clone());

        let text = serde_json::to_string(&sent).unwrap();
        let received: ServerEvent = serde_json::from_str(&text).unwrap();
        assert_eq!(received, ServerEvent::UpdateBoard(board));
    }
}
