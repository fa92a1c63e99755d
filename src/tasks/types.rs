use serde::Deserialize;

/// A task as reported by `task export`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Task {
    /// Working-set id (0 for completed or deleted tasks).
    #[serde(default)]
    pub id: u32,
    pub uuid: String,
    pub description: String,
    #[serde(default)]
    pub status: Status,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Pending,
    Waiting,
    Recurring,
    Completed,
    Deleted,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_export_entry() {
        let json = r#"{
            "id": 7,
            "description": "Write report",
            "entry": "20240101T100000Z",
            "modified": "20240101T100000Z",
            "project": "work",
            "status": "pending",
            "uuid": "0b7b1d1e-4c4e-4d5e-9a7b-3f1e2d3c4b5a",
            "urgency": 1.9
        }"#;

        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.id, 7);
        assert_eq!(task.description, "Write report");
        assert_eq!(task.status, Status::Pending);
    }

    #[test]
    fn test_deserialize_minimal() {
        let json = r#"{"uuid": "abc", "description": "x"}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.id, 0);
        assert_eq!(task.status, Status::Pending);
    }
}
