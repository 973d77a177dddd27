// [tests/mirror/libs/domain/models/serialization.test.rs]
#[cfg(test)]
mod tests {
    use chrono::Utc;
    use iris_domain_models::*;
    use uuid::Uuid;

    #[test]
    fn account_status_round_trips_through_json() {
        let json = serde_json::to_string(&AccountStatus::Suspended).unwrap();
        assert_eq!(json, "\"suspended\"");
        let back: AccountStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(back, AccountStatus::Suspended);
    }

    #[test]
    fn task_round_trips_through_json() {
        let task = Task {
            id: Uuid::new_v4(),
            principal_id: "client-1".into(),
            mode: TaskMode::Subtasks,
            difficulty: Difficulty::Complex,
            original_prompt: "hello".into(),
            final_response: None,
            status: TaskStatus::Pending,
            has_files: false,
            created_at: Utc::now(),
            completed_at: None,
        };
        let json = serde_json::to_string(&task).unwrap();
        let back: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, task.id);
        assert_eq!(back.status, TaskStatus::Pending);
    }

    #[test]
    fn stream_chunk_tags_discriminate_variants() {
        let done = StreamChunk::Done { final_response: "42".into() };
        let json = serde_json::to_value(&done).unwrap();
        assert_eq!(json["type"], "done");
        assert!(done.is_terminal());

        let chunk = StreamChunk::Chunk { content: "partial".into() };
        assert!(!chunk.is_terminal());
    }
}
