// [tests/mirror/libs/infra/store/task_lifecycle.test.rs]
#[cfg(test)]
mod tests {
    use iris_domain_models::{Difficulty, Subtask, SubtaskStatus, Task, TaskMode, TaskStatus};
    use iris_infra_store::{StoreClient, TaskRepository};
    use uuid::Uuid;

    async fn memory_client() -> StoreClient {
        StoreClient::connect(":memory:", None).await.unwrap()
    }

    fn sample_task() -> Task {
        Task {
            id: Uuid::new_v4(),
            principal_id: "acct-123".to_string(),
            mode: TaskMode::Subtasks,
            difficulty: Difficulty::Complex,
            original_prompt: "Compare X, Y and Z.".to_string(),
            final_response: None,
            status: TaskStatus::Pending,
            has_files: false,
            created_at: chrono::Utc::now(),
            completed_at: None,
        }
    }

    #[tokio::test]
    async fn insert_then_advance_to_completed() {
        let client = memory_client().await;
        let repo = TaskRepository::new(&client);
        let task = sample_task();
        repo.insert(&task).await.unwrap();

        repo.update_status(task.id, TaskStatus::Processing).await.unwrap();
        repo.finalize(task.id, TaskStatus::Completed, Some("done".to_string()), chrono::Utc::now())
            .await
            .unwrap();

        let found = repo.find_by_id(task.id).await.unwrap().unwrap();
        assert!(matches!(found.status, TaskStatus::Completed));
        assert_eq!(found.final_response.as_deref(), Some("done"));
        assert!(found.completed_at.is_some());
    }

    #[tokio::test]
    async fn subtask_assignment_and_completion_round_trips() {
        let client = memory_client().await;
        let repo = TaskRepository::new(&client);
        let task = sample_task();
        repo.insert(&task).await.unwrap();

        let subtask = Subtask {
            id: Uuid::new_v4(),
            task_id: task.id,
            node_id: None,
            prompt: "Analyze X.".to_string(),
            response: None,
            status: SubtaskStatus::Pending,
            assigned_at: None,
            completed_at: None,
            execution_time_ms: None,
        };
        repo.insert_subtask(&subtask).await.unwrap();
        repo.assign_subtask(subtask.id, "node-a", chrono::Utc::now()).await.unwrap();
        repo.complete_subtask(subtask.id, "X is ...".to_string(), 1200, chrono::Utc::now())
            .await
            .unwrap();

        let subtasks = repo.list_subtasks_for_task(task.id).await.unwrap();
        assert_eq!(subtasks.len(), 1);
        assert!(subtasks[0].invariant_holds());
        assert_eq!(subtasks[0].node_id.as_deref(), Some("node-a"));
    }

    #[tokio::test]
    async fn completing_unknown_subtask_is_not_found() {
        let client = memory_client().await;
        let repo = TaskRepository::new(&client);
        let result = repo.complete_subtask(Uuid::new_v4(), "x".to_string(), 10, chrono::Utc::now()).await;
        assert!(result.is_err());
    }
}
