// [tests/mirror/apps/coordinator/services/task_orchestrator.test.rs]
#[cfg(test)]
mod tests {
    use std::time::Duration;

    use chrono::Utc;
    use iris_core_crypto_envelope::Keypair;
    use iris_core_wire_protocol::{Frame, FrameBody};
    use iris_coordinator::services::task_orchestrator::TaskOrchestrator;
    use iris_coordinator::state::subtask_signals::SubtaskOutcome;
    use iris_coordinator::state::AppState;
    use iris_domain_models::node::INITIAL_REPUTATION;
    use iris_domain_models::{Difficulty, Node, TaskMode, TaskStatus, Tier};
    use iris_infra_store::repositories::TaskRepository;
    use iris_infra_store::StoreClient;
    use tokio::sync::mpsc;

    async fn memory_state() -> AppState {
        let store = StoreClient::connect(":memory:", None).await.unwrap();
        let keypair = Keypair::generate();
        AppState::new(store, keypair, "test-secret".to_string())
    }

    fn register_worker(state: &AppState, id: &str, supports_vision: bool) -> mpsc::Receiver<Frame> {
        let (sender, receiver) = mpsc::channel(16);
        let worker_keypair = Keypair::generate();
        let now = Utc::now();
        let node = Node {
            id: id.to_string(),
            account_id: None,
            public_key: worker_keypair.public_base64(),
            model_name: "llama-3-8b".to_string(),
            max_context: 8192,
            vram_gb: 16.0,
            gpu_name: "RTX 4070".to_string(),
            model_params_b: 8.0,
            quant: "Q4_K_M".to_string(),
            tokens_per_second: 40.0,
            tier: Tier::Basic,
            supports_vision,
            reputation: INITIAL_REPUTATION,
            tasks_completed: 0,
            created_at: now,
            last_seen_at: now,
        };
        state.node_registry.register(node, sender);
        state.node_registry.record_heartbeat(id, Utc::now());
        receiver
    }

    async fn await_terminal_status(state: &AppState, task_id: uuid::Uuid) -> iris_domain_models::Task {
        let task_repo = TaskRepository::new(&state.store);
        for _ in 0..100 {
            if let Some(task) = task_repo.find_by_id(task_id).await.unwrap() {
                if matches!(task.status, TaskStatus::Completed | TaskStatus::Partial | TaskStatus::Failed) {
                    return task;
                }
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        panic!("task {task_id} never reached a terminal status");
    }

    #[tokio::test]
    async fn a_single_subtask_completes_once_the_worker_replies() {
        let state = memory_state().await;
        let mut receiver = register_worker(&state, "worker-1", false);

        let signals = state.subtask_signals.clone();
        tokio::spawn(async move {
            if let Some(frame) = receiver.recv().await {
                if let FrameBody::TaskAssign(payload) = frame.body {
                    signals.deliver(
                        payload.subtask_id,
                        SubtaskOutcome::Completed { response: "42".to_string(), execution_time_ms: 120 },
                    );
                }
            }
        });

        let orchestrator = TaskOrchestrator::new(&state);
        let task_id = orchestrator
            .submit(
                "principal-1".to_string(),
                "what is six times seven".to_string(),
                TaskMode::Subtasks,
                false,
                Some(Difficulty::Simple),
                false,
            )
            .await
            .unwrap();

        let task = await_terminal_status(&state, task_id).await;
        assert_eq!(task.status, TaskStatus::Completed);
        assert_eq!(task.final_response.as_deref(), Some("42"));
    }

    #[tokio::test]
    async fn a_task_with_files_and_no_vision_worker_fails_immediately() {
        let state = memory_state().await;
        register_worker(&state, "worker-1", false);

        let orchestrator = TaskOrchestrator::new(&state);
        let task_id = orchestrator
            .submit(
                "principal-1".to_string(),
                "describe this image".to_string(),
                TaskMode::Subtasks,
                true,
                None,
                false,
            )
            .await
            .unwrap();

        let task_repo = TaskRepository::new(&state.store);
        let task = task_repo.find_by_id(task_id).await.unwrap().unwrap();
        assert_eq!(task.status, TaskStatus::Failed);
        assert!(task.final_response.is_none());
    }

    #[tokio::test]
    async fn streaming_is_enabled_only_when_the_prompt_yields_a_single_subtask() {
        let state = memory_state().await;
        let mut receiver = register_worker(&state, "worker-1", false);

        let orchestrator = TaskOrchestrator::new(&state);
        orchestrator
            .submit(
                "principal-1".to_string(),
                "summarize this single short prompt".to_string(),
                TaskMode::Subtasks,
                false,
                Some(Difficulty::Simple),
                true,
            )
            .await
            .unwrap();

        let frame = receiver.recv().await.expect("the worker must receive a task assignment");
        match frame.body {
            FrameBody::TaskAssign(payload) => assert!(payload.enable_streaming),
            other => panic!("expected TaskAssign, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn streaming_is_disabled_when_the_prompt_splits_into_multiple_subtasks() {
        let state = memory_state().await;
        let mut receiver = register_worker(&state, "worker-1", false);

        let orchestrator = TaskOrchestrator::new(&state);
        orchestrator
            .submit(
                "principal-1".to_string(),
                "Do the following:\n1. Write a poem\n2. Translate it to French".to_string(),
                TaskMode::Subtasks,
                false,
                Some(Difficulty::Simple),
                true,
            )
            .await
            .unwrap();

        let frame = receiver.recv().await.expect("the worker must receive the first task assignment");
        match frame.body {
            FrameBody::TaskAssign(payload) => assert!(!payload.enable_streaming),
            other => panic!("expected TaskAssign, got {other:?}"),
        }
    }
}
