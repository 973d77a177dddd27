// [tests/mirror/apps/coordinator/state/stream_hub.test.rs]
#[cfg(test)]
mod tests {
    use iris_coordinator::state::stream_hub::StreamHub;
    use iris_domain_models::StreamChunk;
    use uuid::Uuid;

    #[tokio::test]
    async fn chunks_arrive_in_order_followed_by_a_terminal_done() {
        let hub = StreamHub::new();
        let task_id = Uuid::new_v4();
        let mut receiver = hub.create(task_id);

        hub.push_chunk(task_id, "hello".to_string()).await;
        hub.push_chunk(task_id, " world".to_string()).await;
        hub.complete(task_id, "hello world".to_string()).await;

        match receiver.recv().await.unwrap() {
            StreamChunk::Chunk { content } => assert_eq!(content, "hello"),
            other => panic!("expected a chunk, got {other:?}"),
        }
        match receiver.recv().await.unwrap() {
            StreamChunk::Chunk { content } => assert_eq!(content, " world"),
            other => panic!("expected a chunk, got {other:?}"),
        }
        let terminal = receiver.recv().await.unwrap();
        assert!(terminal.is_terminal());
        match terminal {
            StreamChunk::Done { final_response } => assert_eq!(final_response, "hello world"),
            other => panic!("expected Done, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn fail_delivers_a_terminal_error_chunk() {
        let hub = StreamHub::new();
        let task_id = Uuid::new_v4();
        let mut receiver = hub.create(task_id);

        hub.fail(task_id, "worker crashed".to_string()).await;

        let terminal = receiver.recv().await.unwrap();
        assert!(terminal.is_terminal());
        match terminal {
            StreamChunk::Error { message } => assert_eq!(message, "worker crashed"),
            other => panic!("expected Error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn pushing_to_a_task_with_no_session_is_a_silent_no_op() {
        let hub = StreamHub::new();
        // No `create` call ever happened for this id; nothing should panic.
        hub.push_chunk(Uuid::new_v4(), "orphaned".to_string()).await;
    }

    #[tokio::test]
    async fn a_dropped_receiver_does_not_fail_subsequent_pushes() {
        let hub = StreamHub::new();
        let task_id = Uuid::new_v4();
        let receiver = hub.create(task_id);
        drop(receiver);

        hub.push_chunk(task_id, "into the void".to_string()).await;
        hub.complete(task_id, "done".to_string()).await;
    }

    #[tokio::test]
    async fn sweeping_immediately_after_creation_purges_nothing() {
        let hub = StreamHub::new();
        hub.create(Uuid::new_v4());
        hub.create(Uuid::new_v4());

        assert_eq!(hub.sweep_expired(), 0);
    }
}
