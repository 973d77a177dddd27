// [tests/mirror/apps/worker-sim/uplink_frame_shape.test.rs]
#[cfg(test)]
mod tests {
    use clap::Parser;
    use iris_core_crypto_envelope::{open, seal, Keypair};
    use iris_core_wire_protocol::{decode, encode, Frame, FrameBody, NodeRegisterPayload, TaskAssignPayload, TaskResultPayload};
    use iris_worker_sim::config::WorkerConfig;
    use iris_worker_sim::uplink::WorkerUplink;
    use uuid::Uuid;

    fn sample_register_frame() -> Frame {
        Frame::new(FrameBody::NodeRegister(NodeRegisterPayload {
            node_id: "worker-sim-alpha".to_string(),
            account_key: Some("1111-2222-3333-4444".to_string()),
            enrollment_token: None,
            public_key: Keypair::generate().public_base64(),
            model_name: "llama-3-8b-instruct".to_string(),
            max_context: 8192,
            vram_gb: 16.0,
            gpu_name: "RTX 4070".to_string(),
            model_params_b: 8.0,
            quant: "Q4_K_M".to_string(),
            tokens_per_second: 40.0,
            supports_vision: false,
        }))
    }

    #[test]
    fn a_node_register_frame_round_trips_through_the_wire_codec() {
        let frame = sample_register_frame();
        let encoded = encode(&frame).unwrap();
        let decoded = decode(&encoded).unwrap();

        match decoded.body {
            FrameBody::NodeRegister(payload) => {
                assert_eq!(payload.node_id, "worker-sim-alpha");
                assert_eq!(payload.account_key.as_deref(), Some("1111-2222-3333-4444"));
                assert!(payload.enrollment_token.is_none());
                assert_eq!(payload.max_context, 8192);
            }
            other => panic!("expected node_register, got {other:?}"),
        }
    }

    #[test]
    fn a_sealed_task_prompt_can_be_opened_by_the_intended_worker() {
        let coordinator = Keypair::generate();
        let worker = Keypair::generate();

        let enc_prompt = seal(&coordinator.private, &worker.public, b"summarize this document").unwrap();
        let payload = TaskAssignPayload {
            subtask_id: Uuid::new_v4(),
            task_id: Uuid::new_v4(),
            enc_prompt,
            timeout_s: 30,
            enable_streaming: false,
            files: None,
        };

        let plaintext = open(&worker.private, &coordinator.public, &payload.enc_prompt).unwrap();
        assert_eq!(plaintext, b"summarize this document");
    }

    #[test]
    fn a_sealed_task_result_can_be_opened_back_by_the_coordinator() {
        let coordinator = Keypair::generate();
        let worker = Keypair::generate();

        let enc_response = seal(&worker.private, &coordinator.public, b"the document discusses X, Y, Z").unwrap();
        let payload = TaskResultPayload {
            subtask_id: Uuid::new_v4(),
            task_id: Uuid::new_v4(),
            enc_response,
            execution_time_ms: 120,
        };

        let plaintext = open(&coordinator.private, &worker.public, &payload.enc_response).unwrap();
        assert_eq!(plaintext, b"the document discusses X, Y, Z");
    }

    #[test]
    fn a_foreign_keypair_cannot_open_a_sealed_prompt() {
        let coordinator = Keypair::generate();
        let worker = Keypair::generate();
        let eavesdropper = Keypair::generate();

        let enc_prompt = seal(&coordinator.private, &worker.public, b"secret task").unwrap();
        let result = open(&eavesdropper.private, &coordinator.public, &enc_prompt);
        assert!(result.is_err());
    }

    #[test]
    fn the_worker_keypair_persists_across_process_restarts() {
        let dir = tempfile::tempdir().unwrap();
        let keypair_path = dir.path().join("worker.key");

        let config = WorkerConfig::try_parse_from(["worker-sim", "--coordinator-url", "ws://localhost:3000/worker/socket"]).unwrap();
        let mut first_config = config.clone();
        first_config.keypair_path = keypair_path.clone();
        let first_uplink = WorkerUplink::new(first_config).unwrap();

        let mut second_config = config;
        second_config.keypair_path = keypair_path;
        let second_uplink = WorkerUplink::new(second_config).unwrap();

        // Re-loading the same keypair path must yield the same identity, since the
        // coordinator's node census keys nodes by the public key presented at registration.
        assert_eq!(first_uplink.public_key_base64(), second_uplink.public_key_base64());
    }
}
