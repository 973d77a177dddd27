// [tests/mirror/apps/worker-sim/config.test.rs]
#[cfg(test)]
mod tests {
    use clap::Parser;
    use iris_worker_sim::config::WorkerConfig;

    #[test]
    fn only_the_coordinator_url_is_required() {
        let config = WorkerConfig::parse_from(["worker-sim", "--coordinator-url", "ws://localhost:3000/worker/socket"]);

        assert_eq!(config.coordinator_url, "ws://localhost:3000/worker/socket");
        assert_eq!(config.node_id, "worker-sim-alpha");
        assert_eq!(config.model_name, "llama-3-8b-instruct");
        assert_eq!(config.max_context, 8192);
        assert_eq!(config.heartbeat_interval_secs, 20);
        assert_eq!(config.simulated_latency_ms, 200);
        assert!(!config.supports_vision);
        assert!(config.account_key.is_none());
        assert!(config.enrollment_token.is_none());
    }

    #[test]
    fn missing_the_coordinator_url_is_rejected() {
        let result = WorkerConfig::try_parse_from(["worker-sim"]);
        assert!(result.is_err());
    }

    #[test]
    fn explicit_flags_override_every_default() {
        let config = WorkerConfig::parse_from([
            "worker-sim",
            "--coordinator-url",
            "wss://iris.example.com/worker/socket",
            "--node-id",
            "gpu-rig-07",
            "--account-key",
            "1111-2222-3333-4444",
            "--model-name",
            "mixtral-8x7b",
            "--max-context",
            "32768",
            "--vram-gb",
            "48.0",
            "--supports-vision",
            "--heartbeat-interval-secs",
            "5",
            "--simulated-latency-ms",
            "10",
        ]);

        assert_eq!(config.node_id, "gpu-rig-07");
        assert_eq!(config.account_key.as_deref(), Some("1111-2222-3333-4444"));
        assert_eq!(config.model_name, "mixtral-8x7b");
        assert_eq!(config.max_context, 32768);
        assert_eq!(config.vram_gb, 48.0);
        assert!(config.supports_vision);
        assert_eq!(config.heartbeat_interval_secs, 5);
        assert_eq!(config.simulated_latency_ms, 10);
    }

    #[test]
    fn an_enrollment_token_can_be_supplied_instead_of_an_account_key() {
        let config = WorkerConfig::parse_from([
            "worker-sim",
            "--coordinator-url",
            "ws://localhost:3000/worker/socket",
            "--enrollment-token",
            "one-shot-token",
        ]);

        assert!(config.account_key.is_none());
        assert_eq!(config.enrollment_token.as_deref(), Some("one-shot-token"));
    }
}
