// [tests/mirror/apps/coordinator/lib_structure.test.rs]
#[cfg(test)]
mod tests {
    use iris_coordinator::prelude::*;

    #[tokio::test]
    async fn app_state_wires_a_lexical_classifier_by_default() {
        std::env::remove_var("CLASSIFIER_API_URL");

        let store = iris_infra_store::StoreClient::connect(":memory:", None).await.unwrap();
        let keypair = iris_core_crypto_envelope::Keypair::generate();
        let state = AppState::new(store, keypair, "test-secret".to_string());

        assert_eq!(state.node_registry.online_count(), 0);
    }

    #[tokio::test]
    async fn coordinator_kernel_ignites_against_an_in_memory_store() {
        let temp_dir = tempfile::tempdir().unwrap();
        let keypair_path = temp_dir.path().join("coordinator.key");
        let kernel = CoordinatorKernel::ignite(":memory:", None, 0, &keypair_path, "test-secret".to_string()).await;
        assert_eq!(kernel.server_port, 0);
        assert!(keypair_path.exists());
    }
}
