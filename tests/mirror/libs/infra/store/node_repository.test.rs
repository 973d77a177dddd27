// [tests/mirror/libs/infra/store/node_repository.test.rs]
#[cfg(test)]
mod tests {
    use iris_domain_models::node::tier_from_capabilities;
    use iris_domain_models::{Node, Tier};
    use iris_infra_store::{NodeRepository, StoreClient};

    async fn memory_client() -> StoreClient {
        StoreClient::connect(":memory:", None).await.unwrap()
    }

    fn sample_node(id: &str) -> Node {
        let now = chrono::Utc::now();
        let tier = tier_from_capabilities(24.0, 70.0, 50.0);
        Node {
            id: id.to_string(),
            account_id: None,
            public_key: "base64-pubkey".to_string(),
            model_name: "llama-3-70b".to_string(),
            max_context: 8192,
            vram_gb: 24.0,
            gpu_name: "RTX 4090".to_string(),
            model_params_b: 70.0,
            quant: "Q4_K_M".to_string(),
            tokens_per_second: 50.0,
            tier,
            supports_vision: false,
            reputation: 100.0,
            tasks_completed: 0,
            created_at: now,
            last_seen_at: now,
        }
    }

    #[tokio::test]
    async fn upsert_then_find_round_trips_tier_and_capabilities() {
        let client = memory_client().await;
        let repo = NodeRepository::new(&client);
        let node = sample_node("node-a");

        repo.upsert(&node).await.unwrap();
        let found = repo.find_by_id("node-a").await.unwrap().unwrap();
        assert_eq!(found.tier, Tier::Premium);
        assert_eq!(found.model_name, "llama-3-70b");
    }

    #[tokio::test]
    async fn upsert_is_idempotent_and_updates_capabilities() {
        let client = memory_client().await;
        let repo = NodeRepository::new(&client);
        let mut node = sample_node("node-b");
        repo.upsert(&node).await.unwrap();

        node.vram_gb = 8.0;
        node.model_params_b = 7.0;
        node.tokens_per_second = 10.0;
        node.tier = tier_from_capabilities(node.vram_gb, node.model_params_b, node.tokens_per_second);
        repo.upsert(&node).await.unwrap();

        let found = repo.find_by_id("node-b").await.unwrap().unwrap();
        assert_eq!(found.tier, Tier::Standard);

        let all = repo.list_all().await.unwrap();
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn update_reputation_on_unknown_node_is_not_found() {
        let client = memory_client().await;
        let repo = NodeRepository::new(&client);
        let result = repo.update_reputation("ghost", 90.0, 1).await;
        assert!(result.is_err());
    }
}
