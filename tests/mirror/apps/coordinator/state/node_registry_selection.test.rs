// [tests/mirror/apps/coordinator/state/node_registry_selection.test.rs]
#[cfg(test)]
mod tests {
    use chrono::Utc;
    use iris_coordinator::state::node_registry::NodeRegistry;
    use iris_domain_models::{Difficulty, Node, Tier};
    use tokio::sync::mpsc;

    fn sample_node(id: &str, tier: Tier, reputation: f64, supports_vision: bool) -> Node {
        let now = Utc::now();
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
            supports_vision,
            reputation,
            tasks_completed: 0,
            created_at: now,
            last_seen_at: now,
        }
    }

    fn register_online(registry: &NodeRegistry, node: Node) {
        let (sender, _receiver) = mpsc::channel(8);
        let id = node.id.clone();
        registry.register(node, sender);
        registry.record_heartbeat(&id, Utc::now());
    }

    #[test]
    fn selects_none_when_no_candidates_are_online() {
        let registry = NodeRegistry::new();
        let selection = registry.select_worker(Difficulty::Simple, false, &[], |_| false);
        assert!(selection.is_none());
    }

    #[test]
    fn excludes_nodes_already_tried_for_this_subtask() {
        let registry = NodeRegistry::new();
        register_online(&registry, sample_node("node-a", Tier::Premium, 100.0, false));

        let selection = registry.select_worker(Difficulty::Simple, false, &["node-a".to_string()], |_| false);
        assert!(selection.is_none());
    }

    #[test]
    fn vision_tasks_never_select_a_non_vision_worker() {
        let registry = NodeRegistry::new();
        register_online(&registry, sample_node("node-a", Tier::Premium, 100.0, false));

        let selection = registry.select_worker(Difficulty::Advanced, true, &[], |_| false);
        assert!(selection.is_none());
        assert!(!registry.has_online_vision_worker());
    }

    #[test]
    fn an_open_circuit_breaker_removes_a_node_from_selection() {
        let registry = NodeRegistry::new();
        register_online(&registry, sample_node("node-a", Tier::Premium, 100.0, false));

        let selection = registry.select_worker(Difficulty::Simple, false, &[], |id| id == "node-a");
        assert!(selection.is_none());
    }

    #[test]
    fn a_lone_capable_candidate_always_wins() {
        let registry = NodeRegistry::new();
        register_online(&registry, sample_node("node-a", Tier::Premium, 100.0, true));

        let selection = registry.select_worker(Difficulty::Advanced, true, &[], |_| false);
        assert_eq!(selection.unwrap().node_id, "node-a");
    }

    #[test]
    fn online_node_ids_only_lists_heartbeating_nodes() {
        let registry = NodeRegistry::new();
        register_online(&registry, sample_node("node-a", Tier::Basic, 100.0, false));
        let (sender, _receiver) = mpsc::channel(8);
        registry.register(sample_node("node-b", Tier::Basic, 100.0, false), sender);
        registry.disconnect("node-b");

        let online = registry.online_node_ids();
        assert_eq!(online, vec!["node-a".to_string()]);
        assert_eq!(registry.online_count(), 1);
    }
}
