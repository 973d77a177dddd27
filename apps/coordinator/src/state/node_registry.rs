// [apps/coordinator/src/state/node_registry.rs]
/*!
 * APARATO: NODE REGISTRY (V1.0)
 * RESPONSABILIDAD: CENSO DE WORKERS CONECTADOS, LATIDOS Y SELECCIÓN SED+P2C
 *
 * La selección implementa la variante canónica descrita en las notas de
 * diseño: Shortest Expected Delay combinado con Power-of-Two-Choices,
 * ponderado por reputación, afinidad de estrato y una componente de
 * exploración aleatoria.
 */

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use iris_core_wire_protocol::Frame;
use iris_domain_models::{Difficulty, Node, Tier};
use rand::Rng;
use tokio::sync::mpsc;
use tracing::{debug, instrument, warn};

/// A node is considered online only if a heartbeat arrived within this window.
/// There is no background reaper; liveness is evaluated lazily at selection time.
pub const HEARTBEAT_LIVENESS_WINDOW_SECS: i64 = 90;

/// Tier-affinity matrix M[tier][difficulty], per the capability-to-demand scoring table.
const TIER_DIFFICULTY_MATRIX: [[f64; 3]; 3] = [
    [1.0, 0.6, 0.2], // Basic    x [Simple, Complex, Advanced]
    [0.8, 1.0, 0.7], // Standard
    [0.5, 0.9, 1.0], // Premium
];

pub struct ConnectedRuntime {
    pub sender: mpsc::Sender<Frame>,
    pub current_load: u32,
    pub latency_ms: f64,
    pub last_heartbeat_at: DateTime<Utc>,
}

struct RegisteredNode {
    node: Node,
    connection: Option<ConnectedRuntime>,
}

#[derive(Debug, Clone)]
pub struct SelectedWorker {
    pub node_id: String,
    pub sender: mpsc::Sender<Frame>,
}

pub struct NodeRegistry {
    nodes: RwLock<HashMap<String, RegisteredNode>>,
}

impl NodeRegistry {
    pub fn new() -> Self {
        Self { nodes: RwLock::new(HashMap::new()) }
    }

    /// Registers a fresh worker or re-registers a returning one, replacing its
    /// channel on reconnect so any orphaned sender task winds down on its own.
    #[instrument(skip(self, node, sender))]
    pub fn register(&self, mut node: Node, sender: mpsc::Sender<Frame>) {
        node.recompute_tier();
        let now = Utc::now();
        let mut nodes = self.nodes.write().expect("node registry lock poisoned");
        nodes.insert(
            node.id.clone(),
            RegisteredNode {
                node,
                connection: Some(ConnectedRuntime {
                    sender,
                    current_load: 0,
                    latency_ms: 0.0,
                    last_heartbeat_at: now,
                }),
            },
        );
    }

    pub fn disconnect(&self, node_id: &str) {
        let mut nodes = self.nodes.write().expect("node registry lock poisoned");
        if let Some(entry) = nodes.get_mut(node_id) {
            entry.connection = None;
        }
    }

    /// Updates the latency EMA per heartbeat round-trip: `lat = 0.3*rtt + 0.7*lat_prev`,
    /// clamped to [0, 5000]ms.
    #[instrument(skip(self))]
    pub fn record_heartbeat(&self, node_id: &str, sent_at: DateTime<Utc>) -> bool {
        let now = Utc::now();
        let rtt_ms = (now - sent_at).num_milliseconds().max(0) as f64;
        let mut nodes = self.nodes.write().expect("node registry lock poisoned");
        let Some(entry) = nodes.get_mut(node_id) else {
            warn!(node_id, "heartbeat from unregistered node");
            return false;
        };
        let Some(connection) = entry.connection.as_mut() else {
            return false;
        };
        connection.latency_ms = (0.3 * rtt_ms + 0.7 * connection.latency_ms).clamp(0.0, 5000.0);
        connection.last_heartbeat_at = now;
        entry.node.last_seen_at = now;
        true
    }

    pub fn get_node(&self, node_id: &str) -> Option<Node> {
        self.nodes.read().expect("node registry lock poisoned").get(node_id).map(|e| e.node.clone())
    }

    pub fn update_reputation(&self, node_id: &str, reputation: f64, tasks_completed: u64) {
        let mut nodes = self.nodes.write().expect("node registry lock poisoned");
        if let Some(entry) = nodes.get_mut(node_id) {
            entry.node.reputation = reputation;
            entry.node.tasks_completed = tasks_completed;
        }
    }

    pub fn increment_load(&self, node_id: &str, delta: i32) {
        let mut nodes = self.nodes.write().expect("node registry lock poisoned");
        if let Some(connection) = nodes.get_mut(node_id).and_then(|e| e.connection.as_mut()) {
            connection.current_load = (connection.current_load as i32 + delta).max(0) as u32;
        }
    }

    fn is_online(connection: &ConnectedRuntime, now: DateTime<Utc>) -> bool {
        (now - connection.last_heartbeat_at).num_seconds() < HEARTBEAT_LIVENESS_WINDOW_SECS
    }

    /// SED + P2C worker selection, per the capability/demand scoring policy.
    /// Returns `None` when no online, non-excluded, breaker-closed, capability-matching
    /// candidate exists.
    #[instrument(skip(self, is_breaker_open))]
    pub fn select_worker(
        &self,
        difficulty: Difficulty,
        requires_vision: bool,
        excluded: &[String],
        is_breaker_open: impl Fn(&str) -> bool,
    ) -> Option<SelectedWorker> {
        let now = Utc::now();
        let nodes = self.nodes.read().expect("node registry lock poisoned");

        let candidates: Vec<(&str, &Node, &ConnectedRuntime)> = nodes
            .values()
            .filter_map(|entry| {
                let connection = entry.connection.as_ref()?;
                if !Self::is_online(connection, now) {
                    return None;
                }
                if excluded.iter().any(|id| id == &entry.node.id) {
                    return None;
                }
                if requires_vision && !entry.node.supports_vision {
                    return None;
                }
                if is_breaker_open(&entry.node.id) {
                    return None;
                }
                Some((entry.node.id.as_str(), &entry.node, connection))
            })
            .collect();

        if candidates.is_empty() {
            debug!("no capable candidates for selection");
            return None;
        }

        let winner = if candidates.len() == 1 {
            candidates[0]
        } else {
            let max_reputation =
                candidates.iter().map(|c| c.1.reputation).fold(0.0_f64, f64::max).max(1.0);
            let mut rng = rand::thread_rng();
            let first = candidates[rng.gen_range(0..candidates.len())];
            let mut second = candidates[rng.gen_range(0..candidates.len())];
            let mut attempts = 0;
            while second.0 == first.0 && attempts < 8 {
                second = candidates[rng.gen_range(0..candidates.len())];
                attempts += 1;
            }
            let score_first = score_candidate(first.1, first.2, difficulty, max_reputation, &mut rng);
            let score_second = score_candidate(second.1, second.2, difficulty, max_reputation, &mut rng);
            if score_first >= score_second {
                first
            } else {
                second
            }
        };

        Some(SelectedWorker { node_id: winner.0.to_string(), sender: winner.2.sender.clone() })
    }

    pub fn online_count(&self) -> usize {
        let now = Utc::now();
        self.nodes
            .read()
            .expect("node registry lock poisoned")
            .values()
            .filter(|e| e.connection.as_ref().is_some_and(|c| Self::is_online(c, now)))
            .count()
    }

    /// True if at least one online, vision-capable node exists. Backs the
    /// immediate-failure path for tasks with attached images (no worker to try).
    pub fn has_online_vision_worker(&self) -> bool {
        let now = Utc::now();
        self.nodes.read().expect("node registry lock poisoned").values().any(|e| {
            e.node.supports_vision && e.connection.as_ref().is_some_and(|c| Self::is_online(c, now))
        })
    }

    /// IDs of every node whose heartbeat is still within the liveness window.
    /// Backs the uptime-tick daemon, which only rewards nodes actually online.
    pub fn online_node_ids(&self) -> Vec<String> {
        let now = Utc::now();
        self.nodes
            .read()
            .expect("node registry lock poisoned")
            .iter()
            .filter(|(_, e)| e.connection.as_ref().is_some_and(|c| Self::is_online(c, now)))
            .map(|(id, _)| id.clone())
            .collect()
    }
}

impl Default for NodeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Shortest-Expected-Delay term: `load / max(tps, 1)` approximates the seconds of
/// queued work ahead of a new request, so the score favors fast, lightly-loaded nodes.
fn score_candidate(
    node: &Node,
    connection: &ConnectedRuntime,
    difficulty: Difficulty,
    max_reputation_in_candidates: f64,
    rng: &mut impl Rng,
) -> f64 {
    let expected_delay = connection.current_load as f64 / node.tokens_per_second.max(1.0);
    let delay_score = 1.0 / (1.0 + expected_delay);
    let reputation_score = (node.reputation / max_reputation_in_candidates).clamp(0.0, 1.0);
    let tier_score = TIER_DIFFICULTY_MATRIX[tier_index(node.tier)][difficulty_index(difficulty)];
    let explore_score: f64 = rng.gen_range(0.0..1.0);

    0.40 * delay_score + 0.30 * reputation_score + 0.20 * tier_score + 0.10 * explore_score
}

fn tier_index(tier: Tier) -> usize {
    match tier {
        Tier::Basic => 0,
        Tier::Standard => 1,
        Tier::Premium => 2,
    }
}

fn difficulty_index(difficulty: Difficulty) -> usize {
    match difficulty {
        Difficulty::Simple => 0,
        Difficulty::Complex => 1,
        Difficulty::Advanced => 2,
    }
}
