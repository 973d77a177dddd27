// [libs/domain/models/src/node.rs]
/*!
 * APARATO: NODE DOMAIN MODEL (V1.0)
 * RESPONSABILIDAD: ENTIDAD DE WORKER PERSISTIDO Y CLASIFICACIÓN DE ESTRATO (TIER)
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const MIN_REPUTATION: f64 = 10.0;
pub const INITIAL_REPUTATION: f64 = 100.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Basic,
    Standard,
    Premium,
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Tier::Basic => "basic",
            Tier::Standard => "standard",
            Tier::Premium => "premium",
        };
        write!(f, "{label}")
    }
}

/// Points-based capability scoring, pure function of the triple `(vram, params_b, tps)`.
/// Same inputs always yield the same tier, across process restarts (law L4).
pub fn tier_points(vram_gb: f64, model_params_b: f64, tokens_per_second: f64) -> u32 {
    let vram_points = if vram_gb >= 24.0 {
        25
    } else if vram_gb >= 16.0 {
        20
    } else if vram_gb >= 12.0 {
        15
    } else if vram_gb >= 8.0 {
        10
    } else {
        0
    };

    let params_points = if model_params_b >= 100.0 {
        65
    } else if model_params_b >= 70.0 {
        50
    } else if model_params_b >= 30.0 {
        40
    } else if model_params_b >= 13.0 {
        25
    } else if model_params_b >= 7.0 {
        15
    } else if model_params_b >= 3.0 {
        5
    } else {
        0
    };

    let tps_points = if tokens_per_second >= 50.0 {
        25
    } else if tokens_per_second >= 20.0 {
        15
    } else if tokens_per_second >= 10.0 {
        10
    } else {
        0
    };

    vram_points + params_points + tps_points
}

pub fn tier_from_capabilities(vram_gb: f64, model_params_b: f64, tokens_per_second: f64) -> Tier {
    let points = tier_points(vram_gb, model_params_b, tokens_per_second);
    if points >= 61 {
        Tier::Premium
    } else if points >= 21 {
        Tier::Standard
    } else {
        Tier::Basic
    }
}

/// Persisted worker record. Runtime-only fields (channel handle, current load,
/// latency EMA) live in the coordinator's ConnectedNode, not here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub account_id: Option<Uuid>,
    pub public_key: String,
    pub model_name: String,
    pub max_context: u32,
    pub vram_gb: f64,
    pub gpu_name: String,
    pub model_params_b: f64,
    pub quant: String,
    pub tokens_per_second: f64,
    pub tier: Tier,
    pub supports_vision: bool,
    pub reputation: f64,
    pub tasks_completed: u64,
    pub created_at: DateTime<Utc>,
    pub last_seen_at: DateTime<Utc>,
}

impl Node {
    /// Recomputes `tier` from this node's own capabilities, per §4.5.
    pub fn recompute_tier(&mut self) {
        self.tier = tier_from_capabilities(self.vram_gb, self.model_params_b, self.tokens_per_second);
    }
}
