// [apps/coordinator/src/state/circuit_breaker.rs]
/*!
 * APARATO: CIRCUIT BREAKER REGISTRY (V1.0)
 * RESPONSABILIDAD: AISLAMIENTO POR NODO ANTE FALLAS CONSECUTIVAS
 */

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use tracing::instrument;

const FAILURE_THRESHOLD: u32 = 3;
const SUCCESS_THRESHOLD_HALF_OPEN: u32 = 1;
const CLOSED_RECOVERY_STREAK: u32 = 3;
const OPEN_COOLDOWN_SECS: i64 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BreakerState {
    Closed,
    Open,
    HalfOpen,
}

struct BreakerEntry {
    state: BreakerState,
    failure_count: u32,
    consecutive_successes: u32,
    opened_at: Option<DateTime<Utc>>,
}

impl Default for BreakerEntry {
    fn default() -> Self {
        Self { state: BreakerState::Closed, failure_count: 0, consecutive_successes: 0, opened_at: None }
    }
}

pub struct CircuitBreakerRegistry {
    entries: RwLock<HashMap<String, BreakerEntry>>,
}

impl CircuitBreakerRegistry {
    pub fn new() -> Self {
        Self { entries: RwLock::new(HashMap::new()) }
    }

    /// True if this node must be excluded from selection right now. Transitions
    /// `Open -> HalfOpen` lazily once the cooldown has elapsed.
    pub fn is_open(&self, node_id: &str) -> bool {
        let mut entries = self.entries.write().expect("breaker registry lock poisoned");
        let entry = entries.entry(node_id.to_string()).or_default();

        if entry.state == BreakerState::Open {
            let elapsed = entry.opened_at.map(|at| (Utc::now() - at).num_seconds()).unwrap_or(0);
            if elapsed >= OPEN_COOLDOWN_SECS {
                entry.state = BreakerState::HalfOpen;
                entry.consecutive_successes = 0;
            }
        }

        entry.state == BreakerState::Open
    }

    #[instrument(skip(self))]
    pub fn record_success(&self, node_id: &str) {
        let mut entries = self.entries.write().expect("breaker registry lock poisoned");
        let entry = entries.entry(node_id.to_string()).or_default();

        match entry.state {
            BreakerState::HalfOpen => {
                entry.consecutive_successes += 1;
                if entry.consecutive_successes >= SUCCESS_THRESHOLD_HALF_OPEN {
                    entry.state = BreakerState::Closed;
                    entry.failure_count = 0;
                    entry.consecutive_successes = 0;
                    entry.opened_at = None;
                }
            }
            BreakerState::Closed => {
                entry.consecutive_successes += 1;
                if entry.consecutive_successes >= CLOSED_RECOVERY_STREAK && entry.failure_count > 0 {
                    entry.failure_count -= 1;
                    entry.consecutive_successes = 0;
                }
            }
            BreakerState::Open => {}
        }
    }

    #[instrument(skip(self))]
    pub fn record_failure(&self, node_id: &str) {
        let mut entries = self.entries.write().expect("breaker registry lock poisoned");
        let entry = entries.entry(node_id.to_string()).or_default();
        entry.consecutive_successes = 0;

        match entry.state {
            BreakerState::HalfOpen => {
                entry.state = BreakerState::Open;
                entry.opened_at = Some(Utc::now());
            }
            BreakerState::Closed => {
                entry.failure_count += 1;
                if entry.failure_count >= FAILURE_THRESHOLD {
                    entry.state = BreakerState::Open;
                    entry.opened_at = Some(Utc::now());
                }
            }
            BreakerState::Open => {}
        }
    }
}

impl Default for CircuitBreakerRegistry {
    fn default() -> Self {
        Self::new()
    }
}
