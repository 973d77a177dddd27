// [libs/domain/reputation/src/lib.rs]
/*!
 * =================================================================
 * APARATO: REPUTATION SCORING ENGINE (V1.0 - COORDINATOR GOLD)
 * CLASIFICACIÓN: DOMAIN LOGIC (ESTRATO L2)
 * RESPONSABILIDAD: DELTAS POR EVENTO, CLAMPING Y DECAIMIENTO SEMANAL
 *
 * Puramente funcional: no toca el Store. El servicio de reputación del
 * coordinador envuelve estas funciones y persiste el resultado.
 * =================================================================
 */

use iris_domain_models::node::{INITIAL_REPUTATION, MIN_REPUTATION};
use iris_domain_models::reputation::ReputationReason;

pub use iris_domain_models::node::{INITIAL_REPUTATION as INITIAL, MIN_REPUTATION as FLOOR};

pub const TASK_COMPLETED_POINTS: f64 = 10.0;
pub const TASK_FAST_BONUS: f64 = 5.0;
pub const FAST_THRESHOLD_MS: u64 = 30_000;
pub const TASK_TIMEOUT_PENALTY: f64 = -20.0;
pub const TASK_INVALID_PENALTY: f64 = -50.0;
pub const UPTIME_HOUR_BONUS: f64 = 1.0;
pub const UPTIME_BROKEN_PENALTY: f64 = -5.0;
pub const WEEKLY_DECAY_FACTOR: f64 = 0.99;

/// Delta for a task completion, folding in the fast-execution bonus.
pub fn completion_delta(execution_time_ms: u64) -> f64 {
    if execution_time_ms < FAST_THRESHOLD_MS {
        TASK_COMPLETED_POINTS + TASK_FAST_BONUS
    } else {
        TASK_COMPLETED_POINTS
    }
}

pub fn delta_for_reason(reason: ReputationReason, execution_time_ms: Option<u64>) -> f64 {
    match reason {
        ReputationReason::TaskCompleted | ReputationReason::TaskCompletedFast => {
            completion_delta(execution_time_ms.unwrap_or(u64::MAX))
        }
        ReputationReason::TaskTimeout => TASK_TIMEOUT_PENALTY,
        ReputationReason::TaskInvalid => TASK_INVALID_PENALTY,
        ReputationReason::UptimeHour => UPTIME_HOUR_BONUS,
        ReputationReason::BrokenPromise => UPTIME_BROKEN_PENALTY,
        ReputationReason::WeeklyDecay => 0.0, // decay is multiplicative, not an additive delta
    }
}

/// Clamps a reputation value to the invariant floor (I2: reputation never drops below 10).
pub fn clamp(reputation: f64) -> f64 {
    reputation.max(MIN_REPUTATION)
}

/// Applies an additive delta and clamps the result.
pub fn apply_delta(current: f64, delta: f64) -> f64 {
    clamp(current + delta)
}

/// Applies the weekly multiplicative decay and clamps the result.
pub fn apply_weekly_decay(current: f64) -> f64 {
    clamp(current * WEEKLY_DECAY_FACTOR)
}

pub fn initial_reputation() -> f64 {
    INITIAL_REPUTATION
}
