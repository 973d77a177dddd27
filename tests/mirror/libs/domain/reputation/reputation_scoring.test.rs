// [tests/mirror/libs/domain/reputation/reputation_scoring.test.rs]
#[cfg(test)]
mod tests {
    use iris_domain_models::reputation::ReputationReason;
    use iris_domain_reputation::*;

    // Invariant I2: reputation never drops below 10.
    #[test]
    fn invariant_i2_floor_holds_across_repeated_penalties() {
        let mut reputation = 100.0;
        for _ in 0..10 {
            reputation = apply_delta(reputation, TASK_INVALID_PENALTY);
        }
        assert_eq!(reputation, FLOOR);
    }

    #[test]
    fn delta_for_reason_matches_the_constants_table() {
        assert_eq!(delta_for_reason(ReputationReason::TaskTimeout, None), TASK_TIMEOUT_PENALTY);
        assert_eq!(delta_for_reason(ReputationReason::TaskInvalid, None), TASK_INVALID_PENALTY);
        assert_eq!(delta_for_reason(ReputationReason::UptimeHour, None), UPTIME_HOUR_BONUS);
        assert_eq!(delta_for_reason(ReputationReason::BrokenPromise, None), UPTIME_BROKEN_PENALTY);
        assert_eq!(delta_for_reason(ReputationReason::TaskCompleted, Some(45_000)), TASK_COMPLETED_POINTS);
        assert_eq!(
            delta_for_reason(ReputationReason::TaskCompleted, Some(1_000)),
            TASK_COMPLETED_POINTS + TASK_FAST_BONUS
        );
    }

    #[test]
    fn repeated_weekly_decay_converges_downward_but_never_below_the_floor() {
        let mut reputation = 12.0;
        for _ in 0..1000 {
            reputation = apply_weekly_decay(reputation);
        }
        assert_eq!(reputation, FLOOR);
    }
}
