// [tests/mirror/libs/domain/models/tier_scoring.test.rs]
#[cfg(test)]
mod tests {
    use iris_domain_models::node::{tier_from_capabilities, tier_points, Tier};

    // Scenario 1 from the testable-properties table.
    #[test]
    fn premium_worker_scores_one_hundred() {
        assert_eq!(tier_points(24.0, 70.0, 50.0), 100);
        assert_eq!(tier_from_capabilities(24.0, 70.0, 50.0), Tier::Premium);
    }

    #[test]
    fn standard_worker_scores_thirty_five() {
        assert_eq!(tier_points(8.0, 7.0, 10.0), 35);
        assert_eq!(tier_from_capabilities(8.0, 7.0, 10.0), Tier::Standard);
    }

    #[test]
    fn zero_capability_is_basic() {
        assert_eq!(tier_points(0.0, 0.0, 0.0), 0);
        assert_eq!(tier_from_capabilities(0.0, 0.0, 0.0), Tier::Basic);
    }

    #[test]
    fn tier_is_a_pure_function_of_the_triple() {
        // law L4: the same triple yields the same tier every time it's called.
        let a = tier_from_capabilities(16.0, 30.0, 10.0);
        let b = tier_from_capabilities(16.0, 30.0, 10.0);
        assert_eq!(a, b);
    }
}
