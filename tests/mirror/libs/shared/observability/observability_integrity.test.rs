// [tests/mirror/libs/shared/observability/observability_integrity.test.rs]
#[cfg(test)]
mod tests {
    use iris_shared_observability::init_tracing;
    use std::panic;
    use tracing::{info, instrument};

    #[instrument(name = "test_instrumentation_strata")]
    fn simulate_instrumented_operation() {
        info!("executing traced micro-operation");
    }

    #[tokio::test]
    async fn certify_tracing_macro_and_panic_hook() {
        init_tracing("observability_integrity_test");

        simulate_instrumented_operation();

        let panic_capture_result = panic::catch_unwind(|| {
            panic!("intentional_strata_failure_for_testing");
        });

        assert!(panic_capture_result.is_err(), "panic hook failed to isolate the thread collapse");
    }
}
