// [tests/mirror/apps/coordinator/services/account_gate.test.rs]
#[cfg(test)]
mod tests {
    use iris_coordinator::errors::CoordinatorError;
    use iris_coordinator::services::account_gate::{AccountGate, EnrollmentGate};
    use iris_domain_models::AccountStatus;
    use iris_infra_store::StoreClient;

    async fn memory_client() -> StoreClient {
        StoreClient::connect(":memory:", None).await.unwrap()
    }

    #[tokio::test]
    async fn a_freshly_issued_key_verifies_successfully() {
        let store = memory_client().await;
        let gate = AccountGate::new(&store);

        let issued = gate.generate().await.unwrap();
        let verified = gate.verify(&issued.display_key).await.unwrap();

        assert_eq!(verified.id, issued.account.id);
        assert_eq!(verified.status, AccountStatus::Active);
    }

    #[tokio::test]
    async fn an_unknown_key_is_rejected() {
        let store = memory_client().await;
        let gate = AccountGate::new(&store);

        let error = gate.verify("0000-0000-0000-0000").await.unwrap_err();
        assert!(matches!(error, CoordinatorError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn a_suspended_account_cannot_verify() {
        let store = memory_client().await;
        let gate = AccountGate::new(&store);

        let issued = gate.generate().await.unwrap();
        gate.set_status(issued.account.id, AccountStatus::Suspended).await.unwrap();

        let error = gate.verify(&issued.display_key).await.unwrap_err();
        assert!(matches!(error, CoordinatorError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn an_issued_enrollment_token_can_be_consumed_exactly_once() {
        let store = memory_client().await;
        let gate = EnrollmentGate::new(&store, "deployment-secret");

        let token = gate.issue_token().await.unwrap();
        gate.consume(&token).await.unwrap();

        let error = gate.consume(&token).await.unwrap_err();
        assert!(matches!(error, CoordinatorError::Store(_)));
    }

    #[tokio::test]
    async fn enrollment_tokens_are_peppered_with_the_deployment_secret() {
        let store = memory_client().await;
        let issuer = EnrollmentGate::new(&store, "secret-a");
        let token = issuer.issue_token().await.unwrap();

        // The same raw token hashed under a different deployment secret never matches
        // what was stored, so a peer with the wrong secret cannot consume it.
        let wrong_secret_gate = EnrollmentGate::new(&store, "secret-b");
        let error = wrong_secret_gate.consume(&token).await.unwrap_err();
        assert!(matches!(error, CoordinatorError::Store(_)));

        issuer.consume(&token).await.unwrap();
    }
}
