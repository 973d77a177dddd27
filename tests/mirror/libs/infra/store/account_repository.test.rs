// [tests/mirror/libs/infra/store/account_repository.test.rs]
#[cfg(test)]
mod tests {
    use iris_domain_models::account::{hash_key, normalize_key, validate_key};
    use iris_domain_models::{Account, AccountStatus};
    use iris_infra_store::{AccountRepository, StoreClient};
    use uuid::Uuid;

    async fn memory_client() -> StoreClient {
        StoreClient::connect(":memory:", None).await.unwrap()
    }

    fn sample_account(key_hash: &str) -> Account {
        let now = chrono::Utc::now();
        Account {
            id: Uuid::new_v4(),
            key_hash: key_hash.to_string(),
            key_prefix: key_hash[0..4].to_string(),
            status: AccountStatus::Active,
            created_at: now,
            last_activity_at: now,
        }
    }

    #[tokio::test]
    async fn insert_then_find_by_key_hash_round_trips() {
        let client = memory_client().await;
        let repo = AccountRepository::new(&client);

        let normalized = normalize_key("1234567890123456");
        validate_key(&normalized).unwrap();
        let key_hash = hash_key(&normalized);

        let account = sample_account(&key_hash);
        repo.insert(&account).await.unwrap();

        let found = repo.find_by_key_hash(&key_hash).await.unwrap().unwrap();
        assert_eq!(found.id, account.id);
        assert!(found.is_active());
    }

    #[tokio::test]
    async fn set_status_on_unknown_account_is_not_found() {
        let client = memory_client().await;
        let repo = AccountRepository::new(&client);
        let result = repo.set_status(Uuid::new_v4(), AccountStatus::Suspended).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn suspended_account_round_trips_its_status() {
        let client = memory_client().await;
        let repo = AccountRepository::new(&client);
        let account = sample_account("deadbeefcafebabe");
        repo.insert(&account).await.unwrap();

        repo.set_status(account.id, AccountStatus::Suspended).await.unwrap();
        let found = repo.find_by_id(account.id).await.unwrap().unwrap();
        assert!(!found.is_active());
    }
}
