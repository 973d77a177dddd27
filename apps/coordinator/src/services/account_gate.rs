// [apps/coordinator/src/services/account_gate.rs]
/*!
 * APARATO: ACCOUNT GATE (V1.0)
 * RESPONSABILIDAD: EMISIÓN Y VERIFICACIÓN DE CREDENCIALES DE 16 DIGITOS,
 * Y ENROLAMIENTO LEGADO DE NODOS VÍA TOKEN DE UN SOLO USO
 */

use chrono::Utc;
use iris_domain_models::account::{display_key, hash_key, key_prefix, normalize_key, validate_key};
use iris_domain_models::{Account, AccountStatus};
use iris_infra_store::repositories::{AccountRepository, EnrollmentTokenRepository};
use iris_infra_store::StoreClient;
use rand::Rng;
use sha2::{Digest, Sha256};
use tracing::instrument;
use uuid::Uuid;

use crate::errors::CoordinatorError;

pub struct AccountGate<'a> {
    store: &'a StoreClient,
}

/// Returned exactly once at issuance time; the raw key is never persisted or logged again.
pub struct IssuedAccount {
    pub account: Account,
    pub display_key: String,
}

impl<'a> AccountGate<'a> {
    pub fn new(store: &'a StoreClient) -> Self {
        Self { store }
    }

    #[instrument(skip(self))]
    pub async fn generate(&self) -> Result<IssuedAccount, CoordinatorError> {
        let mut rng = rand::thread_rng();
        let normalized: String = (0..16).map(|_| rng.gen_range(0..10).to_string()).collect();
        validate_key(&normalized).expect("freshly generated key is always well-formed");

        let now = Utc::now();
        let account = Account {
            id: Uuid::new_v4(),
            key_hash: hash_key(&normalized),
            key_prefix: key_prefix(&normalized),
            status: AccountStatus::Active,
            created_at: now,
            last_activity_at: now,
        };

        AccountRepository::new(self.store).insert(&account).await?;

        Ok(IssuedAccount { display_key: display_key(&normalized), account })
    }

    #[instrument(skip(self, raw_key))]
    pub async fn verify(&self, raw_key: &str) -> Result<Account, CoordinatorError> {
        let normalized = normalize_key(raw_key);
        validate_key(&normalized).map_err(|e| CoordinatorError::InvalidFormat(e.to_string()))?;
        let key_hash = hash_key(&normalized);

        let repo = AccountRepository::new(self.store);
        let account = repo
            .find_by_key_hash(&key_hash)
            .await?
            .ok_or_else(|| CoordinatorError::Unauthorized("unknown account key".to_string()))?;

        if !account.is_active() {
            return Err(CoordinatorError::Unauthorized(format!("account status is {:?}", account.status)));
        }

        repo.touch_last_activity(account.id, Utc::now()).await?;
        Ok(account)
    }

    #[instrument(skip(self))]
    pub async fn set_status(&self, id: Uuid, status: AccountStatus) -> Result<(), CoordinatorError> {
        AccountRepository::new(self.store).set_status(id, status).await?;
        Ok(())
    }
}

/// Legacy enrollment: single-use tokens that let a node attach to the network
/// without an account key, mirroring the original deployment's bootstrap path.
/// Tokens are hashed with a deployment-wide secret pepper so a leaked database
/// dump alone can't be brute-forced into valid tokens.
pub struct EnrollmentGate<'a> {
    store: &'a StoreClient,
    secret: &'a str,
}

impl<'a> EnrollmentGate<'a> {
    pub fn new(store: &'a StoreClient, secret: &'a str) -> Self {
        Self { store, secret }
    }

    #[instrument(skip(self))]
    pub async fn issue_token(&self) -> Result<String, CoordinatorError> {
        let raw: String = {
            let mut rng = rand::thread_rng();
            let mut bytes = [0u8; 32];
            rng.fill(&mut bytes);
            hex::encode(bytes)
        };
        EnrollmentTokenRepository::new(self.store).issue(&hash_token(self.secret, &raw)).await?;
        Ok(raw)
    }

    #[instrument(skip(self, raw_token))]
    pub async fn consume(&self, raw_token: &str) -> Result<(), CoordinatorError> {
        EnrollmentTokenRepository::new(self.store).consume(&hash_token(self.secret, raw_token)).await?;
        Ok(())
    }
}

fn hash_token(secret: &str, raw: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(secret.as_bytes());
    hasher.update(raw.as_bytes());
    hex::encode(hasher.finalize())
}
