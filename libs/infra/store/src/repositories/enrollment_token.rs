// [libs/infra/store/src/repositories/enrollment_token.rs]
/*!
 * APARATO: ENROLLMENT TOKEN REPOSITORY
 * RESPONSABILIDAD: EMISIÓN Y CONSUMO DE UNA SOLA VEZ DE TOKENS DE ENROLAMIENTO
 */

use chrono::Utc;
use libsql::params;
use tracing::instrument;

use crate::client::StoreClient;
use crate::errors::StoreError;

pub struct EnrollmentTokenRepository<'a> {
    client: &'a StoreClient,
}

impl<'a> EnrollmentTokenRepository<'a> {
    pub fn new(client: &'a StoreClient) -> Self {
        Self { client }
    }

    #[instrument(skip(self, token_hash))]
    pub async fn issue(&self, token_hash: &str) -> Result<(), StoreError> {
        let conn = self.client.get_connection()?;
        conn.execute(
            "INSERT INTO enrollment_tokens (token_hash, consumed_at, created_at) VALUES (?1, NULL, ?2)",
            params![token_hash.to_string(), Utc::now().to_rfc3339()],
        )
        .await?;
        Ok(())
    }

    /// Atomically marks a token consumed iff it exists and has not been consumed yet.
    /// Returns `EnrollmentTokenRejected` for an unknown or already-consumed token.
    #[instrument(skip(self, token_hash))]
    pub async fn consume(&self, token_hash: &str) -> Result<(), StoreError> {
        let conn = self.client.get_connection()?;
        let affected = conn
            .execute(
                "UPDATE enrollment_tokens SET consumed_at = ?1
                 WHERE token_hash = ?2 AND consumed_at IS NULL",
                params![Utc::now().to_rfc3339(), token_hash.to_string()],
            )
            .await?;
        if affected == 0 {
            return Err(StoreError::EnrollmentTokenRejected);
        }
        Ok(())
    }
}
