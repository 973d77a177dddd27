// [libs/domain/models/src/account.rs]
/*!
 * APARATO: ACCOUNT DOMAIN MODEL (V1.0)
 * RESPONSABILIDAD: ENTIDAD DE CUENTA Y UTILIDADES DE CLAVE OPACA DE 16 DIGITOS
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    Active,
    Suspended,
    Deleted,
}

/// An opaque admission credential. The full 16-digit key is never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: Uuid,
    pub key_hash: String,
    pub key_prefix: String,
    pub status: AccountStatus,
    pub created_at: DateTime<Utc>,
    pub last_activity_at: DateTime<Utc>,
}

impl Account {
    pub fn is_active(&self) -> bool {
        matches!(self.status, AccountStatus::Active)
    }
}

/// Error produced by key normalization/validation. Kept separate from the
/// store's own error type so this module has zero I/O dependencies.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyFormatError {
    #[error("account key must be exactly 16 digits after normalization")]
    InvalidLength,
    #[error("account key must contain only digits after normalization")]
    NonDigit,
}

/// Strips whitespace and dashes, the only separators a displayed key may carry.
pub fn normalize_key(raw: &str) -> String {
    raw.chars().filter(|c| !c.is_whitespace() && *c != '-').collect()
}

/// Validates `^\d{16}$` against the normalized form.
pub fn validate_key(normalized: &str) -> Result<(), KeyFormatError> {
    if normalized.len() != 16 {
        return Err(KeyFormatError::InvalidLength);
    }
    if !normalized.chars().all(|c| c.is_ascii_digit()) {
        return Err(KeyFormatError::NonDigit);
    }
    Ok(())
}

/// SHA-256 hex digest of the normalized key.
pub fn hash_key(normalized: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(normalized.as_bytes());
    hex::encode(hasher.finalize())
}

/// First 4 digits, retained unhashed to let operators spot-check a key.
pub fn key_prefix(normalized: &str) -> String {
    normalized.chars().take(4).collect()
}

/// Groups a normalized key into `dddd dddd dddd dddd` for display at issuance time.
pub fn display_key(normalized: &str) -> String {
    normalized
        .as_bytes()
        .chunks(4)
        .map(|chunk| std::str::from_utf8(chunk).expect("ascii digits"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// `dddd **** **** ****`, used wherever a key must be shown again after issuance.
pub fn mask_key(normalized: &str) -> String {
    format!("{} **** **** ****", key_prefix(normalized))
}
