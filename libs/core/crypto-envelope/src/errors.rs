// [libs/core/crypto-envelope/src/errors.rs]
/*!
 * APARATO: CRYPTO ENVELOPE ERRORS (V1.0)
 */

#[derive(Debug, thiserror::Error)]
pub enum EnvelopeError {
    #[error("[L1_CRYPTO_FAULT]: IO -> {0}")]
    Io(#[from] std::io::Error),

    #[error("[L1_CRYPTO_FAULT]: MALFORMED_KEY_MATERIAL -> expected {expected} bytes, found {found}")]
    MalformedKeyMaterial { expected: usize, found: usize },

    #[error("[L1_CRYPTO_FAULT]: MALFORMED_BLOB -> {0}")]
    MalformedBlob(String),

    #[error("[L1_CRYPTO_FAULT]: BASE64 -> {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("[L1_CRYPTO_FAULT]: DECRYPTION_FAILED -> authentication tag mismatch or wrong key")]
    DecryptionFailed,
}
