// [apps/coordinator/src/util.rs]
/*!
 * APARATO: SHARED CODEC HELPERS (V1.0)
 * RESPONSABILIDAD: CONVERSIONES REPETIDAS ENTRE CLAVES BASE64 Y TIPOS X25519
 */

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use x25519_dalek::PublicKey;

use crate::errors::CoordinatorError;

/// Every `Node.public_key` is stored base64-encoded; the crypto envelope wants
/// a raw `x25519_dalek::PublicKey`. Used on every encrypt/decrypt boundary.
pub fn decode_node_public_key(raw: &str) -> Result<PublicKey, CoordinatorError> {
    let bytes = BASE64
        .decode(raw)
        .map_err(|e| CoordinatorError::InvalidFormat(format!("malformed node public key: {e}")))?;
    let array: [u8; 32] = bytes
        .try_into()
        .map_err(|_| CoordinatorError::InvalidFormat("node public key must be 32 bytes".to_string()))?;
    Ok(PublicKey::from(array))
}
