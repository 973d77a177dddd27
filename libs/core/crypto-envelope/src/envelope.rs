// [libs/core/crypto-envelope/src/envelope.rs]
/*!
 * APARATO: CRYPTO ENVELOPE (V1.0)
 * RESPONSABILIDAD: SELLADO Y APERTURA AUTENTICADA ENTRE COORDINADOR Y WORKER
 *
 * blob = base64( salt(16B) || nonce(12B) || ciphertext || tag )
 * key  = HKDF-SHA256(ECDH(our_priv, their_pub), salt, info="iris-e2e", L=32)
 * AEAD = AES-256-GCM, AAD vacío.
 */

use aes_gcm::aead::{Aead, KeyInit, Payload};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use hkdf::Hkdf;
use rand::RngCore;
use sha2::Sha256;
use x25519_dalek::{PublicKey, StaticSecret};

use crate::errors::EnvelopeError;

const SALT_LEN: usize = 16;
const NONCE_LEN: usize = 12;
const HKDF_INFO: &[u8] = b"iris-e2e";

fn derive_key(our_priv: &StaticSecret, their_pub: &PublicKey, salt: &[u8]) -> [u8; 32] {
    let shared = our_priv.diffie_hellman(their_pub);
    let hk = Hkdf::<Sha256>::new(Some(salt), shared.as_bytes());
    let mut okm = [0u8; 32];
    hk.expand(HKDF_INFO, &mut okm).expect("32 is a valid HKDF-SHA256 output length");
    okm
}

/// Seals `pt` for `recipient_pub`. Fresh random salt and nonce per call.
pub fn seal(our_priv: &StaticSecret, recipient_pub: &PublicKey, pt: &[u8]) -> Result<String, EnvelopeError> {
    let mut salt = [0u8; SALT_LEN];
    let mut nonce_bytes = [0u8; NONCE_LEN];
    rand::thread_rng().fill_bytes(&mut salt);
    rand::thread_rng().fill_bytes(&mut nonce_bytes);

    let key_bytes = derive_key(our_priv, recipient_pub, &salt);
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&key_bytes));
    let nonce = Nonce::from_slice(&nonce_bytes);

    let ciphertext = cipher
        .encrypt(nonce, Payload { msg: pt, aad: &[] })
        .map_err(|_| EnvelopeError::DecryptionFailed)?;

    let mut out = Vec::with_capacity(SALT_LEN + NONCE_LEN + ciphertext.len());
    out.extend_from_slice(&salt);
    out.extend_from_slice(&nonce_bytes);
    out.extend_from_slice(&ciphertext);

    Ok(BASE64.encode(out))
}

/// Opens a blob sealed by `seal(sender_priv, our_pub, pt)`, using our private key
/// and the sender's public key. Fails with `DecryptionFailed` on any tag mismatch.
pub fn open(our_priv: &StaticSecret, sender_pub: &PublicKey, blob: &str) -> Result<Vec<u8>, EnvelopeError> {
    let raw = BASE64.decode(blob)?;
    if raw.len() < SALT_LEN + NONCE_LEN {
        return Err(EnvelopeError::MalformedBlob("blob shorter than salt+nonce".into()));
    }

    let (salt, rest) = raw.split_at(SALT_LEN);
    let (nonce_bytes, ciphertext) = rest.split_at(NONCE_LEN);

    let key_bytes = derive_key(our_priv, sender_pub, salt);
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&key_bytes));
    let nonce = Nonce::from_slice(nonce_bytes);

    cipher
        .decrypt(nonce, Payload { msg: ciphertext, aad: &[] })
        .map_err(|_| EnvelopeError::DecryptionFailed)
}
