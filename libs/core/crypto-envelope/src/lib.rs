// [libs/core/crypto-envelope/src/lib.rs]
/*!
 * =================================================================
 * APARATO: CRYPTO ENVELOPE (V1.0 - COORDINATOR GOLD)
 * CLASIFICACIÓN: CORE CRYPTOGRAPHIC STRATUM (ESTRATO L1)
 * RESPONSABILIDAD: CIFRADO DE EXTREMO A EXTREMO ENTRE COORDINADOR Y WORKERS
 * =================================================================
 */

pub mod envelope;
pub mod errors;
pub mod keypair;

pub use envelope::{open, seal};
pub use errors::EnvelopeError;
pub use keypair::Keypair;
pub use x25519_dalek::PublicKey;
