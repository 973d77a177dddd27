// [apps/worker-sim/src/errors.rs]
/*!
 * APARATO: WORKER SIM ERRORS (V1.0)
 */

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WorkerSimError {
    #[error("[L1_UPLINK_FAULT]: WEBSOCKET -> {0}")]
    Socket(#[from] tokio_tungstenite::tungstenite::Error),

    #[error("[L1_UPLINK_FAULT]: WIRE -> {0}")]
    Wire(#[from] iris_core_wire_protocol::WireError),

    #[error("[L1_UPLINK_FAULT]: CRYPTO -> {0}")]
    Crypto(#[from] iris_core_crypto_envelope::EnvelopeError),

    #[error("[L1_UPLINK_FAULT]: URL -> {0}")]
    InvalidUrl(String),

    #[error("[L1_UPLINK_FAULT]: REGISTRATION_REJECTED -> {0}")]
    RegistrationRejected(String),

    #[error("[L1_UPLINK_FAULT]: CONNECTION_CLOSED -> coordinator dropped the uplink")]
    ConnectionClosed,

    #[error("[L1_UPLINK_FAULT]: UTF8 -> {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}
