// [libs/core/wire-protocol/src/errors.rs]
/*!
 * APARATO: WIRE PROTOCOL ERRORS (V1.0)
 */

#[derive(Debug, thiserror::Error)]
pub enum WireError {
    #[error("[L1_WIRE_FAULT]: JSON -> {0}")]
    Json(#[from] serde_json::Error),

    #[error("[L1_WIRE_FAULT]: FRAME_TOO_LARGE -> {len} bytes exceeds the {max} byte limit")]
    FrameTooLarge { len: usize, max: usize },
}
