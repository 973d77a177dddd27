// [libs/domain/classifier/src/errors.rs]
/*!
 * APARATO: CLASSIFIER ERRORS (V1.0)
 */

#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    #[error("[L2_COGNITIVE_FAULT]: COMPLETION_TIMEOUT -> external classifier exceeded its deadline")]
    Timeout,

    #[error("[L2_COGNITIVE_FAULT]: COMPLETION_TRANSPORT -> {0}")]
    Transport(String),

    #[error("[L2_COGNITIVE_FAULT]: EMPTY_RESPONSE -> external classifier returned no content")]
    EmptyResponse,

    #[error("[L2_COGNITIVE_FAULT]: UNPARSABLE_RESPONSE -> {0}")]
    Unparsable(String),
}
