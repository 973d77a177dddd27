// [libs/domain/models/src/stream.rs]
/*!
 * APARATO: STREAM CHUNK MODEL (V1.0)
 * RESPONSABILIDAD: FORMA DE LOS MENSAJES QUE UN SUSCRIPTOR DE STREAMING RECIBE
 */

use serde::{Deserialize, Serialize};

/// What a `subscribe_stream` caller receives, in delivery order. Exactly one
/// `Done` or `Error` terminates the sequence (invariant I6); the session
/// itself (queue, TTL, sweeping) is runtime-only coordinator state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StreamChunk {
    Chunk { content: String },
    Done { final_response: String },
    Error { message: String },
}

impl StreamChunk {
    pub fn is_terminal(&self) -> bool {
        matches!(self, StreamChunk::Done { .. } | StreamChunk::Error { .. })
    }
}
