// [libs/core/wire-protocol/src/codec.rs]
/*!
 * APARATO: WIRE CODEC (V1.0)
 * RESPONSABILIDAD: CODIFICACION/DECODIFICACION DE TRAMAS CON LIMITE DE TAMANO
 */

use crate::errors::WireError;
use crate::frame::Frame;

/// 10 MiB, the ceiling named in the transport layer's technical note — guards
/// against memory exhaustion from an oversized or malicious frame.
pub const MAX_FRAME_BYTES: usize = 10 * 1024 * 1024;

pub fn encode(frame: &Frame) -> Result<String, WireError> {
    let encoded = serde_json::to_string(frame)?;
    if encoded.len() > MAX_FRAME_BYTES {
        return Err(WireError::FrameTooLarge { len: encoded.len(), max: MAX_FRAME_BYTES });
    }
    Ok(encoded)
}

pub fn decode(raw: &str) -> Result<Frame, WireError> {
    if raw.len() > MAX_FRAME_BYTES {
        return Err(WireError::FrameTooLarge { len: raw.len(), max: MAX_FRAME_BYTES });
    }
    let frame = serde_json::from_str(raw)?;
    Ok(frame)
}
