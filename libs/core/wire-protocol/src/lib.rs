// [libs/core/wire-protocol/src/lib.rs]
/*!
 * =================================================================
 * APARATO: WIRE PROTOCOL (V1.0 - COORDINATOR GOLD)
 * CLASIFICACIÓN: CORE TRANSPORT STRATUM (ESTRATO L1)
 * RESPONSABILIDAD: TRAMAS TIPADAS ENTRE COORDINADOR Y WORKERS
 * =================================================================
 */

pub mod codec;
pub mod errors;
pub mod frame;
pub mod message_type;
pub mod payloads;

pub use codec::{decode, encode, MAX_FRAME_BYTES};
pub use errors::WireError;
pub use frame::{Frame, FrameBody};
pub use message_type::MessageType;
pub use payloads::*;
