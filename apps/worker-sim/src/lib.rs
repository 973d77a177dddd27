// [apps/worker-sim/src/lib.rs]
/*!
 * =================================================================
 * APARATO: IRIS WORKER SIM (V1.0)
 * CLASIFICACIÓN: REFERENCE CLIENT (ESTRATO L1-APP)
 * RESPONSABILIDAD: HABLAR EL PROTOCOLO DEL UPLINK SIN MOTOR DE INFERENCIA REAL
 * =================================================================
 */

pub mod config;
pub mod engine;
pub mod errors;
pub mod uplink;

pub mod prelude {
    pub use crate::config::WorkerConfig;
    pub use crate::uplink::WorkerUplink;
}
