// [libs/infra/store/src/lib.rs]
/*!
 * =================================================================
 * APARATO: PERSISTENCE ADAPTER (V1.0 - COORDINATOR GOLD)
 * CLASIFICACIÓN: INFRASTRUCTURE ADAPTER (ESTRATO L3)
 * RESPONSABILIDAD: libSQL PARA CUENTAS, NODOS, TAREAS Y REPUTACIÓN
 * =================================================================
 */

pub mod client;
pub mod errors;
pub mod repositories;
pub mod schema;
mod timestamp;

pub use client::StoreClient;
pub use errors::StoreError;
pub use repositories::{
    AccountRepository, EnrollmentTokenRepository, NodeRepository, ReputationRepository, TaskRepository,
};
