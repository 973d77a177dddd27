// [apps/coordinator/src/services/mod.rs]
/*!
 * APARATO: SERVICE LAYER INDEX (V1.0)
 * RESPONSABILIDAD: REEXPORTACIÓN DE LOS SERVICIOS DE APLICACIÓN
 */

pub mod account_gate;
pub mod aggregator;
pub mod divider;
pub mod llm_client;
pub mod reputation_service;
pub mod stream_sweeper;
pub mod task_orchestrator;
pub mod uptime_ticker;
pub mod weekly_decay;

pub use account_gate::{AccountGate, EnrollmentGate, IssuedAccount};
pub use reputation_service::ReputationService;
pub use task_orchestrator::TaskOrchestrator;
