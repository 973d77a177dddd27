// [apps/coordinator/src/handlers/mod.rs]
/*!
 * APARATO: HTTP/WS HANDLER SURFACE
 * RESPONSABILIDAD: PUNTOS DE ENTRADA EXTERNOS (CLIENTE HUMANO Y WORKER)
 */

pub mod stream;
pub mod tasks;
pub mod worker_socket;
