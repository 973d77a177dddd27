// [apps/worker-sim/src/main.rs]
/*!
 * =================================================================
 * APARATO: WORKER SIM ENTRYPOINT (V1.0)
 * RESPONSABILIDAD: CICLO DE VIDA DEL PROCESO Y RECONEXIÓN CON BACKOFF
 * =================================================================
 */

use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use iris_worker_sim::config::WorkerConfig;
use iris_worker_sim::uplink::WorkerUplink;
use tracing::{error, info, warn};

/// Base del backoff exponencial entre intentos de reconexión.
const RECONNECT_BASE_MS: u64 = 500;
/// Techo del backoff exponencial, para no esperar indefinidamente entre intentos.
const RECONNECT_MAX_MS: u64 = 30_000;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. INICIALIZACIÓN DEL SISTEMA DE OBSERVABILIDAD
    dotenvy::dotenv().ok();
    iris_shared_observability::init_tracing("iris_worker_sim");

    // 2. PARSEO DE DIRECTIVAS ESTRATÉGICAS
    let config = WorkerConfig::parse();
    info!(node_id = %config.node_id, coordinator_url = %config.coordinator_url, "🚀 [WORKER_SIM_BOOT]");

    // 3. CONSTRUCCIÓN DEL URPLINK (CARGA/GENERACIÓN DE IDENTIDAD CRIPTOGRÁFICA)
    let uplink = WorkerUplink::new(config).context("IO_FAULT: unable to load or generate the node keypair")?;

    // 4. BUCLE DE RECONEXIÓN CON BACKOFF EXPONENCIAL
    //
    // A diferencia del coordinador, este proceso no necesita notificar un
    // Disconnect explícito al salir: el latido ausente basta para que el
    // registry del lado del coordinador detecte la caída del nodo.
    let mut attempt: u32 = 0;
    loop {
        tokio::select! {
            result = uplink.run() => {
                match result {
                    Ok(()) => info!("🔌 [UPLINK_ENDED]: connection closed cleanly"),
                    Err(error) => error!(%error, "💀 [UPLINK_FAULT]"),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("🛑 [SHUTDOWN_SIGNAL]: ctrl-c received, stopping the uplink");
                break;
            }
        }

        attempt += 1;
        let backoff_ms = (RECONNECT_BASE_MS * 2u64.saturating_pow(attempt.min(16))).min(RECONNECT_MAX_MS);
        warn!(attempt, backoff_ms, "⏳ [RECONNECT_BACKOFF]: retrying the uplink");
        tokio::time::sleep(Duration::from_millis(backoff_ms)).await;
    }

    Ok(())
}
