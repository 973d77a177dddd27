// [apps/coordinator/src/services/stream_sweeper.rs]
/*!
 * APARATO: STREAM SWEEPER DAEMON (V1.0)
 * RESPONSABILIDAD: PURGA PERIÓDICA DE SESIONES DE STREAMING EXPIRADAS
 */

use std::time::Duration;

use tokio::time::interval;
use tracing::info;

use crate::state::AppState;

const SWEEP_INTERVAL_SECS: u64 = 60;

/// Runs for the lifetime of the process, evicting stream sessions past their TTL
/// so a client that never reconnects doesn't pin a channel forever.
pub async fn spawn_stream_sweeper(state: AppState) {
    let mut ticker = interval(Duration::from_secs(SWEEP_INTERVAL_SECS));

    tokio::spawn(async move {
        info!("🧹 [STREAM_SWEEPER_ACTIVE]: daemon initiated");
        loop {
            ticker.tick().await;
            let purged = state.stream_hub.sweep_expired();
            if purged > 0 {
                info!(purged, "🧹 [STREAM_SWEEPER_CLEANUP]: evicted expired stream sessions");
            }
        }
    });
}
