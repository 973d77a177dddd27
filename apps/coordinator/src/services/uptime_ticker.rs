// [apps/coordinator/src/services/uptime_ticker.rs]
/*!
 * APARATO: UPTIME TICKER DAEMON (V1.0)
 * RESPONSABILIDAD: RECOMPENSA HORARIA DE REPUTACIÓN POR PERMANENCIA EN LÍNEA
 */

use std::time::Duration;

use iris_domain_models::ReputationReason;
use tokio::time::interval;
use tracing::{info, warn};

use crate::services::reputation_service::ReputationService;
use crate::state::AppState;

const TICK_INTERVAL_SECS: u64 = 3_600;

/// Every hour, every node still online earns the uptime bonus. A node that
/// disconnects and misses a tick simply does not collect it for that hour.
pub async fn spawn_uptime_ticker(state: AppState) {
    let mut ticker = interval(Duration::from_secs(TICK_INTERVAL_SECS));

    tokio::spawn(async move {
        info!("⏱️ [UPTIME_TICKER_ACTIVE]: daemon initiated");
        loop {
            ticker.tick().await;
            let online = state.node_registry.online_node_ids();
            let mut rewarded = 0usize;

            for node_id in &online {
                let reputation = ReputationService::new(&state.store, &state.node_registry);
                match reputation.apply(node_id, ReputationReason::UptimeHour, None).await {
                    Ok(_) => rewarded += 1,
                    Err(error) => warn!(%node_id, %error, "⏱️ [UPTIME_TICKER_FAULT]: failed to apply uptime bonus"),
                }
            }

            if rewarded > 0 {
                info!(rewarded, "⏱️ [UPTIME_TICKER_TICK]: uptime bonus applied");
            }
        }
    });
}
