// [apps/coordinator/src/services/weekly_decay.rs]
/*!
 * APARATO: WEEKLY DECAY DAEMON (V1.0)
 * RESPONSABILIDAD: APLICACIÓN MULTIPLICATIVA DE DECAIMIENTO DE REPUTACIÓN
 *
 * Corre sobre TODOS los nodos persistidos, estén o no conectados: el
 * decaimiento es un impuesto sobre la inactividad, no solo sobre la
 * desconexión.
 */

use std::time::Duration;

use iris_domain_reputation::apply_weekly_decay;
use iris_infra_store::repositories::NodeRepository;
use tokio::time::interval;
use tracing::{info, warn};

use crate::state::AppState;

const DECAY_INTERVAL_SECS: u64 = 7 * 24 * 3_600;

pub async fn spawn_weekly_decay(state: AppState) {
    let mut ticker = interval(Duration::from_secs(DECAY_INTERVAL_SECS));

    tokio::spawn(async move {
        info!("📉 [WEEKLY_DECAY_ACTIVE]: daemon initiated");
        loop {
            ticker.tick().await;

            let node_repo = NodeRepository::new(&state.store);
            let nodes = match node_repo.list_all().await {
                Ok(nodes) => nodes,
                Err(error) => {
                    warn!(%error, "📉 [WEEKLY_DECAY_FAULT]: failed to list nodes");
                    continue;
                }
            };

            let mut decayed = 0usize;
            for node in nodes {
                let new_reputation = apply_weekly_decay(node.reputation);
                if let Err(error) =
                    node_repo.update_reputation(&node.id, new_reputation, node.tasks_completed).await
                {
                    warn!(node_id = %node.id, %error, "📉 [WEEKLY_DECAY_FAULT]: failed to persist decay");
                    continue;
                }
                state.node_registry.update_reputation(&node.id, new_reputation, node.tasks_completed);
                decayed += 1;
            }

            info!(decayed, "📉 [WEEKLY_DECAY_TICK]: weekly decay applied");
        }
    });
}
