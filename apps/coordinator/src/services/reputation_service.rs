// [apps/coordinator/src/services/reputation_service.rs]
/*!
 * APARATO: REPUTATION SERVICE (V1.0)
 * RESPONSABILIDAD: PUENTE ENTRE LA LÓGICA PURA DE PUNTUACIÓN Y SU PERSISTENCIA
 */

use chrono::Utc;
use iris_domain_models::ReputationEvent;
use iris_domain_reputation::delta_for_reason;
pub use iris_domain_models::ReputationReason;
use iris_infra_store::repositories::{NodeRepository, ReputationRepository};
use iris_infra_store::StoreClient;
use tracing::instrument;

use crate::errors::CoordinatorError;
use crate::state::node_registry::NodeRegistry;

pub struct ReputationService<'a> {
    store: &'a StoreClient,
    node_registry: &'a NodeRegistry,
}

impl<'a> ReputationService<'a> {
    pub fn new(store: &'a StoreClient, node_registry: &'a NodeRegistry) -> Self {
        Self { store, node_registry }
    }

    #[instrument(skip(self))]
    pub async fn apply(
        &self,
        node_id: &str,
        reason: ReputationReason,
        execution_time_ms: Option<u64>,
    ) -> Result<f64, CoordinatorError> {
        let node_repo = NodeRepository::new(self.store);
        let node = node_repo.find_by_id(node_id).await?.ok_or_else(|| CoordinatorError::NotFound(node_id.to_string()))?;

        let delta = delta_for_reason(reason, execution_time_ms);
        let new_reputation = iris_domain_reputation::apply_delta(node.reputation, delta);
        let tasks_completed =
            if matches!(reason, ReputationReason::TaskCompleted | ReputationReason::TaskCompletedFast) {
                node.tasks_completed + 1
            } else {
                node.tasks_completed
            };

        node_repo.update_reputation(node_id, new_reputation, tasks_completed).await?;
        self.node_registry.update_reputation(node_id, new_reputation, tasks_completed);

        ReputationRepository::new(self.store)
            .record(&ReputationEvent { node_id: node_id.to_string(), delta, reason, at: Utc::now() })
            .await?;

        Ok(new_reputation)
    }
}
