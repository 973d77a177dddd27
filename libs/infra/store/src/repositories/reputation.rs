// [libs/infra/store/src/repositories/reputation.rs]
/*!
 * APARATO: REPUTATION EVENT REPOSITORY
 * RESPONSABILIDAD: BITÁCORA INMUTABLE DE MOVIMIENTOS DE REPUTACIÓN
 */

use iris_domain_models::{ReputationEvent, ReputationReason};
use libsql::params;
use tracing::instrument;

use crate::client::StoreClient;
use crate::errors::StoreError;
use crate::timestamp;

pub struct ReputationRepository<'a> {
    client: &'a StoreClient,
}

impl<'a> ReputationRepository<'a> {
    pub fn new(client: &'a StoreClient) -> Self {
        Self { client }
    }

    #[instrument(skip(self, event))]
    pub async fn record(&self, event: &ReputationEvent) -> Result<(), StoreError> {
        let conn = self.client.get_connection()?;
        conn.execute(
            "INSERT INTO reputation_events (node_id, delta, reason, at) VALUES (?1, ?2, ?3, ?4)",
            params![
                event.node_id.clone(),
                event.delta,
                event.reason.label().to_string(),
                event.at.to_rfc3339(),
            ],
        )
        .await?;
        Ok(())
    }

    /// Most recent events for a node, newest first. Backs the node_history read path.
    #[instrument(skip(self))]
    pub async fn history_for_node(&self, node_id: &str, limit: u32) -> Result<Vec<ReputationEvent>, StoreError> {
        let conn = self.client.get_connection()?;
        let mut rows = conn
            .query(
                "SELECT node_id, delta, reason, at FROM reputation_events
                 WHERE node_id = ?1 ORDER BY at DESC LIMIT ?2",
                params![node_id.to_string(), limit as i64],
            )
            .await?;

        let mut out = Vec::new();
        while let Some(row) = rows.next().await? {
            let node_id: String = row.get(0)?;
            let delta: f64 = row.get(1)?;
            let reason: String = row.get(2)?;
            let at: String = row.get(3)?;
            out.push(ReputationEvent {
                node_id,
                delta,
                reason: parse_reason(&reason)?,
                at: timestamp::parse(&at)?,
            });
        }
        Ok(out)
    }
}

fn parse_reason(raw: &str) -> Result<ReputationReason, StoreError> {
    match raw {
        "task_completed" => Ok(ReputationReason::TaskCompleted),
        "task_completed_fast" => Ok(ReputationReason::TaskCompletedFast),
        "task_timeout" => Ok(ReputationReason::TaskTimeout),
        "task_invalid" => Ok(ReputationReason::TaskInvalid),
        "uptime_hour" => Ok(ReputationReason::UptimeHour),
        "broken_promise" => Ok(ReputationReason::BrokenPromise),
        "weekly_decay" => Ok(ReputationReason::WeeklyDecay),
        other => Err(StoreError::MappingError(format!("unknown reputation reason '{other}'"))),
    }
}
