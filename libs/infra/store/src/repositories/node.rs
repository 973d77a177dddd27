// [libs/infra/store/src/repositories/node.rs]
/*!
 * APARATO: NODE REPOSITORY
 * RESPONSABILIDAD: PERSISTENCIA DE WORKERS REGISTRADOS Y SU REPUTACIÓN
 */

use iris_domain_models::{Node, Tier};
use libsql::params;
use tracing::instrument;
use uuid::Uuid;

use crate::client::StoreClient;
use crate::errors::StoreError;
use crate::timestamp;

pub struct NodeRepository<'a> {
    client: &'a StoreClient,
}

impl<'a> NodeRepository<'a> {
    pub fn new(client: &'a StoreClient) -> Self {
        Self { client }
    }

    #[instrument(skip(self, node))]
    pub async fn upsert(&self, node: &Node) -> Result<(), StoreError> {
        let conn = self.client.get_connection()?;
        conn.execute(
            r#"
            INSERT INTO nodes (
                id, account_id, public_key, model_name, max_context, vram_gb, gpu_name,
                model_params_b, quant, tokens_per_second, tier, supports_vision,
                reputation, tasks_completed, created_at, last_seen_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)
            ON CONFLICT(id) DO UPDATE SET
                account_id = excluded.account_id,
                public_key = excluded.public_key,
                model_name = excluded.model_name,
                max_context = excluded.max_context,
                vram_gb = excluded.vram_gb,
                gpu_name = excluded.gpu_name,
                model_params_b = excluded.model_params_b,
                quant = excluded.quant,
                tokens_per_second = excluded.tokens_per_second,
                tier = excluded.tier,
                supports_vision = excluded.supports_vision,
                last_seen_at = excluded.last_seen_at
            "#,
            params![
                node.id.clone(),
                node.account_id.map(|id| id.to_string()),
                node.public_key.clone(),
                node.model_name.clone(),
                node.max_context as i64,
                node.vram_gb,
                node.gpu_name.clone(),
                node.model_params_b,
                node.quant.clone(),
                node.tokens_per_second,
                tier_label(node.tier).to_string(),
                node.supports_vision as i64,
                node.reputation,
                node.tasks_completed as i64,
                node.created_at.to_rfc3339(),
                node.last_seen_at.to_rfc3339(),
            ],
        )
        .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn find_by_id(&self, id: &str) -> Result<Option<Node>, StoreError> {
        let conn = self.client.get_connection()?;
        let mut rows = conn
            .query(&format!("{SELECT_COLUMNS} WHERE id = ?1"), params![id.to_string()])
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(map_row(&row)?)),
            None => Ok(None),
        }
    }

    #[instrument(skip(self))]
    pub async fn list_all(&self) -> Result<Vec<Node>, StoreError> {
        let conn = self.client.get_connection()?;
        let mut rows = conn.query(SELECT_COLUMNS, ()).await?;
        let mut out = Vec::new();
        while let Some(row) = rows.next().await? {
            out.push(map_row(&row)?);
        }
        Ok(out)
    }

    #[instrument(skip(self))]
    pub async fn update_reputation(&self, id: &str, reputation: f64, tasks_completed: u64) -> Result<(), StoreError> {
        let conn = self.client.get_connection()?;
        let affected = conn
            .execute(
                "UPDATE nodes SET reputation = ?1, tasks_completed = ?2 WHERE id = ?3",
                params![reputation, tasks_completed as i64, id.to_string()],
            )
            .await?;
        if affected == 0 {
            return Err(StoreError::NodeNotFound);
        }
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn touch_last_seen(&self, id: &str, at: chrono::DateTime<chrono::Utc>) -> Result<(), StoreError> {
        let conn = self.client.get_connection()?;
        conn.execute(
            "UPDATE nodes SET last_seen_at = ?1 WHERE id = ?2",
            params![at.to_rfc3339(), id.to_string()],
        )
        .await?;
        Ok(())
    }
}

const SELECT_COLUMNS: &str = r#"
    SELECT id, account_id, public_key, model_name, max_context, vram_gb, gpu_name,
           model_params_b, quant, tokens_per_second, tier, supports_vision,
           reputation, tasks_completed, created_at, last_seen_at
    FROM nodes
"#;

fn tier_label(tier: Tier) -> &'static str {
    match tier {
        Tier::Basic => "basic",
        Tier::Standard => "standard",
        Tier::Premium => "premium",
    }
}

fn parse_tier(raw: &str) -> Result<Tier, StoreError> {
    match raw {
        "basic" => Ok(Tier::Basic),
        "standard" => Ok(Tier::Standard),
        "premium" => Ok(Tier::Premium),
        other => Err(StoreError::MappingError(format!("unknown tier '{other}'"))),
    }
}

fn map_row(row: &libsql::Row) -> Result<Node, StoreError> {
    let id: String = row.get(0)?;
    let account_id: Option<String> = row.get(1)?;
    let public_key: String = row.get(2)?;
    let model_name: String = row.get(3)?;
    let max_context: i64 = row.get(4)?;
    let vram_gb: f64 = row.get(5)?;
    let gpu_name: String = row.get(6)?;
    let model_params_b: f64 = row.get(7)?;
    let quant: String = row.get(8)?;
    let tokens_per_second: f64 = row.get(9)?;
    let tier: String = row.get(10)?;
    let supports_vision: i64 = row.get(11)?;
    let reputation: f64 = row.get(12)?;
    let tasks_completed: i64 = row.get(13)?;
    let created_at: String = row.get(14)?;
    let last_seen_at: String = row.get(15)?;

    Ok(Node {
        id,
        account_id: account_id
            .map(|raw| Uuid::parse_str(&raw).map_err(|e| StoreError::MappingError(e.to_string())))
            .transpose()?,
        public_key,
        model_name,
        max_context: max_context as u32,
        vram_gb,
        gpu_name,
        model_params_b,
        quant,
        tokens_per_second,
        tier: parse_tier(&tier)?,
        supports_vision: supports_vision != 0,
        reputation,
        tasks_completed: tasks_completed as u64,
        created_at: timestamp::parse(&created_at)?,
        last_seen_at: timestamp::parse(&last_seen_at)?,
    })
}
