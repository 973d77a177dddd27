// [libs/infra/store/src/repositories/account.rs]
/*!
 * APARATO: ACCOUNT REPOSITORY
 * RESPONSABILIDAD: PERSISTENCIA DE CUENTAS Y CONSULTA POR HASH DE CLAVE
 */

use iris_domain_models::{Account, AccountStatus};
use libsql::params;
use tracing::instrument;
use uuid::Uuid;

use crate::client::StoreClient;
use crate::errors::StoreError;
use crate::timestamp;

pub struct AccountRepository<'a> {
    client: &'a StoreClient,
}

impl<'a> AccountRepository<'a> {
    pub fn new(client: &'a StoreClient) -> Self {
        Self { client }
    }

    #[instrument(skip(self, account))]
    pub async fn insert(&self, account: &Account) -> Result<(), StoreError> {
        let conn = self.client.get_connection()?;
        conn.execute(
            "INSERT INTO accounts (id, key_hash, key_prefix, status, created_at, last_activity_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                account.id.to_string(),
                account.key_hash.clone(),
                account.key_prefix.clone(),
                status_label(account.status).to_string(),
                account.created_at.to_rfc3339(),
                account.last_activity_at.to_rfc3339(),
            ],
        )
        .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn find_by_key_hash(&self, key_hash: &str) -> Result<Option<Account>, StoreError> {
        let conn = self.client.get_connection()?;
        let mut rows = conn
            .query(
                "SELECT id, key_hash, key_prefix, status, created_at, last_activity_at
                 FROM accounts WHERE key_hash = ?1",
                params![key_hash.to_string()],
            )
            .await?;

        match rows.next().await? {
            Some(row) => Ok(Some(map_row(&row)?)),
            None => Ok(None),
        }
    }

    #[instrument(skip(self))]
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, StoreError> {
        let conn = self.client.get_connection()?;
        let mut rows = conn
            .query(
                "SELECT id, key_hash, key_prefix, status, created_at, last_activity_at
                 FROM accounts WHERE id = ?1",
                params![id.to_string()],
            )
            .await?;

        match rows.next().await? {
            Some(row) => Ok(Some(map_row(&row)?)),
            None => Ok(None),
        }
    }

    #[instrument(skip(self))]
    pub async fn touch_last_activity(&self, id: Uuid, at: chrono::DateTime<chrono::Utc>) -> Result<(), StoreError> {
        let conn = self.client.get_connection()?;
        conn.execute(
            "UPDATE accounts SET last_activity_at = ?1 WHERE id = ?2",
            params![at.to_rfc3339(), id.to_string()],
        )
        .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn set_status(&self, id: Uuid, status: AccountStatus) -> Result<(), StoreError> {
        let conn = self.client.get_connection()?;
        let affected = conn
            .execute(
                "UPDATE accounts SET status = ?1 WHERE id = ?2",
                params![status_label(status).to_string(), id.to_string()],
            )
            .await?;
        if affected == 0 {
            return Err(StoreError::AccountNotFound);
        }
        Ok(())
    }
}

fn status_label(status: AccountStatus) -> &'static str {
    match status {
        AccountStatus::Active => "active",
        AccountStatus::Suspended => "suspended",
        AccountStatus::Deleted => "deleted",
    }
}

fn parse_status(raw: &str) -> Result<AccountStatus, StoreError> {
    match raw {
        "active" => Ok(AccountStatus::Active),
        "suspended" => Ok(AccountStatus::Suspended),
        "deleted" => Ok(AccountStatus::Deleted),
        other => Err(StoreError::MappingError(format!("unknown account status '{other}'"))),
    }
}

fn map_row(row: &libsql::Row) -> Result<Account, StoreError> {
    let id: String = row.get(0)?;
    let key_hash: String = row.get(1)?;
    let key_prefix: String = row.get(2)?;
    let status: String = row.get(3)?;
    let created_at: String = row.get(4)?;
    let last_activity_at: String = row.get(5)?;

    Ok(Account {
        id: Uuid::parse_str(&id).map_err(|e| StoreError::MappingError(e.to_string()))?,
        key_hash,
        key_prefix,
        status: parse_status(&status)?,
        created_at: timestamp::parse(&created_at)?,
        last_activity_at: timestamp::parse(&last_activity_at)?,
    })
}
