// [libs/infra/store/src/client.rs]
/*!
 * APARATO: STORE CLIENT (libSQL)
 * RESPONSABILIDAD: Conexión, bootstrap de esquema y emisión de conexiones soberanas.
 */

use std::sync::Arc;

use libsql::{Builder, Connection, Database};
use tracing::instrument;

use crate::errors::StoreError;
use crate::schema::SCHEMA_STATEMENTS;

/// Envoltorio sobre la base libSQL. Si la URL apunta a un destino en
/// memoria, se conserva una conexión ancla para que el esquema sobreviva
/// entre llamadas sucesivas dentro del mismo proceso.
pub struct StoreClient {
    internal_database_driver: Arc<Database>,
    _memory_persistence_anchor: Option<Connection>,
}

impl StoreClient {
    #[instrument(skip(auth_token), fields(url = %url))]
    pub async fn connect(url: &str, auth_token: Option<&str>) -> Result<Self, StoreError> {
        let is_memory = url == ":memory:" || url.contains("mode=memory");

        let database = if let Some(token) = auth_token.filter(|t| !t.is_empty()) {
            Builder::new_remote(url.to_string(), token.to_string())
                .build()
                .await
                .map_err(|e| StoreError::ConnectionError(e.to_string()))?
        } else {
            Builder::new_local(url)
                .build()
                .await
                .map_err(|e| StoreError::ConnectionError(e.to_string()))?
        };

        let database = Arc::new(database);

        let anchor = if is_memory {
            Some(
                database
                    .connect()
                    .map_err(|e| StoreError::ConnectionError(e.to_string()))?,
            )
        } else {
            None
        };

        let client = Self {
            internal_database_driver: database,
            _memory_persistence_anchor: anchor,
        };

        client.bootstrap_schema().await?;
        Ok(client)
    }

    pub fn get_connection(&self) -> Result<Connection, StoreError> {
        self.internal_database_driver
            .connect()
            .map_err(|e| StoreError::ConnectionError(e.to_string()))
    }

    #[instrument(skip(self))]
    async fn bootstrap_schema(&self) -> Result<(), StoreError> {
        let conn = self.get_connection()?;
        for statement in SCHEMA_STATEMENTS {
            conn.execute(statement, ()).await?;
        }
        tracing::info!("[STORE] esquema soberano verificado");
        Ok(())
    }
}
