// [apps/coordinator/src/kernel.rs]
/*!
 * =================================================================
 * APARATO: COORDINATOR SOVEREIGN KERNEL (V1.0 - COORDINATOR GOLD)
 * CLASIFICACIÓN: COMPOSITION ROOT (ESTRATO L1-APP)
 * RESPONSABILIDAD: BOOTSTRAP DE INFRAESTRUCTURA E IGNICIÓN SEGURA
 * =================================================================
 */

use std::net::{IpAddr, SocketAddr};
use std::path::Path;

use iris_core_crypto_envelope::Keypair;
use iris_infra_store::StoreClient;
use tracing::{error, info, instrument};

use crate::routes::create_router;
use crate::services::{stream_sweeper, uptime_ticker, weekly_decay};
use crate::state::AppState;

pub struct CoordinatorKernel {
    pub server_port: u16,
    pub application_state: AppState,
}

impl CoordinatorKernel {
    /// Connects the store (schema bootstrap happens inside `StoreClient::connect`),
    /// loads or mints the coordinator's X25519 identity, and assembles shared state.
    #[instrument(skip(database_auth_token, enrollment_token_secret))]
    pub async fn ignite(
        database_url: &str,
        database_auth_token: Option<&str>,
        server_port: u16,
        keypair_path: &Path,
        enrollment_token_secret: String,
    ) -> Self {
        let store = StoreClient::connect(database_url, database_auth_token)
            .await
            .expect("FATAL: store connection failed, ignition aborted");

        let keypair = Keypair::load_or_generate(keypair_path)
            .expect("FATAL: coordinator keypair could not be loaded or generated");

        Self {
            server_port,
            application_state: AppState::new(store, keypair, enrollment_token_secret),
        }
    }

    /// Spawns the maintenance daemons and serves the HTTP/WS surface until the
    /// process is killed or the listener fails.
    pub async fn launch_sovereign_operations(self) {
        let state = self.application_state.clone();

        stream_sweeper::spawn_stream_sweeper(state.clone()).await;
        uptime_ticker::spawn_uptime_ticker(state.clone()).await;
        weekly_decay::spawn_weekly_decay(state.clone()).await;

        let router = create_router(state);
        let bind_address = SocketAddr::new("0.0.0.0".parse::<IpAddr>().unwrap(), self.server_port);

        info!("🚀 [KERNEL_ONLINE]: coordinator listening at {}", bind_address);

        let listener = tokio::net::TcpListener::bind(bind_address)
            .await
            .expect("CRITICAL_FAULT: failed to bind network port");

        if let Err(error) = axum::serve(listener, router).await {
            error!("💀 [KERNEL_COLLAPSE]: runtime failure: {}", error);
            std::process::exit(1);
        }
    }
}
