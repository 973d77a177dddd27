// [apps/coordinator/src/main.rs]
/*!
 * =================================================================
 * APARATO: COORDINATOR MAIN ENTRY POINT (V1.0 - COORDINATOR GOLD)
 * CLASIFICACIÓN: APPLICATION SHELL (ESTRATO L3)
 * RESPONSABILIDAD: LECTURA DE ENTORNO E IGNICIÓN DEL KERNEL
 * =================================================================
 */

use std::path::PathBuf;

use dotenvy::dotenv;
use iris_coordinator::kernel::CoordinatorKernel;
use iris_shared_observability::init_tracing;
use tracing::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    init_tracing("iris_coordinator");

    let runtime = tokio::runtime::Builder::new_multi_thread().enable_all().build()?;

    runtime.block_on(async {
        info!("🛰️  [COORDINATOR_BOOT]: ignition sequence starting...");

        let database_url = std::env::var("DATABASE_URL").expect("CRITICAL_FAULT: DATABASE_URL not set");
        let database_auth_token = std::env::var("DATABASE_AUTH_TOKEN").ok();
        let server_port: u16 = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string()).parse().unwrap_or(3000);
        let keypair_path = std::env::var("COORDINATOR_KEYPAIR_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./data/coordinator.key"));
        let enrollment_token_secret =
            std::env::var("ENROLLMENT_TOKEN_SECRET").expect("CRITICAL_FAULT: ENROLLMENT_TOKEN_SECRET not set");

        let kernel = CoordinatorKernel::ignite(
            &database_url,
            database_auth_token.as_deref(),
            server_port,
            &keypair_path,
            enrollment_token_secret,
        )
        .await;

        info!("🚀 [COORDINATOR_ONLINE]: system operational on port {}", server_port);
        kernel.launch_sovereign_operations().await;

        Ok(())
    })
}
