// [apps/coordinator/src/bin/seed.rs]
//! =================================================================
//! APARATO: ACCOUNT SEEDER (V1.0 - COORDINATOR GOLD)
//! CLASIFICACIÓN: INFRASTRUCTURE UTILITY (ESTRATO L3)
//! RESPONSABILIDAD: EMISIÓN DE CUENTAS Y TOKENS DE ENROLAMIENTO FUERA DE LINEA
//! =================================================================

use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use iris_coordinator::services::account_gate::{AccountGate, EnrollmentGate};
use iris_infra_store::StoreClient;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "seed", about = "issues Iris admission credentials outside the wire protocol")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Mints a fresh 16-digit account key and prints its display form once.
    Account,
    /// Mints a single-use enrollment token for legacy, account-less node registration.
    EnrollmentToken,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt().with_env_filter("info").with_target(false).init();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").expect("CRITICAL_FAULT: DATABASE_URL is missing");
    let database_auth_token = std::env::var("DATABASE_AUTH_TOKEN").ok();

    let store = match StoreClient::connect(&database_url, database_auth_token.as_deref()).await {
        Ok(store) => store,
        Err(error) => {
            error!("❌ [SEED_FAULT]: store connection collapsed: {}", error);
            return Err(anyhow::anyhow!(error));
        }
    };

    match cli.command {
        Command::Account => {
            let issued = AccountGate::new(&store).generate().await.map_err(|e| anyhow::anyhow!(e))?;
            info!(account_id = %issued.account.id, "💠 [ACCOUNT_ISSUED]");
            println!("account_id: {}", issued.account.id);
            println!("account_key: {}", issued.display_key);
            println!("(this key is shown once; it is never recoverable from storage)");
        }
        Command::EnrollmentToken => {
            let secret = std::env::var("ENROLLMENT_TOKEN_SECRET")
                .expect("CRITICAL_FAULT: ENROLLMENT_TOKEN_SECRET is missing");
            let token = EnrollmentGate::new(&store, &secret).issue_token().await.map_err(|e| anyhow::anyhow!(e))?;
            info!("💠 [ENROLLMENT_TOKEN_ISSUED]");
            println!("enrollment_token: {token}");
            println!("(single-use; consumed on the node's first NODE_REGISTER frame)");
        }
    }

    Ok(())
}
