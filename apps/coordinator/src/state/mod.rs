// [apps/coordinator/src/state/mod.rs]
/*!
 * =================================================================
 * APARATO: SOVEREIGN STATE ORCHESTRATOR (V1.0 - COORDINATOR GOLD)
 * CLASIFICACIÓN: APPLICATION STATE (ESTRATO L1-APP)
 * RESPONSABILIDAD: COMPOSICIÓN DE TODOS LOS ESTRATOS DE ESTADO COMPARTIDO
 * =================================================================
 */

pub mod circuit_breaker;
pub mod node_registry;
pub mod stream_hub;
pub mod subtask_signals;

use std::sync::Arc;

use iris_core_crypto_envelope::Keypair;
use iris_domain_classifier::{Classifier, ExternalLlmClassifier, LexicalClassifier};
use iris_infra_store::StoreClient;
use tracing::info;

use crate::services::llm_client::ReqwestCompletionClient;
use circuit_breaker::CircuitBreakerRegistry;
use node_registry::NodeRegistry;
use stream_hub::StreamHub;
use subtask_signals::SubtaskSignals;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<StoreClient>,
    pub node_registry: Arc<NodeRegistry>,
    pub circuit_breakers: Arc<CircuitBreakerRegistry>,
    pub stream_hub: Arc<StreamHub>,
    pub subtask_signals: Arc<SubtaskSignals>,
    pub classifier: Arc<dyn Classifier>,
    pub keypair: Arc<Keypair>,
    pub enrollment_token_secret: String,
}

impl AppState {
    pub fn new(store: StoreClient, keypair: Keypair, enrollment_token_secret: String) -> Self {
        let classifier: Arc<dyn Classifier> = match std::env::var("CLASSIFIER_API_URL") {
            Ok(url) if !url.is_empty() => {
                info!(url, "external classifier configured");
                Arc::new(ExternalLlmClassifier::new(ReqwestCompletionClient::new(url)))
            }
            _ => {
                info!("no CLASSIFIER_API_URL set, using lexical classifier only");
                Arc::new(LexicalClassifier)
            }
        };

        Self {
            store: Arc::new(store),
            node_registry: Arc::new(NodeRegistry::new()),
            circuit_breakers: Arc::new(CircuitBreakerRegistry::new()),
            stream_hub: Arc::new(StreamHub::new()),
            subtask_signals: Arc::new(SubtaskSignals::new()),
            classifier,
            keypair: Arc::new(keypair),
            enrollment_token_secret,
        }
    }
}
