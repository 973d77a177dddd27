// [apps/coordinator/src/services/llm_client.rs]
/*!
 * APARATO: REQWEST COMPLETION CLIENT
 * RESPONSABILIDAD: PUENTE HTTP HACIA UN LLM EXTERNO PARA CLASIFICACIÓN DE DIFICULTAD
 */

use async_trait::async_trait;
use iris_domain_classifier::{ClassifierError, CompletionClient};
use serde::{Deserialize, Serialize};

pub struct ReqwestCompletionClient {
    endpoint: String,
    http: reqwest::Client,
}

impl ReqwestCompletionClient {
    pub fn new(endpoint: String) -> Self {
        Self { endpoint, http: reqwest::Client::new() }
    }
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    system: &'a str,
    user: &'a str,
}

#[derive(Deserialize)]
struct CompletionResponse {
    text: String,
}

#[async_trait]
impl CompletionClient for ReqwestCompletionClient {
    async fn complete(&self, system: &str, user: &str) -> Result<String, ClassifierError> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(&CompletionRequest { system, user })
            .send()
            .await
            .map_err(|e| ClassifierError::Transport(e.to_string()))?;

        let body: CompletionResponse =
            response.json().await.map_err(|e| ClassifierError::Transport(e.to_string()))?;

        Ok(body.text)
    }
}
