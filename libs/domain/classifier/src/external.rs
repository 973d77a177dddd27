// [libs/domain/classifier/src/external.rs]
/*!
 * APARATO: EXTERNAL LLM CLASSIFIER (V1.0)
 * RESPONSABILIDAD: CLASIFICACION PREFERIDA VIA COMPLETADOR DE TEXTO EXTERNO,
 * CON RESPALDO SILENCIOSO AL CLASIFICADOR LEXICO ANTE CUALQUIER FALLO
 */

use std::time::Duration;

use async_trait::async_trait;
use iris_domain_models::Difficulty;
use tracing::{instrument, warn};

use crate::classifier_trait::{Classifier, ClassifyContext};
use crate::errors::ClassifierError;
use crate::lexical::LexicalClassifier;

const COMPLETION_TIMEOUT: Duration = Duration::from_secs(10);
const PROMPT_TRUNCATE_CHARS: usize = 1_000;

const SYSTEM_PROMPT: &str = "You classify a user prompt into exactly one of three difficulty \
classes: Simple (a single direct question or short task), Complex (requires analysis, \
comparison, or multiple steps), Advanced (requires deep reasoning, architecture-level \
thinking, or formal rigor). Respond with a single word: simple, complex, or advanced.";

/// The external collaborator this classifier delegates to. Kept as a trait so
/// the concrete provider (and its auth, retries, model choice) stays outside
/// this crate's concerns — the seam the difficulty classifier's third-party
/// LLM call is pluggable at.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, system: &str, user: &str) -> Result<String, ClassifierError>;
}

fn parse_response(raw: &str) -> Option<Difficulty> {
    let lower = raw.to_lowercase();
    // Priority Advanced > Complex > Simple over tokenized matches, to avoid
    // a false "Simple" read from a response that mentions multiple classes.
    if lower.contains("advanced") {
        Some(Difficulty::Advanced)
    } else if lower.contains("complex") {
        Some(Difficulty::Complex)
    } else if lower.contains("simple") {
        Some(Difficulty::Simple)
    } else {
        None
    }
}

pub struct ExternalLlmClassifier<C: CompletionClient> {
    client: C,
    fallback: LexicalClassifier,
}

impl<C: CompletionClient> ExternalLlmClassifier<C> {
    pub fn new(client: C) -> Self {
        Self { client, fallback: LexicalClassifier }
    }
}

#[async_trait]
impl<C: CompletionClient> Classifier for ExternalLlmClassifier<C> {
    #[instrument(skip_all)]
    async fn classify(&self, prompt: &str, ctx: &ClassifyContext) -> Result<Difficulty, ClassifierError> {
        let truncated: String = prompt.chars().take(PROMPT_TRUNCATE_CHARS).collect();

        let outcome = tokio::time::timeout(COMPLETION_TIMEOUT, self.client.complete(SYSTEM_PROMPT, &truncated)).await;

        let difficulty = match outcome {
            Err(_elapsed) => {
                warn!("external classifier timed out, falling back to lexical scorer");
                None
            }
            Ok(Err(err)) => {
                warn!(error = %err, "external classifier failed, falling back to lexical scorer");
                None
            }
            Ok(Ok(raw)) if raw.trim().is_empty() => {
                warn!("external classifier returned an empty response, falling back to lexical scorer");
                None
            }
            Ok(Ok(raw)) => match parse_response(&raw) {
                Some(difficulty) => Some(difficulty),
                None => {
                    warn!(response = %raw, "external classifier response was unparsable, falling back to lexical scorer");
                    None
                }
            },
        };

        match difficulty {
            Some(d) => Ok(d),
            None => self.fallback.classify(prompt, ctx).await,
        }
    }
}
