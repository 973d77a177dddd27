// [libs/domain/classifier/src/classifier_trait.rs]
/*!
 * APARATO: CLASSIFIER CONTRACT (V1.0)
 * RESPONSABILIDAD: SEÑA ENCHUFABLE QUE MAPEA UN PROMPT A UNA DIFICULTAD
 */

use async_trait::async_trait;
use iris_domain_models::Difficulty;

use crate::errors::ClassifierError;

/// Everything the classifier may need beyond the raw prompt text.
#[derive(Debug, Clone, Default)]
pub struct ClassifyContext {
    /// Subtask count once the Divider has already run, if known.
    pub subtask_count: Option<usize>,
    pub has_files: bool,
}

#[async_trait]
pub trait Classifier: Send + Sync {
    async fn classify(&self, prompt: &str, ctx: &ClassifyContext) -> Result<Difficulty, ClassifierError>;
}
