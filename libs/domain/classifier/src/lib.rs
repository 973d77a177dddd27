// [libs/domain/classifier/src/lib.rs]
/*!
 * =================================================================
 * APARATO: DIFFICULTY CLASSIFIER (V1.0 - COORDINATOR GOLD)
 * CLASIFICACIÓN: DOMAIN LOGIC (ESTRATO L2)
 * RESPONSABILIDAD: CONTRATO ENCHUFABLE + RESPALDO LEXICO SIEMPRE DISPONIBLE
 * =================================================================
 */

pub mod classifier_trait;
pub mod errors;
pub mod external;
pub mod lexical;

pub use classifier_trait::{Classifier, ClassifyContext};
pub use errors::ClassifierError;
pub use external::{CompletionClient, ExternalLlmClassifier};
pub use lexical::LexicalClassifier;
