// [libs/domain/classifier/src/lexical.rs]
/*!
 * APARATO: LEXICAL CLASSIFIER (V1.0)
 * RESPONSABILIDAD: RESPALDO SIEMPRE DISPONIBLE, SIN DEPENDENCIAS EXTERNAS
 *
 * Puntuación en [0,100] a partir de: (a) coincidencias de palabras clave
 * bilingües, (b) longitud en palabras, (c) número de subtareas, (d)
 * presencia de bloques de código o glifos matemáticos. Umbrales: >=70
 * Advanced, >=40 Complex, si no Simple.
 */

use async_trait::async_trait;
use iris_domain_models::Difficulty;

use crate::classifier_trait::{Classifier, ClassifyContext};
use crate::errors::ClassifierError;

const ADVANCED_KEYWORDS: &[&str] = &[
    "architecture", "algorithm", "optimize", "distributed", "concurrency", "prove", "theorem",
    "formal verification", "asymptotic", "arquitectura", "algoritmo", "optimizar", "distribuido",
    "concurrencia", "demostrar", "teorema", "complejidad",
];

const COMPLEX_KEYWORDS: &[&str] = &[
    "analyze", "compare", "design", "refactor", "evaluate", "summarize multiple", "analizar",
    "comparar", "diseñar", "refactorizar", "evaluar", "resumir",
];

const MATH_GLYPHS: &[char] = &['∑', '∫', '√', '∞', 'π', '≤', '≥', '≠', '∀', '∃'];

fn keyword_score(lower_prompt: &str) -> u32 {
    let advanced_hits = ADVANCED_KEYWORDS.iter().filter(|kw| lower_prompt.contains(*kw)).count();
    let complex_hits = COMPLEX_KEYWORDS.iter().filter(|kw| lower_prompt.contains(*kw)).count();
    (advanced_hits as u32 * 15).min(30) + (complex_hits as u32 * 10).min(20)
}

fn length_score(prompt: &str) -> u32 {
    let word_count = prompt.split_whitespace().count();
    if word_count > 500 {
        30
    } else if word_count > 200 {
        20
    } else if word_count > 50 {
        10
    } else {
        0
    }
}

fn subtask_count_score(subtask_count: Option<usize>) -> u32 {
    match subtask_count {
        Some(n) if n >= 5 => 30,
        Some(n) if n >= 3 => 15,
        _ => 0,
    }
}

fn structure_score(prompt: &str) -> u32 {
    let has_code_fence = prompt.contains("```");
    let has_math_glyph = prompt.chars().any(|c| MATH_GLYPHS.contains(&c));
    (has_code_fence as u32 * 15) + (has_math_glyph as u32 * 15)
}

pub fn score(prompt: &str, ctx: &ClassifyContext) -> u32 {
    let lower = prompt.to_lowercase();
    let total = keyword_score(&lower) + length_score(prompt) + subtask_count_score(ctx.subtask_count) + structure_score(prompt);
    total.min(100)
}

pub fn difficulty_from_score(score: u32) -> Difficulty {
    if score >= 70 {
        Difficulty::Advanced
    } else if score >= 40 {
        Difficulty::Complex
    } else {
        Difficulty::Simple
    }
}

#[derive(Debug, Clone, Default)]
pub struct LexicalClassifier;

#[async_trait]
impl Classifier for LexicalClassifier {
    async fn classify(&self, prompt: &str, ctx: &ClassifyContext) -> Result<Difficulty, ClassifierError> {
        Ok(difficulty_from_score(score(prompt, ctx)))
    }
}
