// [apps/worker-sim/src/engine.rs]
/*!
 * APARATO: CANNED COMPLETION ENGINE (V1.0)
 * RESPONSABILIDAD: PRODUCIR UNA RESPUESTA DETERMINISTA SIN INFERENCIA REAL
 *
 * Este módulo no sirve ningún modelo: existe únicamente para ejercitar el
 * protocolo bidireccional y la selección del registry de extremo a extremo.
 */

/// Longitud aproximada, en caracteres, de cada fragmento de streaming sintético.
const STREAM_CHUNK_CHARS: usize = 24;

/// Produces a deterministic stand-in completion: echoes the prompt's length
/// and a fixed acknowledgement, so callers can assert on shape without a
/// real model in the loop.
pub fn complete(prompt: &str) -> String {
    format!("[simulated-completion] received {} characters. acknowledged: {}", prompt.chars().count(), summarize(prompt))
}

fn summarize(prompt: &str) -> String {
    let trimmed = prompt.trim();
    if trimmed.chars().count() <= 80 {
        trimmed.to_string()
    } else {
        let head: String = trimmed.chars().take(77).collect();
        format!("{head}...")
    }
}

/// Splits a completed response into fixed-size pieces for synthetic streaming,
/// preserving char boundaries.
pub fn stream_chunks(response: &str) -> Vec<String> {
    let chars: Vec<char> = response.chars().collect();
    if chars.is_empty() {
        return Vec::new();
    }
    chars.chunks(STREAM_CHUNK_CHARS).map(|piece| piece.iter().collect()).collect()
}
