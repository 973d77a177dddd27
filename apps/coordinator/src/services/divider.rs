// [apps/coordinator/src/services/divider.rs]
/*!
 * APARATO: PROMPT DIVIDER (V1.0)
 * RESPONSABILIDAD: DESCOMPOSICIÓN DE UN PROMPT EN SUBTAREAS SEGÚN EL MODO DE TAREA
 */

const CONSENSUS_REPLICAS: usize = 3;
const CONTEXT_CHUNK_CHARS: usize = 4000;
const CONTEXT_CHUNK_OVERLAP: usize = 200;

/// Subtasks mode: tries an enumerated list first, then an "X, Y, Z" extract/analyze
/// pattern, then a multi-sentence split; the first strategy yielding >= 2 pieces wins.
/// Falls back to the whole prompt as a single piece if nothing splits.
pub fn divide_subtasks(prompt: &str) -> Vec<String> {
    if let Some(pieces) = split_enumerated_list(prompt) {
        if pieces.len() >= 2 {
            return pieces;
        }
    }
    if let Some(pieces) = split_extract_analyze(prompt) {
        if pieces.len() >= 2 {
            return pieces;
        }
    }
    let sentences = split_sentences(prompt);
    if sentences.len() >= 2 {
        return sentences;
    }
    vec![prompt.trim().to_string()]
}

/// Consensus mode: the identical prompt is dispatched N times for majority agreement.
pub fn divide_consensus(prompt: &str) -> Vec<String> {
    (0..CONSENSUS_REPLICAS).map(|_| prompt.to_string()).collect()
}

/// Context mode: splits a long document into overlapping chunks on sentence
/// boundaries, each labeled `[Section k]` for the worker's grounding.
pub fn divide_context(prompt: &str) -> Vec<String> {
    let chars: Vec<char> = prompt.chars().collect();
    if chars.len() <= CONTEXT_CHUNK_CHARS {
        return vec![format!("[Section 1]\n{prompt}")];
    }

    let mut chunks = Vec::new();
    let mut start = 0usize;
    let mut section = 1;

    while start < chars.len() {
        let mut end = (start + CONTEXT_CHUNK_CHARS).min(chars.len());
        if end < chars.len() {
            end = find_sentence_boundary(&chars, end).unwrap_or(end);
        }
        let chunk: String = chars[start..end].iter().collect();
        chunks.push(format!("[Section {section}]\n{}", chunk.trim()));
        section += 1;

        if end >= chars.len() {
            break;
        }
        start = end.saturating_sub(CONTEXT_CHUNK_OVERLAP);
    }

    chunks
}

fn find_sentence_boundary(chars: &[char], near: usize) -> Option<usize> {
    let window_start = near.saturating_sub(200);
    for i in (window_start..near).rev() {
        if matches!(chars[i], '.' | '!' | '?') {
            return Some(i + 1);
        }
    }
    None
}

/// A leading line (or run of lines) immediately before a detected list/pattern,
/// present when the whole thing, trimmed, ends in `:` — e.g. "Analyze the document:".
fn detect_preamble(lines: &[&str]) -> Option<String> {
    let joined = lines.iter().map(|l| l.trim()).filter(|l| !l.is_empty()).collect::<Vec<_>>().join(" ");
    if joined.ends_with(':') {
        Some(joined)
    } else {
        None
    }
}

fn apply_preamble(items: Vec<String>, preamble: Option<String>) -> Vec<String> {
    match preamble {
        Some(preamble) => items.into_iter().map(|item| format!("{preamble} {item}")).collect(),
        None => items,
    }
}

/// Matches `1. foo`, `- foo`, `* foo` style enumerations, one item per line.
fn split_enumerated_list(prompt: &str) -> Option<Vec<String>> {
    let lines: Vec<&str> = prompt.lines().collect();
    let mut first_match_index = None;
    let mut items = Vec::new();

    for (index, line) in lines.iter().enumerate() {
        let trimmed = line.trim();
        let stripped = trimmed.strip_prefix("- ").or_else(|| trimmed.strip_prefix("* ")).or_else(|| {
            let digits_end = trimmed.find(|c: char| !c.is_ascii_digit())?;
            if digits_end == 0 {
                return None;
            }
            let rest = &trimmed[digits_end..];
            rest.strip_prefix(". ").or_else(|| rest.strip_prefix(") "))
        });
        let Some(stripped) = stripped else { continue };
        let content = stripped.trim();
        if content.is_empty() {
            continue;
        }
        first_match_index.get_or_insert(index);
        items.push(content.to_string());
    }

    if items.is_empty() {
        return None;
    }

    let preamble = first_match_index.and_then(|index| detect_preamble(&lines[..index]));
    Some(apply_preamble(items, preamble))
}

/// Matches phrasing like "analyze X, Y and Z" or "compare A, B, C" and splits the
/// comma/and-separated list into one subtask per item.
fn split_extract_analyze(prompt: &str) -> Option<Vec<String>> {
    let lowered = prompt.to_lowercase();
    let (trigger_start, trigger_end) = ["analyze", "analiza", "compare", "compara", "evaluate", "evalua"]
        .iter()
        .filter_map(|trigger| lowered.find(trigger).map(|pos| (pos, pos + trigger.len())))
        .min_by_key(|(start, _)| *start)?;

    let tail = &prompt[trigger_end..];
    let tail = tail.trim_start_matches(':').trim();
    let end = tail.find(['.', '\n']).unwrap_or(tail.len());
    let list_segment = &tail[..end];

    let items: Vec<String> = list_segment
        .replace(" and ", ",")
        .replace(" y ", ",")
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    if items.len() < 2 {
        return None;
    }

    let preamble = detect_preamble(&[&prompt[..trigger_start]]);
    Some(apply_preamble(items.into_iter().map(|item| format!("Analyze: {item}")).collect(), preamble))
}

fn split_sentences(prompt: &str) -> Vec<String> {
    prompt
        .split(['.', '!', '?'])
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
