// [apps/coordinator/src/services/aggregator.rs]
/*!
 * APARATO: RESULT AGGREGATOR (V1.0)
 * RESPONSABILIDAD: FUSIÓN DE RESPUESTAS DE SUBTAREAS EN LA RESPUESTA FINAL DE LA TAREA
 */

use std::collections::HashSet;

use iris_domain_models::TaskMode;

/// Below this mean pairwise similarity, with at least this many responses, the
/// consensus winner is flagged rather than presented as settled agreement.
const LOW_CONSENSUS_THRESHOLD: f64 = 0.30;
const LOW_CONSENSUS_MIN_RESPONSES: usize = 3;

/// `completed` pairs each finished subtask's prompt with the response it produced,
/// in the order subtasks were dispatched.
pub fn aggregate(mode: TaskMode, completed: &[(String, String)]) -> String {
    match mode {
        TaskMode::Subtasks => aggregate_subtasks(completed),
        TaskMode::Consensus => aggregate_consensus(&completed.iter().map(|(_, r)| r.clone()).collect::<Vec<_>>()),
        TaskMode::Context => aggregate_context(completed),
    }
}

/// Builds a structured document: a title inferred from the subtask prompts'
/// dominant verb, and one section per subtask titled from its own prompt.
fn aggregate_subtasks(completed: &[(String, String)]) -> String {
    if completed.is_empty() {
        return String::new();
    }

    let title = infer_document_title(completed);
    let sections = completed
        .iter()
        .enumerate()
        .map(|(i, (prompt, response))| format!("## {}. {}\n\n{}", i + 1, section_title(prompt), response.trim()))
        .collect::<Vec<_>>()
        .join("\n\n");

    format!("# {title}\n\n{sections}")
}

fn infer_document_title(completed: &[(String, String)]) -> &'static str {
    let joined = completed.iter().map(|(prompt, _)| prompt.to_lowercase()).collect::<Vec<_>>().join(" ");
    if joined.contains("analyz") || joined.contains("analiz") {
        "Analysis"
    } else if joined.contains("compar") {
        "Comparison"
    } else if joined.contains("summar") || joined.contains("resum") {
        "Summary"
    } else if joined.contains("extract") {
        "Extraction"
    } else if joined.contains("evaluat") || joined.contains("evalua") {
        "Evaluation"
    } else {
        "Task Results"
    }
}

/// A section title inferred from the subtask prompt: its first clause, with any
/// trailing preamble colon stripped, truncated if it runs long.
fn section_title(prompt: &str) -> String {
    let trimmed = prompt.trim();
    let end = trimmed.find(['.', '\n']).unwrap_or(trimmed.len());
    let head = trimmed[..end].trim_end_matches(':').trim();
    if head.chars().count() <= 80 {
        head.to_string()
    } else {
        format!("{}...", head.chars().take(77).collect::<String>())
    }
}

/// Sorts by the `[Section k]` index each subtask prompt carries (falling back to
/// dispatch order when a prompt carries none) and appends a synthesis footer.
fn aggregate_context(completed: &[(String, String)]) -> String {
    if completed.is_empty() {
        return String::new();
    }

    let mut indexed: Vec<(usize, &str)> = completed
        .iter()
        .enumerate()
        .map(|(dispatch_order, (prompt, response))| {
            let section_index = extract_section_index(prompt).unwrap_or(dispatch_order + 1);
            (section_index, response.trim())
        })
        .collect();
    indexed.sort_by_key(|(index, _)| *index);

    let body = indexed.iter().map(|(_, response)| *response).collect::<Vec<_>>().join("\n\n");
    format!("{body}\n\n---\n\nThis response synthesizes {} context section(s) processed independently.", completed.len())
}

fn extract_section_index(prompt: &str) -> Option<usize> {
    let rest = prompt.trim_start().strip_prefix("[Section ")?;
    let end = rest.find(']')?;
    rest[..end].trim().parse().ok()
}

/// Picks the response with the highest mean Jaccard similarity to the others. If
/// that winner's mean similarity is still below the low-consensus threshold and
/// there were enough replicas to judge agreement meaningfully, the result is
/// flagged rather than presented as settled.
fn aggregate_consensus(responses: &[String]) -> String {
    if responses.is_empty() {
        return String::new();
    }
    if responses.len() == 1 {
        return responses[0].clone();
    }

    let word_sets: Vec<HashSet<String>> = responses.iter().map(|r| word_set(r)).collect();
    let mean_similarities: Vec<f64> = (0..responses.len())
        .map(|i| {
            let total: f64 = (0..responses.len()).filter(|&j| j != i).map(|j| jaccard(&word_sets[i], &word_sets[j])).sum();
            total / (responses.len() - 1) as f64
        })
        .collect();

    let mut winner_index = 0;
    let mut winner_similarity = mean_similarities[0];
    for (i, &similarity) in mean_similarities.iter().enumerate().skip(1) {
        if similarity > winner_similarity {
            winner_index = i;
            winner_similarity = similarity;
        }
    }

    let winner = responses[winner_index].clone();
    if responses.len() >= LOW_CONSENSUS_MIN_RESPONSES && winner_similarity < LOW_CONSENSUS_THRESHOLD {
        format!("Low consensus: workers disagreed significantly on this answer.\n\n{winner}")
    } else {
        winner
    }
}

fn word_set(text: &str) -> HashSet<String> {
    text.to_lowercase().split_whitespace().map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()).to_string()).collect()
}

fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    let intersection = a.intersection(b).count() as f64;
    let union = a.union(b).count() as f64;
    if union == 0.0 {
        0.0
    } else {
        intersection / union
    }
}
