// [tests/mirror/apps/worker-sim/engine.test.rs]
#[cfg(test)]
mod tests {
    use iris_worker_sim::engine::{complete, stream_chunks};

    #[test]
    fn completions_are_deterministic_for_the_same_prompt() {
        let first = complete("what is the capital of France");
        let second = complete("what is the capital of France");
        assert_eq!(first, second);
    }

    #[test]
    fn surrounding_whitespace_is_trimmed_from_the_acknowledgement() {
        let response = complete("  hello there  \n");
        assert!(response.contains("acknowledged: hello there"));
    }

    #[test]
    fn multibyte_prompts_never_panic_and_split_on_char_boundaries() {
        let prompt = "caf\u{e9} \u{1f600} \u{4f60}\u{597d}".repeat(50);
        let response = complete(&prompt);
        let chunks = stream_chunks(&response);
        assert_eq!(chunks.concat(), response);
    }

    #[test]
    fn a_response_shorter_than_one_chunk_yields_exactly_one_piece() {
        let chunks = stream_chunks("short");
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0], "short");
    }

    #[test]
    fn different_prompts_produce_different_acknowledgements() {
        let a = complete("tell me about rust");
        let b = complete("tell me about go");
        assert_ne!(a, b);
    }
}
