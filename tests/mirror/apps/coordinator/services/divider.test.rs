// [tests/mirror/apps/coordinator/services/divider.test.rs]
#[cfg(test)]
mod tests {
    use iris_coordinator::services::divider::{divide_consensus, divide_context, divide_subtasks};

    #[test]
    fn a_single_unsplittable_sentence_falls_back_to_the_whole_prompt() {
        let pieces = divide_subtasks("write a haiku about the ocean");
        assert_eq!(pieces, vec!["write a haiku about the ocean".to_string()]);
    }

    #[test]
    fn multiple_sentences_without_an_enumeration_split_on_sentence_boundaries() {
        let pieces = divide_subtasks("Summarize the article. Then list its key claims.");
        assert_eq!(pieces.len(), 2);
        assert_eq!(pieces[0], "Summarize the article");
        assert_eq!(pieces[1], "Then list its key claims");
    }

    #[test]
    fn spanish_trigger_words_are_also_recognized() {
        let pieces = divide_subtasks("Por favor evalua A, B y C con cuidado.");
        assert_eq!(pieces.len(), 3);
        assert!(pieces.iter().all(|p| p.starts_with("Analyze: ")));
    }

    #[test]
    fn consensus_replicas_are_independent_owned_strings() {
        let pieces = divide_consensus("ping");
        assert_eq!(pieces.len(), 3);
        for piece in &pieces {
            assert_eq!(piece, "ping");
        }
    }

    #[test]
    fn context_chunks_overlap_so_boundary_content_is_not_lost() {
        let long_doc = "The quick brown fox jumps over the lazy dog. ".repeat(400);
        let chunks = divide_context(&long_doc);
        assert!(chunks.len() > 1, "a long document must split into multiple sections");
        for (index, chunk) in chunks.iter().enumerate() {
            assert!(chunk.starts_with(&format!("[Section {}]", index + 1)));
        }
    }
}
