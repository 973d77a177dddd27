// [tests/mirror/apps/coordinator/services/aggregator.test.rs]
#[cfg(test)]
mod tests {
    use iris_coordinator::services::aggregator::aggregate;
    use iris_domain_models::TaskMode;

    fn pairs(responses: &[&str]) -> Vec<(String, String)> {
        responses.iter().map(|r| ("do the thing".to_string(), r.to_string())).collect()
    }

    #[test]
    fn subtasks_mode_builds_a_titled_document_with_numbered_sections() {
        let completed = pairs(&["a", "b", "c"]);
        let result = aggregate(TaskMode::Subtasks, &completed);
        assert!(result.starts_with("# Task Results"));
        assert!(result.contains("## 1. do the thing\n\na"));
        assert!(result.contains("## 2. do the thing\n\nb"));
        assert!(result.contains("## 3. do the thing\n\nc"));
    }

    #[test]
    fn consensus_mode_with_a_single_response_returns_it_unchanged() {
        let completed = pairs(&["only answer"]);
        let result = aggregate(TaskMode::Consensus, &completed);
        assert_eq!(result, "only answer");
    }

    #[test]
    fn consensus_mode_with_no_agreement_flags_low_consensus() {
        let completed = pairs(&["apples are red", "oceans are deep", "stars are distant"]);
        let result = aggregate(TaskMode::Consensus, &completed);
        assert!(result.starts_with("Low consensus"));
        assert!(result.contains("apples are red"));
    }

    #[test]
    fn consensus_mode_ignores_punctuation_and_case_when_scoring_similarity() {
        let completed = pairs(&["The Answer Is 42!", "the answer is 42.", "no idea at all"]);
        let result = aggregate(TaskMode::Consensus, &completed);
        assert!(result.to_lowercase().contains("42"));
    }

    #[test]
    fn aggregate_on_an_empty_response_set_never_panics() {
        let completed: Vec<(String, String)> = vec![];
        assert_eq!(aggregate(TaskMode::Consensus, &completed), "");
        assert_eq!(aggregate(TaskMode::Subtasks, &completed), "");
        assert_eq!(aggregate(TaskMode::Context, &completed), "");
    }
}
