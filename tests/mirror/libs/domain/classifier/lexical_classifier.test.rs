// [tests/mirror/libs/domain/classifier/lexical_classifier.test.rs]
#[cfg(test)]
mod tests {
    use iris_domain_classifier::{Classifier, ClassifyContext, LexicalClassifier};
    use iris_domain_models::Difficulty;

    #[tokio::test]
    async fn short_question_classifies_as_simple() {
        let classifier = LexicalClassifier;
        let result = classifier.classify("What time is it?", &ClassifyContext::default()).await.unwrap();
        assert_eq!(result, Difficulty::Simple);
    }

    #[tokio::test]
    async fn many_subtasks_and_keywords_push_toward_advanced() {
        let classifier = LexicalClassifier;
        let ctx = ClassifyContext { subtask_count: Some(6), has_files: false };
        let prompt = "Architect a distributed algorithm, prove its correctness, and optimize its concurrency.";
        let result = classifier.classify(prompt, &ctx).await.unwrap();
        assert_eq!(result, Difficulty::Advanced);
    }
}
