// [tests/mirror/libs/domain/classifier/external_classifier_fallback.test.rs]
#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use iris_domain_classifier::{Classifier, ClassifierError, ClassifyContext, CompletionClient, ExternalLlmClassifier};
    use iris_domain_models::Difficulty;

    struct Garbled;
    #[async_trait]
    impl CompletionClient for Garbled {
        async fn complete(&self, _system: &str, _user: &str) -> Result<String, ClassifierError> {
            Ok("I cannot determine that.".into())
        }
    }

    struct Empty;
    #[async_trait]
    impl CompletionClient for Empty {
        async fn complete(&self, _system: &str, _user: &str) -> Result<String, ClassifierError> {
            Ok(String::new())
        }
    }

    // Unparsable output is an intentional silent fallback, not an error (design note §9).
    #[tokio::test]
    async fn unparsable_output_falls_back_without_surfacing_an_error() {
        let classifier = ExternalLlmClassifier::new(Garbled);
        let result = classifier.classify("hello there", &ClassifyContext::default()).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn empty_response_falls_back_to_lexical() {
        let classifier = ExternalLlmClassifier::new(Empty);
        let result = classifier.classify("", &ClassifyContext::default()).await.unwrap();
        assert_eq!(result, Difficulty::Simple);
    }
}
