//! The analysis pipeline: load, prompt, infer, validate.

use tracing::{info, info_span, Instrument};

use crate::backend::{ChatBackend, ChatMessage, ChatRequest, ResponseFormat};
use crate::config::AnalysisConfig;
use crate::loader::load_log;
use crate::prompt::Prompts;
use crate::record::RootCauseAnalysis;
use crate::validate::validate_response;
use crate::Result;

/// Runs one incident log through the model and validates the reply.
///
/// The prompts are built once in [`Analyzer::new`] and reused.
pub struct Analyzer<B> {
    config: AnalysisConfig,
    prompts: Prompts,
    backend: B,
}

impl<B: ChatBackend> Analyzer<B> {
    /// Create an analyzer over the given backend
    pub fn new(config: AnalysisConfig, backend: B) -> Result<Self> {
        Ok(Analyzer {
            config,
            prompts: Prompts::new()?,
            backend,
        })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn prompts(&self) -> &Prompts {
        &self.prompts
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Build the two-message request for a log
    pub fn build_request(&self, log: &str) -> ChatRequest {
        ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage::system(self.prompts.system()),
                ChatMessage::user(self.prompts.user(log)),
            ],
            format: ResponseFormat::Json,
            temperature: self.config.temperature,
        }
    }

    /// Read the configured input file
    pub fn load(&self) -> Result<String> {
        info!(path = %self.config.input_path.display(), "reading log");
        load_log(&self.config.input_path)
    }

    /// Send the log to the model and validate its reply
    pub async fn analyze(&self, log: &str) -> Result<RootCauseAnalysis> {
        let request = self.build_request(log);
        let span = info_span!("inference", model = %self.config.model);

        let raw = self.backend.chat(&request).instrument(span).await?;
        let rca = validate_response(&raw)?;

        info!(title = %rca.title, severity = %rca.severity, "analysis validated");
        Ok(rca)
    }

    /// Load the configured log and analyze it
    pub async fn run(&self) -> Result<RootCauseAnalysis> {
        let log = self.load()?;
        self.analyze(&log).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::Role;
    use crate::config::OllamaConfig;
    use crate::error::RcaError;
    use crate::fakes::ScriptedBackend;

    fn config() -> AnalysisConfig {
        AnalysisConfig::default().with_ollama(OllamaConfig::new("localhost:11434"))
    }

    #[test]
    fn test_build_request_shape() {
        let analyzer = Analyzer::new(config(), ScriptedBackend::replying("{}")).unwrap();
        let request = analyzer.build_request("boom");

        assert_eq!(request.model, "llama3.2");
        assert_eq!(request.format, ResponseFormat::Json);
        assert!((request.temperature - 0.1).abs() < f32::EPSILON);
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, Role::System);
        assert_eq!(request.messages[0].content, analyzer.prompts().system());
        assert_eq!(request.messages[1].role, Role::User);
        assert_eq!(request.messages[1].content, "Here is the log data:\n\nboom");
    }

    #[tokio::test]
    async fn test_missing_input_skips_inference() {
        let dir = tempfile::tempdir().unwrap();
        let config = config().with_input(dir.path().join("nope.log"));
        let analyzer = Analyzer::new(config, ScriptedBackend::replying("{}")).unwrap();

        let err = analyzer.run().await.unwrap_err();
        assert!(matches!(err, RcaError::InputNotFound { .. }));
        assert!(analyzer.backend().requests().is_empty());
    }

    #[tokio::test]
    async fn test_inference_failure_propagates() {
        let analyzer = Analyzer::new(config(), ScriptedBackend::failing("connection refused")).unwrap();

        let err = analyzer.analyze("log").await.unwrap_err();
        match err {
            RcaError::Inference(msg) => assert_eq!(msg, "connection refused"),
            other => panic!("expected inference error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_single_attempt_on_malformed_reply() {
        let analyzer = Analyzer::new(config(), ScriptedBackend::replying("not json")).unwrap();

        let err = analyzer.analyze("log").await.unwrap_err();
        assert!(matches!(err, RcaError::Validation(_)));
        assert_eq!(analyzer.backend().requests().len(), 1);
    }
}
