//! Run configuration
//!
//! Everything a run needs is carried in an explicit [`AnalysisConfig`]
//! built once at process start and handed to the [`crate::Analyzer`].

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Model used when nothing else is configured
pub const DEFAULT_MODEL: &str = "llama3.2";

/// Input log read when nothing else is configured
pub const DEFAULT_INPUT: &str = "sample_data/incident_log.txt";

/// Local Ollama endpoint
pub const DEFAULT_OLLAMA_HOST: &str = "http://localhost:11434";

/// Low temperature keeps the model close to deterministic output
pub const DEFAULT_TEMPERATURE: f32 = 0.1;

/// Ollama server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OllamaConfig {
    /// Base URL of the Ollama server
    pub host: String,
    /// Request timeout. `None` waits for the model indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        OllamaConfig {
            host: std::env::var("OLLAMA_HOST")
                .map(|host| normalize_host(&host))
                .unwrap_or_else(|_| DEFAULT_OLLAMA_HOST.to_string()),
            timeout: None,
        }
    }
}

impl OllamaConfig {
    /// Create config for a specific server
    pub fn new(host: &str) -> Self {
        OllamaConfig {
            host: normalize_host(host),
            timeout: None,
        }
    }

    /// Bound the inference call
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Full configuration for one analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Model identifier passed to the server
    pub model: String,
    /// Incident log to analyze
    pub input_path: PathBuf,
    /// Sampling temperature
    pub temperature: f32,
    /// Inference server
    pub ollama: OllamaConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            model: DEFAULT_MODEL.to_string(),
            input_path: PathBuf::from(DEFAULT_INPUT),
            temperature: DEFAULT_TEMPERATURE,
            ollama: OllamaConfig::default(),
        }
    }
}

impl AnalysisConfig {
    /// Read `RCA_MODEL`, `RCA_INPUT` and `OLLAMA_HOST`, falling back to defaults
    pub fn from_env() -> Self {
        AnalysisConfig {
            model: std::env::var("RCA_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            input_path: std::env::var("RCA_INPUT")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_INPUT)),
            ..Self::default()
        }
    }

    /// Analyze a specific log file
    pub fn with_input(mut self, path: impl Into<PathBuf>) -> Self {
        self.input_path = path.into();
        self
    }

    /// Use a specific model
    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    /// Use a specific Ollama server
    pub fn with_ollama(mut self, ollama: OllamaConfig) -> Self {
        self.ollama = ollama;
        self
    }
}

/// Accept `host:port` as well as full URLs, the way the Ollama CLI does
fn normalize_host(host: &str) -> String {
    let host = host.trim().trim_end_matches('/');
    if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("http://{}", host)
    }
}
