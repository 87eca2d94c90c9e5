//! RCA Core: Root Cause Analysis of incident logs with a local LLM
//!
//! Reads an incident log, asks a local Ollama model for a structured report,
//! and validates the reply against the [`RootCauseAnalysis`] record shape.
//!
//! The flow is strictly linear:
//! load log → build prompts → one inference call → validate → report.

pub mod analysis;
pub mod backend;
pub mod config;
pub mod error;
pub mod fakes;
pub mod loader;
pub mod prompt;
pub mod record;
pub mod report;
pub mod validate;

pub use analysis::Analyzer;
pub use backend::{ChatBackend, ChatMessage, ChatRequest, OllamaClient, ResponseFormat, Role};
pub use config::{AnalysisConfig, OllamaConfig};
pub use error::{RcaError, SchemaViolation};
pub use loader::load_log;
pub use prompt::Prompts;
pub use record::RootCauseAnalysis;
pub use report::{format_report, print_report, render_report};
pub use validate::validate_response;

/// Result type for rca-core
pub type Result<T> = std::result::Result<T, RcaError>;

/// RCA agent version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
