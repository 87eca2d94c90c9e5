//! In-memory chat backend (testing only)
//!
//! `ScriptedBackend` answers every request with a canned reply and keeps the
//! requests it saw, so tests can run the full pipeline without a model server.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::backend::{ChatBackend, ChatRequest};
use crate::error::RcaError;
use crate::Result;

/// Backend that returns a fixed reply
#[derive(Debug)]
pub struct ScriptedBackend {
    reply: std::result::Result<String, String>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl ScriptedBackend {
    /// Always reply with `content`
    pub fn replying(content: impl Into<String>) -> Self {
        ScriptedBackend {
            reply: Ok(content.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Always fail with an inference error
    pub fn failing(message: impl Into<String>) -> Self {
        ScriptedBackend {
            reply: Err(message.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatBackend for ScriptedBackend {
    async fn chat(&self, request: &ChatRequest) -> Result<String> {
        self.requests.lock().unwrap().push(request.clone());
        self.reply.clone().map_err(RcaError::Inference)
    }
}
