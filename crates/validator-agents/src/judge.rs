//! Text Judge Client: the single boundary to the judgment oracle.
//!
//! Every agent in the pipeline renders a prompt, hands it to a `TextJudge`
//! and parses the free-form text that comes back. This module performs no
//! semantic validation of responses and never retries: backend failures and
//! deadline expiry surface to the caller as `JudgeError`.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use rig::client::CompletionClient;
use rig::completion::Prompt;
use rig::providers::openai;
use serde::Serialize;
use tracing::debug;

use crate::config::ValidatorConfig;
use crate::errors::JudgeError;

/// One judgment call as seen at the oracle boundary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JudgeRequest {
    pub system_role: String,
    pub prompt: String,
    pub temperature: f64,
    pub max_tokens: u64,
    pub model: String,
}

/// Per-run judgment parameters shared by every agent.
#[derive(Debug, Clone, PartialEq)]
pub struct JudgeSettings {
    pub system_role: String,
    pub temperature: f64,
    pub max_tokens: u64,
    pub model: String,
}

impl JudgeSettings {
    pub fn from_config(config: &ValidatorConfig) -> Self {
        Self {
            system_role: config.system_role.clone(),
            temperature: config.judgment_temperature,
            max_tokens: config.max_tokens,
            model: config.endpoint.model.clone(),
        }
    }

    /// Wrap a rendered prompt into a request.
    pub fn request(&self, prompt: String) -> Result<JudgeRequest, JudgeError> {
        if prompt.trim().is_empty() {
            return Err(JudgeError::EmptyPrompt);
        }
        if !(0.0..=1.0).contains(&self.temperature) {
            return Err(JudgeError::InvalidTemperature(self.temperature));
        }
        Ok(JudgeRequest {
            system_role: self.system_role.clone(),
            prompt,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            model: self.model.clone(),
        })
    }
}

/// External judgment oracle: prompt in, free-form text out.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextJudge: Send + Sync {
    async fn judge(&self, request: &JudgeRequest) -> Result<String, JudgeError>;
}

/// `TextJudge` backed by an OpenAI-compatible endpoint through Rig.
///
/// A fresh one-shot agent is built per call so that the system role,
/// temperature and token budget always come from the request.
pub struct RigJudge {
    client: openai::CompletionsClient,
    timeout: Option<Duration>,
}

impl RigJudge {
    pub fn new(client: openai::CompletionsClient, timeout: Option<Duration>) -> Self {
        Self { client, timeout }
    }

    pub fn from_config(config: &ValidatorConfig) -> Result<Self, JudgeError> {
        let client = config
            .client()
            .map_err(|e| JudgeError::Configuration(format!("{e:#}")))?;
        Ok(Self::new(client, config.judge_timeout()))
    }
}

#[async_trait]
impl TextJudge for RigJudge {
    async fn judge(&self, request: &JudgeRequest) -> Result<String, JudgeError> {
        let agent = self
            .client
            .agent(request.model.as_str())
            .preamble(&request.system_role)
            .temperature(request.temperature)
            .max_tokens(request.max_tokens)
            .build();

        let start = Instant::now();
        let call = async { agent.prompt(request.prompt.as_str()).await };
        let response = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, call)
                .await
                .map_err(|_| JudgeError::Timeout(limit))?,
            None => call.await,
        }
        .map_err(|e| JudgeError::Backend(e.to_string()))?;

        debug!(
            model = %request.model,
            prompt_chars = request.prompt.len(),
            response_chars = response.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Judge call complete"
        );
        Ok(response)
    }
}
