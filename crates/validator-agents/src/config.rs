//! Judge endpoint and pipeline configuration.
//!
//! ## Precedence (highest to lowest)
//!
//! 1. Values in a TOML deployment file (`ValidatorConfig::from_file`)
//! 2. Environment variables (`VALIDATOR_*`)
//! 3. Built-in defaults
//!
//! The deployment file has the same shape as the judge module descriptor:
//!
//! ```toml
//! [llm_config]
//! model = "qwen2.5-72b-instruct"
//! max_tokens = 1000
//! base_url = "http://localhost:8000/v1"
//!
//! [system_prompt]
//! role = "You are a meticulous verifier of mathematical reasoning."
//!
//! [pipeline]
//! judge_timeout_secs = 120
//! max_parallel_judgments = 4
//! ```

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use rig::providers::openai;
use serde::{Deserialize, Serialize};

const DEFAULT_BASE_URL: &str = "http://localhost:8000/v1";
const DEFAULT_MODEL: &str = "Qwen2.5-72B-Instruct";
const DEFAULT_SYSTEM_ROLE: &str = "You are a careful, rigorous assistant that evaluates \
mathematical reasoning and reports clear, well-justified judgments.";
const DEFAULT_MAX_TOKENS: u64 = 1_000;

/// Temperature for every judgment call. Kept low so verdicts are stable.
pub const JUDGMENT_TEMPERATURE: f64 = 0.3;

const ENV_BASE_URL: &str = "VALIDATOR_BASE_URL";
const ENV_API_KEY: &str = "VALIDATOR_API_KEY";
const ENV_MODEL: &str = "VALIDATOR_MODEL";
const ENV_SYSTEM_ROLE: &str = "VALIDATOR_SYSTEM_ROLE";
const ENV_MAX_TOKENS: &str = "VALIDATOR_MAX_TOKENS";
const ENV_JUDGE_TIMEOUT_SECS: &str = "VALIDATOR_JUDGE_TIMEOUT_SECS";
const ENV_MAX_PARALLEL: &str = "VALIDATOR_MAX_PARALLEL";

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

fn env_parsed<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.parse::<T>().ok())
}

/// OpenAI-compatible inference endpoint serving the judge model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointConfig {
    pub base_url: String,
    /// Most local servers accept any non-empty value.
    pub api_key: String,
    pub model: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            base_url: env_or(ENV_BASE_URL, DEFAULT_BASE_URL),
            api_key: env_or(ENV_API_KEY, "not-needed"),
            model: env_or(ENV_MODEL, DEFAULT_MODEL),
        }
    }
}

/// Top-level validator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidatorConfig {
    pub endpoint: EndpointConfig,
    /// System instruction sent with every judgment prompt.
    pub system_role: String,
    /// Token budget ceiling per judgment response.
    pub max_tokens: u64,
    pub judgment_temperature: f64,
    /// Per-call deadline. `None` waits indefinitely.
    pub judge_timeout_secs: Option<u64>,
    /// Concurrency for the verification and scoring phases (1 = sequential).
    pub max_parallel_judgments: usize,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            endpoint: EndpointConfig::default(),
            system_role: env_or(ENV_SYSTEM_ROLE, DEFAULT_SYSTEM_ROLE),
            max_tokens: env_parsed(ENV_MAX_TOKENS)
                .filter(|v| *v > 0)
                .unwrap_or(DEFAULT_MAX_TOKENS),
            judgment_temperature: JUDGMENT_TEMPERATURE,
            judge_timeout_secs: env_parsed(ENV_JUDGE_TIMEOUT_SECS).filter(|v| *v > 0),
            max_parallel_judgments: env_parsed(ENV_MAX_PARALLEL)
                .filter(|v| *v > 0)
                .unwrap_or(1),
        }
    }
}

/// On-disk deployment descriptor. Every field is optional and overlays the
/// environment/default configuration.
#[derive(Debug, Default, Deserialize)]
struct DeploymentFile {
    #[serde(default)]
    llm_config: LlmSection,
    #[serde(default)]
    system_prompt: SystemPromptSection,
    #[serde(default)]
    pipeline: PipelineSection,
}

#[derive(Debug, Default, Deserialize)]
struct LlmSection {
    model: Option<String>,
    max_tokens: Option<u64>,
    base_url: Option<String>,
    api_key: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct SystemPromptSection {
    role: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct PipelineSection {
    judge_timeout_secs: Option<u64>,
    max_parallel_judgments: Option<usize>,
}

impl ValidatorConfig {
    /// Build from environment, falling back to defaults.
    pub fn from_env() -> Self {
        Self::default()
    }

    /// Load a TOML deployment file over the environment/default values.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml_str(&raw)
            .with_context(|| format!("Failed to load config file {}", path.display()))
    }

    /// Parse TOML deployment text over the environment/default values.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let file: DeploymentFile = toml::from_str(raw).context("Invalid deployment TOML")?;
        let mut config = Self::from_env();

        if let Some(model) = file.llm_config.model {
            config.endpoint.model = model;
        }
        if let Some(max_tokens) = file.llm_config.max_tokens {
            config.max_tokens = max_tokens;
        }
        if let Some(base_url) = file.llm_config.base_url {
            config.endpoint.base_url = base_url;
        }
        if let Some(api_key) = file.llm_config.api_key {
            config.endpoint.api_key = api_key;
        }
        if let Some(role) = file.system_prompt.role {
            config.system_role = role;
        }
        if let Some(secs) = file.pipeline.judge_timeout_secs {
            config.judge_timeout_secs = Some(secs).filter(|s| *s > 0);
        }
        if let Some(n) = file.pipeline.max_parallel_judgments {
            config.max_parallel_judgments = n;
        }

        config.validate().map_err(|e| anyhow::anyhow!(e))?;
        Ok(config)
    }

    /// Validate the config; return an error string if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.endpoint.base_url.trim().is_empty() {
            return Err("endpoint.base_url must not be empty".to_string());
        }
        if self.endpoint.model.trim().is_empty() {
            return Err("endpoint.model must not be empty".to_string());
        }
        if self.max_tokens == 0 {
            return Err("max_tokens must be > 0".to_string());
        }
        if !(0.0..=1.0).contains(&self.judgment_temperature) {
            return Err(format!(
                "judgment_temperature must be in [0, 1], got {}",
                self.judgment_temperature
            ));
        }
        if self.max_parallel_judgments == 0 {
            return Err("max_parallel_judgments must be > 0".to_string());
        }
        Ok(())
    }

    pub fn judge_timeout(&self) -> Option<Duration> {
        self.judge_timeout_secs.map(Duration::from_secs)
    }

    /// Build a Rig OpenAI-compatible client pointed at the judge endpoint.
    pub fn client(&self) -> Result<openai::CompletionsClient> {
        openai::CompletionsClient::builder()
            .api_key(&self.endpoint.api_key)
            .base_url(&self.endpoint.base_url)
            .build()
            .with_context(|| format!("Failed to build judge client ({})", self.endpoint.base_url))
    }
}

/// Check if an inference endpoint is reachable (GET `/models`).
pub async fn check_endpoint(url: &str, api_key: Option<&str>) -> bool {
    let models_url = format!("{}/models", url.trim_end_matches('/'));
    let mut request = reqwest::Client::new()
        .get(&models_url)
        .timeout(Duration::from_secs(5));
    if let Some(key) = api_key {
        request = request.bearer_auth(key);
    }
    match request.send().await {
        Ok(resp) => resp.status().is_success(),
        Err(_) => false,
    }
}
