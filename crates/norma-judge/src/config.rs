//! Judge client configuration.
//!
//! Configures the chat-completion endpoint used for compliance judgment
//! calls. Defaults point to the hosted Groq OpenAI-compatible API.
//! Override via environment variables or explicit construction for
//! staging/testing.

use url::Url;
use zeroize::Zeroizing;

/// Default OpenAI-compatible chat-completions endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.groq.com/openai/v1/chat/completions";

/// Default judgment model.
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

/// Configuration for connecting to the judge API.
///
/// Custom `Debug` implementation redacts the `credentials` field
/// to prevent key leakage in log output.
#[derive(Clone)]
pub struct JudgeConfig {
    /// Full chat-completions URL.
    /// Default: <https://api.groq.com/openai/v1/chat/completions>
    pub endpoint: Url,
    /// Model identifier sent with every request.
    pub model: String,
    /// Completion token ceiling per request.
    pub max_tokens: u32,
    /// Sampling temperature. Low values keep judgments stable.
    pub temperature: f64,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Retry budget per logical call, spanning credential rotations.
    pub max_attempts: u32,
    /// Pause before each request to stay under provider rate limits.
    pub throttle_pause_ms: u64,
    /// Bearer keys rotated through on throttle or rejection.
    pub credentials: Vec<Zeroizing<String>>,
}

impl std::fmt::Debug for JudgeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JudgeConfig")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .field("timeout_secs", &self.timeout_secs)
            .field("max_attempts", &self.max_attempts)
            .field("throttle_pause_ms", &self.throttle_pause_ms)
            .field("credentials", &format!("[{} REDACTED]", self.credentials.len()))
            .finish()
    }
}

impl JudgeConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `NORMA_JUDGE_ENDPOINT` (default: `https://api.groq.com/openai/v1/chat/completions`)
    /// - `NORMA_JUDGE_MODEL` (default: `llama-3.3-70b-versatile`)
    /// - `NORMA_JUDGE_KEY` and/or `NORMA_JUDGE_KEY_1`, `NORMA_JUDGE_KEY_2`, ...
    ///   (at least one required; numbered keys are read until the first gap)
    /// - `NORMA_JUDGE_TIMEOUT_SECS` (default: 30)
    /// - `NORMA_JUDGE_MAX_ATTEMPTS` (default: 3)
    /// - `NORMA_JUDGE_THROTTLE_PAUSE_MS` (default: 100)
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut credentials = Vec::new();
        if let Ok(key) = std::env::var("NORMA_JUDGE_KEY") {
            if !key.is_empty() {
                credentials.push(Zeroizing::new(key));
            }
        }
        for i in 1.. {
            match std::env::var(format!("NORMA_JUDGE_KEY_{i}")) {
                Ok(key) if !key.is_empty() => credentials.push(Zeroizing::new(key)),
                _ => break,
            }
        }
        if credentials.is_empty() {
            return Err(ConfigError::MissingCredentials);
        }

        Ok(Self {
            endpoint: env_url("NORMA_JUDGE_ENDPOINT", DEFAULT_ENDPOINT)?,
            model: std::env::var("NORMA_JUDGE_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            max_tokens: 4096,
            temperature: 0.1,
            timeout_secs: env_number("NORMA_JUDGE_TIMEOUT_SECS", 30),
            max_attempts: env_number("NORMA_JUDGE_MAX_ATTEMPTS", 3),
            throttle_pause_ms: env_number("NORMA_JUDGE_THROTTLE_PAUSE_MS", 100),
            credentials,
        })
    }

    /// Create a configuration pointing to a local mock server (for testing).
    ///
    /// Throttle pauses are zeroed so rotation paths run at full speed
    /// under test.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUrl` if `endpoint` cannot be parsed.
    pub fn local_mock(endpoint: &str, keys: &[&str]) -> Result<Self, ConfigError> {
        Ok(Self {
            endpoint: Url::parse(endpoint)
                .map_err(|e| ConfigError::InvalidUrl("endpoint".to_string(), e.to_string()))?,
            model: DEFAULT_MODEL.to_string(),
            max_tokens: 4096,
            temperature: 0.1,
            timeout_secs: 5,
            max_attempts: 3,
            throttle_pause_ms: 0,
            credentials: keys
                .iter()
                .map(|k| Zeroizing::new((*k).to_string()))
                .collect(),
        })
    }
}

fn env_url(var: &str, default: &str) -> Result<Url, ConfigError> {
    let raw = std::env::var(var).unwrap_or_else(|_| default.to_string());
    Url::parse(&raw).map_err(|e| ConfigError::InvalidUrl(var.to_string(), e.to_string()))
}

fn env_number<T: std::str::FromStr>(var: &str, default: T) -> T {
    std::env::var(var)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// No credential was supplied in the environment.
    #[error("no judge credential found; set NORMA_JUDGE_KEY or NORMA_JUDGE_KEY_1..N")]
    MissingCredentials,
    /// A URL variable failed to parse.
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
}
