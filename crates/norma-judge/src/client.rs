//! Judge API client.
//!
//! Wraps an OpenAI-compatible chat-completions endpoint behind two
//! calls: [`JudgeClient::evaluate`] for compliance judgments and
//! [`JudgeClient::classify`] for document-family verdicts. One retry
//! budget covers transport failures, server errors, throttles, and
//! credential rejections; throttled and rejected credentials rotate
//! through the shared [`CredentialPool`].

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};
use url::Url;

use norma_classify::JudgeVerdict;

use crate::config::JudgeConfig;
use crate::credentials::{CredentialPool, CredentialStats};
use crate::error::JudgeApiError;
use crate::protocol::{
    decode_classification, decode_judgment, ChatMessage, ChatRequest, ChatResponse, ParseOutcome,
    ResponseFormat,
};

/// Base delay between retries (doubles each attempt: 200ms, 400ms, 800ms).
const BASE_DELAY_MS: u64 = 200;

/// System prompt for compliance evaluation calls. Names every key the
/// decoder accepts, so prompt and protocol stay in lockstep.
const EVALUATION_SYSTEM_PROMPT: &str = "You are a building-code compliance reviewer for \
Spanish municipal works licensing. Evaluate the supplied project evidence against each \
check in the brief, citing the evidence for every finding. Respond with a single JSON \
object and nothing else. The object may contain the keys \"energy_issues\", \
\"fire_safety_issues\", \"accessibility_issues\", \"residential_issues\", \
\"parking_issues\", and \"general_issues\", each an array of issue objects; \
\"compliance_score\", a number from 0 to 100; and \"verification_notes\", an array of \
strings describing what was checked. Each issue object may contain \"id\", \"title\", \
\"description\", \"severity\" (one of \"critical\", \"high\", \"medium\", \"low\"), \
\"current_value\", \"required_value\", \"recommendation\", and \"page_reference\". \
Report only issues the evidence supports.";

/// Appended to the user prompt on the strict retry after a malformed
/// completion.
const STRICT_JSON_REMINDER: &str = "Your previous reply could not be parsed. Respond with \
ONLY the JSON object: no prose, no code fences, every key double-quoted.";

/// System prompt for document classification calls.
const CLASSIFICATION_SYSTEM_PROMPT: &str = "You classify construction-project documents. \
Decide whether the excerpt comes from a written technical report (family \"narrative\") \
or from a technical drawing sheet (family \"drawing\"). Respond with a single JSON \
object of the form {\"family\": \"narrative\" or \"drawing\", \"confidence\": a number \
from 0.0 to 1.0, \"reasoning\": a short explanation}.";

/// Client for one judge endpoint and its credential pool.
#[derive(Debug, Clone)]
pub struct JudgeClient {
    http: reqwest::Client,
    endpoint: Url,
    model: String,
    max_tokens: u32,
    temperature: f64,
    max_attempts: u32,
    throttle_pause: Duration,
    pool: Arc<CredentialPool>,
}

impl JudgeClient {
    /// Build a client from configuration.
    pub fn new(config: JudgeConfig) -> Result<Self, JudgeApiError> {
        if config.credentials.is_empty() {
            return Err(JudgeApiError::Config(
                crate::config::ConfigError::MissingCredentials,
            ));
        }
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| JudgeApiError::Http {
                endpoint: "client_init".into(),
                source: e,
            })?;
        Ok(Self {
            http,
            endpoint: config.endpoint,
            model: config.model,
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            max_attempts: config.max_attempts.max(1),
            throttle_pause: Duration::from_millis(config.throttle_pause_ms),
            pool: Arc::new(CredentialPool::new(config.credentials)),
        })
    }

    /// Snapshot per-credential usage counters.
    pub fn credential_stats(&self) -> Vec<CredentialStats> {
        self.pool.stats()
    }

    /// Evaluate project evidence against a check brief.
    ///
    /// A completion that fails to decode is retried once with a strict
    /// JSON contract before being reported as
    /// [`ParseOutcome::Malformed`].
    pub async fn evaluate(
        &self,
        brief: &str,
        evidence: &str,
    ) -> Result<ParseOutcome, JudgeApiError> {
        let user = format!("{brief}\n\n{evidence}");
        let first = self
            .complete(
                vec![
                    ChatMessage::system(EVALUATION_SYSTEM_PROMPT),
                    ChatMessage::user(user.clone()),
                ],
                false,
            )
            .await?;
        match decode_judgment(&first) {
            ParseOutcome::Parsed(judgment) => Ok(ParseOutcome::Parsed(judgment)),
            ParseOutcome::Malformed { raw } => {
                debug!(
                    completion_len = raw.len(),
                    "judgment completion malformed, retrying under strict contract"
                );
                let second = self
                    .complete(
                        vec![
                            ChatMessage::system(EVALUATION_SYSTEM_PROMPT),
                            ChatMessage::user(format!("{user}\n\n{STRICT_JSON_REMINDER}")),
                        ],
                        true,
                    )
                    .await?;
                Ok(decode_judgment(&second))
            }
        }
    }

    /// Ask the judge which family a document excerpt belongs to.
    ///
    /// Returns `Ok(None)` when the completion is malformed; a missing
    /// verdict is an absent classification signal, not an error.
    pub async fn classify(&self, excerpt: &str) -> Result<Option<JudgeVerdict>, JudgeApiError> {
        let completion = self
            .complete(
                vec![
                    ChatMessage::system(CLASSIFICATION_SYSTEM_PROMPT),
                    ChatMessage::user(excerpt),
                ],
                false,
            )
            .await?;
        Ok(decode_classification(&completion))
    }

    /// Send one chat-completion request, rotating credentials until a
    /// completion arrives or the attempt budget is spent.
    async fn complete(
        &self,
        messages: Vec<ChatMessage>,
        enforce_json: bool,
    ) -> Result<String, JudgeApiError> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            response_format: enforce_json.then(ResponseFormat::json_object),
        };
        for attempt in 0..self.max_attempts {
            if !self.throttle_pause.is_zero() {
                tokio::time::sleep(self.throttle_pause).await;
            }
            let lease = self.pool.acquire().ok_or(JudgeApiError::NoUsableCredential)?;
            let sent = self
                .http
                .post(self.endpoint.clone())
                .bearer_auth(lease.secret())
                .json(&request)
                .send()
                .await;
            let response = match sent {
                Ok(response) => response,
                Err(e) => {
                    let delay = backoff_delay(attempt);
                    warn!(
                        attempt = attempt + 1,
                        max_attempts = self.max_attempts,
                        "judge request failed, retrying in {delay:?}: {e}"
                    );
                    tokio::time::sleep(delay).await;
                    continue;
                }
            };
            let status = response.status();
            match status.as_u16() {
                429 => {
                    self.pool.note_throttle(lease.index());
                    let wait = retry_after(&response).unwrap_or_else(|| backoff_delay(attempt));
                    warn!(
                        credential = lease.index(),
                        "judge credential throttled, rotating after {wait:?}"
                    );
                    tokio::time::sleep(wait).await;
                    continue;
                }
                401 | 403 => {
                    self.pool.mark_degraded(lease.index());
                    warn!(
                        credential = lease.index(),
                        status = status.as_u16(),
                        "judge credential rejected, degraded and rotating"
                    );
                    continue;
                }
                _ => {}
            }
            if status.is_server_error() {
                let delay = backoff_delay(attempt);
                warn!(
                    status = status.as_u16(),
                    "judge API server error, retrying in {delay:?}"
                );
                tokio::time::sleep(delay).await;
                continue;
            }
            if !status.is_success() {
                return Err(JudgeApiError::Api {
                    endpoint: self.endpoint.to_string(),
                    status: status.as_u16(),
                    body: response.text().await.unwrap_or_default(),
                });
            }
            let completion: ChatResponse =
                response.json().await.map_err(|e| JudgeApiError::Deserialization {
                    endpoint: self.endpoint.to_string(),
                    source: e,
                })?;
            return completion
                .choices
                .into_iter()
                .next()
                .map(|choice| choice.message.content)
                .ok_or(JudgeApiError::EmptyCompletion);
        }
        Err(JudgeApiError::AttemptsExhausted {
            attempts: self.max_attempts,
        })
    }
}

fn backoff_delay(attempt: u32) -> Duration {
    Duration::from_millis(BASE_DELAY_MS * 2u64.pow(attempt))
}

fn retry_after(response: &reqwest::Response) -> Option<Duration> {
    response
        .headers()
        .get(reqwest::header::RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}
