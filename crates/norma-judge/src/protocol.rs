//! Wire types for OpenAI-compatible chat completions and the judgment
//! payloads carried inside them.
//!
//! The judge replies with free text that should contain one JSON
//! object. Decoding is tolerant on the first pass: code fences and
//! surrounding prose are stripped, issue lists may arrive under any of
//! the category keys, and scores may arrive as numbers or numeric
//! strings. Anything that still fails to decode is reported as
//! [`ParseOutcome::Malformed`] so the caller can retry under a stricter
//! contract.

use norma_classify::{DocFamily, JudgeVerdict};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Chat completion request/response
// ---------------------------------------------------------------------------

/// One message in a chat-completion conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// `system`, `user`, or `assistant`.
    pub role: String,
    /// Message body.
    pub content: String,
}

impl ChatMessage {
    /// Build a `system` role message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    /// Build a `user` role message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Response format constraint understood by OpenAI-compatible servers.
#[derive(Debug, Clone, Serialize)]
pub struct ResponseFormat {
    /// Constraint kind, e.g. `json_object`.
    #[serde(rename = "type")]
    pub kind: String,
}

impl ResponseFormat {
    /// Force the completion to be a single JSON object.
    pub fn json_object() -> Self {
        Self {
            kind: "json_object".to_string(),
        }
    }
}

/// Chat-completion request body.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    /// Model identifier.
    pub model: String,
    /// Conversation so far.
    pub messages: Vec<ChatMessage>,
    /// Completion token ceiling.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f64,
    /// Optional output constraint, set on strict retries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
}

/// One completion choice.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    /// The assistant message for this choice.
    pub message: AssistantMessage,
}

/// Assistant message inside a completion choice.
#[derive(Debug, Clone, Deserialize)]
pub struct AssistantMessage {
    /// Completion text.
    pub content: String,
}

/// Chat-completion response body. Fields the client never reads are
/// left out and ignored during deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    /// Completion choices; the client uses the first.
    pub choices: Vec<ChatChoice>,
}

// ---------------------------------------------------------------------------
// Judgment payload
// ---------------------------------------------------------------------------

/// One issue as reported on the wire. Every field is optional; the
/// engine fills defaults and attaches document context.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportedIssue {
    /// Stable identifier, if the judge assigned one.
    #[serde(default)]
    pub id: Option<String>,
    /// Short issue title.
    #[serde(default)]
    pub title: Option<String>,
    /// What is wrong.
    #[serde(default)]
    pub description: Option<String>,
    /// Severity label, matched leniently against the severity scale.
    #[serde(default)]
    pub severity: Option<String>,
    /// Value found in the project documentation.
    #[serde(default)]
    pub current_value: Option<String>,
    /// Value the regulation requires.
    #[serde(default)]
    pub required_value: Option<String>,
    /// Suggested remediation.
    #[serde(default)]
    pub recommendation: Option<String>,
    /// Page or sheet where the evidence sits.
    #[serde(default)]
    pub page_reference: Option<String>,
}

/// Judgment payload as the model emits it, one issue list per
/// regulatory category plus an untagged catch-all.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawJudgment {
    #[serde(default)]
    energy_issues: Vec<ReportedIssue>,
    #[serde(default)]
    fire_safety_issues: Vec<ReportedIssue>,
    #[serde(default)]
    accessibility_issues: Vec<ReportedIssue>,
    #[serde(default)]
    residential_issues: Vec<ReportedIssue>,
    #[serde(default)]
    parking_issues: Vec<ReportedIssue>,
    #[serde(default)]
    general_issues: Vec<ReportedIssue>,
    #[serde(default)]
    issues: Vec<ReportedIssue>,
    #[serde(default, deserialize_with = "lenient_score")]
    compliance_score: Option<f64>,
    #[serde(default)]
    verification_notes: Vec<String>,
}

impl RawJudgment {
    /// Flatten the category lists into one issue sequence, in a fixed
    /// category order, and normalize the score.
    fn normalize(self) -> Judgment {
        let mut issues = Vec::new();
        issues.extend(self.energy_issues);
        issues.extend(self.fire_safety_issues);
        issues.extend(self.accessibility_issues);
        issues.extend(self.residential_issues);
        issues.extend(self.parking_issues);
        issues.extend(self.general_issues);
        issues.extend(self.issues);
        Judgment {
            issues,
            compliance_score: self.compliance_score.unwrap_or(0.0).clamp(0.0, 100.0),
            verification_notes: self.verification_notes,
        }
    }
}

/// Decoded judgment for one document/check-set pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Judgment {
    /// Issues across all categories, in wire order.
    pub issues: Vec<ReportedIssue>,
    /// Self-reported score in `[0, 100]`; missing scores decode as 0.
    pub compliance_score: f64,
    /// Free-text notes on what was verified.
    pub verification_notes: Vec<String>,
}

/// Result of decoding one completion into a judgment.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome {
    /// The completion contained a usable judgment object.
    Parsed(Judgment),
    /// No judgment could be decoded; the raw completion is preserved
    /// for the strict retry and for diagnostics.
    Malformed {
        /// Verbatim completion text.
        raw: String,
    },
}

/// Classification verdict as the model emits it.
#[derive(Debug, Clone, Deserialize)]
struct RawClassification {
    #[serde(default)]
    family: Option<String>,
    #[serde(default, deserialize_with = "lenient_score")]
    confidence: Option<f64>,
    #[serde(default)]
    reasoning: String,
}

/// Accept scores as JSON numbers or numeric strings.
fn lenient_score<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Slice out the outermost JSON object in a completion, dropping code
/// fences and surrounding prose. Returns `None` when no braces pair up.
pub fn extract_json(content: &str) -> Option<&str> {
    let start = content.find('{')?;
    let end = content.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&content[start..=end])
}

/// Decode one completion into a judgment, tolerantly.
pub fn decode_judgment(content: &str) -> ParseOutcome {
    let parsed = extract_json(content)
        .and_then(|json| serde_json::from_str::<RawJudgment>(json).ok());
    match parsed {
        Some(raw) => ParseOutcome::Parsed(raw.normalize()),
        None => ParseOutcome::Malformed {
            raw: content.to_string(),
        },
    }
}

/// Decode one completion into a classification verdict.
///
/// Returns `None` when the completion is malformed or names an unknown
/// family; classification treats a failed judge call as an absent
/// signal rather than an error.
pub fn decode_classification(content: &str) -> Option<JudgeVerdict> {
    let raw: RawClassification = serde_json::from_str(extract_json(content)?).ok()?;
    let family: DocFamily = raw.family?.trim().to_lowercase().parse().ok()?;
    Some(JudgeVerdict {
        family,
        confidence: raw.confidence.unwrap_or(0.5).clamp(0.0, 1.0),
        reasoning: raw.reasoning,
    })
}
