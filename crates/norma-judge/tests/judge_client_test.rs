//! Contract tests for JudgeClient against an OpenAI-compatible
//! chat-completions server.
//!
//! These tests use wiremock to simulate the hosted judge API. Request
//! and response shapes follow the OpenAI chat-completions contract
//! that Groq and compatible providers serve.
//!
//! ## Behaviors Tested
//!
//! | Behavior | Test |
//! |----------|------|
//! | Judgment decode from a completion | `evaluate_decodes_*` |
//! | Credential rotation on 429 | `evaluate_rotates_*` |
//! | Credential degradation on 401 | `evaluate_degrades_*` |
//! | Attempt budget exhaustion | `evaluate_surfaces_attempts_*` |
//! | Terminal 4xx handling | `evaluate_fails_terminally_*` |
//! | Strict retry after malformed JSON | `evaluate_retries_malformed_*` |
//! | Classification verdicts | `classify_*` |

use norma_classify::DocFamily;
use norma_judge::{JudgeApiError, JudgeClient, JudgeConfig, ParseOutcome};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const COMPLETIONS_PATH: &str = "/openai/v1/chat/completions";

/// Build a JudgeClient pointed at a wiremock server.
async fn test_client(mock_server: &MockServer, keys: &[&str]) -> JudgeClient {
    let endpoint = format!("{}{COMPLETIONS_PATH}", mock_server.uri());
    let config = JudgeConfig::local_mock(&endpoint, keys).unwrap();
    JudgeClient::new(config).unwrap()
}

/// Wrap completion text in the chat-completions response envelope.
fn completion_body(content: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "model": "llama-3.3-70b-versatile",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 250, "completion_tokens": 80, "total_tokens": 330}
    })
}

// ── Judgment decoding ────────────────────────────────────────────────

#[tokio::test]
async fn evaluate_decodes_issue_payload_from_completion() {
    let mock_server = MockServer::start().await;

    let content = r#"{
        "fire_safety_issues": [{
            "title": "Missing second evacuation route",
            "severity": "critical",
            "description": "Only one protected staircase serves floors 3-6.",
            "recommendation": "Add a second protected evacuation route."
        }],
        "compliance_score": 55,
        "verification_notes": ["Checked evacuation plans on sheets A-301 to A-304."]
    }"#;

    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .and(header("Authorization", "Bearer test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(content)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server, &["test-key"]).await;
    let outcome = client
        .evaluate("Verify fire evacuation routes.", "Project: six-floor block.")
        .await
        .unwrap();

    match outcome {
        ParseOutcome::Parsed(judgment) => {
            assert_eq!(judgment.issues.len(), 1);
            assert_eq!(judgment.issues[0].severity.as_deref(), Some("critical"));
            assert_eq!(judgment.compliance_score, 55.0);
            assert_eq!(judgment.verification_notes.len(), 1);
        }
        other => panic!("expected Parsed, got: {other:?}"),
    }
}

#[tokio::test]
async fn evaluate_decodes_fenced_completion() {
    let mock_server = MockServer::start().await;

    let content = "```json\n{\"general_issues\": [], \"compliance_score\": 92}\n```";
    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(content)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server, &["test-key"]).await;
    let outcome = client.evaluate("brief", "evidence").await.unwrap();
    match outcome {
        ParseOutcome::Parsed(judgment) => assert_eq!(judgment.compliance_score, 92.0),
        other => panic!("expected Parsed, got: {other:?}"),
    }
}

// ── Credential rotation on 429 ───────────────────────────────────────

#[tokio::test]
async fn evaluate_rotates_to_next_credential_on_throttle() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .and(header("Authorization", "Bearer key-a"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .and(header("Authorization", "Bearer key-b"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("{}")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server, &["key-a", "key-b"]).await;
    let outcome = client.evaluate("brief", "evidence").await.unwrap();
    assert!(matches!(outcome, ParseOutcome::Parsed(_)));

    let stats = client.credential_stats();
    assert_eq!(stats[0].throttle_hits, 1);
    assert!(!stats[0].degraded);
    assert_eq!(stats[1].uses, 1);
}

#[tokio::test]
async fn evaluate_surfaces_attempts_exhausted_when_always_throttled() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
        .expect(3)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server, &["only-key"]).await;
    let result = client.evaluate("brief", "evidence").await;
    match result.unwrap_err() {
        JudgeApiError::AttemptsExhausted { attempts } => assert_eq!(attempts, 3),
        other => panic!("expected AttemptsExhausted, got: {other:?}"),
    }
}

// ── Credential degradation on 401 ────────────────────────────────────

#[tokio::test]
async fn evaluate_degrades_rejected_credential_and_skips_it() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .and(header("Authorization", "Bearer revoked-key"))
        .respond_with(ResponseTemplate::new(401).set_body_string(r#"{"error":"invalid api key"}"#))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .and(header("Authorization", "Bearer live-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("{}")))
        .expect(2)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server, &["revoked-key", "live-key"]).await;

    let first = client.evaluate("brief", "evidence").await.unwrap();
    assert!(matches!(first, ParseOutcome::Parsed(_)));
    // The degraded credential must not be leased again.
    let second = client.evaluate("brief", "evidence").await.unwrap();
    assert!(matches!(second, ParseOutcome::Parsed(_)));

    let stats = client.credential_stats();
    assert_eq!(stats[0].auth_failures, 1);
    assert!(stats[0].degraded);
    assert_eq!(stats[0].uses, 1);
    assert_eq!(stats[1].uses, 2);
}

#[tokio::test]
async fn evaluate_errors_when_every_credential_degrades() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server, &["only-key"]).await;
    let result = client.evaluate("brief", "evidence").await;
    match result.unwrap_err() {
        JudgeApiError::NoUsableCredential => {}
        other => panic!("expected NoUsableCredential, got: {other:?}"),
    }
}

// ── Terminal and transient statuses ──────────────────────────────────

#[tokio::test]
async fn evaluate_fails_terminally_on_unretryable_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .respond_with(
            ResponseTemplate::new(400).set_body_string(r#"{"error":"model not found"}"#),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server, &["test-key"]).await;
    let result = client.evaluate("brief", "evidence").await;
    match result.unwrap_err() {
        JudgeApiError::Api { status, body, .. } => {
            assert_eq!(status, 400);
            assert!(body.contains("model not found"));
        }
        other => panic!("expected Api, got: {other:?}"),
    }
}

#[tokio::test]
async fn evaluate_recovers_after_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("{}")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server, &["test-key"]).await;
    let outcome = client.evaluate("brief", "evidence").await.unwrap();
    assert!(matches!(outcome, ParseOutcome::Parsed(_)));
}

// ── Strict retry after malformed JSON ────────────────────────────────

#[tokio::test]
async fn evaluate_retries_malformed_completion_with_strict_contract() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(
            "I reviewed the documents and found no major problems.",
        )))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    // The retry must enforce the JSON response format.
    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .and(body_string_contains("json_object"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(
            r#"{"general_issues": [], "compliance_score": 88}"#,
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server, &["test-key"]).await;
    let outcome = client.evaluate("brief", "evidence").await.unwrap();
    match outcome {
        ParseOutcome::Parsed(judgment) => assert_eq!(judgment.compliance_score, 88.0),
        other => panic!("expected Parsed, got: {other:?}"),
    }
}

#[tokio::test]
async fn evaluate_reports_malformed_when_strict_retry_also_fails() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(
            "Everything looks broadly acceptable to me.",
        )))
        .expect(2)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server, &["test-key"]).await;
    let outcome = client.evaluate("brief", "evidence").await.unwrap();
    match outcome {
        ParseOutcome::Malformed { raw } => {
            assert!(raw.contains("broadly acceptable"));
        }
        other => panic!("expected Malformed, got: {other:?}"),
    }
}

// ── Classification verdicts ──────────────────────────────────────────

#[tokio::test]
async fn classify_parses_family_verdict() {
    let mock_server = MockServer::start().await;

    let content = r#"{"family": "drawing", "confidence": 0.9, "reasoning": "column grid and dimension chains"}"#;
    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(content)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server, &["test-key"]).await;
    let verdict = client.classify("SCALE 1:100 ...").await.unwrap().unwrap();
    assert_eq!(verdict.family, DocFamily::Drawing);
    assert_eq!(verdict.confidence, 0.9);
}

#[tokio::test]
async fn classify_returns_none_on_malformed_completion() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(
            "This looks like a floor plan to me.",
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server, &["test-key"]).await;
    let verdict = client.classify("excerpt").await.unwrap();
    assert!(verdict.is_none());
}
