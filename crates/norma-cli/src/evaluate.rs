//! # Evaluate Subcommand
//!
//! Runs the full compliance evaluation for one project: resolves
//! applicability, judges every `(floor, document)` pair against the
//! configured judgment endpoint, and prints the aggregated
//! [`ComplianceResult`] as JSON.
//!
//! The judge endpoint and credentials come from the `NORMA_JUDGE_*`
//! environment variables; `--endpoint` plus `--key` override them for
//! staging and local deployments. An optional `--timeout-secs` arms a
//! watchdog that cancels the run: pairs already in flight finish and
//! aggregate, undispatched pairs come back unresolved.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Args;
use url::Url;
use zeroize::Zeroizing;

use norma_core::{FloorRange, UseAssignment};
use norma_corpus::Corpus;
use norma_engine::{
    resolve, CancelToken, ComplianceResult, Orchestrator, OrchestratorConfig, ProjectInput,
    ResolverConfig,
};
use norma_judge::{JudgeClient, JudgeConfig, DEFAULT_MODEL};

use crate::{print_json, read_json, write_json};

/// Arguments for the `norma evaluate` subcommand.
#[derive(Args, Debug)]
pub struct EvaluateArgs {
    /// Use assignment JSON file.
    #[arg(value_name = "ASSIGNMENT")]
    pub assignment: PathBuf,

    /// Plain-text file with the project's extracted text.
    #[arg(value_name = "TEXT_FILE")]
    pub text: PathBuf,

    /// Project name recorded in the result.
    #[arg(long)]
    pub name: String,

    /// Corpus manifest (YAML or JSON). Defaults to the built-in catalog.
    #[arg(long)]
    pub manifest: Option<PathBuf>,

    /// Lowest floor of the evaluated range.
    #[arg(long, default_value_t = -5, allow_hyphen_values = true)]
    pub lowest: i32,

    /// Highest floor of the evaluated range.
    #[arg(long, default_value_t = 20)]
    pub highest: i32,

    /// Cancel the run after this many seconds.
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Maximum judge calls in flight at once.
    #[arg(long, default_value_t = 4)]
    pub max_in_flight: usize,

    /// Judgment endpoint URL, overriding `NORMA_JUDGE_ENDPOINT`.
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Credential for the overridden endpoint. Repeat to supply a pool.
    #[arg(long)]
    pub key: Vec<String>,

    /// Model identifier for the overridden endpoint.
    #[arg(long)]
    pub model: Option<String>,

    /// Also write the result to a file (always indented).
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute the evaluate subcommand.
pub fn run_evaluate(args: &EvaluateArgs, pretty: bool) -> Result<u8> {
    let result = cmd_evaluate(args)?;
    if let Some(path) = &args.output {
        write_json(path, &result)?;
    }
    print_json(&result, pretty)?;
    Ok(0)
}

fn cmd_evaluate(args: &EvaluateArgs) -> Result<ComplianceResult> {
    let assignment: UseAssignment = read_json(&args.assignment)?;
    let text = std::fs::read_to_string(&args.text)
        .with_context(|| format!("failed to read {}", args.text.display()))?;
    let corpus = match &args.manifest {
        Some(path) => Corpus::load(path)
            .with_context(|| format!("failed to load corpus from {}", path.display()))?,
        None => Corpus::builtin().context("failed to build the built-in corpus")?,
    };
    let config = ResolverConfig {
        floor_range: FloorRange::new(args.lowest, args.highest)
            .context("invalid floor range")?,
    };
    let applicability =
        resolve(&assignment, &corpus, &config).context("applicability resolution failed")?;
    let project = ProjectInput::new(&args.name, assignment);

    let judge_config = judge_config(args)?;
    let judge = Arc::new(JudgeClient::new(judge_config).context("failed to build judge client")?);
    let orchestrator = Orchestrator::without_sink(
        Arc::clone(&judge),
        OrchestratorConfig {
            max_in_flight: args.max_in_flight,
            ..OrchestratorConfig::default()
        },
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    let result = runtime.block_on(async {
        let cancel = CancelToken::new();
        if let Some(secs) = args.timeout_secs {
            let watchdog = cancel.clone();
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_secs(secs)).await;
                tracing::warn!(timeout_secs = secs, "run timeout reached, cancelling");
                watchdog.cancel();
            });
        }
        orchestrator
            .evaluate(&project, &applicability, &text, &cancel)
            .await
    });

    for stat in judge.credential_stats() {
        tracing::debug!(
            index = stat.index,
            uses = stat.uses,
            throttle_hits = stat.throttle_hits,
            auth_failures = stat.auth_failures,
            degraded = stat.degraded,
            "credential usage"
        );
    }

    Ok(result)
}

fn judge_config(args: &EvaluateArgs) -> Result<JudgeConfig> {
    match &args.endpoint {
        Some(endpoint) => {
            if args.key.is_empty() {
                bail!("--endpoint requires at least one --key");
            }
            Ok(JudgeConfig {
                endpoint: Url::parse(endpoint).context("invalid --endpoint URL")?,
                model: args
                    .model
                    .clone()
                    .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
                max_tokens: 4096,
                temperature: 0.1,
                timeout_secs: 30,
                max_attempts: 3,
                throttle_pause_ms: 0,
                credentials: args.key.iter().cloned().map(Zeroizing::new).collect(),
            })
        }
        None => JudgeConfig::from_env().context("judge configuration"),
    }
}

#[cfg(test)]
mod tests {
    use norma_core::ComplianceStatus;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    const COMPLETIONS_PATH: &str = "/openai/v1/chat/completions";

    fn completion_body(content: &str) -> serde_json::Value {
        serde_json::json!({
            "id": "chatcmpl-test",
            "object": "chat.completion",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }],
            "usage": { "prompt_tokens": 180, "completion_tokens": 40, "total_tokens": 220 }
        })
    }

    fn base_args(dir: &std::path::Path, endpoint: String) -> EvaluateArgs {
        let assignment = dir.join("assignment.json");
        std::fs::write(&assignment, r#"{"primary_use": "residential"}"#).unwrap();
        let text = dir.join("memory.txt");
        std::fs::write(&text, "Descriptive report for a two-storey dwelling.").unwrap();

        EvaluateArgs {
            assignment,
            text,
            name: "Calle Mayor 12".to_string(),
            manifest: None,
            lowest: 0,
            highest: 0,
            timeout_secs: None,
            max_in_flight: 4,
            endpoint: Some(endpoint),
            key: vec!["test-key".to_string()],
            model: None,
            output: None,
        }
    }

    #[test]
    fn endpoint_override_requires_a_key() {
        let dir = tempfile::tempdir().unwrap();
        let mut args = base_args(dir.path(), "http://127.0.0.1:9/unused".to_string());
        args.key.clear();

        let err = cmd_evaluate(&args).unwrap_err();
        assert!(err.to_string().contains("--key"));
    }

    #[test]
    fn full_run_against_a_local_judge() {
        // The mock server needs a live runtime for its background task;
        // cmd_evaluate builds its own, so the two must not nest.
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .unwrap();
        let server = runtime.block_on(MockServer::start());
        let judgment = serde_json::json!({
            "issues": [],
            "compliance_score": 95,
            "verification_notes": ["No deviations found."]
        })
        .to_string();
        runtime.block_on(
            Mock::given(method("POST"))
                .and(path(COMPLETIONS_PATH))
                .respond_with(
                    ResponseTemplate::new(200).set_body_json(completion_body(&judgment)),
                )
                .mount(&server),
        );

        let dir = tempfile::tempdir().unwrap();
        let mut args = base_args(
            dir.path(),
            format!("{}{}", server.uri(), COMPLETIONS_PATH),
        );
        let out = dir.path().join("result.json");
        args.output = Some(out.clone());

        assert_eq!(run_evaluate(&args, false).unwrap(), 0);

        let result: ComplianceResult = read_json(&out).unwrap();
        assert_eq!(result.status, ComplianceStatus::Compliant);
        assert!(result.issues.is_empty());
        assert_eq!(result.summary.total_floors, 1);
    }

    #[test]
    fn malformed_assignment_reports_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let args = base_args(dir.path(), "http://127.0.0.1:9/unused".to_string());
        std::fs::write(&args.assignment, "{broken").unwrap();

        let err = cmd_evaluate(&args).unwrap_err();
        assert!(err.to_string().contains("assignment.json"));
    }
}
