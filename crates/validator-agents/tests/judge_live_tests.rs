//! Live judge tests.
//!
//! Tests marked `#[ignore]` need an OpenAI-compatible endpoint configured
//! through `VALIDATOR_BASE_URL` / `VALIDATOR_MODEL` (and `VALIDATOR_API_KEY`
//! if the server checks it). Run them with `cargo test -- --ignored`.
//! The non-ignored tests exercise config-file loading without inference.

use std::io::Write;
use std::sync::Arc;

use selection::ValidationInput;
use validator_agents::{
    check_endpoint, JudgeSettings, RigJudge, SelectionOrchestrator, TextJudge, ValidatorConfig,
};

fn live_config() -> ValidatorConfig {
    let mut config = ValidatorConfig::from_env();
    config.judge_timeout_secs.get_or_insert(120);
    config
}

#[tokio::test]
#[ignore]
async fn test_live_endpoint_reachable() {
    let config = live_config();
    assert!(
        check_endpoint(&config.endpoint.base_url, Some(config.endpoint.api_key.as_str())).await,
        "endpoint {} not reachable",
        config.endpoint.base_url
    );
}

#[tokio::test]
#[ignore]
async fn test_live_verification_prompt_roundtrip() {
    let _ = tracing_subscriber::fmt().with_env_filter("info").try_init();
    let config = live_config();
    let judge = RigJudge::from_config(&config).expect("judge from env config");
    let request = JudgeSettings::from_config(&config)
        .request(
            "Is 2 + 2 = 4 correct? Conclude with \"Reasoning is Valid\" or \"Reasoning is Invalid\"."
                .into(),
        )
        .unwrap();

    let response = judge.judge(&request).await.expect("live judgment");
    assert!(!response.trim().is_empty());
}

#[tokio::test]
#[ignore]
async fn test_live_selection_run() {
    let _ = tracing_subscriber::fmt().with_env_filter("info").try_init();
    let config = live_config();
    let judge: Arc<dyn TextJudge> = Arc::new(RigJudge::from_config(&config).unwrap());
    let orchestrator = SelectionOrchestrator::new(judge, JudgeSettings::from_config(&config));

    let input = ValidationInput::new(
        "What is the sum of all integers from 1 to 100?",
        vec![
            "Pair 1 with 100, 2 with 99, and so on: 50 pairs each summing to 101. \
             50 * 101 = 5050, so the answer is 5050"
                .into(),
            "1 + 100 = 101, and 101 * 100 = 10100, so the answer is 10100".into(),
        ],
    );
    let report = orchestrator.run(&input).await.expect("live selection run");

    assert_eq!(report.result.verification_details.len(), 2);
    assert!(report.result.best_thought_index < 2);
    assert!(report.result.scores.iter().all(|s| (1..=10).contains(s)));
}

#[test]
fn test_deployment_file_feeds_judge_settings() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[llm_config]
model = "grader-7b"
max_tokens = 400

[system_prompt]
role = "You grade arithmetic."
"#
    )
    .unwrap();

    let config = ValidatorConfig::from_file(file.path()).unwrap();
    let settings = JudgeSettings::from_config(&config);
    assert_eq!(settings.model, "grader-7b");
    assert_eq!(settings.max_tokens, 400);
    assert_eq!(settings.system_role, "You grade arithmetic.");
    assert_eq!(settings.temperature, 0.3);
}

#[test]
fn test_missing_deployment_file_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = ValidatorConfig::from_file(&dir.path().join("absent.toml")).unwrap_err();
    assert!(format!("{err:#}").contains("absent.toml"));
}
