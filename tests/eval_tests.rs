//! Tests for the grading presets and the multi-evaluator.

mod common;

use std::sync::Arc;

use serde_json::json;

use common::ScriptedClient;
use deepsearch::cache::MemoryCache;
use deepsearch::error::DeepSearchError;
use deepsearch::eval::{preset, Correctness, Evaluator, MultiEvaluator, PRESET_NAMES};
use deepsearch::types::Role;

#[tokio::test]
async fn frames_preset_sends_rendered_prompt() {
    let client = ScriptedClient::new();
    client.queue_response("Explanation: Both name Paris.\nDecision: TRUE");

    let evaluator = preset("frames", client.clone(), None).unwrap();
    let grade = evaluator
        .grade("Capital of France?", "Paris", "It is Paris.")
        .await
        .unwrap();

    assert_eq!(evaluator.name(), "frames");
    assert_eq!(grade.correct, Correctness::Correct);
    assert_eq!(grade.explanation, "Both name Paris.");

    let request = &client.requests()[0];
    assert_eq!(request.config.model, "gemini/gemini-2.5-pro-preview-06-05");
    assert_eq!(request.messages[0].role, Role::System);
    let prompt = request.messages[1].text();
    assert!(prompt.contains("Capital of France?"));
    assert!(prompt.contains("Paris"));
    assert!(prompt.contains("It is Paris."));
    assert!(!prompt.contains("{QUERY}"));
}

#[tokio::test]
async fn placeholders_inside_inputs_are_not_expanded() {
    let client = ScriptedClient::new();
    client.queue_response("A");

    let evaluator = preset("seal0", client.clone(), None).unwrap();
    evaluator.grade("What is {TARGET}?", "secret", "{RESPONSE}").await.unwrap();

    let prompt = client.requests()[0].messages[1].text().to_string();
    assert!(prompt.contains("What is {TARGET}?"));
    assert!(prompt.contains("{RESPONSE}"));
}

#[tokio::test]
async fn letter_presets_use_their_models() {
    let client = ScriptedClient::new();
    client.queue_response("a").queue_response("B").queue_response("C");

    let seal0 = preset("seal0", client.clone(), None).unwrap();
    let simpleqa = preset("simpleqa", client.clone(), None).unwrap();
    let ods = preset("ods", client.clone(), None).unwrap();

    assert_eq!(seal0.grade("q", "t", "r").await.unwrap().correct, Correctness::Correct);
    assert_eq!(simpleqa.grade("q", "t", "r").await.unwrap().correct, Correctness::Incorrect);
    assert_eq!(ods.grade("q", "t", "r").await.unwrap().correct, Correctness::Incorrect);

    let requests = client.requests();
    assert_eq!(requests[0].config.model, "gpt-4o-mini");
    assert_eq!(requests[0].messages.len(), 2);

    assert_eq!(requests[1].config.model, "gpt-4.1-2025-04-14");
    assert_eq!(requests[1].config.extra["max_tokens"], json!(2048));

    assert_eq!(requests[2].config.model, "gemini/gemini-2.0-flash-001");
    assert_eq!(requests[2].config.extra["temperature"], json!(0.0));
    assert_eq!(requests[2].messages.len(), 1);
    assert_eq!(requests[2].messages[0].role, Role::User);
}

#[tokio::test]
async fn unexpected_letter_is_a_format_error() {
    let client = ScriptedClient::new();
    client.queue_response("Z");

    let grade = preset("seal0", client.clone(), None)
        .unwrap()
        .grade("q", "t", "r")
        .await
        .unwrap();
    assert_eq!(grade.correct, Correctness::FormatError);
    assert_eq!(serde_json::to_value(&grade).unwrap()["correct"], json!("<format_error>"));
}

#[tokio::test]
async fn verbose_grader_breaks_contract() {
    let client = ScriptedClient::new();
    client.queue_response("A) CORRECT");

    let err = preset("simpleqa", client.clone(), None)
        .unwrap()
        .grade("q", "t", "r")
        .await
        .unwrap_err();
    assert!(err.is_contract_violation());
}

#[test]
fn unknown_preset_is_configuration_error() {
    let err = preset("mmlu", ScriptedClient::new(), None).err().unwrap();
    assert!(matches!(err, DeepSearchError::Configuration(_)));
    assert!(err.to_string().contains("frames, seal0, simpleqa, ods"));
}

#[tokio::test]
async fn cached_grades_skip_the_grader() {
    let client = ScriptedClient::new();
    client.queue_response("A");
    let store = Arc::new(MemoryCache::new());

    let evaluator = preset("seal0", client.clone(), Some(store.clone())).unwrap();
    let first = evaluator.grade("q", "t", "r").await.unwrap();
    let second = evaluator.grade("q", "t", "r").await.unwrap();

    assert_eq!(first, second);
    assert_eq!(client.request_count(), 1);
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn multi_evaluator_over_all_presets() {
    let client = ScriptedClient::new();
    client
        .queue_response("Explanation: matches\nDecision: TRUE")
        .queue_response("A")
        .queue_response("B")
        .queue_response("X");

    let evaluators = PRESET_NAMES
        .iter()
        .map(|name| preset(name, client.clone(), None))
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    let multi = MultiEvaluator::new(evaluators).with_verbose(false);
    assert_eq!(multi.names(), PRESET_NAMES.to_vec());

    let grades = multi.grade("q", "t", "r").await.unwrap();
    assert!(grades["frames"].correct.is_correct());
    assert!(grades["seal0"].correct.is_correct());
    assert!(!grades["simpleqa"].correct.is_correct());
    assert_eq!(grades["ods"].correct, Correctness::FormatError);

    assert_eq!(
        multi.summary(),
        "E-frames - 001/001 - 1.0000 | E-seal0 - 001/001 - 1.0000 | \
         E-simpleqa - 000/001 - 0.0000 | E-ods - 000/001 - 0.0000"
    );
}
