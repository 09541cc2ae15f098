use std::sync::Arc;

use serde::Deserialize;
use voxcart::error::ParseFailure;
use voxcart::intent::{IntentCategory, PrimaryClassifier, Utterance};
use voxcart::services::gateway::strip_code_fences;
use voxcart::services::llm::ScriptedGenerator;
use voxcart::services::{ClassifierGateway, UNKNOWN};

#[derive(Debug, Deserialize, PartialEq)]
struct Action {
    action: String,
}

fn categories() -> Vec<String> {
    vec!["gym".to_string(), "yoga".to_string()]
}

#[test]
fn test_strip_code_fences() {
    assert_eq!(strip_code_fences("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
    assert_eq!(strip_code_fences("```\nnavigation\n```"), "navigation");
    assert_eq!(strip_code_fences("```json{\"a\": 1}```"), "{\"a\": 1}");
    assert_eq!(strip_code_fences("  plain text  "), "plain text");
}

#[test]
fn test_render_substitutes_named_placeholders() {
    let rendered = ClassifierGateway::render(
        "Say {utterance} from {categories}. Keep {other}.",
        &[("utterance", "go home"), ("categories", "gym, yoga")],
    );
    assert_eq!(rendered, "Say go home from gym, yoga. Keep {other}.");
}

#[test]
fn test_render_does_not_expand_substituted_values() {
    let rendered = ClassifierGateway::render(
        "Heard \"{utterance}\" among {categories}.",
        &[("utterance", "show {categories} please"), ("categories", "gym, yoga")],
    );
    assert_eq!(rendered, "Heard \"show {categories} please\" among gym, yoga.");
    assert_eq!(ClassifierGateway::render(r#"{"action": "{utterance}"}"#, &[("utterance", "home")]), r#"{"action": "home"}"#);
}

#[tokio::test]
async fn test_classify_returns_sentinel_on_failure() {
    let generator = Arc::new(ScriptedGenerator::new().fail("connection refused").reply("   "));
    let gateway = ClassifierGateway::new(generator.clone());

    assert_eq!(gateway.classify("{utterance}", &[("utterance", "hi")]).await, UNKNOWN);
    // Blank output is as good as no output
    assert_eq!(gateway.classify("{utterance}", &[("utterance", "hi")]).await, UNKNOWN);
    assert_eq!(generator.call_count(), 2);
    assert_eq!(generator.prompts()[0], "hi");
}

#[tokio::test]
async fn test_classify_json_reports_parse_failures() {
    let generator = Arc::new(
        ScriptedGenerator::new()
            .reply("```json\n{\"action\": \"home\"}\n```")
            .reply("I think you mean the home page")
            .fail("timeout"),
    );
    let gateway = ClassifierGateway::new(generator);

    let parsed: Result<Action, _> = gateway.classify_json("{utterance}", &[("utterance", "go home")]).await;
    assert_eq!(parsed, Ok(Action { action: "home".to_string() }));

    let prose: Result<Action, _> = gateway.classify_json("{utterance}", &[("utterance", "go home")]).await;
    assert!(matches!(prose, Err(ParseFailure::Malformed(_))));

    let down: Result<Action, _> = gateway.classify_json("{utterance}", &[("utterance", "go home")]).await;
    assert_eq!(down, Err(ParseFailure::ServiceUnavailable));
}

#[tokio::test]
async fn test_primary_classifier_parses_tags() {
    let generator = Arc::new(
        ScriptedGenerator::new()
            .reply("navigation")
            .reply("```\n\"Apply_Filter\".\n```")
            .reply("dance_party"),
    );
    let classifier = PrimaryClassifier::new(ClassifierGateway::new(generator.clone()), &categories());
    let utterance = Utterance::new("Go Back");

    assert_eq!(classifier.classify_primary_intent(&utterance).await, IntentCategory::Navigation);
    assert_eq!(classifier.classify_primary_intent(&utterance).await, IntentCategory::ApplyFilter);
    assert_eq!(classifier.classify_primary_intent(&utterance).await, IntentCategory::Unrecognized);

    // Utterance and category keys both reach the prompt
    let prompt = &generator.prompts()[0];
    assert!(prompt.contains("go back"));
    assert!(prompt.contains("gym, yoga"));
}

#[tokio::test]
async fn test_primary_classifier_falls_back_to_general_command() {
    let generator = Arc::new(ScriptedGenerator::new().fail("service down"));
    let classifier = PrimaryClassifier::new(ClassifierGateway::new(generator), &categories());

    let category = classifier.classify_primary_intent(&Utterance::new("anything")).await;
    assert_eq!(category, IntentCategory::GeneralCommand);
}
