use quizgen_core::{
    CallConfig, GeneratorConfig, OutputFormat, QuizError, QuizGenerator, TransportError,
};
use quizgen_schema::{AnswerType, Rule, Rules};
use quizgen_test_helpers::fixtures::{
    END_TO_END_OUTPUT, END_TO_END_RESPONSE, MISMATCHED_BLOCK_RESPONSE, response_with_invalid_at, valid_response,
};
use quizgen_test_helpers::{OutputDir, ScriptedEndpoint};
use serde_json::Value;
use std::time::Duration;
use test_log::test;

fn generator(endpoint: ScriptedEndpoint) -> QuizGenerator<ScriptedEndpoint> {
    QuizGenerator::new(endpoint, GeneratorConfig::default())
}

fn validation_rule(error: &QuizError) -> &Rule {
    match error {
        QuizError::Validation(error) => &error.validation().expect("not a parse error").rule,
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test(tokio::test)]
async fn test_end_to_end_output() {
    let dir = OutputDir::new().unwrap();
    let generator = generator(ScriptedEndpoint::replying(END_TO_END_RESPONSE));

    let count = generator.run("One false statement about the sky.", dir.output()).await.unwrap();

    assert_eq!(count, 1);
    assert_eq!(dir.read_output().as_deref(), Some(END_TO_END_OUTPUT));
    assert_eq!(dir.entries(), 1);
}

#[test(tokio::test)]
async fn test_request_carries_object_rooted_schema() {
    let dir = OutputDir::new().unwrap();
    let generator = generator(ScriptedEndpoint::replying(END_TO_END_RESPONSE));

    generator.run("Planets", dir.output()).await.unwrap();

    let requests = generator.endpoint().requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].user, "Planets");
    assert!(requests[0].strict);
    assert_eq!(requests[0].schema["type"], "object");
    assert_eq!(requests[0].schema["required"][0], "Questions");
}

#[test(tokio::test)]
async fn test_mismatched_block_writes_nothing() {
    let dir = OutputDir::new().unwrap();
    let generator = generator(ScriptedEndpoint::replying(MISMATCHED_BLOCK_RESPONSE));

    let error = generator.run("Planets", dir.output()).await.unwrap_err();

    assert_eq!(validation_rule(&error), &Rule::UnexpectedBlock(AnswerType::MultiChoice));
    assert!(dir.read_output().is_none());
    assert_eq!(dir.entries(), 0);
}

#[test(tokio::test)]
async fn test_invalid_element_keeps_existing_file() {
    let dir = OutputDir::new().unwrap();
    std::fs::write(dir.output(), "previous quiz").unwrap();
    let generator = generator(ScriptedEndpoint::replying(response_with_invalid_at(5, 3)));

    let error = generator.run("Planets", dir.output()).await.unwrap_err();

    assert_eq!(validation_rule(&error), &Rule::UnknownAnswerType(2));
    assert!(error.to_string().contains("Questions[3].Answer.AnswerType"));
    assert_eq!(dir.read_output().as_deref(), Some("previous quiz"));
    assert_eq!(dir.entries(), 1);
}

#[test(tokio::test)]
async fn test_invalid_element_creates_no_file() {
    let dir = OutputDir::new().unwrap();
    let generator = generator(ScriptedEndpoint::replying(response_with_invalid_at(5, 4)));

    assert!(generator.run("Planets", dir.output()).await.is_err());
    assert!(dir.read_output().is_none());
}

#[test(tokio::test)]
async fn test_output_is_bare_array() {
    let dir = OutputDir::new().unwrap();
    let config = GeneratorConfig::builder().format(OutputFormat::Pretty).build();
    let generator = QuizGenerator::new(ScriptedEndpoint::replying(valid_response(7)), config);

    generator.run("Planets", dir.output()).await.unwrap();

    let value: Value = serde_json::from_str(&dir.read_output().unwrap()).unwrap();
    let questions = value.as_array().expect("root must be an array");
    assert_eq!(questions.len(), 7);
    assert!(questions[1]["Answer"].get("TrueFalseAnswers").is_none());
    assert!(questions[0]["Answer"].get("MultiChoiceAnswer").is_none());
}

#[test(tokio::test)]
async fn test_malformed_json_is_parse_error() {
    let dir = OutputDir::new().unwrap();
    let generator = generator(ScriptedEndpoint::replying("{\"Questions\": ["));

    let error = generator.run("Planets", dir.output()).await.unwrap_err();

    let QuizError::Validation(error) = error else {
        panic!("expected validation error");
    };
    assert!(error.validation().is_none());
    assert!(dir.read_output().is_none());
}

#[test(tokio::test)]
async fn test_transport_error_writes_nothing() {
    let dir = OutputDir::new().unwrap();
    let generator = generator(ScriptedEndpoint::new([Err(TransportError::EmptyResponse)]));

    let error = generator.run("Planets", dir.output()).await.unwrap_err();

    assert!(matches!(error, QuizError::Transport(TransportError::EmptyResponse)));
    assert!(dir.read_output().is_none());
}

#[test(tokio::test(start_paused = true))]
async fn test_timeout_is_transport_error() {
    let dir = OutputDir::new().unwrap();
    let call = CallConfig::builder().total_timeout(Duration::from_secs(5)).build();
    let config = GeneratorConfig::builder().call(call).build();
    let endpoint = ScriptedEndpoint::replying(END_TO_END_RESPONSE).with_delay(Duration::from_secs(60));
    let generator = QuizGenerator::new(endpoint, config);

    let error = generator.run("Planets", dir.output()).await.unwrap_err();

    assert!(matches!(
        error,
        QuizError::Transport(TransportError::Timeout(timeout)) if timeout == Duration::from_secs(5)
    ));
    assert!(dir.read_output().is_none());
}

#[test(tokio::test)]
async fn test_no_retry_by_default() {
    let dir = OutputDir::new().unwrap();
    let endpoint = ScriptedEndpoint::new([Ok(MISMATCHED_BLOCK_RESPONSE.to_owned()), Ok(END_TO_END_RESPONSE.to_owned())]);
    let generator = generator(endpoint);

    assert!(generator.run("Planets", dir.output()).await.is_err());
    assert_eq!(generator.endpoint().requests().len(), 1);
}

#[test(tokio::test)]
async fn test_retry_sends_repair_prompt() {
    let dir = OutputDir::new().unwrap();
    let endpoint = ScriptedEndpoint::new([
        Err(TransportError::EmptyResponse),
        Ok(MISMATCHED_BLOCK_RESPONSE.to_owned()),
        Ok(END_TO_END_RESPONSE.to_owned()),
    ]);
    let config = GeneratorConfig::builder().attempts(3).build();
    let generator = QuizGenerator::new(endpoint, config);

    generator.run("Planets", dir.output()).await.unwrap();

    let requests = generator.endpoint().requests();
    assert_eq!(requests.len(), 3);
    assert!(requests[1].user.starts_with("Planets"));
    assert!(requests[1].user.contains("Previous error"));
    assert!(requests[2].user.contains(MISMATCHED_BLOCK_RESPONSE));
    assert!(requests[2].user.contains("Questions[0].Answer.TrueFalseAnswers"));
    assert_eq!(dir.read_output().as_deref(), Some(END_TO_END_OUTPUT));
}

#[test(tokio::test)]
async fn test_content_rules_reject_short_quiz() {
    let dir = OutputDir::new().unwrap();
    let config = GeneratorConfig::builder().rules(Rules::strict_quiz(10)).build();
    let generator = QuizGenerator::new(ScriptedEndpoint::replying(valid_response(4)), config);

    let error = generator.run("Planets", dir.output()).await.unwrap_err();

    assert_eq!(validation_rule(&error), &Rule::TooFewQuestions { min: 10, found: 4 });
    assert_eq!(generator.endpoint().requests()[0].schema["properties"]["Questions"]["minItems"], 10);
    assert!(dir.read_output().is_none());
}
