use serde_json::{Value, json};

pub const END_TO_END_RESPONSE: &str = r#"{"Questions":[{"Question":"The sky is green.","WaitTimeInSec":10,"Answer":{"AnswerType":0,"TrueFalseAnswers":{"IsTrueOrFlase":false}}}]}"#;

pub const END_TO_END_OUTPUT: &str = r#"[{"Question":"The sky is green.","WaitTimeInSec":10,"Answer":{"AnswerType":0,"TrueFalseAnswers":{"IsTrueOrFlase":false}}}]"#;

/// `AnswerType` 1 carrying the true/false block instead of the options.
pub const MISMATCHED_BLOCK_RESPONSE: &str = r#"{"Questions":[{"Question":"Which planet is the largest?","WaitTimeInSec":20,"Answer":{"AnswerType":1,"TrueFalseAnswers":{"IsTrueOrFlase":true}}}]}"#;

/// Question `index`, alternating between true/false and multiple choice.
#[must_use]
pub fn question(index: usize) -> Value {
    if index % 2 == 0 {
        json!({
            "Question": format!("Statement number {index} is true."),
            "WaitTimeInSec": 10 + index,
            "Answer": {"AnswerType": 0, "TrueFalseAnswers": {"IsTrueOrFlase": true}}
        })
    } else {
        json!({
            "Question": format!("Which option belongs to question {index}?"),
            "WaitTimeInSec": 20,
            "Answer": {
                "AnswerType": 1,
                "MultiChoiceAnswer": [
                    {"Text": format!("Option A{index}"), "IsCorrect": true},
                    {"Text": format!("Option B{index}"), "IsCorrect": false},
                    {"Text": format!("Option C{index}"), "IsCorrect": false},
                    {"Text": format!("Option D{index}"), "IsCorrect": false}
                ]
            }
        })
    }
}

/// A valid wrapped response with `count` questions.
#[must_use]
pub fn valid_response(count: usize) -> String {
    json!({"Questions": (0..count).map(question).collect::<Vec<_>>()}).to_string()
}

/// A wrapped response with `count` questions where question `invalid` has `AnswerType` 2.
#[must_use]
pub fn response_with_invalid_at(count: usize, invalid: usize) -> String {
    let questions: Vec<_> = (0..count)
        .map(|index| {
            let mut question = question(index);
            if index == invalid {
                question["Answer"]["AnswerType"] = json!(2);
            }
            question
        })
        .collect();
    json!({"Questions": questions}).to_string()
}
