//! Loosely typed mirrors of the JSON document, used only at the parse boundary.
//!
//! Fields that carry domain rules (`WaitTimeInSec`, `AnswerType`) are kept wide here so
//! out-of-range values reach the validator and get a precise error instead of a serde one.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::{Answer, MultiChoiceItem, TrueFalseAnswer};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct WireQuiz {
    #[serde(rename = "Questions")]
    pub questions: Vec<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "PascalCase")]
pub(crate) struct WireQuestion {
    pub question: String,
    pub wait_time_in_sec: i64,
    pub answer: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct WireAnswer {
    #[serde(rename = "AnswerType")]
    pub answer_type: i64,
    #[serde(rename = "TrueFalseAnswers", default, skip_serializing_if = "Option::is_none")]
    pub true_false: Option<TrueFalseAnswer>,
    #[serde(rename = "MultiChoiceAnswer", default, skip_serializing_if = "Option::is_none")]
    pub multi_choice: Option<Vec<MultiChoiceItem>>,
}

impl From<Answer> for WireAnswer {
    fn from(answer: Answer) -> Self {
        let answer_type = i64::from(answer.answer_type().discriminant());
        match answer {
            Answer::TrueFalse(block) => WireAnswer {
                answer_type,
                true_false: Some(block),
                multi_choice: None,
            },
            Answer::MultiChoice(options) => WireAnswer {
                answer_type,
                true_false: None,
                multi_choice: Some(options),
            },
        }
    }
}
