use serde::{Deserialize, Serialize};

use crate::wire::WireAnswer;

/// The two answer formats a question can have.
///
/// On the wire this is the integer `AnswerType` discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum AnswerType {
    TrueFalse,
    MultiChoice,
}

impl AnswerType {
    pub const ALL: [AnswerType; 2] = [AnswerType::TrueFalse, AnswerType::MultiChoice];

    #[must_use]
    pub const fn discriminant(self) -> u8 {
        match self {
            AnswerType::TrueFalse => 0,
            AnswerType::MultiChoice => 1,
        }
    }

    #[must_use]
    pub const fn from_discriminant(value: i64) -> Option<Self> {
        match value {
            0 => Some(AnswerType::TrueFalse),
            1 => Some(AnswerType::MultiChoice),
            _ => None,
        }
    }

    /// Name of the answer block that belongs to this type.
    #[must_use]
    pub const fn block_name(self) -> &'static str {
        match self {
            AnswerType::TrueFalse => "TrueFalseAnswers",
            AnswerType::MultiChoice => "MultiChoiceAnswer",
        }
    }

    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            AnswerType::TrueFalse => AnswerType::MultiChoice,
            AnswerType::MultiChoice => AnswerType::TrueFalse,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TrueFalseAnswer {
    // Downstream consumers read this exact (misspelled) key.
    #[serde(rename = "IsTrueOrFlase")]
    pub is_true: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "PascalCase")]
pub struct MultiChoiceItem {
    pub text: String,
    pub is_correct: bool,
}

impl MultiChoiceItem {
    #[must_use]
    pub fn new(text: impl Into<String>, is_correct: bool) -> Self {
        Self {
            text: text.into(),
            is_correct,
        }
    }
}

/// A validated answer. Only the block matching the answer type can exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "WireAnswer")]
pub enum Answer {
    TrueFalse(TrueFalseAnswer),
    MultiChoice(Vec<MultiChoiceItem>),
}

impl Answer {
    #[must_use]
    pub fn true_false(is_true: bool) -> Self {
        Answer::TrueFalse(TrueFalseAnswer { is_true })
    }

    #[must_use]
    pub const fn answer_type(&self) -> AnswerType {
        match self {
            Answer::TrueFalse(_) => AnswerType::TrueFalse,
            Answer::MultiChoice(_) => AnswerType::MultiChoice,
        }
    }

    #[must_use]
    pub fn options(&self) -> Option<&[MultiChoiceItem]> {
        match self {
            Answer::TrueFalse(_) => None,
            Answer::MultiChoice(options) => Some(options),
        }
    }
}

/// One quiz question as written to the output file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Question {
    pub question: String,
    pub wait_time_in_sec: u32,
    pub answer: Answer,
}

impl Question {
    #[must_use]
    pub fn new(question: impl Into<String>, wait_time_in_sec: u32, answer: Answer) -> Self {
        Self {
            question: question.into(),
            wait_time_in_sec,
            answer,
        }
    }
}

/// The object wrapper the generation API requires at the document root.
///
/// Deliberately not `Serialize`: the only way out is [`Quiz::into_questions`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Quiz {
    questions: Vec<Question>,
}

impl Quiz {
    #[must_use]
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn into_questions(self) -> Vec<Question> {
        self.questions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_true_false_serializes_with_literal_field_name() {
        let question = Question::new("The sky is green.", 10, Answer::true_false(false));
        let json = serde_json::to_string(&question).unwrap();
        assert_eq!(
            json,
            r#"{"Question":"The sky is green.","WaitTimeInSec":10,"Answer":{"AnswerType":0,"TrueFalseAnswers":{"IsTrueOrFlase":false}}}"#
        );
    }

    #[test]
    fn test_multi_choice_omits_true_false_block() {
        let question = Question::new(
            "Which is a prime?",
            15,
            Answer::MultiChoice(vec![MultiChoiceItem::new("4", false), MultiChoiceItem::new("7", true)]),
        );
        let value = serde_json::to_value(&question).unwrap();
        assert_eq!(
            value["Answer"],
            json!({
                "AnswerType": 1,
                "MultiChoiceAnswer": [
                    {"Text": "4", "IsCorrect": false},
                    {"Text": "7", "IsCorrect": true}
                ]
            })
        );
        assert!(value["Answer"].get("TrueFalseAnswers").is_none());
    }

    #[test]
    fn test_discriminants() {
        for answer_type in AnswerType::ALL {
            assert_eq!(
                AnswerType::from_discriminant(i64::from(answer_type.discriminant())),
                Some(answer_type)
            );
        }
        assert_eq!(AnswerType::from_discriminant(2), None);
        assert_eq!(AnswerType::from_discriminant(-1), None);
        assert_eq!(AnswerType::MultiChoice.to_string(), "multi-choice");
    }
}
