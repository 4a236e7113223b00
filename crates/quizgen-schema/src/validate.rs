use std::collections::HashSet;

use serde::de::DeserializeOwned;
use serde_json::Value;
use typed_builder::TypedBuilder;

use crate::error::{Rule, SchemaError, ValidationError};
use crate::model::{Answer, AnswerType, MultiChoiceItem, Question, Quiz};
use crate::wire::{WireAnswer, WireQuestion, WireQuiz};

/// Thresholds and content policy applied on top of the structural schema.
///
/// The defaults only enforce what every quiz needs; the content checks are opt-in.
#[derive(Debug, Clone, PartialEq, Eq, TypedBuilder)]
pub struct Rules {
    /// Smallest accepted `WaitTimeInSec`. Set to 0 to allow "no wait" questions.
    #[builder(default = 1)]
    pub min_wait_secs: u32,
    #[builder(default)]
    pub max_wait_secs: Option<u32>,
    #[builder(default = 1)]
    pub min_question_chars: usize,
    #[builder(default)]
    pub min_questions: Option<usize>,
    #[builder(default)]
    pub unique_questions: bool,
    #[builder(default)]
    pub require_both_kinds: bool,
    #[builder(default)]
    pub options_per_question: Option<usize>,
    #[builder(default)]
    pub single_correct: bool,
}

impl Default for Rules {
    fn default() -> Self {
        Rules::builder().build()
    }
}

impl Rules {
    /// At least `min_questions` distinct questions mixing both kinds, four options with
    /// exactly one correct answer, and a wait time between 1 and 60 seconds.
    #[must_use]
    pub fn strict_quiz(min_questions: usize) -> Self {
        Rules::builder()
            .max_wait_secs(Some(60))
            .min_question_chars(3)
            .min_questions(Some(min_questions))
            .unique_questions(true)
            .require_both_kinds(true)
            .options_per_question(Some(4))
            .single_correct(true)
            .build()
    }
}

/// Parses and validates a raw model response into the wrapper [`Quiz`].
pub fn construct(raw: &str, rules: &Rules) -> Result<Quiz, SchemaError> {
    let value: Value = serde_json::from_str(raw).map_err(SchemaError::Parse)?;
    Ok(construct_value(value, rules)?)
}

/// Same as [`construct`] for an already parsed document.
pub fn construct_value(value: Value, rules: &Rules) -> Result<Quiz, ValidationError> {
    let WireQuiz { questions } = from_value("$", value)?;

    let questions = questions
        .into_iter()
        .enumerate()
        .map(|(index, value)| question(&format!("Questions[{index}]"), value, rules))
        .collect::<Result<Vec<_>, _>>()?;

    check_content(&questions, rules)?;

    Ok(Quiz::new(questions))
}

fn from_value<T: DeserializeOwned>(path: &str, value: Value) -> Result<T, ValidationError> {
    serde_json::from_value(value).map_err(|error| ValidationError::new(path, Rule::Shape(error.to_string())))
}

fn question(path: &str, value: Value, rules: &Rules) -> Result<Question, ValidationError> {
    let WireQuestion {
        question,
        wait_time_in_sec,
        answer,
    } = from_value(path, value)?;

    check_text(&format!("{path}.Question"), &question, rules.min_question_chars)?;
    let wait_time_in_sec = wait_time(&format!("{path}.WaitTimeInSec"), wait_time_in_sec, rules)?;
    let answer = self::answer(&format!("{path}.Answer"), answer, rules)?;

    Ok(Question {
        question,
        wait_time_in_sec,
        answer,
    })
}

fn check_text(path: &str, text: &str, min_chars: usize) -> Result<(), ValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new(path, Rule::EmptyText));
    }
    let len = trimmed.chars().count();
    if len < min_chars {
        return Err(ValidationError::new(path, Rule::TooShort { min: min_chars, len }));
    }
    Ok(())
}

fn wait_time(path: &str, value: i64, rules: &Rules) -> Result<u32, ValidationError> {
    if value < i64::from(rules.min_wait_secs) {
        return Err(ValidationError::new(
            path,
            Rule::WaitTimeTooSmall {
                min: rules.min_wait_secs,
                value,
            },
        ));
    }
    let max = rules.max_wait_secs.unwrap_or(u32::MAX);
    match u32::try_from(value) {
        Ok(secs) if secs <= max => Ok(secs),
        _ => Err(ValidationError::new(path, Rule::WaitTimeTooLarge { max, value })),
    }
}

fn answer(path: &str, value: Value, rules: &Rules) -> Result<Answer, ValidationError> {
    let WireAnswer {
        answer_type,
        true_false,
        multi_choice,
    } = from_value(path, value)?;

    let Some(answer_type) = AnswerType::from_discriminant(answer_type) else {
        return Err(ValidationError::new(
            format!("{path}.AnswerType"),
            Rule::UnknownAnswerType(answer_type),
        ));
    };

    let block_path = format!("{path}.{}", answer_type.block_name());
    let other_present = match answer_type {
        AnswerType::TrueFalse => multi_choice.is_some(),
        AnswerType::MultiChoice => true_false.is_some(),
    };
    if other_present {
        return Err(ValidationError::new(
            format!("{path}.{}", answer_type.other().block_name()),
            Rule::UnexpectedBlock(answer_type),
        ));
    }

    match answer_type {
        AnswerType::TrueFalse => true_false
            .map(Answer::TrueFalse)
            .ok_or_else(|| ValidationError::new(block_path, Rule::MissingBlock(answer_type))),
        AnswerType::MultiChoice => {
            let options =
                multi_choice.ok_or_else(|| ValidationError::new(&block_path, Rule::MissingBlock(answer_type)))?;
            check_options(&block_path, &options, rules)?;
            Ok(Answer::MultiChoice(options))
        }
    }
}

fn check_options(path: &str, options: &[MultiChoiceItem], rules: &Rules) -> Result<(), ValidationError> {
    if options.is_empty() {
        return Err(ValidationError::new(path, Rule::NoOptions));
    }
    if let Some(expected) = rules.options_per_question
        && options.len() != expected
    {
        return Err(ValidationError::new(
            path,
            Rule::OptionCount {
                expected,
                found: options.len(),
            },
        ));
    }

    let mut seen = HashSet::new();
    for (index, option) in options.iter().enumerate() {
        let text_path = format!("{path}[{index}].Text");
        check_text(&text_path, &option.text, 1)?;
        if !seen.insert(normalize(&option.text)) {
            return Err(ValidationError::new(
                text_path,
                Rule::DuplicateOption(option.text.trim().to_owned()),
            ));
        }
    }

    let correct = options.iter().filter(|option| option.is_correct).count();
    if correct == 0 {
        return Err(ValidationError::new(path, Rule::NoCorrectOption));
    }
    if rules.single_correct && correct != 1 {
        return Err(ValidationError::new(path, Rule::CorrectCount(correct)));
    }
    Ok(())
}

fn check_content(questions: &[Question], rules: &Rules) -> Result<(), ValidationError> {
    if let Some(min) = rules.min_questions
        && questions.len() < min
    {
        return Err(ValidationError::new(
            "Questions",
            Rule::TooFewQuestions {
                min,
                found: questions.len(),
            },
        ));
    }

    if rules.unique_questions {
        let mut seen = HashSet::new();
        for (index, question) in questions.iter().enumerate() {
            if !seen.insert(normalize(&question.question)) {
                return Err(ValidationError::new(
                    format!("Questions[{index}].Question"),
                    Rule::DuplicateQuestion(question.question.trim().to_owned()),
                ));
            }
        }
    }

    if rules.require_both_kinds {
        for kind in AnswerType::ALL {
            if !questions.iter().any(|question| question.answer.answer_type() == kind) {
                return Err(ValidationError::new("Questions", Rule::MissingKind(kind)));
            }
        }
    }
    Ok(())
}

fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}
