//! Output-constraint schema handed to structured-output endpoints.
//!
//! Those endpoints only accept object-rooted schemas, so the question array is wrapped in a
//! `{"Questions": [...]}` object here and nowhere else.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use std::borrow::Cow;

use crate::model::AnswerType;
use crate::validate::Rules;

pub const SCHEMA_NAME: &str = "Quiz";
pub const SCHEMA_DESCRIPTION: &str = "A quiz made of true/false and multiple-choice questions.";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonSchemaField<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r#type: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r#enum: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Cow<'a, str>>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<&'a str, JsonSchemaField<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<JsonSchemaField<'a>>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub any_of: Vec<JsonSchemaField<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_items: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_items: Option<usize>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<bool>,
}

impl<'a> JsonSchemaField<'a> {
    fn empty() -> Self {
        JsonSchemaField {
            r#type: None,
            r#enum: None,
            description: None,
            properties: IndexMap::new(),
            items: None,
            any_of: vec![],
            minimum: None,
            maximum: None,
            min_items: None,
            max_items: None,
            required: vec![],
            additional_properties: None,
        }
    }

    #[must_use]
    pub fn new(r#type: &'a str) -> Self {
        JsonSchemaField {
            r#type: Some(r#type),
            ..JsonSchemaField::empty()
        }
    }

    /// A closed object: every property is required and nothing else is allowed.
    #[must_use]
    pub fn object<I: IntoIterator<Item = (&'a str, JsonSchemaField<'a>)>>(properties: I) -> Self {
        let properties: IndexMap<_, _> = properties.into_iter().collect();
        let required = properties.keys().copied().collect();
        JsonSchemaField {
            properties,
            required,
            additional_properties: Some(false),
            ..JsonSchemaField::new("object")
        }
    }

    #[must_use]
    pub fn any_of<I: Into<Vec<JsonSchemaField<'a>>>>(variants: I) -> Self {
        JsonSchemaField {
            any_of: variants.into(),
            ..JsonSchemaField::empty()
        }
    }

    #[must_use]
    pub fn description<D: Into<Cow<'a, str>>>(mut self, description: D) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn items(mut self, items: JsonSchemaField<'a>) -> Self {
        self.items = Some(Box::new(items));
        self
    }

    #[must_use]
    pub fn minimum(mut self, minimum: u64) -> Self {
        self.minimum = Some(minimum);
        self
    }

    #[must_use]
    pub fn maximum(mut self, maximum: Option<u64>) -> Self {
        self.maximum = maximum;
        self
    }

    #[must_use]
    pub fn min_items(mut self, min_items: Option<usize>) -> Self {
        self.min_items = min_items;
        self
    }

    #[must_use]
    pub fn max_items(mut self, max_items: Option<usize>) -> Self {
        self.max_items = max_items;
        self
    }

    #[must_use]
    pub fn r#enum<I: IntoIterator<Item = Value>>(mut self, values: I) -> Self {
        self.r#enum = Some(values.into_iter().collect());
        self
    }
}

fn answer_variant(answer_type: AnswerType, block: JsonSchemaField<'static>) -> JsonSchemaField<'static> {
    let description = match answer_type {
        AnswerType::TrueFalse => "A true/false answer. Only TrueFalseAnswers is present.",
        AnswerType::MultiChoice => "A multiple-choice answer. Only MultiChoiceAnswer is present.",
    };
    JsonSchemaField::object([
        (
            "AnswerType",
            JsonSchemaField::new("integer")
                .r#enum([Value::from(answer_type.discriminant())])
                .description("Defines the answer format. 0 = True/False, 1 = Multiple-choice."),
        ),
        (answer_type.block_name(), block),
    ])
    .description(description)
}

/// Schema of a single question, i.e. one element of the output array.
#[must_use]
pub fn question_schema(rules: &Rules) -> JsonSchemaField<'static> {
    let true_false = JsonSchemaField::object([(
        "IsTrueOrFlase",
        JsonSchemaField::new("boolean").description("Indicates whether the statement in the question is true or false."),
    )]);

    let option = JsonSchemaField::object([
        (
            "Text",
            JsonSchemaField::new("string").description("The visible text of the answer option."),
        ),
        (
            "IsCorrect",
            JsonSchemaField::new("boolean").description("Marks whether this option is a correct answer."),
        ),
    ]);
    let multi_choice = JsonSchemaField::new("array")
        .description("All answer options; correct ones are marked with IsCorrect.")
        .items(option)
        .min_items(Some(rules.options_per_question.unwrap_or(1)))
        .max_items(rules.options_per_question);

    JsonSchemaField::object([
        (
            "Question",
            JsonSchemaField::new("string").description("The question text shown to the user."),
        ),
        (
            "WaitTimeInSec",
            JsonSchemaField::new("integer")
                .description("Time in seconds the user has to answer the question.")
                .minimum(u64::from(rules.min_wait_secs))
                .maximum(rules.max_wait_secs.map(u64::from)),
        ),
        (
            "Answer",
            JsonSchemaField::any_of([
                answer_variant(AnswerType::TrueFalse, true_false),
                answer_variant(AnswerType::MultiChoice, multi_choice),
            ])
            .description("Defines the correct answer and its structure."),
        ),
    ])
}

/// The object-rooted schema wrapping the question array.
#[must_use]
pub fn quiz_schema(rules: &Rules) -> Value {
    let field = JsonSchemaField::object([(
        "Questions",
        JsonSchemaField::new("array")
            .description("The quiz questions.")
            .items(question_schema(rules))
            .min_items(rules.min_questions),
    )])
    .description(SCHEMA_DESCRIPTION);

    serde_json::to_value(field).expect("Serialization failed that should not fail")
}
