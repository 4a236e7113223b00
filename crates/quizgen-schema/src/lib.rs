//! Shape and validation rules of a generated quiz.
//!
//! A model response is parsed with [`construct`] into the [`Quiz`] wrapper; callers strip the
//! wrapper with [`Quiz::into_questions`] before persisting anything.

pub mod error;
pub mod json_schema;
pub mod model;
pub mod validate;
mod wire;

pub use error::{Rule, SchemaError, ValidationError};
pub use json_schema::{SCHEMA_DESCRIPTION, SCHEMA_NAME, question_schema, quiz_schema};
pub use model::{Answer, AnswerType, MultiChoiceItem, Question, Quiz, TrueFalseAnswer};
pub use validate::{Rules, construct, construct_value};
