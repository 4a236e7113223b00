use std::io::{self, Write};
use std::path::{Path, PathBuf};

use quizgen_schema::Question;
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("failed to encode questions: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Compact,
    /// Two-space indentation.
    Pretty,
}

impl OutputFormat {
    pub fn encode(self, questions: &[Question]) -> Result<Vec<u8>, PersistError> {
        let bytes = match self {
            OutputFormat::Compact => serde_json::to_vec(questions)?,
            OutputFormat::Pretty => serde_json::to_vec_pretty(questions)?,
        };
        Ok(bytes)
    }
}

/// Writes `questions` as a bare JSON array, replacing `path` atomically.
///
/// The array is staged in a temporary file next to `path` and renamed over it, so a failed write
/// never leaves a truncated or half-written file behind.
pub fn write_questions(path: &Path, questions: &[Question], format: OutputFormat) -> Result<(), PersistError> {
    let bytes = format.encode(questions)?;

    let io_error = |source: io::Error| PersistError::Io {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir).map_err(io_error)?;
    file.write_all(&bytes).map_err(io_error)?;
    file.as_file().sync_all().map_err(io_error)?;
    file.persist(path).map_err(|error| io_error(error.error))?;

    tracing::debug!(path = %path.display(), bytes = bytes.len(), "questions persisted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use quizgen_schema::{Answer, MultiChoiceItem};
    use tempfile::tempdir;

    fn questions() -> Vec<Question> {
        vec![
            Question::new("The sky is green.", 10, Answer::true_false(false)),
            Question::new(
                "Which planet is closest to the sun?",
                20,
                Answer::MultiChoice(vec![
                    MultiChoiceItem::new("Mercury", true),
                    MultiChoiceItem::new("Venus", false),
                ]),
            ),
        ]
    }

    #[test]
    fn test_write_replaces_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("quiz.json");
        std::fs::write(&path, "old content that is longer than nothing").unwrap();

        write_questions(&path, &questions()[..1], OutputFormat::Compact).unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            r#"[{"Question":"The sky is green.","WaitTimeInSec":10,"Answer":{"AnswerType":0,"TrueFalseAnswers":{"IsTrueOrFlase":false}}}]"#
        );
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_pretty_output_is_indented_array() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("quiz.json");

        write_questions(&path, &questions(), OutputFormat::Pretty).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("[\n  {\n    \"Question\""));
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value.as_array().map(Vec::len), Some(2));
        assert!(value[1]["Answer"].get("TrueFalseAnswers").is_none());
    }

    #[test]
    fn test_missing_directory_is_io_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("quiz.json");

        let error = write_questions(&path, &questions(), OutputFormat::Compact).unwrap_err();

        assert!(matches!(error, PersistError::Io { .. }));
        assert!(!path.exists());
    }
}
