//! Batches of generation runs, one per theme entry of a themes file.
//!
//! ```json
//! {"thema": [{"name": "Solar system", "instruction": "Ten questions about planets, in English."}]}
//! ```

use std::collections::HashSet;
use std::error::Error;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

use crate::error::QuizError;
use crate::openai::QuizEndpoint;
use crate::quiz::QuizGenerator;

const THEMES_KEY: &str = "thema";
const FALLBACK_STEM: &str = "quiz";

#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("failed to read themes from {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("themes file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no usable entries found under key 'thema'")]
    NoThemes,

    #[error("failed to create output directory {}: {source}", path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub name: String,
    pub instruction: String,
    /// Unique, file-system safe stem of the output file.
    pub stem: String,
}

/// Reduces `name` to `[A-Za-z0-9_-]`, collapsing every other run of characters into one `_`.
#[must_use]
pub fn sanitize_file_stem(name: &str) -> String {
    let mut stem = String::with_capacity(name.len());
    for c in name.trim().chars() {
        let c = if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' };
        if c == '_' && stem.ends_with('_') {
            continue;
        }
        stem.push(c);
    }

    let stem = stem.trim_matches('_');
    if stem.is_empty() {
        FALLBACK_STEM.to_owned()
    } else {
        stem.to_owned()
    }
}

fn non_blank(entry: &Value, key: &str) -> Option<String> {
    entry
        .get(key)
        .and_then(Value::as_str)
        .filter(|value| !value.trim().is_empty())
        .map(str::to_owned)
}

/// First of `base`, `base_2`, `base_3`, ... that is not taken yet. The result is marked as taken.
fn unique_stem(base: &str, used: &mut HashSet<String>) -> String {
    let mut stem = base.to_owned();
    let mut n = 1;
    while used.contains(&stem) {
        n += 1;
        stem = format!("{base}_{n}");
    }
    used.insert(stem.clone());
    stem
}

/// Parses a themes document. Invalid entries are skipped with a warning.
pub fn parse_themes(raw: &str) -> Result<Vec<Theme>, ThemeError> {
    let document: Value = serde_json::from_str(raw)?;
    let entries = document
        .get(THEMES_KEY)
        .and_then(Value::as_array)
        .filter(|entries| !entries.is_empty())
        .ok_or(ThemeError::NoThemes)?;

    let mut used_stems = HashSet::new();
    let mut themes = Vec::with_capacity(entries.len());

    for (index, entry) in entries.iter().enumerate() {
        if !entry.is_object() {
            tracing::warn!(index, "skipping theme entry that is not an object");
            continue;
        }
        let Some(name) = non_blank(entry, "name") else {
            tracing::warn!(index, "skipping theme entry with missing or invalid name");
            continue;
        };
        let Some(instruction) = non_blank(entry, "instruction") else {
            tracing::warn!(index, %name, "skipping theme entry with missing or invalid instruction");
            continue;
        };

        let stem = unique_stem(&sanitize_file_stem(&name), &mut used_stems);

        themes.push(Theme {
            name,
            instruction,
            stem,
        });
    }

    if themes.is_empty() {
        return Err(ThemeError::NoThemes);
    }
    Ok(themes)
}

pub fn load_themes(path: &Path) -> Result<Vec<Theme>, ThemeError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ThemeError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_themes(&raw)
}

#[derive(Debug, Default)]
pub struct BatchReport {
    pub written: Vec<PathBuf>,
    pub failed: Vec<(String, QuizError)>,
}

impl BatchReport {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Runs one independent generation per theme. A failing theme does not stop the batch.
pub async fn run_batch<E: QuizEndpoint>(
    generator: &QuizGenerator<E>,
    themes: &[Theme],
    output_dir: &Path,
) -> Result<BatchReport, ThemeError> {
    std::fs::create_dir_all(output_dir).map_err(|source| ThemeError::OutputDir {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let mut report = BatchReport::default();
    for theme in themes {
        let output = output_dir.join(format!("{}.json", theme.stem));
        tracing::info!(name = %theme.name, output = %output.display(), "generating theme");

        match generator.run(&theme.instruction, &output).await {
            Ok(_) => report.written.push(output),
            Err(error) => {
                tracing::error!(name = %theme.name, error = &error as &dyn Error, "failed to generate theme");
                report.failed.push((theme.name.clone(), error));
            }
        }
    }

    tracing::info!(
        written = report.written.len(),
        failed = report.failed.len(),
        "batch finished"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_file_stem() {
        assert_eq!(sanitize_file_stem("Solar system"), "Solar_system");
        assert_eq!(sanitize_file_stem("  Ägypten: Pyramiden!  "), "gypten_Pyramiden");
        assert_eq!(sanitize_file_stem("a -- b"), "a_--_b");
        assert_eq!(sanitize_file_stem("***"), "quiz");
        assert_eq!(sanitize_file_stem("__x__y__"), "x_y");
    }

    #[test]
    fn test_parse_skips_invalid_entries_and_deduplicates() {
        let themes = parse_themes(
            r#"{"thema": [
                {"name": "Planets", "instruction": "About planets"},
                "not an object",
                {"name": "  ", "instruction": "No name"},
                {"name": "No instruction"},
                {"name": "Planets!", "instruction": "More planets"},
                {"name": "Planets", "instruction": "Even more planets"}
            ]}"#,
        )
        .unwrap();

        let stems: Vec<_> = themes.iter().map(|theme| theme.stem.as_str()).collect();
        assert_eq!(stems, ["Planets", "Planets_2", "Planets_3"]);
        assert_eq!(themes[1].instruction, "More planets");
    }

    #[test]
    fn test_generated_stem_does_not_collide_with_literal_name() {
        let themes = parse_themes(
            r#"{"thema": [
                {"name": "Planets", "instruction": "First"},
                {"name": "Planets", "instruction": "Second"},
                {"name": "Planets_2", "instruction": "Third"}
            ]}"#,
        )
        .unwrap();

        let stems: Vec<_> = themes.iter().map(|theme| theme.stem.as_str()).collect();
        assert_eq!(stems, ["Planets", "Planets_2", "Planets_2_2"]);
        let unique: HashSet<_> = stems.iter().collect();
        assert_eq!(unique.len(), stems.len());
    }

    #[test]
    fn test_empty_themes_are_rejected() {
        assert!(matches!(parse_themes(r#"{"thema": []}"#), Err(ThemeError::NoThemes)));
        assert!(matches!(parse_themes(r#"{"themes": []}"#), Err(ThemeError::NoThemes)));
        assert!(matches!(
            parse_themes(r#"{"thema": [{"name": "x"}]}"#),
            Err(ThemeError::NoThemes)
        ));
        assert!(matches!(parse_themes("{"), Err(ThemeError::Json(_))));
    }
}
