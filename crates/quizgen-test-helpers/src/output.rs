use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A scratch directory holding the output file of one test run.
pub struct OutputDir {
    // Dropping this removes the directory
    temp_dir: TempDir,
    output: PathBuf,
}

impl OutputDir {
    pub fn new() -> Result<Self, std::io::Error> {
        let temp_dir = TempDir::with_prefix("test-quizgen-output")?;
        let output = temp_dir.path().join("quiz.json");

        tracing::info!(output = %output.display(), "created output dir");
        Ok(Self { temp_dir, output })
    }

    pub fn dir(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Path of `quiz.json` inside the directory. The file itself is not created.
    pub fn output(&self) -> &Path {
        &self.output
    }

    pub fn read_output(&self) -> Option<String> {
        std::fs::read_to_string(&self.output).ok()
    }

    /// Number of entries in the directory, to catch stray temporary files.
    pub fn entries(&self) -> usize {
        std::fs::read_dir(self.dir()).map(Iterator::count).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn test_output_is_not_created() {
        let dir = OutputDir::new().unwrap();
        assert!(dir.read_output().is_none());
        assert_eq!(dir.entries(), 0);
        let path = dir.dir().to_path_buf();
        drop(dir);
        assert!(!path.exists());
    }
}
