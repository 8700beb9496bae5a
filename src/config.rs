//! Configuration management and validation.
//!
//! All input and output locations are resolved relative to a single base
//! directory, mirroring the layout of the source dataset: rating files and
//! the metadata reference live under `data/`, the report workbook is
//! written under `Informe/`.

use crate::constants::{
    DATA_DIR_NAME, MOVIE_TITLES_FILE_NAME, RATING_FILE_PATTERN, REPORT_DIR_NAME, REPORT_FILE_NAME,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Global configuration for ratings processing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base directory all other paths are resolved against
    pub base_dir: PathBuf,

    /// Explicit report path override; defaults to `<base>/Informe/Analisis.xlsx`
    pub report_path: Option<PathBuf>,

    /// Show progress bars and console summaries during processing
    pub show_progress: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            report_path: None,
            show_progress: true,
        }
    }
}

impl Config {
    /// Create a configuration rooted at the given base directory
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            ..Self::default()
        }
    }

    /// Override the report output path
    pub fn with_report_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.report_path = Some(path.into());
        self
    }

    /// Enable or disable progress reporting
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Directory containing the metadata reference and rating files
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join(DATA_DIR_NAME)
    }

    /// Path to the movie metadata reference file
    pub fn metadata_path(&self) -> PathBuf {
        self.data_dir().join(MOVIE_TITLES_FILE_NAME)
    }

    /// Glob pattern matching the rating files to process
    pub fn rating_file_pattern(&self) -> String {
        self.data_dir()
            .join(RATING_FILE_PATTERN)
            .to_string_lossy()
            .into_owned()
    }

    /// Path the report workbook is written to
    pub fn report_path(&self) -> PathBuf {
        match &self.report_path {
            Some(path) => path.clone(),
            None => self.base_dir.join(REPORT_DIR_NAME).join(REPORT_FILE_NAME),
        }
    }

    /// Validate that the configured base directory exists
    pub fn validate(&self) -> Result<()> {
        if !self.base_dir.is_dir() {
            return Err(Error::configuration(format!(
                "Base directory does not exist: {}",
                self.base_dir.display()
            )));
        }
        Ok(())
    }

    /// Ensure the directory the report is written into exists
    pub fn ensure_report_directory(&self) -> Result<()> {
        let report_path = self.report_path();
        if let Some(parent) = report_path.parent() {
            ensure_directory(parent)?;
        }
        Ok(())
    }
}

fn ensure_directory(dir: &Path) -> Result<()> {
    if !dir.exists() {
        std::fs::create_dir_all(dir).map_err(|e| {
            Error::configuration(format!(
                "Failed to create directory '{}': {}",
                dir.display(),
                e
            ))
        })?;
    }
    Ok(())
}
