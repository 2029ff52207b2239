//! Run configuration for one conversion.

use std::path::PathBuf;

/// Top-level export file that holds package metadata, never a template.
pub const DEFAULT_METADATA_FILE: &str = "metadata.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConverterConfig {
    /// Emit per-step diagnostics (discovery, registration, replacement, skip).
    pub verbose: bool,
    /// Parent for the temporary extraction directory. System temp when `None`.
    pub work_dir: Option<PathBuf>,
    /// Reserved top-level filename skipped by the root template fallback.
    pub metadata_file: String,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            work_dir: None,
            metadata_file: DEFAULT_METADATA_FILE.into(),
        }
    }
}

impl ConverterConfig {
    /// Log level the binary should install for this configuration.
    pub fn log_level(&self) -> log::LevelFilter {
        if self.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        }
    }
}
