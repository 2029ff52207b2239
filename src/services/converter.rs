//! One export → JSON conversion run.
//!
//! Steps:
//! 1. Extract the archive into a scoped temp directory
//! 2. Discover assets (binary files, descriptors, loose text)
//! 3. Load templates and resolve their placeholders
//! 4. Drop the working directory, whatever happened above

use crate::services::archive::{self, ExtractedExport};
use crate::services::assets::AssetRegistry;
use crate::services::config::ConverterConfig;
use crate::services::placeholders::PlaceholderResolver;
use crate::services::templates::{assemble_templates, TemplateRecord};
use crate::types::{ConvertError, ConvertResult};
use std::fs;
use std::path::Path;

/// Counts reported at the end of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionSummary {
    pub files_extracted: usize,
    pub assets: usize,
    pub binary_assets: usize,
    pub templates: usize,
}

/// Result of [`Converter::convert`].
#[derive(Debug, Clone)]
pub struct Conversion {
    pub templates: Vec<TemplateRecord>,
    pub summary: ConversionSummary,
}

pub struct Converter {
    config: ConverterConfig,
}

impl Converter {
    pub fn new(config: ConverterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Convert an export archive into self-contained template records.
    ///
    /// Only archive-level failures are returned; everything per-file is logged
    /// and skipped.
    pub fn convert(&self, archive_path: &Path) -> ConvertResult<Conversion> {
        log::info!("Starting conversion of {}", archive_path.display());

        if self.config.verbose {
            match archive::list_entries(archive_path) {
                Ok(names) => log::debug!("Files in export: {names:?}"),
                Err(e) => log::debug!("Could not list export entries: {e}"),
            }
        }

        let export = archive::extract_export(archive_path, self.config.work_dir.as_deref())?;
        let conversion = self.convert_extracted(&export);

        let root = export.root().to_path_buf();
        if let Err(e) = export.close() {
            log::warn!("Failed to remove working directory {}: {e}", root.display());
        }

        log::info!("Conversion completed.");
        Ok(conversion)
    }

    fn convert_extracted(&self, export: &ExtractedExport) -> Conversion {
        let root = export.root();

        let registry = AssetRegistry::discover(root);
        log::info!(
            "Registered {} assets ({} binary)",
            registry.len(),
            registry.binary_count()
        );

        let resolver = PlaceholderResolver::new(&registry);
        let templates = assemble_templates(root, &resolver, &self.config.metadata_file);

        let summary = ConversionSummary {
            files_extracted: export.files_extracted,
            assets: registry.len(),
            binary_assets: registry.binary_count(),
            templates: templates.len(),
        };

        Conversion { templates, summary }
    }

    /// Convert and write the templates to `output_path` as a pretty JSON array.
    pub fn save(&self, archive_path: &Path, output_path: &Path) -> ConvertResult<Conversion> {
        let conversion = self.convert(archive_path)?;
        write_templates(&conversion.templates, output_path)?;
        log::info!(
            "Saved {} templates to {}",
            conversion.templates.len(),
            output_path.display()
        );
        Ok(conversion)
    }
}

/// Write records as a UTF-8, pretty-printed JSON array, creating parent
/// directories. Non-ASCII text is written literally.
pub fn write_templates(templates: &[TemplateRecord], output_path: &Path) -> ConvertResult<()> {
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            ConvertError::Output(format!("Failed to create {}: {e}", parent.display()))
        })?;
    }

    let json = serde_json::to_string_pretty(templates)
        .map_err(|e| ConvertError::Output(format!("Failed to serialize templates: {e}")))?;
    fs::write(output_path, json).map_err(|e| {
        ConvertError::Output(format!("Failed to write {}: {e}", output_path.display()))
    })?;

    Ok(())
}

#[cfg(test)]
#[path = "tests/converter_tests.rs"]
mod tests;
