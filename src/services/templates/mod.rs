//! Template descriptor loading and content rewriting.
//!
//! Templates come from `templates/` when that directory exists; otherwise the
//! top-level `*.json` files of the export are tried. The two sources are
//! never combined.

use crate::services::assets::decode::read_text_lossy;
use crate::services::placeholders::PlaceholderResolver;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Directory holding template descriptors.
pub const TEMPLATES_DIR: &str = "templates";

/// Field rewritten by the placeholder resolver.
pub const CONTENT_FIELD: &str = "content";

/// A template descriptor; every field is carried through as loaded.
pub type TemplateRecord = Map<String, Value>;

/// Where the templates of an export were found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    /// `templates/`, walked recursively.
    Directory(PathBuf),
    /// Top-level descriptors of the export root.
    RootFiles(PathBuf),
}

impl TemplateSource {
    pub fn locate(root: &Path) -> Self {
        let dir = root.join(TEMPLATES_DIR);
        if dir.is_dir() {
            Self::Directory(dir)
        } else {
            Self::RootFiles(root.to_path_buf())
        }
    }
}

/// Load, rewrite and collect every template of an extracted export.
///
/// `metadata_file` names the top-level file that is never a template.
pub fn assemble_templates(
    root: &Path,
    resolver: &PlaceholderResolver<'_>,
    metadata_file: &str,
) -> Vec<TemplateRecord> {
    let templates = match TemplateSource::locate(root) {
        TemplateSource::Directory(dir) => {
            log::debug!("Loading templates from {}", dir.display());
            descriptor_files(&dir, None)
                .iter()
                .filter_map(|path| load_template(path, resolver, false))
                .collect::<Vec<_>>()
        }
        TemplateSource::RootFiles(dir) => {
            log::debug!(
                "No {TEMPLATES_DIR}/ directory, scanning top-level files of {}",
                dir.display()
            );
            descriptor_files(&dir, Some(1))
                .iter()
                .filter(|path| {
                    path.file_name()
                        .map(|n| !n.to_string_lossy().eq_ignore_ascii_case(metadata_file))
                        .unwrap_or(false)
                })
                .filter_map(|path| load_template(path, resolver, true))
                .collect::<Vec<_>>()
        }
    };

    if templates.is_empty() {
        log::warn!("No templates found in export");
    }

    templates
}

/// Parse one descriptor and rewrite its content.
///
/// With `require_content`, objects lacking a `content` field are dropped
/// silently; they are other export records, not templates.
fn load_template(
    path: &Path,
    resolver: &PlaceholderResolver<'_>,
    require_content: bool,
) -> Option<TemplateRecord> {
    log::debug!("Processing template file: {}", path.display());

    let mut record = match read_record(path) {
        Ok(r) => r,
        Err(e) => {
            if require_content {
                log::debug!("Skipping {}: {e}", path.display());
            } else {
                log::warn!("Skipping template {}: {e}", path.display());
            }
            return None;
        }
    };

    if require_content && !record.contains_key(CONTENT_FIELD) {
        log::debug!("{} has no {CONTENT_FIELD} field, not a template", path.display());
        return None;
    }

    if let Some(Value::String(content)) = record.get_mut(CONTENT_FIELD) {
        *content = resolver.resolve(content);
    }

    let label = record
        .get("name")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| path.display().to_string());
    log::debug!("Added template: {label}");

    Some(record)
}

fn read_record(path: &Path) -> Result<TemplateRecord, String> {
    let raw = read_text_lossy(path)?;
    match serde_json::from_str::<Value>(&raw).map_err(|e| format!("Failed to parse: {e}"))? {
        Value::Object(map) => Ok(map),
        other => Err(format!("expected a JSON object, found {}", json_kind(&other))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// `*.json` files under `dir`, sorted by name. `max_depth` of `Some(1)`
/// restricts the walk to direct children.
fn descriptor_files(dir: &Path, max_depth: Option<usize>) -> Vec<PathBuf> {
    let mut walker = WalkDir::new(dir).follow_links(false).sort_by_file_name();
    if let Some(depth) = max_depth {
        walker = walker.max_depth(depth);
    }

    walker
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(e) => Some(e),
            Err(e) => {
                log::warn!("Skipping unreadable entry: {e}");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.extension()
                .map(|e| e.eq_ignore_ascii_case("json"))
                .unwrap_or(false)
        })
        .collect()
}

#[cfg(test)]
#[path = "tests/assembler_tests.rs"]
mod tests;
