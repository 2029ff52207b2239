//! The three asset discovery passes. Each is a pure function of the extracted
//! tree; precedence between them is applied by [`AssetRegistry::merge`].
//!
//! [`AssetRegistry::merge`]: super::AssetRegistry::merge

use super::decode::{decode_base64_if_needed, encode_base64, looks_like_base64, read_text_lossy};
use super::mime::{classify, extension_of};
use super::registry::{Asset, AssetEncoding};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Directory holding JSON asset descriptors.
pub const ASSETS_DIR: &str = "assets";

/// Extensions read as raw bytes and stored base64-encoded.
const BINARY_EXTENSIONS: &[&str] = &[
    "ttf", "woff", "woff2", "eot", "svg", "png", "jpg", "jpeg", "gif",
];

/// Extensions read verbatim as text.
const TEXT_EXTENSIONS: &[&str] = &["css", "js"];

/// `{ "name": ..., "content": ... }`; other fields are ignored.
#[derive(Debug, Deserialize)]
struct AssetDescriptor {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    content: Option<String>,
}

/// Pass 1: fonts and images anywhere in the tree, base64-encoded.
pub fn scan_binary_files(root: &Path) -> Vec<Asset> {
    let mut assets = Vec::new();

    for path in files_with_extensions(root, BINARY_EXTENSIONS) {
        let Some(name) = file_name_of(&path) else {
            continue;
        };

        let bytes = match fs::read(&path) {
            Ok(b) => b,
            Err(e) => {
                log::warn!("Skipping unreadable asset {}: {e}", path.display());
                continue;
            }
        };

        log::debug!("Found binary asset: {} ({} bytes)", path.display(), bytes.len());
        assets.push(Asset {
            mime_type: classify(&name),
            content: encode_base64(&bytes),
            encoding: AssetEncoding::Base64,
            name,
        });
    }

    assets
}

/// Pass 2: `*.json` descriptors under `assets/`.
pub fn scan_asset_descriptors(root: &Path) -> Vec<Asset> {
    let assets_dir = root.join(ASSETS_DIR);
    if !assets_dir.is_dir() {
        log::debug!("No {ASSETS_DIR}/ directory in export");
        return Vec::new();
    }

    log::debug!("Processing assets from: {}", assets_dir.display());

    files_with_extensions(&assets_dir, &["json"])
        .into_iter()
        .filter_map(|path| match read_asset_descriptor(&path) {
            Ok(asset) => asset,
            Err(e) => {
                log::warn!("Skipping asset descriptor {}: {e}", path.display());
                None
            }
        })
        .collect()
}

/// Pass 3: stylesheets and scripts stored as plain files.
pub fn scan_loose_text_files(root: &Path) -> Vec<Asset> {
    let mut assets = Vec::new();

    for path in files_with_extensions(root, TEXT_EXTENSIONS) {
        let Some(name) = file_name_of(&path) else {
            continue;
        };

        match read_text_lossy(&path) {
            Ok(content) => {
                log::debug!("Found text asset: {}", path.display());
                assets.push(Asset {
                    mime_type: classify(&name),
                    content,
                    encoding: AssetEncoding::Text,
                    name,
                });
            }
            Err(e) => log::warn!("Skipping text asset: {e}"),
        }
    }

    assets
}

fn read_asset_descriptor(path: &Path) -> Result<Option<Asset>, String> {
    let raw = read_text_lossy(path)?;
    let descriptor: AssetDescriptor =
        serde_json::from_str(&raw).map_err(|e| format!("Failed to parse: {e}"))?;

    let Some(name) = descriptor.name.filter(|n| !n.is_empty()) else {
        log::warn!("Asset descriptor {} has no name, skipping", path.display());
        return Ok(None);
    };

    let content = descriptor.content.unwrap_or_default();
    let is_text_asset = extension_of(&name)
        .map(|ext| TEXT_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false);

    let (content, encoding) = if is_text_asset {
        (decode_base64_if_needed(&content), AssetEncoding::Text)
    } else if !content.is_empty() && looks_like_base64(&content) {
        (content, AssetEncoding::Base64)
    } else {
        (content, AssetEncoding::Text)
    };

    Ok(Some(Asset {
        mime_type: classify(&name),
        name,
        content,
        encoding,
    }))
}

/// Files under `root` (recursive, sorted by name) whose lowercased extension
/// is in `extensions`.
fn files_with_extensions(root: &Path, extensions: &[&str]) -> Vec<PathBuf> {
    WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
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
                .map(|e| extensions.contains(&e.to_string_lossy().to_lowercase().as_str()))
                .unwrap_or(false)
        })
        .collect()
}

fn file_name_of(path: &Path) -> Option<String> {
    path.file_name().map(|n| n.to_string_lossy().to_string())
}
