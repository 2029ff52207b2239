//! Filename → MIME type classification.

use std::path::Path;

/// Fallback when neither the curated table nor the generic lookup knows the
/// extension.
pub const DEFAULT_MIME: &str = "application/octet-stream";

/// Extensions the export tool emits, with the exact types its renderer expects.
const CURATED: &[(&str, &str)] = &[
    ("js", "application/javascript"),
    ("css", "text/css"),
    ("ttf", "font/ttf"),
    ("woff", "font/woff"),
    ("woff2", "font/woff2"),
    ("eot", "application/vnd.ms-fontobject"),
    ("svg", "image/svg+xml"),
];

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif"];

/// Lowercased extension of a filename, if any.
pub fn extension_of(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .filter(|e| !e.is_empty())
}

/// Classify a filename into a MIME type string. Never fails.
pub fn classify(filename: &str) -> String {
    let Some(ext) = extension_of(filename) else {
        return DEFAULT_MIME.to_string();
    };

    if let Some((_, mime)) = CURATED.iter().find(|(e, _)| *e == ext) {
        return (*mime).to_string();
    }

    if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        return format!("image/{ext}");
    }

    mime_guess::from_ext(&ext)
        .first_raw()
        .unwrap_or(DEFAULT_MIME)
        .to_string()
}
