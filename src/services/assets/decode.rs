//! Text decoding helpers: the base64 shape heuristic and tolerant file reads.

use base64::{engine::general_purpose::STANDARD, Engine};
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

static BASE64_SHAPE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9+/]*={0,2}$").expect("valid base64 regex"));

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Whether the whole string is made of base64 alphabet characters with at
/// most two trailing `=`.
pub fn looks_like_base64(content: &str) -> bool {
    BASE64_SHAPE_RE.is_match(content)
}

/// Decode `content` as base64 text when it looks like base64.
///
/// Best effort: anything that does not match the alphabet, fails to decode,
/// or does not decode to UTF-8 is returned unchanged. Plain text that happens
/// to be base64-shaped (e.g. `abcd`) will be decoded.
pub fn decode_base64_if_needed(content: &str) -> String {
    if !looks_like_base64(content) {
        return content.to_string();
    }

    let bytes = match STANDARD.decode(content) {
        Ok(b) => b,
        Err(e) => {
            log::debug!("Base64 heuristic: keeping original text ({e})");
            return content.to_string();
        }
    };

    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(_) => {
            log::debug!("Base64 heuristic: decoded bytes are not UTF-8, keeping original");
            content.to_string()
        }
    }
}

/// Base64-encode raw bytes with the standard padded alphabet.
pub fn encode_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Read a text file, dropping a UTF-8 BOM and falling back to Windows-1252
/// for bytes that are not valid UTF-8.
pub fn read_text_lossy(path: &Path) -> Result<String, String> {
    let bytes = fs::read(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))?;

    let content_bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(&bytes[..]);

    let text = match String::from_utf8(content_bytes.to_vec()) {
        Ok(s) => s,
        Err(_) => {
            let (cow, _encoding, _had_errors) = encoding_rs::WINDOWS_1252.decode(content_bytes);
            log::debug!("{} is not UTF-8, decoded as Windows-1252", path.display());
            cow.into_owned()
        }
    };

    Ok(text)
}
