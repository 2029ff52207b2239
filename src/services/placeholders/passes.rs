//! The five placeholder syntaxes, one pass each.
//!
//! A pass pairs a pattern with a resolver. Returning `None` from
//! [`PlaceholderPass::resolve`] leaves the matched text exactly as found.

use crate::services::assets::{Asset, AssetRegistry};
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// `{{ asset "name" "mode" }}`, with any `src="` before and closing quote
/// after captured so the src-attribute shape can be recognised.
static ASSET_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(src\s*=\s*["']\s*)?\{\{\s*asset\s+["']([^"']+)["']\s+["']([^"']+)["']\s*\}\}(\s*["'])?"#,
    )
    .expect("valid asset tag regex")
});

/// `{#asset name @encoding=type}`, with any `url(` before and `)` after
/// captured so the css url shape can be recognised.
static ALT_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(url\(\s*)?\{#asset\s+(\S+?)\s+@encoding=(\w+)\s*\}(\s*\))?")
        .expect("valid alternate tag regex")
});

/// `src="{{asset 'name' 'mode'}}"`, quote styles may mix.
static SRC_ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"src\s*=\s*["']\s*\{\{\s*asset\s+["']([^"']+)["']\s+["']([^"']+)["']\s*\}\}\s*["']"#,
    )
    .expect("valid src attribute regex")
});

/// `url({#asset name @encoding=type})`
static CSS_ALT_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"url\(\s*\{#asset\s+(\S+?)\s+@encoding=(\w+)\s*\}\s*\)")
        .expect("valid css alternate tag regex")
});

/// `url(ref)`, `url("ref")` or `url('ref')`
static BARE_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"url\(\s*(?:"([^"]*)"|'([^']*)'|([^)"'\s]+))\s*\)"#)
        .expect("valid url regex")
});

/// How a tag asks for its asset to be inlined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InlineMode {
    Utf8,
    DataUri,
}

impl InlineMode {
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.eq_ignore_ascii_case("utf8") {
            Some(Self::Utf8)
        } else if raw.eq_ignore_ascii_case("datauri") {
            Some(Self::DataUri)
        } else {
            None
        }
    }

    fn render(self, asset: &Asset) -> String {
        match self {
            Self::Utf8 => asset.raw().to_string(),
            Self::DataUri => asset.data_uri(),
        }
    }
}

pub trait PlaceholderPass: Send + Sync {
    /// Short label used in diagnostics.
    fn name(&self) -> &'static str;

    fn pattern(&self) -> &Regex;

    /// Replacement for one match, or `None` to keep the match verbatim.
    fn resolve(&self, caps: &Captures<'_>, registry: &AssetRegistry) -> Option<String>;
}

/// The passes in the order they run.
pub fn default_passes() -> Vec<Box<dyn PlaceholderPass>> {
    vec![
        Box::new(AssetTagPass),
        Box::new(AlternateTagPass),
        Box::new(SrcAttributePass),
        Box::new(CssAlternateTagPass),
        Box::new(BareCssUrlPass),
    ]
}

fn lookup<'r>(registry: &'r AssetRegistry, name: &str, pass: &str) -> Option<&'r Asset> {
    let asset = registry.get(name);
    if asset.is_none() {
        log::warn!("[{pass}] asset '{name}' not found, leaving placeholder");
    }
    asset
}

/// Text of an optional capture group, empty when it did not participate.
fn group<'h>(caps: &Captures<'h>, index: usize) -> &'h str {
    caps.get(index).map_or("", |m| m.as_str())
}

/// Only `dataURI` is meaningful for the alternate syntax.
fn require_data_uri(encoding: &str, name: &str, pass: &str) -> Option<()> {
    if encoding.eq_ignore_ascii_case("datauri") {
        Some(())
    } else {
        log::debug!("[{pass}] unsupported encoding '{encoding}' for '{name}', leaving placeholder");
        None
    }
}

pub struct AssetTagPass;

impl PlaceholderPass for AssetTagPass {
    fn name(&self) -> &'static str {
        "asset-tag"
    }

    fn pattern(&self) -> &Regex {
        &ASSET_TAG_RE
    }

    fn resolve(&self, caps: &Captures<'_>, registry: &AssetRegistry) -> Option<String> {
        let (name, raw_mode) = (&caps[2], &caps[3]);
        let Some(mode) = InlineMode::parse(raw_mode) else {
            log::warn!("[{}] unknown mode '{raw_mode}' for '{name}'", self.name());
            return None;
        };
        let (prefix, suffix) = (group(caps, 1), group(caps, 4));
        if mode == InlineMode::DataUri && !prefix.is_empty() && !suffix.is_empty() {
            // src="{{asset ... 'dataURI'}}" belongs to the src-attribute pass
            return None;
        }
        let asset = lookup(registry, name, self.name())?;
        log::debug!("[{}] inlining '{name}' as {mode:?}", self.name());
        Some(format!("{prefix}{}{suffix}", mode.render(asset)))
    }
}

pub struct AlternateTagPass;

impl PlaceholderPass for AlternateTagPass {
    fn name(&self) -> &'static str {
        "alternate-tag"
    }

    fn pattern(&self) -> &Regex {
        &ALT_TAG_RE
    }

    fn resolve(&self, caps: &Captures<'_>, registry: &AssetRegistry) -> Option<String> {
        let (prefix, suffix) = (group(caps, 1), group(caps, 4));
        if !prefix.is_empty() && !suffix.is_empty() {
            // url({#asset ...}) belongs to the css url pass
            return None;
        }
        let (name, encoding) = (&caps[2], &caps[3]);
        require_data_uri(encoding, name, self.name())?;
        let asset = lookup(registry, name, self.name())?;
        log::debug!("[{}] inlining '{name}' as data URI", self.name());
        Some(format!("{prefix}{}{suffix}", asset.data_uri()))
    }
}

pub struct SrcAttributePass;

impl PlaceholderPass for SrcAttributePass {
    fn name(&self) -> &'static str {
        "src-attribute"
    }

    fn pattern(&self) -> &Regex {
        &SRC_ATTR_RE
    }

    fn resolve(&self, caps: &Captures<'_>, registry: &AssetRegistry) -> Option<String> {
        let (name, raw_mode) = (&caps[1], &caps[2]);
        if InlineMode::parse(raw_mode) != Some(InlineMode::DataUri) {
            log::debug!("[{}] mode '{raw_mode}' not usable in src for '{name}'", self.name());
            return None;
        }
        let asset = lookup(registry, name, self.name())?;
        log::debug!("[{}] inlining '{name}' into src", self.name());
        Some(format!("src=\"{}\"", asset.data_uri()))
    }
}

pub struct CssAlternateTagPass;

impl PlaceholderPass for CssAlternateTagPass {
    fn name(&self) -> &'static str {
        "css-alternate-tag"
    }

    fn pattern(&self) -> &Regex {
        &CSS_ALT_TAG_RE
    }

    fn resolve(&self, caps: &Captures<'_>, registry: &AssetRegistry) -> Option<String> {
        let (name, encoding) = (&caps[1], &caps[2]);
        require_data_uri(encoding, name, self.name())?;
        let asset = lookup(registry, name, self.name())?;
        log::debug!("[{}] inlining '{name}' into url()", self.name());
        Some(format!("url(\"{}\")", asset.data_uri()))
    }
}

pub struct BareCssUrlPass;

impl PlaceholderPass for BareCssUrlPass {
    fn name(&self) -> &'static str {
        "css-url"
    }

    fn pattern(&self) -> &Regex {
        &BARE_URL_RE
    }

    fn resolve(&self, caps: &Captures<'_>, registry: &AssetRegistry) -> Option<String> {
        let reference = caps.get(1).or_else(|| caps.get(2)).or_else(|| caps.get(3))?;
        let reference = reference.as_str().trim();

        if reference.is_empty() || is_data_uri(reference) {
            return None;
        }

        let asset = match_basename(reference, registry)?;
        log::debug!("[{}] inlining '{}' for url({reference})", self.name(), asset.name);
        Some(format!("url(\"{}\")", asset.data_uri()))
    }
}

fn is_data_uri(reference: &str) -> bool {
    reference
        .get(..5)
        .is_some_and(|scheme| scheme.eq_ignore_ascii_case("data:"))
}

/// Last path segment of a URL, without query string or fragment.
pub fn url_basename(reference: &str) -> &str {
    let end = reference.find(['?', '#']).unwrap_or(reference.len());
    let path = &reference[..end];
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

fn match_basename<'r>(reference: &str, registry: &'r AssetRegistry) -> Option<&'r Asset> {
    let basename = url_basename(reference);
    if basename.is_empty() {
        return None;
    }
    if let Some(asset) = registry.get(basename) {
        return Some(asset);
    }
    let decoded = urlencoding::decode(basename).ok()?;
    registry.get(&decoded)
}
