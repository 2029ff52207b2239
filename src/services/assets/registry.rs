use super::decode::encode_base64;
use super::scan;
use std::collections::HashMap;
use std::path::Path;

/// How an [`Asset`]'s `content` is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetEncoding {
    /// Literal text (stylesheets, scripts, decoded descriptors).
    Text,
    /// Base64 of the original bytes; used verbatim in data URIs.
    Base64,
}

/// A named piece of content that templates reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    pub name: String,
    pub content: String,
    pub mime_type: String,
    pub encoding: AssetEncoding,
}

impl Asset {
    pub fn is_binary(&self) -> bool {
        self.encoding == AssetEncoding::Base64
    }

    /// The stored content as-is, for `utf8` inlining.
    pub fn raw(&self) -> &str {
        &self.content
    }

    /// Base64 payload, encoding text content on the fly.
    pub fn base64(&self) -> String {
        match self.encoding {
            AssetEncoding::Base64 => self.content.clone(),
            AssetEncoding::Text => encode_base64(self.content.as_bytes()),
        }
    }

    /// `data:<mime>;base64,<payload>`
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.base64())
    }
}

/// Name-keyed assets for one conversion run.
///
/// Once a name is registered it is never replaced; later sources only fill
/// in names that are still missing.
#[derive(Debug, Default)]
pub struct AssetRegistry {
    assets: HashMap<String, Asset>,
}

impl AssetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run all discovery passes over an extracted export, in precedence order.
    pub fn discover(root: &Path) -> Self {
        let mut registry = Self::new();

        let binary = registry.merge(scan::scan_binary_files(root));
        log::debug!("Binary scan registered {binary} assets");

        let described = registry.merge(scan::scan_asset_descriptors(root));
        log::debug!("Descriptor scan registered {described} assets");

        let loose = registry.merge(scan::scan_loose_text_files(root));
        log::debug!("Loose text scan registered {loose} assets");

        registry
    }

    /// Insert unless the name is already taken. Returns whether it was added.
    pub fn insert_if_absent(&mut self, asset: Asset) -> bool {
        if self.assets.contains_key(&asset.name) {
            log::debug!("Asset '{}' already registered, keeping first", asset.name);
            return false;
        }
        log::debug!("Added asset: {} ({})", asset.name, asset.mime_type);
        self.assets.insert(asset.name.clone(), asset);
        true
    }

    /// Merge a discovery pass with insert-if-absent semantics.
    /// Returns how many assets were actually added.
    pub fn merge(&mut self, assets: impl IntoIterator<Item = Asset>) -> usize {
        let mut added = 0;
        for asset in assets {
            if self.insert_if_absent(asset) {
                added += 1;
            }
        }
        added
    }

    pub fn get(&self, name: &str) -> Option<&Asset> {
        self.assets.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.assets.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    pub fn binary_count(&self) -> usize {
        self.assets.values().filter(|a| a.is_binary()).count()
    }
}
