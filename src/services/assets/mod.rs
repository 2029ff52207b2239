//! Asset discovery for extracted exports.
//!
//! Assets come from three sources, merged first-wins in this order:
//! raw binary files, JSON descriptors under `assets/`, loose `.css`/`.js`
//! files.

pub mod decode;
pub mod mime;
mod registry;
mod scan;

pub use registry::{Asset, AssetEncoding, AssetRegistry};
pub use scan::{scan_asset_descriptors, scan_binary_files, scan_loose_text_files};

#[cfg(test)]
#[path = "tests/mime_tests.rs"]
mod mime_tests;

#[cfg(test)]
#[path = "tests/decode_tests.rs"]
mod decode_tests;

#[cfg(test)]
#[path = "tests/registry_tests.rs"]
mod registry_tests;
