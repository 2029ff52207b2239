//! Export archive extraction into a scoped working directory.
//!
//! The extracted tree lives in a [`tempfile::TempDir`] owned by
//! [`ExtractedExport`]; dropping it removes the directory on every exit path.

mod extract;
mod types;

pub use extract::{extract_export, list_entries};
pub use types::ExtractedExport;

#[cfg(test)]
#[path = "tests/extract_tests.rs"]
mod tests;
