use std::path::Path;
use tempfile::TempDir;

/// An export archive unpacked into an ephemeral directory.
///
/// The directory is deleted when this value is dropped.
#[derive(Debug)]
pub struct ExtractedExport {
    pub(super) dir: TempDir,
    pub files_extracted: usize,
}

impl ExtractedExport {
    /// Root of the extracted tree.
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Remove the working directory now, reporting failures instead of
    /// swallowing them the way `Drop` does.
    pub fn close(self) -> std::io::Result<()> {
        self.dir.close()
    }
}
