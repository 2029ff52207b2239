use super::types::ExtractedExport;
use crate::types::{ConvertError, ConvertResult};
use std::fs;
use std::io;
use std::path::Path;

const WORK_DIR_PREFIX: &str = "report-flatten-";

/// Names of every entry in the archive, in archive order.
pub fn list_entries(archive_path: &Path) -> ConvertResult<Vec<String>> {
    let archive = open_zip(archive_path)?;
    Ok(archive.file_names().map(|n| n.to_string()).collect())
}

/// Extract a ZIP export into a fresh temp directory.
///
/// The directory is created under `work_dir` when given, else under the system
/// temp dir. Any failure here is fatal for the run; the partially filled
/// directory is removed before the error is returned.
pub fn extract_export(
    archive_path: &Path,
    work_dir: Option<&Path>,
) -> ConvertResult<ExtractedExport> {
    let mut archive = open_zip(archive_path)?;

    let mut builder = tempfile::Builder::new();
    builder.prefix(WORK_DIR_PREFIX);
    let dir = match work_dir {
        Some(parent) => {
            fs::create_dir_all(parent).map_err(|e| {
                ConvertError::Io(format!(
                    "Failed to create work dir {}: {e}",
                    parent.display()
                ))
            })?;
            builder.tempdir_in(parent)
        }
        None => builder.tempdir(),
    }
    .map_err(|e| ConvertError::Io(format!("Failed to create working directory: {e}")))?;

    log::debug!(
        "Extracting {} entries from {} into {}",
        archive.len(),
        archive_path.display(),
        dir.path().display()
    );

    let mut count: usize = 0;
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i).map_err(|e| {
            let msg = e.to_string();
            if msg.contains("Password") || msg.contains("password") {
                ConvertError::Archive("Encrypted archives are not supported".to_string())
            } else {
                ConvertError::Archive(format!("Failed to read entry {i}: {e}"))
            }
        })?;

        let entry_path = match entry.enclosed_name() {
            Some(p) => p,
            None => {
                log::warn!("Skipping unsafe archive entry: {}", entry.name());
                continue;
            }
        };

        let output_path = dir.path().join(&entry_path);

        if entry.is_dir() {
            fs::create_dir_all(&output_path)
                .map_err(|e| ConvertError::Io(format!("Failed to create dir: {e}")))?;
        } else {
            if let Some(parent) = output_path.parent() {
                fs::create_dir_all(parent)
                    .map_err(|e| ConvertError::Io(format!("Failed to create parent: {e}")))?;
            }
            let mut outfile = fs::File::create(&output_path)
                .map_err(|e| ConvertError::Io(format!("Failed to create file: {e}")))?;
            io::copy(&mut entry, &mut outfile).map_err(|e| {
                ConvertError::Archive(format!("Failed to extract {}: {e}", entry.name()))
            })?;
            count += 1;
        }
    }

    Ok(ExtractedExport {
        dir,
        files_extracted: count,
    })
}

fn open_zip(archive_path: &Path) -> ConvertResult<zip::ZipArchive<fs::File>> {
    let file = fs::File::open(archive_path).map_err(|e| {
        ConvertError::Archive(format!(
            "Failed to open archive {}: {e}",
            archive_path.display()
        ))
    })?;
    zip::ZipArchive::new(file)
        .map_err(|e| ConvertError::Archive(format!("Invalid or corrupt ZIP: {e}")))
}
