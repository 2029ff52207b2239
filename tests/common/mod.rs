#![allow(dead_code)]

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Once;
use zip::write::SimpleFileOptions;

static INIT: Once = Once::new();

pub fn init_logging() {
    INIT.call_once(|| {
        let _ = env_logger::builder()
            .is_test(true)
            .filter_level(log::LevelFilter::Debug)
            .try_init();
    });
}

/// Build a ZIP export at `dir/name` from `(entry path, bytes)` pairs.
pub fn build_export(dir: &Path, name: &str, entries: &[(&str, &[u8])]) -> PathBuf {
    let path = dir.join(name);
    let file = fs::File::create(&path).expect("Failed to create archive");
    let mut zip = zip::ZipWriter::new(file);
    for (entry, body) in entries {
        zip.start_file(*entry, SimpleFileOptions::default())
            .expect("Failed to start entry");
        zip.write_all(body).expect("Failed to write entry");
    }
    zip.finish().expect("Failed to finish archive");
    path
}
