use super::*;
use serde_json::{json, Value};
use std::io::Write;
use std::path::PathBuf;
use tempfile::TempDir;
use zip::write::SimpleFileOptions;

fn write_zip(dir: &Path, entries: &[(&str, &[u8])]) -> PathBuf {
    let path = dir.join("export.jsrexport");
    let mut zip = zip::ZipWriter::new(fs::File::create(&path).unwrap());
    for (name, body) in entries {
        zip.start_file(*name, SimpleFileOptions::default()).unwrap();
        zip.write_all(body).unwrap();
    }
    zip.finish().unwrap();
    path
}

fn converter_in(work: &Path) -> Converter {
    Converter::new(ConverterConfig {
        verbose: true,
        work_dir: Some(work.to_path_buf()),
        ..ConverterConfig::default()
    })
}

#[test]
fn test_convert_summary_and_cleanup() {
    let tmp = TempDir::new().unwrap();
    let archive = write_zip(
        tmp.path(),
        &[
            ("assets/fonts/icon.woff", &[1u8, 2, 3][..]),
            ("assets/style.json", &br#"{"name":"style.css","content":"a{}"}"#[..]),
            (
                "templates/t.json",
                &br#"{"name":"t","content":"{{ asset 'style.css' 'utf8' }}"}"#[..],
            ),
        ],
    );
    let work = tmp.path().join("work");

    let conversion = converter_in(&work).convert(&archive).unwrap();

    assert_eq!(
        conversion.summary,
        ConversionSummary {
            files_extracted: 3,
            assets: 2,
            binary_assets: 1,
            templates: 1,
        }
    );
    assert_eq!(conversion.templates[0]["content"], json!("a{}"));

    // Working directory is gone once the run ends
    assert_eq!(fs::read_dir(&work).unwrap().count(), 0);
}

#[test]
fn test_convert_invalid_archive_is_fatal() {
    let tmp = TempDir::new().unwrap();
    let bogus = tmp.path().join("broken.jsrexport");
    fs::write(&bogus, b"PK but not really").unwrap();

    let result = converter_in(&tmp.path().join("work")).convert(&bogus);
    assert!(matches!(result, Err(ConvertError::Archive(_))));
}

#[test]
fn test_save_creates_parent_dirs_and_keeps_unicode() {
    let tmp = TempDir::new().unwrap();
    let archive = write_zip(
        tmp.path(),
        &[(
            "templates/greet.json",
            "{\"name\":\"grüße\",\"content\":\"<p>日本語</p>\"}".as_bytes(),
        )],
    );
    let output = tmp.path().join("out/nested/templates.json");

    converter_in(&tmp.path().join("work"))
        .save(&archive, &output)
        .unwrap();

    let written = fs::read_to_string(&output).unwrap();
    assert!(written.contains("grüße"));
    assert!(written.contains("<p>日本語</p>"));
    assert!(written.starts_with("[\n  {"));

    let parsed: Value = serde_json::from_str(&written).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 1);
}

#[test]
fn test_write_templates_empty_array() {
    let tmp = TempDir::new().unwrap();
    let output = tmp.path().join("empty.json");

    write_templates(&[], &output).unwrap();
    assert_eq!(fs::read_to_string(&output).unwrap(), "[]");
}

#[test]
fn test_default_config() {
    let config = ConverterConfig::default();
    assert!(!config.verbose);
    assert_eq!(config.metadata_file, "metadata.json");
    assert_eq!(config.log_level(), log::LevelFilter::Info);
    assert_eq!(
        Converter::new(ConverterConfig { verbose: true, ..config })
            .config()
            .log_level(),
        log::LevelFilter::Debug
    );
}
