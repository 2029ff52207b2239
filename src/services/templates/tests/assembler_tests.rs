use super::*;
use crate::services::assets::{Asset, AssetEncoding, AssetRegistry};
use serde_json::json;
use std::fs;
use tempfile::TempDir;

fn write(root: &Path, rel: &str, body: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, body).unwrap();
}

fn registry() -> AssetRegistry {
    let mut registry = AssetRegistry::new();
    registry.insert_if_absent(Asset {
        name: "style.css".to_string(),
        content: "h1{color:navy}".to_string(),
        mime_type: "text/css".to_string(),
        encoding: AssetEncoding::Text,
    });
    registry
}

#[test]
fn test_templates_dir_rewrites_content_and_keeps_fields() {
    let tmp = TempDir::new().unwrap();
    write(
        tmp.path(),
        "templates/invoice.json",
        r#"{"shortid":"abc","name":"invoice","content":"<style>{{ asset \"style.css\" \"utf8\" }}</style>","engine":"handlebars"}"#,
    );

    let reg = registry();
    let resolver = PlaceholderResolver::new(&reg);
    let templates = assemble_templates(tmp.path(), &resolver, "metadata.json");

    assert_eq!(templates.len(), 1);
    let t = &templates[0];
    assert_eq!(t["content"], json!("<style>h1{color:navy}</style>"));
    assert_eq!(t["engine"], json!("handlebars"));

    let keys: Vec<&str> = t.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["shortid", "name", "content", "engine"]);
}

#[test]
fn test_templates_dir_recursive_and_sorted() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "templates/b.json", r#"{"name":"b"}"#);
    write(tmp.path(), "templates/a/nested.json", r#"{"name":"nested"}"#);
    write(tmp.path(), "templates/c.json", r#"{"name":"c","content":42}"#);

    let reg = AssetRegistry::new();
    let resolver = PlaceholderResolver::new(&reg);
    let templates = assemble_templates(tmp.path(), &resolver, "metadata.json");

    let names: Vec<&str> = templates
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["nested", "b", "c"]);
    // Non-string content passes through untouched
    assert_eq!(templates[2]["content"], json!(42));
}

#[test]
fn test_templates_dir_skips_malformed() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "templates/bad.json", "{ nope");
    write(tmp.path(), "templates/list.json", "[1, 2]");
    write(tmp.path(), "templates/good.json", r#"{"name":"good","content":"x"}"#);

    let reg = AssetRegistry::new();
    let resolver = PlaceholderResolver::new(&reg);
    let templates = assemble_templates(tmp.path(), &resolver, "metadata.json");

    assert_eq!(templates.len(), 1);
    assert_eq!(templates[0]["name"], json!("good"));
}

#[test]
fn test_template_with_bom_loads() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("templates");
    fs::create_dir(&dir).unwrap();
    fs::write(
        dir.join("bom.json"),
        b"\xEF\xBB\xBF{\"name\":\"bom\",\"content\":\"{{ asset 'style.css' 'utf8' }}\"}",
    )
    .unwrap();

    let reg = registry();
    let resolver = PlaceholderResolver::new(&reg);
    let templates = assemble_templates(tmp.path(), &resolver, "metadata.json");

    assert_eq!(templates.len(), 1);
    assert_eq!(templates[0]["content"], json!("h1{color:navy}"));
}

#[test]
fn test_root_fallback_requires_content_and_skips_metadata() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "metadata.json", r#"{"content":"not a template"}"#);
    write(
        tmp.path(),
        "report.json",
        r#"{"name":"report","content":"{{ asset 'style.css' 'utf8' }}"}"#,
    );
    write(tmp.path(), "settings.json", r#"{"key":"value"}"#);
    write(tmp.path(), "deep/inner.json", r#"{"name":"inner","content":"x"}"#);

    let reg = registry();
    let resolver = PlaceholderResolver::new(&reg);
    let templates = assemble_templates(tmp.path(), &resolver, "metadata.json");

    assert_eq!(templates.len(), 1);
    assert_eq!(templates[0]["name"], json!("report"));
    assert_eq!(templates[0]["content"], json!("h1{color:navy}"));
}

#[test]
fn test_directory_excludes_root_fallback() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "templates/only.json", r#"{"name":"only","content":""}"#);
    write(tmp.path(), "root.json", r#"{"name":"root","content":"x"}"#);

    let reg = AssetRegistry::new();
    let resolver = PlaceholderResolver::new(&reg);
    let templates = assemble_templates(tmp.path(), &resolver, "metadata.json");

    assert_eq!(templates.len(), 1);
    assert_eq!(templates[0]["name"], json!("only"));
}

#[test]
fn test_empty_export_yields_no_templates() {
    let tmp = TempDir::new().unwrap();
    let reg = AssetRegistry::new();
    let resolver = PlaceholderResolver::new(&reg);

    assert!(assemble_templates(tmp.path(), &resolver, "metadata.json").is_empty());
}

#[test]
fn test_locate_source() {
    let tmp = TempDir::new().unwrap();
    assert_eq!(
        TemplateSource::locate(tmp.path()),
        TemplateSource::RootFiles(tmp.path().to_path_buf())
    );

    fs::create_dir(tmp.path().join("templates")).unwrap();
    assert_eq!(
        TemplateSource::locate(tmp.path()),
        TemplateSource::Directory(tmp.path().join("templates"))
    );
}
