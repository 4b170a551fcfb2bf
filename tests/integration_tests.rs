use tempfile::TempDir;
use xml2json::{CliConfig, ConvertEngine, ConvertPipeline, LocalStorage};

fn write_source(dir: &TempDir, name: &str, content: &str) -> String {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path.to_str().unwrap().to_string()
}

fn engine_for(
    dir: &TempDir,
    source: String,
    pretty: bool,
) -> ConvertEngine<ConvertPipeline<LocalStorage, CliConfig>> {
    let config = CliConfig {
        source,
        pretty,
        verbose: false,
    };
    let storage = LocalStorage::new(dir.path().to_str().unwrap().to_string());
    ConvertEngine::new(ConvertPipeline::new(storage, config))
}

#[tokio::test]
async fn test_end_to_end_conversion() {
    let temp_dir = TempDir::new().unwrap();
    let source = write_source(
        &temp_dir,
        "catalog.xml",
        r#"<?xml version="1.0" encoding="utf-8"?>
<catalog>
  <book id="bk101">
    <author>Gambardella, Matthew</author>
    <title>XML Developer's Guide</title>
  </book>
  <book id="bk102">
    <author>Ralls, Kim</author>
    <title>Midnight Rain</title>
  </book>
</catalog>
"#,
    );

    let engine = engine_for(&temp_dir, source, false);
    let result = engine.run().await;

    assert!(result.is_ok());
    assert_eq!(result.unwrap(), "data.json");

    let output_path = temp_dir.path().join("data.json");
    assert!(output_path.exists());

    let content = std::fs::read_to_string(&output_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();

    assert_eq!(
        parsed,
        serde_json::json!({
            "catalog": {
                "book": [
                    {
                        "@id": "bk101",
                        "author": "Gambardella, Matthew",
                        "title": "XML Developer's Guide"
                    },
                    {
                        "@id": "bk102",
                        "author": "Ralls, Kim",
                        "title": "Midnight Rain"
                    }
                ]
            }
        })
    );
}

#[tokio::test]
async fn test_repeated_siblings_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let source = write_source(&temp_dir, "input.xml", "<a><b>1</b><b>2</b></a>");

    let engine = engine_for(&temp_dir, source, false);
    engine.run().await.unwrap();

    let content = std::fs::read_to_string(temp_dir.path().join("data.json")).unwrap();
    assert_eq!(content, r#"{"a":{"b":["1","2"]}}"#);
}

#[tokio::test]
async fn test_conversion_is_idempotent() {
    let temp_dir = TempDir::new().unwrap();
    let source = write_source(
        &temp_dir,
        "input.xml",
        r#"<config env="prod"><host>db1</host><host>db2</host><port>5432</port></config>"#,
    );

    let engine = engine_for(&temp_dir, source, false);

    engine.run().await.unwrap();
    let first = std::fs::read(temp_dir.path().join("data.json")).unwrap();

    engine.run().await.unwrap();
    let second = std::fs::read(temp_dir.path().join("data.json")).unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_pretty_output_is_valid_json() {
    let temp_dir = TempDir::new().unwrap();
    let source = write_source(&temp_dir, "input.xml", "<a><b>1</b></a>");

    let engine = engine_for(&temp_dir, source, true);
    engine.run().await.unwrap();

    let content = std::fs::read_to_string(temp_dir.path().join("data.json")).unwrap();
    assert!(content.contains('\n'));

    let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(parsed, serde_json::json!({"a": {"b": "1"}}));
}

#[tokio::test]
async fn test_missing_source_creates_no_output() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir
        .path()
        .join("does-not-exist.xml")
        .to_str()
        .unwrap()
        .to_string();

    let engine = engine_for(&temp_dir, source, false);
    let result = engine.run().await;

    assert!(result.is_err());
    assert!(!temp_dir.path().join("data.json").exists());
}

#[tokio::test]
async fn test_malformed_source_leaves_existing_output_untouched() {
    let temp_dir = TempDir::new().unwrap();
    let source = write_source(&temp_dir, "broken.xml", "<a><b></a>");

    // Pre-existing output from an earlier run
    let output_path = temp_dir.path().join("data.json");
    std::fs::write(&output_path, r#"{"previous":"run"}"#).unwrap();

    let engine = engine_for(&temp_dir, source, false);
    let result = engine.run().await;

    assert!(result.is_err());
    let content = std::fs::read_to_string(&output_path).unwrap();
    assert_eq!(content, r#"{"previous":"run"}"#);
}

#[tokio::test]
async fn test_overwrites_previous_output() {
    let temp_dir = TempDir::new().unwrap();

    let first_source = write_source(&temp_dir, "first.xml", "<a>1</a>");
    engine_for(&temp_dir, first_source, false).run().await.unwrap();

    let second_source = write_source(&temp_dir, "second.xml", "<b>2</b>");
    engine_for(&temp_dir, second_source, false).run().await.unwrap();

    let content = std::fs::read_to_string(temp_dir.path().join("data.json")).unwrap();
    assert_eq!(content, r#"{"b":"2"}"#);
}
