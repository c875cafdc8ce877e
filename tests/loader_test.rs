//! データ読み込みテスト
//!
//! ファイルからの読み込みとJSON形状の扱いを検証

use diary_dashboard::error::DashboardError;
use diary_dashboard::loader::{is_remote, load_dataset, parse_document};
use diary_dashboard_common::ValidRange;
use tempfile::tempdir;

const EVENTS_JSON: &str = r#"{
  "events": [
    {
      "entry_id": "e1",
      "source_date": "1849-03-01",
      "event_id": "REV1848_HUNGARY",
      "event_name": "Венгерская война",
      "description": "Описание",
      "location_normalized": "Вена",
      "confidence": "High",
      "keywords": ["война", 1849, null]
    },
    {
      "entry_id": "e2",
      "source_date": "1849-03-05",
      "event_id": "RU_INTERVENTION",
      "event_name": "Интервенция",
      "description": "Описание"
    },
    {
      "entry_id": "e3",
      "source_date": "1851-01-01",
      "event_name": "Вне периода",
      "description": "Описание"
    },
    {
      "entry_id": "e4",
      "source_date": "1849-04-01",
      "event_name": "Без описания"
    },
    "not an object"
  ]
}"#;

#[test]
fn test_is_remote() {
    assert!(is_remote("https://example.org/data.json"));
    assert!(is_remote("http://localhost:8000/data.json"));
    assert!(!is_remote("dashboard_data.json"));
    assert!(!is_remote("/tmp/data.json"));
}

#[tokio::test]
async fn test_load_from_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("dashboard_data.json");
    std::fs::write(&path, EVENTS_JSON).unwrap();

    let dataset = load_dataset(path.to_str().unwrap(), &ValidRange::year_1849())
        .await
        .unwrap();

    assert_eq!(dataset.len(), 2);
    assert_eq!(dataset.events()[0].unique_id, "e1_0");
    assert_eq!(dataset.events()[1].unique_id, "e2_1");
    assert_eq!(dataset.events()[0].keywords, vec!["война", "1849"]);
}

#[test]
fn test_dropped_records_are_counted() {
    let report = parse_document(EVENTS_JSON, &ValidRange::year_1849()).unwrap();
    assert_eq!(report.events.len(), 2);
    assert_eq!(report.dropped, 3);
}

#[test]
fn test_bare_array_document() {
    let json = r#"[{ "entry_id": "a", "source_date": "1849-05-01", "event_name": "n", "description": "d" }]"#;
    let report = parse_document(json, &ValidRange::year_1849()).unwrap();
    assert_eq!(report.events.len(), 1);
}

#[test]
fn test_object_without_events_is_empty() {
    let report = parse_document(r#"{ "meta": {} }"#, &ValidRange::year_1849()).unwrap();
    assert!(report.events.is_empty());

    let report = parse_document(r#"{ "events": "oops" }"#, &ValidRange::year_1849()).unwrap();
    assert!(report.events.is_empty());
}

#[test]
fn test_scalar_document_is_load_error() {
    let result = parse_document("42", &ValidRange::year_1849());
    assert!(matches!(result, Err(DashboardError::Load(_))));
}

#[test]
fn test_malformed_json() {
    let result = parse_document("{ \"events\": [", &ValidRange::year_1849());
    assert!(matches!(result, Err(DashboardError::JsonParse(_))));
}

#[tokio::test]
async fn test_missing_file() {
    let result = load_dataset("/nonexistent/path/12345/data.json", &ValidRange::year_1849()).await;
    let err = result.unwrap_err();
    assert!(matches!(err, DashboardError::Load(_)));
    assert!(err.is_load_failure());
}
