//! データ読み込みモジュール
//!
//! URL（http/https）またはローカルパスからJSONを1回だけ取得し、
//! 検証済みのデータセットを作る。失敗はセッション全体のエラーとして返す。

use crate::error::{DashboardError, Result};
use diary_dashboard_common::{validate_values, Dataset, ValidRange, ValidationReport};
use serde_json::Value;
use tracing::{debug, info};

/// URLかどうか
pub fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// JSON文書を取得
pub async fn fetch_document(source: &str) -> Result<String> {
    if is_remote(source) {
        debug!(url = source, "fetching dataset over HTTP");
        let response = reqwest::get(source).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(DashboardError::HttpStatus {
                status: status.as_u16(),
                url: source.to_string(),
            });
        }
        Ok(response.text().await?)
    } else {
        debug!(path = source, "reading dataset from file");
        tokio::fs::read_to_string(source)
            .await
            .map_err(|e| DashboardError::Load(format!("{}: {}", source, e)))
    }
}

/// `{ "events": [...] }` または配列から要素を取り出す
///
/// `events` が配列でないオブジェクトは空として扱う。
fn extract_events(document: Value) -> Result<Vec<Value>> {
    match document {
        Value::Array(items) => Ok(items),
        Value::Object(mut map) => match map.remove("events") {
            Some(Value::Array(items)) => Ok(items),
            _ => Ok(Vec::new()),
        },
        other => Err(DashboardError::Load(format!(
            "JSONの形式が不正です（オブジェクトか配列が必要）: {}",
            value_kind(&other)
        ))),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// JSON文字列を解析して検証
pub fn parse_document(text: &str, range: &ValidRange) -> Result<ValidationReport> {
    let document: Value = serde_json::from_str(text)?;
    let raw_events = extract_events(document)?;
    Ok(validate_values(raw_events, range))
}

/// データセットを読み込む
pub async fn load_dataset(source: &str, range: &ValidRange) -> Result<Dataset> {
    let text = fetch_document(source).await?;
    let report = parse_document(&text, range)?;

    info!(
        loaded = report.events.len(),
        dropped = report.dropped,
        "dataset validated"
    );

    Ok(report.into_dataset())
}
