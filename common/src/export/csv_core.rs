//! CSV生成（共通ライブラリ）
//!
//! 絞り込み結果をCSVに変換する。Excelで開けるようにBOM付きUTF-8。

use crate::error::{Error, Result};
use crate::labels::NOT_SPECIFIED;
use crate::types::EventRecord;

/// UTF-8 BOM
pub const BOM: &str = "\u{FEFF}";

/// 列見出し
pub const CSV_HEADERS: [&str; 7] = [
    "Дата",
    "Событие",
    "Локация",
    "Источник",
    "Достоверность",
    "Описание",
    "Фрагмент текста",
];

/// ダブルクォートで囲み、内部の `"` を二重化
fn quoted(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

fn csv_row(event: &EventRecord) -> String {
    let location = if event.location().is_empty() {
        NOT_SPECIFIED
    } else {
        event.location()
    };

    [
        event.source_date.format("%Y-%m-%d").to_string(),
        quoted(&event.event_name),
        quoted(location),
        quoted(event.source_type()),
        event.confidence_str().to_string(),
        quoted(&event.description),
        quoted(event.text_fragment()),
    ]
    .join(",")
}

/// CSV本文（BOMなし）
///
/// 対象が空なら `Error::NothingToExport`。
pub fn to_csv(records: &[EventRecord]) -> Result<String> {
    if records.is_empty() {
        return Err(Error::NothingToExport);
    }

    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(CSV_HEADERS.join(","));
    lines.extend(records.iter().map(csv_row));
    Ok(lines.join("\n"))
}

/// BOM付きのCSVバイト列
pub fn to_csv_bytes(records: &[EventRecord]) -> Result<Vec<u8>> {
    let body = to_csv(records)?;
    let mut bytes = Vec::with_capacity(BOM.len() + body.len());
    bytes.extend_from_slice(BOM.as_bytes());
    bytes.extend_from_slice(body.as_bytes());
    Ok(bytes)
}

/// 出力ファイル名（`historical_diary_data_YYYY-MM-DD.csv`）
pub fn export_file_name(date: chrono::NaiveDate) -> String {
    format!("historical_diary_data_{}.csv", date.format("%Y-%m-%d"))
}
