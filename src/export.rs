//! CSVエクスポート（CLI版）
//!
//! 絞り込み結果を `historical_diary_data_YYYY-MM-DD.csv` として書き出す。

use crate::error::Result;
use chrono::NaiveDate;
use diary_dashboard_common::export::csv_core::{export_file_name, to_csv_bytes};
use diary_dashboard_common::EventRecord;
use std::path::{Path, PathBuf};

/// 出力先がディレクトリならファイル名を付ける
fn output_path(output: &Path, date: NaiveDate) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(export_file_name(date))
    } else {
        output.to_path_buf()
    }
}

/// CSVを書き出して出力パスを返す
///
/// 対象が空ならファイルを作らず `NothingToExport` を返す。
pub fn export_csv(records: &[EventRecord], output: &Path, date: NaiveDate) -> Result<PathBuf> {
    let bytes = to_csv_bytes(records)?;

    let path = output_path(output, date);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(&path, bytes)?;

    tracing::info!(path = %path.display(), rows = records.len(), "csv exported");
    Ok(path)
}

/// 今日の日付（ファイル名用）
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
