//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    /// 絞り込み結果が空でエクスポート対象がない
    #[error("Nothing to export: filtered subset is empty")]
    NothingToExport,
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
