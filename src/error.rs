use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("データ読み込みエラー: {0}")]
    Load(String),

    #[error("HTTPエラー: {status} ({url})")]
    HttpStatus { status: u16, url: String },

    #[error("HTTP通信エラー: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("イベントが見つかりません: {0}")]
    EventNotFound(String),

    #[error("エクスポートするデータがありません")]
    NothingToExport,

    #[error(transparent)]
    Common(diary_dashboard_common::Error),
}

impl From<diary_dashboard_common::Error> for DashboardError {
    fn from(err: diary_dashboard_common::Error) -> Self {
        match err {
            diary_dashboard_common::Error::NothingToExport => DashboardError::NothingToExport,
            other => DashboardError::Common(other),
        }
    }
}

impl DashboardError {
    /// セッションを終了させる読み込み失敗か
    pub fn is_load_failure(&self) -> bool {
        matches!(
            self,
            DashboardError::Load(_)
                | DashboardError::HttpStatus { .. }
                | DashboardError::Http(_)
                | DashboardError::JsonParse(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;
