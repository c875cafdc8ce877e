use clap::{Args, Parser, Subcommand};
use diary_dashboard_common::{FilterState, SortColumn, SortDirection, SortState};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "diary-dashboard")]
#[command(about = "1849年日記イベントのダッシュボード", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// データのURLまたはパス（設定を上書き）
    #[arg(short, long, global = true)]
    pub data: Option<String>,

    /// 設定ファイル（省略時: ~/.config/diary-dashboard/config.json）
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

/// 絞り込み条件
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// 月（YYYY-MM）
    #[arg(long)]
    pub month: Option<String>,

    /// カテゴリ接頭辞（例: REV1848_）
    #[arg(long)]
    pub category: Option<String>,

    /// 場所
    #[arg(long)]
    pub location: Option<String>,

    /// 情報源種別
    #[arg(long)]
    pub source: Option<String>,

    /// 信頼度 (High/Medium/Low)
    #[arg(long)]
    pub confidence: Option<String>,

    /// 全文検索（大文字小文字を区別しない）
    #[arg(short, long)]
    pub search: Option<String>,
}

impl FilterArgs {
    pub fn to_filter_state(&self) -> FilterState {
        FilterState {
            month: self.month.clone().unwrap_or_default(),
            category: self.category.clone().unwrap_or_default(),
            location: self.location.clone().unwrap_or_default(),
            source: self.source.clone().unwrap_or_default(),
            confidence: self.confidence.clone().unwrap_or_default(),
            search: self.search.clone().unwrap_or_default(),
            ..Default::default()
        }
    }
}

/// 並べ替え条件
#[derive(Args, Debug, Clone)]
pub struct SortArgs {
    /// 並べ替え列 (date/name/location/source/confidence/description)
    #[arg(long, default_value = "date")]
    pub sort: SortColumn,

    /// 降順
    #[arg(long)]
    pub desc: bool,
}

impl SortArgs {
    pub fn to_sort_state(&self) -> SortState {
        let direction = if self.desc { SortDirection::Desc } else { SortDirection::Asc };
        SortState::new(self.sort, direction)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// 件数と期間を表示
    Summary {
        #[command(flatten)]
        filters: FilterArgs,

        /// JSONで出力
        #[arg(long)]
        json: bool,
    },

    /// 絞り込み結果を表形式で表示
    Table {
        #[command(flatten)]
        filters: FilterArgs,

        #[command(flatten)]
        sort: SortArgs,

        /// 表示する最大行数
        #[arg(short, long)]
        limit: Option<usize>,

        /// JSONで出力
        #[arg(long)]
        json: bool,
    },

    /// チャート用の系列を表示
    Charts {
        #[command(flatten)]
        filters: FilterArgs,

        /// JSONで出力
        #[arg(long)]
        json: bool,
    },

    /// キーワードクラウドを表示
    Keywords {
        #[command(flatten)]
        filters: FilterArgs,

        /// JSONで出力
        #[arg(long)]
        json: bool,
    },

    /// 作者の知覚・感情の時系列を表示
    Chronology {
        #[command(flatten)]
        filters: FilterArgs,

        /// JSONで出力
        #[arg(long)]
        json: bool,
    },

    /// すべてのビューをまとめて出力
    Dashboard {
        #[command(flatten)]
        filters: FilterArgs,

        #[command(flatten)]
        sort: SortArgs,

        /// JSONで出力
        #[arg(long)]
        json: bool,
    },

    /// フィルタの選択肢を表示
    Options {
        /// JSONで出力
        #[arg(long)]
        json: bool,
    },

    /// イベントの詳細を表示
    Detail {
        /// イベントID（表の unique_id）
        #[arg(required = true)]
        id: String,

        /// JSONで出力
        #[arg(long)]
        json: bool,
    },

    /// 絞り込み結果をCSVに出力
    Export {
        #[command(flatten)]
        filters: FilterArgs,

        /// 出力ファイル/ディレクトリ（デフォルト: カレント）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 設定を表示/編集（フラグなしは表示）
    Config {
        /// データのURLまたはパスを設定
        #[arg(long)]
        set_data_source: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

impl Commands {
    /// `config` で設定を表示するか（フラグが何もなければ表示）
    pub fn shows_config(&self) -> bool {
        matches!(
            self,
            Commands::Config { set_data_source, show } if *show || set_data_source.is_none()
        )
    }
}
