//! Diary Dashboard Common Library
//!
//! 日記イベントデータセットの検証・絞り込み・集計・並べ替えと、
//! 描画層に渡すビューモデルの組み立て（CLIと他のフロントエンドで共有）

pub mod types;
pub mod dates;
pub mod labels;
pub mod error;
pub mod validator;
pub mod filter;
pub mod aggregate;
pub mod collate;
pub mod sort;
pub mod view;
pub mod export;

pub use types::{Confidence, Dataset, EventRecord, RawEvent};
pub use labels::{LabelConfig, LabelOverrides, NOT_SPECIFIED};
pub use error::{Error, Result};
pub use validator::{validate, validate_values, ValidRange, ValidationReport};
pub use filter::{apply_filters, FilterState, FilterTag};
pub use aggregate::{group_and_count, weekly_timeline, CountMap, WeekBucket};
pub use sort::{sort_records, SortColumn, SortDirection, SortState};
pub use view::{event_detail, filter_options, project, DashboardView, ViewOptions};
