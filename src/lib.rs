//! Diary Dashboard
//!
//! 1849年の日記イベントを読み込み、絞り込み・集計してCLIに表示する

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod loader;
pub mod render;
