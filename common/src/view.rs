//! ビュー組み立てモジュール
//!
//! データセット・フィルタ・並べ替え状態から、描画層が受け取る
//! ビューモデル一式を組み立てる。独自のアルゴリズムは持たず、
//! filter / aggregate / sort の結果を整形するだけ。

use crate::aggregate::{
    category_counts, confidence_counts, keyword_counts, location_counts, source_counts,
    weekly_timeline, CountMap, WeekBucket,
};
use crate::collate;
use crate::dates::{format_day_month_short, format_long, format_numeric, month_key, month_label};
use crate::filter::{apply_filters, FilterState, FilterTag};
use crate::labels::{LabelConfig, NO_DATA};
use crate::sort::{sort_records, SortState};
use crate::types::{Confidence, Dataset, EventRecord};
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// ビューの表示パラメータ
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewOptions {
    /// 場所チャートの件数
    pub location_top_n: usize,
    /// キーワードクラウドの語数
    pub keyword_top_n: usize,
    pub keyword_min_px: f64,
    pub keyword_max_px: f64,
    /// 作者の知覚を表す event_id 接頭辞
    pub perception_prefix: String,
    /// 感情を表す語（部分一致、大文字小文字無視）
    pub emotion_keywords: Vec<String>,
    /// 引用の最大文字数
    pub quote_max_chars: usize,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            location_top_n: 10,
            keyword_top_n: 40,
            keyword_min_px: 12.0,
            keyword_max_px: 24.0,
            perception_prefix: "AUTHOR_PERCEPTION_".into(),
            emotion_keywords: [
                "страх", "тревог", "надежд", "радост", "печал", "гнев",
                "отчаян", "восторг", "беспокой", "ужас",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            quote_max_chars: 120,
        }
    }
}

/// 統計サマリ
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total: usize,
    pub filtered: usize,
    /// `01.01.1849 - 31.12.1849`（データが空なら None）
    pub date_range: Option<String>,
}

/// チャートの1系列要素
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: usize,
}

impl From<(String, usize)> for ChartPoint {
    fn from((label, value): (String, usize)) -> Self {
        Self { label, value }
    }
}

/// チャート用系列一式
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Charts {
    pub timeline: Vec<WeekBucket>,
    pub category: Vec<ChartPoint>,
    pub location: Vec<ChartPoint>,
    pub source: Vec<ChartPoint>,
    pub confidence: Vec<ChartPoint>,
}

/// 表の1行
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRow {
    pub unique_id: String,
    /// `01.03.1849`
    pub date: String,
    pub event_name: String,
    /// 空なら `Не указано`
    pub location: String,
    /// 情報源種別（ツールチップ用の正式名）
    pub source_type: String,
    pub source_short: String,
    /// 信頼度バッジの表示名
    pub confidence_label: String,
    /// `high` / `medium` / `low`（無ければ空）
    pub confidence_level: String,
    pub description: String,
}

/// キーワードクラウドの1語
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordCloudEntry {
    pub word: String,
    pub count: usize,
    /// フォントサイズ（px）
    pub size_px: f64,
    /// 0.0（最小）〜 1.0（最大）
    pub relative_size: f64,
}

/// 感情クロノロジーの1項目
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChronologyItem {
    pub unique_id: String,
    /// `1 мар.`
    pub date: String,
    /// サブタイプ（無ければイベント名）
    pub kind: String,
    /// 切り詰めた引用（断片が無ければ空）
    pub quote: String,
}

/// ダッシュボード全体のビュー
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub stats: Stats,
    pub charts: Charts,
    pub table: Vec<TableRow>,
    pub keyword_cloud: Vec<KeywordCloudEntry>,
    pub chronology: Vec<ChronologyItem>,
    pub active_filters: Vec<FilterTag>,
}

/// フィルタ選択肢
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOption {
    pub value: String,
    pub label: String,
}

/// フィルタごとの選択肢一覧
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub months: Vec<FilterOption>,
    pub categories: Vec<FilterOption>,
    pub locations: Vec<FilterOption>,
    pub sources: Vec<FilterOption>,
    pub confidence: Vec<FilterOption>,
}

/// イベント詳細（モーダル表示用）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDetail {
    pub unique_id: String,
    pub title: String,
    /// `1 марта 1849 г.`
    pub date: String,
    pub description: String,
    pub text_fragment: String,
    pub location: String,
    pub source_type: String,
    pub brief_context: String,
    pub keywords: Vec<String>,
}

/// 全ビューを組み立てる
pub fn project(
    dataset: &Dataset,
    filters: &FilterState,
    sort: &SortState,
    labels: &LabelConfig,
    options: &ViewOptions,
) -> DashboardView {
    let filtered = apply_filters(dataset.events(), filters);

    DashboardView {
        stats: stats(dataset, filtered.len()),
        charts: charts(dataset, &filtered, labels, options),
        table: table_rows(&filtered, sort, labels),
        keyword_cloud: keyword_cloud(&filtered, options),
        chronology: emotion_chronology(&filtered, options),
        active_filters: filters.active_tags(labels),
    }
}

pub fn stats(dataset: &Dataset, filtered: usize) -> Stats {
    Stats {
        total: dataset.len(),
        filtered,
        date_range: dataset
            .date_range()
            .map(|(start, end)| format!("{} - {}", format_numeric(start), format_numeric(end))),
    }
}

fn to_points(entries: Vec<(String, usize)>) -> Vec<ChartPoint> {
    entries.into_iter().map(ChartPoint::from).collect()
}

fn counts_to_points(counts: CountMap) -> Vec<ChartPoint> {
    to_points(counts.into_entries())
}

/// チャート系列（タイムラインは全データセットの期間で週を埋める）
pub fn charts(
    dataset: &Dataset,
    filtered: &[EventRecord],
    labels: &LabelConfig,
    options: &ViewOptions,
) -> Charts {
    Charts {
        timeline: weekly_timeline(filtered, dataset.date_range()),
        category: counts_to_points(category_counts(filtered, labels)),
        location: to_points(location_counts(filtered).top_n(options.location_top_n)),
        source: counts_to_points(source_counts(filtered, labels)),
        confidence: counts_to_points(confidence_counts(filtered, labels)),
    }
}

/// 並べ替え済みの表の行
pub fn table_rows(filtered: &[EventRecord], sort: &SortState, labels: &LabelConfig) -> Vec<TableRow> {
    sort_records(filtered, sort)
        .into_iter()
        .map(|event| TableRow {
            date: format_numeric(event.source_date),
            location: or_label(event.location(), &labels.not_specified),
            source_short: labels.short_source(event.source_type()),
            source_type: event.source_type().to_string(),
            confidence_label: event
                .confidence
                .map(|c| labels.confidence_label(c))
                .unwrap_or_default(),
            confidence_level: event
                .confidence
                .map(|c| c.level().to_string())
                .unwrap_or_default(),
            unique_id: event.unique_id,
            event_name: event.event_name,
            description: event.description,
        })
        .collect()
}

/// キーワードクラウド
///
/// 件数上位 `keyword_top_n` 語を名前順に並べる。文字サイズは全キーワードの
/// 最小件数〜最大件数で線形補間する（最小 == 最大なら最小サイズ）。
pub fn keyword_cloud(filtered: &[EventRecord], options: &ViewOptions) -> Vec<KeywordCloudEntry> {
    let counts = keyword_counts(filtered);
    if counts.is_empty() {
        return Vec::new();
    }

    let min_count = counts.iter().map(|(_, c)| c).min().unwrap_or(0);
    let max_count = counts.iter().map(|(_, c)| c).max().unwrap_or(0);

    let mut top = counts.top_n(options.keyword_top_n);
    top.sort_by(|a, b| collate::compare(&a.0, &b.0));

    top.into_iter()
        .map(|(word, count)| {
            let relative_size = if max_count == min_count {
                0.0
            } else {
                (count - min_count) as f64 / (max_count - min_count) as f64
            };
            KeywordCloudEntry {
                word,
                count,
                size_px: options.keyword_min_px
                    + relative_size * (options.keyword_max_px - options.keyword_min_px),
                relative_size,
            }
        })
        .collect()
}

/// 感情語の判定用正規表現（語が無ければ None）
fn emotion_regex(keywords: &[String]) -> Option<Regex> {
    let alternatives: Vec<String> = keywords
        .iter()
        .filter(|k| !k.trim().is_empty())
        .map(|k| regex::escape(k.trim()))
        .collect();
    if alternatives.is_empty() {
        return None;
    }
    RegexBuilder::new(&alternatives.join("|"))
        .case_insensitive(true)
        .build()
        .ok()
}

/// 作者の知覚・感情に関する記録の時系列
pub fn emotion_chronology(filtered: &[EventRecord], options: &ViewOptions) -> Vec<ChronologyItem> {
    let matcher = emotion_regex(&options.emotion_keywords);
    let is_emotional = |event: &&EventRecord| {
        if !options.perception_prefix.is_empty()
            && event.event_id.starts_with(&options.perception_prefix)
        {
            return true;
        }
        matcher.as_ref().is_some_and(|re| {
            event
                .event_subtype_custom
                .as_deref()
                .is_some_and(|s| re.is_match(s))
                || re.is_match(event.text_fragment())
        })
    };

    let mut selected: Vec<&EventRecord> = filtered.iter().filter(|e| is_emotional(e)).collect();
    selected.sort_by_key(|e| e.source_date);

    selected
        .into_iter()
        .map(|event| ChronologyItem {
            unique_id: event.unique_id.clone(),
            date: format_day_month_short(event.source_date),
            kind: event
                .event_subtype_custom
                .clone()
                .unwrap_or_else(|| event.event_name.clone()),
            quote: quote(event.text_fragment(), options.quote_max_chars),
        })
        .collect()
}

/// 引用を文字数で切り詰める
fn quote(fragment: &str, max_chars: usize) -> String {
    if fragment.is_empty() {
        return String::new();
    }
    let truncated: String = fragment.chars().take(max_chars).collect();
    format!("\"{}...\"", truncated)
}

fn or_label(value: &str, label: &str) -> String {
    if value.is_empty() {
        label.to_string()
    } else {
        value.to_string()
    }
}

/// フィルタ選択肢（ベースデータセットから生成）
pub fn filter_options(dataset: &Dataset, labels: &LabelConfig) -> FilterOptions {
    let events = dataset.events();

    let months: BTreeSet<String> = events.iter().map(|e| month_key(e.source_date)).collect();
    let categories: BTreeSet<String> = events.iter().filter_map(|e| e.category_prefix()).collect();

    FilterOptions {
        months: months
            .into_iter()
            .map(|key| FilterOption { label: month_label(&key), value: key })
            .collect(),
        categories: categories
            .into_iter()
            .map(|prefix| FilterOption { label: labels.category_option_name(&prefix), value: prefix })
            .collect(),
        locations: distinct_sorted(events.iter().map(|e| e.location())),
        sources: distinct_sorted(events.iter().map(|e| e.source_type())),
        confidence: Confidence::ALL
            .iter()
            .map(|c| FilterOption {
                value: c.as_str().to_string(),
                label: labels.confidence_label(*c),
            })
            .collect(),
    }
}

fn distinct_sorted<'a>(values: impl Iterator<Item = &'a str>) -> Vec<FilterOption> {
    let unique: BTreeSet<&str> = values.filter(|v| !v.is_empty()).collect();
    let mut sorted: Vec<&str> = unique.into_iter().collect();
    sorted.sort_by(|a, b| collate::compare(a, b));
    sorted
        .into_iter()
        .map(|v| FilterOption { value: v.to_string(), label: v.to_string() })
        .collect()
}

/// unique_id からイベント詳細を取得
pub fn event_detail(dataset: &Dataset, unique_id: &str, labels: &LabelConfig) -> Option<EventDetail> {
    let event = dataset.find(unique_id)?;
    Some(EventDetail {
        unique_id: event.unique_id.clone(),
        title: event.event_name.clone(),
        date: format_long(event.source_date),
        description: event.description.clone(),
        text_fragment: or_label(event.text_fragment(), NO_DATA),
        location: or_label(event.location(), &labels.not_specified),
        source_type: event.source_type().to_string(),
        brief_context: or_label(event.brief_context.as_deref().unwrap_or(""), NO_DATA),
        keywords: event.keywords.clone(),
    })
}
