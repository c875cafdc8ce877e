//! 集計モジュール
//!
//! 任意のキーでグループ化して件数を数える。キーの順序は初出順。
//! 表示用の並べ替え（件数順・名前順）は呼び出し側で行う。

use crate::dates::{week_label, week_start};
use crate::labels::LabelConfig;
use crate::types::EventRecord;
use chrono::{Duration, NaiveDate};
use serde::Serialize;
use std::collections::HashMap;

/// 初出順を保つ ラベル→件数 の対応
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountMap {
    entries: Vec<(String, usize)>,
    index: HashMap<String, usize>,
}

impl CountMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// キーの件数を1増やす
    pub fn increment(&mut self, key: &str) {
        match self.index.get(key) {
            Some(&i) => self.entries[i].1 += 1,
            None => {
                self.index.insert(key.to_string(), self.entries.len());
                self.entries.push((key.to_string(), 1));
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<usize> {
        self.index.get(key).map(|&i| self.entries[i].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 全件数の合計
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    /// 初出順に列挙
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(key, count)| (key.as_str(), *count))
    }

    /// 件数の多い順に上位n件（同数は初出順）
    pub fn top_n(&self, n: usize) -> Vec<(String, usize)> {
        let mut sorted = self.entries.clone();
        sorted.sort_by(|a, b| b.1.cmp(&a.1));
        sorted.truncate(n);
        sorted
    }

    pub fn into_entries(self) -> Vec<(String, usize)> {
        self.entries
    }
}

/// 週ごとの件数
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekBucket {
    /// 週の開始日（月曜）
    pub week_start: NaiveDate,
    /// `dd.mm–dd.mm`
    pub label: String,
    pub count: usize,
}

/// キー関数でグループ化して数える
///
/// 空のキーは `fallback` に集計する（捨てない）。
pub fn group_and_count<F>(records: &[EventRecord], fallback: &str, key_fn: F) -> CountMap
where
    F: Fn(&EventRecord) -> String,
{
    let mut counts = CountMap::new();
    for record in records {
        let key = key_fn(record);
        if key.is_empty() {
            counts.increment(fallback);
        } else {
            counts.increment(&key);
        }
    }
    counts
}

/// カテゴリ別件数（表示名で集計）
pub fn category_counts(records: &[EventRecord], labels: &LabelConfig) -> CountMap {
    group_and_count(records, &labels.not_specified, |r| {
        r.category_prefix()
            .map(|prefix| labels.category_name(&prefix))
            .unwrap_or_default()
    })
}

/// 場所別件数（場所が空のレコードは数えない）
pub fn location_counts(records: &[EventRecord]) -> CountMap {
    let mut counts = CountMap::new();
    for record in records {
        if !record.location().is_empty() {
            counts.increment(record.location());
        }
    }
    counts
}

/// 情報源種別の件数（短縮名で集計）
pub fn source_counts(records: &[EventRecord], labels: &LabelConfig) -> CountMap {
    group_and_count(records, &labels.not_specified, |r| {
        if r.source_type().is_empty() {
            String::new()
        } else {
            labels.short_source(r.source_type())
        }
    })
}

/// 信頼度別件数（表示名で集計）
pub fn confidence_counts(records: &[EventRecord], labels: &LabelConfig) -> CountMap {
    group_and_count(records, &labels.not_specified, |r| {
        r.confidence
            .map(|c| labels.confidence_label(c))
            .unwrap_or_default()
    })
}

/// キーワード別件数（1レコードが複数キーに寄与する）
pub fn keyword_counts(records: &[EventRecord]) -> CountMap {
    let mut counts = CountMap::new();
    for record in records {
        for keyword in &record.keywords {
            counts.increment(keyword);
        }
    }
    counts
}

/// 週単位のタイムライン
///
/// `range` は全データセットの日付範囲。範囲内のすべての週を出力し、
/// 該当レコードがない週は0件とする。
pub fn weekly_timeline(
    records: &[EventRecord],
    range: Option<(NaiveDate, NaiveDate)>,
) -> Vec<WeekBucket> {
    let Some((min, max)) = range else {
        return Vec::new();
    };

    let mut by_week: HashMap<NaiveDate, usize> = HashMap::new();
    for record in records {
        *by_week.entry(week_start(record.source_date)).or_insert(0) += 1;
    }

    let last = week_start(max);
    let mut current = week_start(min);
    let mut buckets = Vec::new();
    while current <= last {
        buckets.push(WeekBucket {
            week_start: current,
            label: week_label(current),
            count: by_week.get(&current).copied().unwrap_or(0),
        });
        current += Duration::days(7);
    }
    buckets
}
