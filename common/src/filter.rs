//! フィルタエンジン
//!
//! 各フィルタは独立した述語で、空文字は「制約なし」。
//! すべての述語をANDで結合し、ベースの順序を保ったまま部分集合を返す。

use crate::dates::{month_key, month_label};
use crate::labels::LabelConfig;
use crate::types::{Confidence, EventRecord};
use serde::{Deserialize, Serialize};

/// 現在のフィルタ値
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterState {
    /// `YYYY-MM`
    pub month: String,
    /// カテゴリ接頭辞（末尾の `_` を含む）
    pub category: String,
    pub location: String,
    pub source: String,
    /// `High` / `Medium` / `Low`
    pub confidence: String,
    /// 部分一致検索（大文字小文字を区別しない）
    pub search: String,
    /// `and` で結合したときの追加の検索語（すべて含む必要がある）
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extra_search: Vec<String>,
}

/// 有効なフィルタの表示用タグ
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterTag {
    pub name: String,
    pub value: String,
}

impl FilterState {
    /// すべて未指定か
    pub fn is_empty(&self) -> bool {
        self.fields().iter().all(|(_, value)| value.is_empty()) && self.extra_search.is_empty()
    }

    /// すべてのフィルタを解除
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// 2つのフィルタの論理積
    ///
    /// 同じ項目に両立しない値があり、どのレコードにも一致しえない場合は `None`。
    pub fn and(&self, other: &FilterState) -> Option<FilterState> {
        let mut extra_search = self.extra_search.clone();
        let search = if self.search.is_empty() {
            other.search.clone()
        } else {
            if !other.search.is_empty() && other.search.to_lowercase() != self.search.to_lowercase() {
                extra_search.push(other.search.clone());
            }
            self.search.clone()
        };
        for term in &other.extra_search {
            if !extra_search.contains(term) {
                extra_search.push(term.clone());
            }
        }

        Some(FilterState {
            month: same_value(&self.month, &other.month)?,
            category: longer_prefix(&self.category, &other.category)?,
            location: same_value(&self.location, &other.location)?,
            source: same_value(&self.source, &other.source)?,
            confidence: same_value(&self.confidence, &other.confidence)?,
            search,
            extra_search,
        })
    }

    /// レコードがすべての述語を満たすか
    pub fn matches(&self, event: &EventRecord) -> bool {
        if !self.month.is_empty() && month_key(event.source_date) != self.month {
            return false;
        }
        if !self.category.is_empty() && !event.event_id.starts_with(&self.category) {
            return false;
        }
        if !self.location.is_empty() && event.location() != self.location {
            return false;
        }
        if !self.source.is_empty() && event.source_type() != self.source {
            return false;
        }
        if !self.confidence.is_empty() && event.confidence_str() != self.confidence {
            return false;
        }
        if !self.search.is_empty() || !self.extra_search.is_empty() {
            let haystack = search_text(event);
            let terms = std::iter::once(&self.search).chain(&self.extra_search);
            if !terms
                .filter(|term| !term.is_empty())
                .all(|term| haystack.contains(&term.to_lowercase()))
            {
                return false;
            }
        }
        true
    }

    /// 有効なフィルタのタグ一覧
    pub fn active_tags(&self, labels: &LabelConfig) -> Vec<FilterTag> {
        self.fields()
            .into_iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(key, value)| {
                let display = match key {
                    "month" => month_label(value),
                    "category" => labels.category_option_name(value),
                    "confidence" => value
                        .parse::<Confidence>()
                        .map(|c| labels.confidence_label(c))
                        .unwrap_or_else(|_| value.to_string()),
                    _ => value.to_string(),
                };
                FilterTag {
                    name: filter_name(key).to_string(),
                    value: display,
                }
            })
            .chain(self.extra_search.iter().map(|term| FilterTag {
                name: filter_name("search").to_string(),
                value: term.clone(),
            }))
            .collect()
    }

    fn fields(&self) -> [(&'static str, &str); 6] {
        [
            ("month", self.month.as_str()),
            ("category", self.category.as_str()),
            ("location", self.location.as_str()),
            ("source", self.source.as_str()),
            ("confidence", self.confidence.as_str()),
            ("search", self.search.as_str()),
        ]
    }
}

/// 完全一致の項目の結合（空は制約なし、異なる値は両立しない）
fn same_value(a: &str, b: &str) -> Option<String> {
    if a.is_empty() || a == b {
        Some(b.to_string())
    } else if b.is_empty() {
        Some(a.to_string())
    } else {
        None
    }
}

/// 前方一致の項目の結合（長い方が短い方で始まるときだけ両立）
fn longer_prefix(a: &str, b: &str) -> Option<String> {
    if a.starts_with(b) {
        Some(a.to_string())
    } else if b.starts_with(a) {
        Some(b.to_string())
    } else {
        None
    }
}

fn filter_name(key: &str) -> &'static str {
    match key {
        "month" => "Месяц",
        "category" => "Категория",
        "location" => "Локация",
        "source" => "Источник",
        "confidence" => "Достоверность",
        _ => "Поиск",
    }
}

/// 検索対象の連結文字列（小文字化済み）
fn search_text(event: &EventRecord) -> String {
    let mut parts: Vec<&str> = vec![
        event.event_name.as_str(),
        event.description.as_str(),
        event.location(),
        event.source_type(),
        event.text_fragment(),
    ];
    parts.extend(event.keywords.iter().map(String::as_str));
    parts.join(" ").to_lowercase()
}

/// フィルタを適用
pub fn apply_filters(base: &[EventRecord], filters: &FilterState) -> Vec<EventRecord> {
    base.iter()
        .filter(|event| filters.matches(event))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn event(id: &str, date: &str, name: &str) -> EventRecord {
        EventRecord {
            unique_id: format!("{}_0", id),
            entry_id: String::new(),
            source_date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            event_id: id.to_string(),
            event_name: name.to_string(),
            description: "описание".to_string(),
            location_normalized: None,
            information_source_type: None,
            confidence: None,
            keywords: vec![],
            text_fragment: None,
            brief_context: None,
            event_subtype_custom: None,
        }
    }

    #[test]
    fn test_empty_filter_is_identity() {
        let base = vec![
            event("RU_1", "1849-03-01", "A"),
            event("REV1848_1", "1849-01-01", "B"),
        ];
        assert_eq!(apply_filters(&base, &FilterState::default()), base);
        assert!(FilterState::default().is_empty());
    }

    #[test]
    fn test_month_filter() {
        let base = vec![
            event("RU_1", "1849-03-01", "A"),
            event("RU_2", "1849-04-01", "B"),
        ];
        let filters = FilterState { month: "1849-03".into(), ..Default::default() };
        let result = apply_filters(&base, &filters);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].event_name, "A");
    }

    #[test]
    fn test_category_prefix_filter() {
        let base = vec![
            event("RU_1", "1849-03-01", "A"),
            event("RUS_2", "1849-03-01", "B"),
            event("", "1849-03-01", "C"),
        ];
        let filters = FilterState { category: "RU_".into(), ..Default::default() };
        let result = apply_filters(&base, &filters);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].event_name, "A");
    }

    #[test]
    fn test_confidence_filter_excludes_missing() {
        let mut high = event("RU_1", "1849-03-01", "A");
        high.confidence = Some(Confidence::High);
        let none = event("RU_2", "1849-03-01", "B");

        let filters = FilterState { confidence: "High".into(), ..Default::default() };
        let result = apply_filters(&[high, none], &filters);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].event_name, "A");
    }

    #[test]
    fn test_search_is_case_insensitive_over_fields() {
        let mut with_keyword = event("RU_1", "1849-03-01", "Манифест");
        with_keyword.keywords = vec!["Венгерская кампания".into()];
        let mut with_fragment = event("RU_2", "1849-03-01", "Слух");
        with_fragment.text_fragment = Some("Говорят о ВЕНГРИИ".into());
        let other = event("RU_3", "1849-03-01", "Прочее");

        let filters = FilterState { search: "ВЕНГ".into(), ..Default::default() };
        let result = apply_filters(&[with_keyword, with_fragment, other], &filters);
        let names: Vec<&str> = result.iter().map(|e| e.event_name.as_str()).collect();
        assert_eq!(names, vec!["Манифест", "Слух"]);
    }

    #[test]
    fn test_active_tags() {
        let labels = LabelConfig::default();
        let filters = FilterState {
            month: "1849-03".into(),
            confidence: "Low".into(),
            search: "вена".into(),
            ..Default::default()
        };

        let tags = filters.active_tags(&labels);
        assert_eq!(tags.len(), 3);
        assert_eq!(tags[0], FilterTag { name: "Месяц".into(), value: "Март 1849".into() });
        assert_eq!(tags[1], FilterTag { name: "Достоверность".into(), value: "Низкий".into() });
        assert_eq!(tags[2], FilterTag { name: "Поиск".into(), value: "вена".into() });
    }

    #[test]
    fn test_reset() {
        let mut filters = FilterState { location: "Вена".into(), ..Default::default() };
        filters.reset();
        assert!(filters.is_empty());
    }

    #[test]
    fn test_and_combines_fields() {
        let a = FilterState { month: "1849-03".into(), ..Default::default() };
        let b = FilterState { location: "Вена".into(), ..Default::default() };
        let combined = a.and(&b).expect("両立するはず");
        assert_eq!(combined.month, "1849-03");
        assert_eq!(combined.location, "Вена");
    }

    #[test]
    fn test_and_conflicting_month_matches_nothing() {
        let march = FilterState { month: "1849-03".into(), ..Default::default() };
        let april = FilterState { month: "1849-04".into(), ..Default::default() };
        assert_eq!(march.and(&april), None);
        assert_eq!(march.and(&march), Some(march.clone()));
    }

    #[test]
    fn test_and_category_keeps_narrower_prefix() {
        let broad = FilterState { category: "REV1848_".into(), ..Default::default() };
        let narrow = FilterState { category: "REV1848_HUN".into(), ..Default::default() };
        let other = FilterState { category: "RU_".into(), ..Default::default() };

        assert_eq!(broad.and(&narrow).map(|f| f.category), Some("REV1848_HUN".to_string()));
        assert_eq!(narrow.and(&broad).map(|f| f.category), Some("REV1848_HUN".to_string()));
        assert_eq!(broad.and(&other), None);
    }

    #[test]
    fn test_and_requires_both_search_terms() {
        let mut both = event("RU_1", "1849-03-01", "Вена");
        both.description = "война".into();
        let only_one = event("RU_2", "1849-03-01", "Вена");

        let a = FilterState { search: "вена".into(), ..Default::default() };
        let b = FilterState { search: "ВОЙНА".into(), ..Default::default() };
        let combined = a.and(&b).expect("検索語は常に両立する");

        let base = vec![both, only_one];
        let chained = apply_filters(&apply_filters(&base, &a), &b);
        assert_eq!(apply_filters(&base, &combined), chained);
        assert_eq!(chained.len(), 1);
        assert_eq!(combined.active_tags(&LabelConfig::default()).len(), 2);
    }
}
