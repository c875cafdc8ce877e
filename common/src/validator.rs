//! レコード検証モジュール
//!
//! 必須フィールドと日付範囲をチェックし、不正なレコードは黙って除外する。
//! 除外件数は集計ログ用に返すだけで、利用者には通知しない。

use crate::dates::parse_source_date;
use crate::types::{scalar_to_string, Dataset, EventRecord, RawEvent};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 有効な日付範囲（両端を含む）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl Default for ValidRange {
    fn default() -> Self {
        Self::year_1849()
    }
}

impl ValidRange {
    /// 1849年全体
    pub fn year_1849() -> Self {
        Self {
            from: NaiveDate::from_ymd_opt(1849, 1, 1).unwrap_or_default(),
            to: NaiveDate::from_ymd_opt(1849, 12, 31).unwrap_or_default(),
        }
    }

    /// 日記の記載期間（1849-01-07 〜 1849-09-09）
    pub fn diary_period() -> Self {
        Self {
            from: NaiveDate::from_ymd_opt(1849, 1, 7).unwrap_or_default(),
            to: NaiveDate::from_ymd_opt(1849, 9, 9).unwrap_or_default(),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }
}

/// 検証結果
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub events: Vec<EventRecord>,
    /// 除外したレコード数
    pub dropped: usize,
}

impl ValidationReport {
    pub fn into_dataset(self) -> Dataset {
        Dataset::new(self.events)
    }
}

/// 未検証レコードを検証してイベント列に変換
pub fn validate(raw_events: &[RawEvent], range: &ValidRange) -> ValidationReport {
    let mut events = Vec::with_capacity(raw_events.len());
    let mut dropped = 0;

    for raw in raw_events {
        match to_record(raw, range, events.len()) {
            Some(record) => events.push(record),
            None => dropped += 1,
        }
    }

    ValidationReport { events, dropped }
}

/// JSON値の配列を検証
///
/// オブジェクトでない要素と、必須項目が文字列でない要素は除外対象。
/// 任意項目の型違いではレコードを落とさない。
pub fn validate_values(values: Vec<Value>, range: &ValidRange) -> ValidationReport {
    let total = values.len();
    let raw_events: Vec<RawEvent> = values
        .into_iter()
        .filter_map(|v| serde_json::from_value(v).ok())
        .collect();
    let undecodable = total - raw_events.len();

    let mut report = validate(&raw_events, range);
    report.dropped += undecodable;
    report
}

fn to_record(raw: &RawEvent, range: &ValidRange, index: usize) -> Option<EventRecord> {
    let source_date = non_empty(&raw.source_date)?;
    let event_name = non_empty(&raw.event_name)?;
    let description = non_empty(&raw.description)?;

    let date = parse_source_date(source_date)?;
    if !range.contains(date) {
        return None;
    }

    let entry_id = raw.entry_id.clone().unwrap_or_default();
    Some(EventRecord {
        unique_id: format!("{}_{}", entry_id, index),
        entry_id,
        source_date: date,
        event_id: raw.event_id.clone().unwrap_or_default(),
        event_name: event_name.to_string(),
        description: description.to_string(),
        location_normalized: raw.location_normalized.clone().filter(|s| !s.is_empty()),
        information_source_type: raw.information_source_type.clone().filter(|s| !s.is_empty()),
        confidence: raw.confidence.as_deref().and_then(|c| c.parse().ok()),
        keywords: normalize_keywords(raw.keywords.as_ref()),
        text_fragment: raw.text_fragment.clone().filter(|s| !s.is_empty()),
        brief_context: raw.brief_context.clone().filter(|s| !s.is_empty()),
        event_subtype_custom: raw.event_subtype_custom.clone().filter(|s| !s.is_empty()),
    })
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// keywords を文字列配列に正規化（配列でなければ空）
fn normalize_keywords(value: Option<&Value>) -> Vec<String> {
    let Some(Value::Array(items)) = value else {
        return Vec::new();
    };

    items.iter().filter_map(scalar_to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Confidence;
    use serde_json::json;

    fn raw(date: &str, name: &str, description: &str) -> RawEvent {
        RawEvent {
            source_date: Some(date.to_string()),
            event_name: Some(name.to_string()),
            description: Some(description.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_required_fields_dropped() {
        let events = vec![
            raw("1849-03-01", "A", "d"),
            RawEvent { source_date: None, ..raw("", "B", "d") },
            raw("1849-03-01", "", "d"),
            raw("1849-03-01", "C", ""),
        ];

        let report = validate(&events, &ValidRange::default());
        assert_eq!(report.events.len(), 1);
        assert_eq!(report.events[0].event_name, "A");
        assert_eq!(report.dropped, 3);
    }

    #[test]
    fn test_out_of_range_dropped() {
        let events = vec![
            raw("1848-12-31", "before", "d"),
            raw("1849-01-01", "first", "d"),
            raw("1849-12-31", "last", "d"),
            raw("1850-01-01", "after", "d"),
            raw("not a date", "broken", "d"),
        ];

        let report = validate(&events, &ValidRange::default());
        let names: Vec<&str> = report.events.iter().map(|e| e.event_name.as_str()).collect();
        assert_eq!(names, vec!["first", "last"]);
        assert_eq!(report.dropped, 3);
    }

    #[test]
    fn test_diary_period_range() {
        let range = ValidRange::diary_period();
        let events = vec![raw("1849-01-06", "early", "d"), raw("1849-09-09", "edge", "d")];

        let report = validate(&events, &range);
        assert_eq!(report.events.len(), 1);
        assert_eq!(report.events[0].event_name, "edge");
    }

    #[test]
    fn test_keywords_normalized() {
        let mut not_array = raw("1849-03-01", "A", "d");
        not_array.keywords = Some(json!("революция"));
        let mut mixed = raw("1849-03-01", "B", "d");
        mixed.keywords = Some(json!(["Венгрия", 1849, null, {"x": 1}]));

        let report = validate(&[not_array, mixed], &ValidRange::default());
        assert!(report.events[0].keywords.is_empty());
        assert_eq!(report.events[1].keywords, vec!["Венгрия", "1849"]);
    }

    #[test]
    fn test_unique_id_uses_validated_index() {
        let mut first = raw("1849-03-01", "A", "d");
        first.entry_id = Some("entry7".to_string());
        let dropped = raw("1700-01-01", "X", "d");
        let mut second = raw("1849-03-02", "B", "d");
        second.entry_id = Some("entry8".to_string());

        let report = validate(&[first, dropped, second], &ValidRange::default());
        assert_eq!(report.events[0].unique_id, "entry7_0");
        assert_eq!(report.events[1].unique_id, "entry8_1");
    }

    #[test]
    fn test_unknown_confidence_treated_as_absent() {
        let mut event = raw("1849-03-01", "A", "d");
        event.confidence = Some("Certain".to_string());
        let mut high = raw("1849-03-01", "B", "d");
        high.confidence = Some("High".to_string());

        let report = validate(&[event, high], &ValidRange::default());
        assert_eq!(report.events[0].confidence, None);
        assert_eq!(report.events[1].confidence, Some(Confidence::High));
    }

    #[test]
    fn test_validate_values_drops_undecodable() {
        let values = vec![
            json!({"source_date": "1849-03-01", "event_name": "A", "description": "d"}),
            json!({"source_date": "1849-03-01", "event_name": 5, "description": "d"}),
            json!("not an object"),
        ];

        let report = validate_values(values, &ValidRange::default());
        assert_eq!(report.events.len(), 1);
        assert_eq!(report.dropped, 2);
    }

    #[test]
    fn test_validate_values_keeps_records_with_odd_optional_types() {
        let values = vec![
            json!({"entry_id": 17, "source_date": "1849-03-01", "event_name": "A", "description": "d"}),
            json!({
                "entry_id": "e2",
                "source_date": "1849-03-02",
                "event_name": "B",
                "description": "d",
                "location_normalized": 5,
                "text_fragment": ["не строка"]
            }),
        ];

        let report = validate_values(values, &ValidRange::default());
        assert_eq!(report.dropped, 0);
        assert_eq!(report.events.len(), 2);
        assert_eq!(report.events[0].unique_id, "17_0");
        assert_eq!(report.events[1].location(), "5");
        assert_eq!(report.events[1].text_fragment, None);
    }
}
