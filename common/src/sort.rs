//! 表の並べ替え
//!
//! 日付列は日付値で、それ以外は文字列としてロシア語照合で比較する。
//! 安定ソートなので同値のレコードは入力順を保つ。

use crate::collate;
use crate::types::EventRecord;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// 並べ替え対象の列
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortColumn {
    #[default]
    SourceDate,
    EventName,
    LocationNormalized,
    InformationSourceType,
    Confidence,
    Description,
}

impl SortColumn {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortColumn::SourceDate => "source_date",
            SortColumn::EventName => "event_name",
            SortColumn::LocationNormalized => "location_normalized",
            SortColumn::InformationSourceType => "information_source_type",
            SortColumn::Confidence => "confidence",
            SortColumn::Description => "description",
        }
    }

    /// 列の値を文字列として取得（欠損は空文字）
    fn text<'a>(&self, event: &'a EventRecord) -> &'a str {
        match self {
            SortColumn::SourceDate => "",
            SortColumn::EventName => event.event_name.as_str(),
            SortColumn::LocationNormalized => event.location(),
            SortColumn::InformationSourceType => event.source_type(),
            SortColumn::Confidence => event.confidence_str(),
            SortColumn::Description => event.description.as_str(),
        }
    }
}

impl std::str::FromStr for SortColumn {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "source_date" | "date" => Ok(SortColumn::SourceDate),
            "event_name" | "name" => Ok(SortColumn::EventName),
            "location_normalized" | "location" => Ok(SortColumn::LocationNormalized),
            "information_source_type" | "source" => Ok(SortColumn::InformationSourceType),
            "confidence" => Ok(SortColumn::Confidence),
            "description" => Ok(SortColumn::Description),
            _ => Err(format!(
                "Unknown column: {}. Use date, name, location, source, confidence, or description",
                s
            )),
        }
    }
}

impl std::fmt::Display for SortColumn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 並べ替え方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// 現在の並べ替え状態（既定: 日付の昇順）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortState {
    pub column: SortColumn,
    pub direction: SortDirection,
}

impl SortState {
    pub fn new(column: SortColumn, direction: SortDirection) -> Self {
        Self { column, direction }
    }

    /// 列見出しのクリック: 同じ列なら方向を反転、別の列なら昇順
    pub fn toggle(self, column: SortColumn) -> Self {
        if self.column == column {
            Self::new(column, self.direction.flipped())
        } else {
            Self::new(column, SortDirection::Asc)
        }
    }

    /// 昇順での比較
    fn compare_asc(&self, a: &EventRecord, b: &EventRecord) -> Ordering {
        match self.column {
            SortColumn::SourceDate => a.source_date.cmp(&b.source_date),
            column => collate::compare(column.text(a), column.text(b)),
        }
    }

    pub fn compare(&self, a: &EventRecord, b: &EventRecord) -> Ordering {
        let ordering = self.compare_asc(a, b);
        match self.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

/// 並べ替えたコピーを返す（入力は変更しない）
pub fn sort_records(records: &[EventRecord], sort: &SortState) -> Vec<EventRecord> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| sort.compare(a, b));
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn event(name: &str, date: &str, location: Option<&str>) -> EventRecord {
        EventRecord {
            unique_id: name.to_string(),
            entry_id: String::new(),
            source_date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            event_id: String::new(),
            event_name: name.to_string(),
            description: "d".to_string(),
            location_normalized: location.map(str::to_string),
            information_source_type: None,
            confidence: None,
            keywords: vec![],
            text_fragment: None,
            brief_context: None,
            event_subtype_custom: None,
        }
    }

    fn names(records: &[EventRecord]) -> Vec<&str> {
        records.iter().map(|r| r.event_name.as_str()).collect()
    }

    #[test]
    fn test_default_is_date_asc() {
        let sort = SortState::default();
        assert_eq!(sort.column, SortColumn::SourceDate);
        assert_eq!(sort.direction, SortDirection::Asc);
    }

    #[test]
    fn test_sort_by_date() {
        let records = vec![
            event("c", "1849-05-01", None),
            event("a", "1849-01-01", None),
            event("b", "1849-03-01", None),
        ];

        let asc = sort_records(&records, &SortState::default());
        assert_eq!(names(&asc), vec!["a", "b", "c"]);

        let desc = sort_records(
            &records,
            &SortState::new(SortColumn::SourceDate, SortDirection::Desc),
        );
        assert_eq!(names(&desc), vec!["c", "b", "a"]);
        // 入力は変更されない
        assert_eq!(names(&records), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_sort_by_location_missing_first() {
        let records = vec![
            event("1", "1849-01-01", Some("Вена")),
            event("2", "1849-01-01", None),
            event("3", "1849-01-01", Some("Будапешт")),
        ];

        let sorted = sort_records(
            &records,
            &SortState::new(SortColumn::LocationNormalized, SortDirection::Asc),
        );
        assert_eq!(names(&sorted), vec!["2", "3", "1"]);
    }

    #[test]
    fn test_stable_on_ties_both_directions() {
        let records = vec![
            event("first", "1849-01-01", Some("Вена")),
            event("second", "1849-01-01", Some("Вена")),
            event("third", "1849-01-01", Some("Вена")),
        ];

        for direction in [SortDirection::Asc, SortDirection::Desc] {
            let sorted = sort_records(
                &records,
                &SortState::new(SortColumn::LocationNormalized, direction),
            );
            assert_eq!(names(&sorted), vec!["first", "second", "third"]);
        }
    }

    #[test]
    fn test_toggle() {
        let sort = SortState::default();
        let flipped = sort.toggle(SortColumn::SourceDate);
        assert_eq!(flipped.direction, SortDirection::Desc);

        let other = flipped.toggle(SortColumn::EventName);
        assert_eq!(other, SortState::new(SortColumn::EventName, SortDirection::Asc));
    }

    #[test]
    fn test_column_from_str() {
        assert_eq!("date".parse::<SortColumn>(), Ok(SortColumn::SourceDate));
        assert_eq!(
            "information_source_type".parse::<SortColumn>(),
            Ok(SortColumn::InformationSourceType)
        );
        assert!("weather".parse::<SortColumn>().is_err());
    }
}
