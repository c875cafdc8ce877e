//! イベントレコードの型定義
//!
//! - RawEvent: JSON から読み込んだ未検証レコード
//! - EventRecord: 検証済みレコード（読み込み後は不変）
//! - Dataset: 検証済みレコード一式と全体の日付範囲

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// JSON から読み込んだままのレコード
///
/// どのフィールドも欠損しうる。必須の3項目（source_date / event_name /
/// description）は文字列でなければレコードごと除外される。
/// それ以外は数値・真偽値を文字列化し、その他の型は欠損扱い。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawEvent {
    #[serde(deserialize_with = "lenient_string")]
    pub entry_id: Option<String>,
    pub source_date: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub event_id: Option<String>,
    pub event_name: Option<String>,
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub location_normalized: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub information_source_type: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub confidence: Option<String>,
    /// 配列以外が入っている可能性があるため Value のまま保持
    pub keywords: Option<serde_json::Value>,
    #[serde(deserialize_with = "lenient_string")]
    pub text_fragment: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub brief_context: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub event_subtype_custom: Option<String>,
}

/// 任意項目の読み込み（型違いでレコードを落とさない）
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| scalar_to_string(&v)))
}

/// 文字列・数値・真偽値を文字列にする（それ以外は None）
pub(crate) fn scalar_to_string(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// 信頼度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    /// 表示順
    pub const ALL: [Confidence; 3] = [Confidence::High, Confidence::Medium, Confidence::Low];

    /// JSON上の表記
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::High => "High",
            Confidence::Medium => "Medium",
            Confidence::Low => "Low",
        }
    }

    /// バッジのスタイル名
    pub fn level(&self) -> &'static str {
        match self {
            Confidence::High => "high",
            Confidence::Medium => "medium",
            Confidence::Low => "low",
        }
    }
}

impl std::str::FromStr for Confidence {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "High" => Ok(Confidence::High),
            "Medium" => Ok(Confidence::Medium),
            "Low" => Ok(Confidence::Low),
            _ => Err(format!("Unknown confidence: {}. Use High, Medium, or Low", s)),
        }
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 検証済みイベント
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    /// 行単位の参照用ID（`{entry_id}_{index}`）。比較・集計には使わない
    pub unique_id: String,
    #[serde(default)]
    pub entry_id: String,
    pub source_date: NaiveDate,
    #[serde(default)]
    pub event_id: String,
    pub event_name: String,
    pub description: String,
    #[serde(default)]
    pub location_normalized: Option<String>,
    #[serde(default)]
    pub information_source_type: Option<String>,
    #[serde(default)]
    pub confidence: Option<Confidence>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub text_fragment: Option<String>,
    #[serde(default)]
    pub brief_context: Option<String>,
    #[serde(default)]
    pub event_subtype_custom: Option<String>,
}

impl EventRecord {
    /// event_id のカテゴリ接頭辞（最初の `_` まで + `_`）
    ///
    /// event_id が空なら None。
    pub fn category_prefix(&self) -> Option<String> {
        category_prefix(&self.event_id)
    }

    pub fn location(&self) -> &str {
        self.location_normalized.as_deref().unwrap_or("")
    }

    pub fn source_type(&self) -> &str {
        self.information_source_type.as_deref().unwrap_or("")
    }

    pub fn confidence_str(&self) -> &str {
        self.confidence.map(|c| c.as_str()).unwrap_or("")
    }

    pub fn text_fragment(&self) -> &str {
        self.text_fragment.as_deref().unwrap_or("")
    }
}

/// event_id からカテゴリ接頭辞を取り出す
pub fn category_prefix(event_id: &str) -> Option<String> {
    if event_id.is_empty() {
        return None;
    }
    let head = event_id.split('_').next().unwrap_or(event_id);
    Some(format!("{}_", head))
}

/// 読み込み済みデータセット（ベース）
///
/// 生成後は変更しない。派生ビューはすべてここから計算する。
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    events: Vec<EventRecord>,
    date_range: Option<(NaiveDate, NaiveDate)>,
}

impl Dataset {
    pub fn new(events: Vec<EventRecord>) -> Self {
        let date_range = events
            .iter()
            .map(|e| e.source_date)
            .min()
            .zip(events.iter().map(|e| e.source_date).max());
        Self { events, date_range }
    }

    pub fn events(&self) -> &[EventRecord] {
        &self.events
    }

    /// 全体の最小日付と最大日付
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.date_range
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// unique_id でレコードを検索
    pub fn find(&self, unique_id: &str) -> Option<&EventRecord> {
        self.events.iter().find(|e| e.unique_id == unique_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_prefix() {
        assert_eq!(category_prefix("REV1848_x"), Some("REV1848_".to_string()));
        assert_eq!(
            category_prefix("AUTHOR_PERCEPTION_03"),
            Some("AUTHOR_".to_string())
        );
        assert_eq!(category_prefix("NOUNDERSCORE"), Some("NOUNDERSCORE_".to_string()));
        assert_eq!(category_prefix(""), None);
    }

    #[test]
    fn test_confidence_from_str() {
        assert_eq!("High".parse::<Confidence>(), Ok(Confidence::High));
        assert_eq!("Low".parse::<Confidence>(), Ok(Confidence::Low));
        assert!("high".parse::<Confidence>().is_err());
        assert!("Unknown".parse::<Confidence>().is_err());
    }

    #[test]
    fn test_raw_event_deserialize_partial() {
        let json = r#"{
            "source_date": "1849-03-01",
            "event_name": "Событие",
            "keywords": "не массив"
        }"#;

        let raw: RawEvent = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert_eq!(raw.source_date.as_deref(), Some("1849-03-01"));
        assert_eq!(raw.description, None);
        assert!(raw.keywords.is_some());
    }

    #[test]
    fn test_raw_event_required_wrong_type_fails() {
        let json = r#"{ "event_name": 42 }"#;
        assert!(serde_json::from_str::<RawEvent>(json).is_err());
    }

    #[test]
    fn test_raw_event_optional_fields_are_lenient() {
        let json = r#"{
            "entry_id": 17,
            "source_date": "1849-03-01",
            "event_name": "Событие",
            "description": "Описание",
            "location_normalized": { "city": "Вена" },
            "confidence": true,
            "brief_context": null
        }"#;

        let raw: RawEvent = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert_eq!(raw.entry_id.as_deref(), Some("17"));
        assert_eq!(raw.location_normalized, None);
        assert_eq!(raw.confidence.as_deref(), Some("true"));
        assert_eq!(raw.brief_context, None);
    }

    #[test]
    fn test_dataset_date_range() {
        let make = |date: &str| EventRecord {
            unique_id: String::new(),
            entry_id: String::new(),
            source_date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            event_id: String::new(),
            event_name: "n".into(),
            description: "d".into(),
            location_normalized: None,
            information_source_type: None,
            confidence: None,
            keywords: vec![],
            text_fragment: None,
            brief_context: None,
            event_subtype_custom: None,
        };

        let dataset = Dataset::new(vec![make("1849-05-01"), make("1849-01-10"), make("1849-03-03")]);
        let (min, max) = dataset.date_range().unwrap();
        assert_eq!(min.to_string(), "1849-01-10");
        assert_eq!(max.to_string(), "1849-05-01");

        assert!(Dataset::new(vec![]).date_range().is_none());
    }
}
