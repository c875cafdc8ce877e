//! 表示名ラベル定義モジュール
//!
//! カテゴリ接頭辞・情報源種別・信頼度の表示名を保持する。
//! 組み込みプリセットに `LabelOverrides`（JSON）を重ねて使う。

use crate::error::{Error, Result};
use crate::types::Confidence;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 値が無いレコードの集計先
pub const NOT_SPECIFIED: &str = "Не указано";

/// 任意項目が空のときの表示
pub const NO_DATA: &str = "Нет данных";

/// 表示名の定義
#[derive(Debug, Clone, PartialEq)]
pub struct LabelConfig {
    /// カテゴリ接頭辞（`REV1848_`）→ 表示名
    pub categories: HashMap<String, String>,
    /// 未知の接頭辞の表示名
    pub category_fallback: String,
    /// 情報源種別 → 短縮名
    pub source_short: HashMap<String, String>,
    /// 信頼度（`High`）→ 表示名
    pub confidence: HashMap<String, String>,
    /// 値が無い場合の集計ラベル
    pub not_specified: String,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self::diary_preset()
    }
}

impl LabelConfig {
    /// 組み込みプリセットを取得
    pub fn from_preset(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "diary1849" | "diary" => Some(Self::diary_preset()),
            "revolution" | "rev1848" => Some(Self::revolution_preset()),
            _ => None,
        }
    }

    /// 日記ダッシュボード用プリセット
    fn diary_preset() -> Self {
        let mut config = Self::empty();

        config.categories.insert("REV1848_".into(), "Революции 1848-49".into());
        config.categories.insert("RU_".into(), "Российские реакции".into());
        config.categories.insert("AUTHOR_".into(), "Авторские восприятия".into());
        config.categories.insert("IDEOLOGIES_".into(), "Идеологии и причины".into());
        config.categories.insert("OTHER_".into(), "Прочее".into());

        config.source_short.insert(
            "Официальные источники (газеты, манифесты)".into(),
            "Офиц. источники".into(),
        );
        config.source_short.insert(
            "Личные наблюдения и опыт автора".into(),
            "Личн. опыт".into(),
        );
        config.source_short.insert(
            "Неофициальные сведения (слухи, разговоры в обществе)".into(),
            "Слухи".into(),
        );
        config.source_short.insert(
            "Информация от конкретного лица (именованный источник)".into(),
            "Именов. источник".into(),
        );
        config.source_short.insert(
            "Источник неясен/не указан".into(),
            "Неясный источник".into(),
        );

        config
    }

    /// 革命イベント一覧用プリセット（カテゴリ名のみ異なる）
    fn revolution_preset() -> Self {
        let mut config = Self::diary_preset();

        config.categories.clear();
        config.categories.insert("REV1848_".into(), "События в Европе".into());
        config.categories.insert("RU_".into(), "Реакция в России".into());
        config.categories.insert("AUTHOR_".into(), "Восприятие автора".into());

        config
    }

    fn empty() -> Self {
        let mut confidence = HashMap::new();
        confidence.insert("High".into(), "Высокий".into());
        confidence.insert("Medium".into(), "Средний".into());
        confidence.insert("Low".into(), "Низкий".into());

        Self {
            categories: HashMap::new(),
            category_fallback: "Прочее".into(),
            source_short: HashMap::new(),
            confidence,
            not_specified: NOT_SPECIFIED.into(),
        }
    }

    /// カテゴリ接頭辞の表示名（未知なら fallback）
    pub fn category_name(&self, prefix: &str) -> String {
        self.categories
            .get(prefix)
            .cloned()
            .unwrap_or_else(|| self.category_fallback.clone())
    }

    /// フィルタ選択肢用の表示名（未知なら接頭辞そのもの）
    pub fn category_option_name(&self, prefix: &str) -> String {
        self.categories
            .get(prefix)
            .cloned()
            .unwrap_or_else(|| prefix.to_string())
    }

    /// 情報源種別の短縮名（未知ならそのまま）
    pub fn short_source(&self, source: &str) -> String {
        self.source_short
            .get(source)
            .cloned()
            .unwrap_or_else(|| source.to_string())
    }

    /// 信頼度の表示名
    pub fn confidence_label(&self, confidence: Confidence) -> String {
        self.confidence
            .get(confidence.as_str())
            .cloned()
            .unwrap_or_else(|| confidence.as_str().to_string())
    }

    /// 上書き定義を重ねる（指定された項目のみ置き換え）
    pub fn apply(&mut self, overrides: &LabelOverrides) {
        self.categories.extend(overrides.categories.clone());
        self.source_short.extend(overrides.source_short.clone());
        self.confidence.extend(overrides.confidence.clone());
        if let Some(fallback) = &overrides.category_fallback {
            self.category_fallback = fallback.clone();
        }
        if let Some(not_specified) = &overrides.not_specified {
            self.not_specified = not_specified.clone();
        }
    }
}

/// プリセットに重ねる表示名（JSONで指定された項目だけを持つ）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelOverrides {
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub categories: HashMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_fallback: Option<String>,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub source_short: HashMap<String, String>,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub confidence: HashMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub not_specified: Option<String>,
}

impl LabelOverrides {
    /// JSONファイルから読み込み
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// JSON文字列から読み込み
    pub fn from_json(json: &str) -> Result<Self> {
        let overrides: Self = serde_json::from_str(json)?;
        overrides.check()?;
        Ok(overrides)
    }

    /// 集計ラベルを空にする定義は受け付けない
    pub fn check(&self) -> Result<()> {
        let blank = |value: &Option<String>| value.as_deref().is_some_and(|v| v.trim().is_empty());
        if blank(&self.not_specified) {
            return Err(Error::Config("not_specified must not be empty".into()));
        }
        if blank(&self.category_fallback) {
            return Err(Error::Config("category_fallback must not be empty".into()));
        }
        Ok(())
    }
}
