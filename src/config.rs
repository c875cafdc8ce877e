use crate::error::{DashboardError, Result};
use diary_dashboard_common::{LabelConfig, LabelOverrides, ValidRange, ViewOptions};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// データのURLまたはファイルパス
    pub data_source: String,
    /// 有効な日付範囲
    pub valid_range: ValidRange,
    /// 表示名プリセット（`diary1849` / `revolution`）
    pub labels_preset: String,
    /// 表示名の定義ファイル（相対パスは設定ファイルの場所から）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels_file: Option<PathBuf>,
    /// 設定ファイル内の表示名（定義ファイルの後に重ねる）
    #[serde(rename = "labels", skip_serializing_if = "Option::is_none")]
    pub label_overrides: Option<LabelOverrides>,
    /// 解決済みの表示名
    #[serde(skip)]
    pub labels: LabelConfig,
    pub view: ViewOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    /// 指定パスから読み込み（無ければ既定値）
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            tracing::debug!(path = %config_path.display(), "loading config");
            let content = std::fs::read_to_string(config_path)?;
            let mut config: Config = serde_json::from_str(&content)?;
            config.labels = config.resolve_labels(config_path)?;
            config.check()?;
            Ok(config)
        } else {
            Ok(Self::default_config())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;
        self.save_to(&config_path)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        tracing::debug!(path = %config_path.display(), "config saved");
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| DashboardError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("diary-dashboard").join("config.json"))
    }

    fn default_config() -> Self {
        Self {
            data_source: "dashboard_data.json".into(),
            valid_range: ValidRange::default(),
            labels_preset: "diary1849".into(),
            labels_file: None,
            label_overrides: None,
            labels: LabelConfig::default(),
            view: ViewOptions::default(),
        }
    }

    /// プリセット → 定義ファイル → 設定内の表示名の順に重ねる
    fn resolve_labels(&self, config_path: &Path) -> Result<LabelConfig> {
        let mut labels = LabelConfig::from_preset(&self.labels_preset).ok_or_else(|| {
            DashboardError::Config(format!("不明な表示名プリセット: {}", self.labels_preset))
        })?;

        if let Some(file) = &self.labels_file {
            let path = match config_path.parent() {
                Some(dir) if file.is_relative() => dir.join(file),
                _ => file.clone(),
            };
            tracing::debug!(path = %path.display(), "loading label overrides");
            labels.apply(&LabelOverrides::from_file(&path)?);
        }

        if let Some(overrides) = &self.label_overrides {
            overrides.check()?;
            labels.apply(overrides);
        }

        Ok(labels)
    }

    fn check(&self) -> Result<()> {
        if self.valid_range.from > self.valid_range.to {
            return Err(DashboardError::Config(format!(
                "日付範囲が不正です: {} > {}",
                self.valid_range.from, self.valid_range.to
            )));
        }
        if self.view.keyword_min_px > self.view.keyword_max_px {
            return Err(DashboardError::Config(
                "keyword_min_px は keyword_max_px 以下にしてください".into(),
            ));
        }
        Ok(())
    }
}
