//! 日付の解析とロシア語表記
//!
//! - source_date の解析（`YYYY-MM-DD`、時刻部は無視）
//! - ru-RU 形式の表示文字列（`01.03.1849` / `1 марта 1849 г.` / `1 мар.`）
//! - 月キー・週の開始日（月曜）

use chrono::{Datelike, Duration, NaiveDate};
use regex::Regex;

/// 主格の月名（フィルタ選択肢用）
const MONTH_NAMES: [&str; 12] = [
    "Январь", "Февраль", "Март", "Апрель", "Май", "Июнь",
    "Июль", "Август", "Сентябрь", "Октябрь", "Ноябрь", "Декабрь",
];

/// 生格の月名（「1 марта」）
const MONTH_NAMES_GENITIVE: [&str; 12] = [
    "января", "февраля", "марта", "апреля", "мая", "июня",
    "июля", "августа", "сентября", "октября", "ноября", "декабря",
];

/// 短縮月名（「1 мар.」）
const MONTH_NAMES_SHORT: [&str; 12] = [
    "янв.", "февр.", "мар.", "апр.", "мая", "июн.",
    "июл.", "авг.", "сент.", "окт.", "нояб.", "дек.",
];

/// source_date を解析
///
/// 月・日は1桁も許容。`T` または空白以降の時刻部は読み捨てる。
pub fn parse_source_date(value: &str) -> Option<NaiveDate> {
    lazy_static::lazy_static! {
        static ref DATE_RE: Regex =
            Regex::new(r"^\s*(\d{4})-(\d{1,2})-(\d{1,2})(?:[T ].*)?\s*$").unwrap();
    }

    let caps = DATE_RE.captures(value)?;
    let year: i32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let day: u32 = caps[3].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// `YYYY-MM` 形式の月キー
pub fn month_key(date: NaiveDate) -> String {
    format!("{}-{:02}", date.year(), date.month())
}

/// 月キーから表示名（`1849-03` → `Март 1849`）
///
/// 解釈できないキーはそのまま返す。
pub fn month_label(key: &str) -> String {
    let parsed = key.split_once('-').and_then(|(year, month)| {
        let month: usize = month.parse().ok()?;
        let name = MONTH_NAMES.get(month.checked_sub(1)?)?;
        Some(format!("{} {}", name, year))
    });
    parsed.unwrap_or_else(|| key.to_string())
}

/// `01.03.1849`
pub fn format_numeric(date: NaiveDate) -> String {
    format!("{:02}.{:02}.{}", date.day(), date.month(), date.year())
}

/// `1 марта 1849 г.`
pub fn format_long(date: NaiveDate) -> String {
    format!(
        "{} {} {} г.",
        date.day(),
        MONTH_NAMES_GENITIVE[date.month0() as usize],
        date.year()
    )
}

/// `1 мар.`
pub fn format_day_month_short(date: NaiveDate) -> String {
    format!("{} {}", date.day(), MONTH_NAMES_SHORT[date.month0() as usize])
}

/// その日を含む週の月曜日
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// 週ラベル（`26.02–04.03`）
pub fn week_label(start: NaiveDate) -> String {
    let end = start + Duration::days(6);
    format!(
        "{:02}.{:02}–{:02}.{:02}",
        start.day(),
        start.month(),
        end.day(),
        end.month()
    )
}
