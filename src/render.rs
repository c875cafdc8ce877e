//! テキスト描画モジュール
//!
//! ビューモデルを端末表示用の文字列にする。描画はここだけで行い、
//! 集計ロジックは持たない。

use diary_dashboard_common::view::{
    ChartPoint, Charts, ChronologyItem, EventDetail, FilterOption, FilterOptions,
    KeywordCloudEntry, Stats, TableRow,
};
use diary_dashboard_common::FilterTag;
use std::fmt::Write;

const BAR_WIDTH: usize = 30;

pub fn render_stats(stats: &Stats, active: &[FilterTag]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "全イベント数: {}", stats.total);
    let _ = writeln!(out, "絞り込み後: {}", stats.filtered);
    let _ = writeln!(
        out,
        "期間: {}",
        stats.date_range.as_deref().unwrap_or("-")
    );
    out.push_str(&render_active_filters(active));
    out
}

pub fn render_active_filters(active: &[FilterTag]) -> String {
    if active.is_empty() {
        return "Фильтры не применены\n".to_string();
    }
    let tags: Vec<String> = active
        .iter()
        .map(|tag| format!("[{}: {}]", tag.name, tag.value))
        .collect();
    format!("{}\n", tags.join(" "))
}

pub fn render_table(rows: &[TableRow], limit: Option<usize>) -> String {
    if rows.is_empty() {
        return "Нет данных\nПопробуйте изменить параметры фильтрации\n".to_string();
    }

    let mut out = String::new();
    let shown = limit.unwrap_or(rows.len()).min(rows.len());
    for row in &rows[..shown] {
        let badge = if row.confidence_label.is_empty() {
            String::new()
        } else {
            format!("[{}]", row.confidence_label)
        };
        let _ = writeln!(
            out,
            "{}  {}  | {} | {} {} | {}",
            row.date, row.event_name, row.location, row.source_short, badge, row.unique_id
        );
    }
    if shown < rows.len() {
        let _ = writeln!(out, "… 他 {} 件", rows.len() - shown);
    }
    out
}

fn render_bars(title: &str, points: &[ChartPoint]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "■ {}", title);
    let max = points.iter().map(|p| p.value).max().unwrap_or(0);
    for point in points {
        let width = if max == 0 { 0 } else { point.value * BAR_WIDTH / max };
        let _ = writeln!(out, "  {:<28} {:>4} {}", point.label, point.value, "█".repeat(width));
    }
    out
}

pub fn render_charts(charts: &Charts) -> String {
    let timeline: Vec<ChartPoint> = charts
        .timeline
        .iter()
        .map(|bucket| ChartPoint {
            label: bucket.label.clone(),
            value: bucket.count,
        })
        .collect();

    [
        render_bars("Динамика по неделям", &timeline),
        render_bars("Категории", &charts.category),
        render_bars("Локации (топ)", &charts.location),
        render_bars("Источники", &charts.source),
        render_bars("Достоверность", &charts.confidence),
    ]
    .join("\n")
}

pub fn render_keywords(cloud: &[KeywordCloudEntry]) -> String {
    if cloud.is_empty() {
        return "Нет ключевых слов для отображения.\n".to_string();
    }
    let mut out = String::new();
    for entry in cloud {
        let _ = writeln!(
            out,
            "{:<30} {:>3} раз(а)  {:.1}px",
            entry.word, entry.count, entry.size_px
        );
    }
    out
}

pub fn render_chronology(items: &[ChronologyItem]) -> String {
    if items.is_empty() {
        return "Нет записей о восприятии автора.\n".to_string();
    }
    let mut out = String::new();
    for item in items {
        let _ = writeln!(out, "{}  {}", item.date, item.kind);
        if !item.quote.is_empty() {
            let _ = writeln!(out, "    {}", item.quote);
        }
    }
    out
}

fn render_option_list(out: &mut String, title: &str, options: &[FilterOption]) {
    let _ = writeln!(out, "■ {}", title);
    for option in options {
        if option.value == option.label {
            let _ = writeln!(out, "  {}", option.value);
        } else {
            let _ = writeln!(out, "  {:<20} {}", option.value, option.label);
        }
    }
}

pub fn render_options(options: &FilterOptions) -> String {
    let mut out = String::new();
    render_option_list(&mut out, "Месяц", &options.months);
    render_option_list(&mut out, "Категория", &options.categories);
    render_option_list(&mut out, "Локация", &options.locations);
    render_option_list(&mut out, "Источник", &options.sources);
    render_option_list(&mut out, "Достоверность", &options.confidence);
    out
}

pub fn render_detail(detail: &EventDetail) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", detail.title);
    let _ = writeln!(out, "Дата: {}", detail.date);
    let _ = writeln!(out, "Описание: {}", detail.description);
    let _ = writeln!(out, "Фрагмент текста: \"{}\"", detail.text_fragment);
    let _ = writeln!(out, "Локация: {}", detail.location);
    let _ = writeln!(out, "Источник информации: {}", detail.source_type);
    let _ = writeln!(out, "Краткий контекст: {}", detail.brief_context);
    let _ = writeln!(out, "Ключевые слова: {}", detail.keywords.join(", "));
    out
}
