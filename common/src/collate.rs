//! ロシア語の照合順序
//!
//! 3段階で比較する:
//! 1. 一次: 文字種（空白・記号 < 数字 < キリル < ラテン < その他）、
//!    大文字小文字を区別せず、`ё` は `е` と同じ扱い
//! 2. 二次: `е` < `ё`
//! 3. 三次: 小文字 < 大文字

use std::cmp::Ordering;

/// ロシア語ロケールで文字列を比較
pub fn compare(a: &str, b: &str) -> Ordering {
    primary_key(a)
        .cmp(&primary_key(b))
        .then_with(|| secondary_key(a).cmp(&secondary_key(b)))
        .then_with(|| tertiary_key(a).cmp(&tertiary_key(b)))
}

/// 文字種の順位
fn script_rank(c: char) -> u8 {
    if c.is_whitespace() || c.is_ascii_punctuation() || is_general_punctuation(c) {
        0
    } else if c.is_numeric() {
        1
    } else if is_cyrillic(c) {
        2
    } else if c.is_ascii_alphabetic() || is_latin_extended(c) {
        3
    } else {
        4
    }
}

fn is_cyrillic(c: char) -> bool {
    matches!(c, '\u{0400}'..='\u{04FF}' | '\u{0500}'..='\u{052F}')
}

fn is_latin_extended(c: char) -> bool {
    matches!(c, '\u{00C0}'..='\u{024F}') && c != '×' && c != '÷'
}

fn is_general_punctuation(c: char) -> bool {
    matches!(c, '\u{2000}'..='\u{206F}' | '«' | '»' | '\u{00A0}')
}

fn fold(c: char) -> char {
    let lower = c.to_lowercase().next().unwrap_or(c);
    if lower == 'ё' { 'е' } else { lower }
}

fn primary_key(s: &str) -> Vec<(u8, char)> {
    s.chars().map(|c| (script_rank(c), fold(c))).collect()
}

fn secondary_key(s: &str) -> Vec<bool> {
    s.chars().map(|c| matches!(c, 'ё' | 'Ё')).collect()
}

fn tertiary_key(s: &str) -> Vec<bool> {
    s.chars().map(char::is_uppercase).collect()
}
