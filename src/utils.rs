// src/utils.rs

use crate::constants;
use regex::Regex;
use std::{collections::BTreeSet, sync::LazyLock};

static ILLEGAL_CHARS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"[\\/*?:"<>|]"#).unwrap());

/// 把显示名称转换为归档内可用的文件名主干（不含扩展名）。
///
/// 下划线替换为空格，删除常见文件系统不允许的字符，最多保留 100 个字符。
pub fn sanitize_filename(name: &str) -> String {
    let spaced = name.replace('_', " ");
    let cleaned = ILLEGAL_CHARS_RE.replace_all(&spaced, "");
    let truncated: String = cleaned
        .chars()
        .take(constants::naming::MAX_FILENAME_CHARS)
        .collect();
    if truncated.trim().is_empty() {
        return constants::naming::DEFAULT_ALT_NAME.replace('_', " ");
    }
    truncated
}

pub fn truncate_text(text: &str, max_width: usize) -> String {
    let mut width = 0;
    let mut end_pos = 0;
    for (i, c) in text.char_indices() {
        width += if c.is_ascii() { 1 } else { 2 };
        if width > max_width.saturating_sub(3) {
            end_pos = i;
            break;
        }
    }
    if end_pos == 0 { text.to_string() } else { format!("{}...", &text[..end_pos]) }
}

pub fn parse_selection_indices(selection_str: &str, total_items: usize) -> Vec<usize> {
    if selection_str.trim().eq_ignore_ascii_case("all") {
        return (0..total_items).collect();
    }
    let mut indices = BTreeSet::new();
    for part in selection_str.split(',').map(|s| s.trim()) {
        if part.is_empty() { continue; }
        if let Some((start, end)) = part.split_once('-') {
            if let (Ok(start), Ok(end)) = (start.trim().parse::<usize>(), end.trim().parse::<usize>()) {
                if start == 0 || end == 0 { continue; }
                let (min, max) = (start.min(end), start.max(end));
                indices.extend((min..=max).filter(|i| *i <= total_items).map(|i| i - 1));
            }
        } else if let Ok(num) = part.parse::<usize>()
            && num > 0
            && num <= total_items
        {
            indices.insert(num - 1);
        }
    }
    indices.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_selection_indices() {
        // 测试基本情况
        assert_eq!(parse_selection_indices("1,3,5", 5), vec![0, 2, 4]);

        // 测试范围
        assert_eq!(parse_selection_indices("2-4", 5), vec![1, 2, 3]);

        // 测试 "all" 关键字 (大小写不敏感)
        assert_eq!(parse_selection_indices("All", 3), vec![0, 1, 2]);

        // 测试混合、乱序和重复
        assert_eq!(parse_selection_indices("5, 1-2, 1", 5), vec![0, 1, 4]);

        // 测试无效和越界输入
        assert_eq!(parse_selection_indices("1,10,foo,-2", 5), vec![0]);
        assert_eq!(parse_selection_indices("4-9", 5), vec![3, 4]);

        // 测试空输入
        assert_eq!(parse_selection_indices("", 5), Vec::<usize>::new());
    }

    #[test]
    fn test_sanitize_filename_strips_illegal_chars() {
        assert_eq!(sanitize_filename("a\\b/c:d*e?f\"g<h>i|j"), "abcdefghij");
        assert_eq!(sanitize_filename("Revision:_Title"), "Revision Title");
    }

    #[test]
    fn test_sanitize_filename_truncates_by_chars() {
        let long_name = "图".repeat(150);
        let sanitized = sanitize_filename(&long_name);
        assert_eq!(sanitized.chars().count(), 100);

        let exact = "a".repeat(100);
        assert_eq!(sanitize_filename(&exact), exact);
    }

    #[test]
    fn test_sanitize_filename_falls_back_when_empty() {
        assert_eq!(sanitize_filename(""), "no alt name");
        assert_eq!(sanitize_filename("<>|"), "no alt name");
        assert_eq!(sanitize_filename("___"), "no alt name");
    }
}
