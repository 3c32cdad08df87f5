// src/extractor/naming.rs

use super::utils::url_basename_stem;
use crate::constants::naming::{SUSPICIOUS_MARKERS, SUSPICIOUS_NAME_CHARS};
use itertools::Itertools;
use log::debug;
use scraper::{ElementRef, Selector};
use std::sync::LazyLock;
use url::Url;

static FIGCAPTION_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("figcaption").unwrap());

type NameStep = fn(ElementRef<'_>, &Url) -> Option<String>;

/// 命名规则的优先级：alt 文本 > 所在 figure 的 figcaption > URL 文件名。
const NAME_STEPS: [(&str, NameStep); 3] = [
    ("alt", name_from_alt),
    ("figcaption", name_from_figcaption),
    ("url", name_from_url),
];

/// 为一张图片推导显示名称。所有规则都失败时返回 `None`，该图片应被跳过。
pub fn derive_display_name(img: ElementRef<'_>, src: &Url) -> Option<String> {
    let (rule, name) = NAME_STEPS
        .iter()
        .find_map(|(rule, step)| step(img, src).map(|name| (*rule, name)))?;
    debug!("图片 {} 使用 '{}' 规则命名: {}", src, rule, name);

    let name = replace_suspicious(name, src);
    Some(normalize(&name))
}

/// 名称中含有 URL 或脚本路径，或者过长时，视为可疑。
pub fn is_suspicious(name: &str) -> bool {
    let lower = name.to_lowercase();
    SUSPICIOUS_MARKERS.iter().any(|marker| lower.contains(marker))
        || name.chars().count() > SUSPICIOUS_NAME_CHARS
}

// 可疑名称改用 URL 文件名；URL 也给不出名称时保留原名
fn replace_suspicious(name: String, src: &Url) -> String {
    if !is_suspicious(&name) {
        return name;
    }
    match url_basename_stem(src) {
        Some(from_url) => {
            debug!("名称 '{}' 可疑，改用 URL 文件名 '{}'", name, from_url);
            from_url
        }
        None => name,
    }
}

fn normalize(name: &str) -> String {
    name.replace('_', " ")
}

fn non_empty(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn name_from_alt(img: ElementRef<'_>, _src: &Url) -> Option<String> {
    img.value().attr("alt").and_then(non_empty)
}

fn name_from_figcaption(img: ElementRef<'_>, _src: &Url) -> Option<String> {
    let figure = img
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "figure")?;
    let caption = figure.select(&FIGCAPTION_SELECTOR).next()?;
    let text = caption
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .join("");
    non_empty(&text)
}

fn name_from_url(_img: ElementRef<'_>, src: &Url) -> Option<String> {
    url_basename_stem(src)
}
