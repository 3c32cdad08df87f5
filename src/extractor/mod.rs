// src/extractor/mod.rs

mod naming;
pub mod utils;

pub use naming::{derive_display_name, is_suspicious};

use crate::{
    client::RobustClient,
    error::{AppError, AppResult},
    models::ImageRecord,
};
use log::{debug, info, trace};
use scraper::{ElementRef, Html, Selector};
use std::{collections::HashSet, sync::LazyLock};
use url::Url;

static IMG_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("img").unwrap());

/// 懒加载属性优先于标准属性
const SOURCE_ATTRS: [&str; 2] = ["data-src", "src"];

/// 从 HTML 中按文档顺序提取图片。不会因 HTML 格式错误而失败，
/// 无法处理的元素会被直接跳过。
pub fn extract(html: &[u8], base_url: &Url) -> Vec<ImageRecord> {
    let text = String::from_utf8_lossy(html);
    let document = Html::parse_document(&text);

    let mut seen_srcs = HashSet::new();
    let mut records = Vec::new();

    for img in document.select(&IMG_SELECTOR) {
        let Some(raw_src) = source_attr(img) else {
            trace!("跳过没有 src/data-src 的 <img>");
            continue;
        };
        let Some(resolved) = utils::resolve_source(base_url, raw_src) else {
            continue;
        };
        let src = utils::canonicalize_url(resolved);
        let key = src.to_string();
        if seen_srcs.contains(&key) {
            trace!("跳过重复图片: {}", key);
            continue;
        }

        let Some(alt) = naming::derive_display_name(img, &src) else {
            debug!("无法为图片 {} 推导名称，已跳过", key);
            continue;
        };

        seen_srcs.insert(key.clone());
        records.push(ImageRecord { src: key, alt });
    }

    info!("从 {} 中提取到 {} 张图片", base_url, records.len());
    records
}

fn source_attr<'a>(img: ElementRef<'a>) -> Option<&'a str> {
    SOURCE_ATTRS
        .iter()
        .filter_map(|attr| img.value().attr(attr))
        .map(str::trim)
        .find(|value| !value.is_empty())
}

/// 下载网页并提取其中的图片。网页本身获取失败时返回错误。
pub async fn scrape_page(client: &RobustClient, page_url: &str) -> AppResult<Vec<ImageRecord>> {
    let page_url = page_url.trim();
    if page_url.is_empty() {
        return Err(AppError::UserInputError("网页链接不能为空。".to_string()));
    }
    let url = Url::parse(page_url)?;
    info!("开始抓取网页: {}", url);

    let res = client.get(url).await?;
    // 以重定向后的最终地址作为相对路径的基准
    let base_url = res.url().clone();
    let body = res.bytes().await?;
    debug!("网页 {} 下载完成，大小 {} 字节", base_url, body.len());

    Ok(extract(&body, &base_url))
}
