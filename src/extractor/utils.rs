// src/extractor/utils.rs

use crate::constants;
use log::debug;
use percent_encoding::percent_decode_str;
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

static IMAGE_EXT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\.(png|jpg|jpeg|gif|webp)").unwrap());

/// 将 `src`/`data-src` 的值解析为绝对地址；无法解析时返回 `None`。
pub fn resolve_source(base_url: &Url, raw: &str) -> Option<Url> {
    match base_url.join(raw) {
        Ok(url) => Some(url),
        Err(e) => {
            debug!("无法解析图片地址 '{}' (基准: {}): {}", raw, base_url, e);
            None
        }
    }
}

/// 去掉图床追加在真实文件名之后的缩放/版本路径段，保留查询串。
///
/// `.../Pic.png/revision/latest/scale-to-width-down/150?cb=99` -> `.../Pic.png?cb=99`
pub fn canonicalize_url(mut url: Url) -> Url {
    if !is_resizing_cdn(&url) {
        return url;
    }
    let Some(end) = IMAGE_EXT_RE.find(url.path()).map(|m| m.end()) else {
        return url;
    };
    if end < url.path().len() {
        let truncated = url.path()[..end].to_string();
        debug!("去除图床缩放参数: {} -> {}", url.path(), truncated);
        url.set_path(&truncated);
    }
    url
}

fn is_resizing_cdn(url: &Url) -> bool {
    let host = constants::media::RESIZING_CDN_HOST;
    url.host_str().is_some_and(|h| {
        h.eq_ignore_ascii_case(host)
            || (h.len() > host.len()
                && h[h.len() - host.len()..].eq_ignore_ascii_case(host)
                && h.as_bytes()[h.len() - host.len() - 1] == b'.')
    })
}

/// 取 URL 路径的最后一段，百分号解码后去掉扩展名。结果为空白时返回 `None`。
pub fn url_basename_stem(url: &Url) -> Option<String> {
    let basename = url.path().rsplit('/').next().unwrap_or_default();
    let decoded = percent_decode_str(basename).decode_utf8_lossy();
    let stem = strip_extension(&decoded);
    if stem.trim().is_empty() {
        None
    } else {
        Some(stem.to_string())
    }
}

// 开头的点不算扩展名分隔符，例如 ".hidden"
fn strip_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) if name[..idx].chars().any(|c| c != '.') => &name[..idx],
        _ => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_canonicalize_strips_cdn_revision_segments() {
        let raw = url("https://static.wikia.nocookie.net/foo/images/a/ab/Pic.png/revision/latest/scale-to-width-down/150?cb=99");
        assert_eq!(
            canonicalize_url(raw).as_str(),
            "https://static.wikia.nocookie.net/foo/images/a/ab/Pic.png?cb=99"
        );
    }

    #[test]
    fn test_canonicalize_is_case_insensitive_and_handles_jpeg() {
        let raw = url("https://vignette.wikia.nocookie.net/x/images/Big.JPEG/revision/latest");
        assert_eq!(
            canonicalize_url(raw).as_str(),
            "https://vignette.wikia.nocookie.net/x/images/Big.JPEG"
        );
    }

    #[test]
    fn test_canonicalize_leaves_other_hosts_alone() {
        let raw = "https://example.com/images/Pic.png/revision/latest?cb=1";
        assert_eq!(canonicalize_url(url(raw)).as_str(), raw);

        // 仅包含图床域名作为子串的其他主机不受影响
        let raw = "https://notwikia.nocookie.net.evil.com/Pic.png/revision/latest";
        assert_eq!(canonicalize_url(url(raw)).as_str(), raw);
    }

    #[test]
    fn test_canonicalize_without_extension_is_unchanged() {
        let raw = "https://static.wikia.nocookie.net/foo/images/a/ab/Pic/revision/latest?cb=2";
        assert_eq!(canonicalize_url(url(raw)).as_str(), raw);
    }

    #[test]
    fn test_resolve_source_relative_and_absolute() {
        let base = url("https://example.com/wiki/Page");
        assert_eq!(
            resolve_source(&base, "/img/a.png").unwrap().as_str(),
            "https://example.com/img/a.png"
        );
        assert_eq!(
            resolve_source(&base, "b.gif").unwrap().as_str(),
            "https://example.com/wiki/b.gif"
        );
        assert_eq!(
            resolve_source(&base, "//cdn.example.org/c.jpg").unwrap().as_str(),
            "https://cdn.example.org/c.jpg"
        );
        assert!(resolve_source(&base, "http://[::1").is_none());
    }

    #[test]
    fn test_url_basename_stem() {
        assert_eq!(
            url_basename_stem(&url("https://e.com/x/Some_Image.png?cb=123")).as_deref(),
            Some("Some_Image")
        );
        assert_eq!(
            url_basename_stem(&url("https://e.com/x/caf%C3%A9%20au%20lait.jpg")).as_deref(),
            Some("café au lait")
        );
        assert_eq!(
            url_basename_stem(&url("https://e.com/x/archive.tar.gz")).as_deref(),
            Some("archive.tar")
        );
        assert_eq!(url_basename_stem(&url("https://e.com/x/.hidden")).as_deref(), Some(".hidden"));
        assert_eq!(url_basename_stem(&url("https://e.com/")), None);
        assert_eq!(url_basename_stem(&url("https://e.com/x/.png")).as_deref(), Some(".png"));
    }
}
