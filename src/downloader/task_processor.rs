// src/downloader/task_processor.rs

use super::namespace::FilenameNamespace;
use crate::{
    client::RobustClient,
    constants::media,
    error::*,
    models::*,
    utils,
};
use log::{debug, info, warn};
use reqwest::header;
use url::Url;

/// 根据 Content-Type 推断扩展名；以传输层类型为准，与建议名称无关。
pub fn extension_for_content_type(content_type: Option<&str>) -> &'static str {
    let Some(content_type) = content_type else {
        return media::DEFAULT_EXTENSION;
    };
    let lower = content_type.to_ascii_lowercase();
    if lower.contains("jpeg") {
        ".jpg"
    } else if lower.contains("png") {
        ".png"
    } else if lower.contains("gif") {
        ".gif"
    } else if lower.contains("svg") {
        ".svg"
    } else {
        media::DEFAULT_EXTENSION
    }
}

/// 下载单张图片并生成文件名。任何失败都会作为错误返回。
pub async fn fetch_one(client: &RobustClient, src: &str, alt: &str) -> AppResult<FetchedImage> {
    let src = src.trim();
    if src.is_empty() {
        return Err(AppError::UserInputError("图片链接不能为空。".to_string()));
    }
    let url = Url::parse(src)?;
    debug!("开始下载图片: {}", url);

    let res = client.get_image(&url).await?;
    let content_type = res
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let extension = extension_for_content_type(content_type.as_deref());
    let content = res.bytes().await?.to_vec();

    let filename = format!("{}{}", utils::sanitize_filename(alt), extension);
    debug!(
        "图片 {} 下载完成: 文件名='{}', 类型={:?}, 大小={} 字节",
        url,
        filename,
        content_type,
        content.len()
    );

    Ok(FetchedImage {
        filename,
        content,
        content_type: content_type.unwrap_or_else(|| media::DEFAULT_CONTENT_TYPE.to_string()),
    })
}

/// `TaskProcessor` 负责批次中单个请求的完整处理：下载、命名、占用文件名。
/// 错误不会越过这里，全部转换为 `FetchOutcome`。
pub struct TaskProcessor<'a> {
    client: &'a RobustClient,
    namespace: &'a FilenameNamespace,
}

impl<'a> TaskProcessor<'a> {
    pub fn new(client: &'a RobustClient, namespace: &'a FilenameNamespace) -> Self {
        Self { client, namespace }
    }

    pub async fn process(&self, request: FetchRequest) -> FetchOutcome {
        if request.src.trim().is_empty() {
            warn!("跳过缺少图片链接的请求 (名称: '{}')", request.alt);
            return FetchOutcome::Failed {
                src: request.src,
                reason: "缺少图片链接".to_string(),
            };
        }

        let fetched = match fetch_one(self.client, &request.src, &request.alt).await {
            Ok(fetched) => fetched,
            Err(e) => {
                warn!("下载 {} 失败: {}", request.src, e);
                return FetchOutcome::Failed {
                    src: request.src,
                    reason: failure_reason(&e),
                };
            }
        };

        // 只在检查/占用文件名时持有锁，网络请求在锁外完成
        if !self.namespace.claim(&fetched.filename) {
            info!("跳过重复文件: {}", fetched.filename);
            return FetchOutcome::Duplicate {
                filename: fetched.filename,
            };
        }

        FetchOutcome::Fetched(ArchiveEntry {
            filename: fetched.filename,
            content: fetched.content,
        })
    }
}

fn failure_reason(e: &AppError) -> String {
    match e {
        AppError::HttpStatus { status, .. } => format!("HTTP {}", status.as_u16()),
        AppError::Network(err) if err.is_timeout() => "请求超时".to_string(),
        AppError::Network(err) if err.is_connect() => "连接失败".to_string(),
        AppError::NetworkMiddleware(_) | AppError::Network(_) => "网络错误".to_string(),
        AppError::Url(_) => "无效的图片链接".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_for_content_type() {
        assert_eq!(extension_for_content_type(Some("image/jpeg")), ".jpg");
        assert_eq!(extension_for_content_type(Some("image/png")), ".png");
        assert_eq!(extension_for_content_type(Some("IMAGE/GIF")), ".gif");
        assert_eq!(extension_for_content_type(Some("image/svg+xml; charset=utf-8")), ".svg");
        assert_eq!(extension_for_content_type(Some("image/webp")), ".jpg");
        assert_eq!(extension_for_content_type(Some("application/octet-stream")), ".jpg");
        assert_eq!(extension_for_content_type(None), ".jpg");
    }

    #[test]
    fn test_failure_reason_for_status() {
        let err = AppError::HttpStatus {
            url: "https://e.com/a.png".into(),
            status: reqwest::StatusCode::NOT_FOUND,
        };
        assert_eq!(failure_reason(&err), "HTTP 404");
        assert_eq!(failure_reason(&AppError::Url(url::ParseError::EmptyHost)), "无效的图片链接");
    }
}
