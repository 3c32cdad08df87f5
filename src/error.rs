// src/error.rs

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("网络请求失败: {0}")]
    Network(#[from] reqwest::Error),
    #[error("网络中间件错误: {0}")]
    NetworkMiddleware(#[from] reqwest_middleware::Error),
    #[error("服务器返回错误状态 {status}: {url}")]
    HttpStatus { url: String, status: StatusCode },
    #[error("I/O 错误: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON 解析错误: {0}")]
    Json(#[from] serde_json::Error),
    #[error("URL 解析错误: {0}")]
    Url(#[from] url::ParseError),
    #[error("ZIP 归档写入失败: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("用户中断")]
    UserInterrupt,
    #[error("{0}")] // 只打印内部信息，不加任何前缀
    UserInputError(String),
    #[error("未知错误: {0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// 是否属于传输层错误（DNS、连接、超时、非 2xx 状态）。
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            AppError::Network(_) | AppError::NetworkMiddleware(_) | AppError::HttpStatus { .. }
        )
    }
}

pub type AppResult<T> = Result<T, AppError>;
