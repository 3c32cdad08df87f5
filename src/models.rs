// src/models.rs

use crate::constants;
use serde::{Deserialize, Serialize};

/// 从网页中提取出的一张图片：规范化后的绝对地址与显示名称。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    pub src: String,
    pub alt: String,
}

/// 调用方提交的一项下载请求。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchRequest {
    #[serde(default)]
    pub src: String,
    #[serde(default = "default_alt")]
    pub alt: String,
}

fn default_alt() -> String {
    constants::naming::DEFAULT_ALT_NAME.to_string()
}

impl FetchRequest {
    pub fn new(src: impl Into<String>, alt: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            alt: alt.into(),
        }
    }
}

impl From<ImageRecord> for FetchRequest {
    fn from(record: ImageRecord) -> Self {
        Self {
            src: record.src,
            alt: record.alt,
        }
    }
}

/// 单张图片下载的结果。
#[derive(Debug, Clone)]
pub struct FetchedImage {
    pub filename: String,
    pub content: Vec<u8>,
    pub content_type: String,
}

/// 即将写入归档的一项。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub filename: String,
    pub content: Vec<u8>,
}

/// 单个并发任务的结果。只有 `Fetched` 会被写入归档。
#[derive(Debug)]
pub enum FetchOutcome {
    Fetched(ArchiveEntry),
    Duplicate { filename: String },
    Failed { src: String, reason: String },
}

impl FetchOutcome {
    pub fn into_entry(self) -> Option<ArchiveEntry> {
        match self {
            FetchOutcome::Fetched(entry) => Some(entry),
            _ => None,
        }
    }
}
