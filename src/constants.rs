// src/constants.rs

pub const UI_WIDTH: usize = 88;
pub const FILENAME_TRUNCATE_LENGTH: usize = 65;
pub const CONFIG_DIR_NAME: &str = concat!(".", clap::crate_name!());
pub const CONFIG_FILE_NAME: &str = "config.json";
pub const LOG_FILE_NAME: &str = concat!(clap::crate_name!(), ".log");
pub const LOG_FALLBACK_FILE_NAME: &str = "fallback.log";
pub const DEFAULT_SAVE_DIR: &str = "downloads";
pub const DEFAULT_ARCHIVE_NAME: &str = "images.zip";
pub const DEFAULT_SELECTION: &str = "all";
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

pub mod network {
    pub const DEFAULT_WORKERS: usize = 10;
    pub const DEFAULT_TIMEOUT_SECS: u64 = 20;
    pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
    pub const DEFAULT_MAX_RETRIES: u32 = 0;
    /// `USE_PROXY=true` 时使用的本地代理
    pub const DEFAULT_PROXY: &str = "http://127.0.0.1:1080";
    pub const USE_PROXY_ENV: &str = "USE_PROXY";
}

pub mod naming {
    /// 缺少建议名称时使用的占位名
    pub const DEFAULT_ALT_NAME: &str = "no_alt_name";
    /// 超过该字符数的名称视为可疑
    pub const SUSPICIOUS_NAME_CHARS: usize = 80;
    /// 归档内文件名主干的最大字符数
    pub const MAX_FILENAME_CHARS: usize = 100;
    pub const SUSPICIOUS_MARKERS: [&str; 3] = ["http:", "https:", ".php"];
}

pub mod media {
    pub const DEFAULT_EXTENSION: &str = ".jpg";
    pub const DEFAULT_CONTENT_TYPE: &str = "image/jpeg";
    pub const ARCHIVE_CONTENT_TYPE: &str = "application/zip";
    /// 会在真实文件名后追加缩放/版本路径段的图床
    pub const RESIZING_CDN_HOST: &str = "wikia.nocookie.net";
}
