// src/cli.rs

use crate::constants;
use clap::{Parser, ValueEnum, command, crate_version};
use std::path::PathBuf;

/// 定义日志输出级别
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

// command 属性
#[derive(Parser, Debug, Clone)]
#[command(
    version = crate_version!(),
    about,
    long_about = None,
    arg_required_else_help = true,
    disable_help_flag = true,
    disable_version_flag = true,
)]
#[command(group(
    clap::ArgGroup::new("mode")
        .required(true)
        .args(&["url", "batch_file", "image"]),
))]
pub struct Cli {
    // --- 运行模式 (Mode) ---
    /// 抓取指定网页中的所有图片
    #[arg(long, help_heading = "Mode")]
    pub url: Option<String>,
    /// 从 JSON 文件批量下载图片 (格式: [{"src": "...", "alt": "..."}])
    #[arg(short, long, value_name = "FILE", help_heading = "Mode")]
    pub batch_file: Option<PathBuf>,
    /// 直接下载单张图片
    #[arg(long, value_name = "IMAGE_URL", help_heading = "Mode")]
    pub image: Option<String>,

    // --- 下载选项 (Options) ---
    /// [单图模式] 图片的建议文件名
    #[arg(long, requires = "image", help_heading = "Options")]
    pub name: Option<String>,
    /// 启动交互式选择菜单
    #[arg(short, long, action = clap::ArgAction::SetTrue, help_heading = "Options")]
    pub interactive: bool,
    /// [非交互模式] 指定下载项 (例如 '1-5,8', 'all')
    #[arg(long, default_value_t = constants::DEFAULT_SELECTION.to_string(), value_name = "SELECTION", help_heading = "Options")]
    pub select: String,
    /// 只列出网页中的图片，不下载
    #[arg(long, action = clap::ArgAction::SetTrue, requires = "url", help_heading = "Options")]
    pub list: bool,
    /// 以 JSON 格式输出图片列表
    #[arg(long, action = clap::ArgAction::SetTrue, help_heading = "Options")]
    pub json: bool,
    /// 逐个保存图片文件，而不是打包为一个 ZIP 归档
    #[arg(long, action = clap::ArgAction::SetTrue, help_heading = "Options")]
    pub separate: bool,
    /// ZIP 归档的文件名
    #[arg(long, default_value_t = constants::DEFAULT_ARCHIVE_NAME.to_string(), value_name = "NAME", help_heading = "Options")]
    pub archive_name: String,
    /// 设置最大并发下载数
    #[arg(short, long, value_parser = clap::value_parser!(usize), help_heading = "Options")]
    pub workers: Option<usize>,
    /// 单个请求的超时时间 (秒)
    #[arg(long, value_name = "SECS", help_heading = "Options")]
    pub timeout: Option<u64>,
    /// 使用网络代理 (例如 'http://127.0.0.1:1080')
    #[arg(long, value_name = "PROXY_URL", help_heading = "Options")]
    pub proxy: Option<String>,
    /// 设置文件保存目录
    #[arg(short, long, value_name = "DIR", default_value_os_t = PathBuf::from(constants::DEFAULT_SAVE_DIR), help_heading = "Options")]
    pub output: PathBuf,

    // --- 通用选项 (General) ---
    /// 显示此帮助信息并退出
    #[arg(short = 'h', long, action = clap::ArgAction::Help, global = true, help_heading = "General")]
    _help: Option<bool>,
    /// 显示版本信息并退出
    #[arg(short = 'V', long, action = clap::ArgAction::Version, global = true, help_heading = "General")]
    _version: Option<bool>,
    /// (隐藏参数) 设置日志文件的输出级别，用于调试
    #[arg(long, value_enum, default_value_t = LogLevel::Off, global = true, hide = true)]
    pub log_level: LogLevel,
}
