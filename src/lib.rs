// src/lib.rs

pub mod cli;
pub mod client;
pub mod config;
pub mod constants;
pub mod downloader;
pub mod error;
pub mod extractor;
pub mod models;
pub mod symbols;
pub mod ui;
pub mod utils;
mod workflows;

use crate::{cli::Cli, client::RobustClient, config::AppConfig, error::AppResult};
use log::debug;
use std::sync::Arc;

/// 核心的执行上下文，包含所有任务所需的状态和工具
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<AppConfig>,
    pub http_client: Arc<RobustClient>,
    pub args: Arc<Cli>,
}

impl AppContext {
    pub fn new(args: Arc<Cli>, config: Arc<AppConfig>) -> AppResult<Self> {
        let http_client = Arc::new(RobustClient::new(config.clone())?);
        Ok(Self {
            config,
            http_client,
            args,
        })
    }
}

/// 库的公共入口点，由 `main.rs` 调用
pub async fn run_from_cli(args: Arc<Cli>) -> AppResult<()> {
    debug!("CLI 参数: {:?}", args);

    let config = Arc::new(AppConfig::new(&args)?);
    debug!("加载的应用配置: {:?}", config);

    let context = AppContext::new(args.clone(), config)?;

    if let Some(url) = &args.url {
        workflows::run_scrape(&context, url).await?;
    } else if let Some(batch_file) = &args.batch_file {
        workflows::run_batch_file(&context, batch_file).await?;
    } else if let Some(image) = &args.image {
        workflows::run_single_image(&context, image).await?;
    }

    Ok(())
}
