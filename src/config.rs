// src/config.rs

pub mod file;

use self::file::{load_or_create_external_config, proxy_from_env};
use crate::{cli::Cli, constants, error::AppResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct NetworkConfig {
    pub max_workers: Option<usize>,
    pub connect_timeout_secs: Option<u64>,
    pub timeout_secs: Option<u64>,
    pub max_retries: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    pub send_referer: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ExternalConfig {
    #[serde(default)]
    pub network: NetworkConfig,
}

impl ExternalConfig {
    pub(crate) fn default_app_config() -> Self {
        // 为 NetworkConfig 提供一组稳健的默认值
        let network_config = NetworkConfig {
            max_workers: Some(constants::network::DEFAULT_WORKERS),
            connect_timeout_secs: Some(constants::network::DEFAULT_CONNECT_TIMEOUT_SECS),
            timeout_secs: Some(constants::network::DEFAULT_TIMEOUT_SECS),
            max_retries: Some(constants::network::DEFAULT_MAX_RETRIES),
            proxy: None,
            user_agent: None,
            send_referer: Some(true),
        };

        Self {
            network: network_config,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub max_workers: usize,
    pub user_agent: String,
    pub connect_timeout: Duration,
    pub timeout: Duration,
    pub max_retries: u32,
    pub proxy: Option<String>,
    pub send_referer: bool,
}

impl AppConfig {
    /// 合并三层配置: 内置默认值 < 配置文件 < 命令行参数。代理另有 `USE_PROXY`，优先级最低。
    pub fn new(args: &Cli) -> AppResult<Self> {
        let external_config = load_or_create_external_config()?;
        Ok(Self::merge(args, external_config.network, proxy_from_env()))
    }

    fn merge(args: &Cli, network: NetworkConfig, env_proxy: Option<String>) -> Self {
        let timeout_secs = args
            .timeout
            .or(network.timeout_secs)
            .unwrap_or(constants::network::DEFAULT_TIMEOUT_SECS);

        Self {
            max_workers: args
                .workers
                .or(network.max_workers)
                .unwrap_or(constants::network::DEFAULT_WORKERS)
                .max(1),
            user_agent: network
                .user_agent
                .filter(|ua| !ua.trim().is_empty())
                .unwrap_or_else(|| constants::USER_AGENT.into()),
            connect_timeout: Duration::from_secs(
                network
                    .connect_timeout_secs
                    .unwrap_or(constants::network::DEFAULT_CONNECT_TIMEOUT_SECS),
            ),
            timeout: Duration::from_secs(timeout_secs),
            max_retries: network
                .max_retries
                .unwrap_or(constants::network::DEFAULT_MAX_RETRIES),
            proxy: args
                .proxy
                .clone()
                .or(network.proxy)
                .or(env_proxy)
                .filter(|p| !p.trim().is_empty()),
            send_referer: network.send_referer.unwrap_or(true),
        }
    }
}

#[cfg(any(test, feature = "testing"))]
impl Default for AppConfig {
    fn default() -> Self {
        Self {
            max_workers: constants::network::DEFAULT_WORKERS,
            user_agent: "test-agent/1.0".to_string(),
            connect_timeout: Duration::from_secs(5),
            timeout: Duration::from_secs(5),
            max_retries: 0,
            proxy: None,
            send_referer: true,
        }
    }
}
