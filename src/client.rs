// src/client.rs

use crate::{config::AppConfig, error::*};
use anyhow::Context;
use log::debug;
use reqwest::{IntoUrl, Response, header};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use std::sync::Arc;
use url::Url;

#[derive(Clone)]
pub struct RobustClient {
    pub client: ClientWithMiddleware,
    config: Arc<AppConfig>,
}

impl RobustClient {
    pub fn new(config: Arc<AppConfig>) -> AppResult<Self> {
        let retry_policy =
            ExponentialBackoff::builder().build_with_max_retries(config.max_retries);

        let mut builder = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .connect_timeout(config.connect_timeout)
            .timeout(config.timeout)
            .pool_max_idle_per_host(config.max_workers.saturating_mul(3));
        if let Some(proxy_url) = &config.proxy {
            debug!("使用网络代理: {}", proxy_url);
            builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
        }
        let inner = builder.build().context("创建 HTTP 客户端失败")?;

        let client = ClientBuilder::new(inner)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self { client, config })
    }

    /// 获取网页。非 2xx 状态视为错误。
    pub async fn get<T: IntoUrl>(&self, url: T) -> AppResult<Response> {
        let res = self.client.get(url).send().await?;
        Self::ensure_success(res)
    }

    /// 获取图片。按配置附加由图片自身 scheme+host 推导出的 Referer。
    pub async fn get_image(&self, url: &Url) -> AppResult<Response> {
        let mut request = self.client.get(url.clone());
        if self.config.send_referer
            && let Some(referer) = referer_for(url)
        {
            request = request.header(header::REFERER, referer);
        }
        let res = request.send().await?;
        Self::ensure_success(res)
    }

    fn ensure_success(res: Response) -> AppResult<Response> {
        let status = res.status();
        if !status.is_success() {
            return Err(AppError::HttpStatus {
                url: res.url().to_string(),
                status,
            });
        }
        Ok(res)
    }
}

/// 例如 `https://cdn.example.com:8443/a/b.png` -> `https://cdn.example.com:8443/`
pub fn referer_for(url: &Url) -> Option<String> {
    let origin = url.origin();
    origin
        .is_tuple()
        .then(|| format!("{}/", origin.ascii_serialization()))
}
