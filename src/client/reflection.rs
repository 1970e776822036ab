//! 反思生成服务客户端

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::client::{ensure_success, normalize_base_url};
use crate::config::config::ReflectionConfig;
use crate::error::Result;
use crate::security::Session;

const SERVICE: &str = "reflection service";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReflectionGenerator: Send + Sync {
    /// 根据提示词生成反思；服务未给出文本时返回 None
    async fn generate(&self, session: &Session, prompt: &str) -> Result<Option<String>>;
}

#[derive(Serialize)]
struct ReflectionRequest<'a> {
    prompt_text: &'a str,
}

#[derive(Deserialize)]
struct ReflectionResponse {
    #[serde(default)]
    reflection: Option<String>,
}

/// 基于 reqwest 的反思服务客户端
pub struct HttpReflectionClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpReflectionClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: normalize_base_url(base_url),
        })
    }

    pub fn from_config(config: &ReflectionConfig) -> Result<Self> {
        Self::new(&config.base_url, Duration::from_secs(config.timeout_secs.max(1)))
    }
}

#[async_trait]
impl ReflectionGenerator for HttpReflectionClient {
    async fn generate(&self, session: &Session, prompt: &str) -> Result<Option<String>> {
        debug!("Requesting reflection ({} chars of prompt)", prompt.len());
        let response = self
            .client
            .post(format!("{}/generate_reflection", self.base_url))
            .bearer_auth(session.bearer()?)
            .json(&ReflectionRequest { prompt_text: prompt })
            .send()
            .await?;

        let body: ReflectionResponse = ensure_success(SERVICE, response).await?.json().await?;
        Ok(body
            .reflection
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty()))
    }
}
