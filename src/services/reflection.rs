//! 每日反思服务
//!
//! 为最新条目生成一两句反思。生成失败不影响请求，只返回兜底文案；
//! 凭证被拒绝时仍按认证错误处理。

use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

use crate::client::ReflectionGenerator;
use crate::error::Result;
use crate::insights::reflection_prompt;
use crate::models::JournalEntry;
use crate::security::Session;

/// 尚无条目时的提示
pub const NO_ENTRY_MESSAGE: &str = "Journal an entry today to get your daily reflection!";
/// 生成失败时的兜底文案
pub const FALLBACK_MESSAGE: &str = "Couldn't generate a reflection today. Keep journaling!";
/// 生成失败时的错误说明
pub const FAILURE_MESSAGE: &str = "Failed to generate reflection.";

/// 反思结果
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Reflection {
    /// 展示文本
    pub text: String,
    /// 是否由服务生成
    pub generated: bool,
    /// 失败说明
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Reflection {
    fn generated(text: String) -> Self {
        Self {
            text,
            generated: true,
            error: None,
        }
    }

    fn placeholder(text: &str) -> Self {
        Self {
            text: text.to_string(),
            generated: false,
            error: None,
        }
    }

    fn failed() -> Self {
        Self {
            text: FALLBACK_MESSAGE.to_string(),
            generated: false,
            error: Some(FAILURE_MESSAGE.to_string()),
        }
    }
}

/// 反思服务
pub struct ReflectionService {
    generator: Arc<dyn ReflectionGenerator>,
    enabled: bool,
}

impl ReflectionService {
    pub fn new(generator: Arc<dyn ReflectionGenerator>, enabled: bool) -> Self {
        Self { generator, enabled }
    }

    /// 为条目生成反思
    pub async fn reflect(&self, session: &Session, latest: Option<&JournalEntry>) -> Result<Reflection> {
        let Some(prompt) = latest.and_then(reflection_prompt) else {
            return Ok(Reflection::placeholder(NO_ENTRY_MESSAGE));
        };

        if !self.enabled {
            return Ok(Reflection::placeholder(FALLBACK_MESSAGE));
        }

        match session.guard(self.generator.generate(session, &prompt).await) {
            Ok(Some(text)) => {
                info!("Reflection generated ({} chars)", text.len());
                Ok(Reflection::generated(text))
            }
            Ok(None) => Ok(Reflection::placeholder(FALLBACK_MESSAGE)),
            Err(e) if e.is_authentication() => Err(e),
            Err(e) => {
                warn!("Reflection generation failed: {}", e);
                Ok(Reflection::failed())
            }
        }
    }
}

/// 创建反思服务
pub fn create_reflection_service(
    generator: Arc<dyn ReflectionGenerator>,
    enabled: bool,
) -> ReflectionService {
    ReflectionService::new(generator, enabled)
}
