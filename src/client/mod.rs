//! 上游服务客户端
//!
//! 日记服务与反思服务都是外部黑盒，这里只负责 HTTP 调用与状态码映射。

pub mod journal_api;
pub mod reflection;

pub use journal_api::{DateRange, HttpJournalApi, JournalApi, validate_entry_id};
pub use reflection::{HttpReflectionClient, ReflectionGenerator};

use reqwest::{Response, StatusCode};
use tracing::{error, warn};

use crate::error::{AppError, Result};

/// 将非成功状态码映射为应用错误
///
/// 401/403 视为凭证失效，调用方据此丢弃会话；其余状态不重试。
pub(crate) async fn ensure_success(service: &str, response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let detail = if body.is_empty() {
        status.to_string()
    } else {
        format!("{}: {}", status, body)
    };

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            warn!("{} rejected the credential ({})", service, status);
            Err(AppError::Authentication(format!("{} rejected the credential", service)))
        }
        StatusCode::NOT_FOUND => Err(AppError::NotFound(format!("{}: {}", service, detail))),
        StatusCode::BAD_REQUEST => Err(AppError::Validation(format!("{}: {}", service, detail))),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            Err(AppError::Timeout(format!("{}: {}", service, detail)))
        }
        _ => {
            error!("{} responded with {}", service, detail);
            Err(AppError::Upstream(format!("{} responded with {}", service, detail)))
        }
    }
}

/// 去掉基础地址末尾的斜杠
pub(crate) fn normalize_base_url(base_url: &str) -> String {
    base_url.trim_end_matches('/').to_string()
}
