//! API 模块
//!
//! 提供面向仪表盘的 REST API。

#[cfg(test)]
mod api_tests;
pub mod app_state;
pub mod dto;
pub mod handlers;
pub mod routes;

use crate::api::app_state::AppState;
use crate::config::config::SecurityConfig;
use crate::error::ErrorResponse;
use crate::observability::metrics_middleware;
use crate::security::middleware::{security_headers_middleware, session_middleware};
use axum::{
    Router,
    body::Body,
    extract::Request,
    http::{HeaderName, HeaderValue, Method, header},
    middleware::{self, Next},
    response::Response,
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::Instrument;

/// 请求 ID 响应头
pub const REQUEST_ID_HEADER: &str = "x-request-id";

pub fn create_router(app_state: AppState) -> Router {
    let api = Router::new()
        .merge(routes::entry_routes::create_entry_router())
        .merge(routes::insight_routes::create_insight_router())
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            session_middleware,
        ));

    Router::new()
        .nest("/api/v1", api)
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(middleware::from_fn_with_state(
            app_state.metrics.clone(),
            metrics_middleware,
        ))
        .layer(cors_layer(&app_state.config.security))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

/// 按配置的来源构建 CORS 层，无法解析的来源被忽略
pub fn cors_layer(config: &SecurityConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}

/// 透传或生成请求 ID
///
/// ID 写入响应头，错误响应体的 `request_id` 字段与之一致。
async fn request_id_middleware(req: Request, next: Next) -> Response {
    let request_id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    let span = tracing::info_span!("request", request_id = %request_id);
    let mut response = next.run(req).instrument(span).await;

    if let Some(error) = response.extensions_mut().remove::<ErrorResponse>() {
        match serde_json::to_vec(&error.with_request_id(&request_id)) {
            Ok(body) => {
                response.headers_mut().remove(header::CONTENT_LENGTH);
                *response.body_mut() = Body::from(body);
            }
            Err(e) => tracing::warn!("Failed to render error body: {}", e),
        }
    }

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response
            .headers_mut()
            .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
    }
    response
}
