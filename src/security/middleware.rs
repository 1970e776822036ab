//! Security Middleware Module
//!
//! Axum middleware for credential gating and security headers.

use axum::{
    body::Body,
    extract::{Request, State},
    http::{StatusCode, header},
    middleware::Next,
    response::Response,
};
use std::result::Result as StdResult;
use tracing::warn;

use crate::api::app_state::AppState;
use crate::error::AppError;
use crate::security::auth::Credentials;
use crate::security::session::Session;

/// Extension trait for reading the session from request extensions
pub trait RequestSessionExt {
    fn session(&self) -> Option<&Session>;
    fn set_session(&mut self, session: Session);
}

impl RequestSessionExt for Request<Body> {
    fn session(&self) -> Option<&Session> {
        self.extensions().get::<Session>()
    }

    fn set_session(&mut self, session: Session) {
        self.extensions_mut().insert(session);
    }
}

/// Session middleware
///
/// Rejects requests without a decodable, unexpired bearer token with 401
/// before any upstream call, otherwise attaches a `Session` extension.
pub async fn session_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> StdResult<Response, AppError> {
    let credentials = extract_credentials(&req);

    let session = credentials
        .bearer
        .ok_or_else(|| AppError::Authentication("No bearer token provided".to_string()))
        .and_then(|token| Session::establish(&token, &state.token_decoder));

    match session {
        Ok(session) => {
            req.set_session(session);
            Ok(next.run(req).await)
        }
        Err(e) => {
            state.metrics.record_rejected_session();
            warn!("Rejected request to {}: {}", req.uri().path(), e);
            Err(e)
        }
    }
}

/// Extract credentials from request headers
fn extract_credentials(req: &Request<Body>) -> Credentials {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    Credentials::from_authorization_header(auth_header)
}

/// Security headers middleware
pub async fn security_headers_middleware(
    req: Request<Body>,
    next: Next,
) -> StdResult<Response, StatusCode> {
    let mut response = next.run(req).await;
    let headers = response.headers_mut();

    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        header::HeaderValue::from_static("nosniff"),
    );
    headers.insert(
        header::X_FRAME_OPTIONS,
        header::HeaderValue::from_static("DENY"),
    );
    headers.insert(
        header::REFERRER_POLICY,
        header::HeaderValue::from_static("strict-origin-when-cross-origin"),
    );
    headers.insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );

    Ok(response)
}
