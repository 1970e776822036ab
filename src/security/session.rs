//! Session Module
//!
//! A `Session` holds the bearer credential for one request scope. It is
//! created by the session middleware, handed to services explicitly, and
//! invalidated when an upstream service rejects the credential.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::security::auth::{Claims, TokenDecoder};

#[derive(Default)]
struct SessionState {
    token: Option<String>,
    username: Option<String>,
    expires_at: Option<DateTime<Utc>>,
}

/// Credential context shared by everything handling one request
#[derive(Clone, Default)]
pub struct Session {
    state: Arc<RwLock<SessionState>>,
}

impl Session {
    /// An unauthenticated session
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Build an authenticated session from already decoded claims
    pub fn from_claims(token: impl Into<String>, claims: &Claims) -> Self {
        Self {
            state: Arc::new(RwLock::new(SessionState {
                token: Some(token.into()),
                username: Some(claims.sub.clone()),
                expires_at: claims.expires_at(),
            })),
        }
    }

    /// Decode the token and build an authenticated session
    pub fn establish(token: &str, decoder: &TokenDecoder) -> Result<Self> {
        let claims = decoder.decode(token)?;
        Ok(Self::from_claims(token, &claims))
    }

    /// The bearer token, or an authentication error if the session holds none
    pub fn bearer(&self) -> Result<String> {
        self.state
            .read()
            .token
            .clone()
            .ok_or_else(|| AppError::Authentication("Not authenticated".to_string()))
    }

    pub fn username(&self) -> Option<String> {
        self.state.read().username.clone()
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.state.read().expires_at
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.read().token.is_some()
    }

    /// Discard the credential; every clone observes the change
    pub fn invalidate(&self) {
        let mut state = self.state.write();
        if state.token.take().is_some() {
            tracing::warn!(
                username = state.username.as_deref().unwrap_or("-"),
                "Session credential discarded"
            );
        }
        state.username = None;
        state.expires_at = None;
    }

    /// Invalidate the session if `result` is an authentication failure
    pub fn guard<T>(&self, result: Result<T>) -> Result<T> {
        if let Err(ref e) = result {
            if e.is_authentication() {
                self.invalidate();
            }
        }
        result
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.read();
        f.debug_struct("Session")
            .field("username", &state.username)
            .field("authenticated", &state.token.is_some())
            .field("expires_at", &state.expires_at)
            .finish()
    }
}
