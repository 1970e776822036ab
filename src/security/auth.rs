//! Authentication Module
//!
//! Bearer credential handling for the gateway:
//! - extraction from the Authorization header
//! - JWT payload decoding for the username and expiry

use chrono::{DateTime, TimeZone, Utc};
use jsonwebtoken::dangerous::insecure_decode;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Credentials extracted from a request
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    /// Bearer token (if provided)
    pub bearer: Option<String>,
}

impl Credentials {
    /// Create new credentials
    pub fn new(bearer: Option<String>) -> Self {
        Self { bearer }
    }

    /// Try to extract credentials from Authorization header
    pub fn from_authorization_header(auth_header: Option<&str>) -> Self {
        match auth_header {
            Some(header) => match header.split_once(' ') {
                Some((scheme, token))
                    if scheme.eq_ignore_ascii_case("bearer") && !token.trim().is_empty() =>
                {
                    Self::new(Some(token.trim().to_string()))
                }
                _ => Self::default(),
            },
            None => Self::default(),
        }
    }
}

/// JWT claims the gateway reads
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Subject (the username)
    pub sub: String,
    /// Token expiration timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
    /// Issued at timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
}

impl Claims {
    /// Expiry as a timestamp, if the token carries one
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp.and_then(|exp| Utc.timestamp_opt(exp, 0).single())
    }

    /// Check if claims are expired, allowing `leeway_secs` of clock skew
    pub fn is_expired(&self, leeway_secs: u64) -> bool {
        match self.exp {
            Some(exp) => Utc::now().timestamp() > exp.saturating_add(leeway_secs as i64),
            None => false,
        }
    }
}

/// Decodes bearer tokens issued by the journal API.
///
/// The gateway does not hold the signing key; the upstream API verifies the
/// signature on every forwarded call. Here the payload is only read so that
/// malformed or expired credentials are rejected before any upstream call.
#[derive(Debug, Clone)]
pub struct TokenDecoder {
    leeway_secs: u64,
}

impl TokenDecoder {
    pub fn new(leeway_secs: u64) -> Self {
        Self { leeway_secs }
    }

    /// Decode the token payload and check its expiry
    ///
    /// Any signing algorithm is accepted since the signature is never checked here.
    pub fn decode(&self, token: &str) -> Result<Claims> {
        let claims = insecure_decode::<Claims>(token)
            .map(|data| data.claims)
            .map_err(|e| AppError::Authentication(format!("Invalid JWT token: {}", e)))?;

        if claims.sub.trim().is_empty() {
            return Err(AppError::Authentication("JWT token has no subject".to_string()));
        }

        if claims.is_expired(self.leeway_secs) {
            return Err(AppError::Authentication("JWT token has expired".to_string()));
        }

        Ok(claims)
    }
}

impl Default for TokenDecoder {
    fn default() -> Self {
        Self::new(30)
    }
}
