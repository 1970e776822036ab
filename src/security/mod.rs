//! Security Module
//!
//! Credential handling for the gateway:
//! - Bearer extraction and JWT payload decoding
//! - Request-scoped sessions
//! - Security middleware

pub mod auth;
pub mod middleware;
pub mod session;


pub use auth::{Claims, Credentials, TokenDecoder};
pub use session::Session;
