//! Security Module
//!
//! Security features for the Mood Diary API:
//! - API key authentication
//! - Request validation
//! - Security headers middleware

pub mod auth;
pub mod middleware;
pub mod validation;

pub use auth::{ApiKeyAuth, Credentials};
pub use middleware::{api_key_middleware, security_headers_middleware};
pub use validation::ValidatedJson;
