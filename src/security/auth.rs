//! Authentication Module
//!
//! Single-user API key authentication. An empty configured key disables the check.

use axum::http::{HeaderMap, header};

use crate::error::{AppError, Result};

/// Credentials extracted from a request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Credentials {
    /// API key (if provided)
    pub api_key: Option<String>,
}

impl Credentials {
    pub fn new(api_key: Option<String>) -> Self {
        Self { api_key }
    }

    /// Try to extract credentials from an Authorization header value
    pub fn from_authorization_header(auth_header: Option<&str>) -> Self {
        match auth_header {
            Some(header) => header
                .strip_prefix("ApiKey ")
                .or_else(|| header.strip_prefix("Bearer "))
                .map(|key| Self::new(Some(key.trim().to_string())))
                .unwrap_or_default(),
            None => Self::default(),
        }
    }

    /// `Authorization` takes precedence over `X-API-Key`
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let from_auth = Self::from_authorization_header(
            headers
                .get(header::AUTHORIZATION)
                .and_then(|h| h.to_str().ok()),
        );
        if from_auth.api_key.is_some() {
            return from_auth;
        }

        Self::new(
            headers
                .get("X-API-Key")
                .and_then(|h| h.to_str().ok())
                .map(str::to_string),
        )
    }
}

/// API key authenticator
#[derive(Debug, Clone, Default)]
pub struct ApiKeyAuth {
    key: Option<String>,
}

impl ApiKeyAuth {
    pub fn new(key: &str) -> Self {
        Self {
            key: (!key.is_empty()).then(|| key.to_string()),
        }
    }

    /// Authenticator that accepts every request
    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn is_enabled(&self) -> bool {
        self.key.is_some()
    }

    pub fn authenticate(&self, credentials: &Credentials) -> Result<()> {
        let Some(expected) = &self.key else {
            return Ok(());
        };

        match &credentials.api_key {
            Some(provided) if constant_time_eq(provided, expected) => Ok(()),
            Some(_) => Err(AppError::Authentication("Invalid API key".to_string())),
            None => Err(AppError::Authentication("Missing API key".to_string())),
        }
    }
}

/// 逐字节比较，耗时与首个不同字节的位置无关
fn constant_time_eq(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    a.bytes()
        .zip(b.bytes())
        .fold(0u8, |diff, (x, y)| diff | (x ^ y))
        == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_credentials_from_authorization_header() {
        assert_eq!(
            Credentials::from_authorization_header(Some("ApiKey secret")).api_key,
            Some("secret".to_string())
        );
        assert_eq!(
            Credentials::from_authorization_header(Some("Bearer secret")).api_key,
            Some("secret".to_string())
        );
        assert!(
            Credentials::from_authorization_header(Some("Basic abc"))
                .api_key
                .is_none()
        );
        assert!(Credentials::from_authorization_header(None).api_key.is_none());
    }

    #[test]
    fn test_credentials_from_x_api_key() {
        let mut headers = HeaderMap::new();
        headers.insert("X-API-Key", HeaderValue::from_static("secret"));
        assert_eq!(
            Credentials::from_headers(&headers).api_key,
            Some("secret".to_string())
        );
    }

    #[test]
    fn test_authenticate() {
        let auth = ApiKeyAuth::new("secret");
        assert!(auth.is_enabled());
        assert!(auth.authenticate(&Credentials::new(Some("secret".into()))).is_ok());
        assert!(matches!(
            auth.authenticate(&Credentials::new(Some("wrong".into()))),
            Err(AppError::Authentication(_))
        ));
        assert!(matches!(
            auth.authenticate(&Credentials::default()),
            Err(AppError::Authentication(_))
        ));
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq("secret", "secret"));
        assert!(!constant_time_eq("secret", "secreT"));
        assert!(!constant_time_eq("secret", "secret2"));
        assert!(!constant_time_eq("", "secret"));
        assert!(ApiKeyAuth::new("secret")
            .authenticate(&Credentials::new(Some("secrex".into())))
            .is_err());
    }

    #[test]
    fn test_disabled_accepts_everything() {
        let auth = ApiKeyAuth::new("");
        assert!(!auth.is_enabled());
        assert!(auth.authenticate(&Credentials::default()).is_ok());
        assert!(ApiKeyAuth::disabled().authenticate(&Credentials::default()).is_ok());
    }
}
