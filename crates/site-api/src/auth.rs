//! # Bearer Token Guard
//!
//! Protects the write path. When a token is configured, requests must
//! carry `Authorization: Bearer <token>`; when none is configured the
//! guard lets every request through.

use axum::extract::Request;
use axum::http::header;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use subtle::ConstantTimeEq;

use crate::error::ApiError;

/// Auth configuration injected into request extensions.
///
/// Custom `Debug` redacts the token value to prevent credential leakage in logs.
#[derive(Clone, Default)]
pub struct AuthConfig {
    pub token: Option<String>,
}

impl AuthConfig {
    pub fn new(token: Option<String>) -> Self {
        Self { token }
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Constant-time comparison of bearer tokens.
///
/// When lengths differ a dummy comparison still runs so the early return
/// does not reveal how far the prefix matched.
fn constant_time_token_eq(provided: &str, expected: &str) -> bool {
    let provided = provided.as_bytes();
    let expected = expected.as_bytes();
    if provided.len() != expected.len() {
        let _ = expected.ct_eq(expected);
        return false;
    }
    provided.ct_eq(expected).into()
}

/// Check an `Authorization` header value against the expected token.
pub fn check_bearer(header_value: Option<&str>, expected: &str) -> Result<(), ApiError> {
    match header_value {
        None => Err(ApiError::Unauthorized),
        Some(value) => match value.strip_prefix("Bearer ") {
            Some(provided) if constant_time_token_eq(provided.trim(), expected) => Ok(()),
            _ => Err(ApiError::InvalidToken),
        },
    }
}

/// Middleware rejecting requests without the configured bearer token.
pub async fn auth_middleware(request: Request, next: Next) -> Response {
    let expected = request
        .extensions()
        .get::<AuthConfig>()
        .and_then(|config| config.token.clone());

    let Some(expected) = expected else {
        return next.run(request).await;
    };

    let header_value = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    match check_bearer(header_value, &expected) {
        Ok(()) => next.run(request).await,
        Err(err) => {
            tracing::warn!(
                method = %request.method(),
                path = %request.uri().path(),
                code = %err.code(),
                "write rejected: authentication failed"
            );
            err.into_response()
        }
    }
}
