//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Maps loader and store failures to HTTP status codes and the shared
//! error envelope. Never exposes internal error details in responses.

use std::fmt;

use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use site_core::Timestamp;
use site_schema::{LoadError, Violations};
use thiserror::Error;

use crate::store::StoreError;

/// Machine-readable error kinds carried in the envelope's `code` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Authentication
    Unauthorized,
    InvalidToken,
    TokenExpired,
    // Authorization
    Forbidden,
    InsufficientPermissions,
    // Validation
    ValidationFailed,
    InvalidRequest,
    MissingRequiredField,
    MalformedInput,
    UnrecognizedVariant,
    // Resources
    NotFound,
    AlreadyExists,
    Conflict,
    RateLimitExceeded,
    // Server
    InternalError,
    DatabaseError,
    ServiceUnavailable,
    ConfigurationError,
    NetworkError,
    MethodNotAllowed,
}

impl ErrorCode {
    pub const ALL: &'static [ErrorCode] = &[
        ErrorCode::Unauthorized,
        ErrorCode::InvalidToken,
        ErrorCode::TokenExpired,
        ErrorCode::Forbidden,
        ErrorCode::InsufficientPermissions,
        ErrorCode::ValidationFailed,
        ErrorCode::InvalidRequest,
        ErrorCode::MissingRequiredField,
        ErrorCode::MalformedInput,
        ErrorCode::UnrecognizedVariant,
        ErrorCode::NotFound,
        ErrorCode::AlreadyExists,
        ErrorCode::Conflict,
        ErrorCode::RateLimitExceeded,
        ErrorCode::InternalError,
        ErrorCode::DatabaseError,
        ErrorCode::ServiceUnavailable,
        ErrorCode::ConfigurationError,
        ErrorCode::NetworkError,
        ErrorCode::MethodNotAllowed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::Forbidden => "FORBIDDEN",
            Self::InsufficientPermissions => "INSUFFICIENT_PERMISSIONS",
            Self::ValidationFailed => "VALIDATION_FAILED",
            Self::InvalidRequest => "INVALID_REQUEST",
            Self::MissingRequiredField => "MISSING_REQUIRED_FIELD",
            Self::MalformedInput => "MALFORMED_INPUT",
            Self::UnrecognizedVariant => "UNRECOGNIZED_VARIANT",
            Self::NotFound => "NOT_FOUND",
            Self::AlreadyExists => "ALREADY_EXISTS",
            Self::Conflict => "CONFLICT",
            Self::RateLimitExceeded => "RATE_LIMIT_EXCEEDED",
            Self::InternalError => "INTERNAL_ERROR",
            Self::DatabaseError => "DATABASE_ERROR",
            Self::ServiceUnavailable => "SERVICE_UNAVAILABLE",
            Self::ConfigurationError => "CONFIGURATION_ERROR",
            Self::NetworkError => "NETWORK_ERROR",
            Self::MethodNotAllowed => "METHOD_NOT_ALLOWED",
        }
    }

    /// HTTP status for this kind.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized | Self::InvalidToken | Self::TokenExpired => StatusCode::UNAUTHORIZED,
            Self::Forbidden | Self::InsufficientPermissions => StatusCode::FORBIDDEN,
            Self::ValidationFailed
            | Self::InvalidRequest
            | Self::MissingRequiredField
            | Self::MalformedInput
            | Self::UnrecognizedVariant => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::AlreadyExists | Self::Conflict => StatusCode::CONFLICT,
            Self::RateLimitExceeded => StatusCode::TOO_MANY_REQUESTS,
            Self::InternalError | Self::DatabaseError | Self::ConfigurationError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::NetworkError => StatusCode::BAD_GATEWAY,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error envelope returned by every failing endpoint.
///
/// `details` carries the failure list for validation errors and is omitted
/// for 500-class errors. `path` is filled in by
/// [`crate::middleware::error_path`] once the request path is known.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub ok: bool,
    pub code: ErrorCode,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    pub timestamp: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Resource not found (404).
    #[error("{0} not found")]
    NotFound(String),

    /// Request body or stored blob is not a JSON object (400).
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// Document violates the schema (400).
    #[error("validation failed: {0}")]
    Validation(Violations),

    /// Request is well-formed but not acceptable (400).
    #[error("{0}")]
    InvalidRequest(String),

    /// No credentials supplied (401).
    #[error("Authentication required")]
    Unauthorized,

    /// Credentials supplied but rejected (401).
    #[error("Invalid authentication token")]
    InvalidToken,

    /// Route exists but not for this method (405).
    #[error("Method {method} not allowed")]
    MethodNotAllowed { method: Method, allowed: Vec<Method> },

    /// Blob store failure (500). Logged, never returned.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Server misconfiguration such as an uncompilable schema (500).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Internal server error (500). Message is logged but not returned to client.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn method_not_allowed(method: Method, allowed: &[Method]) -> Self {
        Self::MethodNotAllowed {
            method,
            allowed: allowed.to_vec(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::NotFound(_) => ErrorCode::NotFound,
            Self::MalformedInput(_) => ErrorCode::MalformedInput,
            // Unknown section types are reported per error via `kind`.
            Self::Validation(_) => ErrorCode::ValidationFailed,
            Self::InvalidRequest(_) => ErrorCode::InvalidRequest,
            Self::Unauthorized => ErrorCode::Unauthorized,
            Self::InvalidToken => ErrorCode::InvalidToken,
            Self::MethodNotAllowed { .. } => ErrorCode::MethodNotAllowed,
            Self::Store(_) => ErrorCode::DatabaseError,
            Self::Configuration(_) => ErrorCode::ConfigurationError,
            Self::Internal(_) => ErrorCode::InternalError,
        }
    }

    /// Return the HTTP status code and machine-readable error code for this error.
    fn status_and_code(&self) -> (StatusCode, ErrorCode) {
        let code = self.code();
        (code.status(), code)
    }

    fn client_message(&self) -> String {
        match self {
            Self::Validation(_) => "Validation failed".to_string(),
            Self::Store(_) => "Database operation failed".to_string(),
            Self::Configuration(_) => "A configuration error occurred".to_string(),
            Self::Internal(_) => "An internal error occurred".to_string(),
            other => other.to_string(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            Self::Validation(violations) => Some(json!({ "errors": violations })),
            Self::MethodNotAllowed { allowed, .. } => Some(json!({
                "allowedMethods": allowed.iter().map(Method::as_str).collect::<Vec<_>>()
            })),
            _ => None,
        }
    }

    /// Render the envelope body without a request path.
    pub fn to_body(&self) -> ErrorBody {
        ErrorBody {
            ok: false,
            code: self.code(),
            message: self.client_message(),
            details: self.details(),
            timestamp: Timestamp::now(),
            path: None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        if status.is_server_error() {
            tracing::error!(error = %self, code = %code, "internal server error");
        }

        let body = self.to_body();
        let mut response = (status, Json(body.clone())).into_response();

        if let Self::MethodNotAllowed { allowed, .. } = &self {
            let allow = allowed.iter().map(Method::as_str).collect::<Vec<_>>().join(", ");
            if let Ok(value) = HeaderValue::from_str(&allow) {
                response.headers_mut().insert(header::ALLOW, value);
            }
        }

        // Picked up by the path-echo middleware.
        response.extensions_mut().insert(body);
        response
    }
}

impl From<LoadError> for ApiError {
    fn from(err: LoadError) -> Self {
        match err {
            LoadError::MalformedInput { reason } => Self::MalformedInput(reason),
            LoadError::ValidationFailed { violations } => Self::Validation(violations),
            LoadError::Schema(err) => Self::Configuration(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use site_schema::{FieldPath, Violation};

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn status_mapping_by_family() {
        let cases = [
            (ErrorCode::ValidationFailed, 400),
            (ErrorCode::MalformedInput, 400),
            (ErrorCode::UnrecognizedVariant, 400),
            (ErrorCode::Unauthorized, 401),
            (ErrorCode::InvalidToken, 401),
            (ErrorCode::Forbidden, 403),
            (ErrorCode::NotFound, 404),
            (ErrorCode::MethodNotAllowed, 405),
            (ErrorCode::Conflict, 409),
            (ErrorCode::AlreadyExists, 409),
            (ErrorCode::RateLimitExceeded, 429),
            (ErrorCode::InternalError, 500),
            (ErrorCode::DatabaseError, 500),
            (ErrorCode::ConfigurationError, 500),
            (ErrorCode::ServiceUnavailable, 503),
        ];
        for (code, status) in cases {
            assert_eq!(code.status().as_u16(), status, "{code}");
        }
    }

    #[test]
    fn codes_serialize_as_their_wire_names() {
        for code in ErrorCode::ALL {
            let wire = serde_json::to_value(code).unwrap();
            assert_eq!(wire, code.as_str());
            let back: ErrorCode = serde_json::from_value(wire).unwrap();
            assert_eq!(&back, code);
        }
    }

    #[tokio::test]
    async fn unknown_section_types_stay_validation_failed() {
        let tag = FieldPath::root().key("pages").index(0).key("sections").index(0).key("type");
        let only = Violations::single(Violation::unrecognized_variant(tag.clone(), "unknown"));
        assert_eq!(ApiError::Validation(only.clone()).code(), ErrorCode::ValidationFailed);

        let body = body_json(ApiError::Validation(only).into_response()).await;
        assert_eq!(body["code"], "VALIDATION_FAILED");
        assert_eq!(body["details"]["errors"][0]["kind"], "UNRECOGNIZED_VARIANT");

        let mixed = Violations::collect(vec![
            Violation::unrecognized_variant(tag, "unknown"),
            Violation::new(FieldPath::root().key("site").key("siteName"), "is required"),
        ])
        .unwrap();
        let body = body_json(ApiError::Validation(mixed).into_response()).await;
        assert_eq!(body["code"], "VALIDATION_FAILED");
        assert_eq!(body["details"]["errors"][0]["kind"], "VALIDATION");
        assert_eq!(body["details"]["errors"][1]["kind"], "UNRECOGNIZED_VARIANT");
    }

    #[tokio::test]
    async fn validation_envelope_lists_errors() {
        let violations = Violations::single(Violation::new(
            FieldPath::root().key("site").key("siteName"),
            "is required",
        ));
        let response = ApiError::Validation(violations).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["ok"], false);
        assert_eq!(body["code"], "VALIDATION_FAILED");
        assert_eq!(body["message"], "Validation failed");
        assert_eq!(body["details"]["errors"][0]["path"], "site.siteName");
        assert_eq!(body["details"]["errors"][0]["message"], "is required");
        assert!(body["timestamp"].as_str().unwrap().ends_with('Z'));
        assert!(body.get("path").is_none());
    }

    #[tokio::test]
    async fn internal_errors_hide_their_cause() {
        let response = ApiError::Internal("db password rejected".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["code"], "INTERNAL_ERROR");
        assert_eq!(body["message"], "An internal error occurred");
        assert!(body.get("details").is_none());
    }

    #[tokio::test]
    async fn method_not_allowed_lists_allowed_methods() {
        let response =
            ApiError::method_not_allowed(Method::DELETE, &[Method::GET, Method::POST]).into_response();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers()[header::ALLOW], "GET, POST");
        let body = body_json(response).await;
        assert_eq!(body["message"], "Method DELETE not allowed");
        assert_eq!(body["details"]["allowedMethods"], json!(["GET", "POST"]));
    }

    #[test]
    fn load_errors_map_to_codes() {
        let err = ApiError::from(LoadError::MalformedInput {
            reason: "expected value".into(),
        });
        assert_eq!(err.code(), ErrorCode::MalformedInput);
        assert_eq!(ApiError::NotFound("Site configuration".into()).to_string(), "Site configuration not found");
    }

    #[test]
    fn envelope_deserializes() {
        let body = ApiError::Unauthorized.to_body();
        let text = serde_json::to_string(&body).unwrap();
        let back: ErrorBody = serde_json::from_str(&text).unwrap();
        assert_eq!(back, body);
    }
}
