//! Request body extraction helpers.

use axum::extract::rejection::JsonRejection;
use axum::Json;

use crate::error::ApiError;

/// Extract a JSON body, mapping any rejection to [`ApiError::MalformedInput`].
///
/// Handlers take `Result<Json<T>, JsonRejection>` so a missing content type
/// or unparseable body answers with the shared envelope rather than axum's
/// plain-text rejection.
pub fn extract_json<T>(result: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    result
        .map(|Json(v)| v)
        .map_err(|err| ApiError::MalformedInput(err.body_text()))
}
