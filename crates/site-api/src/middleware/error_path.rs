//! # Error Path Echo
//!
//! [`ApiError`](crate::error::ApiError) responses carry their
//! [`ErrorBody`] in the response extensions. This middleware fills in the
//! request path and re-renders the body, so handlers, guards and method
//! fallbacks never thread the path through themselves.

use axum::body::Body;
use axum::extract::Request;
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;

use crate::error::ErrorBody;

pub async fn echo_request_path(request: Request, next: Next) -> Response {
    let path = request.uri().path().to_string();
    let response = next.run(request).await;

    let (mut parts, body) = response.into_parts();
    let Some(mut envelope) = parts.extensions.remove::<ErrorBody>() else {
        return Response::from_parts(parts, body);
    };
    envelope.path = Some(path);

    match serde_json::to_vec(&envelope) {
        Ok(bytes) => {
            parts.headers.remove(header::CONTENT_LENGTH);
            Response::from_parts(parts, Body::from(bytes))
        }
        Err(err) => {
            tracing::error!(error = %err, "failed to re-encode error envelope");
            Response::from_parts(parts, body)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use axum::http::{Method, Request, StatusCode};
    use axum::middleware::from_fn;
    use axum::routing::get;
    use axum::Router;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn test_app() -> Router {
        Router::new()
            .route("/ok", get(|| async { "fine" }))
            .route(
                "/missing",
                get(|| async { ApiError::NotFound("Widget".into()) }),
            )
            .route(
                "/only-post",
                axum::routing::post(|| async { "posted" })
                    .fallback(|method: Method| async move {
                        ApiError::method_not_allowed(method, &[Method::POST])
                    }),
            )
            .layer(from_fn(echo_request_path))
    }

    async fn get_body(uri: &str) -> (StatusCode, axum::body::Bytes) {
        let response = test_app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        (status, response.into_body().collect().await.unwrap().to_bytes())
    }

    #[tokio::test]
    async fn error_envelopes_gain_the_request_path() {
        let (status, bytes) = get_body("/missing").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["path"], "/missing");
        assert_eq!(body["message"], "Widget not found");
    }

    #[tokio::test]
    async fn method_fallback_errors_gain_the_request_path() {
        let (status, bytes) = get_body("/only-post").await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["path"], "/only-post");
        assert_eq!(body["code"], "METHOD_NOT_ALLOWED");
    }

    #[tokio::test]
    async fn successful_responses_pass_through() {
        let (status, bytes) = get_body("/ok").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(&bytes[..], b"fine");
    }
}
