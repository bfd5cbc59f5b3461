//! # site-api — Config-Serving HTTP Function
//!
//! Serves the site configuration document over HTTP. Every stored blob is
//! run through the validating loader before it is served, so clients only
//! ever receive a typed, schema-conformant configuration or a structured
//! error envelope.
//!
//! ## API Surface
//!
//! | Method | Path                  | Auth   | Result                          |
//! |--------|-----------------------|--------|---------------------------------|
//! | GET    | `/api/config`         | none   | validated `SiteConfig`          |
//! | POST   | `/api/config`         | bearer | replace stored blob             |
//! | GET    | `/api/config/themes`  | none   | resolved `ThemeSet`             |
//! | GET    | `/health/liveness`    | none   | `ok`                            |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! ErrorPath → TraceLayer → [POST only: Auth] → Handler
//! ```

pub mod auth;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod state;
pub mod store;

use axum::middleware::from_fn;
use axum::Router;

use crate::auth::AuthConfig;
use crate::error::ApiError;
use crate::state::AppState;

/// Assemble the full application router with all routes and middleware.
///
/// Health probes are mounted outside the trace layer and the auth guard.
pub fn app(state: AppState) -> Router {
    let auth_config = AuthConfig::new(state.config.auth_token.clone());

    let api = Router::new()
        .merge(routes::config::router())
        .layer(middleware::tracing_layer::layer())
        .layer(axum::Extension(auth_config))
        .with_state(state);

    Router::new()
        .merge(routes::health::router())
        .merge(api)
        .fallback(not_found)
        .layer(from_fn(middleware::error_path::echo_request_path))
}

async fn not_found() -> ApiError {
    ApiError::NotFound("Route".to_string())
}
