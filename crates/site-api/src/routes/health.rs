//! Unauthenticated health probes.

use axum::routing::get;
use axum::Router;

pub fn router() -> Router {
    Router::new().route("/health/liveness", get(liveness))
}

/// Liveness probe. Always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}
