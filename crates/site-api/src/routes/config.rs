//! # Site Configuration Endpoints
//!
//! `GET /api/config` returns the validated configuration, `POST` replaces
//! the stored blob, `GET /api/config/themes` returns the resolved theme
//! set. Any other method answers 405 with the allowed list.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::Method;
use axum::middleware::from_fn;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use site_core::{SiteConfig, Timestamp};
use site_schema::ThemeSet;

use crate::auth;
use crate::error::ApiError;
use crate::extractors::extract_json;
use crate::response::ApiResponse;
use crate::state::{AppState, WriteValidation};
use crate::store::SITE_CONFIG_KEY;

const CONFIG_METHODS: &[Method] = &[Method::GET, Method::POST];
const THEMES_METHODS: &[Method] = &[Method::GET];

/// Build the config router. The bearer guard wraps `POST` only.
pub fn router() -> Router<AppState> {
    let write = post(update_config).route_layer(from_fn(auth::auth_middleware));
    Router::new()
        .route(
            "/api/config",
            get(read_config)
                .merge(write)
                .fallback(|method: Method| async move {
                    ApiError::method_not_allowed(method, CONFIG_METHODS)
                }),
        )
        .route(
            "/api/config/themes",
            get(read_themes).fallback(|method: Method| async move {
                ApiError::method_not_allowed(method, THEMES_METHODS)
            }),
        )
}

/// Receipt returned after a successful write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WriteReceipt {
    pub key: String,
    /// Whether the document went through the validating loader.
    pub validated: bool,
    pub bytes: usize,
    pub stored_at: Timestamp,
}

async fn read_config(State(state): State<AppState>) -> Result<ApiResponse<SiteConfig>, ApiError> {
    let config = state.load_config().await?;
    tracing::debug!(
        site = %config.site.site_name,
        pages = config.pages.len(),
        "serving site config"
    );
    Ok(ApiResponse::new(config))
}

async fn read_themes(State(state): State<AppState>) -> Result<ApiResponse<ThemeSet>, ApiError> {
    let config = state.load_config().await?;
    Ok(ApiResponse::new(ThemeSet::resolve(&config)))
}

async fn update_config(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<ApiResponse<WriteReceipt>, ApiError> {
    let document = extract_json(body)?;

    let validated = match state.config.write_validation {
        WriteValidation::Enforce => {
            state.loader().load(&document).map_err(|err| {
                tracing::warn!(kind = %err.kind(), error = %err, "site config write rejected");
                ApiError::from(err)
            })?;
            true
        }
        WriteValidation::RawOnly => {
            tracing::warn!("storing site config without validation (SITE_WRITE_VALIDATION=raw)");
            false
        }
    };

    let text = serde_json::to_string(&document).map_err(|e| ApiError::Internal(e.to_string()))?;
    let bytes = text.len();
    state.store_config(text).await?;
    tracing::info!(bytes, validated, "site config replaced");

    Ok(ApiResponse::new(WriteReceipt {
        key: SITE_CONFIG_KEY.to_string(),
        validated,
        bytes,
        stored_at: Timestamp::now(),
    }))
}
