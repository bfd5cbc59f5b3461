//! # Application State
//!
//! Shared state passed to every handler: the blob store, the compiled
//! schema registry, and startup configuration read once from the
//! environment.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use site_core::SiteConfig;
use site_schema::{LoadError, Loader, SchemaError, SchemaRegistry};
use thiserror::Error;

use crate::error::ApiError;
use crate::store::{BlobStore, StoreError, SITE_CONFIG_KEY};

/// Whether `POST /api/config` runs the validating loader before storing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WriteValidation {
    /// Reject structurally invalid documents with `VALIDATION_FAILED`.
    #[default]
    Enforce,
    /// Store any syntactically valid JSON; validation happens on read only.
    RawOnly,
}

impl WriteValidation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Enforce => "enforce",
            Self::RawOnly => "raw",
        }
    }
}

impl fmt::Display for WriteValidation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WriteValidation {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "enforce" => Ok(Self::Enforce),
            "raw" => Ok(Self::RawOnly),
            other => Err(ConfigError::Invalid {
                var: "SITE_WRITE_VALIDATION",
                value: other.to_string(),
                expected: "one of {enforce, raw}",
            }),
        }
    }
}

/// Startup configuration errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var}={value:?} is invalid: expected {expected}")]
    Invalid {
        var: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Application configuration.
///
/// Custom `Debug` redacts the auth token to prevent credential leakage in logs.
#[derive(Clone)]
pub struct AppConfig {
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// Bearer token guarding the write path. `None` leaves writes open.
    pub auth_token: Option<String>,
    /// Directory for the file-backed store. `None` keeps blobs in memory.
    pub store_dir: Option<PathBuf>,
    /// JSON document loaded into an empty store at startup.
    pub seed_path: Option<PathBuf>,
    pub write_validation: WriteValidation,
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("port", &self.port)
            .field("auth_token", &self.auth_token.as_ref().map(|_| "[REDACTED]"))
            .field("store_dir", &self.store_dir)
            .field("seed_path", &self.seed_path)
            .field("write_validation", &self.write_validation)
            .finish()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            auth_token: None,
            store_dir: None,
            seed_path: None,
            write_validation: WriteValidation::Enforce,
        }
    }
}

impl AppConfig {
    /// Read `PORT`, `AUTH_TOKEN`, `SITE_STORE_DIR`, `SITE_CONFIG_SEED` and
    /// `SITE_WRITE_VALIDATION` from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let port = match var("PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| ConfigError::Invalid {
                var: "PORT",
                value: raw,
                expected: "a TCP port number",
            })?,
            None => defaults.port,
        };
        let write_validation = match var("SITE_WRITE_VALIDATION") {
            Some(raw) => raw.parse()?,
            None => defaults.write_validation,
        };

        Ok(Self {
            port,
            auth_token: var("AUTH_TOKEN"),
            store_dir: var("SITE_STORE_DIR").map(PathBuf::from),
            seed_path: var("SITE_CONFIG_SEED").map(PathBuf::from),
            write_validation,
        })
    }
}

/// Failures while seeding the store at startup.
#[derive(Error, Debug)]
pub enum SeedError {
    #[error("seed document rejected: {0}")]
    Load(#[from] LoadError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Shared application state, cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn BlobStore>,
    pub registry: Arc<SchemaRegistry>,
    pub config: AppConfig,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("store", &self.store)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Compile the schema registry and wrap `store`.
    pub fn new(config: AppConfig, store: Arc<dyn BlobStore>) -> Result<Self, SchemaError> {
        Ok(Self {
            store,
            registry: Arc::new(SchemaRegistry::new()?),
            config,
        })
    }

    pub fn loader(&self) -> Loader<'_> {
        Loader::new(&self.registry)
    }

    /// Run a store call on the blocking pool.
    async fn with_store<T, F>(&self, call: F) -> Result<T, ApiError>
    where
        T: Send + 'static,
        F: FnOnce(&dyn BlobStore) -> Result<T, StoreError> + Send + 'static,
    {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || call(store.as_ref()))
            .await
            .map_err(|e| ApiError::Internal(format!("store task failed: {e}")))?
            .map_err(ApiError::from)
    }

    /// Replace the stored site configuration blob.
    pub async fn store_config(&self, raw: String) -> Result<(), ApiError> {
        self.with_store(move |store| store.set(SITE_CONFIG_KEY, &raw))
            .await
    }

    /// Load and validate the stored site configuration.
    pub async fn load_config(&self) -> Result<SiteConfig, ApiError> {
        let raw = self
            .with_store(|store| store.get(SITE_CONFIG_KEY))
            .await?
            .ok_or_else(|| ApiError::NotFound("Site configuration".to_string()))?;
        self.loader().load_str(&raw).map_err(|err| {
            tracing::warn!(kind = %err.kind(), error = %err, "stored site config failed validation");
            ApiError::from(err)
        })
    }

    /// Store `raw` under the config key unless the store already holds a
    /// document. Returns whether the seed was written.
    pub fn seed(&self, raw: &str) -> Result<bool, SeedError> {
        if self.store.get(SITE_CONFIG_KEY)?.is_some() {
            return Ok(false);
        }
        let config = self.loader().load_str(raw)?;
        self.store.set(SITE_CONFIG_KEY, raw)?;
        tracing::info!(
            site = %config.site.site_name,
            pages = config.pages.len(),
            "seeded config store"
        );
        Ok(true)
    }
}
