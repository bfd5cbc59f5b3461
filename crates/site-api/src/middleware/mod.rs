//! # Middleware
//!
//! - [`tracing_layer`]: request spans via `tower_http::trace::TraceLayer`.
//! - [`error_path`]: echoes the request path into error envelopes.

pub mod error_path;
pub mod tracing_layer;
