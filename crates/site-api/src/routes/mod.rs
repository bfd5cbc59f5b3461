//! # Route Modules
//!
//! | Path                  | Module       |
//! |-----------------------|--------------|
//! | `/api/config`         | [`config`]   |
//! | `/api/config/themes`  | [`config`]   |
//! | `/health/liveness`    | [`health`]   |

pub mod config;
pub mod health;
