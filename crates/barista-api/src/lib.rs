//! # Barista API
//!
//! A drinks catalog HTTP service parameterized by a single immutable
//! environment configuration record.
//!
//! ## Features
//!
//! - **Environment record**: `production` flag, API server URL, and auth
//!   provider settings (domain, audience, client id, callback URL), loaded
//!   once at startup and shared immutably
//! - **Authentication**: RS256 bearer tokens verified against the auth
//!   provider's JWKS endpoint, with per-route permission checks
//! - **Drink catalog**: public short-form listing plus permission-guarded
//!   detail, create, update, and delete operations
//! - **Persistence**: SQLite-backed drink store
//! - **OpenAPI documentation**: Swagger UI served outside production mode

pub mod api;
pub mod config;
pub mod error;
pub mod persistence;
pub mod server;

// Re-export commonly used types
pub use config::{Config, Environment};
pub use error::{ApiError, Result};
pub use server::Server;

/// Version of the barista-api crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
