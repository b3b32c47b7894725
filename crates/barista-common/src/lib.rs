//! # Barista Common
//!
//! Shared foundation for the Barista workspace crates: configuration
//! loading, error types, and logging initialization.

pub mod config;
pub mod error;
pub mod logging;

pub use config::ConfigLoader;
pub use error::{BaristaError, ConfigurationError};
