//! Configuration loading contract
//!
//! Every Barista binary loads its configuration the same way: serialized
//! defaults, merged with an optional TOML file, merged with prefixed
//! environment variables. Concrete config types implement [`ConfigLoader`]
//! with figment to get that layering; the trait keeps the call sites
//! uniform across crates.

use std::path::{Path, PathBuf};

use crate::error::ConfigurationError;

/// Layered configuration loading for a config type `T`.
pub trait ConfigLoader<T> {
    /// Load from the default file location (if any) plus environment
    /// overrides, or from `path` when given.
    fn load(path: Option<PathBuf>) -> Result<T, ConfigurationError>;

    /// Load from a specific file plus environment overrides.
    fn load_from_file(path: &Path) -> Result<T, ConfigurationError>;

    /// Re-apply environment variables with the given prefix on top of an
    /// already-loaded configuration.
    fn apply_env_overrides(config: &mut T, prefix: &str) -> Result<(), ConfigurationError>;
}
