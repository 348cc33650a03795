//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot find `{}` in the root of your directory", .0.display())]
    NotFound(PathBuf),

    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("config file parsing error")]
    Toml(#[from] toml::de::Error),

    #[error("your config file is missing the `meta` table")]
    MissingMeta,

    #[error(
        "your `meta` table is missing the following required fields: {}",
        fields.join(", ")
    )]
    MissingMetaFields { fields: Vec<&'static str> },

    #[error("config validation error: {0}")]
    Validation(String),
}
