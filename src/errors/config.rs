// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::path::PathBuf;

use thiserror::Error;

use crate::errors::{ConstructionError, RegistryError};

/// Errors raised while loading a graph description and building it.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported graph description format '{path}': expected .yaml, .yml, .toml or .json")]
    UnsupportedFormat { path: PathBuf },

    #[error("Invalid YAML graph description: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid TOML graph description: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid JSON graph description: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Construction(#[from] ConstructionError),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}
