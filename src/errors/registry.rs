// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors for pass type registration, pass creation and graph registration.

use thiserror::Error;

use crate::errors::ValidationError;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistryError {
    /// A pass type with this name is already registered
    #[error("Pass type '{type_name}' is already registered")]
    DuplicateType { type_name: String },

    /// No factory is registered for this pass type
    #[error("Unknown pass type '{type_name}'")]
    UnknownType { type_name: String },

    /// The parameters do not satisfy the pass type's schema
    #[error("Invalid parameter '{key}' for pass type '{type_name}': {reason}")]
    InvalidParameter {
        type_name: String,
        key: String,
        reason: String,
    },

    /// The graph failed validation and cannot be registered
    #[error("Graph '{graph}' is not valid and cannot be registered: {source}")]
    NotValidated {
        graph: String,
        #[source]
        source: ValidationError,
    },

    /// A graph with this name is registered and the registry rejects duplicates
    #[error("A graph named '{graph}' is already registered")]
    DuplicateGraph { graph: String },

    /// No graph is registered under this name
    #[error("Unknown graph '{graph}'")]
    UnknownGraph { graph: String },
}
