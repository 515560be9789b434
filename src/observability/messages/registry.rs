// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for pass type, pass library and graph registration.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A pass type factory was registered.
///
/// # Log Level
/// `debug!` - Startup detail
pub struct PassTypeRegistered<'a> {
    pub type_name: &'a str,
    pub registered_count: usize,
}

impl Display for PassTypeRegistered<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Registered pass type '{}' ({} types available)",
            self.type_name, self.registered_count
        )
    }
}

impl StructuredLog for PassTypeRegistered<'_> {
    fn log(&self) {
        tracing::debug!(
            type_name = self.type_name,
            registered_count = self.registered_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "pass_type_registered",
            span_name = name,
            type_name = self.type_name,
        )
    }
}

/// A pass library registered all of its pass types.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use the_render_graph::observability::messages::registry::PassLibraryLoaded;
///
/// let msg = PassLibraryLoaded {
///     library: "standard",
///     pass_count: 4,
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct PassLibraryLoaded<'a> {
    pub library: &'a str,
    pub pass_count: usize,
}

impl Display for PassLibraryLoaded<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Loaded pass library '{}' with {} pass types",
            self.library, self.pass_count
        )
    }
}

impl StructuredLog for PassLibraryLoaded<'_> {
    fn log(&self) {
        tracing::info!(
            library = self.library,
            pass_count = self.pass_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "pass_library",
            span_name = name,
            library = self.library,
            pass_count = self.pass_count,
        )
    }
}

/// Pass creation was rejected by the registry.
///
/// # Log Level
/// `warn!` - Caller supplied an unusable pass definition
pub struct PassCreationFailed<'a> {
    pub type_name: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for PassCreationFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Failed to create pass of type '{}': {}", self.type_name, self.error)
    }
}

impl StructuredLog for PassCreationFailed<'_> {
    fn log(&self) {
        tracing::warn!(
            type_name = self.type_name,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "pass_creation_failed",
            span_name = name,
            type_name = self.type_name,
        )
    }
}

/// A validated graph was added to the graph registry.
///
/// # Log Level
/// `info!` - Important operational event
pub struct GraphRegistered<'a> {
    pub graph: &'a str,
    pub pass_count: usize,
    pub output_count: usize,
    /// Whether an existing graph of the same name was replaced
    pub replaced: bool,
}

impl Display for GraphRegistered<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let verb = if self.replaced { "Replaced" } else { "Registered" };
        write!(
            f,
            "{} graph '{}': {} passes, {} marked outputs",
            verb, self.graph, self.pass_count, self.output_count
        )
    }
}

impl StructuredLog for GraphRegistered<'_> {
    fn log(&self) {
        tracing::info!(
            graph = self.graph,
            pass_count = self.pass_count,
            output_count = self.output_count,
            replaced = self.replaced,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "graph_registered",
            span_name = name,
            graph = self.graph,
            pass_count = self.pass_count,
        )
    }
}

/// The graph registry was reset.
///
/// # Log Level
/// `info!` - Important operational event
pub struct GraphRegistryCleared {
    pub removed_count: usize,
}

impl Display for GraphRegistryCleared {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Cleared graph registry ({} graphs removed)", self.removed_count)
    }
}

impl StructuredLog for GraphRegistryCleared {
    fn log(&self) {
        tracing::info!(removed_count = self.removed_count, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "graph_registry_cleared",
            span_name = name,
            removed_count = self.removed_count,
        )
    }
}
