//! Message types for graph construction events.
//!
//! These are all `debug!` level: they trace every builder call and are only
//! useful while diagnosing a graph description.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A pass instance was added to a graph.
pub struct PassAdded<'a> {
    pub graph: &'a str,
    pub instance: &'a str,
    pub type_name: &'a str,
}

impl Display for PassAdded<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Added pass '{}' ({}) to graph '{}'",
            self.instance, self.type_name, self.graph
        )
    }
}

impl StructuredLog for PassAdded<'_> {
    fn log(&self) {
        tracing::debug!(
            graph = self.graph,
            instance = self.instance,
            type_name = self.type_name,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "pass_added",
            span_name = name,
            graph = self.graph,
            instance = self.instance,
        )
    }
}

/// An edge was added to a graph.
pub struct EdgeAdded<'a> {
    pub graph: &'a str,
    pub source: &'a str,
    pub destination: &'a str,
}

impl Display for EdgeAdded<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Added edge {} -> {} to graph '{}'",
            self.source, self.destination, self.graph
        )
    }
}

impl StructuredLog for EdgeAdded<'_> {
    fn log(&self) {
        tracing::debug!(
            graph = self.graph,
            source = self.source,
            destination = self.destination,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "edge_added",
            span_name = name,
            graph = self.graph,
            source = self.source,
            destination = self.destination,
        )
    }
}

/// A port was marked as a graph output or accepted as an external input.
pub struct PortMarked<'a> {
    pub graph: &'a str,
    pub port: &'a str,
    /// `"output"` or `"external input"`
    pub role: &'a str,
}

impl Display for PortMarked<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Marked '{}' as {} of graph '{}'", self.port, self.role, self.graph)
    }
}

impl StructuredLog for PortMarked<'_> {
    fn log(&self) {
        tracing::debug!(
            graph = self.graph,
            port = self.port,
            role = self.role,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "port_marked",
            span_name = name,
            graph = self.graph,
            port = self.port,
        )
    }
}
