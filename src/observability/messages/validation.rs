// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for render graph validation.
//!
//! This module contains message types for logging events related to:
//! * Validation lifecycle (start, success, failure)
//! * Cycle detection
//! * Multi-producer input detection
//! * Dangling and externally supplied inputs
//! * Graphs without marked outputs

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Graph validation started.
///
/// # Log Level
/// `debug!` - Validation may run repeatedly during incremental construction
///
/// # Example
/// ```
/// use the_render_graph::observability::messages::validation::ValidationStarted;
///
/// let msg = ValidationStarted {
///     graph: "BasicPathTracer",
///     pass_count: 4,
///     edge_count: 3,
/// };
///
/// tracing::debug!("{}", msg);
/// ```
pub struct ValidationStarted<'a> {
    pub graph: &'a str,
    pub pass_count: usize,
    pub edge_count: usize,
}

impl Display for ValidationStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Validating graph '{}': {} passes, {} edges",
            self.graph, self.pass_count, self.edge_count
        )
    }
}

impl StructuredLog for ValidationStarted<'_> {
    fn log(&self) {
        tracing::debug!(
            graph = self.graph,
            pass_count = self.pass_count,
            edge_count = self.edge_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "validation",
            span_name = name,
            graph = self.graph,
            pass_count = self.pass_count,
            edge_count = self.edge_count,
        )
    }
}

/// Graph validation completed successfully.
///
/// # Log Level
/// `debug!` - Validation may run repeatedly during incremental construction
pub struct ValidationCompleted<'a> {
    pub graph: &'a str,
    pub external_input_count: usize,
}

impl Display for ValidationCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Graph '{}' is valid ({} external inputs)",
            self.graph, self.external_input_count
        )
    }
}

impl StructuredLog for ValidationCompleted<'_> {
    fn log(&self) {
        tracing::debug!(
            graph = self.graph,
            external_input_count = self.external_input_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "validation_completed",
            span_name = name,
            graph = self.graph,
        )
    }
}

/// Graph validation failed.
///
/// # Log Level
/// `warn!` - The graph is rejected; the caller receives the error
///
/// # Example
/// ```
/// use the_render_graph::errors::ValidationError;
/// use the_render_graph::observability::messages::validation::ValidationFailed;
///
/// let error = ValidationError::Cycle {
///     cycle: vec!["A".to_string(), "B".to_string()],
/// };
/// let msg = ValidationFailed {
///     graph: "Broken",
///     error: &error,
/// };
///
/// assert_eq!(msg.to_string(), "Graph 'Broken' failed validation: Cycle detected: A -> B -> A");
/// ```
pub struct ValidationFailed<'a> {
    pub graph: &'a str,
    pub error: &'a crate::errors::ValidationError,
}

impl Display for ValidationFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Graph '{}' failed validation: {}", self.graph, self.error)
    }
}

impl StructuredLog for ValidationFailed<'_> {
    fn log(&self) {
        tracing::warn!(
            graph = self.graph,
            kind = %self.error.kind(),
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "validation_failed",
            span_name = name,
            graph = self.graph,
            kind = %self.error.kind(),
        )
    }
}

/// Cycle detected between pass instances.
///
/// # Log Level
/// `error!` - Failure requiring attention
///
/// # Example
/// ```
/// use the_render_graph::observability::messages::validation::CycleDetected;
///
/// let cycle = vec!["P1", "P2", "P3"];
/// let msg = CycleDetected {
///     graph: "Loop",
///     cycle: &cycle,
/// };
///
/// tracing::error!("{}", msg);
/// ```
pub struct CycleDetected<'a> {
    pub graph: &'a str,
    pub cycle: &'a [&'a str],
}

impl Display for CycleDetected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Cycle detected in graph '{}': {}",
            self.graph,
            self.cycle.join(" -> ")
        )
    }
}

impl StructuredLog for CycleDetected<'_> {
    fn log(&self) {
        tracing::error!(
            graph = self.graph,
            cycle = self.cycle.join(" -> "),
            cycle_length = self.cycle.len(),
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::ERROR,
            "cycle_detected",
            name = name,
            graph = self.graph,
            cycle_length = self.cycle.len(),
        )
    }
}

/// An input port has more than one producer.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct MultiProducerDetected<'a> {
    pub graph: &'a str,
    pub input: &'a str,
    pub producer_count: usize,
}

impl Display for MultiProducerDetected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Input '{}' in graph '{}' is targeted by {} edges",
            self.input, self.graph, self.producer_count
        )
    }
}

impl StructuredLog for MultiProducerDetected<'_> {
    fn log(&self) {
        tracing::error!(
            graph = self.graph,
            input = self.input,
            producer_count = self.producer_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::ERROR,
            "multi_producer",
            name = name,
            graph = self.graph,
            input = self.input,
        )
    }
}

/// Inputs left without a producer.
///
/// # Log Level
/// `error!` when rejected, `debug!` when accepted as host-supplied external inputs
pub struct DanglingInputs<'a> {
    pub graph: &'a str,
    pub inputs: &'a [String],
    pub accepted: bool,
}

impl Display for DanglingInputs<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        if self.accepted {
            write!(
                f,
                "Graph '{}' expects host-supplied inputs: {}",
                self.graph,
                self.inputs.join(", ")
            )
        } else {
            write!(
                f,
                "Graph '{}' has dangling inputs: {}",
                self.graph,
                self.inputs.join(", ")
            )
        }
    }
}

impl StructuredLog for DanglingInputs<'_> {
    fn log(&self) {
        if self.accepted {
            tracing::debug!(
                graph = self.graph,
                input_count = self.inputs.len(),
                "{}", self
            );
        } else {
            tracing::error!(
                graph = self.graph,
                input_count = self.inputs.len(),
                "{}", self
            );
        }
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "dangling_inputs",
            span_name = name,
            graph = self.graph,
            input_count = self.inputs.len(),
            accepted = self.accepted,
        )
    }
}

/// A graph has no marked outputs, so a host would have nothing to present.
///
/// # Log Level
/// `warn!` - Potential issue, the graph is still valid
pub struct NoMarkedOutputs<'a> {
    pub graph: &'a str,
}

impl Display for NoMarkedOutputs<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Graph '{}' has no marked outputs", self.graph)
    }
}

impl StructuredLog for NoMarkedOutputs<'_> {
    fn log(&self) {
        tracing::warn!(graph = self.graph, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!("no_marked_outputs", span_name = name, graph = self.graph)
    }
}
