// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;

use thiserror::Error;

use crate::graph::PortRef;

/// Errors that can occur during render graph validation.
///
/// Validation stops at the first failing check, so exactly one of these is
/// reported per `validate` call. Every variant names the instances and ports
/// involved.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// An edge, marked output or external input no longer resolves to a
    /// declared port of the right direction
    #[error("Graph '{graph}' references '{reference}' which does not resolve: {reason}")]
    UnresolvedReference {
        graph: String,
        reference: PortRef,
        reason: String,
    },

    /// An input port is the destination of more than one edge
    #[error("Input '{input}' has {} producers ({}); inputs accept a single producer", producers.len(), join_ports(producers))]
    MultiProducer {
        input: PortRef,
        /// The source ports of every edge targeting `input`, in edge order
        producers: Vec<PortRef>,
    },

    /// The edges induce a directed cycle over pass instances
    #[error("Cycle detected: {}", describe_cycle(cycle))]
    Cycle {
        /// Instances on the cycle in traversal order; the last one feeds the first
        cycle: Vec<String>,
    },

    /// Inputs without a producer, default or external-input acceptance
    #[error("Dangling inputs with no producer: {}", join_ports(inputs))]
    DanglingInput { inputs: Vec<PortRef> },
}

/// The kind of a [`ValidationError`], without its detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationErrorKind {
    UnresolvedReference,
    MultiProducer,
    Cycle,
    DanglingInput,
}

impl ValidationError {
    pub fn kind(&self) -> ValidationErrorKind {
        match self {
            ValidationError::UnresolvedReference { .. } => ValidationErrorKind::UnresolvedReference,
            ValidationError::MultiProducer { .. } => ValidationErrorKind::MultiProducer,
            ValidationError::Cycle { .. } => ValidationErrorKind::Cycle,
            ValidationError::DanglingInput { .. } => ValidationErrorKind::DanglingInput,
        }
    }
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValidationErrorKind::UnresolvedReference => "unresolved_reference",
            ValidationErrorKind::MultiProducer => "multi_producer",
            ValidationErrorKind::Cycle => "cycle",
            ValidationErrorKind::DanglingInput => "dangling_input",
        };
        f.write_str(name)
    }
}

fn join_ports(ports: &[PortRef]) -> String {
    ports
        .iter()
        .map(|port| port.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn describe_cycle(cycle: &[String]) -> String {
    match cycle.first() {
        Some(first) => format!("{} -> {}", cycle.join(" -> "), first),
        None => String::new(),
    }
}
