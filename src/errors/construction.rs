// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors raised by the graph builder operations.
//!
//! Construction errors are reported by the call that caused them
//! (`add_pass`, `add_edge`, `mark_output`, ...) and always name the instance
//! and port involved so the fault can be located in the graph description.

use thiserror::Error;

use crate::graph::{DataKind, PortDirection, PortRef};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConstructionError {
    /// A pass with this instance name is already part of the graph
    #[error("Graph '{graph}' already contains a pass named '{instance}'")]
    DuplicateInstanceName { graph: String, instance: String },

    /// Instance names are non-empty and never contain the port address separator
    #[error("Graph '{graph}' cannot add a pass named '{instance}': instance names must be non-empty and must not contain '.'")]
    InvalidInstanceName { graph: String, instance: String },

    /// An edge, output or external input referenced a pass that was never added
    #[error("Graph '{graph}' has no pass named '{instance}'")]
    UnknownInstance { graph: String, instance: String },

    /// The pass exists but declares no port of that name and direction
    #[error("Pass '{instance}' has no {direction} port named '{port}'")]
    UnknownPort {
        instance: String,
        port: String,
        direction: PortDirection,
    },

    /// The port exists but points the wrong way for its use
    #[error("Port '{port}' is an {actual} port but is used as an {expected}")]
    PortDirection {
        port: PortRef,
        expected: PortDirection,
        actual: PortDirection,
    },

    /// Source and destination ports carry incompatible data kinds
    #[error("Cannot connect '{source_port}' ({source_kind}) to '{destination}' ({destination_kind}): data kinds differ")]
    DataKindMismatch {
        source_port: PortRef,
        source_kind: DataKind,
        destination: PortRef,
        destination_kind: DataKind,
    },

    /// A port address did not have the `Pass.port` form
    #[error("Invalid port address '{address}': expected '<pass>.<port>'")]
    InvalidPortAddress { address: String },
}
