// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Declarative graph descriptions.
//!
//! A description is the data-file form of the builder calls a graph script
//! makes: create and add passes, connect `"Pass.port"` addresses, mark
//! outputs. [`GraphDescription::build`] replays it through exactly those
//! operations, so a description fails with the same errors as hand-written
//! builder code.

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;
use crate::graph::{DanglingInputPolicy, GraphModel, Parameters, PortRef};
use crate::registry::PassRegistry;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphDescription {
    pub name: String,
    #[serde(default)]
    pub dangling_inputs: DanglingInputPolicy,
    /// Input addresses accepted as host-supplied
    #[serde(default)]
    pub external_inputs: Vec<String>,
    pub passes: Vec<PassDescription>,
    #[serde(default)]
    pub edges: Vec<EdgeDescription>,
    /// Output addresses to mark, in order
    #[serde(default)]
    pub outputs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassDescription {
    /// Instance name; defaults to the pass type
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub params: Parameters,
    #[serde(default)]
    pub priority: Option<i32>,
}

impl PassDescription {
    pub fn instance_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.type_name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeDescription {
    pub from: String,
    pub to: String,
}

impl GraphDescription {
    /// Build the described graph, creating every pass through `registry`.
    ///
    /// The graph is constructed but not validated.
    pub fn build(&self, registry: &PassRegistry) -> Result<GraphModel, ConfigError> {
        let mut graph =
            GraphModel::new(self.name.as_str()).with_dangling_input_policy(self.dangling_inputs);

        for pass in &self.passes {
            let mut instance = registry
                .create(&pass.type_name, &pass.params)?
                .named(pass.instance_name());
            if let Some(priority) = pass.priority {
                instance = instance.with_priority(priority);
            }
            graph.add_pass(instance)?;
        }

        for edge in &self.edges {
            graph.connect(&edge.from, &edge.to)?;
        }

        for output in &self.outputs {
            graph.mark_output_at(output)?;
        }

        for input in &self.external_inputs {
            let port: PortRef = input.parse()?;
            graph.mark_external_input(&port.instance, &port.port)?;
        }

        Ok(graph)
    }
}
