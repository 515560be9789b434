// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;
use std::sync::Arc;

use crate::graph::{Parameters, Port, PortDirection};
use crate::traits::RenderPass;

/// A configured pass with a fixed set of ports.
///
/// Instances are produced by [`crate::registry::PassRegistry::create`]. The
/// instance name starts out equal to the type name and can be changed with
/// [`PassInstance::named`] before the instance is added to a graph; after
/// that the graph only hands out shared references.
#[derive(Clone)]
pub struct PassInstance {
    instance_name: String,
    type_name: String,
    parameters: Parameters,
    inputs: Vec<Port>,
    outputs: Vec<Port>,
    priority: Option<i32>,
    body: Arc<dyn RenderPass>,
}

impl PassInstance {
    pub(crate) fn from_parts(
        type_name: &str,
        parameters: Parameters,
        ports: Vec<Port>,
        priority: Option<i32>,
        body: Arc<dyn RenderPass>,
    ) -> Self {
        let (inputs, outputs): (Vec<Port>, Vec<Port>) =
            ports.into_iter().partition(|port| port.is_input());

        Self {
            instance_name: type_name.to_string(),
            type_name: type_name.to_string(),
            parameters,
            inputs,
            outputs,
            priority,
            body,
        }
    }

    /// Rename the instance; names must be unique within a graph
    pub fn named(mut self, instance_name: impl Into<String>) -> Self {
        self.instance_name = instance_name.into();
        self
    }

    /// Override the type's default priority hint
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn name(&self) -> &str {
        &self.instance_name
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn inputs(&self) -> &[Port] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[Port] {
        &self.outputs
    }

    pub fn priority(&self) -> Option<i32> {
        self.priority
    }

    pub fn body(&self) -> &Arc<dyn RenderPass> {
        &self.body
    }

    pub fn input(&self, name: &str) -> Option<&Port> {
        self.inputs.iter().find(|port| port.name == name)
    }

    pub fn output(&self, name: &str) -> Option<&Port> {
        self.outputs.iter().find(|port| port.name == name)
    }

    pub fn port(&self, name: &str, direction: PortDirection) -> Option<&Port> {
        match direction {
            PortDirection::Input => self.input(name),
            PortDirection::Output => self.output(name),
        }
    }

    /// Look a port up in either direction, inputs first
    pub fn find_port(&self, name: &str) -> Option<&Port> {
        self.input(name).or_else(|| self.output(name))
    }
}

impl fmt::Debug for PassInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PassInstance")
            .field("instance_name", &self.instance_name)
            .field("type_name", &self.type_name)
            .field("parameters", &self.parameters)
            .field("inputs", &self.inputs.iter().map(|p| &p.name).collect::<Vec<_>>())
            .field("outputs", &self.outputs.iter().map(|p| &p.name).collect::<Vec<_>>())
            .field("priority", &self.priority)
            .finish()
    }
}
