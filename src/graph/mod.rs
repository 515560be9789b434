// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The render graph model, its validation and its scheduling.
//!
//! A graph is built forward-only: create pass instances through a
//! [`crate::registry::PassRegistry`], add them with [`GraphModel::add_pass`],
//! connect ports with [`GraphModel::add_edge`] and mark final outputs with
//! [`GraphModel::mark_output`]. [`validate`] then checks the graph as a whole
//! and [`schedule`] linearizes it.

mod edge;
mod model;
mod params;
mod pass_instance;
mod plan;
mod port;
mod scheduler;
mod validation;


pub use edge::Edge;
pub use model::{DanglingInputPolicy, GraphModel};
pub use params::{ParamKind, ParamSpec, ParamValue, ParameterSchema, Parameters};
pub use pass_instance::PassInstance;
pub use plan::{ExecutionPlan, PlanStep, PlannedInput, PlannedOutput};
pub use port::{DataKind, Port, PortDirection, PortRef};
pub use scheduler::{schedule, schedule_levels};
pub use validation::validate;

#[cfg(test)]
pub(crate) mod test_fixtures {
    use std::sync::Arc;

    use super::*;
    use crate::library::OpaquePass;

    /// A pass instance with the given ports and no parameters
    pub fn pass(name: &str, inputs: Vec<Port>, outputs: Vec<Port>) -> PassInstance {
        let ports = inputs.into_iter().chain(outputs).collect();
        PassInstance::from_parts(name, Parameters::new(), ports, None, Arc::new(OpaquePass::new(name)))
    }

    /// Passes with one `in` and one `out` port, connected in the given order.
    /// The first pass's input is accepted as an external input.
    pub fn chain(graph_name: &str, names: &[&str]) -> GraphModel {
        let mut graph = GraphModel::new(graph_name);
        for name in names {
            graph
                .add_pass(pass(name, vec![Port::input("in")], vec![Port::output("out")]))
                .unwrap();
        }
        for pair in names.windows(2) {
            graph.add_edge(pair[0], "out", pair[1], "in").unwrap();
        }
        if let Some(first) = names.first() {
            graph.mark_external_input(first, "in").unwrap();
        }
        graph
    }
}
