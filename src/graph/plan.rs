//! Execution plans handed to a host.

use std::fmt;

use serde::Serialize;

use crate::errors::ValidationError;
use crate::graph::model::PortIndex;
use crate::graph::scheduler::{level_of_each, schedule_indices};
use crate::graph::{GraphModel, PortRef};
use crate::observability::messages::scheduler::ScheduleComputed;
use crate::observability::messages::StructuredLog;

/// The scheduled form of a graph: what to run, in which order, and where
/// every port's data comes from and goes to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExecutionPlan {
    pub graph: String,
    pub steps: Vec<PlanStep>,
    /// Marked outputs in marking order
    pub outputs: Vec<PortRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanStep {
    pub instance: String,
    pub type_name: String,
    pub level: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
    pub inputs: Vec<PlannedInput>,
    pub outputs: Vec<PlannedOutput>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannedInput {
    pub port: String,
    /// Producing output; `None` when the host supplies the data or the pass
    /// falls back to its default
    pub source: Option<PortRef>,
    pub optional: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannedOutput {
    pub port: String,
    pub consumers: Vec<PortRef>,
    /// Whether the output is a final deliverable of the graph
    pub marked: bool,
}

impl ExecutionPlan {
    /// Schedule `model` and resolve every port. The model is expected to have
    /// passed validation; only a cycle can still make this fail.
    pub fn build(model: &GraphModel) -> Result<Self, ValidationError> {
        let order = schedule_indices(model)?;
        let levels = level_of_each(model, &order);
        let passes = model.passes();
        let ports = PortIndex::new(model);

        let steps: Vec<PlanStep> = order
            .iter()
            .map(|&index| {
                let pass = &passes[index];
                let inputs = pass
                    .inputs()
                    .iter()
                    .map(|port| {
                        let address = PortRef::new(pass.name(), port.name.as_str());
                        PlannedInput {
                            port: port.name.clone(),
                            source: ports.producers(&address).first().map(|&source| source.clone()),
                            optional: port.optional,
                        }
                    })
                    .collect();
                let outputs = pass
                    .outputs()
                    .iter()
                    .map(|port| {
                        let address = PortRef::new(pass.name(), port.name.as_str());
                        PlannedOutput {
                            port: port.name.clone(),
                            consumers: ports.consumers(&address).iter().map(|&c| c.clone()).collect(),
                            marked: ports.is_marked_output(&address),
                        }
                    })
                    .collect();

                PlanStep {
                    instance: pass.name().to_string(),
                    type_name: pass.type_name().to_string(),
                    level: levels[index],
                    priority: pass.priority(),
                    inputs,
                    outputs,
                }
            })
            .collect();

        let plan = Self {
            graph: model.name().to_string(),
            steps,
            outputs: model.marked_outputs().to_vec(),
        };

        ScheduleComputed {
            graph: &plan.graph,
            order: &plan.order(),
            level_count: plan.level_count(),
        }
        .log();

        Ok(plan)
    }

    /// Instance names in execution order
    pub fn order(&self) -> Vec<String> {
        self.steps.iter().map(|step| step.instance.clone()).collect()
    }

    pub fn level_count(&self) -> usize {
        self.steps.iter().map(|step| step.level + 1).max().unwrap_or(0)
    }

    pub fn step(&self, instance: &str) -> Option<&PlanStep> {
        self.steps.iter().find(|step| step.instance == instance)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl fmt::Display for ExecutionPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Graph '{}' ({} passes, {} levels)", self.graph, self.len(), self.level_count())?;
        for (position, step) in self.steps.iter().enumerate() {
            writeln!(
                f,
                "  {}. {} [{}] level {}",
                position + 1,
                step.instance,
                step.type_name,
                step.level
            )?;
            for input in &step.inputs {
                match &input.source {
                    Some(source) => writeln!(f, "       {} <- {}", input.port, source)?,
                    None if input.optional => writeln!(f, "       {} <- (default)", input.port)?,
                    None => writeln!(f, "       {} <- (external)", input.port)?,
                }
            }
        }
        let outputs: Vec<String> = self.outputs.iter().map(|port| port.to_string()).collect();
        write!(f, "  outputs: {}", outputs.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::test_fixtures::{chain, pass};
    use crate::graph::Port;

    #[test]
    fn test_plan_resolves_sources_and_consumers() {
        let mut graph = chain("Chain", &["P1", "P2", "P3"]);
        graph.mark_output("P3", "out").unwrap();
        let plan = ExecutionPlan::build(&graph).unwrap();

        assert_eq!(plan.order(), vec!["P1", "P2", "P3"]);
        assert_eq!(plan.level_count(), 3);
        assert_eq!(plan.outputs, vec![PortRef::new("P3", "out")]);

        let p1 = plan.step("P1").unwrap();
        assert_eq!(p1.inputs[0].source, None);
        assert_eq!(p1.outputs[0].consumers, vec![PortRef::new("P2", "in")]);
        assert!(!p1.outputs[0].marked);

        let p3 = plan.step("P3").unwrap();
        assert_eq!(p3.inputs[0].source, Some(PortRef::new("P2", "out")));
        assert!(p3.outputs[0].consumers.is_empty());
        assert!(p3.outputs[0].marked);
    }

    #[test]
    fn test_plan_serializes_to_json() {
        let mut graph = GraphModel::new("Single");
        graph
            .add_pass(pass("ToneMapper", vec![Port::input("src").optional()], vec![Port::output("dst")]))
            .unwrap();
        graph.mark_output_at("ToneMapper.dst").unwrap();

        let plan = ExecutionPlan::build(&graph).unwrap();
        let json = serde_json::to_value(&plan).unwrap();

        assert_eq!(json["graph"], "Single");
        assert_eq!(json["steps"][0]["instance"], "ToneMapper");
        assert_eq!(json["steps"][0]["inputs"][0]["source"], serde_json::Value::Null);
        assert_eq!(json["outputs"][0], "ToneMapper.dst");
    }

    #[test]
    fn test_plan_display() {
        let mut graph = chain("Chain", &["A", "B"]);
        graph.mark_output("B", "out").unwrap();
        let text = ExecutionPlan::build(&graph).unwrap().to_string();

        assert!(text.starts_with("Graph 'Chain' (2 passes, 2 levels)"));
        assert!(text.contains("in <- A.out"));
        assert!(text.contains("in <- (external)"));
        assert!(text.ends_with("outputs: B.out"));
    }
}
