// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Named, validated graphs available to a host.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::errors::RegistryError;
use crate::graph::{validate, ExecutionPlan, GraphModel, PassInstance};
use crate::observability::messages::registry::{GraphRegistered, GraphRegistryCleared};
use crate::observability::messages::StructuredLog;

/// What [`GraphRegistry::register`] does with a name that is already taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateGraphPolicy {
    #[default]
    Reject,
    Replace,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphRegistryOptions {
    pub duplicate_graphs: DuplicateGraphPolicy,
}

/// A graph that passed validation, together with its execution plan.
///
/// Registered graphs are immutable; rebuilding a graph means registering a
/// new model.
#[derive(Debug)]
pub struct RegisteredGraph {
    model: GraphModel,
    plan: ExecutionPlan,
}

impl RegisteredGraph {
    pub fn name(&self) -> &str {
        self.model.name()
    }

    pub fn model(&self) -> &GraphModel {
        &self.model
    }

    pub fn plan(&self) -> &ExecutionPlan {
        &self.plan
    }

    /// Pass instances in execution order
    pub fn passes_in_order(&self) -> impl Iterator<Item = &PassInstance> + '_ {
        self.plan
            .steps
            .iter()
            .filter_map(|step| self.model.pass(&step.instance))
    }
}

#[derive(Debug, Default)]
pub struct GraphRegistry {
    options: GraphRegistryOptions,
    graphs: HashMap<String, Arc<RegisteredGraph>>,
    order: Vec<String>,
}

impl GraphRegistry {
    pub fn new(options: GraphRegistryOptions) -> Self {
        Self {
            options,
            graphs: HashMap::new(),
            order: Vec::new(),
        }
    }

    pub fn options(&self) -> &GraphRegistryOptions {
        &self.options
    }

    /// Validate, schedule and store `model` under `name`.
    ///
    /// Fails with [`RegistryError::NotValidated`] if the model does not pass
    /// [`validate`], and with [`RegistryError::DuplicateGraph`] if `name` is
    /// taken and the registry rejects duplicates. On replacement the graph
    /// keeps its original position in [`GraphRegistry::names`].
    pub fn register(
        &mut self,
        name: impl Into<String>,
        model: GraphModel,
    ) -> Result<Arc<RegisteredGraph>, RegistryError> {
        let name = name.into();
        let exists = self.graphs.contains_key(&name);

        if exists && self.options.duplicate_graphs == DuplicateGraphPolicy::Reject {
            return Err(RegistryError::DuplicateGraph { graph: name });
        }

        let not_validated = |source| RegistryError::NotValidated {
            graph: name.clone(),
            source,
        };
        validate(&model).map_err(not_validated)?;
        let plan = ExecutionPlan::build(&model).map_err(not_validated)?;

        GraphRegistered {
            graph: &name,
            pass_count: model.pass_count(),
            output_count: model.marked_outputs().len(),
            replaced: exists,
        }
        .log();

        let registered = Arc::new(RegisteredGraph { model, plan });
        if !exists {
            self.order.push(name.clone());
        }
        self.graphs.insert(name, Arc::clone(&registered));
        Ok(registered)
    }

    pub fn get(&self, name: &str) -> Result<Arc<RegisteredGraph>, RegistryError> {
        self.graphs
            .get(name)
            .cloned()
            .ok_or_else(|| RegistryError::UnknownGraph {
                graph: name.to_string(),
            })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.graphs.contains_key(name)
    }

    /// Graph names in registration order
    pub fn names(&self) -> &[String] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.graphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.graphs.is_empty()
    }

    /// Remove every graph. Handles already given out stay usable.
    pub fn clear(&mut self) {
        let removed_count = self.graphs.len();
        self.graphs.clear();
        self.order.clear();
        GraphRegistryCleared { removed_count }.log();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ValidationError;
    use crate::graph::test_fixtures::chain;

    fn valid_graph(name: &str) -> GraphModel {
        let mut graph = chain(name, &["A", "B"]);
        graph.mark_output("B", "out").unwrap();
        graph
    }

    #[test]
    fn test_register_and_get() {
        let mut registry = GraphRegistry::default();
        registry.register("Preview", valid_graph("Preview")).unwrap();

        let graph = registry.get("Preview").unwrap();
        assert_eq!(graph.name(), "Preview");
        assert_eq!(graph.plan().order(), vec!["A", "B"]);
        let names: Vec<&str> = graph.passes_in_order().map(|p| p.name()).collect();
        assert_eq!(names, vec!["A", "B"]);

        assert!(matches!(
            registry.get("Missing"),
            Err(RegistryError::UnknownGraph { graph }) if graph == "Missing"
        ));
    }

    #[test]
    fn test_register_rejects_invalid_graph() {
        let mut registry = GraphRegistry::default();
        let mut graph = valid_graph("Loop");
        graph.connect("B.out", "A.in").unwrap();

        let result = registry.register("Loop", graph);
        match result {
            Err(RegistryError::NotValidated { graph, source }) => {
                assert_eq!(graph, "Loop");
                assert_eq!(
                    source,
                    ValidationError::Cycle {
                        cycle: vec!["A".to_string(), "B".to_string()]
                    }
                );
            }
            other => panic!("expected NotValidated, got {:?}", other.map(|g| g.name().to_string())),
        }
        assert!(registry.is_empty());
    }

    #[test]
    fn test_duplicate_graph_policies() {
        struct TestCase {
            policy: DuplicateGraphPolicy,
            expect_replaced: bool,
        }

        let test_cases = vec![
            TestCase { policy: DuplicateGraphPolicy::Reject, expect_replaced: false },
            TestCase { policy: DuplicateGraphPolicy::Replace, expect_replaced: true },
        ];

        for test_case in test_cases {
            let mut registry = GraphRegistry::new(GraphRegistryOptions {
                duplicate_graphs: test_case.policy,
            });
            registry.register("Main", valid_graph("First")).unwrap();
            registry.register("Other", valid_graph("Other")).unwrap();

            let result = registry.register("Main", valid_graph("Second"));
            if test_case.expect_replaced {
                assert!(result.is_ok());
                assert_eq!(registry.get("Main").unwrap().name(), "Second");
            } else {
                assert_eq!(
                    result.map(|_| ()),
                    Err(RegistryError::DuplicateGraph { graph: "Main".to_string() })
                );
                assert_eq!(registry.get("Main").unwrap().name(), "First");
            }
            assert_eq!(registry.names(), &["Main".to_string(), "Other".to_string()]);
            assert_eq!(registry.len(), 2);
        }
    }

    #[test]
    fn test_clear_keeps_outstanding_handles() {
        let mut registry = GraphRegistry::default();
        let handle = registry.register("Preview", valid_graph("Preview")).unwrap();

        registry.clear();
        assert!(registry.is_empty());
        assert!(registry.names().is_empty());
        assert_eq!(handle.plan().len(), 2);
    }

    #[test]
    fn test_options_deserialize() {
        let options: GraphRegistryOptions = serde_yaml::from_str("duplicate_graphs: replace").unwrap();
        assert_eq!(options.duplicate_graphs, DuplicateGraphPolicy::Replace);

        let options: GraphRegistryOptions = serde_yaml::from_str("{}").unwrap();
        assert_eq!(options, GraphRegistryOptions::default());
    }
}
