// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The graph model and its forward-only builder operations.
//!
//! A [`GraphModel`] owns its pass instances and edges. Builder calls check
//! everything that can be checked locally (names, ports, directions, data
//! kinds) and fail immediately; properties of the graph as a whole
//! (single producers, acyclicity, dangling inputs) are left to
//! [`crate::graph::validate`] so a graph can be assembled in any order.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::config::consts::PORT_ADDRESS_SEPARATOR;
use crate::errors::ConstructionError;
use crate::graph::{Edge, PassInstance, Port, PortDirection, PortRef};
use crate::observability::messages::builder::{EdgeAdded, PassAdded, PortMarked};
use crate::observability::messages::StructuredLog;

/// What validation does with an input port that has no producer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DanglingInputPolicy {
    /// Every required input must be connected or marked as an external input
    #[default]
    Reject,
    /// Unconnected inputs are accepted as host-supplied external inputs
    AllowExternal,
}

#[derive(Debug, Clone)]
pub struct GraphModel {
    name: String,
    passes: Vec<PassInstance>,
    index: HashMap<String, usize>,
    edges: Vec<Edge>,
    marked_outputs: Vec<PortRef>,
    external_inputs: Vec<PortRef>,
    dangling_inputs: DanglingInputPolicy,
}

impl GraphModel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passes: Vec::new(),
            index: HashMap::new(),
            edges: Vec::new(),
            marked_outputs: Vec::new(),
            external_inputs: Vec::new(),
            dangling_inputs: DanglingInputPolicy::default(),
        }
    }

    pub fn with_dangling_input_policy(mut self, policy: DanglingInputPolicy) -> Self {
        self.dangling_inputs = policy;
        self
    }

    pub fn set_dangling_input_policy(&mut self, policy: DanglingInputPolicy) {
        self.dangling_inputs = policy;
    }

    /// Add a pass instance under its instance name.
    ///
    /// The name must be unique in the graph, non-empty, and free of the port
    /// address separator so `"<pass>.<port>"` addresses stay unambiguous.
    pub fn add_pass(&mut self, instance: PassInstance) -> Result<(), ConstructionError> {
        let name = instance.name();
        if name.is_empty() || name.contains(PORT_ADDRESS_SEPARATOR) {
            return Err(ConstructionError::InvalidInstanceName {
                graph: self.name.clone(),
                instance: name.to_string(),
            });
        }
        if self.index.contains_key(name) {
            return Err(ConstructionError::DuplicateInstanceName {
                graph: self.name.clone(),
                instance: instance.name().to_string(),
            });
        }

        PassAdded {
            graph: &self.name,
            instance: instance.name(),
            type_name: instance.type_name(),
        }
        .log();

        self.index
            .insert(instance.name().to_string(), self.passes.len());
        self.passes.push(instance);
        Ok(())
    }

    /// Connect `src_instance.src_port` (an output) to `dst_instance.dst_port` (an input).
    ///
    /// Multiple producers and cycles are not rejected here; see
    /// [`crate::graph::validate`].
    pub fn add_edge(
        &mut self,
        src_instance: &str,
        src_port: &str,
        dst_instance: &str,
        dst_port: &str,
    ) -> Result<(), ConstructionError> {
        let source = PortRef::new(src_instance, src_port);
        let destination = PortRef::new(dst_instance, dst_port);

        let source_decl = self.resolve_port(&source, PortDirection::Output)?;
        let destination_decl = self.resolve_port(&destination, PortDirection::Input)?;

        if !source_decl
            .data_kind
            .is_compatible_with(&destination_decl.data_kind)
        {
            return Err(ConstructionError::DataKindMismatch {
                source_kind: source_decl.data_kind.clone(),
                destination_kind: destination_decl.data_kind.clone(),
                source_port: source,
                destination,
            });
        }

        EdgeAdded {
            graph: &self.name,
            source: &source.to_string(),
            destination: &destination.to_string(),
        }
        .log();

        self.edges.push(Edge::new(source, destination));
        Ok(())
    }

    /// [`GraphModel::add_edge`] taking `"Pass.port"` addresses.
    ///
    /// ```
    /// # use the_render_graph::graph::GraphModel;
    /// # let mut graph = GraphModel::new("Empty");
    /// let result = graph.connect("AccumulatePass.output", "ToneMapper.src");
    /// assert!(result.is_err());
    /// ```
    pub fn connect(&mut self, source: &str, destination: &str) -> Result<(), ConstructionError> {
        let source: PortRef = source.parse()?;
        let destination: PortRef = destination.parse()?;
        self.add_edge(
            &source.instance,
            &source.port,
            &destination.instance,
            &destination.port,
        )
    }

    /// Mark a declared output port as a final deliverable of the graph.
    ///
    /// Marking the same port twice is a no-op. Any port that is not a
    /// declared output, including an input of the same name, is reported as
    /// an unknown output port.
    pub fn mark_output(&mut self, instance: &str, port: &str) -> Result<(), ConstructionError> {
        let pass = self.require_pass(instance)?;
        if pass.output(port).is_none() {
            return Err(ConstructionError::UnknownPort {
                instance: instance.to_string(),
                port: port.to_string(),
                direction: PortDirection::Output,
            });
        }

        let port_ref = PortRef::new(instance, port);
        if !self.marked_outputs.contains(&port_ref) {
            PortMarked {
                graph: &self.name,
                port: &port_ref.to_string(),
                role: "output",
            }
            .log();
            self.marked_outputs.push(port_ref);
        }
        Ok(())
    }

    pub fn mark_output_at(&mut self, address: &str) -> Result<(), ConstructionError> {
        let port_ref: PortRef = address.parse()?;
        self.mark_output(&port_ref.instance, &port_ref.port)
    }

    /// Accept an unconnected input as supplied by the host, regardless of the
    /// graph's [`DanglingInputPolicy`].
    pub fn mark_external_input(
        &mut self,
        instance: &str,
        port: &str,
    ) -> Result<(), ConstructionError> {
        let port_ref = PortRef::new(instance, port);
        self.resolve_port(&port_ref, PortDirection::Input)?;

        if !self.external_inputs.contains(&port_ref) {
            PortMarked {
                graph: &self.name,
                port: &port_ref.to_string(),
                role: "external input",
            }
            .log();
            self.external_inputs.push(port_ref);
        }
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Pass instances in insertion order
    pub fn passes(&self) -> &[PassInstance] {
        &self.passes
    }

    pub fn pass(&self, instance: &str) -> Option<&PassInstance> {
        self.index.get(instance).map(|&i| &self.passes[i])
    }

    pub fn contains_pass(&self, instance: &str) -> bool {
        self.index.contains_key(instance)
    }

    /// Position of an instance in insertion order
    pub fn insertion_index(&self, instance: &str) -> Option<usize> {
        self.index.get(instance).copied()
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn marked_outputs(&self) -> &[PortRef] {
        &self.marked_outputs
    }

    pub fn external_inputs(&self) -> &[PortRef] {
        &self.external_inputs
    }

    pub fn dangling_input_policy(&self) -> DanglingInputPolicy {
        self.dangling_inputs
    }

    pub fn is_marked_output(&self, port: &PortRef) -> bool {
        self.marked_outputs.contains(port)
    }

    pub fn is_external_input(&self, port: &PortRef) -> bool {
        self.external_inputs.contains(port)
    }

    pub fn pass_count(&self) -> usize {
        self.passes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }

    /// Source ports of every edge targeting `input`, in edge order
    pub fn producers_of<'a>(&'a self, input: &PortRef) -> impl Iterator<Item = &'a PortRef> + 'a {
        let input = input.clone();
        self.edges
            .iter()
            .filter(move |edge| edge.destination == input)
            .map(|edge| &edge.source)
    }

    /// Destination ports of every edge leaving `output`, in edge order
    pub fn consumers_of<'a>(&'a self, output: &PortRef) -> impl Iterator<Item = &'a PortRef> + 'a {
        let output = output.clone();
        self.edges
            .iter()
            .filter(move |edge| edge.source == output)
            .map(|edge| &edge.destination)
    }

    /// Every declared output in the graph, in pass insertion order.
    ///
    /// These are the candidates for [`GraphModel::mark_output`].
    pub fn available_outputs(&self) -> Vec<PortRef> {
        self.passes
            .iter()
            .flat_map(|pass| {
                pass.outputs()
                    .iter()
                    .map(move |port| PortRef::new(pass.name(), port.name.as_str()))
            })
            .collect()
    }

    fn require_pass(&self, instance: &str) -> Result<&PassInstance, ConstructionError> {
        self.pass(instance)
            .ok_or_else(|| ConstructionError::UnknownInstance {
                graph: self.name.clone(),
                instance: instance.to_string(),
            })
    }

    fn resolve_port(
        &self,
        port_ref: &PortRef,
        expected: PortDirection,
    ) -> Result<&Port, ConstructionError> {
        let pass = self.require_pass(&port_ref.instance)?;

        if let Some(port) = pass.port(&port_ref.port, expected) {
            return Ok(port);
        }

        match pass.find_port(&port_ref.port) {
            Some(port) => Err(ConstructionError::PortDirection {
                port: port_ref.clone(),
                expected,
                actual: port.direction,
            }),
            None => Err(ConstructionError::UnknownPort {
                instance: port_ref.instance.clone(),
                port: port_ref.port.clone(),
                direction: expected,
            }),
        }
    }
}

/// Edges and port roles keyed by port, built in one pass over a model so
/// per-port lookups do not rescan the edge list.
pub(crate) struct PortIndex<'a> {
    producers: HashMap<&'a PortRef, Vec<&'a PortRef>>,
    consumers: HashMap<&'a PortRef, Vec<&'a PortRef>>,
    marked_outputs: HashSet<&'a PortRef>,
    external_inputs: HashSet<&'a PortRef>,
}

impl<'a> PortIndex<'a> {
    pub(crate) fn new(model: &'a GraphModel) -> Self {
        let mut producers: HashMap<&PortRef, Vec<&PortRef>> = HashMap::new();
        let mut consumers: HashMap<&PortRef, Vec<&PortRef>> = HashMap::new();
        for edge in model.edges() {
            producers.entry(&edge.destination).or_default().push(&edge.source);
            consumers.entry(&edge.source).or_default().push(&edge.destination);
        }

        Self {
            producers,
            consumers,
            marked_outputs: model.marked_outputs().iter().collect(),
            external_inputs: model.external_inputs().iter().collect(),
        }
    }

    /// Producers of `input`, in edge order
    pub(crate) fn producers(&self, input: &PortRef) -> &[&'a PortRef] {
        self.producers.get(input).map(Vec::as_slice).unwrap_or_default()
    }

    /// Consumers of `output`, in edge order
    pub(crate) fn consumers(&self, output: &PortRef) -> &[&'a PortRef] {
        self.consumers.get(output).map(Vec::as_slice).unwrap_or_default()
    }

    pub(crate) fn is_marked_output(&self, port: &PortRef) -> bool {
        self.marked_outputs.contains(port)
    }

    pub(crate) fn is_external_input(&self, port: &PortRef) -> bool {
        self.external_inputs.contains(port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::test_fixtures::pass;
    use crate::graph::Port;

    fn tone_mapping_graph() -> GraphModel {
        let mut graph = GraphModel::new("ToneMapping");
        graph
            .add_pass(pass("Accumulate", vec![Port::input("input")], vec![Port::output("output")]))
            .unwrap();
        graph
            .add_pass(pass("ToneMapper", vec![Port::input("src")], vec![Port::output("dst")]))
            .unwrap();
        graph
    }

    #[test]
    fn test_add_pass_rejects_duplicate_instance_names() {
        let mut graph = tone_mapping_graph();
        let result = graph.add_pass(pass("ToneMapper", vec![], vec![Port::output("dst")]));

        assert_eq!(
            result,
            Err(ConstructionError::DuplicateInstanceName {
                graph: "ToneMapping".to_string(),
                instance: "ToneMapper".to_string(),
            })
        );
        assert_eq!(graph.pass_count(), 2);
    }

    #[test]
    fn test_add_edge_errors() {
        struct TestCase {
            name: &'static str,
            source: (&'static str, &'static str),
            destination: (&'static str, &'static str),
            check: fn(&ConstructionError) -> bool,
        }

        let test_cases = vec![
            TestCase {
                name: "unknown source instance",
                source: ("Missing", "output"),
                destination: ("ToneMapper", "src"),
                check: |e| matches!(e, ConstructionError::UnknownInstance { instance, .. } if instance == "Missing"),
            },
            TestCase {
                name: "unknown destination instance",
                source: ("Accumulate", "output"),
                destination: ("Missing", "src"),
                check: |e| matches!(e, ConstructionError::UnknownInstance { instance, .. } if instance == "Missing"),
            },
            TestCase {
                name: "unknown source port",
                source: ("Accumulate", "color"),
                destination: ("ToneMapper", "src"),
                check: |e| matches!(e, ConstructionError::UnknownPort { port, direction: PortDirection::Output, .. } if port == "color"),
            },
            TestCase {
                name: "unknown destination port",
                source: ("Accumulate", "output"),
                destination: ("ToneMapper", "color"),
                check: |e| matches!(e, ConstructionError::UnknownPort { port, direction: PortDirection::Input, .. } if port == "color"),
            },
            TestCase {
                name: "input used as source",
                source: ("ToneMapper", "src"),
                destination: ("Accumulate", "input"),
                check: |e| matches!(e, ConstructionError::PortDirection { expected: PortDirection::Output, actual: PortDirection::Input, .. }),
            },
            TestCase {
                name: "output used as destination",
                source: ("Accumulate", "output"),
                destination: ("ToneMapper", "dst"),
                check: |e| matches!(e, ConstructionError::PortDirection { expected: PortDirection::Input, actual: PortDirection::Output, .. }),
            },
        ];

        for test_case in test_cases {
            let mut graph = tone_mapping_graph();
            let result = graph.add_edge(
                test_case.source.0,
                test_case.source.1,
                test_case.destination.0,
                test_case.destination.1,
            );

            let error = result.expect_err(test_case.name);
            assert!((test_case.check)(&error), "{}: unexpected error {:?}", test_case.name, error);
            assert_eq!(graph.edge_count(), 0, "{}: edge must not be added", test_case.name);
        }
    }

    #[test]
    fn test_add_edge_checks_data_kinds() {
        let mut graph = GraphModel::new("Kinds");
        graph
            .add_pass(pass("Producer", vec![], vec![
                Port::output("buffer").with_kind("buffer"),
                Port::output("anything").with_kind("*"),
            ]))
            .unwrap();
        graph
            .add_pass(pass("Consumer", vec![Port::input("texture"), Port::input("other")], vec![]))
            .unwrap();

        let result = graph.connect("Producer.buffer", "Consumer.texture");
        assert!(matches!(result, Err(ConstructionError::DataKindMismatch { .. })));

        graph.connect("Producer.anything", "Consumer.other").unwrap();
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_add_pass_rejects_names_that_break_port_addresses() {
        for name in ["", "Tone.Mapper", ".ToneMapper", "ToneMapper."] {
            let mut graph = GraphModel::new("Dots");
            let result = graph.add_pass(pass(name, vec![], vec![Port::output("dst")]));

            assert_eq!(
                result,
                Err(ConstructionError::InvalidInstanceName {
                    graph: "Dots".to_string(),
                    instance: name.to_string(),
                }),
                "name {:?}",
                name
            );
            assert!(graph.is_empty());
        }
    }

    #[test]
    fn test_port_queries_take_short_lived_addresses() {
        let mut graph = tone_mapping_graph();
        graph.connect("Accumulate.output", "ToneMapper.src").unwrap();

        let source = graph
            .producers_of(&PortRef::new("ToneMapper", "src"))
            .next()
            .cloned();
        let consumers: Vec<PortRef> = graph
            .consumers_of(&"Accumulate.output".parse().unwrap())
            .cloned()
            .collect();

        assert_eq!(source, Some(PortRef::new("Accumulate", "output")));
        assert_eq!(consumers, vec![PortRef::new("ToneMapper", "src")]);
    }

    #[test]
    fn test_port_index_matches_edge_scans() {
        let mut graph = tone_mapping_graph();
        graph
            .add_pass(pass("Other", vec![Port::input("input")], vec![Port::output("output")]))
            .unwrap();
        graph.connect("Accumulate.output", "ToneMapper.src").unwrap();
        graph.connect("Accumulate.output", "Other.input").unwrap();
        graph.mark_output("ToneMapper", "dst").unwrap();
        graph.mark_external_input("Accumulate", "input").unwrap();

        let ports = PortIndex::new(&graph);
        for address in graph.available_outputs() {
            let scanned: Vec<&PortRef> = graph.consumers_of(&address).collect();
            assert_eq!(ports.consumers(&address), scanned.as_slice(), "{}", address);
            assert_eq!(ports.is_marked_output(&address), graph.is_marked_output(&address));
        }
        for pass in graph.passes() {
            for port in pass.inputs() {
                let address = PortRef::new(pass.name(), port.name.as_str());
                let scanned: Vec<&PortRef> = graph.producers_of(&address).collect();
                assert_eq!(ports.producers(&address), scanned.as_slice(), "{}", address);
                assert_eq!(ports.is_external_input(&address), graph.is_external_input(&address));
            }
        }
        assert!(ports.producers(&PortRef::new("Accumulate", "input")).is_empty());
    }

    #[test]
    fn test_add_edge_defers_multi_producer_checks() {
        let mut graph = tone_mapping_graph();
        graph
            .add_pass(pass("Other", vec![], vec![Port::output("output")]))
            .unwrap();

        graph.connect("Accumulate.output", "ToneMapper.src").unwrap();
        graph.connect("Other.output", "ToneMapper.src").unwrap();

        let input = PortRef::new("ToneMapper", "src");
        assert_eq!(graph.producers_of(&input).count(), 2);
    }

    #[test]
    fn test_mark_output() {
        let mut graph = tone_mapping_graph();

        graph.mark_output("ToneMapper", "dst").unwrap();
        graph.mark_output_at("ToneMapper.dst").unwrap();
        assert_eq!(graph.marked_outputs(), &[PortRef::new("ToneMapper", "dst")]);

        let result = graph.mark_output("ToneMapper", "src");
        assert_eq!(
            result,
            Err(ConstructionError::UnknownPort {
                instance: "ToneMapper".to_string(),
                port: "src".to_string(),
                direction: PortDirection::Output,
            })
        );

        let result = graph.mark_output_at("ToneMapper");
        assert!(matches!(result, Err(ConstructionError::InvalidPortAddress { .. })));

        let result = graph.mark_output("Missing", "dst");
        assert!(matches!(result, Err(ConstructionError::UnknownInstance { .. })));
    }

    #[test]
    fn test_mark_external_input() {
        let mut graph = tone_mapping_graph();

        graph.mark_external_input("Accumulate", "input").unwrap();
        graph.mark_external_input("Accumulate", "input").unwrap();
        assert_eq!(graph.external_inputs().len(), 1);
        assert!(graph.is_external_input(&PortRef::new("Accumulate", "input")));

        let result = graph.mark_external_input("Accumulate", "output");
        assert!(matches!(result, Err(ConstructionError::PortDirection { .. })));
    }

    #[test]
    fn test_available_outputs_in_insertion_order() {
        let graph = tone_mapping_graph();
        assert_eq!(
            graph.available_outputs(),
            vec![
                PortRef::new("Accumulate", "output"),
                PortRef::new("ToneMapper", "dst"),
            ]
        );
    }

    #[test]
    fn test_dangling_input_policy_deserializes() {
        let policy: DanglingInputPolicy = serde_yaml::from_str("allow_external").unwrap();
        assert_eq!(policy, DanglingInputPolicy::AllowExternal);
        assert_eq!(DanglingInputPolicy::default(), DanglingInputPolicy::Reject);
    }
}
