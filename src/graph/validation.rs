// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Structural validation of a render graph.
//!
//! # Validation Pipeline
//!
//! Checks run in a fixed order and the first failure is returned:
//!
//! 1. **Reference integrity**: every edge, marked output and external input
//!    resolves to a declared port of the right direction
//! 2. **Single producer**: no input is the destination of more than one edge
//! 3. **Acyclicity**: the edges, viewed as a graph over pass instances, have no
//!    directed cycle
//! 4. **Dangling inputs**: every required input has a producer, unless it is
//!    accepted as an external input by port or by graph policy
//!
//! Validation only reads the model. Running it twice on the same graph gives
//! the same answer, so it can be called after every builder step.
//!
//! # Cycle Detection
//! Depth-first search with three states per instance (unvisited, in progress,
//! done) and an explicit path. Reaching an in-progress instance means the path
//! from that instance to the current one is a cycle. Roots are visited in
//! insertion order and neighbours in edge order, so the reported cycle is
//! deterministic.

use std::collections::HashMap;

use crate::errors::ValidationError;
use crate::graph::model::PortIndex;
use crate::graph::{DanglingInputPolicy, GraphModel, PortDirection, PortRef};
use crate::observability::messages::validation::{
    CycleDetected, DanglingInputs, MultiProducerDetected, NoMarkedOutputs, ValidationCompleted,
    ValidationFailed, ValidationStarted,
};
use crate::observability::messages::StructuredLog;

/// Validate a graph model.
///
/// # Examples
///
/// ```
/// use the_render_graph::graph::{validate, GraphModel};
///
/// let graph = GraphModel::new("Empty");
/// assert!(validate(&graph).is_ok());
/// ```
pub fn validate(model: &GraphModel) -> Result<(), ValidationError> {
    let started = ValidationStarted {
        graph: model.name(),
        pass_count: model.pass_count(),
        edge_count: model.edge_count(),
    };
    let span = started.span("validate");
    let _guard = span.enter();
    started.log();

    match run_checks(model) {
        Ok(external_input_count) => {
            if model.marked_outputs().is_empty() {
                NoMarkedOutputs { graph: model.name() }.log();
            }
            ValidationCompleted {
                graph: model.name(),
                external_input_count,
            }
            .log();
            Ok(())
        }
        Err(error) => {
            ValidationFailed {
                graph: model.name(),
                error: &error,
            }
            .log();
            Err(error)
        }
    }
}

/// Returns the number of inputs the host has to supply.
fn run_checks(model: &GraphModel) -> Result<usize, ValidationError> {
    check_references(model)?;
    check_single_producer(model)?;

    if let Some(cycle) = find_cycle(model) {
        let names: Vec<&str> = cycle.iter().map(String::as_str).collect();
        CycleDetected {
            graph: model.name(),
            cycle: &names,
        }
        .log();
        return Err(ValidationError::Cycle { cycle });
    }

    check_dangling_inputs(model)
}

fn check_references(model: &GraphModel) -> Result<(), ValidationError> {
    for edge in model.edges() {
        check_reference(model, &edge.source, PortDirection::Output)?;
        check_reference(model, &edge.destination, PortDirection::Input)?;
    }
    for output in model.marked_outputs() {
        check_reference(model, output, PortDirection::Output)?;
    }
    for input in model.external_inputs() {
        check_reference(model, input, PortDirection::Input)?;
    }
    Ok(())
}

fn check_reference(
    model: &GraphModel,
    reference: &PortRef,
    direction: PortDirection,
) -> Result<(), ValidationError> {
    let unresolved = |reason: String| ValidationError::UnresolvedReference {
        graph: model.name().to_string(),
        reference: reference.clone(),
        reason,
    };

    let pass = model
        .pass(&reference.instance)
        .ok_or_else(|| unresolved(format!("no pass named '{}'", reference.instance)))?;

    if pass.port(&reference.port, direction).is_none() {
        return Err(unresolved(format!(
            "pass '{}' declares no {} port '{}'",
            reference.instance, direction, reference.port
        )));
    }
    Ok(())
}

/// Report the first input, in order of first appearance as an edge
/// destination, that has more than one producer.
fn check_single_producer(model: &GraphModel) -> Result<(), ValidationError> {
    let mut producers: HashMap<&PortRef, Vec<PortRef>> = HashMap::new();
    let mut destinations: Vec<&PortRef> = Vec::new();

    for edge in model.edges() {
        let entry = producers.entry(&edge.destination).or_default();
        if entry.is_empty() {
            destinations.push(&edge.destination);
        }
        entry.push(edge.source.clone());
    }

    for input in destinations {
        if let Some(sources) = producers.remove(input) {
            if sources.len() > 1 {
                MultiProducerDetected {
                    graph: model.name(),
                    input: &input.to_string(),
                    producer_count: sources.len(),
                }
                .log();
                return Err(ValidationError::MultiProducer {
                    input: input.clone(),
                    producers: sources,
                });
            }
        }
    }
    Ok(())
}

fn check_dangling_inputs(model: &GraphModel) -> Result<usize, ValidationError> {
    let ports = PortIndex::new(model);
    let mut dangling = Vec::new();
    let mut external = 0;

    for pass in model.passes() {
        for port in pass.inputs() {
            if port.optional {
                continue;
            }
            let port_ref = PortRef::new(pass.name(), port.name.as_str());
            if !ports.producers(&port_ref).is_empty() {
                continue;
            }
            if ports.is_external_input(&port_ref) {
                external += 1;
            } else {
                dangling.push(port_ref);
            }
        }
    }

    if dangling.is_empty() {
        return Ok(external);
    }

    let names: Vec<String> = dangling.iter().map(|port| port.to_string()).collect();
    match model.dangling_input_policy() {
        DanglingInputPolicy::AllowExternal => {
            DanglingInputs {
                graph: model.name(),
                inputs: &names,
                accepted: true,
            }
            .log();
            Ok(external + dangling.len())
        }
        DanglingInputPolicy::Reject => {
            DanglingInputs {
                graph: model.name(),
                inputs: &names,
                accepted: false,
            }
            .log();
            Err(ValidationError::DanglingInput { inputs: dangling })
        }
    }
}

#[derive(Clone, Copy, PartialEq)]
enum VisitState {
    Unvisited,
    InProgress,
    Done,
}

/// Successors of each pass by insertion index, in edge order. Edges whose
/// ends do not resolve are skipped.
pub(crate) fn successors(model: &GraphModel) -> Vec<Vec<usize>> {
    let mut adjacency = vec![Vec::new(); model.pass_count()];
    for edge in model.edges() {
        let source = model.insertion_index(&edge.source.instance);
        let destination = model.insertion_index(&edge.destination.instance);
        if let (Some(source), Some(destination)) = (source, destination) {
            adjacency[source].push(destination);
        }
    }
    adjacency
}

/// Find a directed cycle over pass instances.
///
/// The cycle is returned in traversal order starting at the instance where
/// it was entered, without repeating that instance at the end.
pub(crate) fn find_cycle(model: &GraphModel) -> Option<Vec<String>> {
    let adjacency = successors(model);
    let mut state = vec![VisitState::Unvisited; adjacency.len()];

    for root in 0..adjacency.len() {
        if state[root] == VisitState::Unvisited {
            if let Some(cycle) = dfs_cycle_detection(root, &adjacency, &mut state) {
                let passes = model.passes();
                return Some(cycle.into_iter().map(|i| passes[i].name().to_string()).collect());
            }
        }
    }
    None
}

/// Iterative so path length is bounded by memory, not by the thread stack.
/// Each frame holds a node on the current path and the position of the next
/// successor to explore.
fn dfs_cycle_detection(
    root: usize,
    adjacency: &[Vec<usize>],
    state: &mut [VisitState],
) -> Option<Vec<usize>> {
    let mut path: Vec<(usize, usize)> = vec![(root, 0)];
    state[root] = VisitState::InProgress;

    while let Some(frame) = path.last_mut() {
        let (node, cursor) = *frame;
        let Some(&next) = adjacency[node].get(cursor) else {
            path.pop();
            state[node] = VisitState::Done;
            continue;
        };
        frame.1 += 1;

        match state[next] {
            VisitState::InProgress => {
                let start = path.iter().position(|&(n, _)| n == next).unwrap_or(0);
                return Some(path[start..].iter().map(|&(n, _)| n).collect());
            }
            VisitState::Unvisited => {
                state[next] = VisitState::InProgress;
                path.push((next, 0));
            }
            VisitState::Done => {}
        }
    }
    None
}
