// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Deterministic topological ordering of pass instances.
//!
//! Uses Kahn's algorithm: an instance becomes ready once every edge into it
//! has been accounted for. Ready instances wait in a [`BinaryHeap`] ordered by
//!
//! 1. **Priority hint** (higher first, no hint counts as
//!    [`DEFAULT_PRIORITY`])
//! 2. **Insertion order** (earlier first)
//!
//! so repeated scheduling of an unchanged graph always yields the same
//! sequence, independent of hash map iteration or traversal order.
//!
//! # Examples
//!
//! ```
//! use the_render_graph::graph::{schedule, GraphModel};
//!
//! let graph = GraphModel::new("Empty");
//! assert_eq!(schedule(&graph).unwrap(), Vec::<String>::new());
//! ```

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::config::consts::DEFAULT_PRIORITY;
use crate::errors::ValidationError;
use crate::graph::validation::{find_cycle, successors};
use crate::graph::GraphModel;

/// A pass whose producers have all been scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ReadyPass {
    priority: i32,
    index: usize,
}

impl Ord for ReadyPass {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap: higher priority pops first, then lower insertion index
        match self.priority.cmp(&other.priority) {
            Ordering::Equal => other.index.cmp(&self.index),
            other_ordering => other_ordering,
        }
    }
}

impl PartialOrd for ReadyPass {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Compute the execution order of a graph's pass instances.
///
/// Every edge's source precedes its destination. A graph that still contains
/// a cycle fails with the same [`ValidationError::Cycle`] that
/// [`crate::graph::validate`] reports.
pub fn schedule(model: &GraphModel) -> Result<Vec<String>, ValidationError> {
    let order = schedule_indices(model)?;
    let passes = model.passes();
    Ok(order
        .into_iter()
        .map(|i| passes[i].name().to_string())
        .collect())
}

/// Group the execution order into dependency levels.
///
/// An instance's level is the length of the longest edge path reaching it, so
/// level 0 holds the instances without producers and no two instances in one
/// level depend on each other. Within a level, instances keep their
/// [`schedule`] order.
pub fn schedule_levels(model: &GraphModel) -> Result<Vec<Vec<String>>, ValidationError> {
    let order = schedule_indices(model)?;
    let levels = level_of_each(model, &order);
    let passes = model.passes();

    let mut grouped: Vec<Vec<String>> = Vec::new();
    for index in order {
        let level = levels[index];
        if grouped.len() <= level {
            grouped.resize_with(level + 1, Vec::new);
        }
        grouped[level].push(passes[index].name().to_string());
    }
    Ok(grouped)
}

/// Level of every instance by insertion index, given a topological order.
pub(crate) fn level_of_each(model: &GraphModel, order: &[usize]) -> Vec<usize> {
    let adjacency = successors(model);
    let mut levels = vec![0usize; adjacency.len()];
    for &node in order {
        for &next in &adjacency[node] {
            levels[next] = levels[next].max(levels[node] + 1);
        }
    }
    levels
}

pub(crate) fn schedule_indices(model: &GraphModel) -> Result<Vec<usize>, ValidationError> {
    let adjacency = successors(model);
    let mut in_degree = vec![0usize; adjacency.len()];
    for targets in &adjacency {
        for &target in targets {
            in_degree[target] += 1;
        }
    }

    let ready_pass = |index: usize| ReadyPass {
        priority: model.passes()[index].priority().unwrap_or(DEFAULT_PRIORITY),
        index,
    };

    let mut ready: BinaryHeap<ReadyPass> = in_degree
        .iter()
        .enumerate()
        .filter(|&(_, &degree)| degree == 0)
        .map(|(index, _)| ready_pass(index))
        .collect();

    let mut order = Vec::with_capacity(adjacency.len());
    while let Some(next) = ready.pop() {
        order.push(next.index);
        for &target in &adjacency[next.index] {
            in_degree[target] -= 1;
            if in_degree[target] == 0 {
                ready.push(ready_pass(target));
            }
        }
    }

    if order.len() < adjacency.len() {
        let cycle = find_cycle(model).unwrap_or_else(|| {
            // Kahn left these behind, so they sit on or behind a cycle
            in_degree
                .iter()
                .enumerate()
                .filter(|&(_, &degree)| degree > 0)
                .map(|(index, _)| model.passes()[index].name().to_string())
                .collect()
        });
        return Err(ValidationError::Cycle { cycle });
    }

    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::test_fixtures::{chain, pass};
    use crate::graph::Port;

    fn diamond() -> GraphModel {
        let mut graph = GraphModel::new("Diamond");
        graph.add_pass(pass("Sink", vec![Port::input("a"), Port::input("b")], vec![Port::output("out")])).unwrap();
        graph.add_pass(pass("Left", vec![Port::input("in")], vec![Port::output("out")])).unwrap();
        graph.add_pass(pass("Right", vec![Port::input("in")], vec![Port::output("out")])).unwrap();
        graph.add_pass(pass("Source", vec![], vec![Port::output("out")])).unwrap();
        graph.connect("Source.out", "Right.in").unwrap();
        graph.connect("Source.out", "Left.in").unwrap();
        graph.connect("Left.out", "Sink.a").unwrap();
        graph.connect("Right.out", "Sink.b").unwrap();
        graph
    }

    fn assert_topological(graph: &GraphModel, order: &[String]) {
        let position = |name: &str| order.iter().position(|n| n == name).unwrap();

        let mut sorted = order.to_vec();
        sorted.sort();
        let mut expected: Vec<String> = graph.passes().iter().map(|p| p.name().to_string()).collect();
        expected.sort();
        assert_eq!(sorted, expected, "order must be a permutation of the passes");

        for edge in graph.edges() {
            assert!(
                position(&edge.source.instance) < position(&edge.destination.instance),
                "{} must run before {}",
                edge.source.instance,
                edge.destination.instance
            );
        }
    }

    #[test]
    fn test_chain_schedules_in_dependency_order() {
        let graph = chain("Chain", &["P1", "P2", "P3"]);
        assert_eq!(schedule(&graph).unwrap(), vec!["P1", "P2", "P3"]);
    }

    #[test]
    fn test_dependencies_override_insertion_order() {
        let graph = diamond();
        let order = schedule(&graph).unwrap();

        assert_topological(&graph, &order);
        assert_eq!(order, vec!["Source", "Left", "Right", "Sink"]);
    }

    #[test]
    fn test_schedule_is_deterministic() {
        let graph = diamond();
        let first = schedule(&graph).unwrap();
        for _ in 0..10 {
            assert_eq!(schedule(&graph).unwrap(), first);
        }
    }

    #[test]
    fn test_priority_hint_breaks_ties() {
        struct TestCase {
            name: &'static str,
            priorities: [Option<i32>; 3],
            expected: [&'static str; 3],
        }

        let test_cases = vec![
            TestCase { name: "no hints keeps insertion order", priorities: [None, None, None], expected: ["A", "B", "C"] },
            TestCase { name: "higher hint runs first", priorities: [None, None, Some(5)], expected: ["C", "A", "B"] },
            TestCase { name: "negative hint runs last", priorities: [Some(-1), None, None], expected: ["B", "C", "A"] },
            TestCase { name: "equal hints fall back to insertion", priorities: [Some(2), Some(2), None], expected: ["A", "B", "C"] },
        ];

        for test_case in test_cases {
            let mut graph = GraphModel::new("Independent");
            for (name, priority) in ["A", "B", "C"].iter().zip(test_case.priorities) {
                let mut instance = pass(name, vec![], vec![Port::output("out")]);
                if let Some(priority) = priority {
                    instance = instance.with_priority(priority);
                }
                graph.add_pass(instance).unwrap();
            }

            assert_eq!(schedule(&graph).unwrap(), test_case.expected, "{}", test_case.name);
        }
    }

    #[test]
    fn test_priority_never_overrides_an_edge() {
        let mut graph = chain("Chain", &["First", "Second"]);
        graph
            .add_pass(pass("Urgent", vec![], vec![Port::output("out")]).with_priority(10))
            .unwrap();

        let order = schedule(&graph).unwrap();
        assert_eq!(order, vec!["Urgent", "First", "Second"]);

        let mut graph = GraphModel::new("Reversed");
        graph.add_pass(pass("Late", vec![], vec![Port::output("out")]).with_priority(-5)).unwrap();
        graph.add_pass(pass("Eager", vec![Port::input("in")], vec![]).with_priority(100)).unwrap();
        graph.connect("Late.out", "Eager.in").unwrap();
        assert_eq!(schedule(&graph).unwrap(), vec!["Late", "Eager"]);
    }

    #[test]
    fn test_schedule_reports_cycle() {
        let mut graph = chain("Loop", &["P1", "P2", "P3"]);
        graph.connect("P3.out", "P1.in").unwrap();

        assert_eq!(
            schedule(&graph),
            Err(ValidationError::Cycle {
                cycle: vec!["P1".to_string(), "P2".to_string(), "P3".to_string()],
            })
        );
    }

    #[test]
    fn test_schedule_levels() {
        let graph = diamond();
        let levels = schedule_levels(&graph).unwrap();
        assert_eq!(
            levels,
            vec![
                vec!["Source".to_string()],
                vec!["Left".to_string(), "Right".to_string()],
                vec!["Sink".to_string()],
            ]
        );
    }

    #[test]
    fn test_level_is_longest_path() {
        let mut graph = chain("Skip", &["A", "B", "C"]);
        graph.add_pass(pass("D", vec![Port::input("near"), Port::input("far")], vec![])).unwrap();
        graph.connect("A.out", "D.far").unwrap();
        graph.connect("C.out", "D.near").unwrap();

        let levels = schedule_levels(&graph).unwrap();
        assert_eq!(levels.len(), 4);
        assert_eq!(levels[3], vec!["D".to_string()]);
    }
}
