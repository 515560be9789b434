use std::fmt;

use serde::Serialize;

use crate::graph::PortRef;

/// A directed connection from an output port to an input port.
///
/// Edges are only created through [`crate::graph::GraphModel::add_edge`],
/// which has already checked that both ends resolve and point the right way.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Edge {
    pub source: PortRef,
    pub destination: PortRef,
}

impl Edge {
    pub fn new(source: PortRef, destination: PortRef) -> Self {
        Self {
            source,
            destination,
        }
    }

    /// True when both ends sit on the same pass instance
    pub fn is_self_loop(&self) -> bool {
        self.source.instance == self.destination.instance
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source, self.destination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_display_and_self_loop() {
        let edge = Edge::new(PortRef::new("A", "out"), PortRef::new("B", "in"));
        assert_eq!(edge.to_string(), "A.out -> B.in");
        assert!(!edge.is_self_loop());

        let edge = Edge::new(PortRef::new("A", "out"), PortRef::new("A", "in"));
        assert!(edge.is_self_loop());
    }
}
