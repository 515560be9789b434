//! Message types for execution order computation.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// An execution order was computed for a graph.
///
/// # Log Level
/// `debug!` - Scheduling is cheap and may be repeated
pub struct ScheduleComputed<'a> {
    pub graph: &'a str,
    pub order: &'a [String],
    pub level_count: usize,
}

impl Display for ScheduleComputed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Scheduled graph '{}' in {} levels: {}",
            self.graph,
            self.level_count,
            self.order.join(", ")
        )
    }
}

impl StructuredLog for ScheduleComputed<'_> {
    fn log(&self) {
        tracing::debug!(
            graph = self.graph,
            pass_count = self.order.len(),
            level_count = self.level_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "schedule",
            span_name = name,
            graph = self.graph,
            pass_count = self.order.len(),
        )
    }
}
