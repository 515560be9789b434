// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! Messages are organized by subsystem:
//!
//! * `builder` - graph construction events (passes, edges, outputs)
//! * `registry` - pass type, pass library and graph registration events
//! * `scheduler` - execution order computation
//! * `validation` - validation lifecycle and the faults it finds

use std::fmt::Display;

use tracing::Span;

pub mod builder;
pub mod registry;
pub mod scheduler;
pub mod validation;

/// A log message that knows its level and its structured fields.
pub trait StructuredLog: Display {
    /// Emit the message as a tracing event
    fn log(&self);

    /// Open a span carrying the message's fields
    fn span(&self, name: &str) -> Span;
}
