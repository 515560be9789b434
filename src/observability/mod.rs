// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and tracing.
//!
//! All diagnostic and operational log output of the engine goes through the
//! message types in [`messages`]. Each message is a small struct with a
//! `Display` implementation for the human readable text and a
//! [`messages::StructuredLog`] implementation that emits the event with
//! structured fields at the message's level.
//!
//! # Usage
//!
//! ```rust
//! use the_render_graph::observability::messages::StructuredLog;
//! use the_render_graph::observability::messages::registry::PassTypeRegistered;
//!
//! let msg = PassTypeRegistered {
//!     type_name: "ToneMapper",
//!     registered_count: 4,
//! };
//!
//! msg.log();
//! assert_eq!(msg.to_string(), "Registered pass type 'ToneMapper' (4 types available)");
//! ```

pub mod messages;
