// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Pass type and graph registries.
//!
//! Both registries are filled during start-up and read afterwards. Neither is
//! a global: a [`PassRegistry`] is handed to whatever builds graphs, and the
//! [`GraphRegistry`] to populate is passed explicitly to each build call.

mod graph_registry;
mod pass_registry;
mod shared;

pub use graph_registry::{DuplicateGraphPolicy, GraphRegistry, GraphRegistryOptions, RegisteredGraph};
pub use pass_registry::{PassInfo, PassRegistry};
pub use shared::SharedGraphRegistry;
