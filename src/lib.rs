// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod config;     // graph descriptions + loading
pub mod errors;     // error handling
pub mod graph;      // model, validation, scheduling
pub mod library;    // pass descriptors + standard passes
pub mod observability;
pub mod registry;   // pass type + graph registries
pub mod traits;     // pass and library abstractions
