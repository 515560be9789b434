// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::any::Any;

use crate::traits::RenderPass;

/// A placeholder body for pass types whose compute lives in the host.
///
/// The engine never runs a pass, so for passes it only describes (ports and
/// parameters) this stands in for the host's implementation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpaquePass {
    type_name: String,
}

impl OpaquePass {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
        }
    }
}

impl RenderPass for OpaquePass {
    fn name(&self) -> &str {
        &self.type_name
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
