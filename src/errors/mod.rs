// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod config;
mod construction;
mod registry;
mod validation;

pub use config::ConfigError;
pub use construction::ConstructionError;
pub use registry::RegistryError;
pub use validation::{ValidationError, ValidationErrorKind};
