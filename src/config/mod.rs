// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod description;
mod loader;

pub mod consts;

pub use description::{EdgeDescription, GraphDescription, PassDescription};
pub use loader::{
    load_and_register, load_description, load_graph, parse_description, DescriptionFormat,
};
