// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Ports, data kinds and `"Pass.port"` addresses.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::consts::{ANY_DATA_KIND, DEFAULT_DATA_KIND, PORT_ADDRESS_SEPARATOR};
use crate::errors::ConstructionError;

/// Direction of a port. Fixed when the pass declares it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PortDirection {
    Input,
    Output,
}

impl fmt::Display for PortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortDirection::Input => write!(f, "input"),
            PortDirection::Output => write!(f, "output"),
        }
    }
}

/// Opaque type tag attached to a port.
///
/// The engine never interprets a data kind beyond comparing it: two ports may
/// be connected when their kinds are equal or when either is the wildcard `*`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataKind(pub String);

impl DataKind {
    pub fn new(kind: impl Into<String>) -> Self {
        Self(kind.into())
    }

    /// The wildcard kind, compatible with every other kind
    pub fn any() -> Self {
        Self(ANY_DATA_KIND.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_any(&self) -> bool {
        self.0 == ANY_DATA_KIND
    }

    pub fn is_compatible_with(&self, other: &DataKind) -> bool {
        self.is_any() || other.is_any() || self == other
    }
}

impl Default for DataKind {
    fn default() -> Self {
        Self(DEFAULT_DATA_KIND.to_string())
    }
}

impl fmt::Display for DataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DataKind {
    fn from(kind: &str) -> Self {
        Self::new(kind)
    }
}

/// A named, directional connection point declared by a pass.
///
/// An optional input carries a default supplied by the pass itself, so leaving
/// it unconnected is never an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Port {
    pub name: String,
    pub direction: PortDirection,
    pub data_kind: DataKind,
    pub optional: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
}

impl Port {
    pub fn input(name: impl Into<String>) -> Self {
        Self::new(name, PortDirection::Input)
    }

    pub fn output(name: impl Into<String>) -> Self {
        Self::new(name, PortDirection::Output)
    }

    fn new(name: impl Into<String>, direction: PortDirection) -> Self {
        Self {
            name: name.into(),
            direction,
            data_kind: DataKind::default(),
            optional: false,
            description: String::new(),
        }
    }

    pub fn with_kind(mut self, kind: impl Into<DataKind>) -> Self {
        self.data_kind = kind.into();
        self
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn is_input(&self) -> bool {
        self.direction == PortDirection::Input
    }

    pub fn is_output(&self) -> bool {
        self.direction == PortDirection::Output
    }
}

/// Address of a port on a named pass instance, written `"Pass.port"`.
///
/// The instance name is everything before the first separator, so port names
/// may themselves contain dots while instance names may not.
///
/// ```
/// use the_render_graph::graph::PortRef;
///
/// let port: PortRef = "ToneMapper.dst".parse().unwrap();
/// assert_eq!(port.instance, "ToneMapper");
/// assert_eq!(port.port, "dst");
/// assert_eq!(port.to_string(), "ToneMapper.dst");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PortRef {
    pub instance: String,
    pub port: String,
}

impl PortRef {
    pub fn new(instance: impl Into<String>, port: impl Into<String>) -> Self {
        Self {
            instance: instance.into(),
            port: port.into(),
        }
    }
}

impl fmt::Display for PortRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.instance, PORT_ADDRESS_SEPARATOR, self.port)
    }
}

impl FromStr for PortRef {
    type Err = ConstructionError;

    fn from_str(address: &str) -> Result<Self, Self::Err> {
        match address.split_once(PORT_ADDRESS_SEPARATOR) {
            Some((instance, port)) if !instance.is_empty() && !port.is_empty() => {
                Ok(Self::new(instance, port))
            }
            _ => Err(ConstructionError::InvalidPortAddress {
                address: address.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for PortRef {
    type Error = ConstructionError;

    fn try_from(address: String) -> Result<Self, Self::Error> {
        address.parse()
    }
}

impl From<PortRef> for String {
    fn from(port: PortRef) -> Self {
        port.to_string()
    }
}
