// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Pass parameter dictionaries and the schemas pass types declare for them.
//!
//! The engine only checks the *structure* of a parameter dictionary: which
//! keys exist, what kind of value each holds, and whether enum values are in
//! range. What a parameter means is up to the pass.
//!
//! # Example
//! ```
//! use the_render_graph::graph::{ParamKind, ParamSpec, ParameterSchema, Parameters};
//!
//! let schema = ParameterSchema::new()
//!     .param(ParamSpec::optional("autoExposure", ParamKind::Bool, false))
//!     .param(ParamSpec::optional("exposureCompensation", ParamKind::Float, 0.0));
//!
//! let given = Parameters::new().with("exposureCompensation", 1);
//! let resolved = schema.resolve("ToneMapper", &given).unwrap();
//!
//! assert_eq!(resolved.get_bool("autoExposure"), Some(false));
//! assert_eq!(resolved.get_float("exposureCompensation"), Some(1.0));
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::RegistryError;

/// A single parameter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<ParamValue>),
    /// Structured settings, such as a nested options object
    Dict(BTreeMap<String, ParamValue>),
}

impl ParamValue {
    pub fn kind_name(&self) -> &'static str {
        match self {
            ParamValue::Bool(_) => "bool",
            ParamValue::Int(_) => "int",
            ParamValue::Float(_) => "float",
            ParamValue::String(_) => "string",
            ParamValue::List(_) => "list",
            ParamValue::Dict(_) => "dict",
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Bool(value) => write!(f, "{}", value),
            ParamValue::Int(value) => write!(f, "{}", value),
            ParamValue::Float(value) => write!(f, "{:?}", value),
            ParamValue::String(value) => write!(f, "'{}'", value),
            ParamValue::List(values) => {
                let items: Vec<String> = values.iter().map(|v| v.to_string()).collect();
                write!(f, "[{}]", items.join(", "))
            }
            ParamValue::Dict(entries) => {
                let items: Vec<String> = entries
                    .iter()
                    .map(|(key, value)| format!("{}: {}", key, value))
                    .collect();
                write!(f, "{{{}}}", items.join(", "))
            }
        }
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::Int(value.into())
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Float(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::String(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::String(value)
    }
}

/// Parameter dictionary handed to a pass factory. Keys iterate in sorted order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Parameters(pub BTreeMap<String, ParamValue>);

impl Parameters {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.get(key)? {
            ParamValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn get_int(&self, key: &str) -> Option<i64> {
        match self.get(key)? {
            ParamValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// Integers are widened, matching what the `Float` kind accepts
    pub fn get_float(&self, key: &str) -> Option<f64> {
        match self.get(key)? {
            ParamValue::Float(value) => Some(*value),
            ParamValue::Int(value) => Some(*value as f64),
            _ => None,
        }
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        match self.get(key)? {
            ParamValue::String(value) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ParamValue)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for Parameters {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

/// The kind of value a parameter accepts.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamKind {
    Bool,
    Int,
    /// Accepts integers as well, so `0` and `0.0` are interchangeable
    Float,
    String,
    /// A string drawn from a fixed set of values
    Enum(Vec<String>),
    List,
    Dict,
}

impl ParamKind {
    pub fn enumeration<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ParamKind::Enum(values.into_iter().map(Into::into).collect())
    }

    /// Check a value against this kind, describing the mismatch on failure
    pub fn check(&self, value: &ParamValue) -> Result<(), String> {
        match (self, value) {
            (ParamKind::Bool, ParamValue::Bool(_))
            | (ParamKind::Int, ParamValue::Int(_))
            | (ParamKind::Float, ParamValue::Float(_) | ParamValue::Int(_))
            | (ParamKind::String, ParamValue::String(_))
            | (ParamKind::List, ParamValue::List(_))
            | (ParamKind::Dict, ParamValue::Dict(_)) => Ok(()),
            (ParamKind::Enum(allowed), ParamValue::String(chosen)) => {
                if allowed.iter().any(|candidate| candidate == chosen) {
                    Ok(())
                } else {
                    Err(format!(
                        "'{}' is not one of [{}]",
                        chosen,
                        allowed.join(", ")
                    ))
                }
            }
            (kind, value) => Err(format!(
                "expected {} but got {} {}",
                kind,
                value.kind_name(),
                value
            )),
        }
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamKind::Bool => write!(f, "bool"),
            ParamKind::Int => write!(f, "int"),
            ParamKind::Float => write!(f, "float"),
            ParamKind::String => write!(f, "string"),
            ParamKind::Enum(values) => write!(f, "one of [{}]", values.join(", ")),
            ParamKind::List => write!(f, "list"),
            ParamKind::Dict => write!(f, "dict"),
        }
    }
}

/// Declaration of one accepted parameter key.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamSpec {
    pub key: String,
    pub kind: ParamKind,
    pub required: bool,
    pub default: Option<ParamValue>,
    pub description: String,
}

impl ParamSpec {
    /// A key that must always be supplied
    pub fn required(key: impl Into<String>, kind: ParamKind) -> Self {
        Self {
            key: key.into(),
            kind,
            required: true,
            default: None,
            description: String::new(),
        }
    }

    /// A key that falls back to `default` when omitted
    pub fn optional(key: impl Into<String>, kind: ParamKind, default: impl Into<ParamValue>) -> Self {
        Self {
            key: key.into(),
            kind,
            required: false,
            default: Some(default.into()),
            description: String::new(),
        }
    }

    /// A key that may be omitted and has no default
    pub fn maybe(key: impl Into<String>, kind: ParamKind) -> Self {
        Self {
            key: key.into(),
            kind,
            required: false,
            default: None,
            description: String::new(),
        }
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// The full set of parameters a pass type accepts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterSchema {
    specs: Vec<ParamSpec>,
}

impl ParameterSchema {
    pub fn new() -> Self {
        Self { specs: Vec::new() }
    }

    pub fn param(mut self, spec: ParamSpec) -> Self {
        self.specs.retain(|existing| existing.key != spec.key);
        self.specs.push(spec);
        self
    }

    pub fn get(&self, key: &str) -> Option<&ParamSpec> {
        self.specs.iter().find(|spec| spec.key == key)
    }

    pub fn specs(&self) -> &[ParamSpec] {
        &self.specs
    }

    /// Check `given` against the schema and fill in declared defaults.
    ///
    /// Fails on the first unknown key, wrongly-kinded value or missing
    /// required key, naming the key in the error.
    pub fn resolve(&self, type_name: &str, given: &Parameters) -> Result<Parameters, RegistryError> {
        let invalid = |key: &str, reason: String| RegistryError::InvalidParameter {
            type_name: type_name.to_string(),
            key: key.to_string(),
            reason,
        };

        for (key, value) in given.iter() {
            let spec = self
                .get(key)
                .ok_or_else(|| invalid(key.as_str(), "unknown parameter".to_string()))?;
            spec.kind
                .check(value)
                .map_err(|reason| invalid(key.as_str(), reason))?;
        }

        let mut resolved = given.clone();
        for spec in &self.specs {
            if resolved.contains_key(&spec.key) {
                continue;
            }
            match &spec.default {
                Some(default) => resolved.insert(spec.key.clone(), default.clone()),
                None if spec.required => {
                    return Err(invalid(spec.key.as_str(), "missing required parameter".to_string()));
                }
                None => {}
            }
        }

        Ok(resolved)
    }
}
