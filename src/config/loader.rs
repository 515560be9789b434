// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::config::GraphDescription;
use crate::errors::ConfigError;
use crate::graph::GraphModel;
use crate::registry::{GraphRegistry, PassRegistry, RegisteredGraph};

/// File formats a graph description can be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptionFormat {
    Yaml,
    Toml,
    Json,
}

impl DescriptionFormat {
    /// Pick the format from the file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "yaml" | "yml" => Some(DescriptionFormat::Yaml),
            "toml" => Some(DescriptionFormat::Toml),
            "json" => Some(DescriptionFormat::Json),
            _ => None,
        }
    }
}

pub fn parse_description(
    content: &str,
    format: DescriptionFormat,
) -> Result<GraphDescription, ConfigError> {
    let description = match format {
        DescriptionFormat::Yaml => serde_yaml::from_str(content)?,
        DescriptionFormat::Toml => toml::from_str(content)?,
        DescriptionFormat::Json => serde_json::from_str(content)?,
    };
    Ok(description)
}

pub fn load_description<P: AsRef<Path>>(path: P) -> Result<GraphDescription, ConfigError> {
    let path = path.as_ref();
    let format = DescriptionFormat::from_path(path).ok_or_else(|| ConfigError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_description(&content, format)
}

/// Load a description file and build its graph. The graph is not validated.
pub fn load_graph<P: AsRef<Path>>(
    path: P,
    passes: &PassRegistry,
) -> Result<GraphModel, ConfigError> {
    load_description(path)?.build(passes)
}

/// Load, build, validate and register a graph under its described name.
///
/// The graph registry to populate is passed in; nothing is registered
/// anywhere else.
pub fn load_and_register<P: AsRef<Path>>(
    path: P,
    passes: &PassRegistry,
    graphs: &mut GraphRegistry,
) -> Result<Arc<RegisteredGraph>, ConfigError> {
    let description = load_description(path)?;
    let model = description.build(passes)?;
    Ok(graphs.register(description.name, model)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_format_from_extension() {
        let test_cases = vec![
            ("graph.yaml", Some(DescriptionFormat::Yaml)),
            ("graph.YML", Some(DescriptionFormat::Yaml)),
            ("graph.toml", Some(DescriptionFormat::Toml)),
            ("graph.json", Some(DescriptionFormat::Json)),
            ("graph.py", None),
            ("graph", None),
        ];

        for (file, expected) in test_cases {
            assert_eq!(DescriptionFormat::from_path(&PathBuf::from(file)), expected, "{}", file);
        }
    }

    #[test]
    fn test_parse_each_format() {
        let yaml = "name: Post\npasses:\n  - type: ToneMapper\n    params: { autoExposure: false }\n";
        let toml = "name = \"Post\"\n\n[[passes]]\ntype = \"ToneMapper\"\nparams = { autoExposure = false }\n";
        let json = r#"{"name": "Post", "passes": [{"type": "ToneMapper", "params": {"autoExposure": false}}]}"#;

        let inputs = vec![
            (yaml, DescriptionFormat::Yaml),
            (toml, DescriptionFormat::Toml),
            (json, DescriptionFormat::Json),
        ];

        let parsed: Vec<GraphDescription> = inputs
            .into_iter()
            .map(|(content, format)| parse_description(content, format).unwrap())
            .collect();

        assert_eq!(parsed[0], parsed[1]);
        assert_eq!(parsed[1], parsed[2]);
        assert_eq!(parsed[0].passes[0].params.get_bool("autoExposure"), Some(false));
    }

    #[test]
    fn test_load_description_errors() {
        let result = load_description("graph.py");
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat { .. })));

        let result = load_description("/definitely/not/here.yaml");
        assert!(matches!(result, Err(ConfigError::Io { .. })));

        let result = parse_description("name: [unclosed", DescriptionFormat::Yaml);
        assert!(matches!(result, Err(ConfigError::Yaml(_))));
    }
}
