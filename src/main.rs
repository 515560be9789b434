// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use the_render_graph::config::load_and_register;
use the_render_graph::library::StandardLibrary;
use the_render_graph::registry::{
    DuplicateGraphPolicy, GraphRegistry, GraphRegistryOptions, PassRegistry,
};

/// Build, validate and schedule render graphs from description files
#[derive(Parser)]
#[command(name = "the-render-graph")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Graph description files (.yaml, .yml, .toml or .json)
    #[arg(required_unless_present = "list_passes")]
    files: Vec<PathBuf>,

    /// Replace a graph registered earlier under the same name instead of failing
    #[arg(long)]
    replace_duplicates: bool,

    /// Print execution plans as JSON
    #[arg(long)]
    json: bool,

    /// List the available pass types and exit
    #[arg(long)]
    list_passes: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("❌ {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Returns whether every file registered cleanly.
fn run(cli: &Cli) -> Result<bool> {
    let passes = PassRegistry::with_library(&StandardLibrary)
        .context("Failed to load the standard pass library")?;

    if cli.list_passes {
        list_passes(&passes);
        return Ok(true);
    }

    let options = GraphRegistryOptions {
        duplicate_graphs: if cli.replace_duplicates {
            DuplicateGraphPolicy::Replace
        } else {
            DuplicateGraphPolicy::Reject
        },
    };
    let mut graphs = GraphRegistry::new(options);

    let mut all_ok = true;
    for (i, file) in cli.files.iter().enumerate() {
        if i > 0 && !cli.json {
            println!("\n{}", "─".repeat(80));
        }

        match load_and_register(file, &passes, &mut graphs) {
            Ok(graph) => {
                if cli.json {
                    let json = serde_json::to_string_pretty(graph.plan())
                        .with_context(|| format!("Failed to serialize plan for '{}'", graph.name()))?;
                    println!("{}", json);
                } else {
                    println!("📄 {}", file.display());
                    println!("{}", graph.plan());
                }
            }
            Err(e) => {
                all_ok = false;
                eprintln!("❌ Failed to register {}: {}", file.display(), e);
            }
        }
    }

    if !cli.json {
        println!("\n✅ {} of {} graphs registered", graphs.len(), cli.files.len());
    }
    Ok(all_ok)
}

fn list_passes(passes: &PassRegistry) {
    for type_name in passes.type_names() {
        let Some(info) = passes.info(type_name) else {
            continue;
        };
        println!("{:<18} {}", info.type_name, info.description);
        if let Some(schema) = passes.schema(type_name) {
            for spec in schema.specs() {
                let default = spec
                    .default
                    .as_ref()
                    .map(|value| format!(" = {}", value))
                    .unwrap_or_default();
                println!("    {:<24} {}{}", spec.key, spec.kind, default);
            }
        }
    }
}
