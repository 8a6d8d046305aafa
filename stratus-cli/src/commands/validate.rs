//! Validate command: build the graph and report the outcome without emitting
//! a template.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;
use stratus_core::{StackBuilder, StackConfig};

pub fn run(config_path: &Path) -> Result<()> {
    let config = StackConfig::load(config_path)
        .with_context(|| format!("Failed to load stack config from {}", config_path.display()))?;

    match StackBuilder::new(config).and_then(|builder| builder.build()) {
        Ok(graph) => {
            println!(
                "{} {} ({} resources, {} edges)",
                "OK".green().bold(),
                graph.stack_name(),
                graph.nodes().len(),
                graph.edges().len()
            );
            Ok(())
        }
        Err(e) => {
            println!("{} [{} error] {}", "FAIL".red().bold(), e.kind(), e);
            std::process::exit(1);
        }
    }
}
