//! Synth command: stack configuration in, template out.

use anyhow::{Context, Result};
use std::path::Path;
use stratus_core::{synthesize, StackBuilder, StackConfig};

pub fn run(config_path: &Path, output: Option<&Path>, compact: bool) -> Result<()> {
    let config = StackConfig::load(config_path)
        .with_context(|| format!("Failed to load stack config from {}", config_path.display()))?;

    let graph =
        StackBuilder::new(config)?.build().context("Stack construction failed")?;
    let template = synthesize(&graph);

    let rendered = if compact { template.to_compact_json()? } else { template.to_json()? };

    match output {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("Failed to write template to {}", path.display()))?;
            eprintln!("Wrote template to {}", path.display());
        }
        None => println!("{}", rendered),
    }

    Ok(())
}
