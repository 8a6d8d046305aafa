use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "stratus")]
#[command(about = "Declarative deployment topology builder", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the resource graph and emit the synthesized template
    Synth {
        /// Path to the stack configuration file (JSON)
        #[arg(short, long)]
        config: PathBuf,

        /// Write the template to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Emit compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Validate a stack configuration without emitting anything
    Validate {
        /// Path to the stack configuration file (JSON)
        #[arg(short, long)]
        config: PathBuf,
    },
}

/// Logs go to stderr so a synthesized template on stdout stays clean.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    match cli.command {
        Commands::Synth { config, output, compact } => {
            commands::synth::run(&config, output.as_deref(), compact)
        }
        Commands::Validate { config } => commands::validate::run(&config),
    }
}
