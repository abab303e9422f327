use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "simviz", version, about = "Simulation display data tools")]
pub struct Cli {
    /// Log at debug level (RUST_LOG still takes precedence)
    #[arg(long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a default layout file (.json or .toml)
    Init {
        path: PathBuf,
        #[arg(long, default_value = "default")]
        name: String,
    },
    /// Load and validate a layout file
    Check { path: PathBuf },
    /// Push recorded samples through a component's store and print the result
    Replay {
        #[arg(long)]
        layout: PathBuf,
        #[arg(long)]
        component: String,
        #[arg(long)]
        input: PathBuf,
        #[arg(long, requires = "end", allow_hyphen_values = true)]
        start: Option<f64>,
        #[arg(long, requires = "start", allow_hyphen_values = true)]
        end: Option<f64>,
        /// Print every retained sample instead of the shown window
        #[arg(long, conflicts_with_all = ["start", "end"])]
        all: bool,
    },
}
