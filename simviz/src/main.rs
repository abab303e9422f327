mod commands;
mod handlers;
mod output;
mod replay;

use clap::Parser;
use commands::Cli;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
    handlers::handle_command(cli.command)
}
