use clap::Parser;
use std::path::PathBuf;

mod artifact;
mod cli;
mod commands;
mod domain;
mod logging;
mod services;

pub use cli::*;
pub use commands::*;
pub use domain::constants::*;
pub use domain::models::*;
pub use services::config::*;
pub use services::contracts::*;
pub use services::doctor::*;
pub use services::gate::*;
pub use services::output::*;
pub use services::preflight::{self, plan, ProcessExecutor, StepExecutor};
pub use services::storage::*;
pub use services::trust::*;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_tracing();

    let root = PathBuf::from(&cli.root);
    if !root.is_dir() {
        anyhow::bail!("root is not a directory: {}", root.display());
    }

    let code = match handle_gate_commands(&cli, &root)? {
        Some(code) => code,
        None => handle_runtime_commands(&cli, &root)?,
    };
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}
