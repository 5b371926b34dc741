use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

pub const DEFAULT_ROOT: &str = ".";

#[derive(Parser, Debug)]
#[command(
    name = "gatecheck",
    version,
    about = "Preflight gate, artifact contract checker and release gate health builder"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(
        long,
        global = true,
        default_value = DEFAULT_ROOT,
        help = "Repository root the gate runs against"
    )]
    pub root: String,
    #[arg(
        long,
        global = true,
        help = "Config file (defaults to <root>/gatecheck.toml)"
    )]
    pub config: Option<String>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fail-fast lint -> tests -> contract sequence.
    Preflight {
        #[command(subcommand)]
        command: PreflightCommands,
    },
    /// Artifact contract checks.
    Contract {
        #[command(subcommand)]
        command: ContractCommands,
    },
    /// Release gate health status.
    Gate {
        #[command(subcommand)]
        command: GateCommands,
    },
    /// Report on readiness of the repository being gated.
    Doctor,
}

#[derive(Subcommand, Debug)]
pub enum PreflightCommands {
    Run {
        #[arg(long, help = "Python interpreter substituted for {python}")]
        python: Option<String>,
    },
    Plan {
        #[arg(long, help = "Python interpreter substituted for {python}")]
        python: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ContractCommands {
    List,
    Lint,
    Check {
        names: Vec<String>,
        #[arg(long, default_value_t = false)]
        all: bool,
        #[arg(long, value_enum, default_value_t = Mode::Ci)]
        mode: Mode,
    },
}

#[derive(Subcommand, Debug)]
pub enum GateCommands {
    Build {
        #[arg(long, value_enum, default_value_t = Mode::Release)]
        mode: Mode,
        #[arg(long, help = "Output path relative to root (overrides [gate] out)")]
        out: Option<String>,
        #[arg(long, help = "File holding a hex ed25519 seed used to sign the status")]
        sign_key: Option<String>,
        #[arg(long, default_value_t = false, help = "Exit 1 when the gate is blocked")]
        enforce: bool,
    },
    Verify {
        #[arg(long)]
        status: String,
        #[arg(long, help = "Trusted public keys file (defaults to <root>/.gatecheck/trusted_keys.txt)")]
        trusted_keys: Option<String>,
    },
    Pubkey {
        #[arg(long)]
        sign_key: String,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Dev,
    Ci,
    Release,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Dev => "dev",
            Mode::Ci => "ci",
            Mode::Release => "release",
        }
    }
}
