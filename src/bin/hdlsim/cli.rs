//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// hdlsim - Drive HDL simulators through one backend contract
#[derive(Parser)]
#[command(name = "hdlsim")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file to use instead of .hdlsim/config.toml
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Inspect simulator backends
    Backends(BackendsArgs),

    /// Show the compile and simulate command lines for a backend
    Flags(FlagsArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct BackendsArgs {
    #[command(subcommand)]
    pub command: BackendsCommands,
}

#[derive(Subcommand)]
pub enum BackendsCommands {
    /// List registered backends and whether they are installed
    List,

    /// Show a backend's identity, capabilities and options
    Show(ShowArgs),
}

#[derive(Args)]
pub struct ShowArgs {
    /// Backend name
    pub name: String,

    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct FlagsArgs {
    /// Simulator backend (auto-detected from PATH if not given)
    #[arg(long, env = "HDLSIM_SIMULATOR")]
    pub simulator: Option<String>,

    /// VHDL standard (93, 02, 08)
    #[arg(long = "std", value_name = "STANDARD")]
    pub standard: Option<String>,

    /// Set an option, e.g. `-o ghdl.a_flags="-fexplicit -frelaxed"`
    #[arg(short = 'o', long = "option", value_name = "NAME=VALUE")]
    pub options: Vec<String>,

    /// Work library for the compile step
    #[arg(long, default_value = "work")]
    pub library: String,

    /// Top-level unit for the simulate step
    #[arg(long)]
    pub top: Option<String>,

    /// Print as JSON
    #[arg(long)]
    pub json: bool,

    /// Source files for the compile step
    pub sources: Vec<PathBuf>,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
