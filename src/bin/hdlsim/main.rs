//! hdlsim CLI - inspect simulator backends and assemble their command lines

use anyhow::Result;
use clap::{CommandFactory, FromArgMatches};
use tracing_subscriber::EnvFilter;

use hdlsim::backend::{BackendRegistry, ClapSink};

mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::Session;

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let registry = BackendRegistry::builtin()?;

    // Backends add their own flags to the parser
    let mut sink = ClapSink::new(Cli::command());
    registry.register_arguments(&mut sink);
    let command = sink.into_command();
    let matches = command.clone().get_matches();
    let cli = Cli::from_arg_matches(&matches)?;

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("hdlsim=debug")
    } else {
        EnvFilter::new("hdlsim=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let session = Session::new(registry, cli.config.as_deref(), &matches)?;

    // Execute command
    match cli.command {
        Commands::Backends(args) => commands::backends::execute(args, &session),
        Commands::Flags(args) => commands::flags::execute(args, &session),
        Commands::Completions(args) => commands::completions::execute(args, command),
    }
}
