//! `hdlsim completions` command
//!
//! Generates shell completions for various shells.

use std::io;

use anyhow::Result;
use clap::Command;
use clap_complete::generate;

use crate::cli::CompletionsArgs;

pub fn execute(args: CompletionsArgs, mut cmd: Command) -> Result<()> {
    let name = cmd.get_name().to_string();

    generate(args.shell, &mut cmd, name, &mut io::stdout());

    Ok(())
}
