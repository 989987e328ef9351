//! `hdlsim flags` command
//!
//! Assemble the compile and simulate command lines for a backend without
//! running them.

use anyhow::{Context, Result};

use crate::cli::FlagsArgs;
use crate::commands::Session;
use hdlsim::{CommandBuilder, CompileStep, Phase, SimulateStep, StandardVersion};

pub fn execute(args: FlagsArgs, session: &Session) -> Result<()> {
    let name = args
        .simulator
        .as_deref()
        .or(session.config.run.simulator.as_deref());
    let backend = session.registry.select(name)?;

    let standard = match &args.standard {
        Some(text) => text.parse::<StandardVersion>()?,
        None => session.config.run.standard.unwrap_or_default(),
    };

    // Config first, then command-line options (last write wins)
    let mut values = backend.new_option_values();
    session
        .config
        .apply_options(&mut values)
        .context("invalid option in config")?;
    for option in &args.options {
        let (option_name, value) = option
            .split_once('=')
            .ok_or_else(|| anyhow::anyhow!("option `{}` must be given as NAME=VALUE", option))?;
        values.set_from_str(option_name.trim(), value)?;
    }

    let mut builder = CommandBuilder::new(backend, &values, standard)?;
    for definition in session.registry.arguments_for(backend.name())? {
        if let Some(value) = session.arguments.get(definition.name) {
            builder = builder.with_argument(&definition, value);
        }
    }

    let compile = if args.sources.is_empty() {
        None
    } else {
        Some(builder.compile(&CompileStep::new(args.library.clone(), args.sources.clone()))?)
    };
    let simulate = match &args.top {
        Some(top) => Some(builder.simulate(&SimulateStep::new(args.library.clone(), top.clone()))?),
        None => None,
    };
    let standard_flag = backend.translate_standard(standard)?;

    if args.json {
        let report = serde_json::json!({
            "simulator": backend.name(),
            "standard": standard,
            "standard_flag": standard_flag,
            "options": {
                "compile": values.all_for(Phase::Compile),
                "simulate": values.all_for(Phase::Simulate),
            },
            "compile": compile.as_ref().map(|c| c.tokens()),
            "simulate": simulate.as_ref().map(|c| c.tokens()),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("# simulator: {} ({})", backend.name(), backend.identity().executable);
    println!("# standard:  {} -> {}", standard, standard_flag);

    if compile.is_none() && simulate.is_none() {
        for phase in [Phase::Compile, Phase::Simulate] {
            println!("{} options: {}", phase, values.render(phase, None).join(" "));
        }
    }
    if let Some(cmd) = compile {
        println!("compile:  {}", cmd);
    }
    if let Some(cmd) = simulate {
        println!("simulate: {}", cmd);
    }

    Ok(())
}
