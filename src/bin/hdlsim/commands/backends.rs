//! `hdlsim backends` command
//!
//! List and show simulator backends.

use anyhow::Result;

use crate::cli::{BackendsArgs, BackendsCommands, ShowArgs};
use crate::commands::Session;
use hdlsim::backend::{get_backend_summaries, BackendAvailability};
use hdlsim::{Phase, StandardVersion};

pub fn execute(args: BackendsArgs, session: &Session) -> Result<()> {
    match args.command {
        BackendsCommands::List => list_backends(session),
        BackendsCommands::Show(show_args) => show_backend(&show_args, session),
    }
}

fn list_backends(session: &Session) -> Result<()> {
    let summaries = get_backend_summaries(&session.registry);

    println!("Simulator Backends:");
    println!();

    for summary in summaries {
        let status = match &summary.availability {
            BackendAvailability::Available { path } => format!("installed ({})", path.display()),
            BackendAvailability::NotInstalled { .. } => "not installed".to_string(),
        };
        let contexts = if summary.extended_contexts { "yes" } else { "no" };

        println!("  {} ({})", summary.name, summary.executable);
        if let Some(parent) = &summary.parent {
            println!("    Based on:   {}", parent);
        }
        println!("    Status:     {}", status);
        println!("    Contexts:   {}", contexts);
        println!();
    }

    Ok(())
}

fn show_backend(args: &ShowArgs, session: &Session) -> Result<()> {
    let backend = session.registry.get(&args.name)?;
    let arguments = session.registry.arguments_for(&args.name)?;
    let id = backend.identity();

    if args.json {
        let standards: serde_json::Map<String, serde_json::Value> = StandardVersion::ALL
            .iter()
            .map(|s| {
                let flag = match backend.translate_standard(*s) {
                    Ok(flag) => serde_json::Value::String(flag),
                    Err(_) => serde_json::Value::Null,
                };
                (s.year().to_string(), flag)
            })
            .collect();
        let report = serde_json::json!({
            "descriptor": id,
            "parent": backend.parent(),
            "standards": standards,
            "arguments": arguments,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Backend: {}", id.name);
    println!();
    println!("Identity:");
    println!("  Executable:     {}", id.executable);
    println!("  Option prefix:  {}", id.option_prefix);
    if let Some(parent) = backend.parent() {
        println!("  Based on:       {}", parent);
    }
    println!();

    println!("Capabilities:");
    println!("  VHDL-2008 contexts: {}", backend.supports_extended_contexts());
    println!("  GUI:                {}", backend.supports_gui());
    println!();

    println!("Standards:");
    for standard in StandardVersion::ALL {
        match backend.translate_standard(standard) {
            Ok(flag) => println!("  {}: {}", standard, flag),
            Err(_) => println!("  {}: unsupported", standard),
        }
    }
    println!();

    for phase in [Phase::Compile, Phase::Simulate] {
        println!("{} options:", capitalize(phase.as_str()));
        let declared = backend.declared_options(phase);
        if declared.is_empty() {
            println!("  (none)");
        }
        for decl in declared {
            let scope = decl
                .language
                .map(|l| format!(", {} only", l))
                .unwrap_or_default();
            println!("  {} ({}{})", decl.name, decl.kind, scope);
            if !decl.help.is_empty() {
                println!("      {}", decl.help);
            }
        }
        println!();
    }

    println!("Arguments:");
    if arguments.is_empty() {
        println!("  (none)");
    }
    for arg in &arguments {
        println!("  --{}  {}", arg.name, arg.help);
    }

    Ok(())
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
