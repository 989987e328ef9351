//! Cadence Xcelium (`xrun`) backend.
//!
//! Root of the Cadence family. Incisive is derived from this table.

use crate::backend::arguments::{ArgumentDefinition, ArgumentSink};
use crate::backend::descriptor::BackendDescriptor;
use crate::backend::table::{Backend, BackendError, UnsupportedStandard};
use crate::command::Step;
use crate::options::{OptionDeclaration, Phase, SourceLanguage};
use crate::standard::StandardVersion;

/// Registry name of the backend.
pub const NAME: &str = "xcelium";

/// Build the Xcelium backend table.
pub fn backend() -> Result<Backend, BackendError> {
    let mut descriptor = BackendDescriptor::new(NAME, "xrun", "xcelium");
    descriptor.capabilities.gui = true;
    descriptor.compile_options = vec![
        OptionDeclaration::list("xcelium.xrun_vhdl_flags", Phase::Compile)
            .for_language(SourceLanguage::Vhdl)
            .with_help("Extra flags passed to xrun when compiling VHDL"),
        OptionDeclaration::list("xcelium.xrun_verilog_flags", Phase::Compile)
            .for_language(SourceLanguage::Verilog)
            .with_help("Extra flags passed to xrun when compiling Verilog"),
        OptionDeclaration::boolean("xcelium.xrun_linedebug", Phase::Compile, "-linedebug")
            .with_help("Enable line-level debugging"),
    ];
    descriptor.simulate_options = vec![
        OptionDeclaration::list("xcelium.xrun_sim_flags", Phase::Simulate)
            .with_help("Extra flags passed to xrun when simulating"),
        OptionDeclaration::string("xcelium.xrun_access", Phase::Simulate, "-access")
            .with_help("Read/write/connectivity access for the design (e.g., +rwc)"),
    ];

    Backend::root(descriptor, translate_standard, step_tokens)
        .compile_prelude([
            "-compile",
            "-nocopyright",
            "-licqueue",
            "-nowarn",
            "DLCPTH",
            "-nowarn",
            "DLCVAR",
        ])
        .simulate_prelude(["-nocopyright", "-licqueue", "-run", "-exit"])
        .register_arguments(register_arguments)
        .build()
}

/// Flags shared by every `xrun`-compatible executable.
pub fn register_arguments(sink: &mut dyn ArgumentSink) {
    sink.add_argument(
        ArgumentDefinition::new(
            "cdslib",
            "The cds.lib file to use. If not given, a generated one is used",
        )
        .forwarded_as("-cdslib"),
    );
    sink.add_argument(
        ArgumentDefinition::new(
            "hdlvar",
            "The hdl.var file to use. If not given, no hdl.var file is used",
        )
        .forwarded_as("-hdlvar"),
    );
}

fn translate_standard(
    _descriptor: &BackendDescriptor,
    standard: StandardVersion,
) -> Result<String, UnsupportedStandard> {
    let flag = match standard {
        StandardVersion::Vhdl1993 => "-v93",
        StandardVersion::Vhdl2002 => "-v200x -extv200x",
        StandardVersion::Vhdl2008 => "-v200x -extv200x -inc_v200x_pkg",
    };
    Ok(flag.to_string())
}

/// `-work <lib>` plus sources, or `-top <lib>.<unit>`.
pub fn step_tokens(step: &Step<'_>) -> Vec<String> {
    match step {
        Step::Compile { library, sources } => {
            let mut tokens = vec!["-work".to_string(), library.to_string()];
            tokens.extend(sources.iter().map(|s| s.to_string_lossy().into_owned()));
            tokens
        }
        Step::Simulate { library, top } => vec!["-top".to_string(), format!("{}.{}", library, top)],
    }
}
