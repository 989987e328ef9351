//! GHDL backend.

use crate::backend::arguments::{ArgumentDefinition, ArgumentSink};
use crate::backend::descriptor::BackendDescriptor;
use crate::backend::table::{Backend, BackendError, UnsupportedStandard};
use crate::command::Step;
use crate::options::{OptionDeclaration, Phase};
use crate::standard::StandardVersion;

/// Registry name of the backend.
pub const NAME: &str = "ghdl";

/// Build the GHDL backend table.
pub fn backend() -> Result<Backend, BackendError> {
    let mut descriptor = BackendDescriptor::new(NAME, "ghdl", "ghdl");
    descriptor.capabilities.gui = true;
    descriptor.compile_options = vec![
        OptionDeclaration::list("ghdl.a_flags", Phase::Compile)
            .with_help("Extra flags passed to ghdl -a"),
        OptionDeclaration::boolean("ghdl.relaxed", Phase::Compile, "-frelaxed")
            .with_help("Relax some rules of the standard"),
    ];
    descriptor.simulate_options = vec![OptionDeclaration::list("ghdl.elab_flags", Phase::Simulate)
        .with_help("Extra flags passed to ghdl --elab-run")];

    // GHDL checks the standard during elaboration too
    Backend::root(descriptor, translate_standard, step_tokens)
        .compile_prelude(["-a"])
        .simulate_prelude(["--elab-run"])
        .standard_phases(vec![Phase::Compile, Phase::Simulate])
        .register_arguments(register_arguments)
        .build()
}

fn register_arguments(sink: &mut dyn ArgumentSink) {
    sink.add_argument(ArgumentDefinition::new(
        "gtkwave-fmt",
        "Save a .vcd or .ghw waveform to open in gtkwave",
    ));
}

fn translate_standard(
    _descriptor: &BackendDescriptor,
    standard: StandardVersion,
) -> Result<String, UnsupportedStandard> {
    let flag = match standard {
        StandardVersion::Vhdl1993 => "--std=93c",
        StandardVersion::Vhdl2002 => "--std=02",
        StandardVersion::Vhdl2008 => "--std=08",
    };
    Ok(flag.to_string())
}

fn step_tokens(step: &Step<'_>) -> Vec<String> {
    match step {
        Step::Compile { library, sources } => std::iter::once(format!("--work={}", library))
            .chain(sources.iter().map(|s| s.to_string_lossy().into_owned()))
            .collect(),
        Step::Simulate { library, top } => vec![format!("--work={}", library), top.to_string()],
    }
}
