//! Cadence Incisive (`irun`) backend.
//!
//! Derived from Xcelium. Incisive replaces the identity fields and option
//! lists, has no VHDL-2008 context support, and maps 2002 and 2008 to the
//! same extended-syntax flag. Prelude, step rendering and arguments are
//! inherited.

use crate::backend::arguments::no_arguments;
use crate::backend::descriptor::BackendDescriptor;
use crate::backend::table::{Backend, BackendError, UnsupportedStandard};
use crate::options::{OptionDeclaration, Phase, SourceLanguage};
use crate::standard::StandardVersion;

/// Registry name of the backend.
pub const NAME: &str = "incisive";

/// Build the Incisive backend table on top of `xcelium`.
pub fn backend(xcelium: &Backend) -> Result<Backend, BackendError> {
    Backend::derive(xcelium)
        .name(NAME)
        .executable("irun")
        .option_prefix("incisive")
        .compile_options(vec![
            OptionDeclaration::list("incisive.irun_vhdl_flags", Phase::Compile)
                .for_language(SourceLanguage::Vhdl)
                .with_help("Extra flags passed to irun when compiling VHDL"),
            OptionDeclaration::list("incisive.irun_verilog_flags", Phase::Compile)
                .for_language(SourceLanguage::Verilog)
                .with_help("Extra flags passed to irun when compiling Verilog"),
        ])
        .simulate_options(vec![OptionDeclaration::list(
            "incisive.irun_sim_flags",
            Phase::Simulate,
        )
        .with_help("Extra flags passed to irun when simulating")])
        // Shares cdslib/hdlvar with Xcelium, which registers them
        .register_arguments(no_arguments)
        .extended_contexts(false)
        .translate_standard(translate_standard)
        .build()
}

fn translate_standard(
    _descriptor: &BackendDescriptor,
    standard: StandardVersion,
) -> Result<String, UnsupportedStandard> {
    let flag = match standard {
        StandardVersion::Vhdl1993 => "-v93",
        StandardVersion::Vhdl2002 | StandardVersion::Vhdl2008 => "-v200x -extv200x",
    };
    Ok(flag.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::arguments::RecordingSink;
    use crate::backend::xcelium;

    fn pair() -> (Backend, Backend) {
        let parent = xcelium::backend().unwrap();
        let child = backend(&parent).unwrap();
        (parent, child)
    }

    #[test]
    fn test_identity() {
        let (_, incisive) = pair();
        let id = incisive.identity();
        assert_eq!(id.name, "incisive");
        assert_eq!(id.executable, "irun");
        assert_eq!(id.option_prefix, "incisive");
        assert_eq!(incisive.parent(), Some("xcelium"));
    }

    #[test]
    fn test_standard_flags_are_total() {
        let (_, incisive) = pair();
        for standard in StandardVersion::ALL {
            let flag = incisive.translate_standard(standard).unwrap();
            assert!(!flag.is_empty());
        }
        assert_eq!(
            incisive.translate_standard(StandardVersion::Vhdl2002).unwrap(),
            "-v200x -extv200x"
        );
        assert_eq!(
            incisive.translate_standard(StandardVersion::Vhdl2008).unwrap(),
            "-v200x -extv200x"
        );
        assert_eq!(incisive.translate_standard(StandardVersion::Vhdl1993).unwrap(), "-v93");
    }

    #[test]
    fn test_differs_from_parent_only_where_overridden() {
        let (xcelium, incisive) = pair();

        assert!(xcelium.supports_extended_contexts());
        assert!(!incisive.supports_extended_contexts());

        assert_eq!(
            xcelium.translate_standard(StandardVersion::Vhdl1993),
            incisive.translate_standard(StandardVersion::Vhdl1993)
        );
        assert_eq!(
            xcelium.translate_standard(StandardVersion::Vhdl2002),
            incisive.translate_standard(StandardVersion::Vhdl2002)
        );
        assert_ne!(
            xcelium.translate_standard(StandardVersion::Vhdl2008),
            incisive.translate_standard(StandardVersion::Vhdl2008)
        );

        let (x, i) = (xcelium.identity(), incisive.identity());
        assert_eq!(x.capabilities.gui, i.capabilities.gui);
        assert_eq!(x.compile_prelude, i.compile_prelude);
        assert_eq!(x.simulate_prelude, i.simulate_prelude);
        assert_eq!(x.standard_phases, i.standard_phases);
    }

    #[test]
    fn test_option_lists_fully_replaced() {
        let (_, incisive) = pair();
        let compile: Vec<_> = incisive
            .declared_options(Phase::Compile)
            .iter()
            .map(|d| d.name.as_str())
            .collect();
        assert_eq!(
            compile,
            vec!["incisive.irun_vhdl_flags", "incisive.irun_verilog_flags"]
        );
        assert!(!incisive.schema().contains("xcelium.xrun_linedebug"));
        assert_eq!(incisive.declared_options(Phase::Simulate).len(), 1);
    }

    #[test]
    fn test_argument_hook_is_a_no_op() {
        let (xcelium, incisive) = pair();
        let mut sink = RecordingSink::new();

        xcelium.register_arguments(&mut sink);
        let after_parent = sink.definitions().to_vec();

        incisive.register_arguments(&mut sink);
        incisive.register_arguments(&mut sink);
        assert_eq!(sink.definitions(), after_parent.as_slice());
    }
}
