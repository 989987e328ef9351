//! CLI integration tests for hdlsim.
//!
//! These tests run the binary in an isolated directory with its own HOME so
//! no user or project config leaks in.

use std::fs;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get the hdlsim binary command, isolated in `dir`.
fn hdlsim(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("hdlsim").unwrap();
    cmd.current_dir(dir.path())
        .env("HOME", dir.path())
        .env_remove("HDLSIM_SIMULATOR");
    cmd
}

/// Create a temporary directory for test runs.
fn temp_dir() -> TempDir {
    TempDir::new().unwrap()
}

// ============================================================================
// hdlsim backends
// ============================================================================

#[test]
fn test_backends_list_shows_all_builtins() {
    let tmp = temp_dir();

    hdlsim(&tmp)
        .args(["backends", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("xcelium (xrun)"))
        .stdout(predicate::str::contains("incisive (irun)"))
        .stdout(predicate::str::contains("Based on:   xcelium"))
        .stdout(predicate::str::contains("ghdl (ghdl)"));
}

#[test]
fn test_backends_show_derived_backend() {
    let tmp = temp_dir();

    hdlsim(&tmp)
        .args(["backends", "show", "incisive"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Based on:       xcelium"))
        .stdout(predicate::str::contains("VHDL-2008 contexts: false"))
        .stdout(predicate::str::contains("VHDL-2008: -v200x -extv200x"))
        .stdout(predicate::str::contains("VHDL-1993: -v93"))
        .stdout(predicate::str::contains("incisive.irun_sim_flags"))
        .stdout(predicate::str::contains("--cdslib"));
}

#[test]
fn test_backends_show_json() {
    let tmp = temp_dir();

    let output = hdlsim(&tmp)
        .args(["backends", "show", "xcelium", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["descriptor"]["executable"], "xrun");
    assert_eq!(report["descriptor"]["capabilities"]["extended_contexts"], true);
    assert_eq!(report["standards"]["2002"], "-v200x -extv200x");
    assert!(report["parent"].is_null());
}

#[test]
fn test_backends_show_unknown() {
    let tmp = temp_dir();

    hdlsim(&tmp)
        .args(["backends", "show", "modelsim"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown simulator `modelsim`"));
}

// ============================================================================
// hdlsim flags
// ============================================================================

#[test]
fn test_flags_compile_and_simulate() {
    let tmp = temp_dir();

    hdlsim(&tmp)
        .args([
            "flags",
            "--simulator",
            "incisive",
            "--std",
            "93",
            "-o",
            "incisive.irun_vhdl_flags=-relax -messages",
            "--top",
            "tb",
            "--cdslib",
            "my/cds.lib",
            "a.vhd",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("# standard:  VHDL-1993 -> -v93"))
        .stdout(predicate::str::contains(
            "compile:  irun -compile -nocopyright -licqueue -nowarn DLCPTH -nowarn DLCVAR \
             -v93 -relax -messages -cdslib my/cds.lib -work work a.vhd",
        ))
        .stdout(predicate::str::contains(
            "simulate: irun -nocopyright -licqueue -run -exit -cdslib my/cds.lib -top work.tb",
        ));
}

#[test]
fn test_flags_simulator_from_env() {
    let tmp = temp_dir();

    hdlsim(&tmp)
        .env("HDLSIM_SIMULATOR", "ghdl")
        .args(["flags", "--std", "2002", "--library", "lib", "x.vhd"])
        .assert()
        .success()
        .stdout(predicate::str::contains("compile:  ghdl -a --std=02 --work=lib x.vhd"));
}

#[test]
fn test_flags_unknown_option() {
    let tmp = temp_dir();

    hdlsim(&tmp)
        .args(["flags", "--simulator", "ghdl", "-o", "unknown.name=1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown option `unknown.name`"));
}

#[test]
fn test_flags_option_without_value() {
    let tmp = temp_dir();

    hdlsim(&tmp)
        .args(["flags", "--simulator", "ghdl", "-o", "ghdl.a_flags"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("NAME=VALUE"));
}

#[test]
fn test_flags_unknown_standard() {
    let tmp = temp_dir();

    hdlsim(&tmp)
        .args(["flags", "--simulator", "ghdl", "--std", "2019"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid VHDL standard '2019'"));
}

#[test]
fn test_flags_from_project_config() {
    let tmp = temp_dir();
    fs::create_dir_all(tmp.path().join(".hdlsim")).unwrap();
    fs::write(
        tmp.path().join(".hdlsim/config.toml"),
        r#"
[run]
simulator = "xcelium"
standard = "2002"

[options.xcelium]
xrun_linedebug = true

[arguments]
hdlvar = "hdl.var"
"#,
    )
    .unwrap();

    hdlsim(&tmp)
        .args(["flags", "a.vhd"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "-v200x -extv200x -linedebug -hdlvar hdl.var -work work a.vhd",
        ));
}

#[test]
fn test_flags_config_type_mismatch() {
    let tmp = temp_dir();
    let config = tmp.path().join("run.toml");
    fs::write(&config, "[options]\n\"ghdl.a_flags\" = \"-g\"\n").unwrap();

    hdlsim(&tmp)
        .args(["--config", config.to_str().unwrap(), "flags", "--simulator", "ghdl"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid option in config"))
        .stderr(predicate::str::contains("expects a list of strings"));
}

#[test]
fn test_flags_broken_project_config() {
    let tmp = temp_dir();
    fs::create_dir_all(tmp.path().join(".hdlsim")).unwrap();
    fs::write(
        tmp.path().join(".hdlsim/config.toml"),
        "[run]\nsimulator = \"incisive\"\nstandard = \"2019\"\n",
    )
    .unwrap();

    hdlsim(&tmp)
        .args(["flags", "a.vhd"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse config"))
        .stderr(predicate::str::contains(".hdlsim"));
}

#[test]
fn test_flags_json() {
    let tmp = temp_dir();

    let output = hdlsim(&tmp)
        .args([
            "flags",
            "--simulator",
            "ghdl",
            "-o",
            "ghdl.relaxed=true",
            "--json",
            "tb.vhd",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["standard"], "2008");
    assert_eq!(report["options"]["compile"]["ghdl.relaxed"], true);
    assert_eq!(
        report["compile"],
        serde_json::json!(["ghdl", "-a", "--std=08", "-frelaxed", "--work=work", "tb.vhd"])
    );
    assert!(report["simulate"].is_null());
}

// ============================================================================
// hdlsim completions
// ============================================================================

#[test]
fn test_completions_include_backend_arguments() {
    let tmp = temp_dir();

    hdlsim(&tmp)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--cdslib"))
        .stdout(predicate::str::contains("--gtkwave-fmt"));
}
