mod common;

use std::process::{Command, Output};

use common::data_path;

fn ninetraj(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ninetraj"))
        .args(args)
        .env("RUST_LOG", "off")
        .output()
        .expect("ninetraj should run")
}

#[test]
fn test_info_report() {
    let path = data_path("hd12661_interrupted.bel");
    let output = ninetraj(&["info", path.as_str()]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("     hd12661_interrupted.bel\n"));
    assert!(stdout.contains("Bodies: 3\nHD_12661[0][:] HD_12661_b[1][:] HD_12661_c[2][:]\n"));
    assert!(stdout.contains("Datacolumns: 7\n"));
    assert!(stdout.contains("Datalines: 14\n"));
    assert!(stdout.contains("2 trailing record(s)"));
}

#[test]
fn test_info_json_one_line_per_file() {
    let bel = data_path("hd12661.bel");
    let bco = data_path("sun_jupiter.bco");
    let output = ninetraj(&["info", "--json", bel.as_str(), bco.as_str()]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let records: Vec<serde_json::Value> = stdout
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(records.len(), 2);

    assert_eq!(records[0]["kind"], "elements");
    assert_eq!(records[0]["structure"]["body_count"], 3);
    assert_eq!(records[0]["timestep_count"], 6);
    assert_eq!(records[0]["structure"]["well_formed"], true);

    assert_eq!(records[1]["kind"], "coordinates");
    assert_eq!(records[1]["structure"]["body_names"][1], "Jupiter");
    assert_eq!(records[1]["records_dropped"], 0);
}

#[test]
fn test_final_json() {
    let path = data_path("hd12661.bel");
    let output = ninetraj(&[
        "final",
        path.as_str(),
        "--unit",
        "yr",
        "--reduction",
        "last",
        "--verify-time",
        "--json",
    ]);
    assert!(output.status.success());

    let last: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(last["unit"], "yr");
    assert_eq!(last["reduction"], "last");
    assert_eq!(last["time"], 500.0);
    assert_eq!(last["bodies"][2]["name"], "HD_12661_c");
}

#[test]
fn test_errors_exit_non_zero() {
    let output = ninetraj(&["info", "tests/data/run.xyz"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Unsupported result file kind"));

    let bco = data_path("sun_jupiter.bco");
    let output = ninetraj(&["final", bco.as_str()]);
    assert!(!output.status.success());

    let bel = data_path("hd12661.bel");
    let output = ninetraj(&["final", bel.as_str(), "--unit", "fortnight"]);
    assert!(!output.status.success());
}

#[test]
fn test_info_keeps_going_after_a_bad_file() {
    let hd = data_path("hd12661.bel");
    let output = ninetraj(&["info", "tests/data/missing.xyz", hd.as_str()]);
    assert!(!output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("     hd12661.bel\n"));
    assert!(stdout.contains("Bodies: 3\n"));

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Unsupported result file kind"));
    assert!(stderr.contains("1 of 2 file(s) could not be read"));
}
