use std::ffi::OsString;
use std::path::PathBuf;

use trimgalore_runner::{
    run_command, threads_per_sample, trim_galore_args, SamplePair, TrimSettings, ADAPTER_R1,
    ADAPTER_R2,
};

#[test]
fn test_argument_order() {
    let pair = SamplePair {
        name: "A".to_string(),
        r1: PathBuf::from("in/A_R1.fastq.gz"),
        r2: PathBuf::from("in/A_R2.fastq.gz"),
    };
    let settings = TrimSettings {
        quality: 20,
        length: 40,
        cores: 4,
        output_dir: PathBuf::from("out/TrimGalore"),
    };

    let args = trim_galore_args(&pair, &settings);
    let expected: Vec<OsString> = [
        "--paired",
        "--fastqc",
        "--quality",
        "20",
        "--length",
        "40",
        "--adapter",
        ADAPTER_R1,
        "--adapter2",
        ADAPTER_R2,
        "--cores",
        "4",
        "--output_dir",
        "out/TrimGalore",
        "in/A_R1.fastq.gz",
        "in/A_R2.fastq.gz",
    ]
    .into_iter()
    .map(OsString::from)
    .collect();
    assert_eq!(args, expected);
}

#[test]
fn test_thread_budget_clamps_to_minimum() {
    assert_eq!(threads_per_sample(8, 2), 4);
    assert_eq!(threads_per_sample(4, 1), 4);
    assert_eq!(threads_per_sample(1, 10), 4);
}

#[test]
fn test_thread_budget_clamps_to_maximum() {
    assert_eq!(threads_per_sample(100, 2), 8);
    assert_eq!(threads_per_sample(64, 1), 8);
}

#[test]
fn test_thread_budget_midrange() {
    assert_eq!(threads_per_sample(12, 2), 6);
}

#[test]
fn test_run_command_success() {
    assert!(run_command("true", &[]).is_ok());
}

#[test]
fn test_run_command_nonzero_exit_is_an_error() {
    assert!(run_command("false", &[]).is_err());
}

#[test]
fn test_run_command_missing_executable_is_an_error() {
    assert!(run_command("no-such-tool-anywhere", &[]).is_err());
}
