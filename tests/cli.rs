use assert_cmd::prelude::*;
use assert_fs::prelude::*;
use predicates::prelude::*;
use std::process::Command;

const BINARY: &str = "readprune";
type TestResult = Result<(), Box<dyn std::error::Error>>;

#[test]
fn file_doesnt_exist() -> TestResult {
    let mut cmd = Command::cargo_bin(BINARY)?;

    cmd.arg("file_which_does_not_exist.fastq");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Unable to open file"));

    Ok(())
}

#[test]
fn invalid_min_copies() -> TestResult {
    let mut cmd = Command::cargo_bin(BINARY)?;

    cmd.args(["--min-copies", "lots", "whatever.fastq"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("expected a non-negative integer"));

    Ok(())
}

#[test]
fn truncated_input_is_fatal() -> TestResult {
    let input = assert_fs::NamedTempFile::new("truncated.fastq")?;
    input.write_str("@read1\nACGT\n+\nII")?;

    let mut cmd = Command::cargo_bin(BINARY)?;
    cmd.arg(input.path());
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("truncated"));

    input.close()?;
    Ok(())
}

#[test]
fn overlong_quality_is_fatal() -> TestResult {
    let input = assert_fs::NamedTempFile::new("mismatch.fastq")?;
    input.write_str("@read1\nACGT\n+\nIIIIII\n@read2\nACGT\n+\nIIII\n")?;

    let mut cmd = Command::cargo_bin(BINARY)?;
    cmd.arg(input.path());
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("quality characters"));

    input.close()?;
    Ok(())
}
