use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::io::Write;
use std::process::Command;
use tempfile::tempdir;

// Connection refused on every platform we run on.
const DEAD_ENDPOINT: &str = "http://127.0.0.1:1/api/v9/users/@me";

fn credcheck() -> Command {
    let mut cmd = Command::cargo_bin("credcheck").unwrap();
    cmd.env_remove("CREDCHECK_ENDPOINT")
        .arg("--endpoint")
        .arg(DEAD_ENDPOINT)
        .arg("--delay-ms")
        .arg("0")
        .arg("--timeout")
        .arg("5")
        .arg("--color")
        .arg("never");
    cmd
}

#[test]
fn e2e_unreachable_endpoint_still_writes_results() {
    let tmp = tempdir().unwrap();
    let input = tmp.path().join("tokens.txt");
    let output = tmp.path().join("results.txt");
    {
        let mut f = fs::File::create(&input).unwrap();
        writeln!(f, "first-token-aaaa").unwrap();
        writeln!(f).unwrap();
        writeln!(f, "second-token-bbbb").unwrap();
    }

    credcheck()
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Processing credential 2/2"))
        .stdout(predicate::str::contains("Success Rate: 0.00%"));

    let content = fs::read_to_string(&output).unwrap();
    let blocks: Vec<&str> = content.split("\n\n").collect();
    assert_eq!(blocks.len(), 3);
    assert!(blocks[0].starts_with("Token: first-toke... | Status: INVALID"));
    assert!(blocks[1].starts_with("Token: second-tok... | Status: INVALID"));
    assert!(content.contains("Total Credentials: 2"));
    assert!(content.contains("of which Transport Errors: 2"));
}

#[test]
fn default_input_file_is_used_from_working_directory() {
    let tmp = tempdir().unwrap();
    fs::write(tmp.path().join("Token.txt"), "only-token\nonly-token\n").unwrap();

    credcheck()
        .current_dir(tmp.path())
        .arg("--no-output")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total Credentials: 1"));

    let leftovers: Vec<_> = fs::read_dir(tmp.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().starts_with("results_"))
        .collect();
    assert!(leftovers.is_empty());
}

#[test]
fn single_token_without_input_file() {
    let tmp = tempdir().unwrap();
    credcheck()
        .current_dir(tmp.path())
        .arg("-t")
        .arg("lonely-token")
        .arg("-q")
        .arg("--no-output")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total Credentials: 1"))
        .stdout(predicate::str::contains("Processing credential").not());
}

#[test]
fn no_credentials_is_a_usage_error() {
    let tmp = tempdir().unwrap();
    credcheck()
        .current_dir(tmp.path())
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("no credentials provided"));
}

#[test]
fn blank_token_argument_is_a_usage_error() {
    let tmp = tempdir().unwrap();
    credcheck()
        .current_dir(tmp.path())
        .arg("-t")
        .arg("   ")
        .arg("--no-output")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("credential is empty"));
}

#[test]
fn missing_explicit_input_file_is_a_usage_error() {
    let tmp = tempdir().unwrap();
    credcheck()
        .arg("-i")
        .arg(tmp.path().join("missing.txt"))
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("input file not found"));
}

#[test]
fn blank_input_file_is_a_usage_error() {
    let tmp = tempdir().unwrap();
    let input = tmp.path().join("blank.txt");
    fs::write(&input, "\n   \n\n").unwrap();
    credcheck()
        .arg("-i")
        .arg(&input)
        .arg("--no-output")
        .assert()
        .failure()
        .code(2);
}

#[test]
fn unwritable_output_does_not_fail_the_run() {
    let tmp = tempdir().unwrap();
    let output = tmp.path().join("no-such-dir").join("results.txt");
    credcheck()
        .arg("-t")
        .arg("some-token")
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Total Credentials: 1"))
        .stderr(predicate::str::contains("failed to write output"));
    assert!(!output.exists());
}

#[test]
fn non_http_endpoint_is_rejected() {
    let mut cmd = Command::cargo_bin("credcheck").unwrap();
    cmd.env_remove("CREDCHECK_ENDPOINT")
        .arg("--endpoint")
        .arg("ftp://127.0.0.1/me")
        .arg("-t")
        .arg("x")
        .assert()
        .failure()
        .code(2);
}
