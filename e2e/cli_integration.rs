// CLI integration tests: exercises the `mz3` binary as a black box via
// std::process::Command, covering the scenarios from SPEC_FULL.md §8
// ("Additional ambient-stack scenarios").

use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

fn mz3_bin() -> PathBuf {
    if let Ok(p) = std::env::var("CARGO_BIN_EXE_mz3") {
        return PathBuf::from(p);
    }
    let mut p = std::env::current_exe().unwrap();
    p.pop();
    if p.ends_with("deps") {
        p.pop();
    }
    p.push("mz3");
    p
}

fn write_minimal_mz3(path: &std::path::Path) {
    let mut bytes = vec![
        0x4D, 0x5A, 0x03, 0x00, 0x01, 0x00, 0x00, 0x00, 0x03, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00,
    ];
    bytes.extend_from_slice(&[
        0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x02, 0x00, 0x00, 0x00,
    ]);
    bytes.extend_from_slice(&[
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    ]);
    bytes.extend_from_slice(&[
        0x00, 0x00, 0x80, 0x3F, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    ]);
    bytes.extend_from_slice(&[
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x80, 0x3F, 0x00, 0x00, 0x00, 0x00,
    ]);
    assert_eq!(bytes.len(), 64);
    fs::write(path, bytes).unwrap();
}

// Scenario G: round trip through the CLI twice (plain -> compressed ->
// plain) and confirm the final decompressed content matches the original.
#[test]
fn cli_roundtrip_through_compression() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("input.mz3");
    write_minimal_mz3(&input);

    let compressed = dir.path().join("compressed.mz3");
    let status = Command::new(mz3_bin())
        .args([input.to_str().unwrap(), compressed.to_str().unwrap(), "1"])
        .status()
        .expect("failed to run mz3 compress");
    assert!(status.success(), "compress step should exit 0");

    let roundtrip = dir.path().join("roundtrip.mz3");
    let status = Command::new(mz3_bin())
        .args([
            compressed.to_str().unwrap(),
            roundtrip.to_str().unwrap(),
            "0",
        ])
        .status()
        .expect("failed to run mz3 decompress");
    assert!(status.success(), "decompress step should exit 0");

    let original = fs::read(&input).unwrap();
    let recovered = fs::read(&roundtrip).unwrap();
    assert_eq!(original, recovered, "roundtrip output must match original");
}

// Scenario H: fewer than 3 positional arguments is a usage error from clap.
#[test]
fn cli_usage_error_on_missing_args() {
    let output = Command::new(mz3_bin())
        .args(["only_one_arg.mz3"])
        .output()
        .expect("failed to run mz3 with missing args");

    assert!(
        !output.status.success(),
        "missing args should exit non-zero"
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.to_lowercase().contains("usage"),
        "stderr should contain clap's usage message; got: {stderr}"
    );
}

#[test]
fn cli_nonexistent_input_fails_with_diagnostic() {
    let dir = TempDir::new().unwrap();
    let output = Command::new(mz3_bin())
        .args([
            "/nonexistent_path_abc123.mz3",
            dir.path().join("out.mz3").to_str().unwrap(),
            "0",
        ])
        .output()
        .expect("failed to run mz3 with nonexistent input");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("mz3:"),
        "stderr should carry the mz3: prefix; got: {stderr}"
    );
}

#[test]
fn cli_bad_magic_fails() {
    let dir = TempDir::new().unwrap();
    let bad = dir.path().join("bad.mz3");
    fs::write(&bad, [0x00, 0x01, 0x00, 0x00]).unwrap();

    let output = Command::new(mz3_bin())
        .args([
            bad.to_str().unwrap(),
            dir.path().join("out.mz3").to_str().unwrap(),
            "0",
        ])
        .output()
        .expect("failed to run mz3 on bad magic file");

    assert!(!output.status.success());
}
