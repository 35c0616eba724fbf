// e2e/cli_integration.rs: CLI integration tests
//
// Tests the `unlzw` binary as a black-box CLI tool using std::process::Command.
// Covers output naming, stdout and test modes, listing, source removal,
// overwrite protection, exit codes and the program-name aliases.

#[path = "../tests/common/lzw_encoder.rs"]
mod lzw_encoder;

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use lzw_encoder::{compress, text_corpus, EncoderOptions};
use tempfile::TempDir;

/// Locate the `unlzw` binary produced by Cargo.
fn unlzw_bin() -> PathBuf {
    if let Ok(p) = std::env::var("CARGO_BIN_EXE_unlzw") {
        return PathBuf::from(p);
    }
    let mut p = std::env::current_exe().unwrap();
    p.pop();
    if p.ends_with("deps") {
        p.pop();
    }
    p.push("unlzw");
    p
}

fn run_in(bin: &Path, dir: &Path, args: &[&str]) -> Output {
    Command::new(bin)
        .args(args)
        .current_dir(dir)
        .stdin(Stdio::null())
        .output()
        .expect("failed to run unlzw")
}

fn run(dir: &Path, args: &[&str]) -> Output {
    run_in(&unlzw_bin(), dir, args)
}

/// TempDir holding `name` compressed from ~20 KB of text; returns the text.
fn make_z(name: &str) -> (TempDir, Vec<u8>) {
    let dir = TempDir::new().unwrap();
    let data = text_corpus(20_000, 99);
    fs::write(dir.path().join(name), compress(&data, EncoderOptions::default())).unwrap();
    (dir, data)
}

fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).into_owned()
}

// ── 1. Output naming ─────────────────────────────────────────────────────────

#[test]
fn test_cli_strips_suffix_and_keeps_source() {
    let (dir, data) = make_z("notes.txt.Z");
    let out = run(dir.path(), &["notes.txt.Z"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert_eq!(fs::read(dir.path().join("notes.txt")).unwrap(), data);
    assert!(dir.path().join("notes.txt.Z").exists());
}

#[test]
fn test_cli_explicit_output_name() {
    let (dir, data) = make_z("in.Z");
    let out = run(dir.path(), &["in.Z", "elsewhere.txt"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert_eq!(fs::read(dir.path().join("elsewhere.txt")).unwrap(), data);
}

#[test]
fn test_cli_no_suffix_no_output_name() {
    let (dir, _) = make_z("archive");
    let out = run(dir.path(), &["archive"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("cannot determine an output filename"));
}

// ── 2. stdout ────────────────────────────────────────────────────────────────

#[test]
fn test_cli_stdout_flag() {
    let (dir, data) = make_z("c.Z");
    let out = run(dir.path(), &["-c", "c.Z"]);
    assert!(out.status.success());
    assert_eq!(out.stdout, data);
    assert!(!dir.path().join("c").exists());
}

#[test]
fn test_cli_stdin_to_stdout() {
    let data = text_corpus(9_000, 3);
    let z = compress(&data, EncoderOptions::bits(12));
    let mut child = Command::new(unlzw_bin())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn unlzw");
    child.stdin.take().unwrap().write_all(&z).unwrap();
    let out = child.wait_with_output().unwrap();
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert_eq!(out.stdout, data);
}

#[test]
fn test_cli_multiple_to_stdout_in_order() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("1.Z"), compress(b"first,", EncoderOptions::default())).unwrap();
    fs::write(dir.path().join("2.Z"), compress(b"second", EncoderOptions::default())).unwrap();
    let out = run(dir.path(), &["-c", "-m", "1.Z", "2.Z"]);
    assert!(out.status.success());
    assert_eq!(out.stdout, b"first,second");
}

// ── 3. Test and list modes ───────────────────────────────────────────────────

#[test]
fn test_cli_test_mode_ok() {
    let (dir, _) = make_z("t.Z");
    let out = run(dir.path(), &["-t", "t.Z"]);
    assert!(out.status.success());
    assert!(stderr(&out).contains("t.Z: OK"), "stderr: {}", stderr(&out));
    assert!(!dir.path().join("t").exists());
}

#[test]
fn test_cli_test_mode_bad_file() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("bad.Z"), b"\x1F\x9D\x90\xFF\xFF\xFF").unwrap();
    let out = run(dir.path(), &["-t", "bad.Z"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("corrupt input"), "stderr: {}", stderr(&out));
}

#[test]
fn test_cli_list() {
    let (dir, _) = make_z("listed.Z");
    let out = run(dir.path(), &["-l", "listed.Z"]);
    assert!(out.status.success());
    let text = String::from_utf8_lossy(&out.stdout);
    assert!(text.contains("MaxBits"));
    assert!(text.lines().nth(1).unwrap().ends_with("listed.Z"));
}

// ── 4. Source removal and overwrite ──────────────────────────────────────────

#[test]
fn test_cli_rm_removes_source() {
    let (dir, data) = make_z("r.Z");
    let out = run(dir.path(), &["--rm", "r.Z"]);
    assert!(out.status.success());
    assert_eq!(fs::read(dir.path().join("r")).unwrap(), data);
    assert!(!dir.path().join("r.Z").exists());
}

#[test]
fn test_cli_keep_wins_when_last() {
    let (dir, _) = make_z("k.Z");
    let out = run(dir.path(), &["--rm", "-k", "k.Z"]);
    assert!(out.status.success());
    assert!(dir.path().join("k.Z").exists());
}

#[test]
fn test_cli_existing_output_needs_force() {
    let (dir, data) = make_z("o.Z");
    fs::write(dir.path().join("o"), b"precious").unwrap();

    let out = run(dir.path(), &["o.Z"]);
    assert_eq!(out.status.code(), Some(1));
    assert_eq!(fs::read(dir.path().join("o")).unwrap(), b"precious");

    let out = run(dir.path(), &["-f", "o.Z"]);
    assert!(out.status.success());
    assert_eq!(fs::read(dir.path().join("o")).unwrap(), data);
}

// ── 5. Multiple inputs ───────────────────────────────────────────────────────

#[test]
fn test_cli_multiple_inputs() {
    let dir = TempDir::new().unwrap();
    for name in ["a", "b", "c"] {
        let z = compress(name.repeat(500).as_bytes(), EncoderOptions::default());
        fs::write(dir.path().join(format!("{name}.Z")), z).unwrap();
    }
    let out = run(dir.path(), &["-m", "-f", "-T2", "a.Z", "b.Z", "c.Z"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    for name in ["a", "b", "c"] {
        assert_eq!(fs::read(dir.path().join(name)).unwrap(), name.repeat(500).as_bytes());
    }
}

#[test]
fn test_cli_multiple_with_a_stray_file() {
    let (dir, data) = make_z("good.Z");
    fs::write(dir.path().join("stray.txt"), b"x").unwrap();
    let out = run(dir.path(), &["-m", "good.Z", "stray.txt"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("does not end in .Z"));
    assert_eq!(fs::read(dir.path().join("good")).unwrap(), data);
}

#[cfg(feature = "recursive")]
#[test]
fn test_cli_recursive() {
    let (dir, data) = make_z("top.Z");
    fs::create_dir(dir.path().join("sub")).unwrap();
    fs::write(dir.path().join("sub/deep.Z"), compress(b"deep", EncoderOptions::default()))
        .unwrap();
    fs::write(dir.path().join("sub/readme"), b"ignored").unwrap();

    let out = run(dir.path(), &["-r", "."]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert_eq!(fs::read(dir.path().join("top")).unwrap(), data);
    assert_eq!(fs::read(dir.path().join("sub/deep")).unwrap(), b"deep");
}

// ── 6. Usage ─────────────────────────────────────────────────────────────────

#[test]
fn test_cli_version_and_help() {
    let dir = TempDir::new().unwrap();
    let out = run(dir.path(), &["--version"]);
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains(env!("CARGO_PKG_VERSION")));
    assert!(run(dir.path(), &["--help"]).status.success());
}

#[test]
fn test_cli_unknown_option() {
    let dir = TempDir::new().unwrap();
    let out = run(dir.path(), &["--definitely-not-an-option"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("bad usage"));
}

// ── 7. Aliases ───────────────────────────────────────────────────────────────

#[cfg(unix)]
#[test]
fn test_cli_lzwcat_alias() {
    let (dir, data) = make_z("cat.Z");
    fs::write(dir.path().join("plain.txt"), b"|plain").unwrap();
    let link = dir.path().join("lzwcat");
    std::os::unix::fs::symlink(unlzw_bin(), &link).unwrap();

    let out = run_in(&link, dir.path(), &["cat.Z", "plain.txt"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    let mut expected = data;
    expected.extend_from_slice(b"|plain");
    assert_eq!(out.stdout, expected);
}

#[cfg(unix)]
#[test]
fn test_cli_uncompress_alias() {
    let (dir, data) = make_z("u1.Z");
    fs::copy(dir.path().join("u1.Z"), dir.path().join("u2.Z")).unwrap();
    let link = dir.path().join("uncompress");
    std::os::unix::fs::symlink(unlzw_bin(), &link).unwrap();

    let out = run_in(&link, dir.path(), &["u1.Z", "u2.Z"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert_eq!(fs::read(dir.path().join("u1")).unwrap(), data);
    assert_eq!(fs::read(dir.path().join("u2")).unwrap(), data);
}
