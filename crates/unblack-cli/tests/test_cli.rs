use std::io::Write;
use std::process::{Command, Output, Stdio};

use tempfile::NamedTempFile;

const FRAMED: &str = "P1\n5 5\n\
                      1 1 0 0 0\n\
                      0 0 0 0 0\n\
                      0 0 1 0 0\n\
                      0 0 0 0 1\n\
                      0 0 0 1 1\n";

fn run_with_stdin(bin: &str, args: &[&str], stdin: &[u8]) -> Output {
    let mut child = Command::new(bin)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn binary");
    child
        .stdin
        .take()
        .expect("stdin handle")
        .write_all(stdin)
        .expect("write stdin");
    child.wait_with_output().expect("wait for binary")
}

fn write_temp(data: &[u8]) -> NamedTempFile {
    let mut f = NamedTempFile::new().expect("create temp file");
    f.write_all(data).expect("write data");
    f.flush().expect("flush");
    f
}

fn solved_pgm() -> String {
    let mut text = String::from("P2\n9 9\n9\n");
    for row in 0..9 {
        let line: Vec<String> = (0..9)
            .map(|col| ((col + 3 * (row % 3) + row / 3) % 9 + 1).to_string())
            .collect();
        text.push_str(&line.join(" "));
        text.push('\n');
    }
    text
}

#[test]
fn test_unblackedges_from_stdin() {
    let out = run_with_stdin(env!("CARGO_BIN_EXE_unblackedges"), &[], FRAMED.as_bytes());
    assert!(out.status.success());
    assert_eq!(
        String::from_utf8(out.stdout).unwrap(),
        "P1\n5 5\n0 0 0 0 0\n0 0 0 0 0\n0 0 1 0 0\n0 0 0 0 0\n0 0 0 0 0\n"
    );
}

#[test]
fn test_unblackedges_from_file() {
    let file = write_temp(FRAMED.as_bytes());
    let out = Command::new(env!("CARGO_BIN_EXE_unblackedges"))
        .arg(file.path())
        .output()
        .unwrap();
    assert!(out.status.success());
    assert!(String::from_utf8(out.stdout)
        .unwrap()
        .starts_with("P1\n5 5\n"));
}

#[test]
fn test_unblackedges_raw_output() {
    let out = run_with_stdin(
        env!("CARGO_BIN_EXE_unblackedges"),
        &["--raw", "--order", "bfs"],
        FRAMED.as_bytes(),
    );
    assert!(out.status.success());
    let mut expected = b"P4\n5 5\n".to_vec();
    expected.extend_from_slice(&[0, 0, 0b0010_0000, 0, 0]);
    assert_eq!(out.stdout, expected);
}

#[test]
fn test_unblackedges_too_many_arguments() {
    let out = Command::new(env!("CARGO_BIN_EXE_unblackedges"))
        .args(["a.pbm", "b.pbm"])
        .output()
        .unwrap();
    assert!(!out.status.success());
    assert!(!out.stderr.is_empty());
}

#[test]
fn test_unblackedges_missing_file() {
    let out = Command::new(env!("CARGO_BIN_EXE_unblackedges"))
        .arg("/nonexistent/input.pbm")
        .output()
        .unwrap();
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("Failed to open"));
}

#[test]
fn test_unblackedges_malformed_input() {
    let out = run_with_stdin(env!("CARGO_BIN_EXE_unblackedges"), &[], b"P1\n3 3\n1 0\n");
    assert!(!out.status.success());
    assert!(out.stdout.is_empty());
}

#[test]
fn test_unblackedges_print_config() {
    let out = Command::new(env!("CARGO_BIN_EXE_unblackedges"))
        .args(["--print-config", "--order", "bfs"])
        .output()
        .unwrap();
    assert!(out.status.success());
    let text = String::from_utf8(out.stdout).unwrap();
    assert!(text.contains("BreadthFirst"));
    assert!(text.contains("Plain"));
}

#[test]
fn test_sudoku_valid_exits_zero() {
    let out = run_with_stdin(env!("CARGO_BIN_EXE_sudoku"), &[], solved_pgm().as_bytes());
    assert!(out.status.success());
}

#[test]
fn test_sudoku_invalid_exits_one() {
    let bad = solved_pgm().replacen("P2\n9 9\n9\n1", "P2\n9 9\n9\n2", 1);
    let file = write_temp(bad.as_bytes());
    let out = Command::new(env!("CARGO_BIN_EXE_sudoku"))
        .arg(file.path())
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn test_sudoku_wrong_size_exits_one() {
    let out = run_with_stdin(env!("CARGO_BIN_EXE_sudoku"), &[], b"P2\n2 2\n9\n1 2 3 4\n");
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn test_unblackedges_stats_summary() {
    let out = run_with_stdin(
        env!("CARGO_BIN_EXE_unblackedges"),
        &["--stats"],
        FRAMED.as_bytes(),
    );
    assert!(out.status.success());
    let report = String::from_utf8_lossy(&out.stderr);
    assert!(report.contains("Peak frontier"));
    assert!(!report.contains("Peak queue"));
    assert!(report.contains("Depth-first"));
}
