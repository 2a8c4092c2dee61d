use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

struct TestDir {
    path: PathBuf,
}

impl TestDir {
    fn new(tag: &str) -> Self {
        let ts = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_nanos());
        let path =
            std::env::temp_dir().join(format!("diagrid_cli_{tag}_{}_{}", std::process::id(), ts));
        fs::create_dir_all(&path).expect("create temp test dir");
        Self { path }
    }
}

impl Drop for TestDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

fn run_diagrid(args: &[&str], cwd: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_diagrid"))
        .args(args)
        .current_dir(cwd)
        .output()
        .expect("run diagrid")
}

const BOX_DIAGRAM: &str = "+----+\n|Box |\n+----+\n";

#[test]
fn file_input_writes_svg_to_stdout() {
    let dir = TestDir::new("stdout");
    let input = dir.path.join("box.txt");
    fs::write(&input, BOX_DIAGRAM).expect("write diagram");

    let output = run_diagrid(&["box.txt"], &dir.path);

    assert!(output.status.success(), "process failed: {output:?}");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("<svg"), "expected svg root: {stdout}");
    assert!(stdout.contains("<path"), "expected a rendered path: {stdout}");
    assert!(stdout.contains("Box"), "expected the text run: {stdout}");
}

#[test]
fn output_flag_writes_a_file() {
    let dir = TestDir::new("outfile");
    let input = dir.path.join("box.txt");
    fs::write(&input, BOX_DIAGRAM).expect("write diagram");

    let output = run_diagrid(&["-o", "out.svg", "box.txt"], &dir.path);
    assert!(output.status.success(), "process failed: {output:?}");

    let svg = fs::read_to_string(dir.path.join("out.svg")).expect("read svg output");
    assert!(svg.contains("<svg"), "expected svg root element");
}

#[test]
fn parse_errors_exit_nonzero() {
    let dir = TestDir::new("badjson");
    let input = dir.path.join("bad.txt");
    fs::write(&input, "[a]: {broken\n").expect("write diagram");

    let output = run_diagrid(&["bad.txt"], &dir.path);
    assert!(!output.status.success(), "expected failure: {output:?}");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error:"), "expected error output: {stderr}");
    assert!(stderr.contains("[a]"), "expected the tag in the error: {stderr}");
}

#[test]
fn missing_input_file_exits_nonzero() {
    let dir = TestDir::new("missing");
    let output = run_diagrid(&["nope.txt"], &dir.path);
    assert!(!output.status.success(), "expected failure: {output:?}");
}
