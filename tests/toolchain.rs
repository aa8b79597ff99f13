use std::fs;
use std::path::PathBuf;

use espman::env::EnvOverlay;
use espman::error::EspResult;
use espman::runner::CommandRunner;
use espman::toolchain;

struct FakeRunner {
    calls: Vec<Vec<String>>,
    capture_output: String,
    probe_ok: bool,
}

impl FakeRunner {
    fn new(capture_output: &str, probe_ok: bool) -> Self {
        FakeRunner {
            calls: Vec::new(),
            capture_output: capture_output.to_string(),
            probe_ok,
        }
    }

    fn record(&mut self, argv: &[&str]) {
        self.calls.push(argv.iter().map(|s| s.to_string()).collect());
    }
}

impl CommandRunner for FakeRunner {
    fn run(&mut self, argv: &[&str], _env: &EnvOverlay) -> bool {
        self.record(argv);
        true
    }

    fn probe(&mut self, argv: &[&str], _env: &EnvOverlay) -> bool {
        self.record(argv);
        self.probe_ok
    }

    fn capture(&mut self, argv: &[&str], _env: &EnvOverlay) -> EspResult<String> {
        self.record(argv);
        Ok(self.capture_output.clone())
    }
}

fn temp_root(tag: &str, with_export_script: bool) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("espman-idf-{tag}-{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    if with_export_script {
        fs::write(dir.join("export.sh"), "#!/bin/sh\n").unwrap();
    }
    dir
}

#[test]
fn first_root_with_export_script_wins() {
    let first = temp_root("first", true);
    let second = temp_root("second", true);

    let located = toolchain::locate(&[first.clone(), second]).unwrap();
    assert_eq!(located, first);
}

#[test]
fn roots_without_the_export_script_are_skipped() {
    let empty = temp_root("empty", false);
    let stocked = temp_root("stocked", true);

    let located = toolchain::locate(&[empty, stocked.clone()]).unwrap();
    assert_eq!(located, stocked);
}

#[test]
fn nothing_located_when_no_candidate_qualifies() {
    let empty = temp_root("all-empty", false);

    assert!(toolchain::locate(&[empty]).is_none());
}

#[cfg(unix)]
#[test]
fn activation_imports_the_export_environment() {
    let root = temp_root("activate", true);
    let mut runner = FakeRunner::new(
        "IDF_PATH=/opt/esp-idf\nIDF_PYTHON_ENV_PATH=/opt/esp-idf/python_env\nno assignment here\n",
        true,
    );
    let mut env = EnvOverlay::new();

    let activated = toolchain::activate(&root, &mut env, &mut runner).unwrap();

    assert!(activated);
    assert_eq!(env.get("IDF_PATH"), Some("/opt/esp-idf"));
    assert_eq!(env.get("IDF_PYTHON_ENV_PATH"), Some("/opt/esp-idf/python_env"));
    assert_eq!(env.get("no assignment here"), None);

    // The probe is the correctness check, run after the import
    assert_eq!(runner.calls.last().unwrap(), &vec!["idf.py", "--version"]);
}

#[cfg(unix)]
#[test]
fn activation_reports_a_toolchain_that_still_does_not_run() {
    let root = temp_root("activate-broken", true);
    let mut runner = FakeRunner::new("IDF_PATH=/opt/esp-idf\n", false);
    let mut env = EnvOverlay::new();

    let activated = toolchain::activate(&root, &mut env, &mut runner).unwrap();

    assert!(!activated);
}
