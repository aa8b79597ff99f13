use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::constants::{EXPORT_SCRIPT, IDF_PATH_VAR};
use crate::env::EnvOverlay;
use crate::error::EspResult;
use crate::runner::CommandRunner;
use crate::util::create_spinner;

fn home_dir() -> Option<PathBuf> {
    let var = if cfg!(windows) { "USERPROFILE" } else { "HOME" };
    std::env::var_os(var).map(PathBuf::from)
}

/// Installation directories where ESP-IDF is commonly placed, in probe order.
pub fn candidate_roots() -> Vec<PathBuf> {
    let mut roots = Vec::new();

    if let Some(home) = home_dir() {
        roots.push(home.join("esp").join("esp-idf"));
    }
    if cfg!(windows) {
        roots.push(PathBuf::from("C:/esp/esp-idf"));
        roots.push(PathBuf::from("C:/Espressif/frameworks/esp-idf"));
    } else {
        roots.push(PathBuf::from("/opt/esp-idf"));
        roots.push(PathBuf::from("/usr/local/esp-idf"));
    }

    roots
}

/// First candidate containing the export script, if any.
pub fn locate(candidates: &[PathBuf]) -> Option<PathBuf> {
    candidates
        .iter()
        .find(|root| root.join(EXPORT_SCRIPT).is_file())
        .cloned()
}

pub fn locate_installation() -> Option<PathBuf> {
    locate(&candidate_roots())
}

/// True iff the toolchain driver currently runs under `env`.
pub fn is_available(runner: &mut dyn CommandRunner, env: &EnvOverlay) -> bool {
    let spinner = create_spinner("Checking for idf.py...");
    let available = runner.probe(&["idf.py", "--version"], env);
    spinner.finish_and_clear();

    available
}

/// Inject the toolchain environment rooted at `root` into `env`, then report
/// whether the driver actually runs. Variable injection can silently produce
/// a non-runnable toolchain, so the probe is the correctness check.
pub fn activate(
    root: &Path,
    env: &mut EnvOverlay,
    runner: &mut dyn CommandRunner,
) -> EspResult<bool> {
    debug!("Activating ESP-IDF at {}", root.display());

    if cfg!(windows) {
        env.set(IDF_PATH_VAR, root.display().to_string());
        let tools = root.join("tools");
        if tools.is_dir() {
            env.prepend_path(&tools);
        }
    } else {
        let script = root.join(EXPORT_SCRIPT);
        let command = format!(". '{}' && env", script.display());
        let output = runner.capture(&["sh", "-c", command.as_str()], env)?;

        let imported = env.import_env_lines(&output);
        if imported == 0 {
            warn!("Export script produced no environment variables");
        }
        debug!("Imported {imported} environment variables from export script");
    }

    Ok(is_available(runner, env))
}
