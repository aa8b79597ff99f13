use std::path::Path;

use colored::Colorize;
use tracing::debug;

use crate::env::EnvOverlay;
use crate::error::{EspError, EspResult};
use crate::flash::FlashTarget;
use crate::runner::CommandRunner;
use crate::util::create_spinner;

fn python() -> &'static str {
    if cfg!(windows) { "python" } else { "python3" }
}

/// Probe for esptool, installing it through pip on demand.
fn ensure_esptool(runner: &mut dyn CommandRunner, env: &EnvOverlay) -> EspResult<()> {
    let spinner = create_spinner("Checking for esptool...");
    let available = runner.probe(&[python(), "-m", "esptool", "version"], env);
    spinner.finish_and_clear();
    if available {
        return Ok(());
    }

    println!("{}", "esptool not found. Installing...".yellow());
    if !runner.run(&[python(), "-m", "pip", "install", "esptool"], env) {
        return Err(EspError::ToolchainUnavailable(
            "could not install esptool".to_string(),
        ));
    }

    if runner.probe(&[python(), "-m", "esptool", "version"], env) {
        Ok(())
    } else {
        Err(EspError::ToolchainUnavailable(
            "esptool is still not runnable after installing".to_string(),
        ))
    }
}

/// Write the prebuilt binaries under `build_dir` to their fixed flash
/// addresses with esptool, bypassing the ESP-IDF driver entirely.
pub fn flash_with_esptool(
    runner: &mut dyn CommandRunner,
    env: &EnvOverlay,
    port: &str,
    build_dir: &Path,
) -> EspResult<()> {
    println!("{}", "Using esptool for direct flash".yellow());

    ensure_esptool(runner, env)?;

    if !build_dir.is_dir() {
        println!(
            "{}",
            format!("Build directory {} not found. Please build first.", build_dir.display())
                .red()
        );
        return Err(EspError::StepFailure("build directory not found".to_string()));
    }

    let (target, missing) = FlashTarget::from_build_dir(port, build_dir);
    for name in &missing {
        println!("{}", format!("Warning: {name} not found").yellow());
    }
    debug!(
        "Flashing {} artifacts from {}",
        target.artifacts.len(),
        build_dir.display()
    );

    println!("{}", "\nFlashing with esptool".green());
    let mut argv = vec![python().to_string(), "-m".to_string(), "esptool".to_string()];
    argv.extend(target.esptool_args());
    let argv: Vec<&str> = argv.iter().map(String::as_str).collect();

    if runner.run(&argv, env) {
        Ok(())
    } else {
        Err(EspError::StepFailure("esptool reported failure".to_string()))
    }
}
