use colored::Colorize;
use tracing::warn;

use crate::constants::CHIP;
use crate::env::EnvOverlay;
use crate::error::{EspError, EspResult};
use crate::runner::CommandRunner;

/// Build and flash through the ESP-IDF driver: set target, build, flash,
/// optionally monitor. Each step must succeed before the next one starts;
/// a failed monitor does not undo an already completed flash.
pub fn flash_with_toolchain(
    runner: &mut dyn CommandRunner,
    env: &EnvOverlay,
    port: &str,
    monitor: bool,
) -> EspResult<()> {
    println!("{}", "\nStep 1: Setting target to ESP32-C6".green());
    if !runner.run(&["idf.py", "set-target", CHIP], env) {
        return Err(EspError::StepFailure("could not set build target".to_string()));
    }

    println!("{}", "\nStep 2: Building firmware".green());
    if !runner.run(&["idf.py", "build"], env) {
        return Err(EspError::StepFailure("firmware build failed".to_string()));
    }

    println!("{}", "\nStep 3: Flashing firmware".green());
    println!("If this fails, try:");
    println!("  1. Hold the BOOT button");
    println!("  2. Press the RESET button");
    println!("  3. Release the BOOT button");
    println!();
    if !runner.run(&["idf.py", "-p", port, "flash"], env) {
        return Err(EspError::StepFailure("flashing failed".to_string()));
    }

    if monitor {
        println!("{}", "\nStep 4: Opening serial monitor".green());
        println!("Press Ctrl+] to exit the monitor");
        println!();
        if !runner.run(&["idf.py", "-p", port, "monitor"], env) {
            warn!("Serial monitor exited with a failure status");
        }
    }

    Ok(())
}
