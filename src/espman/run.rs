use std::path::{Path, PathBuf};

use clap::Parser;
use colored::Colorize;
use espman::env::EnvOverlay;
use espman::error::{EspError, EspResult};
use espman::flash::{esptool, idf};
use espman::prompt::{self, PromptSource, StdinPrompt};
use espman::runner::ShellRunner;
use espman::{ports, toolchain};

#[derive(Parser, Debug, Clone)]
#[command(version, long_about = None)]
pub(crate) struct FlashOptions {
    /// Serial port (e.g. COM3, /dev/ttyUSB0)
    port: Option<String>,

    /// Skip the serial monitor after flashing
    #[clap(long, action)]
    no_monitor: bool,

    /// Flash with esptool directly instead of the ESP-IDF build system
    #[clap(long, action)]
    esptool: bool,

    /// Path to a prebuilt firmware build directory
    #[clap(long)]
    firmware: Option<PathBuf>,
}

pub(crate) fn handle_flash(opts: FlashOptions) -> EspResult<()> {
    let mut runner = ShellRunner;
    let mut env = EnvOverlay::new();
    let mut prompt = StdinPrompt;

    let port = resolve_port(&opts, &mut prompt)?;
    verify_port_path(&port, &mut prompt)?;

    let outcome = if opts.esptool || opts.firmware.is_some() {
        let build_dir = opts.firmware.clone().unwrap_or_else(|| PathBuf::from("build"));
        esptool::flash_with_esptool(&mut runner, &env, &port, &build_dir)
    } else {
        ensure_toolchain(&mut runner, &mut env)?;
        idf::flash_with_toolchain(&mut runner, &env, &port, !opts.no_monitor)
    };

    match outcome {
        Ok(()) => {
            println!();
            println!("{}", "========================================".green());
            println!("{}", "Flash complete! Device is ready.".green());
            println!("{}", "========================================".green());
            println!();
            println!("The board will now reboot into the new firmware.");
            Ok(())
        }
        Err(e) => {
            println!();
            println!("{}", "========================================".red());
            println!("{}", "Flash failed!".red());
            println!("{}", "========================================".red());
            println!();
            println!("Troubleshooting:");
            println!("  - Check the USB cable is data-capable (not charge-only)");
            println!("  - Try manual boot mode (hold BOOT, press RESET)");
            println!("  - Verify the correct port was selected");
            println!("  - Install USB serial drivers if needed");
            Err(e)
        }
    }
}

/// Use the port given on the command line, or scan for one, prompting when
/// several candidates qualify.
fn resolve_port(opts: &FlashOptions, prompt: &mut dyn PromptSource) -> EspResult<String> {
    if let Some(port) = &opts.port {
        println!("{}", format!("Using specified port: {port}").yellow());
        return Ok(port.clone());
    }

    println!("Detecting ESP32 devices...");
    let candidates = ports::detect_ports()?;

    match candidates.as_slice() {
        [] => {
            println!("{}", "No ESP32 devices found!".red());
            println!();
            println!("Please specify the port manually:");
            println!("  espman COM3                     (Windows)");
            println!("  espman /dev/ttyUSB0             (Linux)");
            println!("  espman /dev/cu.usbserial-0001   (macOS)");
            Err(EspError::DeviceNotFound(
                "no candidate serial ports detected".to_string(),
            ))
        }
        [port] => {
            println!("{}", format!("Found ESP32 on port: {port}").green());
            Ok(port.clone())
        }
        _ => {
            println!("Multiple ESP32 devices found:");
            for (i, port) in candidates.iter().enumerate() {
                println!("  {}. {}", i + 1, port);
            }
            prompt::select_port(&candidates, prompt)
        }
    }
}

/// Windows port names are not filesystem paths; everywhere else a missing
/// device path is worth a warning and a chance to back out.
fn verify_port_path(port: &str, prompt: &mut dyn PromptSource) -> EspResult<()> {
    if cfg!(windows) || Path::new(port).exists() {
        return Ok(());
    }

    println!("{}", format!("Warning: Port {port} does not exist").yellow());
    if prompt::confirm("Continue anyway? (y/N): ", prompt)? {
        Ok(())
    } else {
        Err(EspError::DeviceNotFound(format!("port {port} does not exist")))
    }
}

/// Make sure `idf.py` is runnable, activating a located installation if it
/// is not already on PATH.
fn ensure_toolchain(runner: &mut ShellRunner, env: &mut EnvOverlay) -> EspResult<()> {
    if toolchain::is_available(runner, env) {
        return Ok(());
    }

    println!("{}", "ESP-IDF not found in PATH".yellow());
    println!("Attempting to locate ESP-IDF installation...");

    let activated = match toolchain::locate_installation() {
        Some(root) => toolchain::activate(&root, env, runner)?,
        None => false,
    };

    if activated {
        return Ok(());
    }

    println!();
    println!("{}", "ESP-IDF not available!".red());
    println!();
    println!("Options:");
    println!("1. Install ESP-IDF:");
    println!("   https://docs.espressif.com/projects/esp-idf/en/latest/esp32c6/get-started/");
    println!();
    println!("2. Use pre-built firmware:");
    println!("   espman --esptool --firmware /path/to/build");
    Err(EspError::ToolchainUnavailable(
        "ESP-IDF is neither on PATH nor installed in a known location".to_string(),
    ))
}
