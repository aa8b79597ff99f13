use std::io::{BufRead, BufReader};
use std::process::{Command, Stdio};

use colored::Colorize;
use tracing::debug;

use crate::env::EnvOverlay;
use crate::error::{EspError, EspResult};

/// Seam for launching the external build/flash commands, so orchestration
/// can be exercised without spawning real processes.
pub trait CommandRunner {
    /// Run a command, streaming its output to the console as it arrives.
    /// Returns true iff the command exited with code zero.
    fn run(&mut self, argv: &[&str], env: &EnvOverlay) -> bool;

    /// Run a command with its output suppressed. Returns true iff the
    /// command exited with code zero.
    fn probe(&mut self, argv: &[&str], env: &EnvOverlay) -> bool;

    /// Run a command silently and return its captured standard output.
    fn capture(&mut self, argv: &[&str], env: &EnvOverlay) -> EspResult<String>;
}

#[derive(Debug, Default)]
pub struct ShellRunner;

impl ShellRunner {
    fn command(argv: &[&str], env: &EnvOverlay) -> Option<Command> {
        let (program, args) = argv.split_first()?;
        let mut command = Command::new(program);
        command.args(args);
        env.apply(&mut command);
        Some(command)
    }
}

impl CommandRunner for ShellRunner {
    fn run(&mut self, argv: &[&str], env: &EnvOverlay) -> bool {
        println!("Running: {}", argv.join(" "));

        let Some(mut command) = Self::command(argv, env) else {
            return false;
        };
        command.stdout(Stdio::piped()).stderr(Stdio::inherit());

        let mut child = match command.spawn() {
            Ok(child) => child,
            Err(e) => {
                println!("{}", format!("Error: {e}").red());
                return false;
            }
        };

        if let Some(stdout) = child.stdout.take() {
            for line in BufReader::new(stdout).lines() {
                match line {
                    Ok(line) => println!("{line}"),
                    Err(e) => {
                        debug!("Output stream ended early: {e}");
                        break;
                    }
                }
            }
        }

        match child.wait() {
            Ok(status) => status.success(),
            Err(e) => {
                println!("{}", format!("Error: {e}").red());
                false
            }
        }
    }

    fn probe(&mut self, argv: &[&str], env: &EnvOverlay) -> bool {
        let Some(mut command) = Self::command(argv, env) else {
            return false;
        };
        command
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        command.status().map(|status| status.success()).unwrap_or(false)
    }

    fn capture(&mut self, argv: &[&str], env: &EnvOverlay) -> EspResult<String> {
        let Some(mut command) = Self::command(argv, env) else {
            return Err(EspError::Unexpected("Empty command line".to_string()));
        };
        command.stdin(Stdio::null()).stderr(Stdio::null());

        let output = command.output()?;
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
