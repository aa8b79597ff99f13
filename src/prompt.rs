use std::io::{self, Write};

use colored::Colorize;

use crate::error::{EspError, EspResult};

/// Source of interactive console input, injectable so selection logic is
/// testable without a terminal.
pub trait PromptSource {
    /// Show `message` and read one line of input, without the line ending.
    fn ask(&mut self, message: &str) -> EspResult<String>;
}

pub struct StdinPrompt;

impl PromptSource for StdinPrompt {
    fn ask(&mut self, message: &str) -> EspResult<String> {
        print!("{message}");
        io::stdout().flush()?;

        let mut line = String::new();
        let read = io::stdin().read_line(&mut line)?;
        if read == 0 {
            return Err(EspError::Cancelled);
        }

        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

/// Ask for a 1-based index into `ports`, re-prompting until the input is a
/// valid selection.
pub fn select_port(ports: &[String], prompt: &mut dyn PromptSource) -> EspResult<String> {
    loop {
        let choice = prompt.ask(&format!("\nSelect port (1-{}): ", ports.len()))?;

        if let Ok(index) = choice.trim().parse::<usize>() {
            if (1..=ports.len()).contains(&index) {
                return Ok(ports[index - 1].clone());
            }
        }

        println!("{}", "Invalid choice. Please try again.".red());
    }
}

/// Yes/no question; only an explicit `y` counts as yes.
pub fn confirm(question: &str, prompt: &mut dyn PromptSource) -> EspResult<bool> {
    let answer = prompt.ask(question)?;
    Ok(answer.trim().eq_ignore_ascii_case("y"))
}
