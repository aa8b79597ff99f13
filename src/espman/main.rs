use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;
use espman::error::EspError;
use run::FlashOptions;

mod run;

fn banner() {
    println!("{}", "========================================".green());
    println!("{}", "   ESP32-C6 Firmware Flash Tool".green());
    println!("{}", "========================================".green());
    println!();
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    if let Err(e) = ctrlc::set_handler(|| {
        println!();
        println!("{}", "Flash cancelled by user".yellow());
        std::process::exit(0);
    }) {
        eprintln!("{}", format!("Unexpected error: {e}").red());
        return ExitCode::FAILURE;
    }

    let opts = FlashOptions::parse();
    banner();

    match run::handle_flash(opts) {
        Ok(()) => ExitCode::SUCCESS,
        Err(EspError::Cancelled) => {
            println!();
            println!("{}", "Flash cancelled by user".yellow());
            ExitCode::SUCCESS
        }
        Err(e @ (EspError::Io(_) | EspError::Unexpected(_))) => {
            eprintln!("{}", format!("\nUnexpected error: {e}").red());
            ExitCode::FAILURE
        }
        // Guidance was already printed where the failure was detected
        Err(_) => ExitCode::FAILURE,
    }
}
