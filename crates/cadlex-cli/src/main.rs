//! cadlex CLI
//!
//! Interpret drafting instructions and run JSON batches against the dry-run
//! engine.

use clap::{Parser, Subcommand};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "cadlex")]
#[command(about = "cadlex - natural-language drafting commands", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Interpret one instruction and print the command as JSON
    Interpret(commands::interpret::InterpretArgs),
    /// Run a JSON batch file and print the report as JSON
    Batch(commands::batch::BatchArgs),
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Interpret(args) => commands::interpret::execute(args),
        Commands::Batch(args) => commands::batch::execute(args),
    };

    match result {
        Ok(outcome) => std::process::exit(outcome.exit_code()),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
