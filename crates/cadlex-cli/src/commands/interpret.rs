//! Interpret command
//!
//! Usage: cadlex interpret <TEXT> [--strict | --no-strict] [--locale en|es]
//!        [--min-confidence X] [--execute] [--config FILE]

use clap::Args;
use std::path::PathBuf;

use cadlex_core::model::Locale;
use cadlex_engine::{apply_engine_command, EngineCommand, EngineCommandResult};

use super::{load_config, open_session, Outcome};

#[derive(Debug, Args)]
pub struct InterpretArgs {
    /// Instruction text, e.g. "draw a line from 0,0 to 100,100"
    pub text: String,

    /// Require every required parameter to be stated
    #[arg(long)]
    pub strict: bool,

    /// Allow defaults even when the config file enables strict mode
    #[arg(long, conflicts_with = "strict")]
    pub no_strict: bool,

    /// Locale of the instruction (en, es)
    #[arg(long)]
    pub locale: Option<Locale>,

    /// Reject commands below this confidence
    #[arg(long)]
    pub min_confidence: Option<f64>,

    /// Execute the command against the dry-run engine
    #[arg(long)]
    pub execute: bool,

    /// TOML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Execute interpret command
pub fn execute(args: InterpretArgs) -> Result<Outcome, Box<dyn std::error::Error>> {
    let config = load_config(args.config.as_deref())?;
    let strict = !args.no_strict && (args.strict || config.nlp.strict_mode);
    let mut session = open_session(config)?;

    // Gate on confidence before anything reaches the engine
    let command = match apply_engine_command(
        EngineCommand::Interpret {
            text: args.text,
            locale: args.locale,
            strict,
        },
        &mut session,
    )? {
        EngineCommandResult::Interpreted(command) => command,
        other => return Err(format!("unexpected engine result: {:?}", other).into()),
    };
    if let Some(min) = args.min_confidence {
        if command.confidence < min {
            return Err(format!(
                "confidence {:.2} is below the minimum {:.2} for {}",
                command.confidence, min, command.operation
            )
            .into());
        }
    }

    let json = if args.execute {
        match apply_engine_command(EngineCommand::ExecuteParsed { command }, &mut session)? {
            EngineCommandResult::Executed(execution) => serde_json::to_string_pretty(&execution)?,
            other => return Err(format!("unexpected engine result: {:?}", other).into()),
        }
    } else {
        serde_json::to_string_pretty(&command)?
    };
    println!("{}", json);
    Ok(Outcome::Success)
}
