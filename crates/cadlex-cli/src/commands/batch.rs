//! Batch command
//!
//! Usage: cadlex batch <FILE> [--strict | --no-strict] [--timeout-ms N] [--config FILE]
//!
//! FILE holds a JSON array of `{"operation": ..., "params": {...}}`.

use clap::Args;
use std::path::PathBuf;

use cadlex_core::batch::ItemSpec;
use cadlex_engine::{apply_engine_command, EngineCommand, EngineCommandResult};

use super::{load_config, open_session, Outcome};

#[derive(Debug, Args)]
pub struct BatchArgs {
    /// JSON batch file
    pub file: PathBuf,

    /// Require every required parameter to be stated
    #[arg(long)]
    pub strict: bool,

    /// Allow defaults even when the config file enables strict mode
    #[arg(long, conflicts_with = "strict")]
    pub no_strict: bool,

    /// Per-item deadline in milliseconds (0 disables it)
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// TOML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Execute batch command
pub fn execute(args: BatchArgs) -> Result<Outcome, Box<dyn std::error::Error>> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(ms) = args.timeout_ms {
        config.batch.item_timeout_ms = ms;
    }
    let strict = !args.no_strict && (args.strict || config.nlp.strict_mode);

    let raw = std::fs::read_to_string(&args.file)
        .map_err(|e| format!("cannot read {}: {}", args.file.display(), e))?;
    let items: Vec<ItemSpec> = serde_json::from_str(&raw)
        .map_err(|e| format!("invalid batch file {}: {}", args.file.display(), e))?;

    let mut session = open_session(config)?;
    let report = match apply_engine_command(EngineCommand::RunBatch { items, strict }, &mut session)? {
        EngineCommandResult::Batch(report) => report,
        other => return Err(format!("unexpected engine result: {:?}", other).into()),
    };

    println!("{}", serde_json::to_string_pretty(&report)?);
    if report.is_partial_failure() {
        Ok(Outcome::PartialFailure)
    } else {
        Ok(Outcome::Success)
    }
}
