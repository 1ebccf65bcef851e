//! Engine-level commands dispatched against a session.

use cadlex_core::batch::{BatchReport, ItemSpec};
use cadlex_core::errors::ExError;
use cadlex_core::executor::DraftingEngine;
use cadlex_core::model::{Locale, ParsedCommand, RawInput};

use crate::session::{CommandExecution, Session};

/// Requests a session can serve
#[derive(Debug, Clone)]
pub enum EngineCommand {
    /// Turn text into a command without executing it
    Interpret {
        text: String,
        /// Overrides the session's default locale
        locale: Option<Locale>,
        strict: bool,
    },
    RunBatch {
        items: Vec<ItemSpec>,
        strict: bool,
    },
    /// Interpret, then execute the single resulting command
    ExecuteCommand {
        text: String,
        locale: Option<Locale>,
        strict: bool,
    },
    /// Execute a command interpreted earlier
    ExecuteParsed { command: ParsedCommand },
}

/// Result of applying an engine command.
#[derive(Debug, Clone)]
pub enum EngineCommandResult {
    Interpreted(ParsedCommand),
    Batch(BatchReport),
    Executed(CommandExecution),
}

fn raw_input(text: String, locale: Option<Locale>) -> RawInput {
    let input = RawInput::new(text);
    match locale {
        Some(locale) => input.with_locale(locale),
        None => input,
    }
}

/// Apply an engine command to `session`
///
/// A batch always yields a report; item failures live inside it.
///
/// # Errors
///
/// Interpretation and engine errors of the single-command requests.
pub fn apply_engine_command<E: DraftingEngine>(
    cmd: EngineCommand,
    session: &mut Session<E>,
) -> Result<EngineCommandResult, ExError> {
    match cmd {
        EngineCommand::Interpret {
            text,
            locale,
            strict,
        } => session
            .interpret_input(&raw_input(text, locale), strict)
            .map(EngineCommandResult::Interpreted)
            .map_err(ExError::from),
        EngineCommand::RunBatch { items, strict } => {
            Ok(EngineCommandResult::Batch(session.run_batch(&items, strict)))
        }
        EngineCommand::ExecuteCommand {
            text,
            locale,
            strict,
        } => session
            .execute_input(&raw_input(text, locale), strict)
            .map(EngineCommandResult::Executed),
        EngineCommand::ExecuteParsed { command } => session
            .execute_parsed(command)
            .map(EngineCommandResult::Executed),
    }
}
