//! Caller-owned session
//!
//! Holds the configuration, the compiled interpreter and one drafting engine.
//! Nothing here is global; two sessions never share state.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{info_span, warn};

use cadlex_core::batch::{BatchOptions, BatchReport, Dispatcher, ItemSpec};
use cadlex_core::config::CadlexConfig;
use cadlex_core::errors::{ExError, Result};
use cadlex_core::executor::{Deadline, DraftingEngine, Handle};
use cadlex_core::interpret::Interpreter;
use cadlex_core::model::{ParsedCommand, RawInput};
use cadlex_core::{log_op_end, log_op_error, log_op_start};
use cadlex_core_types::RequestId;

/// A command together with the handle the engine returned for it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandExecution {
    pub command: ParsedCommand,
    pub handle: Handle,
}

pub struct Session<E: DraftingEngine> {
    config: CadlexConfig,
    interpreter: Interpreter,
    dispatcher: Dispatcher,
    engine: E,
}

impl<E: DraftingEngine> Session<E> {
    /// # Errors
    ///
    /// `Internal` if the interpreter tables fail to compile.
    pub fn new(config: CadlexConfig, engine: E) -> Result<Self> {
        Ok(Self {
            interpreter: Interpreter::new(config.nlp.default_locale)?,
            dispatcher: Dispatcher::new()?,
            config,
            engine,
        })
    }

    pub fn config(&self) -> &CadlexConfig {
        &self.config
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn into_engine(self) -> E {
        self.engine
    }

    /// Interpret `text` in the configured default locale
    ///
    /// # Errors
    ///
    /// Any interpretation error; see [`Interpreter::interpret`].
    pub fn interpret(&self, text: &str, strict: bool) -> Result<ParsedCommand> {
        self.interpret_input(&RawInput::new(text), strict)
    }

    /// Interpret a raw input, honoring its locale tag
    ///
    /// # Errors
    ///
    /// Any interpretation error; see [`Interpreter::interpret`].
    pub fn interpret_input(&self, input: &RawInput, strict: bool) -> Result<ParsedCommand> {
        let start = Instant::now();
        log_op_start!("interpret", strict = strict);

        match self.interpreter.interpret(input, strict) {
            Ok(command) => {
                log_op_end!(
                    "interpret",
                    duration_ms = start.elapsed().as_millis() as u64,
                    operation = command.operation.name(),
                    confidence = command.confidence
                );
                Ok(command)
            }
            Err(e) => {
                log_op_error!(
                    "interpret",
                    e.clone(),
                    duration_ms = start.elapsed().as_millis() as u64
                );
                Err(e)
            }
        }
    }

    /// Run `items` with the configured per-item timeout
    pub fn run_batch(&mut self, items: &[ItemSpec], strict: bool) -> BatchReport {
        let options = BatchOptions::default().with_item_timeout(self.config.item_timeout());
        self.run_batch_with(items, strict, &options)
    }

    /// Run `items` sequentially; the view is refreshed once afterwards when
    /// anything succeeded
    pub fn run_batch_with(&mut self, items: &[ItemSpec], strict: bool, options: &BatchOptions) -> BatchReport {
        let request_id = RequestId::new();
        let span = info_span!("batch", request_id = %request_id);
        let _guard = span.enter();

        let start = Instant::now();
        log_op_start!("run_batch", batch_total = items.len() as u64, strict = strict);

        let report = self
            .dispatcher
            .run_batch(items, strict, &mut self.engine, options);

        if report.succeeded_count > 0 {
            if let Err(e) = self.engine.refresh_view() {
                warn!(err.message = %e, "view refresh failed after batch");
            }
        }

        log_op_end!(
            "run_batch",
            duration_ms = start.elapsed().as_millis() as u64,
            succeeded = report.succeeded_count as u64,
            failed = report.failed_count() as u64
        );
        report
    }

    /// Interpret `text` and execute the resulting command
    ///
    /// # Errors
    ///
    /// The interpretation error, or the engine error, as an [`ExError`]
    /// carrying a fresh request id.
    pub fn execute_command(&mut self, text: &str, strict: bool) -> std::result::Result<CommandExecution, ExError> {
        self.execute_input(&RawInput::new(text), strict)
    }

    /// [`execute_command`](Self::execute_command) for a locale-tagged input
    ///
    /// # Errors
    ///
    /// Same as [`execute_command`](Self::execute_command).
    pub fn execute_input(
        &mut self,
        input: &RawInput,
        strict: bool,
    ) -> std::result::Result<CommandExecution, ExError> {
        let request_id = RequestId::new();
        let span = info_span!("execute_command", request_id = %request_id);
        let _guard = span.enter();

        let command = self
            .interpret_input(input, strict)
            .map_err(|e| ExError::from(e).with_request_id(request_id))?;
        self.execute_in_span(command, request_id)
    }

    /// Execute an already interpreted command
    ///
    /// # Errors
    ///
    /// The engine error as an [`ExError`] carrying a fresh request id.
    pub fn execute_parsed(&mut self, command: ParsedCommand) -> std::result::Result<CommandExecution, ExError> {
        let request_id = RequestId::new();
        let span = info_span!("execute_command", request_id = %request_id);
        let _guard = span.enter();
        self.execute_in_span(command, request_id)
    }

    fn execute_in_span(
        &mut self,
        command: ParsedCommand,
        request_id: RequestId,
    ) -> std::result::Result<CommandExecution, ExError> {
        let start = Instant::now();
        log_op_start!("execute", operation = command.operation.name());
        let deadline = Deadline::from_timeout(self.config.item_timeout());

        match self
            .engine
            .execute(command.operation, &command.parameters, deadline)
        {
            Ok(handle) => {
                log_op_end!(
                    "execute",
                    duration_ms = start.elapsed().as_millis() as u64,
                    handle = handle.as_str()
                );
                if let Err(e) = self.engine.refresh_view() {
                    warn!(err.message = %e, "view refresh failed");
                }
                Ok(CommandExecution { command, handle })
            }
            Err(e) => {
                let ex_err = ExError::from(e)
                    .with_op(command.operation.name())
                    .with_request_id(request_id);
                log_op_error!(
                    "execute",
                    ex_err.clone(),
                    duration_ms = start.elapsed().as_millis() as u64
                );
                Err(ex_err)
            }
        }
    }
}
