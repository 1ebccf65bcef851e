//! Sequential batch dispatcher
//!
//! Items run one at a time in input order. Every failure, including an engine
//! panic, becomes an [`ItemResult`]; nothing escapes `run_batch`.

use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::builder::CommandBuilder;
use crate::errors::{ExError, Result};
use crate::executor::{Deadline, DraftingEngine, EngineError};
use crate::model::{OperationKind, ParsedCommand};

use super::aggregator::aggregate;
use super::cancel::CancellationToken;
use super::item::{BatchReport, ItemError, ItemErrorKind, ItemResult, ItemSpec};

/// Per-run knobs
#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    /// Budget of each engine call; `None` disables the deadline
    pub item_timeout: Option<Duration>,
    /// Polled before each item
    pub cancel: Option<CancellationToken>,
}

impl BatchOptions {
    pub fn with_item_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.item_timeout = timeout;
        self
    }

    pub fn with_cancel(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancellationToken::is_cancelled)
    }
}

/// Runs item specs through the command builder and a drafting engine
pub struct Dispatcher {
    builder: CommandBuilder,
}

impl Dispatcher {
    pub fn new() -> Result<Self> {
        Ok(Self {
            builder: CommandBuilder::new()?,
        })
    }

    /// Validate one item into a command
    ///
    /// # Errors
    ///
    /// `UnknownOperation` for an unknown operation name, otherwise whatever
    /// [`CommandBuilder::from_raw`] reports.
    pub fn prepare(&self, item: &ItemSpec, strict: bool) -> Result<ParsedCommand> {
        let kind: OperationKind = item.operation.parse()?;
        self.builder.from_raw(kind, &item.params, strict)
    }

    /// Execute `items` in order and report every outcome
    pub fn run_batch<E>(
        &self,
        items: &[ItemSpec],
        strict: bool,
        engine: &mut E,
        options: &BatchOptions,
    ) -> BatchReport
    where
        E: DraftingEngine + ?Sized,
    {
        let mut results = Vec::with_capacity(items.len());
        let mut cancelled_at: Option<usize> = None;

        for (index, item) in items.iter().enumerate() {
            if cancelled_at.is_none() && options.is_cancelled() {
                info!(index, remaining = items.len() - index, "batch cancelled");
                cancelled_at = Some(index);
            }
            if let Some(at) = cancelled_at {
                results.push(ItemResult::failed(
                    index,
                    ItemError::new(
                        ItemErrorKind::Skipped,
                        format!("batch cancelled before item {}", at),
                    ),
                ));
                continue;
            }

            let result = match self.prepare(item, strict) {
                Ok(command) => self.execute(index, &command, engine, options),
                Err(err) => {
                    let ex_err = ExError::from(err).with_index(index);
                    warn!(index, operation = %item.operation, err.code = ex_err.code(), "invalid item");
                    ItemResult::failed(index, ItemError::from_cause(ItemErrorKind::InvalidItem, &ex_err))
                }
            };
            results.push(result);
        }

        aggregate(results)
    }

    fn execute<E>(
        &self,
        index: usize,
        command: &ParsedCommand,
        engine: &mut E,
        options: &BatchOptions,
    ) -> ItemResult
    where
        E: DraftingEngine + ?Sized,
    {
        let deadline = Deadline::from_timeout(options.item_timeout);
        let outcome = catch_unwind(AssertUnwindSafe(|| {
            engine.execute(command.operation, &command.parameters, deadline)
        }));

        match outcome {
            Ok(Ok(handle)) if deadline.is_expired() => {
                let budget = deadline.budget_ms().unwrap_or_default();
                warn!(index, operation = %command.operation, budget_ms = budget, "engine returned after deadline");
                ItemResult::failed(
                    index,
                    ItemError::new(
                        ItemErrorKind::Timeout,
                        format!(
                            "engine returned handle {} after the {} ms deadline",
                            handle, budget
                        ),
                    ),
                )
            }
            Ok(Ok(handle)) => {
                debug!(index, operation = %command.operation, handle = %handle, "item succeeded");
                ItemResult::succeeded(index, handle)
            }
            Ok(Err(err)) => {
                let kind = match err {
                    EngineError::Timeout { .. } => ItemErrorKind::Timeout,
                    EngineError::Operation { .. } | EngineError::NotConnected => {
                        ItemErrorKind::ExecutionFailure
                    }
                };
                let ex_err = ExError::from(err)
                    .with_op(command.operation.name())
                    .with_index(index);
                warn!(index, operation = %command.operation, err.code = ex_err.code(), "item failed");
                ItemResult::failed(index, ItemError::from_cause(kind, &ex_err))
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                warn!(index, operation = %command.operation, panic = %message, "engine panicked");
                ItemResult::failed(
                    index,
                    ItemError::new(
                        ItemErrorKind::ExecutionFailure,
                        format!("engine panicked: {}", message),
                    ),
                )
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
