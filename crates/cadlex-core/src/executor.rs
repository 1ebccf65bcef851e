//! Drafting engine capability
//!
//! The system that actually draws is external. The interpreter and the batch
//! dispatcher only see this trait.

use std::fmt;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::errors::{ExError, ExErrorKind};
use crate::model::{OperationKind, Parameters};

/// Opaque success payload returned by an engine
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Handle(String);

impl Handle {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Point in time after which an engine call should give up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    started: Instant,
    budget: Option<Duration>,
}

impl Deadline {
    /// No time limit
    pub fn none() -> Self {
        Self {
            started: Instant::now(),
            budget: None,
        }
    }

    /// Expires `budget` from now
    pub fn after(budget: Duration) -> Self {
        Self {
            started: Instant::now(),
            budget: Some(budget),
        }
    }

    pub fn from_timeout(timeout: Option<Duration>) -> Self {
        match timeout {
            Some(budget) => Self::after(budget),
            None => Self::none(),
        }
    }

    pub fn is_expired(&self) -> bool {
        match self.budget {
            Some(budget) => self.started.elapsed() > budget,
            None => false,
        }
    }

    pub fn budget_ms(&self) -> Option<u64> {
        self.budget.map(|b| b.as_millis() as u64)
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

/// Failure reported by a drafting engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Engine rejected the operation: {reason}")]
    Operation { reason: String },

    #[error("Engine gave up after {elapsed_ms} ms")]
    Timeout { elapsed_ms: u64 },

    #[error("Engine is not connected")]
    NotConnected,
}

impl From<EngineError> for ExError {
    fn from(err: EngineError) -> Self {
        let kind = match err {
            EngineError::Operation { .. } => ExErrorKind::ExecutionFailure,
            EngineError::Timeout { .. } => ExErrorKind::Timeout,
            EngineError::NotConnected => ExErrorKind::NotConnected,
        };
        ExError::new(kind).with_message(err.to_string())
    }
}

/// Stateful external drawing system
///
/// Implementations are driven from a single thread, one call at a time.
pub trait DraftingEngine {
    /// Perform one validated operation
    ///
    /// # Errors
    ///
    /// Any [`EngineError`]; `Timeout` when the engine gave up because
    /// `deadline` passed.
    fn execute(
        &mut self,
        operation: OperationKind,
        parameters: &Parameters,
        deadline: Deadline,
    ) -> Result<Handle, EngineError>;

    /// Redraw the host view after a batch
    ///
    /// # Errors
    ///
    /// Any [`EngineError`]; callers only log it.
    fn refresh_view(&mut self) -> Result<(), EngineError> {
        Ok(())
    }
}

impl<E: DraftingEngine + ?Sized> DraftingEngine for Box<E> {
    fn execute(
        &mut self,
        operation: OperationKind,
        parameters: &Parameters,
        deadline: Deadline,
    ) -> Result<Handle, EngineError> {
        (**self).execute(operation, parameters, deadline)
    }

    fn refresh_view(&mut self) -> Result<(), EngineError> {
        (**self).refresh_view()
    }
}
