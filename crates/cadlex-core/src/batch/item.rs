use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::{ExError, ExErrorKind};
use crate::executor::Handle;

/// One unvalidated batch entry as supplied by a caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemSpec {
    pub operation: String,
    #[serde(default)]
    pub params: Map<String, Value>,
}

impl ItemSpec {
    pub fn new(operation: impl Into<String>, params: Map<String, Value>) -> Self {
        Self {
            operation: operation.into(),
            params,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemErrorKind {
    /// Rejected before reaching the engine
    InvalidItem,
    ExecutionFailure,
    Timeout,
    /// Never attempted because the batch was cancelled
    Skipped,
}

impl ItemErrorKind {
    fn ex_kind(self) -> ExErrorKind {
        match self {
            ItemErrorKind::InvalidItem => ExErrorKind::InvalidItem,
            ItemErrorKind::ExecutionFailure => ExErrorKind::ExecutionFailure,
            ItemErrorKind::Timeout => ExErrorKind::Timeout,
            ItemErrorKind::Skipped => ExErrorKind::Skipped,
        }
    }
}

/// Failure detail of one item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemError {
    pub kind: ItemErrorKind,
    /// Stable code of the underlying error (`ERR_...`)
    pub code: String,
    pub message: String,
}

impl ItemError {
    /// Wrap `cause`, keeping its code and message
    pub fn from_cause(kind: ItemErrorKind, cause: &ExError) -> Self {
        Self {
            kind,
            code: cause.code().to_string(),
            message: cause.message().to_string(),
        }
    }

    /// Error whose code is the item kind's own
    pub fn new(kind: ItemErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            code: kind.ex_kind().code().to_string(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ItemOutcome {
    Succeeded { handle: Handle },
    Failed { error: ItemError },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemResult {
    pub index: usize,
    pub outcome: ItemOutcome,
}

impl ItemResult {
    pub fn succeeded(index: usize, handle: Handle) -> Self {
        Self {
            index,
            outcome: ItemOutcome::Succeeded { handle },
        }
    }

    pub fn failed(index: usize, error: ItemError) -> Self {
        Self {
            index,
            outcome: ItemOutcome::Failed { error },
        }
    }

    pub fn success(&self) -> bool {
        matches!(self.outcome, ItemOutcome::Succeeded { .. })
    }

    pub fn error(&self) -> Option<&ItemError> {
        match &self.outcome {
            ItemOutcome::Failed { error } => Some(error),
            ItemOutcome::Succeeded { .. } => None,
        }
    }
}

/// Order-preserving report of one batch
///
/// `results[i].index == i` and `results.len() == total`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    pub total: usize,
    pub succeeded_count: usize,
    pub results: Vec<ItemResult>,
}

impl BatchReport {
    pub fn failed_count(&self) -> usize {
        self.total - self.succeeded_count
    }

    pub fn skipped_count(&self) -> usize {
        self.results
            .iter()
            .filter(|r| matches!(r.error(), Some(e) if e.kind == ItemErrorKind::Skipped))
            .count()
    }

    /// At least one item did not succeed
    pub fn is_partial_failure(&self) -> bool {
        self.succeeded_count < self.total
    }
}
