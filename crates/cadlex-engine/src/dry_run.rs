//! Dry-run drafting engine
//!
//! Records every call and answers with sequential hexadecimal handles, the
//! way a drawing database numbers new entities. Nothing is drawn.

use tracing::debug;

use cadlex_core::executor::{Deadline, DraftingEngine, EngineError, Handle};
use cadlex_core::model::{OperationKind, Parameters};

/// First handle issued; lower numbers are reserved by drawing databases
const FIRST_HANDLE: u64 = 0x20;

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub operation: OperationKind,
    pub parameters: Parameters,
    pub handle: Handle,
}

#[derive(Debug, Default)]
pub struct DryRunEngine {
    calls: Vec<RecordedCall>,
    refreshes: usize,
}

impl DryRunEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[RecordedCall] {
        &self.calls
    }

    pub fn refresh_count(&self) -> usize {
        self.refreshes
    }
}

impl DraftingEngine for DryRunEngine {
    fn execute(
        &mut self,
        operation: OperationKind,
        parameters: &Parameters,
        deadline: Deadline,
    ) -> Result<Handle, EngineError> {
        if deadline.is_expired() {
            return Err(EngineError::Timeout {
                elapsed_ms: deadline.elapsed().as_millis() as u64,
            });
        }
        let handle = Handle::new(format!("{:X}", FIRST_HANDLE + self.calls.len() as u64));
        debug!(operation = %operation, handle = %handle, "dry run");
        self.calls.push(RecordedCall {
            operation,
            parameters: parameters.clone(),
            handle: handle.clone(),
        });
        Ok(handle)
    }

    fn refresh_view(&mut self) -> Result<(), EngineError> {
        self.refreshes += 1;
        Ok(())
    }
}
