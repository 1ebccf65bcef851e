use cadlex_core::executor::{Deadline, DraftingEngine, EngineError, Handle};
use cadlex_core::{Interpreter, ItemSpec, Locale, OperationKind, Parameters};
use serde_json::Value;

/// English interpreter for tests
#[allow(dead_code)]
pub fn interpreter() -> Interpreter {
    Interpreter::new(Locale::En).expect("interpreter tables compile")
}

/// Parse an item spec from a JSON literal
#[allow(dead_code)]
pub fn item(value: Value) -> ItemSpec {
    serde_json::from_value(value).expect("valid item spec")
}

/// A draw_line item that always validates
#[allow(dead_code)]
pub fn line_item() -> ItemSpec {
    item(serde_json::json!({
        "operation": "draw_line",
        "params": {"start": "0,0", "end": "10,10"}
    }))
}

/// Engine that records calls and fails on chosen call numbers
#[allow(dead_code)]
#[derive(Default)]
pub struct RecordingEngine {
    pub calls: Vec<(OperationKind, Parameters)>,
    pub fail_on: Vec<usize>,
}

impl DraftingEngine for RecordingEngine {
    fn execute(
        &mut self,
        operation: OperationKind,
        parameters: &Parameters,
        _deadline: Deadline,
    ) -> Result<Handle, EngineError> {
        let n = self.calls.len();
        self.calls.push((operation, parameters.clone()));
        if self.fail_on.contains(&n) {
            return Err(EngineError::Operation {
                reason: format!("call {} rejected", n),
            });
        }
        Ok(Handle::new(format!("{:X}", n + 1)))
    }
}
