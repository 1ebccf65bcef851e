#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::cell::Cell;
use std::rc::Rc;

use cadlex_core::batch::{BatchOptions, CancellationToken, ItemErrorKind, ItemSpec};
use cadlex_core::config::CadlexConfig;
use cadlex_core::executor::{Deadline, DraftingEngine, EngineError, Handle};
use cadlex_core::logging_facility::test_capture::init_test_capture;
use cadlex_core::model::{OperationKind, Parameters};
use cadlex_core_types::schema::{
    EVENT_END, EVENT_START, FIELD_BATCH_TOTAL, FIELD_CONFIDENCE, FIELD_FAILED, FIELD_HANDLE,
    FIELD_OPERATION, FIELD_REQUEST_ID, FIELD_SUCCEEDED,
};
use cadlex_core_types::RequestId;
use cadlex_engine::{apply_engine_command, DryRunEngine, EngineCommand, EngineCommandResult, Session};
use serde_json::json;

fn items(value: serde_json::Value) -> Vec<ItemSpec> {
    serde_json::from_value(value).unwrap()
}

fn dry_session() -> Session<DryRunEngine> {
    Session::new(CadlexConfig::default(), DryRunEngine::new()).unwrap()
}

/// Engine whose refresh always fails and which can fail chosen calls
struct BrokenRefreshEngine {
    calls: usize,
    refresh_attempts: Rc<Cell<usize>>,
    fail_all: bool,
}

impl DraftingEngine for BrokenRefreshEngine {
    fn execute(
        &mut self,
        _operation: OperationKind,
        _parameters: &Parameters,
        _deadline: Deadline,
    ) -> Result<Handle, EngineError> {
        self.calls += 1;
        if self.fail_all {
            return Err(EngineError::NotConnected);
        }
        Ok(Handle::new(self.calls.to_string()))
    }

    fn refresh_view(&mut self) -> Result<(), EngineError> {
        self.refresh_attempts.set(self.refresh_attempts.get() + 1);
        Err(EngineError::Operation {
            reason: "viewport locked".to_string(),
        })
    }
}

#[test]
fn test_batch_refreshes_view_once() {
    // GIVEN a session over the dry-run engine
    let mut session = dry_session();
    let batch = items(json!([
        {"operation": "create_layer", "params": {"name": "Walls"}},
        {"operation": "draw_line", "params": {"start": "0,0", "end": "10,0", "layer": "Walls"}},
        {"operation": "draw_circle", "params": {"center": [5, 5], "radius": 2}}
    ]));

    // WHEN the batch runs
    let report = session.run_batch(&batch, true);

    // THEN every item succeeded and the view was refreshed exactly once
    assert_eq!(report.succeeded_count, 3);
    assert_eq!(session.engine().calls().len(), 3);
    assert_eq!(session.engine().refresh_count(), 1);
    assert_eq!(session.engine().calls()[1].parameters.text("layer"), Some("Walls"));
}

#[test]
fn test_no_refresh_when_nothing_succeeded() {
    let mut session = dry_session();
    let report = session.run_batch(&items(json!([{"operation": "draw_blob"}])), false);
    assert_eq!(report.succeeded_count, 0);
    assert_eq!(session.engine().refresh_count(), 0);
}

#[test]
fn test_refresh_failure_does_not_alter_report() {
    let attempts = Rc::new(Cell::new(0));
    let engine = BrokenRefreshEngine {
        calls: 0,
        refresh_attempts: attempts.clone(),
        fail_all: false,
    };
    let mut session = Session::new(CadlexConfig::default(), engine).unwrap();
    let report = session.run_batch(&items(json!([{"operation": "list_layers"}])), true);

    assert_eq!(report.succeeded_count, 1);
    assert!(!report.is_partial_failure());
    assert_eq!(attempts.get(), 1);
}

#[test]
fn test_disconnected_engine_fails_every_item() {
    let attempts = Rc::new(Cell::new(0));
    let engine = BrokenRefreshEngine {
        calls: 0,
        refresh_attempts: attempts.clone(),
        fail_all: true,
    };
    let mut session = Session::new(CadlexConfig::default(), engine).unwrap();
    let report = session.run_batch(
        &items(json!([{"operation": "list_layers"}, {"operation": "list_layers"}])),
        true,
    );

    assert_eq!(report.succeeded_count, 0);
    for result in &report.results {
        let err = result.error().unwrap();
        assert_eq!(err.kind, ItemErrorKind::ExecutionFailure);
        assert_eq!(err.code, "ERR_NOT_CONNECTED");
    }
    assert_eq!(attempts.get(), 0);
}

#[test]
fn test_cancelled_before_start_skips_everything() {
    let mut session = dry_session();
    let token = CancellationToken::new();
    token.cancel();
    let options = BatchOptions::default().with_cancel(token);

    let report = session.run_batch_with(
        &items(json!([{"operation": "list_layers"}, {"operation": "list_layers"}])),
        true,
        &options,
    );

    assert_eq!(report.total, 2);
    assert_eq!(report.skipped_count(), 2);
    assert!(session.engine().calls().is_empty());
}

#[test]
fn test_engine_commands() {
    let mut session = dry_session();

    let result = apply_engine_command(
        EngineCommand::Interpret {
            text: "crear capa Muros".to_string(),
            locale: Some(cadlex_core::model::Locale::Es),
            strict: true,
        },
        &mut session,
    )
    .unwrap();
    match result {
        EngineCommandResult::Interpreted(cmd) => {
            assert_eq!(cmd.operation, OperationKind::CreateLayer);
            assert_eq!(cmd.parameters.text("name"), Some("Muros"));
        }
        other => panic!("unexpected result: {:?}", other),
    }
    assert!(session.engine().calls().is_empty());

    let result = apply_engine_command(
        EngineCommand::ExecuteCommand {
            text: "draw a rectangle from 0,0 to 20,10".to_string(),
            locale: None,
            strict: true,
        },
        &mut session,
    )
    .unwrap();
    match result {
        EngineCommandResult::Executed(exec) => {
            assert_eq!(exec.command.operation, OperationKind::DrawRectangle);
            assert_eq!(exec.handle.as_str(), "20");
        }
        other => panic!("unexpected result: {:?}", other),
    }

    let err = apply_engine_command(
        EngineCommand::Interpret {
            text: "draw something".to_string(),
            locale: None,
            strict: false,
        },
        &mut session,
    )
    .unwrap_err();
    assert_eq!(err.code(), "ERR_UNRECOGNIZED_OPERATION");
}

#[test]
fn test_interpreted_command_executes_without_reinterpreting() {
    // GIVEN a command interpreted once
    let mut session = dry_session();
    let command = match apply_engine_command(
        EngineCommand::Interpret {
            text: "draw a circle at 5,5 radius 2".to_string(),
            locale: None,
            strict: true,
        },
        &mut session,
    )
    .unwrap()
    {
        EngineCommandResult::Interpreted(cmd) => cmd,
        other => panic!("unexpected result: {:?}", other),
    };

    // WHEN it is executed as is
    let result = apply_engine_command(
        EngineCommand::ExecuteParsed {
            command: command.clone(),
        },
        &mut session,
    )
    .unwrap();

    // THEN the engine receives exactly that command
    match result {
        EngineCommandResult::Executed(exec) => assert_eq!(exec.command, command),
        other => panic!("unexpected result: {:?}", other),
    }
    assert_eq!(session.engine().calls().len(), 1);
    assert_eq!(session.engine().calls()[0].operation, OperationKind::DrawCircle);
}

#[test]
fn test_batch_events_carry_request_id() {
    let capture = init_test_capture();
    let mut session = dry_session();
    let batch: Vec<ItemSpec> = (0..7)
        .map(|_| ItemSpec::new("list_layers", Default::default()))
        .collect();

    session.run_batch(&batch, true);

    let start = capture
        .find("run_batch", EVENT_START, |e| e.field(FIELD_BATCH_TOTAL) == Some("7"))
        .expect("run_batch start event");
    let request_id = start
        .field(FIELD_REQUEST_ID)
        .expect("request_id on batch events")
        .to_string();
    assert!(request_id.parse::<RequestId>().is_ok());

    // The end event of the same batch shares the span's request_id
    let end = capture
        .find("run_batch", EVENT_END, |e| {
            e.field(FIELD_REQUEST_ID) == Some(request_id.as_str())
        })
        .expect("run_batch end event");
    assert_eq!(end.field(FIELD_SUCCEEDED), Some("7"));
    assert_eq!(end.field(FIELD_FAILED), Some("0"));
}

#[test]
fn test_execute_command_events_share_request() {
    // GIVEN a capture layer and a session
    let capture = init_test_capture();
    let mut session = dry_session();

    // WHEN a layer is turned off by instruction
    let exec = session
        .execute_command("turn off layer \"Hidden Lines\"", true)
        .unwrap();

    // THEN interpretation and execution are logged under one request
    let interpreted = capture
        .find("interpret", EVENT_END, |e| {
            e.field(FIELD_OPERATION) == Some("turn_layer_off")
        })
        .expect("interpret end event");
    assert!(interpreted.field(FIELD_CONFIDENCE).is_some());
    let request_id = interpreted
        .field(FIELD_REQUEST_ID)
        .expect("interpretation runs inside the execute span")
        .to_string();

    let executed = capture
        .find("execute", EVENT_END, |e| {
            e.field(FIELD_REQUEST_ID) == Some(request_id.as_str())
        })
        .expect("execute end event");
    assert_eq!(executed.field(FIELD_HANDLE), Some(exec.handle.as_str()));
}
