//! Canonical log field keys and event names
//!
//! `tracing` macros need field names as identifiers, so the logging macros
//! spell these out literally; the constants are what readers of captured or
//! exported events match against.

/// Module path of the emitting code
pub const FIELD_COMPONENT: &str = "component";
/// Logical operation, e.g. `interpret` or `run_batch`
pub const FIELD_OP: &str = "op";
/// One of the `EVENT_*` values
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
/// Carried by the span a batch or an executed instruction runs in
pub const FIELD_REQUEST_ID: &str = "request_id";

/// Drafting operation name (`draw_line`, ...)
pub const FIELD_OPERATION: &str = "operation";
pub const FIELD_CONFIDENCE: &str = "confidence";
pub const FIELD_HANDLE: &str = "handle";
pub const FIELD_BATCH_TOTAL: &str = "batch_total";
pub const FIELD_SUCCEEDED: &str = "succeeded";
pub const FIELD_FAILED: &str = "failed";

pub const FIELD_ERR_CODE: &str = "err.code";
pub const FIELD_ERR_MESSAGE: &str = "err.message";

pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
