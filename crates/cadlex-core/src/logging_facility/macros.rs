//! Operation boundary macros
//!
//! Each macro emits one event stamped with `component`, `op` and `event`
//! (see `cadlex_core_types::schema`). Extra `key = value` fields follow the
//! usual `tracing` syntax.

/// Log the start of an operation
///
/// ```
/// # use cadlex_core::log_op_start;
/// log_op_start!("interpret");
/// log_op_start!("run_batch", batch_total = 3, strict = true);
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr $(, $($field:tt)+)?) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::cadlex_core_types::schema::EVENT_START,
            $($($field)+)?
        )
    };
}

/// Log the successful end of an operation; `duration_ms` is mandatory
///
/// ```
/// # use cadlex_core::log_op_end;
/// log_op_end!("execute", duration_ms = 3, handle = "2A");
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr $(, $($field:tt)+)?) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::cadlex_core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($($field)+)?
        )
    };
}

/// Log a failed operation at error level
///
/// `$err` is anything convertible into `ExError` (a `CadlexError`, an
/// `EngineError`, or an `ExError` itself); its stable code and message
/// become `err.code` and `err.message`.
///
/// ```
/// # use cadlex_core::{log_op_error, errors::CadlexError};
/// let err = CadlexError::UnrecognizedOperation { text: "draw something".to_string() };
/// log_op_error!("interpret", err, duration_ms = 1);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr $(, $($field:tt)+)?) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::cadlex_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.code = ex_err.code(),
            err.message = ex_err.message(),
            $($($field)+)?
        )
    }};
}
