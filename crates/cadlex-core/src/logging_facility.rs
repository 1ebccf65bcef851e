//! Structured logging for cadlex
//!
//! Binaries call [`init`] once with the profile from `[logging]` in the
//! config file. Library code only emits events: the `log_op_*` macros mark
//! operation boundaries (interpret, execute, run_batch) and sessions wrap
//! each request in a span carrying its `request_id`.
//!
//! ```rust
//! use cadlex_core::logging_facility::{init, Profile};
//!
//! init(Profile::Production);
//! ```

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
