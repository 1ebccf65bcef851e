//! Command orchestration layer.
//!
//! Maps caller requests onto session entry points.

pub mod engine_command;
