//! cadlex engine - orchestration layer
//!
//! Binds a configuration, the interpreter and a drafting engine into a
//! caller-owned [`Session`], and exposes the entry points as engine commands.

pub mod commands;
pub mod dry_run;
pub mod session;

pub use commands::engine_command::{apply_engine_command, EngineCommand, EngineCommandResult};
pub use dry_run::DryRunEngine;
pub use session::{CommandExecution, Session};
