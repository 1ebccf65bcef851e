//! cadlex core - drafting command interpreter and batch engine
//!
//! This crate provides:
//! - the operation catalog and parameter model shared by every layer
//! - a locale-aware interpreter turning free text into typed commands
//! - the command builder, the only constructor of validated commands
//! - a sequential batch dispatcher with per-item failure isolation
//! - the error facility, logging facility and TOML configuration
//!
//! The drafting engine itself is external and reached through
//! [`executor::DraftingEngine`].

pub mod batch;
pub mod builder;
pub mod config;
pub mod errors;
pub mod executor;
pub mod interpret;
pub mod logging_facility;
pub mod model;
pub mod rules;

// Logging macros refer to the schema through this path
pub use cadlex_core_types;

// Re-export commonly used types
pub use batch::{BatchOptions, BatchReport, CancellationToken, Dispatcher, ItemResult, ItemSpec};
pub use builder::{build, CommandBuilder};
pub use config::CadlexConfig;
pub use errors::{CadlexError, ExError, ExErrorKind, Result};
pub use executor::{Deadline, DraftingEngine, EngineError, Handle};
pub use interpret::Interpreter;
pub use model::{Locale, OperationKind, ParameterValue, Parameters, ParsedCommand, RawInput};
