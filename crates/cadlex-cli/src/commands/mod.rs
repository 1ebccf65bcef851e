//! Subcommand implementations

pub mod batch;
pub mod interpret;

use std::path::Path;

use cadlex_core::config::CadlexConfig;
use cadlex_core::logging_facility;
use cadlex_engine::{DryRunEngine, Session};

/// How a successful run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// Some batch items failed
    PartialFailure,
}

impl Outcome {
    pub fn exit_code(self) -> i32 {
        match self {
            Outcome::Success => 0,
            Outcome::PartialFailure => 2,
        }
    }
}

/// Load the config file if given, then start logging with its profile
pub fn load_config(path: Option<&Path>) -> Result<CadlexConfig, Box<dyn std::error::Error>> {
    let config = match path {
        Some(path) => CadlexConfig::load(path)?,
        None => CadlexConfig::default(),
    };
    logging_facility::init(config.logging.profile);
    Ok(config)
}

pub fn open_session(config: CadlexConfig) -> Result<Session<DryRunEngine>, Box<dyn std::error::Error>> {
    Ok(Session::new(config, DryRunEngine::new())?)
}
