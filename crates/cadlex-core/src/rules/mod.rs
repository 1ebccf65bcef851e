//! Operation catalog and domain rules

pub mod catalog;
pub mod validation;

pub use catalog::{param_type, spec_for, DefaultValue, OperationSpec, ParamSpec, ParamType};
pub use validation::{into_result, violations, Violation};
