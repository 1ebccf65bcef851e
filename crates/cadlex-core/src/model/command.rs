use serde::{Deserialize, Serialize};

use super::operation::{Locale, OperationKind};
use super::parameter::Parameters;

/// Free-text instruction as received from a caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawInput {
    pub text: String,
    pub locale: Option<Locale>,
}

impl RawInput {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            locale: None,
        }
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = Some(locale);
        self
    }

    /// Locale to interpret with, falling back to `default`
    pub fn locale_or(&self, default: Locale) -> Locale {
        self.locale.unwrap_or(default)
    }
}

/// Validated, typed command ready for a drafting engine.
///
/// Only the command builder constructs this type, so every required parameter
/// of `operation` is present and `confidence` lies in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedCommand {
    pub operation: OperationKind,
    pub confidence: f64,
    pub parameters: Parameters,
}
