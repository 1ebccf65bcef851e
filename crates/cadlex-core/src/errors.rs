use cadlex_core_types::RequestId;
use thiserror::Error;

/// Result type alias using CadlexError
pub type Result<T> = std::result::Result<T, CadlexError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code used in batch reports, CLI output
/// and log events. Codes never change once published.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExErrorKind {
    // Interpretation
    UnrecognizedOperation,
    InvalidParameterFormat,
    MissingParameter,
    Validation,
    UnknownOperation,

    // Batch items
    InvalidItem,
    ExecutionFailure,
    Timeout,
    Skipped,

    // Engine
    NotConnected,

    // Integration
    Config,
    Serialization,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::UnrecognizedOperation => "ERR_UNRECOGNIZED_OPERATION",
            ExErrorKind::InvalidParameterFormat => "ERR_INVALID_PARAMETER_FORMAT",
            ExErrorKind::MissingParameter => "ERR_MISSING_PARAMETER",
            ExErrorKind::Validation => "ERR_VALIDATION",
            ExErrorKind::UnknownOperation => "ERR_UNKNOWN_OPERATION",
            ExErrorKind::InvalidItem => "ERR_INVALID_ITEM",
            ExErrorKind::ExecutionFailure => "ERR_EXECUTION_FAILURE",
            ExErrorKind::Timeout => "ERR_TIMEOUT",
            ExErrorKind::Skipped => "ERR_SKIPPED",
            ExErrorKind::NotConnected => "ERR_NOT_CONNECTED",
            ExErrorKind::Config => "ERR_CONFIG",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries the classification plus whatever context the failing layer knew:
/// the operation, the offending field, the batch index and the request.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    field: Option<String>,
    index: Option<usize>,
    request_id: Option<RequestId>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            field: None,
            index: None,
            request_id: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add the offending parameter name
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Add batch item index context
    pub fn with_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    /// Add request ID context
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(field) = &self.field {
            write!(f, " (field: {})", field)?;
        }
        if let Some(index) = self.index {
            write!(f, " (index: {})", index)?;
        }
        if let Some(request_id) = &self.request_id {
            write!(f, " [request {}]", request_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for interpretation and command building
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CadlexError {
    // ===== Interpretation Errors =====
    /// No operation keyword matched the text
    #[error("Unrecognized operation in: {text:?}")]
    UnrecognizedOperation { text: String },

    /// A located value does not match its grammar
    #[error("Invalid format for '{field}': {value:?} (expected {expected})")]
    InvalidParameterFormat {
        field: String,
        value: String,
        expected: String,
    },

    /// A required parameter was not supplied and may not be defaulted
    #[error("Missing required parameter '{field}' for {operation}")]
    MissingParameter { operation: String, field: String },

    // ===== Builder Errors =====
    /// One or more fields violate a domain rule
    #[error("Validation failed for [{}]: {reason}", .fields.join(", "))]
    Validation { fields: Vec<String>, reason: String },

    /// Operation name in a batch item is not a known kind
    #[error("Unknown operation: {name}")]
    UnknownOperation { name: String },

    // ===== Ambient Errors =====
    /// Configuration could not be read or contains invalid values
    #[error("Configuration error in {source_name}: {reason}")]
    Config { source_name: String, reason: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// Internal error (should not happen in correct usage)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl CadlexError {
    /// Shorthand for a single-field validation failure
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        CadlexError::Validation {
            fields: vec![field.into()],
            reason: reason.into(),
        }
    }

    /// Shorthand for a grammar mismatch
    pub fn format(
        field: impl Into<String>,
        value: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        CadlexError::InvalidParameterFormat {
            field: field.into(),
            value: value.into(),
            expected: expected.into(),
        }
    }
}

/// Conversion from CadlexError to ExError
impl From<CadlexError> for ExError {
    fn from(err: CadlexError) -> Self {
        let message = err.to_string();
        match err {
            CadlexError::UnrecognizedOperation { .. } => {
                ExError::new(ExErrorKind::UnrecognizedOperation).with_message(message)
            }

            CadlexError::InvalidParameterFormat { field, .. } => {
                ExError::new(ExErrorKind::InvalidParameterFormat)
                    .with_field(field)
                    .with_message(message)
            }

            CadlexError::MissingParameter { operation, field } => {
                ExError::new(ExErrorKind::MissingParameter)
                    .with_op(operation)
                    .with_field(field)
                    .with_message(message)
            }

            CadlexError::Validation { fields, .. } => {
                let err = ExError::new(ExErrorKind::Validation).with_message(message);
                match fields.first() {
                    Some(first) => err.with_field(first.clone()),
                    None => err,
                }
            }

            CadlexError::UnknownOperation { name } => {
                ExError::new(ExErrorKind::UnknownOperation)
                    .with_op(name)
                    .with_message(message)
            }

            CadlexError::Config { .. } => ExError::new(ExErrorKind::Config).with_message(message),

            CadlexError::Serialization { .. } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }

            CadlexError::Internal { .. } => ExError::new(ExErrorKind::Internal).with_message(message),
        }
    }
}

/// Conversion from serde_json::Error to CadlexError
impl From<serde_json::Error> for CadlexError {
    fn from(err: serde_json::Error) -> Self {
        CadlexError::Serialization {
            message: err.to_string(),
        }
    }
}
