use orchaudit_core_types::RunId;
use thiserror::Error;

/// Result type alias using AuditError
pub type Result<T> = std::result::Result<T, AuditError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling, testing, and log filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Driver-side validation
    InvalidInput,
    /// A configuration file could not be decoded as JSON
    InvalidDocument,

    // Record-level
    /// A field the running analysis requires is absent from an application record
    MissingField,
    /// `versionInfo.lastConfigChangeAt` does not match the fixed timestamp format
    InvalidTimestamp,

    // Integration/IO
    Io,
    Serialization,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::InvalidDocument => "ERR_INVALID_DOCUMENT",
            ExErrorKind::MissingField => "ERR_MISSING_FIELD",
            ExErrorKind::InvalidTimestamp => "ERR_INVALID_TIMESTAMP",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
        }
    }
}

/// Canonical structured error type
///
/// Carries classification fields for programmatic handling and the context
/// (operation, application, run) needed to make a log line actionable.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    app_id: Option<String>,
    run_id: Option<RunId>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            app_id: None,
            run_id: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add application id context
    pub fn with_app_id(mut self, id: impl Into<String>) -> Self {
        self.app_id = Some(id.into());
        self
    }

    /// Add run id context
    pub fn with_run_id(mut self, run_id: RunId) -> Self {
        self.run_id = Some(run_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the application id context, if any
    pub fn app_id(&self) -> Option<&str> {
        self.app_id.as_deref()
    }

    /// Get the run id context, if any
    pub fn run_id(&self) -> Option<&RunId> {
        self.run_id.as_ref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
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
        if let Some(app_id) = &self.app_id {
            write!(f, " (app_id: {})", app_id)?;
        }
        if let Some(source) = &self.source {
            write!(f, " <- {}", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

impl From<std::io::Error> for ExError {
    fn from(err: std::io::Error) -> Self {
        ExError::new(ExErrorKind::Io).with_message(err.to_string())
    }
}

// ========== End Error Facility ==========

/// Domain failures raised by the analysis engine
///
/// Only failures that abort a run live here. Tolerated conditions
/// (malformed port mappings, unparsable version suffixes, unmatched ids)
/// are absorbed by the component that meets them.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AuditError {
    /// Application has no `versionInfo.lastConfigChangeAt` string
    #[error("Application {app_id} has no versionInfo.lastConfigChangeAt timestamp")]
    MissingTimestamp { app_id: String },

    /// Timestamp does not match `YYYY-MM-DDTHH:MM:SS.ffffffZ`
    #[error("Application {app_id} has malformed lastConfigChangeAt {value:?}: {reason}")]
    InvalidTimestamp {
        app_id: String,
        value: String,
        reason: String,
    },

    /// Application matched across snapshots but has no `container.docker.image`
    #[error("Application {app_id} has no container.docker.image in snapshot {snapshot}")]
    MissingImage { app_id: String, snapshot: u8 },

    /// Serialization error (JSON encoding/decoding)
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl From<AuditError> for ExError {
    fn from(err: AuditError) -> Self {
        let message = err.to_string();
        match err {
            AuditError::MissingTimestamp { app_id } => ExError::new(ExErrorKind::MissingField)
                .with_op("filter_and_sort_by_recency")
                .with_app_id(app_id)
                .with_message(message),

            AuditError::InvalidTimestamp { app_id, .. } => {
                ExError::new(ExErrorKind::InvalidTimestamp)
                    .with_op("filter_and_sort_by_recency")
                    .with_app_id(app_id)
                    .with_message(message)
            }

            AuditError::MissingImage { app_id, .. } => ExError::new(ExErrorKind::MissingField)
                .with_op("diff_versions_across_snapshots")
                .with_app_id(app_id)
                .with_message(message),

            AuditError::Serialization { .. } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
        }
    }
}

/// Conversion from serde_json::Error to AuditError
impl From<serde_json::Error> for AuditError {
    fn from(err: serde_json::Error) -> Self {
        AuditError::Serialization {
            message: err.to_string(),
        }
    }
}
