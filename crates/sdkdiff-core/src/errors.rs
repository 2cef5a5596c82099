use sdkdiff_core_types::RequestId;
use thiserror::Error;

/// Result type alias using SdkDiffError
pub type Result<T> = std::result::Result<T, SdkDiffError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that callers can match on when
/// translating a failed comparison into a user-visible message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Engine input
    /// Records are not a sequence, a node is not a mapping, or a node lacks its id
    InvalidArgument,

    // Payload extraction
    /// Payload bytes are not valid UTF-8 JSON
    InvalidPayload,
    /// The collection a record source points at is absent from the payload
    MissingField,
    /// A record kind name did not match any known kind or configured source
    UnknownRecordKind,

    // Integration/IO
    Io,
    Serialization,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidArgument => "ERR_INVALID_ARGUMENT",
            ExErrorKind::InvalidPayload => "ERR_INVALID_PAYLOAD",
            ExErrorKind::MissingField => "ERR_MISSING_FIELD",
            ExErrorKind::UnknownRecordKind => "ERR_UNKNOWN_RECORD_KIND",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification for programmatic handling plus the context of the
/// comparison that failed (operation, side, offending record, request).
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    record_id: Option<String>,
    side: Option<String>,
    request_id: Option<RequestId>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            record_id: None,
            side: None,
            request_id: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add record ID context
    pub fn with_record_id(mut self, id: impl Into<String>) -> Self {
        self.record_id = Some(id.into());
        self
    }

    /// Add side context ("main" or "base")
    pub fn with_side(mut self, side: impl Into<String>) -> Self {
        self.side = Some(side.into());
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

    /// Get the record ID context, if any
    pub fn record_id(&self) -> Option<&str> {
        self.record_id.as_deref()
    }

    /// Get the side context, if any
    pub fn side(&self) -> Option<&str> {
        self.side.as_deref()
    }

    /// Get the request ID context, if any
    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
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
        if let Some(side) = &self.side {
            write!(f, " (side: {})", side)?;
        }
        if let Some(record_id) = &self.record_id {
            write!(f, " (record_id: {})", record_id)?;
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

// ========== End Error Facility ==========

/// Error taxonomy for comparison operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SdkDiffError {
    /// The records handed to the engine are not a JSON array
    #[error("{side} records must be a sequence, got {found}")]
    RecordsNotASequence { side: String, found: String },

    /// A node handed to the flattener is not a JSON object
    #[error("Node at position {index} is not an object")]
    NodeNotAnObject { index: usize },

    /// A node handed to the flattener has no id value
    #[error("Node at position {index} has no `{id_field}` value")]
    NodeMissingId {
        index: usize,
        id_field: String,
        parent_id: Option<String>,
    },

    /// A group node's child collection is present but not a sequence
    #[error("Children of node {node_id} under `{children_field}` must be a sequence")]
    InvalidChildren {
        node_id: String,
        children_field: String,
    },

    /// A payload could not be decoded as JSON
    #[error("Invalid payload: {reason}")]
    InvalidPayload { reason: String },

    /// The collection a record source points at is absent from the payload
    #[error("Payload has no collection at `{pointer}`")]
    MissingCollection { pointer: String },

    /// A record kind name is not known
    #[error("Unknown record kind: {name}")]
    UnknownRecordKind { name: String },
}

impl From<SdkDiffError> for ExError {
    fn from(err: SdkDiffError) -> Self {
        let message = err.to_string();
        match err {
            SdkDiffError::RecordsNotASequence { side, .. } => {
                ExError::new(ExErrorKind::InvalidArgument)
                    .with_side(side)
                    .with_message(message)
            }
            SdkDiffError::NodeNotAnObject { .. } => {
                ExError::new(ExErrorKind::InvalidArgument).with_message(message)
            }
            SdkDiffError::NodeMissingId { parent_id, .. } => {
                let ex = ExError::new(ExErrorKind::InvalidArgument).with_message(message);
                match parent_id {
                    Some(parent) => ex.with_record_id(parent),
                    None => ex,
                }
            }
            SdkDiffError::InvalidChildren { node_id, .. } => {
                ExError::new(ExErrorKind::InvalidArgument)
                    .with_record_id(node_id)
                    .with_message(message)
            }
            SdkDiffError::InvalidPayload { .. } => {
                ExError::new(ExErrorKind::InvalidPayload).with_message(message)
            }
            SdkDiffError::MissingCollection { .. } => {
                ExError::new(ExErrorKind::MissingField).with_message(message)
            }
            SdkDiffError::UnknownRecordKind { .. } => {
                ExError::new(ExErrorKind::UnknownRecordKind).with_message(message)
            }
        }
    }
}

impl From<serde_json::Error> for SdkDiffError {
    fn from(err: serde_json::Error) -> Self {
        SdkDiffError::InvalidPayload {
            reason: err.to_string(),
        }
    }
}
