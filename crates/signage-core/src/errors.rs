use signage_core_types::{RequestId, TraceId};
use thiserror::Error;

/// Result type alias using SignageError
pub type Result<T> = std::result::Result<T, SignageError>;

/// Result type alias using the canonical ExError
pub type ExResult<T> = std::result::Result<T, ExError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable code used by tests, the CLI exit message and
/// any future API surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Validation
    InvalidArgument,
    NotFound,
    Deleted,
    AlreadyExists,
    ConstraintViolation,

    // OAuth
    AccessDenied,

    // Integration/IO
    Io,
    Serialization,
    Persistence,
    Config,
    ExternalService,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidArgument => "ERR_INVALID_ARGUMENT",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::Deleted => "ERR_DELETED",
            ExErrorKind::AlreadyExists => "ERR_ALREADY_EXISTS",
            ExErrorKind::ConstraintViolation => "ERR_CONSTRAINT_VIOLATION",
            ExErrorKind::AccessDenied => "ERR_ACCESS_DENIED",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::Config => "ERR_CONFIG",
            ExErrorKind::ExternalService => "ERR_EXTERNAL_SERVICE",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification kind plus optional context (operation, entity,
/// correlation ids) for logging and for the message shown to the user.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    request_id: Option<RequestId>,
    trace_id: Option<TraceId>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            request_id: None,
            trace_id: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity ID context
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Add request ID context
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// Add trace ID context
    pub fn with_trace_id(mut self, trace_id: TraceId) -> Self {
        self.trace_id = Some(trace_id);
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

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    pub fn trace_id(&self) -> Option<&TraceId> {
        self.trace_id.as_ref()
    }

    /// The user-facing message
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
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity_id: {})", entity_id)?;
        }
        if let Some(request_id) = &self.request_id {
            write!(f, " (request_id: {})", request_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Domain error taxonomy for layout and application operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SignageError {
    // ===== Layout validation =====
    /// Width or height is zero
    #[error("The layout dimensions cannot be empty")]
    InvalidDimensions { width: u32, height: u32 },

    /// Name outside 1..=50 characters
    #[error("Layout Name must be between 1 and 50 characters")]
    InvalidName { length: usize },

    /// Description over 254 characters
    #[error("Description can not be longer than 254 characters")]
    DescriptionTooLong { length: usize },

    /// Owner already has a layout with this exact name
    #[error("You already own a layout called '{name}'. Please choose another name.")]
    DuplicateLayoutName { owner_id: i64, name: String },

    // ===== Lookups =====
    #[error("Cannot find region")]
    RegionNotFound { region_id: i64 },

    #[error("Layout not found: {layout_id}")]
    LayoutNotFound { layout_id: i64 },

    #[error("Campaign not found for layout {layout_id:?}")]
    CampaignNotFound { layout_id: Option<i64> },

    /// Operation attempted on an aggregate that was already deleted
    #[error("Layout {layout_id:?} has been deleted")]
    LayoutDeleted { layout_id: Option<i64> },

    /// Save cascade reached children without the parent having an id
    #[error("Layout has no identity after insert")]
    MissingLayoutIdentity,

    // ===== Applications =====
    #[error("Application name cannot be empty")]
    InvalidApplicationName,

    #[error("Invalid redirect URI '{uri}': {reason}")]
    InvalidRedirectUri { uri: String, reason: String },

    #[error("Application not found: {client_id}")]
    ApplicationNotFound { client_id: String },

    #[error("Redirect URI '{redirect_uri}' is not registered for application {client_id}")]
    RedirectUriMismatch {
        client_id: String,
        redirect_uri: String,
    },

    // ===== Generic =====
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl From<SignageError> for ExError {
    fn from(err: SignageError) -> Self {
        let message = err.to_string();
        match err {
            SignageError::InvalidDimensions { .. }
            | SignageError::InvalidName { .. }
            | SignageError::DescriptionTooLong { .. } => {
                ExError::new(ExErrorKind::InvalidArgument)
                    .with_op("validate_layout")
                    .with_message(message)
            }

            SignageError::DuplicateLayoutName { owner_id, .. } => {
                ExError::new(ExErrorKind::InvalidArgument)
                    .with_op("validate_layout")
                    .with_entity_id(format!("owner:{}", owner_id))
                    .with_message(message)
            }

            SignageError::RegionNotFound { region_id } => ExError::new(ExErrorKind::NotFound)
                .with_op("get_region")
                .with_entity_id(region_id.to_string())
                .with_message(message),

            SignageError::LayoutNotFound { layout_id } => ExError::new(ExErrorKind::NotFound)
                .with_entity_id(layout_id.to_string())
                .with_message(message),

            SignageError::CampaignNotFound { layout_id } => {
                let err = ExError::new(ExErrorKind::NotFound).with_message(message);
                match layout_id {
                    Some(id) => err.with_entity_id(id.to_string()),
                    None => err,
                }
            }

            SignageError::LayoutDeleted { layout_id } => {
                let err = ExError::new(ExErrorKind::Deleted).with_message(message);
                match layout_id {
                    Some(id) => err.with_entity_id(id.to_string()),
                    None => err,
                }
            }

            SignageError::MissingLayoutIdentity => ExError::new(ExErrorKind::Internal)
                .with_op("save_layout")
                .with_message(message),

            SignageError::InvalidApplicationName | SignageError::InvalidRedirectUri { .. } => {
                ExError::new(ExErrorKind::InvalidArgument)
                    .with_op("register_application")
                    .with_message(message)
            }

            SignageError::ApplicationNotFound { client_id } => {
                ExError::new(ExErrorKind::NotFound)
                    .with_entity_id(client_id)
                    .with_message(message)
            }

            SignageError::RedirectUriMismatch { client_id, .. } => {
                ExError::new(ExErrorKind::InvalidArgument)
                    .with_op("authorize")
                    .with_entity_id(client_id)
                    .with_message(message)
            }

            SignageError::Serialization { .. } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }

            SignageError::Internal { .. } => {
                ExError::new(ExErrorKind::Internal).with_message(message)
            }
        }
    }
}

impl From<serde_json::Error> for SignageError {
    fn from(err: serde_json::Error) -> Self {
        SignageError::Serialization {
            message: err.to_string(),
        }
    }
}
