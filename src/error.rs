use crate::transport::TransportError;
use thiserror::Error;

/// Structured error context for better error handling and debugging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// Field path that caused the error (e.g., "outputs[0].data.concepts[2].id")
    pub field_path: Option<String>,
    /// Additional context about the error (e.g., expected type, actual value)
    pub details: Option<String>,
    /// Source of the error (e.g., "prediction_dispatch", "search_clause")
    pub source: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self {
            field_path: None,
            details: None,
            source: None,
        }
    }

    pub fn with_field_path(mut self, path: impl Into<String>) -> Self {
        self.field_path = Some(path.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Unified error type for the client.
///
/// Ordinary remote failures (network errors, non-2xx replies, failed service
/// statuses) are NOT represented here: they are reported through
/// [`crate::Status`] on a [`crate::Response`]. What reaches this enum is either a
/// caller mistake caught before any call was issued, or a payload that does not
/// match the declared contract.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {message}{}", format_context(.context))]
    Configuration {
        message: String,
        context: ErrorContext,
    },

    /// Invalid argument or discriminator supplied while building a clause or request.
    #[error("Construction error: {message}{}", format_context(.context))]
    Construction {
        message: String,
        context: ErrorContext,
    },

    /// Payload shape does not match the declared type.
    #[error("Decode error: {message}{}", format_context(.context))]
    Decode {
        message: String,
        context: ErrorContext,
    },

    #[error("Unsupported prediction type: {tag}")]
    UnsupportedPredictionType { tag: String },

    #[error("Unknown model type: {type_ext}")]
    UnknownModelType { type_ext: String },

    #[error("Neither protocol of '{operation}' is supported by the transport")]
    UnsupportedProtocol { operation: String },

    #[error("Request was cancelled")]
    Cancelled,

    #[error("Network transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Wire decode error: {0}")]
    WireDecode(#[from] prost::DecodeError),
}

// Helper function to format error context for display
fn format_context(ctx: &ErrorContext) -> String {
    let mut parts = Vec::new();
    if let Some(ref field) = ctx.field_path {
        parts.push(format!("field: {}", field));
    }
    if let Some(ref details) = ctx.details {
        parts.push(format!("details: {}", details));
    }
    if let Some(ref source) = ctx.source {
        parts.push(format!("source: {}", source));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

impl Error {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Error::Configuration {
            message: msg.into(),
            context: ErrorContext::new(),
        }
    }

    pub fn construction(msg: impl Into<String>) -> Self {
        Error::Construction {
            message: msg.into(),
            context: ErrorContext::new(),
        }
    }

    pub fn construction_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Construction {
            message: msg.into(),
            context,
        }
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Error::Decode {
            message: msg.into(),
            context: ErrorContext::new(),
        }
    }

    /// Create a new decode error with structured context
    pub fn decode_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Decode {
            message: msg.into(),
            context,
        }
    }

    /// Extract error context if available
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Error::Configuration { context, .. }
            | Error::Construction { context, .. }
            | Error::Decode { context, .. } => Some(context),
            _ => None,
        }
    }

    /// True when the payload did not match the declared type: a client/service
    /// version mismatch rather than a business outcome.
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            Error::Decode { .. }
                | Error::UnsupportedPredictionType { .. }
                | Error::UnknownModelType { .. }
                | Error::Serialization(_)
                | Error::WireDecode(_)
        )
    }

    /// True for mistakes caught before any network call was issued.
    pub fn is_construction(&self) -> bool {
        matches!(
            self,
            Error::Construction { .. } | Error::Configuration { .. } | Error::UnsupportedProtocol { .. }
        )
    }
}
