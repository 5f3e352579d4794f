//! 服务状态码：Clarifai API 返回的状态码闭集及其分类/重试语义。
//!
//! Service status codes.
//!
//! The remote service reports the outcome of every call as a numeric status code
//! inside the reply envelope (`status.code`). This module mirrors the subset of the
//! service's enumeration the client reasons about. Codes are defined by the
//! service contract; unknown numbers are not mapped to a variant and are kept as
//! raw values by [`crate::Status`].
//!
//! ## Code Ranges
//!
//! | Range  | Category    | Description                              |
//! |--------|-------------|------------------------------------------|
//! | 100xx  | general     | Overall request outcome                  |
//! | 110xx  | connection  | Credentials, quota and throttling        |
//! | 111xx  | request     | Malformed or unroutable requests         |
//! | 211xx  | model       | Model training lifecycle                 |
//! | 300xx  | input       | Input download/processing lifecycle      |
//! | 98xxx  | internal    | Service-side faults                      |
//!
//! ## Example
//!
//! ```rust
//! use clarifai_rust::status_code::StatusCode;
//!
//! let code = StatusCode::from_code(10030).unwrap();
//! assert_eq!(code.name(), "TRY_AGAIN");
//! assert!(code.retryable());
//! assert_eq!(code.category(), "general");
//! ```

use std::fmt;

/// Service status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusCode {
    /// 10000: Request fully succeeded
    Success,
    /// 10010: Some items of a batch failed
    MixedStatus,
    /// 10020: Request failed
    Failure,
    /// 10030: Transient failure, the same request may succeed later
    TryAgain,
    /// 10040: Operation is not implemented by the service
    NotImplemented,
    /// 11000: Account has an issue preventing the call
    ConnAccountIssues,
    /// 11001: Session token is invalid
    ConnTokenInvalid,
    /// 11002: Credentials are invalid
    ConnCredentialsInvalid,
    /// 11003: Hourly usage limit exceeded
    ConnExceedHourlyLimit,
    /// 11004: Monthly usage limit exceeded
    ConnExceedMonthlyLimit,
    /// 11005: Request was throttled
    ConnThrottled,
    /// 11006: Request exceeds account limits
    ConnExceedsLimits,
    /// 11007: API key lacks the scopes required for this call
    ConnInsufficientScopes,
    /// 11008: API key is invalid
    ConnKeyInvalid,
    /// 11009: API key was not found
    ConnKeyNotFound,
    /// 11100: Request body could not be parsed
    ConnBadRequestFormat,
    /// 11101: Requested resource does not exist
    ConnDoesNotExist,
    /// 11102: Request is invalid
    ConnInvalidRequest,
    /// 11103: Method is not allowed on this resource
    ConnMethodNotAllowed,
    /// 21100: Model is trained
    ModelTrained,
    /// 21101: Model is training
    ModelTraining,
    /// 21102: Model has never been trained
    ModelUntrained,
    /// 21103: Model is queued for training
    ModelQueuedForTraining,
    /// 30000: Input downloaded successfully
    InputDownloadSuccess,
    /// 30001: Input download is pending
    InputDownloadPending,
    /// 30002: Input download failed
    InputDownloadFailed,
    /// 30003: Input download is in progress
    InputDownloadInProgress,
    /// 98004: Internal service issue
    InternalServerIssue,
    /// 98009: Service timed out internally
    InternalUnexpectedTimeout,
}

impl StatusCode {
    pub const ALL: [StatusCode; 29] = [
        Self::Success,
        Self::MixedStatus,
        Self::Failure,
        Self::TryAgain,
        Self::NotImplemented,
        Self::ConnAccountIssues,
        Self::ConnTokenInvalid,
        Self::ConnCredentialsInvalid,
        Self::ConnExceedHourlyLimit,
        Self::ConnExceedMonthlyLimit,
        Self::ConnThrottled,
        Self::ConnExceedsLimits,
        Self::ConnInsufficientScopes,
        Self::ConnKeyInvalid,
        Self::ConnKeyNotFound,
        Self::ConnBadRequestFormat,
        Self::ConnDoesNotExist,
        Self::ConnInvalidRequest,
        Self::ConnMethodNotAllowed,
        Self::ModelTrained,
        Self::ModelTraining,
        Self::ModelUntrained,
        Self::ModelQueuedForTraining,
        Self::InputDownloadSuccess,
        Self::InputDownloadPending,
        Self::InputDownloadFailed,
        Self::InputDownloadInProgress,
        Self::InternalServerIssue,
        Self::InternalUnexpectedTimeout,
    ];

    /// Returns the numeric code as sent on the wire.
    #[inline]
    pub fn code(&self) -> u32 {
        match self {
            Self::Success => 10000,
            Self::MixedStatus => 10010,
            Self::Failure => 10020,
            Self::TryAgain => 10030,
            Self::NotImplemented => 10040,
            Self::ConnAccountIssues => 11000,
            Self::ConnTokenInvalid => 11001,
            Self::ConnCredentialsInvalid => 11002,
            Self::ConnExceedHourlyLimit => 11003,
            Self::ConnExceedMonthlyLimit => 11004,
            Self::ConnThrottled => 11005,
            Self::ConnExceedsLimits => 11006,
            Self::ConnInsufficientScopes => 11007,
            Self::ConnKeyInvalid => 11008,
            Self::ConnKeyNotFound => 11009,
            Self::ConnBadRequestFormat => 11100,
            Self::ConnDoesNotExist => 11101,
            Self::ConnInvalidRequest => 11102,
            Self::ConnMethodNotAllowed => 11103,
            Self::ModelTrained => 21100,
            Self::ModelTraining => 21101,
            Self::ModelUntrained => 21102,
            Self::ModelQueuedForTraining => 21103,
            Self::InputDownloadSuccess => 30000,
            Self::InputDownloadPending => 30001,
            Self::InputDownloadFailed => 30002,
            Self::InputDownloadInProgress => 30003,
            Self::InternalServerIssue => 98004,
            Self::InternalUnexpectedTimeout => 98009,
        }
    }

    /// Returns the service's symbolic name (e.g., `"CONN_KEY_INVALID"`).
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Success => "SUCCESS",
            Self::MixedStatus => "MIXED_STATUS",
            Self::Failure => "FAILURE",
            Self::TryAgain => "TRY_AGAIN",
            Self::NotImplemented => "NOT_IMPLEMENTED",
            Self::ConnAccountIssues => "CONN_ACCOUNT_ISSUES",
            Self::ConnTokenInvalid => "CONN_TOKEN_INVALID",
            Self::ConnCredentialsInvalid => "CONN_CREDENTIALS_INVALID",
            Self::ConnExceedHourlyLimit => "CONN_EXCEED_HOURLY_LIMIT",
            Self::ConnExceedMonthlyLimit => "CONN_EXCEED_MONTHLY_LIMIT",
            Self::ConnThrottled => "CONN_THROTTLED",
            Self::ConnExceedsLimits => "CONN_EXCEEDS_LIMITS",
            Self::ConnInsufficientScopes => "CONN_INSUFFICIENT_SCOPES",
            Self::ConnKeyInvalid => "CONN_KEY_INVALID",
            Self::ConnKeyNotFound => "CONN_KEY_NOT_FOUND",
            Self::ConnBadRequestFormat => "CONN_BAD_REQUEST_FORMAT",
            Self::ConnDoesNotExist => "CONN_DOES_NOT_EXIST",
            Self::ConnInvalidRequest => "CONN_INVALID_REQUEST",
            Self::ConnMethodNotAllowed => "CONN_METHOD_NOT_ALLOWED",
            Self::ModelTrained => "MODEL_TRAINED",
            Self::ModelTraining => "MODEL_TRAINING",
            Self::ModelUntrained => "MODEL_UNTRAINED",
            Self::ModelQueuedForTraining => "MODEL_QUEUED_FOR_TRAINING",
            Self::InputDownloadSuccess => "INPUT_DOWNLOAD_SUCCESS",
            Self::InputDownloadPending => "INPUT_DOWNLOAD_PENDING",
            Self::InputDownloadFailed => "INPUT_DOWNLOAD_FAILED",
            Self::InputDownloadInProgress => "INPUT_DOWNLOAD_IN_PROGRESS",
            Self::InternalServerIssue => "INTERNAL_SERVER_ISSUE",
            Self::InternalUnexpectedTimeout => "INTERNAL_UNEXPECTED_TIMEOUT",
        }
    }

    /// Returns whether the same request may succeed if issued again later.
    #[inline]
    pub fn retryable(&self) -> bool {
        matches!(
            self,
            Self::TryAgain
                | Self::ConnThrottled
                | Self::InternalServerIssue
                | Self::InternalUnexpectedTimeout
        )
    }

    /// Returns the category: `"general"`, `"connection"`, `"request"`, `"model"`,
    /// `"input"` or `"internal"`.
    #[inline]
    pub fn category(&self) -> &'static str {
        match self.code() / 100 {
            100 => "general",
            110 => "connection",
            111 => "request",
            211 => "model",
            300 => "input",
            _ => "internal",
        }
    }

    /// Maps a raw numeric code to its variant. Returns `None` for codes outside
    /// the known set.
    pub fn from_code(code: u32) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.code() == code)
    }

    /// Best-effort mapping of an HTTP status with no service status in its body.
    pub fn from_http_status(status: u16) -> Self {
        match status {
            200..=299 => Self::Success,
            400 => Self::ConnBadRequestFormat,
            401 => Self::ConnKeyInvalid,
            403 => Self::ConnInsufficientScopes,
            404 => Self::ConnDoesNotExist,
            405 => Self::ConnMethodNotAllowed,
            429 => Self::ConnThrottled,
            501 => Self::NotImplemented,
            503 => Self::TryAgain,
            504 => Self::InternalUnexpectedTimeout,
            500..=599 => Self::InternalServerIssue,
            _ => Self::Failure,
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.code())
    }
}
