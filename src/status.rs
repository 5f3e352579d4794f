//! Outcome classification of a remote call.

use crate::proto;
use crate::status_code::StatusCode;
use crate::transport::RpcCode;
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// Closed set of outcome categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusKind {
    Successful,
    /// Batch call where some items failed; the payload is still decodable.
    MixedSuccess,
    Failure,
}

/// Classified outcome of one remote call. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Status {
    kind: StatusKind,
    code: u32,
    description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl Status {
    /// Classify a normalized `(code, description)` pair.
    ///
    /// Total over `u32`: unknown codes classify as [`StatusKind::Failure`] and keep
    /// the original code and message.
    pub fn classify(code: u32, description: impl Into<String>) -> Self {
        let kind = match StatusCode::from_code(code) {
            Some(StatusCode::Success) => StatusKind::Successful,
            Some(StatusCode::MixedStatus) => StatusKind::MixedSuccess,
            _ => StatusKind::Failure,
        };
        Self {
            kind,
            code,
            description: description.into(),
            details: None,
        }
    }

    pub fn success() -> Self {
        Self::classify(StatusCode::Success.code(), "Ok")
    }

    /// Failure raised by the transport itself (network error, timeout, refused call).
    pub fn transport_error(detail: impl Into<String>) -> Self {
        Self::classify(StatusCode::Failure.code(), "Transport error").with_details(detail)
    }

    /// Failure for a non-2xx HTTP reply. A service status found in the body keeps
    /// its code and description, but the outcome is always a failure.
    pub fn from_http_failure(http_status: u16, body_status: Option<Status>, body: &str) -> Self {
        let base = body_status.unwrap_or_else(|| {
            let code = StatusCode::from_http_status(http_status);
            Self::classify(code.code(), format!("HTTP {}", http_status))
        });
        let details = base.details.clone().or_else(|| {
            let trimmed = body.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        });
        Self {
            kind: StatusKind::Failure,
            code: base.code,
            description: base.description,
            details,
        }
    }

    /// Failure for an RPC reply whose channel code is not OK.
    pub fn from_rpc_failure(code: RpcCode, message: &str, body_status: Option<Status>) -> Self {
        let base = body_status.unwrap_or_else(|| {
            let mapped = StatusCode::from_http_status(code.to_http_status());
            Self::classify(mapped.code(), format!("RPC code {}", code.0))
        });
        Self::from_http_failure(code.to_http_status(), Some(base), message)
    }

    /// Read `status.{code,description,details}` from a JSON reply envelope.
    ///
    /// Returns `None` when the envelope carries no status object. The code may be
    /// sent either as a number or as a numeric string.
    pub fn from_json(envelope: &Value) -> Option<Self> {
        let status = envelope.get("status")?;
        let code = match status.get("code")? {
            Value::Number(n) => n.as_u64()?,
            Value::String(s) => s.parse::<u64>().ok()?,
            _ => return None,
        };
        let code = u32::try_from(code).ok()?;
        let description = status
            .get("description")
            .and_then(|v| v.as_str())
            .unwrap_or_default();
        let mut out = Self::classify(code, description);
        if let Some(details) = status.get("details").and_then(|v| v.as_str()) {
            if !details.is_empty() {
                out.details = Some(details.to_string());
            }
        }
        Some(out)
    }

    /// Read a status message from the binary protocol.
    ///
    /// Code `0` is the protocol's unset value, so it yields `None` rather than
    /// being classified.
    pub fn from_wire(status: &proto::Status) -> Option<Self> {
        if status.code <= 0 {
            return None;
        }
        let mut out = Self::classify(status.code as u32, status.description.clone());
        if !status.details.is_empty() {
            out.details = Some(status.details.clone());
        }
        Some(out)
    }

    pub fn to_wire(&self) -> proto::Status {
        proto::Status {
            code: self.code as i32,
            description: self.description.clone(),
            details: self.details.clone().unwrap_or_default(),
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn kind(&self) -> StatusKind {
        self.kind
    }

    pub fn code(&self) -> u32 {
        self.code
    }

    pub fn known_code(&self) -> Option<StatusCode> {
        StatusCode::from_code(self.code)
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn details(&self) -> Option<&str> {
        self.details.as_deref()
    }

    pub fn is_successful(&self) -> bool {
        self.kind == StatusKind::Successful
    }

    pub fn is_mixed_success(&self) -> bool {
        self.kind == StatusKind::MixedSuccess
    }

    pub fn is_failure(&self) -> bool {
        self.kind == StatusKind::Failure
    }

    /// Whether a payload is expected alongside this status.
    pub fn has_payload(&self) -> bool {
        matches!(self.kind, StatusKind::Successful | StatusKind::MixedSuccess)
    }

    pub fn retryable(&self) -> bool {
        self.known_code().map(|c| c.retryable()).unwrap_or(false)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} {}: {}", self.kind, self.code, self.description)?;
        if let Some(details) = &self.details {
            write!(f, " ({})", details)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rpc_failure_maps_channel_code() {
        let status = Status::from_rpc_failure(RpcCode::RESOURCE_EXHAUSTED, "slow down", None);
        assert!(status.is_failure());
        assert_eq!(status.known_code(), Some(StatusCode::ConnThrottled));
        assert_eq!(status.details(), Some("slow down"));
        assert!(status.retryable());
    }

    #[test]
    fn test_serializes_for_logs() {
        let status = Status::classify(10010, "Mixed Success");
        assert_eq!(
            serde_json::to_value(&status).unwrap(),
            json!({"kind": "mixed_success", "code": 10010, "description": "Mixed Success"})
        );
    }

    #[test]
    fn test_classify_known_codes() {
        assert_eq!(Status::classify(10000, "Ok").kind(), StatusKind::Successful);
        assert_eq!(
            Status::classify(10010, "Mixed Success").kind(),
            StatusKind::MixedSuccess
        );
        assert_eq!(Status::classify(10020, "Failure").kind(), StatusKind::Failure);
        assert_eq!(
            Status::classify(30002, "Download failed").kind(),
            StatusKind::Failure
        );
    }

    #[test]
    fn test_classify_unknown_code_is_failure_and_keeps_message() {
        let status = Status::classify(424242, "something new");
        assert!(status.is_failure());
        assert_eq!(status.code(), 424242);
        assert_eq!(status.description(), "something new");
        assert!(status.known_code().is_none());
        assert!(!status.retryable());
    }

    #[test]
    fn test_classify_is_deterministic() {
        for code in [0u32, 1, 10000, 10010, 10020, 11005, 99999, u32::MAX] {
            assert_eq!(Status::classify(code, "x"), Status::classify(code, "x"));
        }
    }

    #[test]
    fn test_from_json_envelope() {
        let body = json!({"status": {"code": 10010, "description": "Mixed Success", "details": "1 of 3 failed"}});
        let status = Status::from_json(&body).unwrap();
        assert!(status.is_mixed_success());
        assert_eq!(status.details(), Some("1 of 3 failed"));

        let body = json!({"status": {"code": "10000", "description": "Ok"}});
        assert!(Status::from_json(&body).unwrap().is_successful());

        assert!(Status::from_json(&json!({"hits": []})).is_none());
        assert!(Status::from_json(&Value::Null).is_none());
    }

    #[test]
    fn test_from_wire_treats_zero_as_unset() {
        let unset = proto::Status::default();
        assert!(Status::from_wire(&unset).is_none());

        let ok = proto::Status {
            code: 10000,
            description: "Ok".into(),
            details: String::new(),
        };
        let status = Status::from_wire(&ok).unwrap();
        assert!(status.is_successful());
        assert_eq!(status.details(), None);
    }

    #[test]
    fn test_http_failure_keeps_body_status_but_is_failure() {
        let body_status = Status::classify(11008, "API key not found");
        let status = Status::from_http_failure(401, Some(body_status), "{}");
        assert!(status.is_failure());
        assert_eq!(status.code(), 11008);
        assert_eq!(status.description(), "API key not found");

        let status = Status::from_http_failure(503, None, "upstream unavailable");
        assert_eq!(status.known_code(), Some(StatusCode::TryAgain));
        assert_eq!(status.details(), Some("upstream unavailable"));
        assert!(status.retryable());
    }

    #[test]
    fn test_transport_error_status() {
        let status = Status::transport_error("connection refused");
        assert!(status.is_failure());
        assert!(!status.has_payload());
        assert_eq!(status.details(), Some("connection refused"));
    }
}
