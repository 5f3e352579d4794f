use crate::status::Status;
use bytes::Bytes;

/// Reply body exactly as received, for diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub enum RawBody {
    Json(String),
    Wire(Bytes),
}

impl RawBody {
    pub fn is_empty(&self) -> bool {
        match self {
            RawBody::Json(s) => s.is_empty(),
            RawBody::Wire(b) => b.is_empty(),
        }
    }
}

/// Typed result of executing a [`crate::Request`].
///
/// `value` is present only when the status is successful or a mixed success.
#[derive(Debug, Clone)]
pub struct Response<T> {
    status: Status,
    http_status: u16,
    raw_body: RawBody,
    value: Option<T>,
}

impl<T> Response<T> {
    pub(crate) fn new(status: Status, http_status: u16, raw_body: RawBody, value: Option<T>) -> Self {
        Self {
            status,
            http_status,
            raw_body,
            value,
        }
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    /// HTTP status of the reply; on the RPC path, the HTTP equivalent of the
    /// channel code. `0` when no reply was received.
    pub fn http_status(&self) -> u16 {
        self.http_status
    }

    pub fn raw_body(&self) -> &RawBody {
        &self.raw_body
    }

    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn into_value(self) -> Option<T> {
        self.value
    }

    pub fn is_successful(&self) -> bool {
        self.status.is_successful()
    }
}
