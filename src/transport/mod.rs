//! 传输层协作接口：HTTP 与二进制 RPC 调用的抽象。
//!
//! # Transport Collaborator
//!
//! The client never opens sockets itself. A [`Transport`] performs exactly one
//! HTTP call or one RPC call per request and hands back the raw reply: a status
//! code plus a body. Authentication, TLS, pooling and retries all belong to the
//! transport.
//!
//! A transport advertises which [`Protocol`]s it speaks through
//! [`Transport::supports`]; the request envelope uses that to pick a protocol the
//! operation also implements. Calls for a protocol the transport does not speak
//! return [`TransportError::Unsupported`] by default.

mod http;

pub use http::HttpTransport;

use async_trait::async_trait;
use bytes::Bytes;
use serde_json::Value;
use std::fmt;

/// Wire protocol used to execute a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Protocol {
    /// JSON bodies over HTTP.
    Http,
    /// Binary protobuf messages over the RPC channel.
    Rpc,
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Protocol::Http => f.write_str("http"),
            Protocol::Rpc => f.write_str("rpc"),
        }
    }
}

/// Raw HTTP reply: status code and body text. Non-2xx replies are data, not errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Channel-level status code of an RPC reply (`0` is OK).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RpcCode(pub i32);

impl RpcCode {
    pub const OK: RpcCode = RpcCode(0);
    pub const CANCELLED: RpcCode = RpcCode(1);
    pub const INVALID_ARGUMENT: RpcCode = RpcCode(3);
    pub const DEADLINE_EXCEEDED: RpcCode = RpcCode(4);
    pub const NOT_FOUND: RpcCode = RpcCode(5);
    pub const PERMISSION_DENIED: RpcCode = RpcCode(7);
    pub const RESOURCE_EXHAUSTED: RpcCode = RpcCode(8);
    pub const UNIMPLEMENTED: RpcCode = RpcCode(12);
    pub const UNAVAILABLE: RpcCode = RpcCode(14);
    pub const UNAUTHENTICATED: RpcCode = RpcCode(16);

    pub fn is_ok(&self) -> bool {
        self.0 == 0
    }

    /// Informational HTTP equivalent, reported on [`crate::Response::http_status`].
    pub fn to_http_status(&self) -> u16 {
        match *self {
            Self::OK => 200,
            Self::CANCELLED => 499,
            Self::INVALID_ARGUMENT => 400,
            Self::DEADLINE_EXCEEDED => 504,
            Self::NOT_FOUND => 404,
            Self::PERMISSION_DENIED => 403,
            Self::RESOURCE_EXHAUSTED => 429,
            Self::UNIMPLEMENTED => 501,
            Self::UNAVAILABLE => 503,
            Self::UNAUTHENTICATED => 401,
            _ => 500,
        }
    }
}

/// Raw RPC reply: channel code, channel message and the encoded response message.
#[derive(Debug, Clone, PartialEq)]
pub struct RpcReply {
    pub code: RpcCode,
    pub message: String,
    pub body: Bytes,
}

impl RpcReply {
    pub fn ok(body: impl Into<Bytes>) -> Self {
        Self {
            code: RpcCode::OK,
            message: String::new(),
            body: body.into(),
        }
    }

    pub fn error(code: RpcCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            body: Bytes::new(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Transport timed out")]
    Timeout,

    #[error("Call was cancelled")]
    Cancelled,

    #[error("Transport does not support {0}")]
    Unsupported(Protocol),

    #[error("Transport error: {0}")]
    Other(String),
}

/// Performs one remote call per invocation.
///
/// Implementations must be safe to call concurrently; the client adds no
/// locking of its own.
#[async_trait]
pub trait Transport: Send + Sync {
    fn supports(&self, protocol: Protocol) -> bool;

    async fn get(&self, _path: &str) -> Result<HttpReply, TransportError> {
        Err(TransportError::Unsupported(Protocol::Http))
    }

    async fn post(&self, _path: &str, _body: &Value) -> Result<HttpReply, TransportError> {
        Err(TransportError::Unsupported(Protocol::Http))
    }

    async fn patch(&self, _path: &str, _body: &Value) -> Result<HttpReply, TransportError> {
        Err(TransportError::Unsupported(Protocol::Http))
    }

    async fn delete(&self, _path: &str, _body: Option<&Value>) -> Result<HttpReply, TransportError> {
        Err(TransportError::Unsupported(Protocol::Http))
    }

    /// Invoke `method` (e.g. `"PostSearches"`) with an encoded request message.
    async fn call(&self, _method: &str, _message: Bytes) -> Result<RpcReply, TransportError> {
        Err(TransportError::Unsupported(Protocol::Rpc))
    }

    fn name(&self) -> &'static str;
}
