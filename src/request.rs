//! 请求封装：与协议无关的请求描述与类型化响应。
//!
//! # Request Envelope
//!
//! A [`Request<T>`] describes one remote operation independently of the
//! protocol that will carry it: the HTTP method and path, an optional JSON body
//! builder, an optional binary RPC builder, and the unmarshaller producing `T`.
//! Which builders are present decides which protocols the operation supports.
//!
//! Requests are immutable and reusable. [`Request::paginated`] returns a new
//! request, and every [`Request::execute`] issues exactly one transport call.
//!
//! Ordinary remote failures (network errors, non-2xx replies, failed service
//! statuses) come back as `Ok(Response)` with a failure [`crate::Status`]. Only
//! construction mistakes, decode contract violations and cancellation are `Err`.

mod execution;
pub mod pagination;
mod response;

pub use pagination::Pagination;
pub use response::{RawBody, Response};

use crate::transport::{Protocol, Transport};
use crate::Result;
use bytes::Bytes;
use prost::Message;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }

    /// Methods whose pagination travels in the body rather than the query string.
    fn paginates_in_body(&self) -> bool {
        matches!(self, Method::Post | Method::Patch)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw reply payload handed to an unmarshaller.
#[derive(Debug, Clone, Copy)]
pub enum Payload<'a> {
    /// Parsed JSON reply; `Null` for an empty body.
    Json(&'a Value),
    /// Encoded RPC response message.
    Wire(&'a [u8]),
}

impl<'a> Payload<'a> {
    /// Decode the wire payload as `M`. Calling this on a JSON payload is a decode error.
    pub fn decode_wire<M: Message + Default>(&self) -> Result<M> {
        match *self {
            Payload::Wire(bytes) => Ok(M::decode(bytes)?),
            Payload::Json(_) => Err(crate::Error::decode("expected a wire payload, got JSON")),
        }
    }

    pub fn json(&self) -> Result<&'a Value> {
        match *self {
            Payload::Json(value) => Ok(value),
            Payload::Wire(_) => Err(crate::Error::decode("expected a JSON payload, got wire bytes")),
        }
    }
}

pub(crate) type JsonBuilder = Arc<dyn Fn(Option<&Pagination>) -> Result<Value> + Send + Sync>;
pub(crate) type WireBuilder = Arc<dyn Fn(Option<&Pagination>) -> Result<Bytes> + Send + Sync>;
pub(crate) type Unmarshaller<T> = Arc<dyn Fn(Payload<'_>) -> Result<T> + Send + Sync>;

/// HTTP side of a request.
#[derive(Clone)]
pub enum HttpBody {
    /// No body; the path alone describes the call.
    Empty,
    /// JSON body built at execution time.
    Json(JsonBuilder),
}

impl fmt::Debug for HttpBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpBody::Empty => f.write_str("Empty"),
            HttpBody::Json(_) => f.write_str("Json(<builder>)"),
        }
    }
}

/// RPC side of a request: the service method and its message builder.
#[derive(Clone)]
pub struct RpcCall {
    method: &'static str,
    builder: WireBuilder,
}

impl RpcCall {
    pub fn method(&self) -> &'static str {
        self.method
    }
}

impl fmt::Debug for RpcCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RpcCall").field("method", &self.method).finish()
    }
}

pub struct Request<T> {
    operation: &'static str,
    method: Method,
    path: String,
    http: Option<HttpBody>,
    rpc: Option<RpcCall>,
    pagination: Option<Pagination>,
    unmarshal: Unmarshaller<T>,
}

impl<T> Clone for Request<T> {
    fn clone(&self) -> Self {
        Self {
            operation: self.operation,
            method: self.method,
            path: self.path.clone(),
            http: self.http.clone(),
            rpc: self.rpc.clone(),
            pagination: self.pagination,
            unmarshal: Arc::clone(&self.unmarshal),
        }
    }
}

impl<T> fmt::Debug for Request<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Request")
            .field("operation", &self.operation)
            .field("method", &self.method)
            .field("path", &self.path)
            .field("http", &self.http)
            .field("rpc", &self.rpc)
            .field("pagination", &self.pagination)
            .finish()
    }
}

impl<T> Request<T> {
    /// A request supporting no protocol yet; add one with [`Request::with_empty_body`],
    /// [`Request::with_json_body`] or [`Request::with_rpc`].
    pub fn new(
        operation: &'static str,
        method: Method,
        path: impl Into<String>,
        unmarshal: impl Fn(Payload<'_>) -> Result<T> + Send + Sync + 'static,
    ) -> Self {
        Self {
            operation,
            method,
            path: path.into(),
            http: None,
            rpc: None,
            pagination: None,
            unmarshal: Arc::new(unmarshal),
        }
    }

    /// Support HTTP with no request body.
    pub fn with_empty_body(mut self) -> Self {
        self.http = Some(HttpBody::Empty);
        self
    }

    /// Support HTTP with a JSON body.
    pub fn with_json_body(
        mut self,
        builder: impl Fn(Option<&Pagination>) -> Result<Value> + Send + Sync + 'static,
    ) -> Self {
        self.http = Some(HttpBody::Json(Arc::new(builder)));
        self
    }

    /// Support RPC through `method`; the builder receives the pagination, if any,
    /// and is responsible for setting it on the message.
    pub fn with_rpc<M>(
        mut self,
        method: &'static str,
        builder: impl Fn(Option<&Pagination>) -> Result<M> + Send + Sync + 'static,
    ) -> Self
    where
        M: Message + 'static,
    {
        let encode = move |page: Option<&Pagination>| {
            builder(page).map(|msg| Bytes::from(msg.encode_to_vec()))
        };
        self.rpc = Some(RpcCall {
            method,
            builder: Arc::new(encode),
        });
        self
    }

    /// A copy of this request fetching the given page. `self` is left unchanged.
    pub fn paginated(&self, pagination: Pagination) -> Self {
        let mut next = self.clone();
        next.pagination = Some(pagination);
        next
    }

    pub fn operation(&self) -> &'static str {
        self.operation
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn pagination(&self) -> Option<&Pagination> {
        self.pagination.as_ref()
    }

    pub fn http(&self) -> Option<&HttpBody> {
        self.http.as_ref()
    }

    pub fn rpc(&self) -> Option<&RpcCall> {
        self.rpc.as_ref()
    }

    /// Run the unmarshaller on a reply payload obtained elsewhere.
    pub fn unmarshal(&self, payload: Payload<'_>) -> Result<T> {
        (self.unmarshal)(payload)
    }

    /// Whether this request can be carried over `protocol`.
    pub fn supports(&self, protocol: Protocol) -> bool {
        match protocol {
            Protocol::Http => self.http.is_some(),
            Protocol::Rpc => self.rpc.is_some(),
        }
    }

    /// Path actually sent over HTTP, with the page cursor when it goes in the query.
    pub fn http_path(&self) -> String {
        match &self.pagination {
            Some(page) if !self.method.paginates_in_body() => page.apply_to_path(&self.path),
            _ => self.path.clone(),
        }
    }

    /// JSON body actually sent over HTTP. `None` for a body-less request.
    pub fn http_body(&self) -> Result<Option<Value>> {
        let body = match &self.http {
            Some(HttpBody::Json(builder)) => Some(builder(self.pagination.as_ref())?),
            Some(HttpBody::Empty) | None => None,
        };
        Ok(match &self.pagination {
            Some(page) if self.method.paginates_in_body() => Some(page.apply_to_body(body)),
            _ => body,
        })
    }

    /// Encoded RPC message. `None` when the request has no RPC side.
    pub fn rpc_body(&self) -> Result<Option<Bytes>> {
        match &self.rpc {
            Some(call) => (call.builder)(self.pagination.as_ref()).map(Some),
            None => Ok(None),
        }
    }

    /// Pick the protocol for `transport`: RPC when both sides have it, else HTTP.
    pub fn select_protocol(&self, transport: &dyn Transport) -> Result<Protocol> {
        [Protocol::Rpc, Protocol::Http]
            .into_iter()
            .find(|p| self.supports(*p) && transport.supports(*p))
            .ok_or_else(|| crate::Error::UnsupportedProtocol {
                operation: self.operation.to_string(),
            })
    }
}

/// Percent-encode one path segment.
pub(crate) fn encode_segment(segment: &str) -> String {
    url::form_urlencoded::byte_serialize(segment.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}
