//! In-memory transport shared by the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use bytes::Bytes;
use clarifai_rust::transport::{HttpReply, Protocol, RpcReply, Transport, TransportError};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

/// One recorded call.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Http {
        method: &'static str,
        path: String,
        body: Option<Value>,
    },
    Rpc {
        method: String,
        message: Bytes,
    },
}

/// Answers from queues of canned replies and records every call.
///
/// An empty queue answers HTTP with `200 {}` and RPC with an empty OK message.
pub struct MockTransport {
    protocols: Vec<Protocol>,
    http_replies: Mutex<VecDeque<Result<HttpReply, TransportError>>>,
    rpc_replies: Mutex<VecDeque<Result<RpcReply, TransportError>>>,
    delay: Option<Duration>,
    calls: Mutex<Vec<Call>>,
}

impl MockTransport {
    pub fn new(protocols: &[Protocol]) -> Self {
        Self {
            protocols: protocols.to_vec(),
            http_replies: Mutex::new(VecDeque::new()),
            rpc_replies: Mutex::new(VecDeque::new()),
            delay: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn http() -> Self {
        Self::new(&[Protocol::Http])
    }

    pub fn rpc() -> Self {
        Self::new(&[Protocol::Rpc])
    }

    pub fn both() -> Self {
        Self::new(&[Protocol::Http, Protocol::Rpc])
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn reply_http(self, status: u16, body: &str) -> Self {
        self.http_replies
            .lock()
            .unwrap()
            .push_back(Ok(HttpReply::new(status, body)));
        self
    }

    pub fn reply_rpc(self, reply: RpcReply) -> Self {
        self.rpc_replies.lock().unwrap().push_back(Ok(reply));
        self
    }

    pub fn fail_http(self, error: TransportError) -> Self {
        self.http_replies.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    async fn http_call(
        &self,
        method: &'static str,
        path: &str,
        body: Option<&Value>,
    ) -> Result<HttpReply, TransportError> {
        self.calls.lock().unwrap().push(Call::Http {
            method,
            path: path.to_string(),
            body: body.cloned(),
        });
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let next = self.http_replies.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Ok(HttpReply::new(200, "{}")))
    }
}

#[async_trait]
impl Transport for MockTransport {
    fn supports(&self, protocol: Protocol) -> bool {
        self.protocols.contains(&protocol)
    }

    async fn get(&self, path: &str) -> Result<HttpReply, TransportError> {
        self.http_call("GET", path, None).await
    }

    async fn post(&self, path: &str, body: &Value) -> Result<HttpReply, TransportError> {
        self.http_call("POST", path, Some(body)).await
    }

    async fn patch(&self, path: &str, body: &Value) -> Result<HttpReply, TransportError> {
        self.http_call("PATCH", path, Some(body)).await
    }

    async fn delete(&self, path: &str, body: Option<&Value>) -> Result<HttpReply, TransportError> {
        self.http_call("DELETE", path, body).await
    }

    async fn call(&self, method: &str, message: Bytes) -> Result<RpcReply, TransportError> {
        self.calls.lock().unwrap().push(Call::Rpc {
            method: method.to_string(),
            message,
        });
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let next = self.rpc_replies.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Ok(RpcReply::ok(Bytes::new())))
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
