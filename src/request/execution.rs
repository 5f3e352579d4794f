//! 请求执行逻辑：协议选择、单次传输调用与状态归一化。
//!
//! Request execution (single transport call per execute).

use super::{Method, Payload, RawBody, Request, Response};
use crate::proto;
use crate::status::Status;
use crate::transport::{Protocol, RpcReply, Transport, TransportError};
use crate::{Error, Result};
use bytes::Bytes;
use prost::Message;
use serde_json::{json, Value};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

impl<T> Request<T> {
    /// Execute over `transport` with exactly one call.
    pub async fn execute(&self, transport: &dyn Transport) -> Result<Response<T>> {
        let protocol = self.select_protocol(transport)?;
        debug!(
            operation = self.operation,
            transport = transport.name(),
            protocol = %protocol,
            method = %self.method,
            path = self.path.as_str(),
            page = ?self.pagination.map(|p| p.page()),
            "executing request"
        );
        match protocol {
            Protocol::Rpc => self.execute_rpc(transport).await,
            Protocol::Http => self.execute_http(transport).await,
        }
    }

    /// Like [`Request::execute`], but gives up with [`Error::Cancelled`] once `token` fires.
    pub async fn execute_with_cancel(
        &self,
        transport: &dyn Transport,
        token: &CancellationToken,
    ) -> Result<Response<T>> {
        if token.is_cancelled() {
            return Err(Error::Cancelled);
        }
        tokio::select! {
            biased;
            _ = token.cancelled() => {
                debug!(operation = self.operation, "request cancelled");
                Err(Error::Cancelled)
            }
            result = self.execute(transport) => result,
        }
    }

    async fn execute_http(&self, transport: &dyn Transport) -> Result<Response<T>> {
        let path = self.http_path();
        let body = self.http_body()?;
        let reply = match self.method {
            Method::Get => transport.get(&path).await,
            Method::Post => transport.post(&path, &body.unwrap_or_else(|| json!({}))).await,
            Method::Patch => transport.patch(&path, &body.unwrap_or_else(|| json!({}))).await,
            Method::Delete => transport.delete(&path, body.as_ref()).await,
        };
        let reply = match reply {
            Ok(reply) => reply,
            Err(e) => return self.transport_failure(e, RawBody::Json(String::new())),
        };

        if !reply.is_success() {
            let body_status = serde_json::from_str::<Value>(&reply.body)
                .ok()
                .and_then(|v| Status::from_json(&v));
            let status = Status::from_http_failure(reply.status, body_status, &reply.body);
            warn!(
                operation = self.operation,
                http_status = reply.status,
                code = status.code(),
                "http call failed"
            );
            return Ok(Response::new(status, reply.status, RawBody::Json(reply.body), None));
        }

        let parsed = if reply.body.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str::<Value>(&reply.body)?
        };
        // An OK reply without a status object is a success.
        let status = Status::from_json(&parsed).unwrap_or_else(Status::success);
        let value = self.unmarshal_if_payload(&status, Payload::Json(&parsed))?;
        Ok(Response::new(status, reply.status, RawBody::Json(reply.body), value))
    }

    async fn execute_rpc(&self, transport: &dyn Transport) -> Result<Response<T>> {
        let message = self.rpc_body()?.unwrap_or_default();
        let method = self.rpc.as_ref().map(|c| c.method).unwrap_or(self.operation);
        let reply: RpcReply = match transport.call(method, message).await {
            Ok(reply) => reply,
            Err(e) => return self.transport_failure(e, RawBody::Wire(Bytes::new())),
        };
        let http_status = reply.code.to_http_status();

        if !reply.code.is_ok() {
            let body_status = proto::BaseResponse::decode(reply.body.as_ref())
                .ok()
                .and_then(|base| base.status)
                .and_then(|s| Status::from_wire(&s));
            let status = Status::from_rpc_failure(reply.code, &reply.message, body_status);
            warn!(
                operation = self.operation,
                rpc_code = reply.code.0,
                code = status.code(),
                "rpc call failed"
            );
            return Ok(Response::new(status, http_status, RawBody::Wire(reply.body), None));
        }

        let base = proto::BaseResponse::decode(reply.body.as_ref())?;
        // Proto3 leaves an unset code at 0; the channel already said OK.
        let status = base
            .status
            .as_ref()
            .and_then(Status::from_wire)
            .unwrap_or_else(Status::success);
        let value = self.unmarshal_if_payload(&status, Payload::Wire(reply.body.as_ref()))?;
        Ok(Response::new(status, http_status, RawBody::Wire(reply.body), value))
    }

    fn unmarshal_if_payload(&self, status: &Status, payload: Payload<'_>) -> Result<Option<T>> {
        if !status.has_payload() {
            debug!(
                operation = self.operation,
                code = status.code(),
                description = status.description(),
                "service reported failure"
            );
            return Ok(None);
        }
        (self.unmarshal)(payload).map(Some)
    }

    fn transport_failure(&self, error: TransportError, raw_body: RawBody) -> Result<Response<T>> {
        if matches!(error, TransportError::Cancelled) {
            return Err(Error::Cancelled);
        }
        warn!(operation = self.operation, error = %error, "transport call failed");
        Ok(Response::new(Status::transport_error(error.to_string()), 0, raw_body, None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::{HttpReply, RpcCode};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Replies to every HTTP call with one canned reply and records the calls.
    struct CannedHttp {
        reply: std::result::Result<HttpReply, fn() -> TransportError>,
        calls: Mutex<Vec<(String, Option<Value>)>>,
    }

    impl CannedHttp {
        fn new(status: u16, body: &str) -> Self {
            Self {
                reply: Ok(HttpReply::new(status, body)),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn failing(err: fn() -> TransportError) -> Self {
            Self {
                reply: Err(err),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn record(&self, path: &str, body: Option<&Value>) -> std::result::Result<HttpReply, TransportError> {
            self.calls.lock().unwrap().push((path.to_string(), body.cloned()));
            match &self.reply {
                Ok(reply) => Ok(reply.clone()),
                Err(make) => Err(make()),
            }
        }
    }

    #[async_trait]
    impl Transport for CannedHttp {
        fn supports(&self, protocol: Protocol) -> bool {
            protocol == Protocol::Http
        }
        async fn get(&self, path: &str) -> std::result::Result<HttpReply, TransportError> {
            self.record(path, None)
        }
        async fn post(&self, path: &str, body: &Value) -> std::result::Result<HttpReply, TransportError> {
            self.record(path, Some(body))
        }
        async fn delete(&self, path: &str, body: Option<&Value>) -> std::result::Result<HttpReply, TransportError> {
            self.record(path, body)
        }
        fn name(&self) -> &'static str {
            "canned-http"
        }
    }

    struct CannedRpc(RpcReply);

    #[async_trait]
    impl Transport for CannedRpc {
        fn supports(&self, protocol: Protocol) -> bool {
            protocol == Protocol::Rpc
        }
        async fn call(&self, _: &str, _: Bytes) -> std::result::Result<RpcReply, TransportError> {
            Ok(self.0.clone())
        }
        fn name(&self) -> &'static str {
            "canned-rpc"
        }
    }

    fn count_request() -> Request<usize> {
        Request::new("count", Method::Get, "/v2/things", |payload| match payload {
            Payload::Json(v) => Ok(v.get("things").and_then(|t| t.as_array()).map_or(0, |a| a.len())),
            Payload::Wire(bytes) => Ok(proto::MultiInputResponse::decode(bytes)?.inputs.len()),
        })
        .with_empty_body()
        .with_rpc("ListInputs", |_| Ok(proto::ListInputsRequest::default()))
    }

    #[tokio::test]
    async fn test_empty_ok_body_is_success() {
        let transport = CannedHttp::new(200, "");
        let req: Request<()> = Request::new("delete_all", Method::Delete, "/v2/inputs", |_| Ok(()))
            .with_json_body(|_| Ok(json!({"delete_all": true})));
        let resp = req.execute(&transport).await.unwrap();
        assert!(resp.is_successful());
        assert_eq!(resp.value(), Some(&()));
        let calls = transport.calls.lock().unwrap();
        assert_eq!(calls[0].1, Some(json!({"delete_all": true})));
    }

    #[tokio::test]
    async fn test_non_2xx_is_failure_response() {
        let body = r#"{"status": {"code": 11009, "description": "API key not found"}}"#;
        let transport = CannedHttp::new(401, body);
        let resp = count_request().execute(&transport).await.unwrap();
        assert!(resp.status().is_failure());
        assert_eq!(resp.status().code(), 11009);
        assert_eq!(resp.http_status(), 401);
        assert!(resp.value().is_none());
    }

    #[tokio::test]
    async fn test_transport_error_is_failure_response() {
        let transport = CannedHttp::failing(|| TransportError::Timeout);
        let resp = count_request().execute(&transport).await.unwrap();
        assert!(resp.status().is_failure());
        assert_eq!(resp.http_status(), 0);
        assert_eq!(resp.status().details(), Some("Transport timed out"));
    }

    #[tokio::test]
    async fn test_transport_cancellation_is_cancelled_error() {
        let transport = CannedHttp::failing(|| TransportError::Cancelled);
        let err = count_request().execute(&transport).await.unwrap_err();
        assert!(matches!(err, Error::Cancelled));
    }

    #[tokio::test]
    async fn test_rpc_unset_status_code_is_success() {
        let reply = proto::MultiInputResponse {
            status: None,
            inputs: vec![proto::Input::default(), proto::Input::default()],
        };
        let transport = CannedRpc(RpcReply::ok(reply.encode_to_vec()));
        let resp = count_request().execute(&transport).await.unwrap();
        assert!(resp.is_successful());
        assert_eq!(resp.value(), Some(&2));
        assert_eq!(resp.http_status(), 200);
    }

    #[tokio::test]
    async fn test_rpc_channel_error_is_failure_response() {
        let transport = CannedRpc(RpcReply::error(RpcCode::UNAVAILABLE, "upstream down"));
        let resp = count_request().execute(&transport).await.unwrap();
        assert!(resp.status().is_failure());
        assert_eq!(resp.http_status(), 503);
        assert!(resp.status().retryable());
    }

    #[tokio::test]
    async fn test_failed_service_status_skips_unmarshaller() {
        let body = r#"{"status": {"code": 10020, "description": "Failure"}}"#;
        let transport = CannedHttp::new(200, body);
        let req: Request<usize> = Request::new("strict", Method::Get, "/v2/things", |_| {
            Err(Error::decode("unmarshaller must not run"))
        })
        .with_empty_body();
        let resp = req.execute(&transport).await.unwrap();
        assert!(resp.status().is_failure());
        assert!(resp.value().is_none());
    }

    #[tokio::test]
    async fn test_unsupported_protocol_before_any_call() {
        let transport = CannedRpc(RpcReply::ok(Vec::new()));
        let req: Request<()> = Request::new("http_only", Method::Get, "/v2/x", |_| Ok(())).with_empty_body();
        let err = req.execute(&transport).await.unwrap_err();
        assert!(matches!(err, Error::UnsupportedProtocol { ref operation } if operation == "http_only"));
    }

    #[tokio::test]
    async fn test_pre_cancelled_token() {
        let transport = CannedHttp::new(200, "{}");
        let token = CancellationToken::new();
        token.cancel();
        let err = count_request()
            .execute_with_cancel(&transport, &token)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Cancelled));
        assert!(transport.calls.lock().unwrap().is_empty());
    }
}
