//! 客户端入口：持有传输层并执行请求。
//!
//! # Client
//!
//! [`ClarifaiClient`] is a thin handle around a shared [`Transport`]. It holds no
//! per-request state, so one client can run any number of requests at once;
//! cloning it shares the underlying transport.

use crate::config::ClientConfig;
use crate::request::{Request, Response};
use crate::transport::{HttpTransport, Transport};
use crate::Result;
use std::fmt;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

#[derive(Clone)]
pub struct ClarifaiClient {
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for ClarifaiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClarifaiClient")
            .field("transport", &self.transport.name())
            .finish()
    }
}

impl ClarifaiClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// HTTP client configured from `CLARIFAI_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_config(&ClientConfig::from_env())
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let transport = HttpTransport::new(config)?;
        info!(base_url = transport.base_url(), "clarifai client ready");
        Ok(Self::new(Arc::new(transport)))
    }

    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    pub async fn execute<T>(&self, request: &Request<T>) -> Result<Response<T>> {
        request.execute(self.transport.as_ref()).await
    }

    pub async fn execute_with_cancel<T>(
        &self,
        request: &Request<T>,
        token: &CancellationToken,
    ) -> Result<Response<T>> {
        request.execute_with_cancel(self.transport.as_ref(), token).await
    }
}
