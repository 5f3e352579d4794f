use super::{HttpReply, Protocol, Transport, TransportError};
use crate::config::ClientConfig;
use crate::Result;
use async_trait::async_trait;
use reqwest::{Proxy, RequestBuilder};
use serde_json::Value;
use tracing::debug;

/// JSON-over-HTTP transport backed by `reqwest`.
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let base_url = config.validate()?;
        let api_key = config.api_key.clone().unwrap_or_default();

        let mut builder = reqwest::Client::builder().timeout(config.timeout);

        if let Some(proxy_url) = &config.proxy_url {
            let proxy = Proxy::all(proxy_url)
                .map_err(|e| crate::Error::configuration(format!("invalid proxy URL: {}", e)))?;
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| crate::Error::Transport(TransportError::Other(e.to_string())))?;

        Ok(Self {
            client,
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
            api_key,
        })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(&ClientConfig::from_env())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, request: RequestBuilder) -> std::result::Result<HttpReply, TransportError> {
        let response = request
            .header("Authorization", format!("Key {}", self.api_key))
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(map_reqwest_error)?;
        debug!(status, bytes = body.len(), "http reply received");
        Ok(HttpReply { status, body })
    }
}

fn map_reqwest_error(e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout
    } else {
        TransportError::Http(e)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    fn supports(&self, protocol: Protocol) -> bool {
        protocol == Protocol::Http
    }

    async fn get(&self, path: &str) -> std::result::Result<HttpReply, TransportError> {
        self.send(self.client.get(self.url(path))).await
    }

    async fn post(&self, path: &str, body: &Value) -> std::result::Result<HttpReply, TransportError> {
        self.send(self.client.post(self.url(path)).json(body)).await
    }

    async fn patch(&self, path: &str, body: &Value) -> std::result::Result<HttpReply, TransportError> {
        self.send(self.client.patch(self.url(path)).json(body)).await
    }

    async fn delete(
        &self,
        path: &str,
        body: Option<&Value>,
    ) -> std::result::Result<HttpReply, TransportError> {
        let mut request = self.client.delete(self.url(path));
        if let Some(body) = body {
            request = request.json(body);
        }
        self.send(request).await
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
