use reqwest::header::{ACCEPT, CONTENT_TYPE};
use tracing::trace;

use crate::error::GatewayError;
use crate::gateway::{HttpRequest, HttpResponse, Method, Transport};

/// Native transport. Uses reqwest's default timeouts; sets none of its own.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, GatewayError> {
        let path = request.url.path().to_string();
        let mut builder = match request.method {
            Method::Get => self.client.get(request.url),
            Method::Post => self.client.post(request.url),
            Method::Put => self.client.put(request.url),
            Method::Delete => self.client.delete(request.url),
        }
        .header(ACCEPT, "application/json");

        if let Some(body) = request.body {
            builder = builder.header(CONTENT_TYPE, "application/json").body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|err| GatewayError::network(&path, err))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|err| GatewayError::network(&path, err))?;
        trace!(path = %path, status, bytes = body.len(), "response received");

        Ok(HttpResponse { status, body })
    }
}
