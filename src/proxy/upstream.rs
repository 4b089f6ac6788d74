use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Response, StatusCode};
use reqwest::Client;
use std::time::{Duration, Instant};
use tokio::time::timeout;

use crate::config::{build_auth_header, ServiceConfig};
use crate::proxy::error::ProxyError;
use crate::transform::{ChatRequest, COMPLETIONS_PATH};

/// Forwards completion requests to the text-generation service with the
/// server-held credential attached.
pub struct UpstreamClient {
    client: Client,
}

impl UpstreamClient {
    pub fn new(service: &ServiceConfig) -> Result<Self, ProxyError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(service.connect_timeout_seconds as u64))
            .build()
            .map_err(|e| ProxyError::Internal(format!("Failed to build upstream client: {}", e)))?;

        Ok(Self { client })
    }

    /// Forward `request` using the service settings current at request time.
    pub async fn forward(
        &self,
        service: &ServiceConfig,
        request: &ChatRequest,
    ) -> Result<Response<Body>, ProxyError> {
        if !service.is_configured() {
            return Err(ProxyError::NotConfigured {
                reason: "api_key is not set (use HAMMOCK_API_KEY or OPENAI_API_KEY)".to_string(),
            });
        }

        let limit = Duration::from_secs(service.timeout_seconds as u64);
        match timeout(limit, self.do_forward(service, request)).await {
            Ok(response) => response,
            Err(_) => Err(ProxyError::RequestTimeout {
                duration: limit.as_secs(),
            }),
        }
    }

    async fn do_forward(
        &self,
        service: &ServiceConfig,
        request: &ChatRequest,
    ) -> Result<Response<Body>, ProxyError> {
        let url = format!("{}{}", service.base_url.trim_end_matches('/'), COMPLETIONS_PATH);
        let mut builder = self.client.post(&url).json(request);

        if let Some((name, value)) = build_auth_header(service) {
            builder = builder.header(name, value);
        }

        let start = Instant::now();
        let connection_error = |source| ProxyError::ConnectionError {
            base_url: service.base_url.clone(),
            source,
        };

        let upstream_resp = builder.send().await.map_err(connection_error)?;
        let status = upstream_resp.status();
        let content_type = upstream_resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("application/json")
            .to_string();
        let body_bytes = upstream_resp.bytes().await.map_err(connection_error)?;

        tracing::info!(
            status = %status,
            model = %request.model,
            latency_ms = start.elapsed().as_millis() as u64,
            response_bytes = body_bytes.len(),
            "Completion forwarded"
        );

        let status = StatusCode::from_u16(status.as_u16()).unwrap_or(StatusCode::BAD_GATEWAY);
        Response::builder()
            .status(status)
            .header(CONTENT_TYPE, content_type)
            .body(Body::from(body_bytes))
            .map_err(|e| ProxyError::Internal(format!("Failed to build response: {}", e)))
    }
}
