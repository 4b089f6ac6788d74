//! Client for the chat-completion endpoint.
//!
//! The same wire format is spoken to the service directly or to the
//! hammock proxy, which fills in the model and the credential.

use async_trait::async_trait;
use reqwest::Client;
use std::time::{Duration, Instant};
use tokio::time::timeout;

use crate::config::{build_auth_header, AuthHeader, Config, Endpoint, ServiceConfig};

use super::error::TransformError;
use super::wire::{ChatRequest, ChatResponse, COMPLETIONS_PATH};

/// Something that turns (instruction, text) into a completion.
///
/// The panel controller only talks to this trait, so the transport can be
/// swapped for a fake in tests.
#[async_trait]
pub trait TransformService: Send + Sync {
    /// Send the instruction as the system message and `text` as the user
    /// message, returning the first completion.
    async fn complete(&self, instruction: &str, text: &str) -> Result<String, TransformError>;
}

/// HTTP client for `POST {base}/v1/chat/completions`.
pub struct ChatCompletionClient {
    client: Client,
    url: String,
    model: String,
    auth: Option<AuthHeader>,
    timeout: Duration,
}

impl ChatCompletionClient {
    /// Talk to the service directly with the configured credential.
    pub fn direct(service: &ServiceConfig) -> Result<Self, TransformError> {
        if !service.is_configured() {
            return Err(TransformError::NotConfigured(
                "no API key for direct mode".to_string(),
            ));
        }

        Self::build(
            &service.base_url,
            service.model.clone(),
            build_auth_header(service),
            service,
        )
    }

    /// Talk to a hammock proxy. The proxy chooses the model and adds the
    /// service credential; `access_token` authenticates us to the proxy.
    pub fn via_proxy(
        proxy_url: &str,
        access_token: Option<&str>,
        service: &ServiceConfig,
    ) -> Result<Self, TransformError> {
        let auth = access_token
            .filter(|token| !token.is_empty())
            .map(|token| ("Authorization".to_string(), format!("Bearer {}", token)));

        Self::build(proxy_url, String::new(), auth, service)
    }

    /// Pick direct or proxy mode from `panel.endpoint`.
    pub fn from_config(config: &Config) -> Result<Self, TransformError> {
        match config.panel.endpoint {
            Endpoint::Direct => Self::direct(&config.service),
            Endpoint::Proxy => Self::via_proxy(
                &config.panel.proxy_url,
                config.proxy.access_token.as_deref(),
                &config.service,
            ),
        }
    }

    fn build(
        base_url: &str,
        model: String,
        auth: Option<AuthHeader>,
        service: &ServiceConfig,
    ) -> Result<Self, TransformError> {
        if base_url.trim().is_empty() {
            return Err(TransformError::NotConfigured("empty base URL".to_string()));
        }

        let client = Client::builder()
            .connect_timeout(Duration::from_secs(service.connect_timeout_seconds as u64))
            .build()?;

        Ok(Self {
            client,
            url: format!("{}{}", base_url.trim_end_matches('/'), COMPLETIONS_PATH),
            model,
            auth,
            timeout: Duration::from_secs(service.timeout_seconds as u64),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Model sent with requests; empty in proxy mode.
    pub fn model(&self) -> &str {
        &self.model
    }

    async fn send(&self, request: &ChatRequest) -> Result<String, TransformError> {
        let mut builder = self.client.post(&self.url).json(request);
        if let Some((name, value)) = &self.auth {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let start = Instant::now();
        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;
        let latency_ms = start.elapsed().as_millis() as u64;

        if !status.is_success() {
            tracing::warn!(
                status = %status,
                latency_ms,
                "Text-generation service returned an error"
            );
            return Err(TransformError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        tracing::debug!(status = %status, latency_ms, "Completion received");
        ChatResponse::parse_completion(&body)
    }
}

#[async_trait]
impl TransformService for ChatCompletionClient {
    async fn complete(&self, instruction: &str, text: &str) -> Result<String, TransformError> {
        let request = ChatRequest::for_selection(&self.model, instruction, text);

        tracing::debug!(
            url = %self.url,
            model = %self.model,
            selection_len = text.len(),
            "Sending completion request"
        );

        match timeout(self.timeout, self.send(&request)).await {
            Ok(result) => result,
            Err(_) => Err(TransformError::Timeout {
                seconds: self.timeout.as_secs(),
            }),
        }
    }
}
