use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, Response};
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;

use crate::config::ConfigStore;
use crate::proxy::error::{ErrorResponse, ProxyError};
use crate::proxy::health::health_handler;
use crate::proxy::upstream::UpstreamClient;
use crate::transform::{ChatRequest, COMPLETIONS_PATH};

#[derive(Clone)]
pub struct RouterEngine {
    config: ConfigStore,
    upstream: Arc<UpstreamClient>,
}

impl RouterEngine {
    pub fn new(config: ConfigStore) -> Result<Self, ProxyError> {
        let upstream = UpstreamClient::new(&config.get().service)?;
        Ok(Self {
            config,
            upstream: Arc::new(upstream),
        })
    }

    /// Authenticate the caller, fill in the model and forward upstream.
    pub async fn handle_completion(
        &self,
        headers: &HeaderMap,
        body: &[u8],
    ) -> Result<Response<Body>, ProxyError> {
        let config = self.config.get();

        if let Some(token) = config.proxy.access_token.as_deref().filter(|t| !t.is_empty()) {
            let presented = headers
                .get(AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.strip_prefix("Bearer "));
            if !presented.is_some_and(|p| tokens_match(p, token)) {
                return Err(ProxyError::Unauthorized);
            }
        }

        let mut request: ChatRequest = serde_json::from_slice(body)
            .map_err(|e| ProxyError::InvalidRequest(format!("Invalid request body: {}", e)))?;

        if request.messages.is_empty() {
            return Err(ProxyError::InvalidRequest(
                "messages must not be empty".to_string(),
            ));
        }
        if request.model.trim().is_empty() {
            request.model = config.service.model.clone();
        }

        self.upstream.forward(&config.service, &request).await
    }
}

/// Compare without short-circuiting on the first differing byte.
fn tokens_match(presented: &str, expected: &str) -> bool {
    let (a, b) = (presented.as_bytes(), expected.as_bytes());
    let diff = a
        .iter()
        .zip(b)
        .fold(a.len() ^ b.len(), |acc, (x, y)| acc | usize::from(x ^ y));
    diff == 0
}

pub fn build_router(engine: RouterEngine) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route(COMPLETIONS_PATH, post(completions_handler))
        .with_state(engine)
}

async fn completions_handler(
    State(engine): State<RouterEngine>,
    headers: HeaderMap,
    body: Bytes,
) -> Response<Body> {
    let request_id = uuid::Uuid::new_v4().to_string();

    match engine.handle_completion(&headers, &body).await {
        Ok(response) => response,
        Err(err) => {
            tracing::warn!(
                request_id = %request_id,
                error_type = err.error_type(),
                error = %err,
                "Completion request failed"
            );
            ErrorResponse::from_error(&err, &request_id)
        }
    }
}
