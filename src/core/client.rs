//! HTTP client for the gateway relay and the direct journey backend.
//!
//! Every operation builds its own `reqwest::Client` with the timeout tier for
//! that operation, so the connection pool lives exactly as long as the call
//! (including when the calling future is dropped mid-flight). Failures are
//! classified into [`RequestError`] and never retried.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::api::{GatewayMessageRequest, JourneyCreateRequest};
use crate::core::config::ResolvedConfig;
use crate::utils::url::{construct_api_url, normalize_base_url};

pub const HEALTH_PATH: &str = "health";
pub const MESSAGE_PATH: &str = "gateway/message";
pub const JOURNEY_CREATE_PATH: &str = "journey/flowchart/create-v2";

pub const GATEWAY_TARGET: &str = "gateway";
pub const BACKEND_TARGET: &str = "backend";

/// Per-operation deadlines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeoutTiers {
    pub health: Duration,
    /// The relay runs a multi-stage pipeline before it answers.
    pub message: Duration,
    /// Journey construction is a long synchronous computation on the backend.
    pub journey: Duration,
}

impl Default for TimeoutTiers {
    fn default() -> Self {
        Self {
            health: Duration::from_secs(10),
            message: Duration::from_secs(180),
            journey: Duration::from_secs(300),
        }
    }
}

/// Classified outcome of a failed remote call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    /// The host could not be reached.
    Connect(String),
    /// The deadline for the operation's tier elapsed.
    Timeout,
    /// The server answered with a non-2xx status.
    Status(u16),
    /// A 2xx response whose body was not JSON.
    Decode(String),
}

impl RequestError {
    fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RequestError::Timeout
        } else if let Some(status) = err.status() {
            RequestError::Status(status.as_u16())
        } else if err.is_decode() {
            RequestError::Decode(err.to_string())
        } else {
            RequestError::Connect(err.to_string())
        }
    }

    /// The single line shown to the operator for a gateway failure.
    pub fn user_message(&self) -> String {
        self.user_message_for(GATEWAY_TARGET)
    }

    /// The single line shown to the operator, naming the service that failed.
    pub fn user_message_for(&self, target: &str) -> String {
        match self {
            RequestError::Connect(_) => {
                format!("Error: Cannot connect to {target}. Check your connection.")
            }
            RequestError::Timeout => format!("Error: Request timed out. The {target} may be busy."),
            RequestError::Status(code) => format!("Error: {} returned {code}", capitalize(target)),
            RequestError::Decode(_) => {
                format!("Error: {} returned an unreadable response.", capitalize(target))
            }
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::Connect(detail) => write!(f, "connection failed: {detail}"),
            RequestError::Timeout => write!(f, "request timed out"),
            RequestError::Status(code) => write!(f, "server returned HTTP {code}"),
            RequestError::Decode(detail) => write!(f, "invalid response body: {detail}"),
        }
    }
}

impl std::error::Error for RequestError {}

/// The three remote operations the session engine depends on.
#[async_trait]
pub trait Gateway: Send + Sync {
    async fn health_check(&self) -> Result<Value, RequestError>;

    async fn send_message(
        &self,
        session_id: &str,
        message: &str,
        surface: &str,
    ) -> Result<Value, RequestError>;

    async fn create_journey_direct(
        &self,
        request: &JourneyCreateRequest,
    ) -> Result<Value, RequestError>;
}

#[derive(Debug, Clone)]
pub struct GatewayClient {
    gateway_url: String,
    backend_url: String,
    auth_token: Option<String>,
    timeouts: TimeoutTiers,
}

impl GatewayClient {
    pub fn new(gateway_url: &str, backend_url: &str, auth_token: Option<String>) -> Self {
        Self {
            gateway_url: normalize_base_url(gateway_url),
            backend_url: normalize_base_url(backend_url),
            auth_token: auth_token.filter(|token| !token.trim().is_empty()),
            timeouts: TimeoutTiers::default(),
        }
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self::new(
            &config.gateway_url,
            &config.backend_url,
            config.auth_token.clone(),
        )
    }

    pub fn with_timeouts(mut self, timeouts: TimeoutTiers) -> Self {
        self.timeouts = timeouts;
        self
    }

    pub fn gateway_url(&self) -> &str {
        &self.gateway_url
    }

    fn scoped_client(timeout: Duration) -> Result<reqwest::Client, RequestError> {
        reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| RequestError::Connect(err.to_string()))
    }

    fn with_headers(
        &self,
        request: reqwest::RequestBuilder,
        include_auth: bool,
    ) -> reqwest::RequestBuilder {
        let request = request
            .header("Content-Type", "application/json")
            .header("Accept", "application/json");
        match (&self.auth_token, include_auth) {
            (Some(token), true) => request.header("Authorization", format!("Bearer {token}")),
            _ => request,
        }
    }

    async fn execute(request: reqwest::RequestBuilder) -> Result<Value, RequestError> {
        let response = request.send().await.map_err(RequestError::from_reqwest)?;
        let status = response.status();
        if !status.is_success() {
            debug!(status = status.as_u16(), "request rejected");
            return Err(RequestError::Status(status.as_u16()));
        }
        response
            .json::<Value>()
            .await
            .map_err(RequestError::from_reqwest)
    }

    async fn post_json<T: Serialize + Sync>(
        &self,
        url: String,
        body: &T,
        timeout: Duration,
        include_auth: bool,
    ) -> Result<Value, RequestError> {
        let client = Self::scoped_client(timeout)?;
        let request = self.with_headers(client.post(&url), include_auth).json(body);
        debug!(%url, timeout_secs = timeout.as_secs_f64(), "POST");
        let result = Self::execute(request).await;
        if let Err(err) = &result {
            debug!(%url, error = %err, "POST failed");
        }
        result
    }
}

#[async_trait]
impl Gateway for GatewayClient {
    async fn health_check(&self) -> Result<Value, RequestError> {
        let url = construct_api_url(&self.gateway_url, HEALTH_PATH);
        let client = Self::scoped_client(self.timeouts.health)?;
        debug!(%url, "GET");
        Self::execute(self.with_headers(client.get(&url), true)).await
    }

    async fn send_message(
        &self,
        session_id: &str,
        message: &str,
        surface: &str,
    ) -> Result<Value, RequestError> {
        let body = GatewayMessageRequest {
            session_id: session_id.to_string(),
            message: message.to_string(),
            surface: surface.to_string(),
        };
        let url = construct_api_url(&self.gateway_url, MESSAGE_PATH);
        self.post_json(url, &body, self.timeouts.message, true).await
    }

    /// Goes straight to the backend so the relay's own upstream timeout does
    /// not cut the request short. The backend does not take the gateway token.
    async fn create_journey_direct(
        &self,
        request: &JourneyCreateRequest,
    ) -> Result<Value, RequestError> {
        let url = construct_api_url(&self.backend_url, JOURNEY_CREATE_PATH);
        self.post_json(url, request, self.timeouts.journey, false)
            .await
    }
}
