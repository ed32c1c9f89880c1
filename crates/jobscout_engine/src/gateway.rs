use std::sync::Arc;
use std::time::Duration;

use jobscout_core::ErrorEnvelope;
use reqwest::{Method, Response};
use scout_logging::{scout_debug, scout_warn};
use serde_json::Value;

use crate::AlertSurface;

#[derive(Debug, Clone)]
pub struct GatewaySettings {
    pub connect_timeout: Duration,
    /// `None` waits for the backend indefinitely.
    pub request_timeout: Option<Duration>,
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Some(Duration::from_secs(30)),
        }
    }
}

/// How to perform a request other than a plain GET.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl RequestOptions {
    pub fn post(body: impl Into<String>) -> Self {
        Self {
            method: Method::POST,
            headers: Vec::new(),
            body: Some(body.into()),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// Every variant means the alert panel has already been updated; callers only
/// need to know the operation did not proceed.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("{url} answered {status}")]
    Http {
        url: String,
        status: u16,
        envelope: ErrorEnvelope,
    },
    #[error("{url} answered {status} without a usable error body: {reason}")]
    MalformedEnvelope {
        url: String,
        status: u16,
        reason: String,
    },
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },
    #[error("http client could not be built: {0}")]
    Setup(String),
}

#[async_trait::async_trait]
pub trait RequestGateway: Send + Sync {
    /// Performs the request and hands back the untouched response on success.
    async fn send_request(
        &self,
        url: &str,
        options: Option<RequestOptions>,
    ) -> Result<Response, GatewayError>;
}

pub struct ReqwestGateway {
    client: reqwest::Client,
    alert: Arc<dyn AlertSurface>,
}

impl ReqwestGateway {
    pub fn new(settings: GatewaySettings, alert: Arc<dyn AlertSurface>) -> Result<Self, GatewayError> {
        let mut builder = reqwest::Client::builder().connect_timeout(settings.connect_timeout);
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| GatewayError::Setup(err.to_string()))?;
        Ok(Self { client, alert })
    }

    fn transport_failure(&self, url: &str, err: &reqwest::Error) -> GatewayError {
        let message = if err.is_timeout() {
            format!("request timed out: {err}")
        } else {
            err.to_string()
        };
        scout_warn!("Request to {} failed before a response: {}", url, message);
        self.alert.show(&Value::String(message.clone()), url);
        GatewayError::Transport {
            url: url.to_string(),
            message,
        }
    }

    async fn surface_failure(&self, url: &str, response: Response) -> GatewayError {
        let status = response.status();
        let raw = match response.text().await {
            Ok(text) => text,
            Err(err) => return self.transport_failure(url, &err),
        };

        match serde_json::from_str::<ErrorEnvelope>(&raw) {
            Ok(envelope) => {
                scout_warn!("{} answered {}", url, status);
                self.alert.show(&envelope.body, &envelope.url);
                GatewayError::Http {
                    url: url.to_string(),
                    status: status.as_u16(),
                    envelope,
                }
            }
            Err(err) => {
                scout_warn!("{} answered {} with an unusable error body: {}", url, status, err);
                let shown = if raw.trim().is_empty() {
                    status.to_string()
                } else {
                    raw
                };
                self.alert.show(&Value::String(shown), url);
                GatewayError::MalformedEnvelope {
                    url: url.to_string(),
                    status: status.as_u16(),
                    reason: err.to_string(),
                }
            }
        }
    }
}

#[async_trait::async_trait]
impl RequestGateway for ReqwestGateway {
    async fn send_request(
        &self,
        url: &str,
        options: Option<RequestOptions>,
    ) -> Result<Response, GatewayError> {
        let request = match options {
            None => self.client.get(url),
            Some(options) => {
                let mut builder = self.client.request(options.method, url);
                for (name, value) in options.headers {
                    builder = builder.header(name, value);
                }
                if let Some(body) = options.body {
                    builder = builder.body(body);
                }
                builder
            }
        };

        let response = match request.send().await {
            Ok(response) => response,
            Err(err) => return Err(self.transport_failure(url, &err)),
        };

        if response.status().is_success() {
            scout_debug!("{} answered {}", url, response.status());
            return Ok(response);
        }
        Err(self.surface_failure(url, response).await)
    }
}
