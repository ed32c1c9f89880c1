use std::future::Future;
use std::time::Duration;

use futures_util::StreamExt;
use jobscout_core::{display_body, ConnectionId, ErrorEnvelope, Msg};
use reqwest::header::{ACCEPT, CACHE_CONTROL};
use scout_logging::{scout_debug, scout_info, scout_trace, scout_warn};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::sse::SseDecoder;

/// Where connection tasks deliver their messages.
pub type Inbox = mpsc::UnboundedSender<Msg>;

#[derive(Debug, Clone)]
pub struct StreamSettings {
    pub connect_timeout: Duration,
}

impl Default for StreamSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StreamError {
    #[error("could not connect to the job stream: {0}")]
    Connect(String),
    #[error("job stream answered {0}")]
    Status(String),
    /// Non-success answer whose body said why.
    #[error("job stream answered {status}: {detail}")]
    Rejected { status: String, detail: String },
    #[error("job stream read failed: {0}")]
    Read(String),
    #[error("job stream ended before the completion marker")]
    UnexpectedEnd,
}

/// A live stream connection: one reader task plus the token that stops it.
///
/// Closing (or dropping) cancels the token and aborts the task before
/// returning, so the task cannot deliver anything afterwards.
#[derive(Debug)]
pub struct Connection {
    id: ConnectionId,
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl Connection {
    /// Spawns the reader produced by `body` on the current tokio runtime.
    pub fn spawn<F, Fut>(id: ConnectionId, body: F) -> Self
    where
        F: FnOnce(CancellationToken) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let reader = body(cancel.clone());
        let task = tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = reader => {}
            }
        });
        Self {
            id,
            cancel,
            task: Some(task),
        }
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    pub fn close(self) {
        scout_info!("Closing connection {}", self.id);
        drop(self);
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

pub trait StreamConnector: Send + Sync {
    /// Opens connection `connection` to `url`; events go to `inbox` tagged with that id.
    fn open(&self, connection: ConnectionId, url: &str, inbox: Inbox) -> Connection;
}

#[derive(Debug, Clone)]
pub struct ReqwestConnector {
    client: reqwest::Client,
}

impl ReqwestConnector {
    pub fn new(settings: StreamSettings) -> Result<Self, StreamError> {
        // No overall timeout: the stream may stay silent for as long as the scrape runs.
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .build()
            .map_err(|err| StreamError::Connect(err.to_string()))?;
        Ok(Self { client })
    }
}

impl StreamConnector for ReqwestConnector {
    fn open(&self, connection: ConnectionId, url: &str, inbox: Inbox) -> Connection {
        let client = self.client.clone();
        let url = url.to_string();
        Connection::spawn(connection, move |token| async move {
            let outcome = pump_events(&client, &url, connection, &inbox, &token).await;
            if let Err(err) = outcome {
                if token.is_cancelled() {
                    return;
                }
                scout_warn!("Connection {} to {} failed: {}", connection, url, err);
                let _ = inbox.send(Msg::StreamFailed {
                    connection,
                    url,
                    reason: err.to_string(),
                });
            }
        })
    }
}

async fn pump_events(
    client: &reqwest::Client,
    url: &str,
    connection: ConnectionId,
    inbox: &Inbox,
    token: &CancellationToken,
) -> Result<(), StreamError> {
    let response = client
        .get(url)
        .header(ACCEPT, "text/event-stream")
        .header(CACHE_CONTROL, "no-cache")
        .send()
        .await
        .map_err(|err| StreamError::Connect(err.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        let raw = response.text().await.unwrap_or_default();
        return Err(rejection(status.to_string(), &raw));
    }
    scout_info!("Connection {} streaming from {}", connection, url);

    let mut decoder = SseDecoder::new();
    let mut body = response.bytes_stream();
    while let Some(chunk) = body.next().await {
        let chunk = chunk.map_err(|err| StreamError::Read(err.to_string()))?;
        scout_trace!("Connection {} received {} bytes", connection, chunk.len());
        for event in decoder.push(&chunk) {
            if !event.is_message() {
                scout_debug!(
                    "Connection {} skipping '{}' event",
                    connection,
                    event.event.as_deref().unwrap_or_default()
                );
                continue;
            }
            if token.is_cancelled() {
                return Ok(());
            }
            let msg = Msg::StreamEvent {
                connection,
                data: event.data,
            };
            if inbox.send(msg).is_err() {
                scout_debug!("Controller gone; connection {} stops reading", connection);
                return Ok(());
            }
        }
    }

    if decoder.finish() {
        scout_debug!("Connection {} discarded an unterminated event", connection);
    }
    Err(StreamError::UnexpectedEnd)
}

/// Uses the `{body, url}` envelope when the backend sent one, the raw text otherwise.
fn rejection(status: String, raw: &str) -> StreamError {
    let detail = match serde_json::from_str::<ErrorEnvelope>(raw) {
        Ok(envelope) => display_body(&envelope.body),
        Err(_) => raw.trim().to_string(),
    };
    if detail.is_empty() {
        StreamError::Status(status)
    } else {
        StreamError::Rejected { status, detail }
    }
}
