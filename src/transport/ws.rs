//! WebSocket transport over tokio-tungstenite.

use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::HeaderValue;
use tokio_tungstenite::tungstenite::{Error as WsError, Message};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};

use crate::config::{SessionConfig, BETA_HEADER_VALUE};
use crate::error::{PondwireError, Result};
use crate::protocol::{ClientEvent, ServerEvent};

use super::Transport;

/// Production transport: a WebSocket connection to the Responses endpoint.
pub struct WsTransport {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
    closed: bool,
}

impl WsTransport {
    /// Connect to the configured endpoint, attaching the bearer token and
    /// the beta opt-in header when enabled.
    ///
    /// Fails with [`PondwireError::Connect`] if the handshake errors or the
    /// socket closes before reaching the open state.
    pub async fn connect(config: &SessionConfig) -> Result<Self> {
        let mut request = config
            .url
            .as_str()
            .into_client_request()
            .map_err(|e| PondwireError::Connect(e.to_string()))?;

        if let Some(key) = &config.api_key {
            let value = HeaderValue::from_str(&format!("Bearer {key}"))
                .map_err(|e| PondwireError::Configuration(e.to_string()))?;
            request.headers_mut().insert("Authorization", value);
        }
        if config.use_beta_header {
            request
                .headers_mut()
                .insert("OpenAI-Beta", HeaderValue::from_static(BETA_HEADER_VALUE));
        }

        let (stream, response) = tokio_tungstenite::connect_async(request)
            .await
            .map_err(|e| PondwireError::Connect(e.to_string()))?;
        tracing::debug!(status = %response.status(), url = %config.url, "websocket open");

        Ok(Self {
            stream,
            closed: false,
        })
    }
}

#[async_trait]
impl Transport for WsTransport {
    async fn send(&mut self, event: &ClientEvent) -> Result<()> {
        let json = serde_json::to_string(event)?;
        self.stream.send(Message::Text(json)).await?;
        Ok(())
    }

    async fn recv(&mut self) -> Option<Result<ServerEvent>> {
        loop {
            match self.stream.next().await {
                Some(Ok(Message::Text(text))) => {
                    return Some(serde_json::from_str(&text).map_err(PondwireError::from));
                }
                Some(Ok(Message::Ping(payload))) => {
                    if let Err(e) = self.stream.send(Message::Pong(payload)).await {
                        return Some(Err(e.into()));
                    }
                }
                Some(Ok(Message::Close(_))) => {
                    self.closed = true;
                    return None;
                }
                // Pong and binary/raw frames carry nothing for this protocol.
                Some(Ok(other)) => {
                    tracing::trace!(frame = ?other, "ignoring non-text frame");
                }
                Some(Err(e)) => return Some(Err(e.into())),
                None => {
                    self.closed = true;
                    return None;
                }
            }
        }
    }

    async fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        match self.stream.close(None).await {
            Ok(()) | Err(WsError::ConnectionClosed) | Err(WsError::AlreadyClosed) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
