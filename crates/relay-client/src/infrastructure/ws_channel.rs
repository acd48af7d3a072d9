//! WebSocket implementation of the session channel.
//!
//! One relay run owns exactly one WebSocket connection for its whole
//! lifetime.  Each event frame goes out as its own binary WebSocket message
//! and each comment as its own text message, so message boundaries on the
//! wire match frame boundaries — no length-prefix reassembly is needed on
//! the receiving side beyond the frame's own length byte.

use anyhow::Context;
use async_trait::async_trait;
use futures_util::SinkExt;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::{debug, warn};

use crate::application::{ChannelError, SessionChannel};

/// A connected WebSocket session channel.
pub struct WsChannel {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl WsChannel {
    /// Dials the relay server at `url` (`ws://` or `wss://`).
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the WebSocket handshake
    /// fails (server not running, wrong address, firewall).
    pub async fn connect(url: &str) -> anyhow::Result<Self> {
        let (stream, response) = connect_async(url)
            .await
            .with_context(|| format!("failed to connect to relay server at {url}"))?;
        debug!(status = %response.status(), "websocket handshake complete");
        Ok(Self { stream })
    }

    /// Closes the connection gracefully.
    ///
    /// A close failure is logged but not fatal: the session is over either
    /// way and the process is about to exit.
    pub async fn close(mut self) {
        if let Err(e) = self.stream.close(None).await {
            warn!("websocket close failed: {e}");
        }
    }
}

#[async_trait]
impl SessionChannel for WsChannel {
    async fn send_binary(&mut self, bytes: Vec<u8>) -> Result<(), ChannelError> {
        self.stream
            .send(Message::Binary(bytes))
            .await
            .map_err(|e| ChannelError::Transport(e.to_string()))
    }

    async fn send_text(&mut self, text: String) -> Result<(), ChannelError> {
        self.stream
            .send(Message::Text(text))
            .await
            .map_err(|e| ChannelError::Transport(e.to_string()))
    }
}
