//! Test fixtures: an in-process relay on an ephemeral port plus WebSocket helpers.
#![allow(dead_code)]

use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    time::Duration,
};

use futures_util::{SinkExt, StreamExt};
use hearth_server::{RelayConfig, ServerError, infrastructure::dto::websocket::WireEnvelope};
use tokio::{
    net::{TcpListener, TcpStream},
    sync::oneshot,
    task::JoinHandle,
};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

pub type Client = WebSocketStream<MaybeTlsStream<TcpStream>>;

pub const TIMEOUT: Duration = Duration::from_secs(5);

pub struct TestServer {
    addr: SocketAddr,
    shutdown: oneshot::Sender<()>,
    handle: JoinHandle<Result<(), ServerError>>,
}

impl TestServer {
    pub async fn start() -> Self {
        Self::start_with_payload_limit(RelayConfig::default().max_message_size).await
    }

    /// Start a relay that accepts media payloads of at most `max_message_size` bytes.
    pub async fn start_with_payload_limit(max_message_size: usize) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local addr");
        let config = RelayConfig {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: addr.port(),
            max_message_size,
        };
        let (shutdown, shutdown_rx) = oneshot::channel();
        let handle = tokio::spawn(hearth_server::serve(listener, config, async move {
            let _ = shutdown_rx.await;
        }));

        Self {
            addr,
            shutdown,
            handle,
        }
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn chat_url(&self) -> String {
        format!("ws://{}/chat", self.addr)
    }

    pub async fn connect(&self) -> Client {
        let (ws, _response) = connect_async(self.chat_url())
            .await
            .expect("Failed to connect to relay");
        ws
    }

    pub async fn session_count(&self) -> usize {
        let body: serde_json::Value = reqwest::get(format!("{}/api/sessions", self.base_url()))
            .await
            .expect("Failed to query sessions")
            .json()
            .await
            .expect("Failed to parse JSON");
        body["count"].as_u64().expect("count is a number") as usize
    }

    /// Poll the registry until it holds exactly `expected` sessions.
    pub async fn wait_for_sessions(&self, expected: usize) {
        tokio::time::timeout(TIMEOUT, async {
            while self.session_count().await != expected {
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .unwrap_or_else(|_| panic!("registry never reached {expected} sessions"));
    }

    /// Signal shutdown and wait for the server to stop.
    pub async fn stop(self) -> Result<(), ServerError> {
        let _ = self.shutdown.send(());
        tokio::time::timeout(TIMEOUT, self.handle)
            .await
            .expect("server did not stop in time")
            .expect("server task panicked")
    }
}

pub async fn send_envelope(client: &mut Client, envelope: &WireEnvelope) {
    let json = serde_json::to_string(envelope).expect("Failed to serialize envelope");
    client
        .send(Message::text(json))
        .await
        .expect("Failed to send frame");
}

pub fn text_envelope(username: &str, message: &str) -> WireEnvelope {
    WireEnvelope {
        username: username.to_string(),
        message: Some(message.to_string()),
        ..WireEnvelope::default()
    }
}

/// Next envelope from the relay, skipping control frames.
pub async fn recv_envelope(client: &mut Client) -> WireEnvelope {
    tokio::time::timeout(TIMEOUT, async {
        loop {
            match client.next().await {
                Some(Ok(Message::Text(text))) => {
                    return serde_json::from_str::<WireEnvelope>(text.as_str())
                        .expect("relay sent an invalid envelope");
                }
                Some(Ok(_)) => continue,
                Some(Err(e)) => panic!("stream failed: {e}"),
                None => panic!("stream ended"),
            }
        }
    })
    .await
    .expect("timed out waiting for an envelope")
}

/// Assert nothing arrives within a short window.
pub async fn assert_silent(client: &mut Client) {
    let result = tokio::time::timeout(Duration::from_millis(200), client.next()).await;
    assert!(result.is_err(), "unexpected frame: {result:?}");
}

/// Wait until the relay closes the stream.
pub async fn expect_closed(client: &mut Client) {
    tokio::time::timeout(TIMEOUT, async {
        loop {
            match client.next().await {
                None | Some(Err(_)) | Some(Ok(Message::Close(_))) => return,
                Some(Ok(_)) => continue,
            }
        }
    })
    .await
    .expect("relay did not close the stream");
}
