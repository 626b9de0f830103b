//! WebSocket stream handler.
//!
//! Each `/chat` connection moves through `Connecting → Active → Closing →
//! Closed`. While active, a reader task decodes inbound frames and hands them
//! to the broadcast use case, and a writer task drains the session's queue
//! onto the socket. Whichever ends first (or server shutdown) closes the
//! connection and cancels the other task.

use std::{fmt, future::Future, sync::Arc};

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, SplitStream, StreamExt},
};
use tracing::Instrument;

use crate::{
    domain::{SessionId, SessionInbox},
    infrastructure::dto::websocket::{self as codec, CodecError},
    ui::state::AppState,
    usecase::{BroadcastEnvelopeUseCase, JoinRelayUseCase, LeaveRelayUseCase},
};

/// Lifecycle phase of one connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamPhase {
    Connecting,
    Active,
    Closing,
    Closed,
}

impl fmt::Display for StreamPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StreamPhase::Connecting => "connecting",
            StreamPhase::Active => "active",
            StreamPhase::Closing => "closing",
            StreamPhase::Closed => "closed",
        };
        f.write_str(name)
    }
}

/// Why a connection left the `Active` phase.
#[derive(Debug)]
pub enum CloseReason {
    /// The client sent a Close frame or the stream ended.
    ClientClosed,
    /// Receiving from the socket failed.
    ReceiveFailed(axum::Error),
    /// An inbound frame could not be decoded.
    MalformedFrame(CodecError),
    /// Sending to the socket failed.
    SendFailed(axum::Error),
    /// The session's queue was closed underneath the writer.
    QueueClosed,
    /// The server is shutting down.
    Shutdown,
    /// A duty task ended without reporting (panicked or was aborted).
    TaskEnded,
}

impl fmt::Display for CloseReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CloseReason::ClientClosed => f.write_str("client closed the stream"),
            CloseReason::ReceiveFailed(e) => write!(f, "receive failed: {e}"),
            CloseReason::MalformedFrame(e) => write!(f, "malformed frame: {e}"),
            CloseReason::SendFailed(e) => write!(f, "send failed: {e}"),
            CloseReason::QueueClosed => f.write_str("outbound queue closed"),
            CloseReason::Shutdown => f.write_str("server shutting down"),
            CloseReason::TaskEnded => f.write_str("duty task ended unexpectedly"),
        }
    }
}

fn enter(phase: StreamPhase) {
    tracing::debug!(phase = %phase, "Stream phase change");
}

/// `GET /chat`: upgrade to a WebSocket and run the stream handler.
pub async fn chat_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.max_message_size(state.max_frame_size)
        .max_frame_size(state.max_frame_size)
        .on_upgrade(move |socket| {
            let span = tracing::info_span!("stream", session_id = tracing::field::Empty);
            handle_socket(socket, state).instrument(span)
        })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    // Connecting: register before any frame is read
    enter(StreamPhase::Connecting);
    let join_usecase = JoinRelayUseCase::new(state.registry.clone());
    let inbox = match join_usecase.execute().await {
        Ok(inbox) => inbox,
        Err(e) => {
            tracing::warn!("Failed to register session: {}", e);
            return;
        }
    };
    let session_id = inbox.session_id();
    tracing::Span::current().record("session_id", tracing::field::display(session_id));
    tracing::info!("Client connected");

    let (sender, receiver) = socket.split();
    let hub = BroadcastEnvelopeUseCase::new(state.registry.clone());

    // Active: reader and writer duties run concurrently
    enter(StreamPhase::Active);
    let reason = run_duties(
        read_frames(receiver, hub, session_id),
        write_envelopes(sender, inbox),
        state.stopping(),
    )
    .await;

    // Closing: no broadcast targets this session from here on
    enter(StreamPhase::Closing);
    match &reason {
        CloseReason::ClientClosed | CloseReason::Shutdown => {
            tracing::info!("Closing stream: {}", reason)
        }
        _ => tracing::warn!("Closing stream: {}", reason),
    }

    let leave_usecase = LeaveRelayUseCase::new(state.registry.clone());
    let removed = leave_usecase.execute(&session_id).await;
    let remaining = leave_usecase.count_remaining_sessions().await;

    enter(StreamPhase::Closed);
    tracing::info!(
        removed,
        remaining,
        "Client disconnected and removed from registry"
    );
}

/// Run the reader and writer duties until one of them ends or `stopping`
/// resolves.
///
/// The duty still running is aborted and awaited, so its future and
/// everything it owns (the session inbox for the writer) is dropped before
/// this returns.
async fn run_duties<R, W, S>(reader: R, writer: W, stopping: S) -> CloseReason
where
    R: Future<Output = CloseReason> + Send + 'static,
    W: Future<Output = CloseReason> + Send + 'static,
    S: Future<Output = ()>,
{
    let mut recv_task = tokio::spawn(reader.in_current_span());
    let mut send_task = tokio::spawn(writer.in_current_span());

    // If any one of the tasks completes, abort the other
    tokio::select! {
        res = &mut recv_task => {
            send_task.abort();
            let _ = send_task.await;
            res.unwrap_or(CloseReason::TaskEnded)
        }
        res = &mut send_task => {
            recv_task.abort();
            let _ = recv_task.await;
            res.unwrap_or(CloseReason::TaskEnded)
        }
        _ = stopping => {
            recv_task.abort();
            send_task.abort();
            let _ = tokio::join!(recv_task, send_task);
            CloseReason::Shutdown
        }
    }
}

/// Reader duty: decode each inbound frame and broadcast it.
async fn read_frames(
    mut receiver: SplitStream<WebSocket>,
    hub: BroadcastEnvelopeUseCase,
    session_id: SessionId,
) -> CloseReason {
    while let Some(msg) = receiver.next().await {
        let msg = match msg {
            Ok(msg) => msg,
            Err(e) => return CloseReason::ReceiveFailed(e),
        };

        let decoded = match msg {
            Message::Text(text) => codec::decode_text(text.as_str()),
            Message::Binary(bytes) => codec::decode_binary(&bytes),
            Message::Ping(_) | Message::Pong(_) => {
                // Ping/pong is handled automatically by the WebSocket protocol
                continue;
            }
            Message::Close(_) => return CloseReason::ClientClosed,
        };

        match decoded {
            Ok(envelope) => {
                tracing::debug!(
                    session_id = %session_id,
                    sender = envelope.sender(),
                    "Received envelope"
                );
                hub.execute(envelope).await;
            }
            Err(e) => return CloseReason::MalformedFrame(e),
        }
    }

    CloseReason::ClientClosed
}

/// Writer duty: drain the session's queue onto the socket.
async fn write_envelopes(
    mut sender: SplitSink<WebSocket, Message>,
    mut inbox: SessionInbox,
) -> CloseReason {
    while let Some(envelope) = inbox.dequeue().await {
        let frame = match codec::encode(&envelope) {
            Ok(frame) => frame,
            Err(e) => {
                tracing::warn!(
                    session_id = %inbox.session_id(),
                    "Dropping envelope that failed to encode: {}",
                    e
                );
                continue;
            }
        };

        if let Err(e) = sender.send(Message::Text(frame.into())).await {
            return CloseReason::SendFailed(e);
        }
    }

    CloseReason::QueueClosed
}
