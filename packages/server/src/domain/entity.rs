//! Core domain models for the chat relay.

use std::sync::Arc;

use tokio::sync::mpsc;

use super::value_object::{PayloadKind, SessionId, Timestamp};

/// One chat message in transit.
///
/// Fields are private so an envelope cannot change after construction; the
/// relay shares a single `Arc<Envelope>` across every recipient queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    sender: String,
    text: Option<String>,
    payload: Option<Vec<u8>>,
    payload_kind: Option<PayloadKind>,
}

impl Envelope {
    /// Create an envelope carrying only text.
    pub fn text(sender: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            text: Some(text.into()),
            payload: None,
            payload_kind: None,
        }
    }

    /// Create an envelope from all of its parts.
    pub fn new(
        sender: String,
        text: Option<String>,
        payload: Option<Vec<u8>>,
        payload_kind: Option<PayloadKind>,
    ) -> Self {
        Self {
            sender,
            text,
            payload,
            payload_kind,
        }
    }

    /// Sender identity (may be empty for system-origin envelopes).
    pub fn sender(&self) -> &str {
        &self.sender
    }

    pub fn text_body(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn payload(&self) -> Option<&[u8]> {
        self.payload.as_deref()
    }

    pub fn payload_kind(&self) -> Option<&PayloadKind> {
        self.payload_kind.as_ref()
    }
}

/// Server-side state of one live connection, as seen by the registry.
///
/// Holds the producing end of the session's outbound queue. The consuming
/// end is the [`SessionInbox`] owned by the connection's stream handler.
#[derive(Debug, Clone)]
pub struct ClientSession {
    /// Session identifier
    pub id: SessionId,
    /// Timestamp when the connection was established
    pub connected_at: Timestamp,
    outbox: mpsc::UnboundedSender<Arc<Envelope>>,
}

impl ClientSession {
    /// Open a new session and its outbound queue.
    pub fn open(id: SessionId, connected_at: Timestamp) -> (Self, SessionInbox) {
        let (outbox, receiver) = mpsc::unbounded_channel();
        let session = Self {
            id,
            connected_at,
            outbox,
        };
        (session, SessionInbox { id, receiver })
    }

    /// Append an envelope to the tail of the queue and wake the writer.
    ///
    /// Never blocks. Returns `false` when the session's writer is already
    /// gone, in which case the envelope is dropped.
    pub fn enqueue(&self, envelope: Arc<Envelope>) -> bool {
        self.outbox.send(envelope).is_ok()
    }

    /// Whether the consuming end of the queue has been dropped.
    pub fn is_closed(&self) -> bool {
        self.outbox.is_closed()
    }
}

/// Consuming end of a session's outbound queue.
///
/// The queue is unbounded: a stalled consumer accumulates backlog.
#[derive(Debug)]
pub struct SessionInbox {
    id: SessionId,
    receiver: mpsc::UnboundedReceiver<Arc<Envelope>>,
}

impl SessionInbox {
    pub fn session_id(&self) -> SessionId {
        self.id
    }

    /// Remove and return the head of the queue, waiting until one is available.
    ///
    /// Returns `None` once every producing handle is dropped and the queue is
    /// drained, i.e. after the session left the registry.
    pub async fn dequeue(&mut self) -> Option<Arc<Envelope>> {
        self.receiver.recv().await
    }

    /// Non-blocking variant of [`dequeue`](Self::dequeue).
    pub fn try_dequeue(&mut self) -> Option<Arc<Envelope>> {
        self.receiver.try_recv().ok()
    }

    /// Number of envelopes waiting in the queue.
    pub fn pending(&self) -> usize {
        self.receiver.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SessionIdFactory;

    #[test]
    fn test_envelope_text_constructor() {
        // テスト項目: テキストのみのエンベロープを作成できる
        // when (操作):
        let envelope = Envelope::text("A", "hello");

        // then (期待する結果):
        assert_eq!(envelope.sender(), "A");
        assert_eq!(envelope.text_body(), Some("hello"));
        assert!(envelope.payload().is_none());
        assert!(envelope.payload_kind().is_none());
    }

    #[test]
    fn test_envelope_allows_empty_sender() {
        // テスト項目: システム発信用に空の送信者を許容する
        let envelope = Envelope::new(String::new(), Some("notice".to_string()), None, None);

        assert_eq!(envelope.sender(), "");
    }

    #[tokio::test]
    async fn test_enqueue_then_dequeue_fifo() {
        // テスト項目: キューは FIFO で取り出される
        // given (前提条件):
        let (session, mut inbox) = ClientSession::open(SessionIdFactory::generate(), Timestamp::new(0));

        // when (操作):
        assert!(session.enqueue(Arc::new(Envelope::text("A", "first"))));
        assert!(session.enqueue(Arc::new(Envelope::text("A", "second"))));

        // then (期待する結果):
        assert_eq!(inbox.pending(), 2);
        assert_eq!(inbox.dequeue().await.unwrap().text_body(), Some("first"));
        assert_eq!(inbox.dequeue().await.unwrap().text_body(), Some("second"));
        assert!(inbox.try_dequeue().is_none());
    }

    #[tokio::test]
    async fn test_dequeue_wakes_on_enqueue() {
        // テスト項目: 空のキューで待機中の writer が enqueue で起床する
        // given (前提条件):
        let (session, mut inbox) = ClientSession::open(SessionIdFactory::generate(), Timestamp::new(0));
        let waiter = tokio::spawn(async move { inbox.dequeue().await });
        tokio::task::yield_now().await;

        // when (操作):
        session.enqueue(Arc::new(Envelope::text("B", "wake")));

        // then (期待する結果):
        let received = waiter.await.unwrap().unwrap();
        assert_eq!(received.text_body(), Some("wake"));
    }

    #[tokio::test]
    async fn test_dequeue_returns_none_after_session_dropped() {
        // テスト項目: 生産側がすべて破棄されると dequeue は None を返す
        let (session, mut inbox) = ClientSession::open(SessionIdFactory::generate(), Timestamp::new(0));
        drop(session);

        assert!(inbox.dequeue().await.is_none());
    }

    #[test]
    fn test_enqueue_after_inbox_dropped_is_skipped() {
        // テスト項目: writer 側が破棄済みのセッションへの enqueue は false を返す
        let (session, inbox) = ClientSession::open(SessionIdFactory::generate(), Timestamp::new(0));
        drop(inbox);

        assert!(session.is_closed());
        assert!(!session.enqueue(Arc::new(Envelope::text("C", "lost"))));
    }
}
