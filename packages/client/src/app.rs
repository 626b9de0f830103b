//! Client session loop: connect, send typed input, print inbound envelopes.

use clap::Parser;
use futures_util::{
    SinkExt, StreamExt,
    stream::{SplitSink, SplitStream},
};
use hearth_server::{
    config::DEFAULT_MAX_MESSAGE_SIZE,
    domain::{Envelope, PayloadKind},
    infrastructure::dto::websocket as codec,
};
use hearth_shared::time::local_clock;
use rustyline::{DefaultEditor, error::ReadlineError};
use tokio::{net::TcpStream, sync::mpsc};
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async_with_config,
    tungstenite::{Message, protocol::WebSocketConfig},
};

use crate::{
    command::Command,
    error::ClientError,
    inbound::{render, should_display},
    media,
};

/// Announcement sent right after connecting.
pub const JOIN_ANNOUNCEMENT: &str = "has joined the chat";

/// Command-line arguments of the terminal client.
#[derive(Debug, Clone, Parser)]
#[command(version, about = "Terminal client for the Hearth chat relay")]
pub struct ClientArgs {
    /// Name shown to other participants
    #[arg(short, long)]
    pub username: String,

    /// Relay chat endpoint
    #[arg(short, long, default_value = "ws://127.0.0.1:50051/chat")]
    pub server: String,

    /// Largest media payload to send or accept, in bytes (should match the relay)
    #[arg(long, default_value_t = DEFAULT_MAX_MESSAGE_SIZE)]
    pub max_message_size: usize,
}

impl ClientArgs {
    /// WebSocket limits large enough for a base64 encoded payload of
    /// `max_message_size` bytes.
    pub fn websocket_config(&self) -> WebSocketConfig {
        let limit = codec::frame_limit(self.max_message_size);
        WebSocketConfig::default()
            .max_message_size(Some(limit))
            .max_frame_size(Some(limit))
    }
}

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Connect and run until the user quits or the relay goes away.
pub async fn run_client(args: ClientArgs) -> Result<(), ClientError> {
    let (socket, _response) =
        connect_async_with_config(args.server.as_str(), Some(args.websocket_config()), false)
            .await?;
    tracing::info!("Connected to {}", args.server);
    println!("Connected as {}. Type /file <path>, /avatar <path> or /quit.", args.username);

    let (mut sink, stream) = socket.split();
    send(&mut sink, &Envelope::text(args.username.clone(), JOIN_ANNOUNCEMENT)).await?;

    let max_file_size = args.max_message_size as u64;
    let mut printer = tokio::spawn(print_inbound(stream, args.username.clone()));
    let (line_tx, mut line_rx) = mpsc::channel::<String>(32);
    // Not spawn_blocking: the runtime waits for blocking tasks on shutdown.
    std::thread::spawn(move || {
        if let Err(e) = read_lines(line_tx) {
            tracing::warn!("Input closed: {}", e);
        }
    });

    loop {
        let line = tokio::select! {
            line = line_rx.recv() => line,
            _ = &mut printer => {
                println!("Disconnected from server.");
                break;
            }
        };

        // Input closed (Ctrl+D / Ctrl+C)
        let Some(line) = line else { break };

        let envelope = match Command::parse(&line) {
            Command::Ignore => continue,
            Command::Quit => break,
            Command::Say(text) => Envelope::text(args.username.clone(), text),
            Command::File(path) => match media::load(&path, max_file_size).await {
                Ok(file) => Envelope::new(
                    args.username.clone(),
                    Some(file.file_name),
                    Some(file.data),
                    PayloadKind::new(file.media_type).ok(),
                ),
                Err(e) => {
                    eprintln!("{e}");
                    continue;
                }
            },
            Command::Avatar(path) => match media::load(&path, max_file_size).await {
                Ok(file) => Envelope::new(
                    args.username.clone(),
                    None,
                    Some(file.data),
                    PayloadKind::new(PayloadKind::PROFILE_PICTURE.to_string()).ok(),
                ),
                Err(e) => {
                    eprintln!("{e}");
                    continue;
                }
            },
        };

        send(&mut sink, &envelope).await?;
    }

    printer.abort();
    let _ = sink.close().await;
    Ok(())
}

async fn send(
    sink: &mut SplitSink<Socket, Message>,
    envelope: &Envelope,
) -> Result<(), ClientError> {
    let frame = codec::encode(envelope)?;
    sink.send(Message::text(frame)).await?;
    Ok(())
}

async fn print_inbound(mut stream: SplitStream<Socket>, username: String) {
    while let Some(msg) = stream.next().await {
        let text = match msg {
            Ok(Message::Text(text)) => text,
            Ok(Message::Close(_)) => break,
            Ok(_) => continue,
            Err(e) => {
                tracing::warn!("Lost connection to server: {}", e);
                break;
            }
        };

        match codec::decode_text(text.as_str()) {
            Ok(envelope) if should_display(&envelope, &username) => {
                println!("{}", render(&envelope, &local_clock()));
            }
            Ok(_) => {}
            Err(e) => tracing::warn!("Ignoring undecodable frame: {}", e),
        }
    }
}

fn read_lines(line_tx: mpsc::Sender<String>) -> Result<(), ClientError> {
    let mut editor = DefaultEditor::new()?;
    loop {
        match editor.readline("> ") {
            Ok(line) => {
                let _ = editor.add_history_entry(line.as_str());
                if line_tx.blocking_send(line).is_err() {
                    return Ok(());
                }
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => return Ok(()),
            Err(e) => return Err(e.into()),
        }
    }
}
