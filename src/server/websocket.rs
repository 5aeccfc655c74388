use crate::models::websocket::{ ClientMessage, ServerMessage };
use crate::session::{ FailureMode, Session };
use crate::AppContext;
use chrono::Utc;
use futures::{ Sink, SinkExt, StreamExt };
use log::{ info, warn, error };
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{ AsyncRead, AsyncWrite };
use tokio_tungstenite::{ tungstenite::protocol::Message, WebSocketStream };
const MAX_MESSAGE_SIZE: usize = 1 * 1024 * 1024;

async fn send<T>(tx: &mut T, msg: &ServerMessage) -> Result<(), String>
    where T: Sink<Message> + Unpin, T::Error: std::fmt::Display
{
    let json = serde_json::to_string(msg).map_err(|e| e.to_string())?;
    tx.send(Message::Text(json)).await.map_err(|e| e.to_string())
}

/// Applies one client request to the connection's session and returns the
/// final reply for it.
pub async fn respond(ctx: &AppContext, session: &mut Session, msg: ClientMessage) -> ServerMessage {
    let outcome = match msg {
        ClientMessage::Chat { content } =>
            session.submit(&ctx.assistant, ctx.data.as_ref(), &content, FailureMode::Surface).await,
        ClientMessage::Quick { index } =>
            session.quick(&ctx.assistant, ctx.data.as_ref(), index).await,
        ClientMessage::Clear => {
            session.clear();
            return ServerMessage::Cleared;
        }
        ClientMessage::History => {
            return ServerMessage::History {
                messages: session.conversation().all().to_vec(),
            };
        }
        ClientMessage::SetLanguage { lang } => {
            session.set_language(lang);
            return ServerMessage::Language { lang };
        }
    };

    match outcome {
        Ok(content) =>
            ServerMessage::Response {
                content,
                timestamp: Utc::now().timestamp(),
            },
        Err(e) =>
            ServerMessage::Error {
                message: format!("AI Error: {}", e),
            },
    }
}

fn needs_model(msg: &ClientMessage) -> bool {
    matches!(msg, ClientMessage::Chat { .. } | ClientMessage::Quick { .. })
}

pub async fn handle_connection<S>(
    peer: SocketAddr,
    websocket: WebSocketStream<S>,
    ctx: Arc<AppContext>
)
    where S: AsyncRead + AsyncWrite + Unpin
{
    info!("New WebSocket connection: {}", peer);

    let (mut tx, mut rx) = websocket.split();
    let mut session = Session::new(ctx.default_lang);
    info!("Assigned conversation ID {} to {}", session.id(), peer);

    while let Some(msg) = rx.next().await {
        match msg {
            Ok(message) => {
                if message.len() > MAX_MESSAGE_SIZE {
                    warn!(
                        "Message from {} exceeds size limit ({} > {})",
                        peer,
                        message.len(),
                        MAX_MESSAGE_SIZE
                    );
                    let error_msg = ServerMessage::Error {
                        message: "Message too large".to_string(),
                    };
                    if send(&mut tx, &error_msg).await.is_err() {
                        error!("Failed to send size limit error to {}", peer);
                    }
                    break;
                }

                match message {
                    Message::Text(text) => {
                        let reply = match serde_json::from_str::<ClientMessage>(&text) {
                            Ok(client_msg) => {
                                if needs_model(&client_msg) {
                                    if let Err(e) = send(&mut tx, &ServerMessage::Processing).await {
                                        error!("Error sending processing status to {}: {}", peer, e);
                                        break;
                                    }
                                }
                                respond(&ctx, &mut session, client_msg).await
                            }
                            Err(e) => {
                                error!("Failed to parse message from {}: {}", peer, e);
                                ServerMessage::Error {
                                    message: format!("Failed to parse message: {}", e),
                                }
                            }
                        };
                        if let Err(e) = send(&mut tx, &reply).await {
                            error!("Error sending message to {}: {}", peer, e);
                            break;
                        }
                    }
                    Message::Close(_) => {
                        info!("Received close frame from {}", peer);
                        break;
                    }
                    Message::Ping(ping_data) => {
                        if tx.send(Message::Pong(ping_data)).await.is_err() {
                            error!("Failed to send pong to {}", peer);
                            break;
                        }
                    }
                    Message::Pong(_) => {}
                    Message::Binary(_) => {
                        warn!("Ignoring binary message from {}", peer);
                    }
                    Message::Frame(_) => {}
                }
            }
            Err(e) => {
                match e {
                    | tokio_tungstenite::tungstenite::Error::ConnectionClosed
                    | tokio_tungstenite::tungstenite::Error::Protocol(_)
                    | tokio_tungstenite::tungstenite::Error::Utf8 => {
                        info!("WebSocket connection closed or protocol error for {}: {}", peer, e);
                    }
                    tokio_tungstenite::tungstenite::Error::Io(ref io_err) if
                        io_err.kind() == std::io::ErrorKind::ConnectionReset
                    => {
                        info!("WebSocket connection reset by peer {}", peer);
                    }
                    _ => {
                        error!("Error receiving message from {}: {}", peer, e);
                    }
                }
                break;
            }
        }
    }
    info!(
        "WebSocket connection closed for {} (Conv ID: {}, {} messages)",
        peer,
        session.id(),
        session.conversation().len()
    );
}
