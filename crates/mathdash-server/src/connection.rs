//! Per-connection handler: relay broadcasts out, route client frames in.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use futures_util::stream::SplitSink;
use futures_util::{SinkExt, StreamExt};
use mathdash_common::{new_id, ConnectionId, GameEvent};
use mathdash_engine::SessionController;
use serde::Serialize;
use tokio::net::TcpStream;
use tokio::sync::broadcast::error::RecvError;
use tokio_tungstenite::tungstenite::{Error as WsError, Message};
use tokio_tungstenite::WebSocketStream;

use crate::protocol::{ClientMessage, ServerMessage};
use crate::rate_limit::RateLimiter;
use crate::validation::{parse_answer, validate_username};

type WsSink = SplitSink<WebSocketStream<TcpStream>, Message>;

/// What every connection task needs.
#[derive(Clone)]
pub struct ConnectionContext {
    pub controller: Arc<SessionController>,
    pub max_messages_per_second: u32,
}

/// Identity bound to a connection by `join`.
struct Joined {
    user_id: String,
    username: String,
}

/// Handle a single WebSocket connection until it closes.
pub async fn handle_connection(
    ws: WebSocketStream<TcpStream>,
    addr: SocketAddr,
    ctx: ConnectionContext,
) {
    let (mut sink, mut stream) = ws.split();
    let mut events = ctx.controller.events().subscribe();
    let connection_id = ConnectionId::new();
    let mut limiter = RateLimiter::new(ctx.max_messages_per_second);
    let mut joined: Option<Joined> = None;

    tracing::info!(peer = %addr, connection = %connection_id, "Client connected");

    loop {
        tokio::select! {
            event = events.recv() => {
                match event {
                    Ok(event) => {
                        if send_json(&mut sink, &event).await.is_err() {
                            break;
                        }
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!(
                            connection = %connection_id,
                            skipped,
                            "Broadcast receiver lagged"
                        );
                    }
                    Err(RecvError::Closed) => break,
                }
            }

            frame = stream.next() => {
                match frame {
                    Some(Ok(Message::Text(text))) => {
                        let replies = if limiter.allow(Instant::now()) {
                            handle_text(&ctx.controller, &connection_id, &mut joined, &text)
                        } else {
                            tracing::debug!(connection = %connection_id, "Rate limit exceeded");
                            vec![Outbound::Reply(ServerMessage::error("rate limit exceeded"))]
                        };
                        if send_all(&mut sink, replies).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(Message::Ping(data))) => {
                        let _ = sink.send(Message::Pong(data)).await;
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Err(e)) => {
                        tracing::debug!(peer = %addr, error = %e, "WS error");
                        break;
                    }
                    _ => {}
                }
            }
        }
    }

    if joined.is_some() {
        ctx.controller.remove_user(&connection_id);
    }
    tracing::info!(peer = %addr, connection = %connection_id, "Client disconnected");
}

/// A frame queued for this connection only.
enum Outbound {
    Reply(ServerMessage),
    Event(GameEvent),
}

/// Apply one client text frame and return the direct replies.
fn handle_text(
    controller: &SessionController,
    connection_id: &ConnectionId,
    joined: &mut Option<Joined>,
    text: &str,
) -> Vec<Outbound> {
    let message = match serde_json::from_str::<ClientMessage>(text) {
        Ok(message) => message,
        Err(e) => {
            tracing::debug!(connection = %connection_id, error = %e, "Invalid client message");
            return vec![Outbound::Reply(ServerMessage::error("invalid message"))];
        }
    };

    match message {
        ClientMessage::Join { username, user_id } => {
            let username = match validate_username(&username) {
                Ok(name) => name,
                Err(e) => return vec![Outbound::Reply(ServerMessage::error(e.to_string()))],
            };
            let user_id = user_id
                .filter(|id| !id.trim().is_empty())
                .unwrap_or_else(new_id);

            controller.add_user(connection_id.clone(), &user_id, &username);
            let mut replies = vec![Outbound::Reply(ServerMessage::Joined {
                user_id: user_id.clone(),
                username: username.clone(),
                participant_count: controller.participant_count(),
            })];
            if let Some(question) = controller.current_question() {
                replies.push(Outbound::Event(GameEvent::NewQuestion {
                    question,
                    round: controller.round_info(),
                }));
            }
            *joined = Some(Joined { user_id, username });
            replies
        }

        ClientMessage::SubmitAnswer { answer, .. } => {
            let Some(identity) = joined.as_ref() else {
                let msg = ServerMessage::error("join before submitting answers");
                return vec![Outbound::Reply(msg)];
            };
            let answer = match parse_answer(&answer) {
                Ok(value) => value,
                Err(e) => return vec![Outbound::Reply(ServerMessage::error(e.to_string()))],
            };
            let result = controller.submit_answer(&identity.user_id, &identity.username, answer);
            tracing::debug!(
                connection = %connection_id,
                correct = result.is_correct,
                winner = result.is_winner,
                "Answer submitted"
            );
            vec![Outbound::Reply(ServerMessage::AnswerResult(result))]
        }

        ClientMessage::Ping => vec![Outbound::Reply(ServerMessage::Pong)],
    }
}

async fn send_all(sink: &mut WsSink, frames: Vec<Outbound>) -> Result<(), WsError> {
    for frame in frames {
        match frame {
            Outbound::Reply(msg) => send_json(sink, &msg).await?,
            Outbound::Event(event) => send_json(sink, &event).await?,
        }
    }
    Ok(())
}

/// Send any serializable value as a JSON text frame.
async fn send_json<T: Serialize>(sink: &mut WsSink, value: &T) -> Result<(), WsError> {
    match serde_json::to_string(value) {
        Ok(json) => sink.send(Message::Text(json.into())).await,
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize outbound frame");
            Ok(())
        }
    }
}
