//! WebSocket game sessions.
//!
//! The first text frame carries the [`GameRequest`]; everything after that is
//! server to client until the round ends.

use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::Response;
use pm_game::{GameError, GameRunner, MessageSink};
use pm_scores::ScoreRepository;
use powermatch::domain::meter::PowerReading;
use powermatch::domain::protocol::{GameRequest, ServerMessage};
use powermatch::kernel::server::ApiState;
use std::time::Duration;
use tracing::{debug, info, warn};

/// `GET /ws/game`
pub(crate) async fn socket_handler(ws: WebSocketUpgrade, State(state): State<ApiState>) -> Response {
    ws.on_upgrade(move |socket| play(socket, state))
}

async fn play(socket: WebSocket, state: ApiState) {
    let mut sink = SocketSink { socket };

    let request = match read_request(&mut sink.socket).await {
        Ok(Some(request)) => request,
        Ok(None) => {
            debug!("Client left before requesting a round");
            return;
        },
        Err(message) => {
            warn!(%message, "Rejecting malformed game request");
            if let Err(e) = sink.send(ServerMessage::Error { message }).await {
                debug!(error = %e, "Could not report the malformed request");
            }
            sink.close().await;
            return;
        },
    };

    let readings = match state.events.subscribe::<PowerReading>() {
        Ok(readings) => readings,
        Err(e) => {
            warn!(error = %e, "Reading stream unavailable");
            let message = ServerMessage::Error { message: "Meter readings unavailable".to_owned() };
            if let Err(e) = sink.send(message).await {
                debug!(error = %e, "Could not report the missing reading stream");
            }
            sink.close().await;
            return;
        },
    };

    let runner = GameRunner::new(
        ScoreRepository::new(state.database.clone()),
        Duration::from_millis(state.config.game.tick_millis),
    );

    match runner.run(request, readings, &mut sink).await {
        Ok(score) => info!(player = %score.name, score = score.score, "Round completed"),
        Err(e @ (GameError::Channel { .. } | GameError::Aborted { .. })) => {
            info!(error = %e, "Round abandoned");
        },
        Err(e) => warn!(error = %e, "Round failed"),
    }

    sink.close().await;
}

/// Waits for the first text frame and decodes it.
///
/// `Ok(None)` means the client went away first; `Err` carries the message of
/// the `error` frame sent back.
async fn read_request(socket: &mut WebSocket) -> Result<Option<GameRequest>, String> {
    while let Some(frame) = socket.recv().await {
        match frame {
            Ok(Message::Text(text)) => {
                return serde_json::from_str::<GameRequest>(text.as_str())
                    .map(Some)
                    .map_err(|e| format!("Invalid game request: {e}"));
            },
            Ok(Message::Binary(_)) => return Err("Expected a JSON text frame".to_owned()),
            Ok(Message::Ping(_) | Message::Pong(_)) => {},
            Ok(Message::Close(_)) | Err(_) => return Ok(None),
        }
    }
    Ok(None)
}

/// Writes protocol frames as JSON text.
struct SocketSink {
    socket: WebSocket,
}

impl std::fmt::Debug for SocketSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SocketSink").finish_non_exhaustive()
    }
}

impl SocketSink {
    async fn close(&mut self) {
        if let Err(e) = self.socket.send(Message::Close(None)).await {
            debug!(error = %e, "Close frame not delivered");
        }
    }
}

impl MessageSink for SocketSink {
    async fn send(&mut self, message: ServerMessage) -> Result<(), GameError> {
        let text = serde_json::to_string(&message)
            .map_err(|e| GameError::Internal { message: e.to_string().into(), context: None })?;
        self.socket.send(Message::Text(text.into())).await.map_err(|e| GameError::Channel {
            message: e.to_string().into(),
            context: Some("WebSocket send".into()),
        })
    }
}
