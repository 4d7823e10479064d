use crate::interface_adapters::handlers::games::find_game;
use crate::interface_adapters::protocol::{ClientMessage, GameSnapshotDto, ServerMessage};
use crate::interface_adapters::state::AppState;
use crate::use_cases::{GameCommand, GameHandle, GameSnapshot};
use axum::{
    extract::{
        Path, State,
        ws::{CloseFrame, Message, WebSocket, WebSocketUpgrade, close_code},
    },
    response::{IntoResponse, Response},
};
use std::fmt;
use tokio::sync::watch;
use tracing::{Instrument, debug, info, info_span, warn};

// Limit on unparseable messages before the connection is dropped.
const MAX_INVALID_MESSAGES: u32 = 16;

#[derive(Debug)]
enum NetError {
    Serialization(serde_json::Error),
    Ws(axum::Error),
}

impl fmt::Display for NetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetError::Serialization(err) => write!(f, "serialization error: {err}"),
            NetError::Ws(err) => write!(f, "websocket error: {err}"),
        }
    }
}

enum LoopControl {
    Continue,
    Disconnect,
}

pub async fn game_ws(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
    Path(game_id): Path<String>,
) -> Response {
    let game = match find_game(&state, &game_id).await {
        Ok(game) => game,
        Err(err) => return err.into_response(),
    };

    let span = info_span!("ws", game_id = %game.game_id);
    ws.on_upgrade(move |socket| handle_socket(socket, game).instrument(span))
}

async fn handle_socket(mut socket: WebSocket, game: GameHandle) {
    info!("client connected");
    if let Err(err) = run_client_loop(&mut socket, &game).await {
        warn!(error = %err, "client loop exited with error");
    }
    info!("client disconnected");
}

async fn send_message(socket: &mut WebSocket, msg: &ServerMessage) -> Result<(), NetError> {
    let txt = serde_json::to_string(msg).map_err(NetError::Serialization)?;
    socket
        .send(Message::Text(txt.into()))
        .await
        .map_err(NetError::Ws)
}

async fn send_snapshot(socket: &mut WebSocket, snapshot: &GameSnapshot) -> Result<(), NetError> {
    send_message(socket, &ServerMessage::Snapshot(GameSnapshotDto::from(snapshot))).await
}

async fn run_client_loop(socket: &mut WebSocket, game: &GameHandle) -> Result<(), NetError> {
    let mut updates: watch::Receiver<GameSnapshot> = game.subscribe();
    let mut invalid_messages: u32 = 0;

    let initial = updates.borrow_and_update().clone();
    send_snapshot(socket, &initial).await?;

    loop {
        let control = tokio::select! {
            changed = updates.changed() => {
                match changed {
                    Ok(()) => {
                        let snapshot = updates.borrow_and_update().clone();
                        send_snapshot(socket, &snapshot).await?;
                        LoopControl::Continue
                    }
                    Err(_) => {
                        // The game task is gone; tell the client and hang up.
                        let _ = socket
                            .send(Message::Close(Some(CloseFrame {
                                code: close_code::AWAY,
                                reason: "game ended".into(),
                            })))
                            .await;
                        LoopControl::Disconnect
                    }
                }
            }
            incoming = socket.recv() => {
                match incoming {
                    Some(Ok(Message::Text(text))) => {
                        handle_client_text(socket, game, text.as_str(), &mut invalid_messages).await?
                    }
                    Some(Ok(Message::Binary(_))) => {
                        let _ = socket
                            .send(Message::Close(Some(CloseFrame {
                                code: close_code::UNSUPPORTED,
                                reason: "binary messages not supported".into(),
                            })))
                            .await;
                        LoopControl::Disconnect
                    }
                    Some(Ok(Message::Ping(_) | Message::Pong(_))) => LoopControl::Continue,
                    Some(Ok(Message::Close(_))) | None => LoopControl::Disconnect,
                    Some(Err(err)) => {
                        debug!(error = %err, "websocket recv error");
                        LoopControl::Disconnect
                    }
                }
            }
        };

        if let LoopControl::Disconnect = control {
            return Ok(());
        }
    }
}

async fn handle_client_text(
    socket: &mut WebSocket,
    game: &GameHandle,
    text: &str,
    invalid_messages: &mut u32,
) -> Result<LoopControl, NetError> {
    let command = match serde_json::from_str::<ClientMessage>(text) {
        Ok(ClientMessage::Flip(flip)) => GameCommand::Flip {
            card_id: flip.card_id,
            reply: None,
        },
        Ok(ClientMessage::Restart) => GameCommand::Restart { reply: None },
        Err(err) => {
            *invalid_messages += 1;
            warn!(bytes = text.len(), error = %err, "failed to parse client message");
            if *invalid_messages > MAX_INVALID_MESSAGES {
                let _ = socket
                    .send(Message::Close(Some(CloseFrame {
                        code: close_code::POLICY,
                        reason: "too many invalid messages".into(),
                    })))
                    .await;
                return Ok(LoopControl::Disconnect);
            }
            let reply = ServerMessage::Error {
                message: format!("invalid message: {err}"),
            };
            send_message(socket, &reply).await?;
            return Ok(LoopControl::Continue);
        }
    };

    // Results come back through the snapshot stream.
    if game.command_tx.send(command).await.is_err() {
        return Ok(LoopControl::Disconnect);
    }
    Ok(LoopControl::Continue)
}
