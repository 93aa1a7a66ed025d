//! Realtime game watch socket.
//!
//! A connection subscribes to one game and receives a JSON frame for every
//! snapshot accepted after that point. Traffic is one-way: inbound frames
//! are drained and dropped, and the subscription dies with the connection.

use anyhow::Result;
use axum::{
    extract::ws::{Message, WebSocket, WebSocketUpgrade},
    extract::Path,
    response::Response,
    Extension,
};
use futures::stream::SplitSink;
use futures::{SinkExt, StreamExt};
use uuid::Uuid;

use crate::error::AppError;
use crate::routes::games::parse_game_id;
use crate::sync::{GameSync, StatePush};

/// GET /socket/{id}
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Extension(sync): Extension<GameSync>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let game_id = parse_game_id(&id)?;
    Ok(ws.on_upgrade(move |socket| handle_socket(socket, sync, game_id)))
}

async fn handle_socket(socket: WebSocket, sync: GameSync, game_id: Uuid) {
    let registry = sync.registry();
    let (subscriber_id, mut pushes) = registry.subscribe(game_id).await;
    tracing::info!(game_id = %game_id, subscriber = %subscriber_id, "Watcher connected");

    let (mut sender, mut receiver) = socket.split();

    loop {
        tokio::select! {
            push = pushes.recv() => {
                match push {
                    Some(push) => {
                        if send_push(&mut sender, &push).await.is_err() {
                            break;
                        }
                    }
                    // Registry already dropped this subscriber as stale.
                    None => break,
                }
            }
            msg = receiver.next() => {
                if !keep_open(msg) {
                    break;
                }
            }
        }
    }

    registry.unsubscribe(game_id, subscriber_id).await;
    tracing::info!(game_id = %game_id, subscriber = %subscriber_id, "Watcher disconnected");
}

/// Serialize and send one push frame.
async fn send_push(sender: &mut SplitSink<WebSocket, Message>, push: &StatePush) -> Result<()> {
    let json = serde_json::to_string(push)?;
    sender.send(Message::Text(json.into())).await?;
    Ok(())
}

/// Watchers only listen; anything inbound except a close is ignored.
fn keep_open(msg: Option<Result<Message, axum::Error>>) -> bool {
    !matches!(msg, Some(Ok(Message::Close(_))) | Some(Err(_)) | None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keep_open_ignores_chatter() {
        assert!(keep_open(Some(Ok(Message::Text("hello".into())))));
        assert!(keep_open(Some(Ok(Message::Ping(vec![].into())))));
    }

    #[test]
    fn test_keep_open_ends_on_close_or_error() {
        assert!(!keep_open(Some(Ok(Message::Close(None)))));
        assert!(!keep_open(None));
    }
}
