//! Game synchronization service, the one object request handlers talk to.
//!
//! Owns the database pool and the subscriber registry, and keeps the
//! ordering contract between them: a snapshot is committed to the ledger
//! before any subscriber hears about it.

use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use chess_core::{codec, Board, MoveMetadata};

use crate::db::games::GameRecord;
use crate::db::{games, snapshots};
use crate::error::AppError;
use crate::registry::SubscriptionRegistry;

/// Message pushed to a game's watchers over their sockets.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StatePush {
    Move {
        #[serde(rename = "gameID")]
        game_id: Uuid,
        board: Board,
    },
}

/// A game never ends as far as this service is concerned: it is created
/// with its starting snapshot and thereafter only accumulates appends.
/// Check/checkmate flags ride along as metadata, nothing acts on them.
#[derive(Clone)]
pub struct GameSync {
    pool: PgPool,
    registry: SubscriptionRegistry,
}

impl GameSync {
    pub fn new(pool: PgPool, registry: SubscriptionRegistry) -> Self {
        Self { pool, registry }
    }

    /// Registry handle for watcher connection tasks.
    pub fn registry(&self) -> &SubscriptionRegistry {
        &self.registry
    }

    /// Create a game with its starting-position snapshot already appended.
    pub async fn create_game(&self) -> Result<(GameRecord, Board), AppError> {
        let (game, board) = games::create(&self.pool).await?;
        tracing::info!(game_id = %game.game_id, "Created game");
        Ok((game, board))
    }

    /// Validate and append one submitted snapshot, then push it to the
    /// game's watchers. Returns the assigned sequence number.
    ///
    /// The append commits before the first push goes out, so anyone who
    /// sees the push will also find the snapshot in the history. Delivery
    /// problems stay inside the registry and never reach the submitter.
    pub async fn submit_snapshot(
        &self,
        game_id: Uuid,
        cells: &[Vec<i64>],
        meta: MoveMetadata,
    ) -> Result<i64, AppError> {
        let board =
            Board::from_cells(cells).map_err(|e| AppError::InvalidInput(e.to_string()))?;
        let encoded = codec::encode(&board);

        let snapshot = snapshots::append(&self.pool, game_id, &encoded, &meta).await?;
        tracing::debug!(game_id = %game_id, seq = snapshot.seq, "Appended snapshot");

        self.registry
            .broadcast(game_id, StatePush::Move { game_id, board })
            .await;

        Ok(snapshot.seq)
    }

    /// Every stored board for a game, oldest first.
    pub async fn history(&self, game_id: Uuid) -> Result<Vec<Board>, AppError> {
        games::get(&self.pool, game_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("No game with id {game_id}")))?;

        let rows = snapshots::list(&self.pool, game_id).await?;
        Ok(rows.iter().map(|r| codec::decode(&r.board)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::board::BLACK_KING;

    #[test]
    fn test_push_wire_shape() {
        let game_id = Uuid::new_v4();
        let push = StatePush::Move {
            game_id,
            board: Board::starting_position(),
        };

        let json = serde_json::to_value(&push).unwrap();
        assert_eq!(json["type"], "move");
        assert_eq!(json["gameID"], game_id.to_string());
        assert_eq!(json["board"].as_array().unwrap().len(), 8);
        assert_eq!(json["board"][0][4], BLACK_KING);
    }
}
