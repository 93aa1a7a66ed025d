use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use chess_core::{codec, Board};

use crate::error::AppError;

/// A game session row. The player columns are identity hook points carried
/// from day one but never interpreted; `last_seq` is the append cursor.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct GameRecord {
    pub id: i64,
    pub game_id: Uuid,
    pub white_player: Option<Vec<u8>>,
    pub black_player: Option<Vec<u8>>,
    pub last_seq: i64,
    pub created_at: DateTime<Utc>,
}

/// Create a game together with its first snapshot (the standard starting
/// position, sequence 1) in one transaction.
pub async fn create(pool: &PgPool) -> Result<(GameRecord, Board), AppError> {
    let board = Board::starting_position();
    let encoded = codec::encode(&board);

    let mut tx = pool.begin().await.map_err(AppError::Storage)?;

    let game: GameRecord = sqlx::query_as(
        "INSERT INTO games (game_id, last_seq) VALUES ($1, 1) RETURNING *",
    )
    .bind(Uuid::new_v4())
    .fetch_one(&mut *tx)
    .await
    .map_err(AppError::Storage)?;

    sqlx::query("INSERT INTO board_states (game_id, seq, board) VALUES ($1, 1, $2)")
        .bind(game.game_id)
        .bind(&encoded[..])
        .execute(&mut *tx)
        .await
        .map_err(AppError::Storage)?;

    tx.commit().await.map_err(AppError::Storage)?;

    Ok((game, board))
}

/// Look up a game by its public identifier.
pub async fn get(pool: &PgPool, game_id: Uuid) -> Result<Option<GameRecord>, AppError> {
    sqlx::query_as("SELECT * FROM games WHERE game_id = $1")
        .bind(game_id)
        .fetch_optional(pool)
        .await
        .map_err(AppError::Storage)
}
