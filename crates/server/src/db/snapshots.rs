use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use chess_core::MoveMetadata;

use crate::error::AppError;

/// One appended board state.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SnapshotRecord {
    pub id: i64,
    pub game_id: Uuid,
    pub seq: i64,
    pub board: Vec<u8>,
    pub move_author: Option<String>,
    pub piece_moved: Option<i32>,
    pub piece_taken: Option<i32>,
    pub start_position: Option<String>,
    pub end_position: Option<String>,
    pub is_check: bool,
    pub is_checkmate: bool,
    pub created_at: DateTime<Utc>,
}

/// Append an encoded board to a game's history.
///
/// The sequence number comes from bumping `games.last_seq` in the same
/// transaction; the row lock that takes serializes concurrent appends to
/// one game while appends to other games run in parallel. A missing game
/// row fails with `NotFound` before anything is written.
pub async fn append(
    pool: &PgPool,
    game_id: Uuid,
    board: &[u8],
    meta: &MoveMetadata,
) -> Result<SnapshotRecord, AppError> {
    let mut tx = pool.begin().await.map_err(AppError::Storage)?;

    let seq: Option<(i64,)> = sqlx::query_as(
        "UPDATE games SET last_seq = last_seq + 1 WHERE game_id = $1 RETURNING last_seq",
    )
    .bind(game_id)
    .fetch_optional(&mut *tx)
    .await
    .map_err(AppError::Storage)?;

    let (seq,) = seq.ok_or_else(|| AppError::NotFound(format!("No game with id {game_id}")))?;

    let snapshot: SnapshotRecord = sqlx::query_as(
        r#"INSERT INTO board_states (
            game_id, seq, board, move_author, piece_moved, piece_taken,
            start_position, end_position, is_check, is_checkmate
        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        RETURNING *"#,
    )
    .bind(game_id)
    .bind(seq)
    .bind(board)
    .bind(meta.move_author.as_deref())
    .bind(meta.piece_moved.map(i32::from))
    .bind(meta.piece_taken.map(i32::from))
    .bind(meta.start_position.as_deref())
    .bind(meta.end_position.as_deref())
    .bind(meta.check)
    .bind(meta.check_mate)
    .fetch_one(&mut *tx)
    .await
    .map_err(AppError::Storage)?;

    tx.commit().await.map_err(AppError::Storage)?;

    Ok(snapshot)
}

/// Full history for a game, oldest first.
pub async fn list(pool: &PgPool, game_id: Uuid) -> Result<Vec<SnapshotRecord>, AppError> {
    sqlx::query_as("SELECT * FROM board_states WHERE game_id = $1 ORDER BY seq ASC")
        .bind(game_id)
        .fetch_all(pool)
        .await
        .map_err(AppError::Storage)
}
