use axum::{extract::Path, http::StatusCode, Extension, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use chess_core::{Board, MoveMetadata};

use crate::error::AppError;
use crate::sync::GameSync;

#[derive(Serialize)]
pub struct CreateGameResponse {
    #[serde(rename = "gameID")]
    pub game_id: Uuid,
    pub board: Board,
}

#[derive(Serialize)]
pub struct HistoryResponse {
    #[serde(rename = "gameID")]
    pub game_id: Uuid,
    pub state: Vec<Board>,
}

/// Body of PATCH /game. Beyond the grid itself everything is optional:
/// `signed` is an unverified signature slot and the move fields are stored
/// as given.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitStateRequest {
    #[serde(rename = "gameID")]
    pub game_id: String,
    pub board: Vec<Vec<i64>>,
    #[serde(default)]
    pub signed: Option<String>,
    #[serde(default)]
    pub move_author: Option<String>,
    #[serde(default)]
    pub piece_moved: Option<u8>,
    #[serde(default)]
    pub piece_taken: Option<u8>,
    #[serde(default)]
    pub start_position: Option<String>,
    #[serde(default)]
    pub end_position: Option<String>,
    #[serde(default)]
    pub check: bool,
    #[serde(default)]
    pub check_mate: bool,
}

/// POST /game
pub async fn create_game(
    Extension(sync): Extension<GameSync>,
) -> Result<Json<CreateGameResponse>, AppError> {
    let (game, board) = sync.create_game().await?;
    Ok(Json(CreateGameResponse {
        game_id: game.game_id,
        board,
    }))
}

/// GET /game/{id}
pub async fn get_history(
    Extension(sync): Extension<GameSync>,
    Path(id): Path<String>,
) -> Result<Json<HistoryResponse>, AppError> {
    let game_id = parse_game_id(&id)?;
    let state = sync.history(game_id).await?;
    Ok(Json(HistoryResponse { game_id, state }))
}

/// PATCH /game
pub async fn submit_state(
    Extension(sync): Extension<GameSync>,
    Json(req): Json<SubmitStateRequest>,
) -> Result<StatusCode, AppError> {
    let game_id = parse_game_id(&req.game_id)?;

    let meta = MoveMetadata {
        move_author: req.move_author,
        piece_moved: req.piece_moved,
        piece_taken: req.piece_taken,
        start_position: req.start_position,
        end_position: req.end_position,
        check: req.check,
        check_mate: req.check_mate,
    };

    sync.submit_snapshot(game_id, &req.board, meta).await?;

    Ok(StatusCode::OK)
}

pub(crate) fn parse_game_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::InvalidInput(format!("Bad game ID: {raw}")))
}
