use serde::{Deserialize, Serialize};

/// Optional context about the move that produced a snapshot.
///
/// Everything here is caller-supplied and stored verbatim; none of it is
/// checked against the board, and a snapshot without any of it is just as
/// valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MoveMetadata {
    pub move_author: Option<String>,
    pub piece_moved: Option<u8>,
    pub piece_taken: Option<u8>,
    pub start_position: Option<String>,
    pub end_position: Option<String>,
    pub check: bool,
    pub check_mate: bool,
}
