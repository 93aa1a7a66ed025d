//! Core board model for the game sync backend: the 8x8 piece-code grid,
//! its fixed 64-byte storage encoding, and the move metadata attached to
//! snapshots. No chess rules live here; the backend stores and relays
//! state, it does not referee it.

pub mod board;
pub mod codec;
pub mod moves;

pub use board::{Board, BoardError, BOARD_SIZE};
pub use moves::MoveMetadata;
