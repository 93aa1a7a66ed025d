//! Fixed 64-byte board serialization used for storage and the wire.
//!
//! One byte per square, row-major from row 0: the byte at index
//! `row * 8 + col` is the piece code of that square.

use crate::board::{Board, BOARD_SIZE};

/// Encoded size of a board: one byte per square.
pub const ENCODED_LEN: usize = BOARD_SIZE * BOARD_SIZE;

/// Flatten a board row-major, one byte per square.
pub fn encode(board: &Board) -> [u8; ENCODED_LEN] {
    let mut out = [0u8; ENCODED_LEN];
    for (row, cols) in board.0.iter().enumerate() {
        for (col, &code) in cols.iter().enumerate() {
            out[row * BOARD_SIZE + col] = code;
        }
    }
    out
}

/// Rebuild a board from its row-major encoding.
///
/// Input shorter than [`ENCODED_LEN`] leaves the remaining squares empty,
/// and bytes past the first 64 are ignored; a truncated or over-long stored
/// record still decodes instead of failing the whole history read.
pub fn decode(bytes: &[u8]) -> Board {
    let mut board = Board::empty();
    for (i, &code) in bytes.iter().take(ENCODED_LEN).enumerate() {
        board.0[i / BOARD_SIZE][i % BOARD_SIZE] = code;
    }
    board
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{BLACK_PAWN, WHITE_QUEEN};

    #[test]
    fn test_round_trip_starting_position() {
        let b = Board::starting_position();
        assert_eq!(decode(&encode(&b)), b);
    }

    #[test]
    fn test_round_trip_preserves_arbitrary_codes() {
        let mut b = Board::empty();
        b.0[0][0] = 255;
        b.0[3][4] = WHITE_QUEEN;
        b.0[5][1] = 13; // out-of-vocabulary codes pass through untouched
        b.0[7][7] = 1;
        assert_eq!(decode(&encode(&b)), b);
    }

    #[test]
    fn test_encode_is_row_major() {
        let mut b = Board::empty();
        b.0[2][5] = 9;
        let bytes = encode(&b);
        assert_eq!(bytes[2 * BOARD_SIZE + 5], 9);
        assert_eq!(bytes.iter().filter(|&&x| x != 0).count(), 1);
    }

    #[test]
    fn test_encode_length_is_constant() {
        assert_eq!(encode(&Board::starting_position()).len(), 64);
    }

    #[test]
    fn test_decode_short_input_leaves_rest_empty() {
        let bytes = [BLACK_PAWN; 10];
        let b = decode(&bytes);
        assert_eq!(b.0[0], [BLACK_PAWN; BOARD_SIZE]);
        assert_eq!(b.0[1][0], BLACK_PAWN);
        assert_eq!(b.0[1][1], BLACK_PAWN);
        assert_eq!(b.0[1][2], 0);
        assert_eq!(b.0[7], [0; BOARD_SIZE]);
    }

    #[test]
    fn test_decode_empty_input_gives_empty_board() {
        assert_eq!(decode(&[]), Board::empty());
    }

    #[test]
    fn test_decode_ignores_extra_bytes() {
        let b = Board::starting_position();
        let mut bytes = encode(&b).to_vec();
        bytes.extend_from_slice(&[42; 20]);
        assert_eq!(decode(&bytes), b);
    }
}
