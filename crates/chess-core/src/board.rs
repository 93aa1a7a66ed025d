//! Board representation: an 8x8 grid of single-byte piece codes.
//!
//! Row 0 holds black's back rank and row 7 white's, matching how clients
//! render the grid. Code 0 is an empty square, 1..=6 are the white pieces
//! and 7..=12 the black ones. Codes outside that vocabulary are carried
//! untouched; validation only guarantees each cell fits in one byte.

use serde::{Deserialize, Serialize};

/// Squares per side.
pub const BOARD_SIZE: usize = 8;

pub const EMPTY: u8 = 0;
pub const WHITE_PAWN: u8 = 1;
pub const WHITE_KNIGHT: u8 = 2;
pub const WHITE_BISHOP: u8 = 3;
pub const WHITE_ROOK: u8 = 4;
pub const WHITE_QUEEN: u8 = 5;
pub const WHITE_KING: u8 = 6;
pub const BLACK_PAWN: u8 = 7;
pub const BLACK_KNIGHT: u8 = 8;
pub const BLACK_BISHOP: u8 = 9;
pub const BLACK_ROOK: u8 = 10;
pub const BLACK_QUEEN: u8 = 11;
pub const BLACK_KING: u8 = 12;

/// Why a raw grid from the wire was refused.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("expected {BOARD_SIZE} rows, got {0}")]
    RowCount(usize),

    #[error("row {row} has {got} columns, expected {BOARD_SIZE}")]
    ColumnCount { row: usize, got: usize },

    #[error("cell value {value} at row {row}, column {col} does not fit in one byte")]
    CellOutOfRange { row: usize, col: usize, value: i64 },
}

/// An 8x8 grid of piece codes. Serializes as nested JSON arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board(pub [[u8; BOARD_SIZE]; BOARD_SIZE]);

impl Board {
    /// All squares empty.
    pub fn empty() -> Self {
        Board([[EMPTY; BOARD_SIZE]; BOARD_SIZE])
    }

    /// Standard chess starting position, queens on the d-file.
    pub fn starting_position() -> Self {
        let mut grid = [[EMPTY; BOARD_SIZE]; BOARD_SIZE];
        grid[0] = [
            BLACK_ROOK,
            BLACK_KNIGHT,
            BLACK_BISHOP,
            BLACK_QUEEN,
            BLACK_KING,
            BLACK_BISHOP,
            BLACK_KNIGHT,
            BLACK_ROOK,
        ];
        grid[1] = [BLACK_PAWN; BOARD_SIZE];
        grid[6] = [WHITE_PAWN; BOARD_SIZE];
        grid[7] = [
            WHITE_ROOK,
            WHITE_KNIGHT,
            WHITE_BISHOP,
            WHITE_QUEEN,
            WHITE_KING,
            WHITE_BISHOP,
            WHITE_KNIGHT,
            WHITE_ROOK,
        ];
        Board(grid)
    }

    /// Validate a raw request grid into a board.
    ///
    /// The shape must be exactly 8x8 and every cell must fit in a single
    /// byte. Nothing else is checked; whether the position makes sense as
    /// chess is the players' problem.
    pub fn from_cells(cells: &[Vec<i64>]) -> Result<Self, BoardError> {
        if cells.len() != BOARD_SIZE {
            return Err(BoardError::RowCount(cells.len()));
        }

        let mut grid = [[EMPTY; BOARD_SIZE]; BOARD_SIZE];
        for (row, cols) in cells.iter().enumerate() {
            if cols.len() != BOARD_SIZE {
                return Err(BoardError::ColumnCount {
                    row,
                    got: cols.len(),
                });
            }
            for (col, &value) in cols.iter().enumerate() {
                grid[row][col] = u8::try_from(value)
                    .map_err(|_| BoardError::CellOutOfRange { row, col, value })?;
            }
        }

        Ok(Board(grid))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starting_position_layout() {
        let b = Board::starting_position();

        assert_eq!(
            b.0[0],
            [
                BLACK_ROOK,
                BLACK_KNIGHT,
                BLACK_BISHOP,
                BLACK_QUEEN,
                BLACK_KING,
                BLACK_BISHOP,
                BLACK_KNIGHT,
                BLACK_ROOK,
            ]
        );
        assert_eq!(b.0[1], [BLACK_PAWN; BOARD_SIZE]);
        assert_eq!(b.0[6], [WHITE_PAWN; BOARD_SIZE]);
        assert_eq!(
            b.0[7],
            [
                WHITE_ROOK,
                WHITE_KNIGHT,
                WHITE_BISHOP,
                WHITE_QUEEN,
                WHITE_KING,
                WHITE_BISHOP,
                WHITE_KNIGHT,
                WHITE_ROOK,
            ]
        );
        for row in 2..6 {
            assert_eq!(b.0[row], [EMPTY; BOARD_SIZE]);
        }
    }

    #[test]
    fn test_from_cells_accepts_valid_grid() {
        let mut cells = vec![vec![0i64; BOARD_SIZE]; BOARD_SIZE];
        cells[0][0] = 255;
        cells[7][7] = i64::from(BLACK_KING);

        let b = Board::from_cells(&cells).unwrap();
        assert_eq!(b.0[0][0], 255);
        assert_eq!(b.0[7][7], BLACK_KING);
        assert_eq!(b.0[3][3], EMPTY);
    }

    #[test]
    fn test_from_cells_rejects_wrong_row_count() {
        let cells = vec![vec![0i64; BOARD_SIZE]; 7];
        assert_eq!(Board::from_cells(&cells), Err(BoardError::RowCount(7)));
    }

    #[test]
    fn test_from_cells_rejects_wrong_column_count() {
        let mut cells = vec![vec![0i64; BOARD_SIZE]; BOARD_SIZE];
        cells[3] = vec![0; 9];
        assert_eq!(
            Board::from_cells(&cells),
            Err(BoardError::ColumnCount { row: 3, got: 9 })
        );
    }

    #[test]
    fn test_from_cells_rejects_oversized_cell() {
        let mut cells = vec![vec![0i64; BOARD_SIZE]; BOARD_SIZE];
        cells[2][5] = 256;
        assert_eq!(
            Board::from_cells(&cells),
            Err(BoardError::CellOutOfRange {
                row: 2,
                col: 5,
                value: 256
            })
        );
    }

    #[test]
    fn test_from_cells_rejects_negative_cell() {
        let mut cells = vec![vec![0i64; BOARD_SIZE]; BOARD_SIZE];
        cells[0][0] = -1;
        assert_eq!(
            Board::from_cells(&cells),
            Err(BoardError::CellOutOfRange {
                row: 0,
                col: 0,
                value: -1
            })
        );
    }

    #[test]
    fn test_board_serializes_as_nested_arrays() {
        let json = serde_json::to_value(Board::empty()).unwrap();
        let expected = serde_json::to_value(vec![vec![0u8; BOARD_SIZE]; BOARD_SIZE]).unwrap();
        assert_eq!(json, expected);
    }
}
