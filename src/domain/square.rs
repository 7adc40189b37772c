//! Board addressing: storage cells, pointer cells and algebraic squares.

use std::fmt;
use std::str::FromStr;

use crate::error::BoardError;

/// Literal square name used for the setup-mode piece box.
pub const PIECE_BOX: &str = "piecebox";

/// A cell of the 8x8 position array. Row 0 is rank 8, column 0 is file a.
/// Storage coordinates never depend on the board orientation.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct BoardCell {
    pub row: usize,
    pub col: usize,
}

impl BoardCell {
    /// Returns `None` unless both indices are below 8.
    pub fn new(row: usize, col: usize) -> Option<Self> {
        (row < 8 && col < 8).then_some(Self { row, col })
    }

    pub fn mirrored(self) -> Self {
        Self {
            row: 7 - self.row,
            col: 7 - self.col,
        }
    }
}

/// A logical cell under the pointer: either a board cell or a piece-box slot.
/// Piece-box rows are 0 and 1 within the box (screen rows 8 and 9).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Cell {
    Board(BoardCell),
    PieceBox { row: usize, col: usize },
}

impl Cell {
    pub fn square(self) -> Square {
        match self {
            Cell::Board(cell) => Square::Board(cell),
            Cell::PieceBox { .. } => Square::PieceBox,
        }
    }
}

/// A square as the rules engine names it: algebraic notation or the piece box.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Square {
    Board(BoardCell),
    PieceBox,
}

impl FromStr for Square {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == PIECE_BOX {
            return Ok(Square::PieceBox);
        }
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(BoardError::InvalidSquare(s.to_string()));
        }
        let (file, rank) = (bytes[0], bytes[1]);
        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
            return Err(BoardError::InvalidSquare(s.to_string()));
        }
        Ok(Square::Board(BoardCell {
            row: (b'8' - rank) as usize,
            col: (file - b'a') as usize,
        }))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Square::Board(cell) => {
                let file = (b'a' + cell.col as u8) as char;
                write!(f, "{}{}", file, 8 - cell.row)
            }
            Square::PieceBox => f.write_str(PIECE_BOX),
        }
    }
}
