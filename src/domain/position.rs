//! The board position as the widget stores it.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::chess::{Piece, PieceColor, PieceKind};
use crate::domain::square::{BoardCell, Cell};
use crate::error::BoardError;

pub type Grid = [[Option<Piece>; 8]; 8];
pub type PieceBoxGrid = [[Option<Piece>; 8]; 2];

/// Interaction mode of the board.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Moves are checked by the rules engine.
    #[default]
    Play,
    /// Free placement editor with a piece box below the board.
    Setup,
}

impl Mode {
    /// Screen rows occupied by the board in this mode.
    pub fn rows(self) -> u32 {
        match self {
            Mode::Play => 8,
            Mode::Setup => 10,
        }
    }
}

impl FromStr for Mode {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "play" => Ok(Mode::Play),
            "setup" => Ok(Mode::Setup),
            _ => Err(BoardError::InvalidMode(s.to_string())),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mode::Play => "play",
            Mode::Setup => "setup",
        })
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct CastlingRights {
    pub white_king_side: bool,
    pub white_queen_side: bool,
    pub black_king_side: bool,
    pub black_queen_side: bool,
}

impl CastlingRights {
    pub const ALL: CastlingRights = CastlingRights {
        white_king_side: true,
        white_queen_side: true,
        black_king_side: true,
        black_queen_side: true,
    };

    pub const NONE: CastlingRights = CastlingRights {
        white_king_side: false,
        white_queen_side: false,
        black_king_side: false,
        black_queen_side: false,
    };
}

/// Origin and destination of the last move, kept for highlighting only.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct LastMove {
    pub from: BoardCell,
    pub to: BoardCell,
}

/// Full board state: placement, piece box and game metadata.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Position {
    pub board: Grid,
    pub piece_box: PieceBoxGrid,
    pub white_to_move: bool,
    pub en_passant: Option<BoardCell>,
    pub castling: CastlingRights,
    pub last_move: Option<LastMove>,
    pub move_count: u32,
    /// Half-moves since the last capture or pawn move, as in FEN.
    pub halfmove_clock: u32,
    /// FEN fullmove number, starting at 1.
    pub fullmove_number: u32,
    pub active: bool,
}

const fn p(color: PieceColor, kind: PieceKind) -> Option<Piece> {
    Some(Piece::new(color, kind))
}

const W: PieceColor = PieceColor::White;
const B: PieceColor = PieceColor::Black;

pub const EMPTY_GRID: Grid = [[None; 8]; 8];

pub const START_GRID: Grid = {
    use PieceKind::*;
    [
        [p(B, Rook), p(B, Knight), p(B, Bishop), p(B, Queen), p(B, King), p(B, Bishop), p(B, Knight), p(B, Rook)],
        [p(B, Pawn); 8],
        [None; 8],
        [None; 8],
        [None; 8],
        [None; 8],
        [p(W, Pawn); 8],
        [p(W, Rook), p(W, Knight), p(W, Bishop), p(W, Queen), p(W, King), p(W, Bishop), p(W, Knight), p(W, Rook)],
    ]
};

/// One of every piece per colour; the box is a reservoir, so drops copy from it.
pub const DEFAULT_PIECE_BOX: PieceBoxGrid = {
    use PieceKind::*;
    [
        [p(W, King), p(W, Queen), p(W, Rook), p(W, Bishop), p(W, Knight), p(W, Pawn), None, None],
        [p(B, King), p(B, Queen), p(B, Rook), p(B, Bishop), p(B, Knight), p(B, Pawn), None, None],
    ]
};

impl Position {
    /// An empty board with default metadata and an active game.
    pub fn empty() -> Self {
        Self::with_grid(EMPTY_GRID)
    }

    /// The standard starting position.
    pub fn starting() -> Self {
        Self::with_grid(START_GRID)
    }

    fn with_grid(board: Grid) -> Self {
        Self {
            board,
            piece_box: DEFAULT_PIECE_BOX,
            white_to_move: true,
            en_passant: None,
            castling: CastlingRights::ALL,
            last_move: None,
            move_count: 0,
            halfmove_clock: 0,
            fullmove_number: 1,
            active: true,
        }
    }

    /// Overwrite placement and metadata with a canonical state, keeping the
    /// piece box and the active flag.
    pub fn reset_to(&mut self, board: Grid) {
        self.board = board;
        self.last_move = None;
        self.en_passant = None;
        self.white_to_move = true;
        self.castling = CastlingRights::ALL;
        self.move_count = 0;
        self.halfmove_clock = 0;
        self.fullmove_number = 1;
    }

    pub fn piece_at(&self, cell: Cell) -> Option<Piece> {
        match cell {
            Cell::Board(c) => self.board[c.row][c.col],
            Cell::PieceBox { row, col } => self.piece_box.get(row)?.get(col).copied().flatten(),
        }
    }

    pub fn board_piece(&self, cell: BoardCell) -> Option<Piece> {
        self.board[cell.row][cell.col]
    }

    pub fn set_board_piece(&mut self, cell: BoardCell, piece: Option<Piece>) {
        self.board[cell.row][cell.col] = piece;
    }

    /// Number of occupied board squares.
    pub fn piece_count(&self) -> usize {
        self.board.iter().flatten().filter(|c| c.is_some()).count()
    }

    pub fn side_to_move(&self) -> PieceColor {
        if self.white_to_move {
            PieceColor::White
        } else {
            PieceColor::Black
        }
    }

    /// Board rows as piece codes, `""` for empty squares.
    pub fn codes(&self) -> Vec<Vec<String>> {
        self.board
            .iter()
            .map(|row| {
                row.iter()
                    .map(|c| c.map(|p| p.code()).unwrap_or_default())
                    .collect()
            })
            .collect()
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::starting()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starting_layout() {
        let pos = Position::starting();
        let codes = pos.codes();
        assert_eq!(codes[0], ["br", "bn", "bb", "bq", "bk", "bb", "bn", "br"]);
        assert_eq!(codes[7], ["wr", "wn", "wb", "wq", "wk", "wb", "wn", "wr"]);
        assert!(codes[3].iter().all(String::is_empty));
        assert_eq!(pos.piece_count(), 32);
        assert!(pos.white_to_move);
        assert_eq!(pos.castling, CastlingRights::ALL);
    }

    #[test]
    fn test_piece_box_lookup() {
        let pos = Position::empty();
        assert_eq!(
            pos.piece_at(Cell::PieceBox { row: 1, col: 1 }),
            Some(Piece::new(PieceColor::Black, PieceKind::Queen))
        );
        assert_eq!(pos.piece_at(Cell::PieceBox { row: 0, col: 7 }), None);
        assert_eq!(pos.piece_at(Cell::PieceBox { row: 2, col: 0 }), None);
    }

    #[test]
    fn test_reset_keeps_active_flag() {
        let mut pos = Position::starting();
        pos.active = false;
        pos.move_count = 12;
        pos.fullmove_number = 7;
        pos.white_to_move = false;
        pos.reset_to(EMPTY_GRID);
        assert!(!pos.active);
        assert_eq!(pos.move_count, 0);
        assert_eq!(pos.fullmove_number, 1);
        assert!(pos.white_to_move);
        assert_eq!(pos.piece_count(), 0);
    }

    #[test]
    fn test_mode_round_trip() {
        assert_eq!("setup".parse::<Mode>().unwrap(), Mode::Setup);
        assert_eq!(Mode::Play.to_string(), "play");
        assert!("edit".parse::<Mode>().is_err());
        assert_eq!(Mode::Setup.rows(), 10);
    }
}
