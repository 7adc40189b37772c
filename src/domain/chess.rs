//! Pure chess domain types and utilities.
//! No GPUI dependencies - this is the domain layer.

use std::fmt;
use std::str::FromStr;

use shakmaty::{Color as SColor, File, Rank, Role};

use crate::error::BoardError;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum PieceKind {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::King,
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
        PieceKind::Pawn,
    ];

    pub fn letter(self) -> char {
        match self {
            PieceKind::King => 'k',
            PieceKind::Queen => 'q',
            PieceKind::Rook => 'r',
            PieceKind::Bishop => 'b',
            PieceKind::Knight => 'n',
            PieceKind::Pawn => 'p',
        }
    }

    fn from_letter(c: char) -> Option<Self> {
        Some(match c {
            'k' => PieceKind::King,
            'q' => PieceKind::Queen,
            'r' => PieceKind::Rook,
            'b' => PieceKind::Bishop,
            'n' => PieceKind::Knight,
            'p' => PieceKind::Pawn,
            _ => return None,
        })
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum PieceColor {
    White,
    Black,
}

impl PieceColor {
    pub fn letter(self) -> char {
        match self {
            PieceColor::White => 'w',
            PieceColor::Black => 'b',
        }
    }
}

/// A piece as stored on the board, written as a two-character code such as
/// `wk` or `bp`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Piece {
    pub color: PieceColor,
    pub kind: PieceKind,
}

impl Piece {
    pub const fn new(color: PieceColor, kind: PieceKind) -> Self {
        Self { color, kind }
    }

    pub fn code(&self) -> String {
        format!("{}{}", self.color.letter(), self.kind.letter())
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.color.letter(), self.kind.letter())
    }
}

impl FromStr for Piece {
    type Err = BoardError;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        let mut chars = code.chars();
        let color = match chars.next() {
            Some('w') => PieceColor::White,
            Some('b') => PieceColor::Black,
            _ => return Err(BoardError::InvalidPieceCode(code.to_string())),
        };
        let kind = chars
            .next()
            .and_then(PieceKind::from_letter)
            .ok_or_else(|| BoardError::InvalidPieceCode(code.to_string()))?;
        if chars.next().is_some() {
            return Err(BoardError::InvalidPieceCode(code.to_string()));
        }
        Ok(Piece { color, kind })
    }
}

/// Convert row/col (0-indexed, row 0 = rank 8) to shakmaty Square
pub fn to_square(row: usize, col: usize) -> shakmaty::Square {
    let file = File::new(col as u32);
    let rank = Rank::new(7 - row as u32); // row 0 = rank 8, row 7 = rank 1
    shakmaty::Square::from_coords(file, rank)
}

/// Inverse of [`to_square`]
pub fn from_square(sq: shakmaty::Square) -> (usize, usize) {
    (7 - u32::from(sq.rank()) as usize, u32::from(sq.file()) as usize)
}

/// Convert shakmaty piece to our domain Piece
pub fn shakmaty_to_piece(piece: shakmaty::Piece) -> Piece {
    let kind = match piece.role {
        Role::Pawn => PieceKind::Pawn,
        Role::Knight => PieceKind::Knight,
        Role::Bishop => PieceKind::Bishop,
        Role::Rook => PieceKind::Rook,
        Role::Queen => PieceKind::Queen,
        Role::King => PieceKind::King,
    };
    let color = match piece.color {
        SColor::White => PieceColor::White,
        SColor::Black => PieceColor::Black,
    };
    Piece { kind, color }
}

/// Convert our domain Piece to a shakmaty piece
pub fn piece_to_shakmaty(piece: Piece) -> shakmaty::Piece {
    let role = match piece.kind {
        PieceKind::Pawn => Role::Pawn,
        PieceKind::Knight => Role::Knight,
        PieceKind::Bishop => Role::Bishop,
        PieceKind::Rook => Role::Rook,
        PieceKind::Queen => Role::Queen,
        PieceKind::King => Role::King,
    };
    let color = match piece.color {
        PieceColor::White => SColor::White,
        PieceColor::Black => SColor::Black,
    };
    shakmaty::Piece { color, role }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piece_code_parse() {
        let piece: Piece = "wn".parse().unwrap();
        assert_eq!(piece, Piece::new(PieceColor::White, PieceKind::Knight));
        assert_eq!(piece.code(), "wn");
        assert_eq!("bp".parse::<Piece>().unwrap().to_string(), "bp");
    }

    #[test]
    fn test_piece_code_rejects_garbage() {
        assert!("".parse::<Piece>().is_err());
        assert!("w".parse::<Piece>().is_err());
        assert!("xk".parse::<Piece>().is_err());
        assert!("wz".parse::<Piece>().is_err());
        assert!("wkk".parse::<Piece>().is_err());
    }

    #[test]
    fn test_square_conversion() {
        assert_eq!(to_square(0, 0), shakmaty::Square::A8);
        assert_eq!(to_square(7, 7), shakmaty::Square::H1);
        assert_eq!(to_square(4, 4), shakmaty::Square::E4);
        assert_eq!(from_square(shakmaty::Square::E2), (6, 4));
    }
}
