pub mod chess;
pub mod event;
pub mod position;
pub mod rules;
pub mod square;

pub use chess::{Piece, PieceColor, PieceKind};
pub use event::PointerEvent;
pub use position::{CastlingRights, LastMove, Mode, Position};
pub use rules::{RulesEngine, ShakmatyEngine};
pub use square::{BoardCell, Cell, Square};
