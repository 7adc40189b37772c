//! Rules engine seam. The widget never decides legality itself; it hands a
//! copy of the position to a [`RulesEngine`] and commits whatever comes back.

use std::num::NonZeroU32;

use shakmaty::fen::Fen;
use shakmaty::{
    Bitboard, Board, CastlingMode, Chess, Color as SColor, EnPassantMode, File, FromSetup, Move,
    Position as _, PositionError, Role, Setup,
};
use tracing::warn;

use crate::domain::chess::{from_square, piece_to_shakmaty, shakmaty_to_piece, to_square};
use crate::domain::position::{CastlingRights, EMPTY_GRID, Grid, LastMove, Position};
use crate::domain::square::{BoardCell, Square};
use crate::error::BoardError;

/// Operations the board needs from a chess rules implementation.
///
/// All calls are synchronous. `compute_move_result` may only mutate the copy
/// it is given; the caller discards that copy when the move is illegal.
pub trait RulesEngine {
    fn create_empty_position(&self) -> Position {
        Position::empty()
    }

    /// Replace `position` with the one described by `fen`. On error `position`
    /// is left unchanged.
    fn set_position(&self, position: &mut Position, fen: &str) -> Result<(), BoardError>;

    /// Apply `from -> to` to `position` in place if legal and report legality.
    /// Clears `position.active` when the move ends the game.
    fn compute_move_result(&self, position: &mut Position, from: Square, to: Square) -> bool;

    fn clone_position(&self, position: &Position) -> Position {
        position.clone()
    }

    fn square_to_array_coordinates(&self, square: &str) -> Result<Square, BoardError> {
        square.parse()
    }

    fn to_fen(&self, position: &Position) -> String;
}

/// Rules engine backed by shakmaty.
#[derive(Clone, Copy, Debug, Default)]
pub struct ShakmatyEngine;

fn castling_rooks(rights: &CastlingRights) -> [(shakmaty::Square, bool); 4] {
    [
        (shakmaty::Square::H1, rights.white_king_side),
        (shakmaty::Square::A1, rights.white_queen_side),
        (shakmaty::Square::H8, rights.black_king_side),
        (shakmaty::Square::A8, rights.black_queen_side),
    ]
}

fn to_setup(position: &Position) -> Setup {
    let mut board = Board::empty();
    for (row, cells) in position.board.iter().enumerate() {
        for (col, cell) in cells.iter().enumerate() {
            if let Some(piece) = cell {
                board.set_piece_at(to_square(row, col), piece_to_shakmaty(*piece));
            }
        }
    }

    let mut castling_rights = Bitboard::EMPTY;
    for (sq, allowed) in castling_rooks(&position.castling) {
        if allowed {
            castling_rights |= Bitboard::from_square(sq);
        }
    }

    let mut setup = Setup::empty();
    setup.board = board;
    setup.turn = if position.white_to_move {
        SColor::White
    } else {
        SColor::Black
    };
    setup.castling_rights = castling_rights;
    setup.ep_square = position.en_passant.map(|c| to_square(c.row, c.col));
    setup.halfmoves = position.halfmove_clock;
    setup.fullmoves = NonZeroU32::new(position.fullmove_number).unwrap_or(NonZeroU32::MIN);
    setup
}

fn grid_from_board(board: &Board) -> Grid {
    let mut grid = EMPTY_GRID;
    for sq in shakmaty::Square::ALL {
        if let Some(piece) = board.piece_at(sq) {
            let (row, col) = from_square(sq);
            grid[row][col] = Some(shakmaty_to_piece(piece));
        }
    }
    grid
}

fn castling_from_bitboard(rights: Bitboard) -> CastlingRights {
    CastlingRights {
        white_king_side: rights.contains(shakmaty::Square::H1),
        white_queen_side: rights.contains(shakmaty::Square::A1),
        black_king_side: rights.contains(shakmaty::Square::H8),
        black_queen_side: rights.contains(shakmaty::Square::A8),
    }
}

fn board_cell(sq: shakmaty::Square) -> BoardCell {
    let (row, col) = from_square(sq);
    BoardCell { row, col }
}

/// Build a playable shakmaty position, tolerating stale castling rights and
/// en-passant squares the way a free setup editor produces them.
fn to_chess(position: &Position) -> Option<Chess> {
    Chess::from_setup(to_setup(position), CastlingMode::Standard)
        .or_else(PositionError::ignore_invalid_castling_rights)
        .or_else(PositionError::ignore_invalid_ep_square)
        .ok()
}

/// Find the legal move the user meant by dragging `from` onto `to`.
fn find_move(chess: &Chess, from: shakmaty::Square, to: shakmaty::Square) -> Option<Move> {
    for m in &chess.legal_moves() {
        let (move_from, move_to) = match m {
            Move::Normal { from, to, .. } => (*from, *to),
            Move::EnPassant { from, to, .. } => (*from, *to),
            Move::Castle { king, rook, .. } => {
                // For castling, user drags king to destination (g1/g8 or c1/c8)
                let king_dest = if rook.file() == File::H {
                    shakmaty::Square::from_coords(File::G, rook.rank())
                } else {
                    shakmaty::Square::from_coords(File::C, rook.rank())
                };
                (*king, king_dest)
            }
            Move::Put { .. } => continue,
        };

        if move_from == from && move_to == to {
            // For pawn promotion, auto-promote to queen
            let chosen = match m {
                Move::Normal {
                    role: Role::Pawn,
                    from,
                    to,
                    capture,
                    promotion: Some(role),
                } if *role != Role::Queen => Move::Normal {
                    role: Role::Pawn,
                    from: *from,
                    to: *to,
                    capture: *capture,
                    promotion: Some(Role::Queen),
                },
                _ => m.clone(),
            };
            return Some(chosen);
        }
    }
    None
}

impl RulesEngine for ShakmatyEngine {
    fn set_position(&self, position: &mut Position, fen: &str) -> Result<(), BoardError> {
        let parsed: Fen = fen.trim().parse().map_err(|e: shakmaty::fen::ParseFenError| {
            BoardError::InvalidFen {
                fen: fen.to_string(),
                reason: e.to_string(),
            }
        })?;
        let setup = parsed.into_setup();

        position.board = grid_from_board(&setup.board);
        position.white_to_move = setup.turn == SColor::White;
        position.castling = castling_from_bitboard(setup.castling_rights);
        position.en_passant = setup.ep_square.map(board_cell);
        position.last_move = None;
        position.move_count = 0;
        position.halfmove_clock = setup.halfmoves;
        position.fullmove_number = setup.fullmoves.get();
        Ok(())
    }

    fn compute_move_result(&self, position: &mut Position, from: Square, to: Square) -> bool {
        let (Square::Board(from), Square::Board(to)) = (from, to) else {
            return false;
        };
        let Some(chess) = to_chess(position) else {
            return false;
        };
        let Some(m) = find_move(&chess, to_square(from.row, from.col), to_square(to.row, to.col))
        else {
            return false;
        };
        let Ok(next) = chess.play(m) else {
            return false;
        };

        let game_over = next.is_game_over();
        let setup = next.to_setup(EnPassantMode::Always);
        position.board = grid_from_board(&setup.board);
        position.white_to_move = setup.turn == SColor::White;
        position.castling = castling_from_bitboard(setup.castling_rights);
        position.en_passant = setup.ep_square.map(board_cell);
        position.last_move = Some(LastMove { from, to });
        position.halfmove_clock = setup.halfmoves;
        position.fullmove_number = setup.fullmoves.get();
        if game_over {
            position.active = false;
        }
        true
    }

    fn to_fen(&self, position: &Position) -> String {
        let setup = to_setup(position);
        match Fen::try_from_setup(setup.clone()) {
            Ok(fen) => fen.to_string(),
            Err(err) => {
                // Setup fields FEN cannot carry: keep placement, turn and counters.
                warn!(?err, "lossy FEN export");
                let turn = if position.white_to_move { 'w' } else { 'b' };
                format!(
                    "{} {} - - {} {}",
                    setup.board, turn, setup.halfmoves, setup.fullmoves
                )
            }
        }
    }
}
