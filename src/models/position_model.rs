//! Position model - the authoritative board state behind the widget.

use tracing::{debug, warn};

use crate::domain::position::{EMPTY_GRID, START_GRID};
use crate::domain::{Cell, LastMove, Mode, Position, RulesEngine, Square};
use crate::error::BoardError;

/// Result of asking the model to play a move.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MoveOutcome {
    /// The engine accepted the move and the live position was replaced.
    Committed,
    /// The engine rejected the move; nothing changed.
    Illegal,
}

/// What a setup-mode drop did to the board.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SetupEdit {
    /// A piece was copied out of the piece box onto the board.
    Placed,
    /// A piece moved from one board square to another.
    Moved,
    /// A board piece was dropped on the piece box and discarded.
    Removed,
    Unchanged,
}

/// Owns the position, the board mode and the rules engine.
pub struct PositionModel {
    position: Position,
    mode: Mode,
    engine: Box<dyn RulesEngine>,
}

impl PositionModel {
    pub fn new(engine: Box<dyn RulesEngine>, mode: Mode) -> Self {
        let position = engine.create_empty_position();
        let mut model = Self {
            position,
            mode,
            engine,
        };
        model.set_mode(mode);
        model
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Setup mode always activates the board so the editor is usable.
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        if mode == Mode::Setup {
            self.position.active = true;
        }
    }

    pub fn is_active(&self) -> bool {
        self.position.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.position.active = active;
    }

    /// Replace the position from a FEN string. Parsing runs on a copy so a
    /// rejected FEN never touches the live position.
    pub fn set_position(&mut self, fen: &str) -> Result<(), BoardError> {
        let mut candidate = self.engine.clone_position(&self.position);
        match self.engine.set_position(&mut candidate, fen) {
            Ok(()) => {
                self.position = candidate;
                debug!(fen, "position replaced");
                Ok(())
            }
            Err(err) => {
                warn!(%err, "rejected FEN, keeping previous position");
                Err(err)
            }
        }
    }

    pub fn parse_square(&self, square: &str) -> Result<Square, BoardError> {
        self.engine.square_to_array_coordinates(square)
    }

    /// Ask the engine to play `from -> to` on a copy of the position and
    /// commit the copy only if the move is legal.
    pub fn move_piece(&mut self, from: Square, to: Square) -> MoveOutcome {
        let mut candidate = self.engine.clone_position(&self.position);
        if !self.engine.compute_move_result(&mut candidate, from, to) {
            debug!(%from, %to, "engine rejected move");
            return MoveOutcome::Illegal;
        }

        let live = &mut self.position;
        *live = Position {
            board: candidate.board,
            piece_box: live.piece_box,
            white_to_move: candidate.white_to_move,
            en_passant: candidate.en_passant,
            castling: candidate.castling,
            last_move: candidate.last_move.or(live.last_move),
            move_count: live.move_count + 1,
            halfmove_clock: candidate.halfmove_clock,
            fullmove_number: candidate.fullmove_number,
            active: candidate.active,
        };
        debug!(%from, %to, moves = live.move_count, "move committed");
        MoveOutcome::Committed
    }

    /// Play a move given in algebraic notation, e.g. `("e2", "e4")`.
    pub fn move_algebraic(&mut self, from: &str, to: &str) -> Result<MoveOutcome, BoardError> {
        let from = self.parse_square(from)?;
        let to = self.parse_square(to)?;
        Ok(self.move_piece(from, to))
    }

    pub fn clear(&mut self) {
        self.position.reset_to(EMPTY_GRID);
    }

    pub fn set_starting_position(&mut self) {
        self.position.reset_to(START_GRID);
    }

    /// Record the last move for highlighting. Both squares must be on the board.
    pub fn set_last_move(&mut self, from: &str, to: &str) -> Result<(), BoardError> {
        let (Square::Board(from_cell), Square::Board(to_cell)) =
            (self.parse_square(from)?, self.parse_square(to)?)
        else {
            return Err(BoardError::InvalidSquare(format!("{from}-{to}")));
        };
        self.position.last_move = Some(LastMove {
            from: from_cell,
            to: to_cell,
        });
        Ok(())
    }

    /// Free-placement edit used by setup mode; the rules engine is not consulted.
    pub fn apply_setup_drop(&mut self, source: Cell, target: Cell) -> SetupEdit {
        let Some(piece) = self.position.piece_at(source) else {
            return SetupEdit::Unchanged;
        };
        match (source, target) {
            (Cell::PieceBox { .. }, Cell::PieceBox { .. }) => SetupEdit::Unchanged,
            (Cell::PieceBox { .. }, Cell::Board(to)) => {
                self.position.set_board_piece(to, Some(piece));
                SetupEdit::Placed
            }
            (Cell::Board(from), Cell::PieceBox { .. }) => {
                self.position.set_board_piece(from, None);
                SetupEdit::Removed
            }
            (Cell::Board(from), Cell::Board(to)) if from == to => SetupEdit::Unchanged,
            (Cell::Board(from), Cell::Board(to)) => {
                self.position.set_board_piece(to, Some(piece));
                self.position.set_board_piece(from, None);
                SetupEdit::Moved
            }
        }
    }

    pub fn fen(&self) -> String {
        self.engine.to_fen(&self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BoardCell, Piece, PieceColor, PieceKind, ShakmatyEngine};

    const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    /// Scribbles over the copy it is given and then reports the move illegal.
    struct VandalEngine;

    impl RulesEngine for VandalEngine {
        fn set_position(&self, position: &mut Position, _fen: &str) -> Result<(), BoardError> {
            *position = Position::starting();
            Ok(())
        }

        fn compute_move_result(&self, position: &mut Position, _from: Square, _to: Square) -> bool {
            position.board = EMPTY_GRID;
            position.white_to_move = !position.white_to_move;
            position.castling = crate::domain::CastlingRights::NONE;
            position.en_passant = BoardCell::new(2, 2);
            false
        }

        fn to_fen(&self, _position: &Position) -> String {
            String::new()
        }
    }

    fn play_model() -> PositionModel {
        let mut model = PositionModel::new(Box::new(ShakmatyEngine), Mode::Play);
        model.set_position(START_FEN).unwrap();
        model
    }

    fn cell(s: &str) -> BoardCell {
        match s.parse::<Square>().unwrap() {
            Square::Board(c) => c,
            Square::PieceBox => unreachable!(),
        }
    }

    #[test]
    fn test_legal_move_commit() {
        let mut model = play_model();
        assert_eq!(model.move_algebraic("e2", "e4").unwrap(), MoveOutcome::Committed);
        let pos = model.position();
        assert_eq!(pos.board[4][4], Some(Piece::new(PieceColor::White, PieceKind::Pawn)));
        assert_eq!(pos.board[6][4], None);
        assert!(!pos.white_to_move);
        assert_eq!(pos.move_count, 1);
    }

    #[test]
    fn test_illegal_move_rejected() {
        let mut model = play_model();
        assert_eq!(model.move_algebraic("e2", "e5").unwrap(), MoveOutcome::Illegal);
        assert_eq!(model.position().board, Position::starting().board);
        assert_eq!(model.position().move_count, 0);
    }

    #[test]
    fn test_rejected_move_is_atomic() {
        let mut model = PositionModel::new(Box::new(VandalEngine), Mode::Play);
        model.set_position("anything").unwrap();
        let before = model.position().clone();
        assert_eq!(
            model.move_piece(Square::Board(cell("e2")), Square::Board(cell("e4"))),
            MoveOutcome::Illegal
        );
        assert_eq!(model.position(), &before);
    }

    #[test]
    fn test_invalid_fen_keeps_state() {
        let mut model = play_model();
        model.move_algebraic("e2", "e4").unwrap();
        let before = model.position().clone();
        assert!(model.set_position("rnbqkbnr/pppppppp/8").is_err());
        assert_eq!(model.position(), &before);
    }

    #[test]
    fn test_bad_square_names() {
        let mut model = play_model();
        assert!(model.move_algebraic("e9", "e4").is_err());
        assert!(model.set_last_move("e2", "piecebox").is_err());
        model.set_last_move("e2", "e4").unwrap();
        assert_eq!(
            model.position().last_move,
            Some(LastMove {
                from: cell("e2"),
                to: cell("e4")
            })
        );
    }

    #[test]
    fn test_clear_and_start_reset_metadata() {
        let mut model = play_model();
        model.move_algebraic("e2", "e4").unwrap();
        model.clear();
        assert_eq!(model.position().piece_count(), 0);
        assert_eq!(model.position().move_count, 0);
        assert!(model.position().last_move.is_none());
        model.set_starting_position();
        assert_eq!(model.position().board, Position::starting().board);
        assert!(model.position().white_to_move);
    }

    #[test]
    fn test_setup_mode_activates() {
        let mut model = play_model();
        model.set_active(false);
        model.set_mode(Mode::Setup);
        assert!(model.is_active());
    }

    #[test]
    fn test_setup_drop_from_piece_box_copies() {
        let mut model = PositionModel::new(Box::new(ShakmatyEngine), Mode::Setup);
        let piece_box = model.position().piece_box;
        let edit = model.apply_setup_drop(Cell::PieceBox { row: 0, col: 1 }, Cell::Board(cell("e4")));
        assert_eq!(edit, SetupEdit::Placed);
        assert_eq!(
            model.position().board_piece(cell("e4")),
            Some(Piece::new(PieceColor::White, PieceKind::Queen))
        );
        assert_eq!(model.position().piece_box, piece_box);
    }

    #[test]
    fn test_setup_drop_variants() {
        let mut model = PositionModel::new(Box::new(ShakmatyEngine), Mode::Setup);
        model.set_starting_position();
        let e2 = Cell::Board(cell("e2"));
        let e4 = Cell::Board(cell("e4"));
        let piece_box = Cell::PieceBox { row: 1, col: 0 };

        assert_eq!(model.apply_setup_drop(e2, e2), SetupEdit::Unchanged);
        assert_eq!(model.apply_setup_drop(e2, e4), SetupEdit::Moved);
        assert_eq!(model.position().board_piece(cell("e2")), None);
        assert_eq!(model.apply_setup_drop(e4, piece_box), SetupEdit::Removed);
        assert_eq!(model.position().board_piece(cell("e4")), None);
        assert_eq!(
            model.apply_setup_drop(piece_box, Cell::PieceBox { row: 0, col: 0 }),
            SetupEdit::Unchanged
        );
        assert_eq!(model.position().piece_count(), 31);
    }

    #[test]
    fn test_piece_box_drops_never_lower_board_count() {
        let mut model = PositionModel::new(Box::new(ShakmatyEngine), Mode::Setup);
        model.set_starting_position();
        let drops = [
            (Cell::PieceBox { row: 0, col: 5 }, "d4"),
            (Cell::PieceBox { row: 1, col: 0 }, "e1"),
            (Cell::PieceBox { row: 1, col: 2 }, "c4"),
            (Cell::PieceBox { row: 0, col: 7 }, "h5"),
            (Cell::PieceBox { row: 0, col: 1 }, "c4"),
        ];
        let mut count = model.position().piece_count();
        for (source, target) in drops {
            model.apply_setup_drop(source, Cell::Board(cell(target)));
            let now = model.position().piece_count();
            assert!(now >= count, "count dropped from {count} to {now}");
            count = now;
        }
        assert_eq!(count, 34);
    }
}
