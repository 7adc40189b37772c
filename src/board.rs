//! The widget facade: one independent model / view / controller triple.

use image::RgbaImage;
use tracing::{info, warn};

use crate::config::BoardConfig;
use crate::domain::{Mode, PointerEvent, Position, RulesEngine, ShakmatyEngine};
use crate::error::BoardError;
use crate::models::{MoveOutcome, PositionModel};
use crate::ui::controller::{CursorStyle, InputController, InputOutcome};
use crate::ui::renderer::BoardRenderer;
use crate::ui::sprites::SpriteSheet;

/// Container box assumed until the host reports a real one.
pub const DEFAULT_CONTAINER_SIZE: u32 = 320;

pub struct ChessBoard {
    model: PositionModel,
    view: BoardRenderer,
    input: InputController,
    /// Explicit `(height, width)` from config or `resize`.
    requested: (Option<u32>, Option<u32>),
    container: (u32, u32),
}

impl ChessBoard {
    pub fn new(config: BoardConfig) -> Result<Self, BoardError> {
        Self::with_engine(config, Box::new(ShakmatyEngine))
    }

    pub fn with_engine(config: BoardConfig, engine: Box<dyn RulesEngine>) -> Result<Self, BoardError> {
        let options = config.render_options()?;
        let mut model = PositionModel::new(engine, config.mode);
        if let Err(err) = model.set_position(&config.fen) {
            warn!(%err, "configured FEN rejected, starting from an empty board");
        }

        let mut board = Self {
            model,
            view: BoardRenderer::new(options, SpriteSheet::placeholder()),
            input: InputController::new(),
            requested: (config.height, config.width),
            container: (DEFAULT_CONTAINER_SIZE, DEFAULT_CONTAINER_SIZE),
        };
        board.fit();
        info!(
            container = config.container.as_deref().unwrap_or("-"),
            mode = %config.mode,
            "board created"
        );
        Ok(board)
    }

    /// Rebuild the snapshot and push it to the visible surface.
    pub fn display(&mut self) {
        self.view.rebuild_snapshot(self.model.position(), self.input.drag());
        self.view.refresh();
    }

    pub fn flip(&mut self) {
        self.view.flip();
        self.redraw();
    }

    /// The surface the user sees.
    pub fn drawing_surface(&self) -> &RgbaImage {
        self.view.visible()
    }

    /// Visible surface encoded as PNG.
    pub fn frame_png(&self) -> Result<Vec<u8>, BoardError> {
        self.view.encode_png()
    }

    pub fn position_clear(&mut self) {
        self.model.clear();
        self.redraw();
    }

    pub fn position_start(&mut self) {
        self.model.set_starting_position();
        self.redraw();
    }

    /// Size the board to an explicit box; a `None` side follows the container.
    pub fn resize(&mut self, height: Option<u32>, width: Option<u32>) {
        self.requested = (height, width);
        self.fit();
    }

    /// Report the host's container box, used for any side not set explicitly.
    pub fn set_container_size(&mut self, height: u32, width: u32) {
        if self.container == (height, width) {
            return;
        }
        self.container = (height, width);
        if self.requested.0.is_none() || self.requested.1.is_none() {
            self.fit();
        }
    }

    pub fn set_active(&mut self, active: bool) {
        self.model.set_active(active);
    }

    /// Record the last move for highlighting; shown on the next redraw.
    pub fn set_last_move(&mut self, from: &str, to: &str) -> Result<(), BoardError> {
        self.model.set_last_move(from, to)
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.model.set_mode(mode);
        info!(%mode, "mode changed");
        self.fit();
    }

    /// Replace the position from FEN. On error the previous position stays.
    pub fn set_position(&mut self, fen: &str) -> Result<(), BoardError> {
        let result = self.model.set_position(fen);
        self.redraw();
        result
    }

    /// Play a move given as algebraic squares, e.g. `("e2", "e4")`.
    pub fn move_piece(&mut self, from: &str, to: &str) -> Result<MoveOutcome, BoardError> {
        let outcome = self.model.move_algebraic(from, to);
        self.redraw();
        outcome
    }

    pub fn set_sprite_sheet(&mut self, sheet: SpriteSheet) {
        self.view.set_sprite_sheet(sheet);
        self.redraw();
    }

    pub fn pointer_down(&mut self, event: PointerEvent) -> InputOutcome {
        self.input.pointer_down(event, &self.model, &mut self.view)
    }

    pub fn pointer_move(&mut self, event: PointerEvent) -> InputOutcome {
        self.input.pointer_move(event, &self.model, &mut self.view)
    }

    pub fn pointer_up(&mut self, event: PointerEvent) -> InputOutcome {
        self.input.pointer_up(event, &mut self.model, &mut self.view)
    }

    pub fn pointer_cancel(&mut self) -> InputOutcome {
        self.input.pointer_cancel(&self.model, &mut self.view)
    }

    pub fn position(&self) -> &Position {
        self.model.position()
    }

    pub fn mode(&self) -> Mode {
        self.model.mode()
    }

    pub fn is_active(&self) -> bool {
        self.model.is_active()
    }

    pub fn is_white_down(&self) -> bool {
        self.view.layout().white_down
    }

    pub fn square_size(&self) -> u32 {
        self.view.layout().square_size
    }

    pub fn cursor(&self) -> CursorStyle {
        self.input.cursor()
    }

    pub fn is_dragging(&self) -> bool {
        self.input.is_dragging()
    }

    pub fn fen(&self) -> String {
        self.model.fen()
    }

    /// Changes whenever the visible surface does.
    pub fn frame_generation(&self) -> u64 {
        self.view.generation()
    }

    fn fit(&mut self) {
        let height = self.requested.0.unwrap_or(self.container.0);
        let width = self.requested.1.unwrap_or(self.container.1);
        self.view.resize(height, width, self.model.mode());
        self.redraw();
    }

    /// Any drag in flight is dropped: its pixel coordinates are stale.
    fn redraw(&mut self) {
        self.input.pointer_cancel(&self.model, &mut self.view);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BoardCell, Piece, PieceColor, PieceKind};
    use crate::domain::position::{EMPTY_GRID, START_GRID};
    use crate::ui::theme::{LAST_MOVE_OUTLINE, SquareColors};

    fn board() -> ChessBoard {
        ChessBoard::new(BoardConfig::default()).unwrap()
    }

    #[test]
    fn test_resize_to_container() {
        let mut board = board();
        board.set_container_size(400, 320);
        assert_eq!(board.square_size(), 40);
        assert_eq!(board.drawing_surface().dimensions(), (320, 320));

        board.set_mode(Mode::Setup);
        assert_eq!(board.square_size(), 32);
        assert_eq!(board.drawing_surface().dimensions(), (256, 320));
        board.set_mode(Mode::Play);
        assert_eq!(board.square_size(), 40);
    }

    #[test]
    fn test_explicit_size_wins_over_container() {
        let mut board = board();
        board.resize(Some(480), Some(480));
        board.set_container_size(100, 100);
        assert_eq!(board.square_size(), 60);

        board.resize(None, Some(480));
        assert_eq!(board.square_size(), 12);
    }

    #[test]
    fn test_config_size_and_fen() {
        let config = BoardConfig {
            height: Some(240),
            width: Some(400),
            fen: "8/8/8/8/8/8/8/K6k b - - 0 1".to_string(),
            ..BoardConfig::default()
        };
        let board = ChessBoard::new(config).unwrap();
        assert_eq!(board.square_size(), 30);
        assert!(!board.position().white_to_move);
        assert_eq!(board.position().piece_count(), 2);
    }

    #[test]
    fn test_bad_config_fen_falls_back_to_empty_board() {
        let bad_fen = BoardConfig {
            fen: "not a fen".to_string(),
            ..BoardConfig::default()
        };
        let board = ChessBoard::new(bad_fen).unwrap();
        assert_eq!(board.position().board, EMPTY_GRID);
        assert_eq!(board.position().move_count, 0);
        assert_eq!(board.drawing_surface().dimensions(), (320, 320));
    }

    #[test]
    fn test_construction_rejects_bad_color() {
        let bad_color = BoardConfig {
            square_color_dark: "#12345".to_string(),
            ..BoardConfig::default()
        };
        assert!(matches!(ChessBoard::new(bad_color), Err(BoardError::InvalidColor(_))));
    }

    #[test]
    fn test_flip_is_involution() {
        let mut board = board();
        let original = board.drawing_surface().clone();
        board.flip();
        assert!(!board.is_white_down());
        assert_ne!(board.drawing_surface(), &original);
        board.flip();
        assert!(board.is_white_down());
        assert_eq!(board.drawing_surface(), &original);
    }

    #[test]
    fn test_move_scenarios() {
        let mut board = board();
        assert_eq!(board.move_piece("e2", "e5").unwrap(), MoveOutcome::Illegal);
        assert_eq!(board.position().board, START_GRID);
        assert_eq!(board.position().move_count, 0);

        assert_eq!(board.move_piece("e2", "e4").unwrap(), MoveOutcome::Committed);
        let wp = Piece::new(PieceColor::White, PieceKind::Pawn);
        assert_eq!(board.position().board[4][4], Some(wp));
        assert_eq!(board.position().board[6][4], None);
        assert!(!board.position().white_to_move);
        assert_eq!(board.position().move_count, 1);
        assert!(board.fen().starts_with("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b"));

        assert!(board.move_piece("e9", "e4").is_err());
    }

    #[test]
    fn test_invalid_fen_keeps_position() {
        let mut board = board();
        board.move_piece("d2", "d4").unwrap();
        let before = board.position().clone();
        let generation = board.frame_generation();
        assert!(board.set_position("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNZ w KQkq - 0 1").is_err());
        assert_eq!(board.position(), &before);
        assert!(board.frame_generation() > generation);
    }

    #[test]
    fn test_clear_and_start() {
        let mut board = board();
        board.position_clear();
        assert_eq!(board.position().piece_count(), 0);
        let colors = SquareColors::default();
        assert_eq!(*board.drawing_surface().get_pixel(300, 300), colors.light);
        board.position_start();
        assert_eq!(board.position().board, START_GRID);
    }

    #[test]
    fn test_last_move_shown_on_next_redraw() {
        let config = BoardConfig {
            highlight_move: true,
            ..BoardConfig::default()
        };
        let mut board = ChessBoard::new(config).unwrap();
        board.set_last_move("e2", "e4").unwrap();
        // e4 is screen (4, 4): top-left pixel of its rect
        assert_ne!(*board.drawing_surface().get_pixel(160, 160), LAST_MOVE_OUTLINE);
        board.display();
        assert_eq!(*board.drawing_surface().get_pixel(160, 160), LAST_MOVE_OUTLINE);
        assert_eq!(
            board.position().last_move.map(|m| m.from),
            Some(BoardCell { row: 6, col: 4 })
        );
        assert!(board.set_last_move("e2", "piecebox").is_err());
    }

    #[test]
    fn test_set_active_gates_input() {
        let mut board = board();
        board.set_active(false);
        assert!(!board.is_active());
        let e2 = PointerEvent::mouse(180.0, 260.0);
        assert!(matches!(board.pointer_down(e2), InputOutcome::Ignored(_)));
        board.set_mode(Mode::Setup);
        assert!(board.is_active());
    }

    #[test]
    fn test_drag_through_facade() {
        let mut board = board();
        let e2 = PointerEvent::mouse(180.0, 260.0);
        let e4 = PointerEvent::mouse(180.0, 180.0);
        assert_eq!(board.pointer_down(e2), InputOutcome::DragStarted);
        assert!(board.is_dragging());
        assert_eq!(board.cursor(), CursorStyle::Move);
        board.pointer_move(e4);
        assert_eq!(board.pointer_up(e4), InputOutcome::Committed);
        assert_eq!(board.position().move_count, 1);

        // a geometry change drops a drag in flight
        let e7 = PointerEvent::mouse(180.0, 60.0);
        assert_eq!(board.pointer_down(e7), InputOutcome::DragStarted);
        board.set_container_size(480, 480);
        assert!(!board.is_dragging());
    }

    #[test]
    fn test_lock_during_drag_discards_drop() {
        let mut board = board();
        let e2 = PointerEvent::mouse(180.0, 260.0);
        let e4 = PointerEvent::mouse(180.0, 180.0);
        assert_eq!(board.pointer_down(e2), InputOutcome::DragStarted);
        board.pointer_move(e4);
        board.set_active(false);
        assert!(matches!(board.pointer_up(e4), InputOutcome::Ignored(_)));
        assert!(!board.is_dragging());
        assert_eq!(board.position().move_count, 0);
        assert_eq!(board.position().board, START_GRID);
    }

    #[test]
    fn test_instances_are_independent() {
        let mut a = board();
        let b = board();
        a.move_piece("g1", "f3").unwrap();
        a.flip();
        assert_eq!(b.position().board, START_GRID);
        assert!(b.is_white_down());
    }

    #[test]
    fn test_frame_png() {
        let board = board();
        let png = board.frame_png().unwrap();
        let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
        assert_eq!(&decoded, board.drawing_surface());
    }
}
