//! Pointer-driven drag state machine.
//!
//! `Idle -> Dragging` on a down event over a movable piece, `Dragging ->
//! Dragging` on every move, and back to `Idle` on up (commit) or cancel
//! (abort). While dragging, only small regions of the visible surface are
//! repainted; the snapshot stays the restore source until the gesture ends.

use tracing::{debug, warn};

use crate::domain::{Cell, Mode, PointerEvent, Square};
use crate::models::{DragState, MoveOutcome, PositionModel, SetupEdit};
use crate::ui::renderer::BoardRenderer;
use crate::ui::theme::hover_color;

/// Cursor hint for hosts that show a mouse pointer.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum CursorStyle {
    #[default]
    Default,
    Move,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum IgnoreReason {
    InactiveBoard,
    Unrecognized,
    EmptyCell,
    WrongSide,
    NotDragging,
    OffBoard,
}

/// The transition a handler took.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum InputOutcome {
    Ignored(IgnoreReason),
    DragStarted,
    Dragged,
    /// The pointer left the 8x8 board; the drag stays alive.
    HoverOffBoard,
    Committed,
    /// The rules engine refused the move.
    Rejected,
    OutOfBoundsDrop,
    SetupEdit(SetupEdit),
    Aborted,
}

#[derive(Debug, Default)]
pub struct InputController {
    drag: Option<DragState>,
    cursor: CursorStyle,
}

impl InputController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor(&self) -> CursorStyle {
        self.cursor
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn drag(&self) -> Option<&DragState> {
        self.drag.as_ref()
    }

    pub fn pointer_down(
        &mut self,
        event: PointerEvent,
        model: &PositionModel,
        view: &mut BoardRenderer,
    ) -> InputOutcome {
        let Some((x, y)) = event.position() else {
            warn!("ignoring unrecognized pointer-down event");
            return InputOutcome::Ignored(IgnoreReason::Unrecognized);
        };

        if self.drag.is_some() {
            debug!("pointer down during drag, aborting stale drag");
            self.abort(model, view);
        }

        if !model.is_active() {
            return InputOutcome::Ignored(IgnoreReason::InactiveBoard);
        }

        let Some(cell) = view.layout().screen_to_logical(x, y) else {
            return InputOutcome::Ignored(IgnoreReason::OffBoard);
        };

        let Some(piece) = model.position().piece_at(cell) else {
            self.set_cursor(event, CursorStyle::Default);
            return InputOutcome::Ignored(IgnoreReason::EmptyCell);
        };

        if model.mode() == Mode::Play && piece.color != model.position().side_to_move() {
            self.set_cursor(event, CursorStyle::Default);
            return InputOutcome::Ignored(IgnoreReason::WrongSide);
        }

        let drag = DragState::new(piece, cell, (x, y));
        view.rebuild_snapshot(model.position(), Some(&drag));
        self.drag = Some(drag);
        self.set_cursor(event, CursorStyle::Move);
        debug!(piece = %piece, source = ?cell, "drag started");
        InputOutcome::DragStarted
    }

    pub fn pointer_move(
        &mut self,
        event: PointerEvent,
        model: &PositionModel,
        view: &mut BoardRenderer,
    ) -> InputOutcome {
        let Some((x, y)) = event.position() else {
            return InputOutcome::Ignored(IgnoreReason::Unrecognized);
        };
        let Some(drag) = self.drag.as_mut() else {
            return InputOutcome::Ignored(IgnoreReason::NotDragging);
        };
        // Deactivated mid-drag: stop drawing, the pointer-up clears the frame.
        if !model.is_active() {
            return InputOutcome::Ignored(IgnoreReason::InactiveBoard);
        }
        let layout = *view.layout();
        let size = layout.square_size;

        // Erase last frame's hover highlight and drag sprite.
        let (prev_x, prev_y) = drag.pointer();
        if let Some((row, col)) = layout.screen_board_cell(prev_x, prev_y) {
            view.restore_visible(layout.neighbourhood(row, col));
        }

        drag.pointer_x = x;
        drag.pointer_y = y;
        let Some((row, col)) = layout.screen_board_cell(x, y) else {
            return InputOutcome::HoverOffBoard;
        };

        view.fill_visible(layout.screen_rect(row, col), hover_color(row, col));

        if !drag.source_cleared && drag.from_board() {
            view.restore_visible(layout.logical_to_screen_rect(drag.source));
            drag.source_cleared = true;
        }

        let hovered = layout.screen_to_board(row, col);
        if Cell::Board(hovered) != drag.source {
            if let Some(occupant) = model.position().board_piece(hovered) {
                let rect = layout.screen_rect(row, col);
                view.draw_piece_visible(occupant, rect.x, rect.y, None);
            }
        }

        let half = size as f32 / 2.0;
        let left = (x - half) as i64;
        let top = (y - half) as i64;
        let max_height = (layout.mode == Mode::Setup && y > size as f32 * 7.5)
            .then(|| (layout.board_extent() as i64 - top).max(0) as u32);
        view.draw_piece_visible(drag.piece, left, top, max_height);

        InputOutcome::Dragged
    }

    pub fn pointer_up(
        &mut self,
        event: PointerEvent,
        model: &mut PositionModel,
        view: &mut BoardRenderer,
    ) -> InputOutcome {
        let Some((x, y)) = event.position() else {
            warn!("ignoring unrecognized pointer-up event");
            return InputOutcome::Ignored(IgnoreReason::Unrecognized);
        };
        self.set_cursor(event, CursorStyle::Default);
        let Some(drag) = self.drag.take() else {
            return InputOutcome::Ignored(IgnoreReason::NotDragging);
        };
        if !model.is_active() {
            debug!(source = ?drag.source, "drop on inactive board discarded");
            view.rebuild_snapshot(model.position(), None);
            view.refresh();
            return InputOutcome::Ignored(IgnoreReason::InactiveBoard);
        }

        let target = view.layout().screen_to_logical(x, y);
        let outcome = match (model.mode(), drag.source, target) {
            (_, _, None) => InputOutcome::OutOfBoundsDrop,
            (Mode::Setup, source, Some(target)) => {
                InputOutcome::SetupEdit(model.apply_setup_drop(source, target))
            }
            (Mode::Play, Cell::Board(from), Some(Cell::Board(to))) => {
                match model.move_piece(Square::Board(from), Square::Board(to)) {
                    MoveOutcome::Committed => InputOutcome::Committed,
                    MoveOutcome::Illegal => InputOutcome::Rejected,
                }
            }
            (Mode::Play, _, Some(_)) => InputOutcome::OutOfBoundsDrop,
        };
        debug!(?outcome, source = ?drag.source, ?target, "drag ended");

        view.rebuild_snapshot(model.position(), None);
        view.refresh();
        outcome
    }

    /// Abort any drag and redraw from the model. Safe to call when idle.
    pub fn pointer_cancel(&mut self, model: &PositionModel, view: &mut BoardRenderer) -> InputOutcome {
        if self.abort(model, view) {
            InputOutcome::Aborted
        } else {
            InputOutcome::Ignored(IgnoreReason::NotDragging)
        }
    }

    fn abort(&mut self, model: &PositionModel, view: &mut BoardRenderer) -> bool {
        let was_dragging = self.drag.take().is_some();
        if was_dragging {
            debug!("drag aborted");
        }
        view.rebuild_snapshot(model.position(), None);
        view.refresh();
        was_dragging
    }

    fn set_cursor(&mut self, event: PointerEvent, cursor: CursorStyle) {
        if event.is_mouse() {
            self.cursor = cursor;
        }
    }
}
