//! Board view - shows the widget's visible surface and feeds it mouse input.

use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;

use gpui::{
    Context, CursorStyle as GpuiCursor, Entity, Image, ImageFormat, MouseButton, MouseDownEvent,
    MouseMoveEvent, MouseUpEvent, Pixels, Point, Subscription, Window, canvas, div, img,
    prelude::*, px, rgb,
};
use gpui_component::resizable::{h_resizable, resizable_panel};
use tracing::warn;

use crate::board::ChessBoard;
use crate::domain::PointerEvent;
use crate::ui::controller::CursorStyle;
use crate::ui::theme::{BOARD_PADDING, INITIAL_LEFT_PANEL, INITIAL_RIGHT_PANEL, PANEL_BG};
use crate::ui::views::render_controls_panel;

/// The main view; observes the board entity and repaints when it changes.
pub struct ChessBoardView {
    board: Entity<ChessBoard>,
    /// Last uploaded frame and the board generation it was encoded from.
    frame: Option<(u64, Arc<Image>)>,
    /// Window position of the board panel, updated on every layout pass.
    origin: Rc<Cell<Point<Pixels>>>,
    _subscription: Subscription,
}

impl ChessBoardView {
    pub fn new(board: Entity<ChessBoard>, cx: &mut Context<Self>) -> Self {
        let _subscription = cx.observe(&board, |_, _, cx| cx.notify());
        Self {
            board,
            frame: None,
            origin: Rc::new(Cell::new(Point::default())),
            _subscription,
        }
    }

    fn current_frame(&mut self, cx: &Context<Self>) -> Option<Arc<Image>> {
        let board = self.board.read(cx);
        let generation = board.frame_generation();
        match &self.frame {
            Some((cached, image)) if *cached == generation => return Some(image.clone()),
            _ => {}
        }
        match board.frame_png() {
            Ok(bytes) => {
                let image = Arc::new(Image::from_bytes(ImageFormat::Png, bytes));
                self.frame = Some((generation, image.clone()));
                Some(image)
            }
            Err(err) => {
                warn!(%err, "failed to encode board frame");
                self.frame.as_ref().map(|(_, image)| image.clone())
            }
        }
    }
}

/// Window position to board-surface coordinates.
fn to_surface(origin: &Rc<Cell<Point<Pixels>>>, position: Point<Pixels>) -> (f32, f32) {
    let origin = origin.get();
    let x: f32 = (position.x - origin.x).into();
    let y: f32 = (position.y - origin.y).into();
    (x - BOARD_PADDING, y - BOARD_PADDING)
}

impl Render for ChessBoardView {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let frame = self.current_frame(cx);

        let board_down = self.board.clone();
        let board_move = self.board.clone();
        let board_up = self.board.clone();
        let board_leave = self.board.clone();
        let board_measure = self.board.clone();
        let origin_down = self.origin.clone();
        let origin_move = self.origin.clone();
        let origin_up = self.origin.clone();
        let origin_measure = self.origin.clone();

        let state = self.board.read(cx);
        let (width, height) = state.drawing_surface().dimensions();
        let cursor = match state.cursor() {
            CursorStyle::Default => GpuiCursor::Arrow,
            CursorStyle::Move => GpuiCursor::ClosedHand,
        };

        let surface = div()
            .flex_shrink_0()
            .w(px(width as f32))
            .h(px(height as f32))
            .overflow_hidden()
            .when_some(frame, |el, frame| el.child(img(frame).w(px(width as f32)).h(px(height as f32))));

        let board_panel_content = div()
            .id("board-panel")
            .relative()
            .size_full()
            .overflow_hidden()
            .bg(rgb(PANEL_BG))
            .p(px(BOARD_PADDING))
            .cursor(cursor)
            .child(surface)
            .on_mouse_down(MouseButton::Left, move |ev: &MouseDownEvent, _window, cx| {
                let (x, y) = to_surface(&origin_down, ev.position);
                board_down.update(cx, |board, cx| {
                    board.pointer_down(PointerEvent::mouse(x, y));
                    cx.notify();
                });
            })
            .on_mouse_move(move |ev: &MouseMoveEvent, _window, cx| {
                let (x, y) = to_surface(&origin_move, ev.position);
                board_move.update(cx, |board, cx| {
                    if board.is_dragging() {
                        board.pointer_move(PointerEvent::mouse(x, y));
                        cx.notify();
                    }
                });
            })
            .on_mouse_up(MouseButton::Left, move |ev: &MouseUpEvent, _window, cx| {
                let (x, y) = to_surface(&origin_up, ev.position);
                board_up.update(cx, |board, cx| {
                    board.pointer_up(PointerEvent::mouse(x, y));
                    cx.notify();
                });
            })
            // Leaving the panel aborts a drag in flight
            .on_hover(move |hovered: &bool, _window, cx| {
                if !*hovered {
                    board_leave.update(cx, |board, cx| {
                        if board.is_dragging() {
                            board.pointer_cancel();
                            cx.notify();
                        }
                    });
                }
            });

        // Canvas to measure actual panel size
        let measure_canvas = canvas(
            move |bounds, _window, cx| {
                origin_measure.set(bounds.origin);
                let padding = 2.0 * BOARD_PADDING;
                let width: f32 = bounds.size.width.into();
                let height: f32 = bounds.size.height.into();
                let available = |side: f32| (side - padding).max(0.0) as u32;
                board_measure.update(cx, |board, cx| {
                    let before = board.frame_generation();
                    board.set_container_size(available(height), available(width));
                    if board.frame_generation() != before {
                        cx.notify();
                    }
                });
            },
            |_, _, _, _| {},
        )
        .absolute()
        .top_0()
        .left_0()
        .size_full();

        let board_panel_with_measure = div()
            .relative()
            .size_full()
            .child(measure_canvas)
            .child(board_panel_content);

        let controls = render_controls_panel(&self.board, cx);

        div().size_full().font_family("Berkeley Mono").child(
            h_resizable("board-layout")
                .child(
                    resizable_panel()
                        .size(px(INITIAL_LEFT_PANEL))
                        .size_range(px(200.)..px(1600.))
                        .child(board_panel_with_measure),
                )
                .child(
                    resizable_panel()
                        .size(px(INITIAL_RIGHT_PANEL))
                        .size_range(px(150.)..Pixels::MAX)
                        .child(controls),
                ),
        )
    }
}
