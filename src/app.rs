//! Application setup and window creation.

use anyhow::Context as _;
use gpui::{App, Bounds, SharedString, TitlebarOptions, WindowBounds, WindowOptions, prelude::*, px, size};
use gpui_component::Root;

use crate::board::ChessBoard;
use crate::ui::views::ChessBoardView;

/// Open the main window around `board`.
pub fn run(cx: &mut App, board: ChessBoard, title: SharedString) -> anyhow::Result<()> {
    gpui_component::init(cx);

    let board = cx.new(|_| board);

    let bounds = Bounds::centered(None, size(px(900.0), px(600.0)), cx);
    cx.open_window(
        WindowOptions {
            window_bounds: Some(WindowBounds::Windowed(bounds)),
            titlebar: Some(TitlebarOptions {
                title: Some(title),
                ..Default::default()
            }),
            ..Default::default()
        },
        |window, cx| {
            let view = cx.new(|cx| ChessBoardView::new(board, cx));
            cx.new(|cx| Root::new(view, window, cx))
        },
    )
    .context("failed to open board window")?;
    Ok(())
}
