//! Side panel with board commands and the current position as FEN.

use gpui::{App, Entity, SharedString, div, prelude::*, px, rgb};
use gpui_component::button::{Button, ButtonVariants};

use crate::board::ChessBoard;
use crate::domain::Mode;
use crate::ui::theme::{BOARD_PADDING, BORDER_COLOR, PANEL_BG, SIDE_PANEL_BG, TEXT_PRIMARY, TEXT_SECONDARY};

const STATUS_OK: u32 = 0x4ade80;
const STATUS_OFF: u32 = 0xf87171;

pub fn render_controls_panel(board: &Entity<ChessBoard>, cx: &App) -> impl IntoElement {
    let state = board.read(cx);
    let mode = state.mode();
    let active = state.is_active();
    let fen = SharedString::from(state.fen());
    let to_move = if state.position().white_to_move {
        "White to move"
    } else {
        "Black to move"
    };
    let details = SharedString::from(format!(
        "{} · {} px squares · {}",
        mode,
        state.square_size(),
        if state.is_white_down() { "white down" } else { "black down" }
    ));

    let board_flip = board.clone();
    let board_start = board.clone();
    let board_clear = board.clone();
    let board_mode = board.clone();
    let board_active = board.clone();

    let buttons = div()
        .flex()
        .flex_wrap()
        .gap_2()
        .child(
            Button::new("flip-board")
                .label("Flip")
                .compact()
                .on_click(move |_, _, cx| {
                    board_flip.update(cx, |board, cx| {
                        board.flip();
                        cx.notify();
                    });
                }),
        )
        .child(
            Button::new("start-position")
                .label("Start")
                .compact()
                .on_click(move |_, _, cx| {
                    board_start.update(cx, |board, cx| {
                        board.position_start();
                        cx.notify();
                    });
                }),
        )
        .child(
            Button::new("clear-position")
                .label("Clear")
                .compact()
                .on_click(move |_, _, cx| {
                    board_clear.update(cx, |board, cx| {
                        board.position_clear();
                        cx.notify();
                    });
                }),
        )
        .child(
            Button::new("toggle-mode")
                .label(match mode {
                    Mode::Play => "Setup",
                    Mode::Setup => "Play",
                })
                .primary()
                .compact()
                .on_click(move |_, _, cx| {
                    board_mode.update(cx, |board, cx| {
                        let next = match board.mode() {
                            Mode::Play => Mode::Setup,
                            Mode::Setup => Mode::Play,
                        };
                        board.set_mode(next);
                        cx.notify();
                    });
                }),
        )
        .child(
            Button::new("toggle-active")
                .label(if active { "Lock" } else { "Unlock" })
                .compact()
                .on_click(move |_, _, cx| {
                    board_active.update(cx, |board, cx| {
                        let active = board.is_active();
                        board.set_active(!active);
                        cx.notify();
                    });
                }),
        );

    let pane = div()
        .flex_1()
        .min_h_0()
        .flex()
        .flex_col()
        .bg(rgb(SIDE_PANEL_BG))
        .border_1()
        .border_color(rgb(BORDER_COLOR))
        .rounded_md()
        .overflow_hidden()
        .child(
            div()
                .flex_shrink_0()
                .flex()
                .items_center()
                .justify_between()
                .px_4()
                .py_2()
                .border_b_1()
                .border_color(rgb(BORDER_COLOR))
                .child(
                    div()
                        .text_color(rgb(TEXT_PRIMARY))
                        .font_weight(gpui::FontWeight::SEMIBOLD)
                        .child("Board"),
                )
                .child(
                    div()
                        .text_xs()
                        .text_color(rgb(if active { STATUS_OK } else { STATUS_OFF }))
                        .child(if active { to_move } else { "Inactive" }),
                ),
        )
        .child(div().p_4().child(buttons))
        .child(
            div()
                .px_4()
                .text_xs()
                .text_color(rgb(TEXT_SECONDARY))
                .child(details),
        )
        .child(
            div()
                .id("fen-scroll")
                .flex_1()
                .overflow_y_scroll()
                .p_4()
                .text_sm()
                .text_color(rgb(TEXT_PRIMARY))
                .child(fen),
        );

    div()
        .size_full()
        .flex()
        .flex_col()
        .overflow_hidden()
        .bg(rgb(PANEL_BG))
        .p(px(BOARD_PADDING))
        .child(pane)
}
