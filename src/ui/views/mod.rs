mod board_view;
mod controls;

pub use board_view::ChessBoardView;
pub use controls::render_controls_panel;
