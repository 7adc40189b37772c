//! An embeddable chessboard widget: a double-buffered RGBA renderer, a drag
//! state machine for mouse and touch input, and a pluggable rules engine.

pub mod app;
pub mod board;
pub mod config;
pub mod domain;
pub mod error;
pub mod models;
pub mod ui;

pub use board::ChessBoard;
pub use config::BoardConfig;
pub use domain::{Mode, PointerEvent, Position, RulesEngine, ShakmatyEngine};
pub use error::{BoardError, Result};
pub use models::MoveOutcome;
pub use ui::{CursorStyle, InputOutcome, SpriteSheet};
