//! Error types surfaced by the board widget.

use thiserror::Error;

/// Errors returned by the widget's fallible operations.
///
/// None of these leave the board in a partially updated state: the caller may
/// ignore them and the last known-good position stays on screen.
#[derive(Debug, Error)]
pub enum BoardError {
    #[error("invalid FEN `{fen}`: {reason}")]
    InvalidFen { fen: String, reason: String },

    #[error("invalid square `{0}`")]
    InvalidSquare(String),

    #[error("invalid piece code `{0}`")]
    InvalidPieceCode(String),

    #[error("invalid board mode `{0}` (expected `play` or `setup`)")]
    InvalidMode(String),

    #[error("invalid color `{0}` (expected #rrggbb)")]
    InvalidColor(String),

    #[error("sprite sheet is {width}x{height}, expected at least 325x110")]
    SpriteSheetTooSmall { width: u32, height: u32 },

    #[error("asset `{0}` not found")]
    AssetNotFound(String),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("invalid board config: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T, E = BoardError> = std::result::Result<T, E>;
