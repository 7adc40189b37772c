//! Construction options for a board instance.

use schemars::{JsonSchema, Schema, schema_for};
use serde::{Deserialize, Serialize};

use crate::domain::Mode;
use crate::error::BoardError;
use crate::ui::renderer::RenderOptions;
use crate::ui::theme::{DEFAULT_DARK_SQUARE, DEFAULT_LIGHT_SQUARE, SquareColors};

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Options recognized when constructing a [`crate::ChessBoard`].
///
/// Every field is optional in JSON; missing fields take their defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct BoardConfig {
    /// Host-side name of the element the board is mounted in.
    pub container: Option<String>,
    /// Explicit height in pixels. Unset means "fill the container".
    pub height: Option<u32>,
    /// Explicit width in pixels. Unset means "fill the container".
    pub width: Option<u32>,
    pub mode: Mode,
    /// Initial position.
    pub fen: String,
    /// Outline the origin and destination of the last move.
    pub highlight_move: bool,
    /// Draw rank digits and file letters along the board edges.
    pub show_row_col_labels: bool,
    /// `#rrggbb`
    pub square_color_light: String,
    /// `#rrggbb`
    pub square_color_dark: String,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            container: None,
            height: None,
            width: None,
            mode: Mode::Play,
            fen: START_FEN.to_string(),
            highlight_move: false,
            show_row_col_labels: true,
            square_color_light: DEFAULT_LIGHT_SQUARE.to_string(),
            square_color_dark: DEFAULT_DARK_SQUARE.to_string(),
        }
    }
}

impl BoardConfig {
    pub fn from_json_str(json: &str) -> Result<Self, BoardError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn json_schema() -> Schema {
        schema_for!(BoardConfig)
    }

    /// Resolve the drawing options, validating the square colours.
    pub fn render_options(&self) -> Result<RenderOptions, BoardError> {
        Ok(RenderOptions {
            colors: SquareColors::parse(&self.square_color_light, &self.square_color_dark)?,
            highlight_move: self.highlight_move,
            show_labels: self.show_row_col_labels,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_json() {
        let config = BoardConfig::from_json_str("{}").unwrap();
        assert_eq!(config, BoardConfig::default());
        assert_eq!(config.mode, Mode::Play);
        assert!(config.show_row_col_labels);
        assert!(!config.highlight_move);
    }

    #[test]
    fn test_partial_json() {
        let config = BoardConfig::from_json_str(
            r##"{"mode": "setup", "height": 400, "square_color_dark": "#112233"}"##,
        )
        .unwrap();
        assert_eq!(config.mode, Mode::Setup);
        assert_eq!(config.height, Some(400));
        assert_eq!(config.width, None);
        let options = config.render_options().unwrap();
        assert_eq!(options.colors.dark, image::Rgba([0x11, 0x22, 0x33, 0xff]));
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(matches!(
            BoardConfig::from_json_str(r#"{"mode": "blitz"}"#),
            Err(BoardError::Config(_))
        ));
        let config = BoardConfig {
            square_color_light: "white".to_string(),
            ..BoardConfig::default()
        };
        assert!(matches!(config.render_options(), Err(BoardError::InvalidColor(_))));
    }

    #[test]
    fn test_schema_lists_options() {
        let schema = serde_json::to_value(BoardConfig::json_schema()).unwrap();
        let properties = schema["properties"].as_object().unwrap();
        for key in ["container", "height", "width", "mode", "fen", "highlight_move"] {
            assert!(properties.contains_key(key), "missing {key}");
        }
    }
}
