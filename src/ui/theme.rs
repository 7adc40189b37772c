//! Theme constants and colors for the chess UI.

use image::Rgba;

use crate::error::BoardError;

// Host layout constants
pub const BOARD_PADDING: f32 = 20.0;
pub const INITIAL_LEFT_PANEL: f32 = 540.0;
pub const INITIAL_RIGHT_PANEL: f32 = 280.0;

// Board colors
pub const DEFAULT_LIGHT_SQUARE: &str = "#ececd7";
pub const DEFAULT_DARK_SQUARE: &str = "#7389b6";
pub const HOVER_LIGHT: Rgba<u8> = Rgba([0xb4, 0xd9, 0x90, 0xff]);
pub const HOVER_DARK: Rgba<u8> = Rgba([0x85, 0xc2, 0x49, 0xff]);
pub const LAST_MOVE_OUTLINE: Rgba<u8> = Rgba([0xff, 0x8d, 0x8d, 0xff]);
pub const LAST_MOVE_WIDTH: u32 = 2;
pub const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

// Panel colors
pub const PANEL_BG: u32 = 0x2a2a2a;
pub const SIDE_PANEL_BG: u32 = 0x1e1e1e;
pub const BORDER_COLOR: u32 = 0x4a4a4a;
pub const TEXT_PRIMARY: u32 = 0xffffff;
pub const TEXT_SECONDARY: u32 = 0x888888;

/// Parse a `#rrggbb` color.
pub fn parse_hex_color(s: &str) -> Result<Rgba<u8>, BoardError> {
    let invalid = || BoardError::InvalidColor(s.to_string());
    let hex = s.strip_prefix('#').ok_or_else(invalid)?;
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(invalid());
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
    Ok(Rgba([channel(0)?, channel(2)?, channel(4)?, 0xff]))
}

/// Light/dark square colors of one board.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct SquareColors {
    pub light: Rgba<u8>,
    pub dark: Rgba<u8>,
}

impl SquareColors {
    pub fn parse(light: &str, dark: &str) -> Result<Self, BoardError> {
        Ok(Self {
            light: parse_hex_color(light)?,
            dark: parse_hex_color(dark)?,
        })
    }

    /// Get the color for a board square based on its screen position
    pub fn square_color(&self, row: u32, col: u32) -> Rgba<u8> {
        if (row + col) % 2 == 0 {
            self.light
        } else {
            self.dark
        }
    }
}

impl Default for SquareColors {
    fn default() -> Self {
        Self {
            light: Rgba([0xec, 0xec, 0xd7, 0xff]),
            dark: Rgba([0x73, 0x89, 0xb6, 0xff]),
        }
    }
}

/// Hover highlight for the square under a dragged piece.
pub fn hover_color(row: u32, col: u32) -> Rgba<u8> {
    if (row + col) % 2 == 0 {
        HOVER_LIGHT
    } else {
        HOVER_DARK
    }
}
