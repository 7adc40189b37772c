//! A 3x5 bitmap font covering the board labels and the placeholder piece
//! letters. Each row is three bits, most significant bit on the left.

use image::{Rgba, RgbaImage};

use crate::ui::surface::{Rect, fill_rect};

pub const GLYPH_WIDTH: u32 = 3;
pub const GLYPH_HEIGHT: u32 = 5;

fn glyph(c: char) -> Option<[u8; 5]> {
    Some(match c {
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b110, 0b001, 0b010, 0b100, 0b111],
        '3' => [0b110, 0b001, 0b010, 0b001, 0b110],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b110, 0b001, 0b110],
        '6' => [0b011, 0b100, 0b110, 0b101, 0b010],
        '7' => [0b111, 0b001, 0b010, 0b010, 0b010],
        '8' => [0b010, 0b101, 0b010, 0b101, 0b010],
        'a' => [0b000, 0b011, 0b101, 0b101, 0b011],
        'b' => [0b100, 0b110, 0b101, 0b101, 0b110],
        'c' => [0b000, 0b011, 0b100, 0b100, 0b011],
        'd' => [0b001, 0b011, 0b101, 0b101, 0b011],
        'e' => [0b000, 0b010, 0b111, 0b100, 0b011],
        'f' => [0b011, 0b100, 0b110, 0b100, 0b100],
        'g' => [0b011, 0b101, 0b011, 0b001, 0b110],
        'h' => [0b100, 0b110, 0b101, 0b101, 0b101],
        'K' => [0b101, 0b101, 0b110, 0b101, 0b101],
        'Q' => [0b010, 0b101, 0b101, 0b010, 0b001],
        'R' => [0b110, 0b101, 0b110, 0b101, 0b101],
        'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'N' => [0b101, 0b111, 0b111, 0b101, 0b101],
        'P' => [0b110, 0b101, 0b110, 0b100, 0b100],
        _ => return None,
    })
}

/// Draw `c` with its top-left corner at `(x, y)`, each font pixel `scale`
/// surface pixels wide. Unknown characters draw nothing.
pub fn draw_char(target: &mut RgbaImage, c: char, x: i64, y: i64, scale: u32, color: Rgba<u8>) {
    let Some(rows) = glyph(c) else {
        return;
    };
    for (dy, bits) in rows.iter().enumerate() {
        for dx in 0..GLYPH_WIDTH {
            if bits & (0b100 >> dx) != 0 {
                let px = x + (dx * scale) as i64;
                let py = y + (dy as u32 * scale) as i64;
                fill_rect(target, Rect::new(px, py, scale, scale), color);
            }
        }
    }
}
