//! Piece sprite sheet and the per-size cache of scaled sprites.

use std::collections::HashMap;

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

use crate::domain::{Piece, PieceColor, PieceKind};
use crate::error::BoardError;
use crate::ui::glyphs::{GLYPH_HEIGHT, GLYPH_WIDTH, draw_char};
use crate::ui::surface::new_surface;

/// Edge length of one sprite cell in the sheet.
pub const SPRITE_SIZE: u32 = 55;

/// Column x-offsets for king, queen, rook, bishop, knight, pawn.
const COLUMN_OFFSETS: [u32; 6] = [0, 55, 110, 160, 215, 270];

pub const SHEET_WIDTH: u32 = 270 + SPRITE_SIZE;
pub const SHEET_HEIGHT: u32 = 2 * SPRITE_SIZE;

const PLACEHOLDER_LIGHT: Rgba<u8> = Rgba([0xf8, 0xf8, 0xf8, 0xff]);
const PLACEHOLDER_DARK: Rgba<u8> = Rgba([0x22, 0x22, 0x22, 0xff]);

/// Top-left corner of `piece` in the sheet: white row first, then black.
pub fn source_origin(piece: Piece) -> (u32, u32) {
    let column = match piece.kind {
        PieceKind::King => 0,
        PieceKind::Queen => 1,
        PieceKind::Rook => 2,
        PieceKind::Bishop => 3,
        PieceKind::Knight => 4,
        PieceKind::Pawn => 5,
    };
    let y = match piece.color {
        PieceColor::White => 0,
        PieceColor::Black => SPRITE_SIZE,
    };
    (COLUMN_OFFSETS[column], y)
}

/// The fixed-layout sheet holding all twelve piece images.
#[derive(Clone, Debug)]
pub struct SpriteSheet {
    image: RgbaImage,
}

impl SpriteSheet {
    pub fn from_image(image: RgbaImage) -> Result<Self, BoardError> {
        if image.width() < SHEET_WIDTH || image.height() < SHEET_HEIGHT {
            return Err(BoardError::SpriteSheetTooSmall {
                width: image.width(),
                height: image.height(),
            });
        }
        Ok(Self { image })
    }

    /// Decode an encoded sheet (PNG).
    pub fn decode(bytes: &[u8]) -> Result<Self, BoardError> {
        let image = image::load_from_memory(bytes)?.to_rgba8();
        Self::from_image(image)
    }

    /// A generated sheet: a disc in the piece colour with the role letter.
    pub fn placeholder() -> Self {
        let mut image = new_surface(SHEET_WIDTH, SHEET_HEIGHT);
        let radius = (SPRITE_SIZE / 2 - 5) as i64;
        let scale = 5;
        for color in [PieceColor::White, PieceColor::Black] {
            let (fill, ink) = match color {
                PieceColor::White => (PLACEHOLDER_LIGHT, PLACEHOLDER_DARK),
                PieceColor::Black => (PLACEHOLDER_DARK, PLACEHOLDER_LIGHT),
            };
            for kind in PieceKind::ALL {
                let (ox, oy) = source_origin(Piece::new(color, kind));
                let cx = (ox + SPRITE_SIZE / 2) as i64;
                let cy = (oy + SPRITE_SIZE / 2) as i64;
                for y in oy..oy + SPRITE_SIZE {
                    for x in ox..ox + SPRITE_SIZE {
                        let (dx, dy) = (x as i64 - cx, y as i64 - cy);
                        let d2 = dx * dx + dy * dy;
                        if d2 <= radius * radius {
                            let edge = d2 > (radius - 2) * (radius - 2);
                            image.put_pixel(x, y, if edge { ink } else { fill });
                        }
                    }
                }
                let letter = kind.letter().to_ascii_uppercase();
                let gx = cx - (GLYPH_WIDTH * scale / 2) as i64;
                let gy = cy - (GLYPH_HEIGHT * scale / 2) as i64;
                draw_char(&mut image, letter, gx, gy, scale, ink);
            }
        }
        Self { image }
    }

    /// The unscaled sprite for `piece`.
    pub fn sprite(&self, piece: Piece) -> RgbaImage {
        let (x, y) = source_origin(piece);
        imageops::crop_imm(&self.image, x, y, SPRITE_SIZE, SPRITE_SIZE).to_image()
    }
}

impl Default for SpriteSheet {
    fn default() -> Self {
        Self::placeholder()
    }
}

/// Sprites scaled to the current square size, rebuilt when the size changes.
#[derive(Debug, Default)]
pub struct SpriteCache {
    square_size: u32,
    scaled: HashMap<Piece, RgbaImage>,
}

impl SpriteCache {
    pub fn invalidate(&mut self) {
        self.scaled.clear();
    }

    pub fn get(&mut self, sheet: &SpriteSheet, piece: Piece, square_size: u32) -> &RgbaImage {
        if self.square_size != square_size {
            self.scaled.clear();
            self.square_size = square_size;
        }
        self.scaled.entry(piece).or_insert_with(|| {
            imageops::resize(
                &sheet.sprite(piece),
                square_size.max(1),
                square_size.max(1),
                FilterType::Nearest,
            )
        })
    }
}
