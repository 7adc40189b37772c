//! Double-buffered render pipeline.
//!
//! The snapshot holds a fully composed image of the position (minus any piece
//! mid-drag). The visible surface mirrors it except while a drag is in
//! progress, when the controller patches small regions of it directly and
//! restores them from the snapshot on the next frame.

use std::io::Cursor;

use image::{ImageFormat, Rgba, RgbaImage};
use tracing::{debug, info};

use crate::domain::{BoardCell, Cell, Mode, Piece, Position};
use crate::error::BoardError;
use crate::models::DragState;
use crate::ui::board_layout::BoardLayout;
use crate::ui::glyphs::{GLYPH_HEIGHT, GLYPH_WIDTH, draw_char};
use crate::ui::sprites::{SpriteCache, SpriteSheet};
use crate::ui::surface::{
    Rect, blend_image, clear_rect, copy_rect, fill_rect, new_surface, stroke_rect,
};
use crate::ui::theme::{LAST_MOVE_OUTLINE, LAST_MOVE_WIDTH, SquareColors};

/// Rendering options fixed at construction.
#[derive(Clone, Copy, Debug)]
pub struct RenderOptions {
    pub colors: SquareColors,
    pub highlight_move: bool,
    pub show_labels: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            colors: SquareColors::default(),
            highlight_move: false,
            show_labels: true,
        }
    }
}

pub struct BoardRenderer {
    layout: BoardLayout,
    options: RenderOptions,
    snapshot: RgbaImage,
    visible: RgbaImage,
    sheet: SpriteSheet,
    sprites: SpriteCache,
    generation: u64,
}

impl BoardRenderer {
    pub fn new(options: RenderOptions, sheet: SpriteSheet) -> Self {
        Self {
            layout: BoardLayout::default(),
            options,
            snapshot: new_surface(0, 0),
            visible: new_surface(0, 0),
            sheet,
            sprites: SpriteCache::default(),
            generation: 0,
        }
    }

    pub fn layout(&self) -> &BoardLayout {
        &self.layout
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn snapshot(&self) -> &RgbaImage {
        &self.snapshot
    }

    pub fn visible(&self) -> &RgbaImage {
        &self.visible
    }

    /// Bumped every time the visible surface changes.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn set_sprite_sheet(&mut self, sheet: SpriteSheet) {
        self.sheet = sheet;
        self.sprites.invalidate();
    }

    pub fn flip(&mut self) {
        self.layout.white_down = !self.layout.white_down;
        info!(white_down = self.layout.white_down, "board flipped");
    }

    pub fn set_white_down(&mut self, white_down: bool) {
        self.layout.white_down = white_down;
    }

    /// Recompute the square size for a `height` x `width` box.
    pub fn resize(&mut self, height: u32, width: u32, mode: Mode) {
        let square_size = BoardLayout::fit_square_size(height, width, mode);
        self.layout.square_size = square_size;
        self.layout.mode = mode;
        let (w, h) = self.layout.surface_size();
        info!(square_size, width = w, height = h, %mode, "board resized");
    }

    /// Recompose the off-screen buffer from scratch.
    pub fn rebuild_snapshot(&mut self, position: &Position, drag: Option<&DragState>) {
        let (width, height) = self.layout.surface_size();
        if self.snapshot.dimensions() != (width, height) {
            self.snapshot = new_surface(width, height);
        } else {
            clear_rect(&mut self.snapshot, Rect::new(0, 0, width, height));
        }

        self.draw_background();
        if self.options.show_labels {
            self.draw_labels();
        }
        if self.options.highlight_move {
            self.draw_last_move(position);
        }

        let size = self.layout.square_size as i64;
        let dragged = drag.map(|d| d.source);
        for (row, cells) in position.board.iter().enumerate() {
            for (col, piece) in cells.iter().enumerate() {
                let cell = BoardCell { row, col };
                if dragged == Some(Cell::Board(cell)) {
                    continue;
                }
                if let Some(piece) = piece {
                    let (sr, sc) = self.layout.board_to_screen(cell);
                    self.draw_piece_at(*piece, sc as i64 * size, sr as i64 * size);
                }
            }
        }

        if self.layout.mode == Mode::Setup {
            for (row, cells) in position.piece_box.iter().enumerate() {
                for (col, piece) in cells.iter().enumerate() {
                    if let Some(piece) = piece {
                        self.draw_piece_at(*piece, col as i64 * size, (row as i64 + 8) * size);
                    }
                }
            }
        }
        debug!(dragging = drag.is_some(), "snapshot rebuilt");
    }

    /// Copy the snapshot onto the visible surface.
    pub fn refresh(&mut self) {
        if self.visible.dimensions() != self.snapshot.dimensions() {
            self.visible = new_surface(self.snapshot.width(), self.snapshot.height());
        }
        let extent = self.layout.board_extent();
        clear_rect(
            &mut self.visible,
            Rect::new(0, extent as i64, extent, self.layout.square_size * 2),
        );
        image::imageops::replace(&mut self.visible, &self.snapshot, 0, 0);
        self.generation += 1;
    }

    /// Draw one piece into the snapshot with its top-left corner at `(x, y)`.
    pub fn draw_piece_at(&mut self, piece: Piece, x: i64, y: i64) {
        let sprite = self
            .sprites
            .get(&self.sheet, piece, self.layout.square_size);
        blend_image(&mut self.snapshot, sprite, x, y);
    }

    /// Draw one piece onto the visible surface, keeping only its top
    /// `max_height` rows when given.
    pub fn draw_piece_visible(&mut self, piece: Piece, x: i64, y: i64, max_height: Option<u32>) {
        let sprite = self
            .sprites
            .get(&self.sheet, piece, self.layout.square_size);
        match max_height {
            Some(h) if h < sprite.height() => {
                if h > 0 {
                    let clipped =
                        image::imageops::crop_imm(sprite, 0, 0, sprite.width(), h).to_image();
                    blend_image(&mut self.visible, &clipped, x, y);
                }
            }
            _ => blend_image(&mut self.visible, sprite, x, y),
        }
        self.generation += 1;
    }

    /// Restore a region of the visible surface from the snapshot.
    pub fn restore_visible(&mut self, rect: Rect) {
        copy_rect(&mut self.visible, &self.snapshot, rect);
        self.generation += 1;
    }

    pub fn fill_visible(&mut self, rect: Rect, color: Rgba<u8>) {
        fill_rect(&mut self.visible, rect, color);
        self.generation += 1;
    }

    /// Encode the visible surface as PNG.
    pub fn encode_png(&self) -> Result<Vec<u8>, BoardError> {
        let mut bytes = Cursor::new(Vec::new());
        self.visible.write_to(&mut bytes, ImageFormat::Png)?;
        Ok(bytes.into_inner())
    }

    fn draw_background(&mut self) {
        let colors = self.options.colors;
        for row in 0..8 {
            for col in 0..8 {
                let rect = self.layout.screen_rect(row, col);
                fill_rect(&mut self.snapshot, rect, colors.square_color(row, col));
            }
        }
    }

    fn draw_labels(&mut self) {
        let colors = self.options.colors;
        let size = self.layout.square_size;
        let scale = (size / 40).max(1);
        let white_down = self.layout.white_down;

        for y in 0..8u32 {
            let rank = if white_down { 8 - y } else { y + 1 };
            let label = char::from_digit(rank, 10).unwrap_or('?');
            let ink = if y % 2 == 0 { colors.dark } else { colors.light };
            draw_char(&mut self.snapshot, label, 2, (y * size + 2) as i64, scale, ink);
        }

        let bottom = (8 * size) as i64 - (GLYPH_HEIGHT * scale) as i64 - 2;
        for x in 0..8u32 {
            let file = if white_down { x } else { 7 - x };
            let label = (b'a' + file as u8) as char;
            let ink = if x % 2 == 0 { colors.light } else { colors.dark };
            let left = (x * size + size) as i64 - (GLYPH_WIDTH * scale) as i64 - 3;
            draw_char(&mut self.snapshot, label, left, bottom, scale, ink);
        }
    }

    fn draw_last_move(&mut self, position: &Position) {
        let Some(last) = position.last_move else {
            return;
        };
        for cell in [last.from, last.to] {
            let rect = self.layout.logical_to_screen_rect(Cell::Board(cell));
            stroke_rect(&mut self.snapshot, rect, LAST_MOVE_OUTLINE, LAST_MOVE_WIDTH);
        }
    }
}
