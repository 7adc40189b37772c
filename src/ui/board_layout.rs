//! Board layout calculations - handles sizing and coordinate transformations.
//!
//! Three coordinate spaces meet here: surface pixels, screen cells (row and
//! column as drawn) and storage cells (as indexed in the position array).
//! When black is at the bottom, board cells are mirrored between screen and
//! storage; piece-box rows are never mirrored.

use crate::domain::{BoardCell, Cell, Mode};
use crate::ui::surface::Rect;

/// Handles all layout calculations for the chess board
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct BoardLayout {
    pub square_size: u32,
    pub white_down: bool,
    pub mode: Mode,
}

impl BoardLayout {
    pub fn new(square_size: u32, white_down: bool, mode: Mode) -> Self {
        Self {
            square_size,
            white_down,
            mode,
        }
    }

    /// Square size that fits `height` x `width` pixels: one square per row
    /// of the board (plus the piece box in setup mode).
    pub fn fit_square_size(height: u32, width: u32, mode: Mode) -> u32 {
        height.min(width) / mode.rows()
    }

    /// Surface `(width, height)` in pixels.
    pub fn surface_size(&self) -> (u32, u32) {
        (self.square_size * 8, self.square_size * self.mode.rows())
    }

    /// Pixel height of the 8x8 board region.
    pub fn board_extent(&self) -> u32 {
        self.square_size * 8
    }

    /// Screen row/column under a pixel, possibly outside the surface.
    pub fn screen_cell(&self, x: f32, y: f32) -> Option<(i64, i64)> {
        if self.square_size == 0 || !x.is_finite() || !y.is_finite() {
            return None;
        }
        let size = self.square_size as f32;
        Some(((y / size).floor() as i64, (x / size).floor() as i64))
    }

    /// Screen row/column of the 8x8 board under a pixel.
    pub fn screen_board_cell(&self, x: f32, y: f32) -> Option<(u32, u32)> {
        let (row, col) = self.screen_cell(x, y)?;
        ((0..8).contains(&row) && (0..8).contains(&col)).then_some((row as u32, col as u32))
    }

    /// Storage cell for a screen board cell.
    pub fn screen_to_board(&self, row: u32, col: u32) -> BoardCell {
        let cell = BoardCell {
            row: row as usize,
            col: col as usize,
        };
        if self.white_down { cell } else { cell.mirrored() }
    }

    /// Screen row/column where a storage cell is drawn.
    pub fn board_to_screen(&self, cell: BoardCell) -> (u32, u32) {
        let cell = if self.white_down { cell } else { cell.mirrored() };
        (cell.row as u32, cell.col as u32)
    }

    /// Logical cell under a pixel. Piece-box rows exist only in setup mode.
    pub fn screen_to_logical(&self, x: f32, y: f32) -> Option<Cell> {
        let (row, col) = self.screen_cell(x, y)?;
        if !(0..8).contains(&col) || row < 0 {
            return None;
        }
        match row {
            0..8 => Some(Cell::Board(self.screen_to_board(row as u32, col as u32))),
            8..10 if self.mode == Mode::Setup => Some(Cell::PieceBox {
                row: (row - 8) as usize,
                col: col as usize,
            }),
            _ => None,
        }
    }

    /// Pixel rectangle of a screen cell.
    pub fn screen_rect(&self, row: u32, col: u32) -> Rect {
        let size = self.square_size;
        Rect::new((col * size) as i64, (row * size) as i64, size, size)
    }

    /// Pixel rectangle where a logical cell is drawn.
    pub fn logical_to_screen_rect(&self, cell: Cell) -> Rect {
        match cell {
            Cell::Board(board_cell) => {
                let (row, col) = self.board_to_screen(board_cell);
                self.screen_rect(row, col)
            }
            Cell::PieceBox { row, col } => self.screen_rect(row as u32 + 8, col as u32),
        }
    }

    /// The 3x3-square neighbourhood around a screen cell, clipped to the board.
    pub fn neighbourhood(&self, row: u32, col: u32) -> Rect {
        let size = self.square_size as i64;
        let extent = self.board_extent() as i64;
        let x0 = ((col as i64 - 1) * size).max(0);
        let y0 = ((row as i64 - 1) * size).max(0);
        let x1 = ((col as i64 + 2) * size).min(extent);
        let y1 = ((row as i64 + 2) * size).min(extent);
        Rect::new(x0, y0, (x1 - x0) as u32, (y1 - y0) as u32)
    }
}

impl Default for BoardLayout {
    fn default() -> Self {
        Self::new(40, true, Mode::Play)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn centre(rect: Rect) -> (f32, f32) {
        (
            rect.x as f32 + rect.width as f32 / 2.0,
            rect.y as f32 + rect.height as f32 / 2.0,
        )
    }

    #[test]
    fn test_fit_square_size() {
        assert_eq!(BoardLayout::fit_square_size(400, 320, Mode::Play), 40);
        assert_eq!(BoardLayout::fit_square_size(400, 320, Mode::Setup), 32);
        assert_eq!(BoardLayout::fit_square_size(7, 100, Mode::Play), 0);
        let layout = BoardLayout::new(40, true, Mode::Play);
        assert_eq!(layout.surface_size(), (320, 320));
        assert_eq!(BoardLayout::new(32, true, Mode::Setup).surface_size(), (256, 320));
    }

    #[test]
    fn test_round_trip_both_orientations() {
        for white_down in [true, false] {
            for mode in [Mode::Play, Mode::Setup] {
                let layout = BoardLayout::new(40, white_down, mode);
                for row in 0..8 {
                    for col in 0..8 {
                        let cell = Cell::Board(BoardCell { row, col });
                        let (x, y) = centre(layout.logical_to_screen_rect(cell));
                        assert_eq!(layout.screen_to_logical(x, y), Some(cell));
                        // corners of the rect map back too
                        let rect = layout.logical_to_screen_rect(cell);
                        assert_eq!(layout.screen_to_logical(rect.x as f32, rect.y as f32), Some(cell));
                    }
                }
            }
        }
    }

    #[test]
    fn test_flip_mirrors_cells() {
        let up = BoardLayout::new(40, true, Mode::Play);
        let down = BoardLayout::new(40, false, Mode::Play);
        assert_eq!(up.screen_to_logical(5.0, 5.0), Some(Cell::Board(BoardCell { row: 0, col: 0 })));
        assert_eq!(down.screen_to_logical(5.0, 5.0), Some(Cell::Board(BoardCell { row: 7, col: 7 })));
    }

    #[test]
    fn test_piece_box_only_in_setup_and_never_flipped() {
        let play = BoardLayout::new(40, false, Mode::Play);
        assert_eq!(play.screen_to_logical(10.0, 330.0), None);

        let setup = BoardLayout::new(40, false, Mode::Setup);
        assert_eq!(
            setup.screen_to_logical(50.0, 370.0),
            Some(Cell::PieceBox { row: 1, col: 1 })
        );
        assert_eq!(setup.screen_to_logical(50.0, 400.0), None);
        assert_eq!(
            setup.logical_to_screen_rect(Cell::PieceBox { row: 1, col: 1 }),
            Rect::new(40, 360, 40, 40)
        );
    }

    #[test]
    fn test_out_of_bounds_pointer() {
        let layout = BoardLayout::new(40, true, Mode::Play);
        assert_eq!(layout.screen_to_logical(-1.0, 10.0), None);
        assert_eq!(layout.screen_to_logical(10.0, -0.5), None);
        assert_eq!(layout.screen_to_logical(320.0, 10.0), None);
        assert_eq!(layout.screen_board_cell(319.9, 0.0), Some((0, 7)));
        assert_eq!(BoardLayout::new(0, true, Mode::Play).screen_cell(1.0, 1.0), None);
    }

    #[test]
    fn test_neighbourhood_clipped_to_board() {
        let layout = BoardLayout::new(40, true, Mode::Setup);
        assert_eq!(layout.neighbourhood(0, 0), Rect::new(0, 0, 80, 80));
        assert_eq!(layout.neighbourhood(4, 4), Rect::new(120, 120, 120, 120));
        assert_eq!(layout.neighbourhood(7, 7), Rect::new(240, 240, 80, 80));
    }
}
