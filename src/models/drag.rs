//! Ephemeral drag state, alive between a pointer-down and its up or cancel.

use crate::domain::{Cell, Piece};

/// State for a piece being dragged
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct DragState {
    pub piece: Piece,
    /// Origin cell in storage coordinates (may be a piece-box slot)
    pub source: Cell,
    /// Pointer position relative to the drawing surface
    pub pointer_x: f32,
    pub pointer_y: f32,
    /// Whether the origin square's piece has been wiped from the visible surface
    pub source_cleared: bool,
}

impl DragState {
    pub fn new(piece: Piece, source: Cell, pointer: (f32, f32)) -> Self {
        Self {
            piece,
            source,
            pointer_x: pointer.0,
            pointer_y: pointer.1,
            source_cleared: false,
        }
    }

    pub fn pointer(&self) -> (f32, f32) {
        (self.pointer_x, self.pointer_y)
    }

    pub fn from_board(&self) -> bool {
        matches!(self.source, Cell::Board(_))
    }
}
