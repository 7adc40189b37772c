//! Pixel-level drawing helpers over RGBA buffers.
//!
//! Both the snapshot and the visible surface are plain `RgbaImage`s; every
//! operation here clips to the target so callers can pass rectangles that
//! hang off the edge.

use image::{Rgba, RgbaImage};

use crate::ui::theme::TRANSPARENT;

/// An axis-aligned rectangle in surface pixels. May extend past the surface.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Rect {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: i64, y: i64, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Intersect with `[0, max_w) x [0, max_h)`, returning `(x, y, w, h)`.
    pub fn clip(&self, max_w: u32, max_h: u32) -> Option<(u32, u32, u32, u32)> {
        let x0 = self.x.max(0);
        let y0 = self.y.max(0);
        let x1 = (self.x + self.width as i64).min(max_w as i64);
        let y1 = (self.y + self.height as i64).min(max_h as i64);
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some((x0 as u32, y0 as u32, (x1 - x0) as u32, (y1 - y0) as u32))
    }
}

pub fn new_surface(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_pixel(width, height, TRANSPARENT)
}

pub fn fill_rect(target: &mut RgbaImage, rect: Rect, color: Rgba<u8>) {
    let Some((x, y, w, h)) = rect.clip(target.width(), target.height()) else {
        return;
    };
    for py in y..y + h {
        for px in x..x + w {
            target.put_pixel(px, py, color);
        }
    }
}

pub fn clear_rect(target: &mut RgbaImage, rect: Rect) {
    fill_rect(target, rect, TRANSPARENT);
}

/// Outline `rect` with a border `line_width` pixels thick drawn inside it.
pub fn stroke_rect(target: &mut RgbaImage, rect: Rect, color: Rgba<u8>, line_width: u32) {
    let lw = line_width.min(rect.width).min(rect.height);
    if lw == 0 {
        return;
    }
    let right = rect.x + rect.width as i64 - lw as i64;
    let bottom = rect.y + rect.height as i64 - lw as i64;
    fill_rect(target, Rect::new(rect.x, rect.y, rect.width, lw), color);
    fill_rect(target, Rect::new(rect.x, bottom, rect.width, lw), color);
    fill_rect(target, Rect::new(rect.x, rect.y, lw, rect.height), color);
    fill_rect(target, Rect::new(right, rect.y, lw, rect.height), color);
}

/// Copy `rect` from `source` onto the same coordinates of `target`,
/// replacing (not blending) the pixels.
pub fn copy_rect(target: &mut RgbaImage, source: &RgbaImage, rect: Rect) {
    let max_w = target.width().min(source.width());
    let max_h = target.height().min(source.height());
    let Some((x, y, w, h)) = rect.clip(max_w, max_h) else {
        return;
    };
    for py in y..y + h {
        for px in x..x + w {
            target.put_pixel(px, py, *source.get_pixel(px, py));
        }
    }
}

/// Alpha-composite `sprite` onto `target` with its top-left corner at `(x, y)`.
pub fn blend_image(target: &mut RgbaImage, sprite: &RgbaImage, x: i64, y: i64) {
    image::imageops::overlay(target, sprite, x, y);
}
