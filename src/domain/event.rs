//! Pointer input normalized once at the edge of the controller.

/// A pointer event in surface-relative pixel coordinates.
///
/// Hosts translate their native mouse and touch events into this shape; any
/// event they cannot classify becomes `Unrecognized` and is dropped by the
/// controller before it touches any state.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum PointerEvent {
    Mouse { x: f32, y: f32 },
    Touch { x: f32, y: f32 },
    Unrecognized,
}

impl PointerEvent {
    pub fn mouse(x: f32, y: f32) -> Self {
        PointerEvent::Mouse { x, y }
    }

    pub fn touch(x: f32, y: f32) -> Self {
        PointerEvent::Touch { x, y }
    }

    /// Pointer coordinates, or `None` for an unrecognized event.
    pub fn position(&self) -> Option<(f32, f32)> {
        match *self {
            PointerEvent::Mouse { x, y } | PointerEvent::Touch { x, y } => Some((x, y)),
            PointerEvent::Unrecognized => None,
        }
    }

    pub fn is_mouse(&self) -> bool {
        matches!(self, PointerEvent::Mouse { .. })
    }
}
