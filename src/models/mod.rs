mod drag;
mod position_model;

pub use drag::DragState;
pub use position_model::{MoveOutcome, PositionModel, SetupEdit};
