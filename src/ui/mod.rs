pub mod assets;
pub mod board_layout;
pub mod controller;
pub mod glyphs;
pub mod renderer;
pub mod sprites;
pub mod surface;
pub mod theme;
pub mod views;

pub use assets::FileAssets;
pub use board_layout::BoardLayout;
pub use controller::{CursorStyle, IgnoreReason, InputController, InputOutcome};
pub use renderer::{BoardRenderer, RenderOptions};
pub use sprites::SpriteSheet;
