//! SDL2 window for the map
//!
//! Input events become `MapAction`s, the pointer is hit-tested against the
//! current screen's markers, and the renderer reads alphas and positions
//! straight from the navigator.

pub mod input_system;
pub mod pointer;
pub mod render;
pub mod text;

pub use input_system::{InputSystem, MapAction};
pub use pointer::HitTestPointer;
pub use render::MapRenderer;
