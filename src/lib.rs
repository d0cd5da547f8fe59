//! Map navigation for the game's world-map menu
//!
//! A stack of full-page map screens (the overview map and its sub-maps)
//! with hover info popups, fade transitions between screens and a sliding
//! character-icon shelf, all advanced by one cooperative per-frame tick.
//!
//! - `fader`: opacity fades, one in-flight fade per target
//! - `popup`: debounced hover popups, at most one visible
//! - `transition`: the screen-switch pipeline
//! - `spawner`: info boxes for the current screen's points of interest
//! - `icon_shelf`: hover-driven icon row animation
//! - `navigator`: the context object tying them together

pub mod config;
pub mod error;
pub mod fader;
pub mod icon_shelf;
pub mod input;
pub mod logging;
pub mod map;
pub mod motion;
pub mod navigator;
pub mod popup;
pub mod scene;
pub mod spawner;
pub mod transition;

pub use config::MapConfig;
pub use error::{MapError, SceneError};
pub use navigator::MapNavigator;
