//! Map Model
//!
//! Identifier-keyed registries for the screens (map levels) and the markers
//! placed on them. Both are built once from [`MapConfig`](crate::config::MapConfig)
//! and never re-created; only info boxes come and go as screens change.
//!
//! # Example Usage
//!
//! ```ignore
//! use mapnav::map::{MarkerRegistry, ScreenId, ScreenRegistry};
//!
//! let markers = MarkerRegistry::from_config(&config);
//! let screens = ScreenRegistry::from_config(&config, &markers, &mut fader);
//!
//! let castle = markers.find_by_name(ScreenId::MAIN, "Castle");
//! ```

pub mod marker;
pub mod screen;

pub use marker::{Interactable, Marker, MarkerId, MarkerKind, MarkerRegistry, Route};
pub use screen::{Screen, ScreenId, ScreenRegistry};
