//! Map layout and tuning configuration
//!
//! Everything the navigator needs at startup: fade speeds, hover debounce,
//! the screens with their markers, and the icon shelf geometry. Layouts are
//! plain JSON so they can be edited without recompiling:
//!
//! ```json
//! {
//!   "timing": { "transition_speed": 3.0, "hover_delay_secs": 0.2 },
//!   "screens": [
//!     { "name": "Main Map", "markers": [
//!       { "name": "Castle", "x": 180, "y": 140, "leads_to": 1 }
//!     ]},
//!     { "name": "Castle", "markers": [
//!       { "name": "Back", "x": 40, "y": 30, "kind": "back" }
//!     ]}
//!   ]
//! }
//! ```
//!
//! Missing sections fall back to [`MapConfig::default`].

use crate::error::MapError;
use crate::map::{MarkerKind, ScreenId};
use crate::motion::Point;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Fade and hover timing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Base opacity change per second at speed multiplier 1.0
    pub transition_speed: f32,
    /// Multiplier for whole-screen fades
    pub screen_fade_speed: f32,
    /// Multiplier for info popup fades
    pub popup_fade_speed: f32,
    /// How long the pointer must rest before a hover counts
    pub hover_delay_secs: f32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        TimingConfig {
            transition_speed: 3.0,
            screen_fade_speed: 1.0,
            popup_fade_speed: 2.0,
            hover_delay_secs: 0.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Pixels between a marker's anchor and its info box
    pub info_box_lift: f32,
    /// Screen the back control returns to
    pub back_target: ScreenId,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            info_box_lift: 24.0,
            back_target: ScreenId::MAIN,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerConfig {
    pub name: String,
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub kind: MarkerKind,
    /// Screen a click on this marker opens
    #[serde(default)]
    pub leads_to: Option<ScreenId>,
}

impl MarkerConfig {
    fn poi(name: &str, x: f32, y: f32) -> Self {
        MarkerConfig {
            name: name.to_string(),
            x,
            y,
            kind: MarkerKind::PointOfInterest,
            leads_to: None,
        }
    }

    fn route(name: &str, x: f32, y: f32, target: u8) -> Self {
        MarkerConfig {
            leads_to: Some(ScreenId(target)),
            ..Self::poi(name, x, y)
        }
    }

    fn back() -> Self {
        MarkerConfig {
            kind: MarkerKind::Back,
            ..Self::poi("Back", 40.0, 30.0)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenConfig {
    pub name: String,
    #[serde(default)]
    pub markers: Vec<MarkerConfig>,
}

/// Sliding row of character icons
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IconShelfConfig {
    pub icon_count: usize,
    /// Icons visible without sliding; the shelf only animates past this
    pub visible_icons: usize,
    /// Distance the shelf moves per step
    pub slot_width: f32,
    pub initial_delay_secs: f32,
    pub step_interval_secs: f32,
    /// Pixels per second while stepping out
    pub step_speed: f32,
    /// Pixels per second while snapping back to rest
    pub snap_speed: f32,
    /// Rest position of the shelf panel
    pub origin: Point,
}

impl Default for IconShelfConfig {
    fn default() -> Self {
        IconShelfConfig {
            icon_count: 8,
            visible_icons: 3,
            slot_width: 50.0,
            initial_delay_secs: 1.0,
            step_interval_secs: 1.0,
            step_speed: 200.0,
            snap_speed: 2000.0,
            origin: Point::new(460.0, 310.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub timing: TimingConfig,
    pub layout: LayoutConfig,
    pub screens: Vec<ScreenConfig>,
    pub icon_shelf: IconShelfConfig,
}

impl Default for MapConfig {
    fn default() -> Self {
        let sub_map = |name: &str, points: [(&str, f32, f32); 3]| ScreenConfig {
            name: name.to_string(),
            markers: points
                .iter()
                .map(|(n, x, y)| MarkerConfig::poi(n, *x, *y))
                .chain(std::iter::once(MarkerConfig::back()))
                .collect(),
        };

        MapConfig {
            timing: TimingConfig::default(),
            layout: LayoutConfig::default(),
            screens: vec![
                ScreenConfig {
                    name: "Main Map".to_string(),
                    markers: vec![
                        MarkerConfig::route("Castle", 180.0, 140.0, 1),
                        MarkerConfig::route("Dungeon 1", 420.0, 110.0, 2),
                        MarkerConfig::route("Dungeon 2", 460.0, 230.0, 3),
                    ],
                },
                sub_map(
                    "Castle",
                    [
                        ("Throne Room", 200.0, 120.0),
                        ("Armory", 330.0, 210.0),
                        ("Courtyard", 470.0, 140.0),
                    ],
                ),
                sub_map(
                    "Dungeon 1",
                    [
                        ("Entrance", 150.0, 200.0),
                        ("Crypt", 310.0, 120.0),
                        ("Treasury", 480.0, 190.0),
                    ],
                ),
                sub_map(
                    "Dungeon 2",
                    [
                        ("Gate", 170.0, 110.0),
                        ("Catacombs", 320.0, 220.0),
                        ("Lair", 500.0, 130.0),
                    ],
                ),
            ],
            icon_shelf: IconShelfConfig::default(),
        }
    }
}

impl MapConfig {
    /// Reads and validates a JSON layout
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, MapError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| MapError::ConfigIo {
            path: path.display().to_string(),
            source,
        })?;
        let config: MapConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// `<config dir>/mapnav/map.json`, when the platform has a config dir
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("mapnav").join("map.json"))
    }

    /// Loads `explicit` if given, else the user config file if it exists,
    /// else the built-in layout. Broken files are reported and skipped.
    pub fn load_or_default(explicit: Option<&Path>) -> Self {
        let candidate = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => Self::user_config_path().filter(|p| p.exists()),
        };

        let Some(path) = candidate else {
            log::info!("Using built-in map layout");
            return MapConfig::default();
        };

        match Self::load_from_file(&path) {
            Ok(config) => {
                log::info!("Loaded map layout from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("{}; falling back to built-in map layout", e);
                MapConfig::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), MapError> {
        if self.screens.is_empty() {
            return Err(MapError::NoScreens);
        }
        if self.screens.len() > u8::MAX as usize + 1 {
            return Err(MapError::InvalidSetting {
                field: "screens",
                reason: format!("{} screens exceeds the supported 256", self.screens.len()),
            });
        }

        for (field, value) in [
            ("timing.transition_speed", self.timing.transition_speed),
            ("timing.screen_fade_speed", self.timing.screen_fade_speed),
            ("timing.popup_fade_speed", self.timing.popup_fade_speed),
            ("icon_shelf.slot_width", self.icon_shelf.slot_width),
            ("icon_shelf.step_speed", self.icon_shelf.step_speed),
            ("icon_shelf.snap_speed", self.icon_shelf.snap_speed),
        ] {
            if !(value > 0.0) {
                return Err(MapError::InvalidSetting {
                    field,
                    reason: format!("must be positive, got {}", value),
                });
            }
        }
        for (field, value) in [
            ("timing.hover_delay_secs", self.timing.hover_delay_secs),
            ("icon_shelf.initial_delay_secs", self.icon_shelf.initial_delay_secs),
            ("icon_shelf.step_interval_secs", self.icon_shelf.step_interval_secs),
        ] {
            if !(value >= 0.0) {
                return Err(MapError::InvalidSetting {
                    field,
                    reason: format!("must not be negative, got {}", value),
                });
            }
        }

        if self.layout.back_target.index() >= self.screens.len() {
            return Err(MapError::UnknownScreen(self.layout.back_target));
        }

        for (index, screen) in self.screens.iter().enumerate() {
            let screen_id = ScreenId(index as u8);
            let mut seen = HashSet::new();
            for marker in &screen.markers {
                if !seen.insert(marker.name.as_str()) {
                    return Err(MapError::DuplicateMarker {
                        screen: screen_id,
                        name: marker.name.clone(),
                    });
                }
                if let Some(target) = marker.leads_to {
                    if target.index() >= self.screens.len() {
                        return Err(MapError::UnknownRoute {
                            marker: marker.name.clone(),
                            target,
                        });
                    }
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = MapConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.screens.len(), 4);
        assert_eq!(config.timing.hover_delay_secs, 0.1);
        assert_eq!(config.icon_shelf.icon_count, 8);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{
            "timing": { "hover_delay_secs": 0.2 },
            "screens": [
                { "name": "Main Map", "markers": [
                    { "name": "Castle", "x": 10, "y": 20, "leads_to": 1 }
                ]},
                { "name": "Castle", "markers": [
                    { "name": "Back", "x": 5, "y": 5, "kind": "back" }
                ]}
            ]
        }"#;

        let config: MapConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.timing.hover_delay_secs, 0.2);
        assert_eq!(config.timing.transition_speed, 3.0);
        assert_eq!(config.screens[0].markers[0].leads_to, Some(ScreenId(1)));
        assert_eq!(config.screens[1].markers[0].kind, MarkerKind::Back);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_duplicate_marker_names() {
        let mut config = MapConfig::default();
        let dup = config.screens[0].markers[0].clone();
        config.screens[0].markers.push(dup);

        assert!(matches!(
            config.validate(),
            Err(MapError::DuplicateMarker { name, .. }) if name == "Castle"
        ));
    }

    #[test]
    fn test_rejects_route_to_unknown_screen() {
        let mut config = MapConfig::default();
        config.screens[0].markers[0].leads_to = Some(ScreenId(9));

        assert!(matches!(
            config.validate(),
            Err(MapError::UnknownRoute { target: ScreenId(9), .. })
        ));
    }

    #[test]
    fn test_rejects_empty_and_bad_speeds() {
        let empty = MapConfig {
            screens: Vec::new(),
            ..MapConfig::default()
        };
        assert!(matches!(empty.validate(), Err(MapError::NoScreens)));

        let mut slow = MapConfig::default();
        slow.timing.transition_speed = 0.0;
        assert!(matches!(
            slow.validate(),
            Err(MapError::InvalidSetting { field: "timing.transition_speed", .. })
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = MapConfig::load_from_file("/definitely/not/here/map.json");
        assert!(matches!(result, Err(MapError::ConfigIo { .. })));
    }

    #[test]
    fn test_load_or_default_falls_back() {
        let config = MapConfig::load_or_default(Some(Path::new("/definitely/not/here/map.json")));
        assert_eq!(config, MapConfig::default());
    }

    #[test]
    fn test_shipped_layout_matches_default() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/config/map.json");
        let config = MapConfig::load_from_file(path).unwrap();
        assert_eq!(config, MapConfig::default());
    }
}
