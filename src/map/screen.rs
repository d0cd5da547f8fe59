use crate::config::MapConfig;
use crate::fader::{FadeTargetId, Fader};
use crate::map::{MarkerId, MarkerRegistry};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Identifies one full-page map level. `ScreenId::MAIN` is the overview map;
/// every other id is a sub-map (castle, dungeons, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScreenId(pub u8);

impl ScreenId {
    pub const MAIN: ScreenId = ScreenId(0);

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn is_main(self) -> bool {
        self == Self::MAIN
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_main() {
            write!(f, "Main")
        } else {
            write!(f, "Sub{}", self.0)
        }
    }
}

/// One map level: an opacity-bearing container plus the markers drawn on it
#[derive(Debug, Clone)]
pub struct Screen {
    pub id: ScreenId,
    pub name: String,
    /// Fade target driving the whole container's opacity
    pub container: FadeTargetId,
    pub markers: Vec<MarkerId>,
    visible: bool,
}

impl Screen {
    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

/// All screens, indexed by `ScreenId`
#[derive(Debug, Default)]
pub struct ScreenRegistry {
    screens: Vec<Screen>,
    by_name: HashMap<String, ScreenId>,
}

impl ScreenRegistry {
    /// Builds one screen per configured entry. Main starts visible at full
    /// opacity; every sub-map starts hidden and transparent.
    ///
    /// Each screen lists the ids `markers` holds for it, in scene order.
    pub fn from_config(
        config: &MapConfig,
        markers: &MarkerRegistry,
        fader: &mut Fader,
    ) -> Self {
        let mut registry = ScreenRegistry::default();

        for (index, screen_config) in config.screens.iter().enumerate() {
            let id = ScreenId(index as u8);
            let is_main = id.is_main();
            let container = fader.register(if is_main { 1.0 } else { 0.0 });

            let marker_ids = markers.on_screen(id).map(|m| m.id).collect();

            registry.by_name.insert(screen_config.name.clone(), id);
            registry.screens.push(Screen {
                id,
                name: screen_config.name.clone(),
                container,
                markers: marker_ids,
                visible: is_main,
            });
        }

        registry
    }

    pub fn get(&self, id: ScreenId) -> Option<&Screen> {
        self.screens.get(id.index())
    }

    pub fn contains(&self, id: ScreenId) -> bool {
        id.index() < self.screens.len()
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Screen> {
        self.by_name.get(name).and_then(|id| self.get(*id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Screen> {
        self.screens.iter()
    }

    pub fn len(&self) -> usize {
        self.screens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.screens.is_empty()
    }

    /// Returns false when `id` names no screen
    pub fn set_visible(&mut self, id: ScreenId, visible: bool) -> bool {
        match self.screens.get_mut(id.index()) {
            Some(screen) => {
                screen.visible = visible;
                true
            }
            None => false,
        }
    }

    pub fn visible_count(&self) -> usize {
        self.screens.iter().filter(|s| s.visible).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry(fader: &mut Fader) -> ScreenRegistry {
        let config = MapConfig::default();
        ScreenRegistry::from_config(&config, &MarkerRegistry::from_config(&config), fader)
    }

    #[test]
    fn test_only_main_starts_visible() {
        let mut fader = Fader::new(3.0);
        let screens = registry(&mut fader);

        assert_eq!(screens.len(), 4);
        assert_eq!(screens.visible_count(), 1);
        let main = screens.get(ScreenId::MAIN).unwrap();
        assert!(main.is_visible());
        assert_eq!(fader.alpha(main.container), Some(1.0));

        let castle = screens.get(ScreenId(1)).unwrap();
        assert!(!castle.is_visible());
        assert_eq!(fader.alpha(castle.container), Some(0.0));
    }

    #[test]
    fn test_find_by_name() {
        let mut fader = Fader::new(3.0);
        let screens = registry(&mut fader);

        assert_eq!(screens.find_by_name("Castle").map(|s| s.id), Some(ScreenId(1)));
        assert!(screens.find_by_name("Nowhere").is_none());
    }

    #[test]
    fn test_set_visible_unknown_screen() {
        let mut fader = Fader::new(3.0);
        let mut screens = registry(&mut fader);
        assert!(!screens.set_visible(ScreenId(42), true));
        assert_eq!(screens.visible_count(), 1);
    }

    #[test]
    fn test_screen_markers_come_from_marker_registry() {
        let config = MapConfig::default();
        let markers = MarkerRegistry::from_config(&config);
        let mut fader = Fader::new(3.0);
        let screens = ScreenRegistry::from_config(&config, &markers, &mut fader);

        for screen in screens.iter() {
            assert!(!screen.markers.is_empty());
            for id in &screen.markers {
                assert_eq!(markers.get(*id).map(|m| m.screen), Some(screen.id));
            }
        }
        let castle = screens.get(ScreenId(1)).unwrap();
        let names: Vec<&str> = castle
            .markers
            .iter()
            .filter_map(|id| markers.get(*id))
            .map(|m| m.name.as_str())
            .collect();
        assert_eq!(names, vec!["Throne Room", "Armory", "Courtyard", "Back"]);
    }

    #[test]
    fn test_screen_id_display() {
        assert_eq!(ScreenId::MAIN.to_string(), "Main");
        assert_eq!(ScreenId(2).to_string(), "Sub2");
    }
}
