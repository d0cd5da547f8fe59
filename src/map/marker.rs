use crate::config::MapConfig;
use crate::map::ScreenId;
use crate::motion::Point;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerId(pub u32);

impl fmt::Display for MarkerId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "marker#{}", self.0)
    }
}

/// What a clickable marker is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerKind {
    /// Hoverable point of interest; gets an info box while its screen is current
    #[default]
    PointOfInterest,
    /// The "back" control on sub-maps; never gets an info box
    Back,
}

/// Where a click on a marker sends the map
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Screen(ScreenId),
    Back,
}

/// Anything whose pointer input can be switched off while the map animates
pub trait Interactable {
    fn enable(&mut self);
    fn disable(&mut self);
    fn is_enabled(&self) -> bool;
}

#[derive(Debug, Clone)]
pub struct Marker {
    pub id: MarkerId,
    pub name: String,
    pub anchor: Point,
    pub screen: ScreenId,
    pub kind: MarkerKind,
    pub leads_to: Option<ScreenId>,
    enabled: bool,
}

impl Marker {
    pub fn route(&self) -> Option<Route> {
        match self.kind {
            MarkerKind::Back => Some(Route::Back),
            MarkerKind::PointOfInterest => self.leads_to.map(Route::Screen),
        }
    }

    pub fn is_point_of_interest(&self) -> bool {
        self.kind == MarkerKind::PointOfInterest
    }
}

impl Interactable for Marker {
    fn enable(&mut self) {
        self.enabled = true;
    }

    fn disable(&mut self) {
        self.enabled = false;
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }
}

/// Every marker of every screen, keyed by `MarkerId`, built once at startup
#[derive(Debug, Default)]
pub struct MarkerRegistry {
    markers: Vec<Marker>,
    by_name: HashMap<(ScreenId, String), MarkerId>,
}

impl MarkerRegistry {
    pub fn from_config(config: &MapConfig) -> Self {
        let mut registry = MarkerRegistry::default();

        for (index, screen_config) in config.screens.iter().enumerate() {
            let screen = ScreenId(index as u8);
            for marker_config in &screen_config.markers {
                let id = MarkerId(registry.markers.len() as u32);
                registry
                    .by_name
                    .insert((screen, marker_config.name.clone()), id);
                registry.markers.push(Marker {
                    id,
                    name: marker_config.name.clone(),
                    anchor: Point::new(marker_config.x, marker_config.y),
                    screen,
                    kind: marker_config.kind,
                    leads_to: marker_config.leads_to,
                    enabled: true,
                });
            }
        }

        registry
    }

    pub fn get(&self, id: MarkerId) -> Option<&Marker> {
        self.markers.get(id.0 as usize)
    }

    pub fn find_by_name(&self, screen: ScreenId, name: &str) -> Option<&Marker> {
        self.by_name
            .get(&(screen, name.to_string()))
            .and_then(|id| self.get(*id))
    }

    /// Markers of `screen` in scene (configuration) order
    pub fn on_screen(&self, screen: ScreenId) -> impl Iterator<Item = &Marker> {
        self.markers.iter().filter(move |m| m.screen == screen)
    }

    pub fn points_of_interest(&self, screen: ScreenId) -> impl Iterator<Item = &Marker> {
        self.on_screen(screen).filter(|m| m.is_point_of_interest())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Marker> {
        self.markers.iter()
    }

    pub fn disable_all(&mut self) {
        self.markers.iter_mut().for_each(Interactable::disable);
    }

    pub fn enable_all(&mut self) {
        self.markers.iter_mut().for_each(Interactable::enable);
    }

    pub fn all_enabled(&self) -> bool {
        self.markers.iter().all(Interactable::is_enabled)
    }

    pub fn any_enabled(&self) -> bool {
        self.markers.iter().any(Interactable::is_enabled)
    }
}
