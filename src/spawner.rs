//! Info boxes for the points of interest on the current screen
//!
//! Markers are static, but their hover info boxes only exist while their
//! screen is current. Entering a screen spawns one box per point of interest
//! (in scene order, lifted a little above the marker and labelled with its
//! name); leaving it destroys them all again.

use crate::fader::{FadeTargetId, Fader};
use crate::map::{MarkerId, MarkerRegistry, ScreenId};
use crate::motion::Point;
use crate::scene::{NodeHandle, NodeParent, PrefabKind, SceneService};
use std::collections::HashMap;

/// Hover popup belonging to one marker
#[derive(Debug, Clone, PartialEq)]
pub struct InfoBox {
    pub marker: MarkerId,
    pub label: String,
    pub position: Point,
    pub node: NodeHandle,
    /// Opacity of the popup, hidden (0.0) when spawned
    pub fade: FadeTargetId,
}

pub struct PointOfInterestSpawner {
    lift: f32,
    boxes: HashMap<ScreenId, Vec<InfoBox>>,
    point_names: Vec<String>,
}

impl PointOfInterestSpawner {
    /// `lift` is how far above its marker (in pixels) each box sits
    pub fn new(lift: f32) -> Self {
        PointOfInterestSpawner {
            lift,
            boxes: HashMap::new(),
            point_names: Vec::new(),
        }
    }

    /// Creates one info box per point of interest on `screen`.
    ///
    /// Markers whose node cannot be created are skipped. Spawning over a
    /// screen that still has boxes clears the old ones first.
    pub fn spawn(
        &mut self,
        screen: ScreenId,
        markers: &MarkerRegistry,
        scene: &mut dyn SceneService,
        fader: &mut Fader,
    ) -> &[InfoBox] {
        if self.boxes.get(&screen).is_some_and(|b| !b.is_empty()) {
            log::warn!("{} still had info boxes; clearing before respawn", screen);
            self.clear(screen, scene, fader);
        }

        self.point_names = markers
            .points_of_interest(screen)
            .map(|m| m.name.clone())
            .collect();

        let mut spawned = Vec::new();
        for marker in markers.points_of_interest(screen) {
            let position = marker.anchor.offset(0.0, -self.lift);
            let node = match scene.instantiate(
                PrefabKind::InfoBox,
                position,
                NodeParent::InfoContainer(screen),
            ) {
                Ok(node) => node,
                Err(e) => {
                    log::warn!("Skipping info box for {}: {}", marker.name, e);
                    continue;
                }
            };
            scene.set_label(node, &marker.name);

            spawned.push(InfoBox {
                marker: marker.id,
                label: marker.name.clone(),
                position,
                node,
                fade: fader.register(0.0),
            });
        }

        log::debug!("Spawned {} info boxes for {}", spawned.len(), screen);
        self.boxes.entry(screen).or_default().extend(spawned);
        self.boxes(screen)
    }

    /// Destroys every info box of `screen` and forgets the cached names.
    /// Returns how many boxes were removed.
    pub fn clear(
        &mut self,
        screen: ScreenId,
        scene: &mut dyn SceneService,
        fader: &mut Fader,
    ) -> usize {
        let removed = self.boxes.remove(&screen).unwrap_or_default();
        for info_box in &removed {
            scene.destroy(info_box.node);
            fader.remove(info_box.fade);
        }
        self.point_names.clear();
        removed.len()
    }

    pub fn boxes(&self, screen: ScreenId) -> &[InfoBox] {
        self.boxes.get(&screen).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn find(&self, screen: ScreenId, marker: MarkerId) -> Option<&InfoBox> {
        self.boxes(screen).iter().find(|b| b.marker == marker)
    }

    /// Names of the points of interest on the screen spawned last
    pub fn point_names(&self) -> &[String] {
        &self.point_names
    }

    pub fn total_boxes(&self) -> usize {
        self.boxes.values().map(Vec::len).sum()
    }

    /// Every live box across screens
    pub fn iter(&self) -> impl Iterator<Item = &InfoBox> {
        self.boxes.values().flatten()
    }
}
