//! The map navigator: one explicitly constructed context owning every
//! screen, fade, controller and the scene they draw into
//!
//! Hosts drive it in two ways, and may mix them:
//! - event style: `on_hover_enter` / `on_hover_exit` / `on_click` / `on_back`
//!   followed by `tick(delta_time)` once per frame
//! - polling style: `update(delta_time, &mut pointer)` which reads a
//!   [`PointerSource`], turns changes into the same events and ticks
//!
//! Each tick advances, in order: fades, the hover probe, the running screen
//! transition, and the icon shelf.
//!
//! # Example
//!
//! ```rust
//! use mapnav::config::MapConfig;
//! use mapnav::map::ScreenId;
//! use mapnav::navigator::MapNavigator;
//! use mapnav::scene::MemoryScene;
//!
//! let config = MapConfig::default();
//! let scene = MemoryScene::new(config.screens.len());
//! let mut map = MapNavigator::new(config, scene).unwrap();
//!
//! let castle = map.markers().find_by_name(ScreenId::MAIN, "Castle").unwrap().id;
//! assert!(map.on_click(castle));
//! while map.is_transitioning() {
//!     map.tick(1.0 / 60.0);
//! }
//! assert_eq!(map.current_screen(), ScreenId(1));
//! ```

use crate::config::MapConfig;
use crate::error::MapError;
use crate::fader::{FadeTargetId, Fader};
use crate::icon_shelf::IconShelfAnimator;
use crate::input::PointerSource;
use crate::map::{Interactable, Marker, MarkerId, MarkerRegistry, Route, ScreenId, ScreenRegistry};
use crate::popup::{HoverTarget, InfoPopupController};
use crate::scene::SceneService;
use crate::spawner::{InfoBox, PointOfInterestSpawner};
use crate::transition::{ScreenTransitionController, TransitionDeps, TransitionEvent};

pub struct MapNavigator<S: SceneService> {
    config: MapConfig,
    screens: ScreenRegistry,
    markers: MarkerRegistry,
    fader: Fader,
    popup: InfoPopupController,
    transitions: ScreenTransitionController,
    spawner: PointOfInterestSpawner,
    shelf: IconShelfAnimator,
    scene: S,
    hovered: Option<MarkerId>,
}

impl<S: SceneService> MapNavigator<S> {
    /// Validates `config`, builds the registries, shows the main map and
    /// spawns its info boxes and the icon shelf into `scene`
    pub fn new(config: MapConfig, mut scene: S) -> Result<Self, MapError> {
        config.validate()?;

        let mut fader = Fader::new(config.timing.transition_speed);
        let markers = MarkerRegistry::from_config(&config);
        let screens = ScreenRegistry::from_config(&config, &markers, &mut fader);

        let mut spawner = PointOfInterestSpawner::new(config.layout.info_box_lift);
        spawner.spawn(ScreenId::MAIN, &markers, &mut scene, &mut fader);
        let shelf = IconShelfAnimator::build(&config.icon_shelf, &mut scene);

        let popup = InfoPopupController::new(
            config.timing.hover_delay_secs,
            config.timing.popup_fade_speed,
        );
        let transitions = ScreenTransitionController::new(
            config.layout.back_target,
            config.timing.screen_fade_speed,
        );

        log::info!(
            "Map ready: {} screens, {} markers",
            screens.len(),
            markers.iter().count()
        );

        Ok(MapNavigator {
            config,
            screens,
            markers,
            fader,
            popup,
            transitions,
            spawner,
            shelf,
            scene,
            hovered: None,
        })
    }

    /// Marker `id` if it is enabled and sits on the current screen
    fn interactive(&self, id: MarkerId) -> Option<&Marker> {
        self.markers
            .get(id)
            .filter(|m| m.is_enabled() && m.screen == self.current_screen())
    }

    pub fn on_hover_enter(&mut self, marker: MarkerId) {
        if self.interactive(marker).is_none() {
            log::debug!("hover over inactive {} ignored", marker);
            return;
        }
        self.hovered = Some(marker);
        self.popup.on_hover_enter(marker);
    }

    pub fn on_hover_exit(&mut self) {
        self.hovered = None;
        self.popup.on_hover_exit(&mut self.fader);
    }

    /// Follows the route of `marker`, if it has one. Returns whether a
    /// transition started.
    pub fn on_click(&mut self, marker: MarkerId) -> bool {
        let Some(route) = self.interactive(marker).and_then(|m| {
            log::info!("Clicked {}", m.name);
            m.route()
        }) else {
            return false;
        };
        self.request(route)
    }

    /// Returns to the configured back target
    pub fn on_back(&mut self) -> bool {
        self.request(Route::Back)
    }

    fn request(&mut self, route: Route) -> bool {
        if route == Route::Back {
            let target = self.transitions.resolve(route);
            let name = self.screens.get(target).map_or("?", |s| s.name.as_str());
            log::info!("Back to {}", name);
        }

        self.transitions.request(
            route,
            &mut TransitionDeps {
                screens: &mut self.screens,
                markers: &mut self.markers,
                fader: &mut self.fader,
                popup: &mut self.popup,
                spawner: &mut self.spawner,
                scene: &mut self.scene,
            },
        )
    }

    /// Polls `pointer`, converts hover changes and clicks into events, then ticks
    pub fn update(&mut self, delta_time: f32, pointer: &mut dyn PointerSource) {
        let under = pointer
            .hovered_element()
            .filter(|id| self.interactive(*id).is_some());

        if under != self.hovered {
            if self.hovered.is_some() {
                self.on_hover_exit();
            }
            if let Some(marker) = under {
                self.on_hover_enter(marker);
            }
        }

        if let Some(clicked) = pointer.take_click() {
            self.on_click(clicked);
        }

        self.tick(delta_time);
    }

    /// Advances all animations and the running transition by `delta_time`
    pub fn tick(&mut self, delta_time: f32) {
        self.fader.tick(delta_time);

        let current = self.current_screen();
        let under = self.hovered.map(|marker| HoverTarget {
            marker,
            info: self.spawner.find(current, marker).map(|b| b.fade),
        });
        if let Some(marker) = self.popup.tick(delta_time, under, &mut self.fader) {
            log::trace!("hover confirmed on {}", marker);
        }

        self.transitions.tick(&mut TransitionDeps {
            screens: &mut self.screens,
            markers: &mut self.markers,
            fader: &mut self.fader,
            popup: &mut self.popup,
            spawner: &mut self.spawner,
            scene: &mut self.scene,
        });

        self.shelf
            .tick(delta_time, self.popup.is_pointer_over_control());
    }

    pub fn drain_events(&mut self) -> Vec<TransitionEvent> {
        self.transitions.drain_events()
    }

    pub fn current_screen(&self) -> ScreenId {
        self.transitions.current()
    }

    pub fn is_transitioning(&self) -> bool {
        self.transitions.is_transitioning()
    }

    pub fn is_pointer_over_control(&self) -> bool {
        self.popup.is_pointer_over_control()
    }

    pub fn is_fading_in(&self, target: FadeTargetId) -> bool {
        self.fader.is_fading_in(target)
    }

    pub fn is_fading_out(&self, target: FadeTargetId) -> bool {
        self.fader.is_fading_out(target)
    }

    /// Container opacity of `screen`; 0.0 for unknown screens
    pub fn screen_alpha(&self, screen: ScreenId) -> f32 {
        self.screens
            .get(screen)
            .and_then(|s| self.fader.alpha(s.container))
            .unwrap_or(0.0)
    }

    /// Info boxes of the current screen
    pub fn info_boxes(&self) -> &[InfoBox] {
        self.spawner.boxes(self.current_screen())
    }

    pub fn hovered(&self) -> Option<MarkerId> {
        self.hovered
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    pub fn screens(&self) -> &ScreenRegistry {
        &self.screens
    }

    pub fn markers(&self) -> &MarkerRegistry {
        &self.markers
    }

    pub fn fader(&self) -> &Fader {
        &self.fader
    }

    pub fn popup(&self) -> &InfoPopupController {
        &self.popup
    }

    pub fn spawner(&self) -> &PointOfInterestSpawner {
        &self.spawner
    }

    pub fn shelf(&self) -> &IconShelfAnimator {
        &self.shelf
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fader::FadeState;
    use crate::input::ScriptedPointer;
    use crate::scene::{MemoryScene, PrefabKind};

    const DT: f32 = 1.0 / 60.0;

    fn navigator() -> MapNavigator<MemoryScene> {
        let config = MapConfig::default();
        let scene = MemoryScene::new(config.screens.len());
        MapNavigator::new(config, scene).unwrap()
    }

    fn marker(map: &MapNavigator<MemoryScene>, screen: ScreenId, name: &str) -> MarkerId {
        map.markers().find_by_name(screen, name).unwrap().id
    }

    fn info_fade(map: &MapNavigator<MemoryScene>, id: MarkerId) -> FadeTargetId {
        map.spawner().find(map.current_screen(), id).unwrap().fade
    }

    fn visible_popups(map: &MapNavigator<MemoryScene>) -> usize {
        map.info_boxes()
            .iter()
            .filter(|b| map.fader().alpha(b.fade).unwrap_or(0.0) > 0.0)
            .count()
    }

    fn run(map: &mut MapNavigator<MemoryScene>, ticks: usize) {
        for _ in 0..ticks {
            map.tick(DT);
            assert_eq!(map.screens().visible_count(), 1);
            assert!(visible_popups(map) <= 1);
        }
    }

    #[test]
    fn test_initial_state() {
        let map = navigator();
        assert_eq!(map.current_screen(), ScreenId::MAIN);
        assert_eq!(map.screens().visible_count(), 1);
        assert_eq!(map.info_boxes().len(), 3);
        assert_eq!(map.scene().count(PrefabKind::InfoBox), 3);
        assert_eq!(map.scene().count(PrefabKind::CharacterIcon), 8);
        assert_eq!(map.screen_alpha(ScreenId::MAIN), 1.0);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = MapConfig {
            screens: Vec::new(),
            ..MapConfig::default()
        };
        assert!(matches!(
            MapNavigator::new(config, MemoryScene::new(0)),
            Err(MapError::NoScreens)
        ));
    }

    #[test]
    fn test_click_castle_from_main() {
        let mut map = navigator();
        let castle = marker(&map, ScreenId::MAIN, "Castle");

        assert!(map.on_click(castle));
        assert!(!map.markers().any_enabled());

        // 1.0 alpha at 3.0/s each way: about 20 ticks out, 20 ticks in
        let mut ticks = 0;
        while map.is_transitioning() {
            run(&mut map, 1);
            ticks += 1;
        }
        assert!((38..=44).contains(&ticks));

        let events = map.drain_events();
        let expected_order = [
            TransitionEvent::InputDisabled,
            TransitionEvent::ScreenFadedOut(ScreenId::MAIN),
            TransitionEvent::ScreenHidden(ScreenId::MAIN),
            TransitionEvent::ScreenShown(ScreenId(1)),
            TransitionEvent::ScreenFadedIn(ScreenId(1)),
            TransitionEvent::InputEnabled,
            TransitionEvent::InfoBoxesSpawned {
                screen: ScreenId(1),
                count: 3,
            },
        ];
        let positions: Vec<usize> = expected_order
            .iter()
            .map(|e| events.iter().position(|x| x == e).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));

        assert_eq!(map.current_screen(), ScreenId(1));
        assert_eq!(map.screen_alpha(ScreenId(1)), 1.0);
        assert_eq!(map.screen_alpha(ScreenId::MAIN), 0.0);
        assert_eq!(map.scene().count(PrefabKind::InfoBox), 3);
        let labels: Vec<&str> = map.info_boxes().iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["Throne Room", "Armory", "Courtyard"]);
    }

    #[test]
    fn test_hover_a_then_b_before_delay_shows_only_b() {
        let mut map = navigator();
        let a = marker(&map, ScreenId::MAIN, "Castle");
        let b = marker(&map, ScreenId::MAIN, "Dungeon 1");

        map.on_hover_enter(a);
        run(&mut map, 2);
        map.on_hover_enter(b);
        run(&mut map, 30);

        assert_eq!(map.fader().alpha(info_fade(&map, a)), Some(0.0));
        assert_eq!(map.fader().alpha(info_fade(&map, b)), Some(1.0));
        assert!(map.is_pointer_over_control());
    }

    #[test]
    fn test_hover_then_exit_fades_popup_out_completely() {
        let mut map = navigator();
        let a = marker(&map, ScreenId::MAIN, "Castle");
        let fade = info_fade(&map, a);

        map.on_hover_enter(a);
        run(&mut map, 30);
        assert_eq!(map.fader().alpha(fade), Some(1.0));

        map.on_hover_exit();
        assert!(map.is_fading_out(fade));
        run(&mut map, 30);
        assert_eq!(map.fader().alpha(fade), Some(0.0));
        assert_eq!(map.fader().state(fade), Some(FadeState::Idle));
        assert!(!map.is_pointer_over_control());
    }

    #[test]
    fn test_back_to_back_triggers_same_tick() {
        let mut map = navigator();
        let castle = marker(&map, ScreenId::MAIN, "Castle");

        assert!(map.on_click(castle));
        assert!(!map.on_back());

        run(&mut map, 100);
        assert!(!map.is_transitioning());
        assert_eq!(map.current_screen(), ScreenId(1));

        assert!(map.on_back());
        run(&mut map, 100);
        assert_eq!(map.current_screen(), ScreenId::MAIN);
        assert_eq!(map.info_boxes().len(), 3);
        assert_eq!(map.scene().count(PrefabKind::InfoBox), 3);
    }

    #[test]
    fn test_markers_ignored_while_transitioning() {
        let mut map = navigator();
        let castle = marker(&map, ScreenId::MAIN, "Castle");
        let dungeon = marker(&map, ScreenId::MAIN, "Dungeon 1");

        map.on_click(castle);
        map.on_hover_enter(dungeon);
        assert_eq!(map.hovered(), None);
        assert!(!map.on_click(dungeon));
    }

    #[test]
    fn test_markers_of_other_screens_are_inert() {
        let mut map = navigator();
        let armory = marker(&map, ScreenId(1), "Armory");
        map.on_hover_enter(armory);
        assert_eq!(map.hovered(), None);
        assert!(!map.on_click(armory));
    }

    #[test]
    fn test_open_popup_is_hidden_before_transition() {
        let mut map = navigator();
        let castle = marker(&map, ScreenId::MAIN, "Castle");
        let fade = info_fade(&map, castle);

        map.on_hover_enter(castle);
        run(&mut map, 30);
        assert_eq!(map.fader().alpha(fade), Some(1.0));

        map.on_click(castle);
        assert!(map.is_fading_out(fade));
        run(&mut map, 100);

        assert_eq!(map.current_screen(), ScreenId(1));
        assert!(map.popup().displayed().is_none());
        assert!(!map.fader().contains(fade));
    }

    #[test]
    fn test_hover_armed_before_click_does_not_cut_popup_fade() {
        let mut map = navigator();
        let a = marker(&map, ScreenId::MAIN, "Castle");
        let b = marker(&map, ScreenId::MAIN, "Dungeon 1");
        let fade_a = info_fade(&map, a);
        let fade_b = info_fade(&map, b);

        map.on_hover_enter(a);
        run(&mut map, 30);
        assert_eq!(map.fader().alpha(fade_a), Some(1.0));

        map.on_hover_exit();
        map.on_hover_enter(b);
        assert!(map.on_click(b));

        // popup fade runs at 6.0/s, so the box survives about 10 ticks
        let mut popup_ticks = 0;
        while map.fader().contains(fade_a) {
            run(&mut map, 1);
            popup_ticks += 1;
            assert!(map.fader().alpha(fade_b).unwrap_or(0.0) == 0.0);
            assert!(!map.is_fading_in(fade_b));
            assert!(popup_ticks < 100);
        }
        assert!(popup_ticks >= 9);

        run(&mut map, 100);
        assert_eq!(map.current_screen(), ScreenId(2));
    }

    #[test]
    fn test_polling_pointer_drives_hover_and_click() {
        let mut map = navigator();
        let mut pointer = ScriptedPointer::new();
        let castle = marker(&map, ScreenId::MAIN, "Castle");

        pointer.hover(castle);
        for _ in 0..30 {
            map.update(DT, &mut pointer);
        }
        assert_eq!(map.fader().alpha(info_fade(&map, castle)), Some(1.0));

        pointer.leave();
        map.update(DT, &mut pointer);
        assert!(!map.is_pointer_over_control());

        pointer.click(castle);
        map.update(DT, &mut pointer);
        assert!(map.is_transitioning());

        for _ in 0..100 {
            map.update(DT, &mut pointer);
        }
        assert_eq!(map.current_screen(), ScreenId(1));

        let back = marker(&map, ScreenId(1), "Back");
        pointer.click(back);
        for _ in 0..100 {
            map.update(DT, &mut pointer);
        }
        assert_eq!(map.current_screen(), ScreenId::MAIN);
    }

    #[test]
    fn test_shelf_follows_hover_flag() {
        let mut map = navigator();
        let castle = marker(&map, ScreenId::MAIN, "Castle");
        let rest = map.shelf().rest();

        map.on_hover_enter(castle);
        run(&mut map, 100);
        assert_ne!(map.shelf().offset(), rest);

        map.on_hover_exit();
        run(&mut map, 1);
        assert_eq!(map.shelf().offset(), rest);
    }
}
