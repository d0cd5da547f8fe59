//! Switching between map screens
//!
//! A transition runs as a fixed pipeline advanced once per tick. Each stage
//! that animates parks on a fade handle and the next stage starts only after
//! that fade reports completion, so the outgoing screen always reaches zero
//! opacity before the incoming one starts to appear.
//!
//! Pipeline:
//! 1. disable marker input
//! 2. hide the open info popup (waits only if it is not already at 0)
//! 3. destroy the outgoing screen's info boxes
//! 4. fade the outgoing screen out, then hide it
//! 5. show the incoming screen and fade it in
//! 6. re-enable marker input
//! 7. spawn the incoming screen's info boxes
//! 8. make the incoming screen current
//!
//! Requests made while a transition runs are dropped, not queued.

use crate::fader::{FadeDirection, FadeHandle, Fader};
use crate::map::{MarkerRegistry, Route, ScreenId, ScreenRegistry};
use crate::popup::InfoPopupController;
use crate::scene::SceneService;
use crate::spawner::PointOfInterestSpawner;

/// Observable progress of a transition, in pipeline order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionEvent {
    InputDisabled,
    PopupHidden,
    InfoBoxesCleared { screen: ScreenId, count: usize },
    ScreenFadedOut(ScreenId),
    ScreenHidden(ScreenId),
    ScreenShown(ScreenId),
    ScreenFadedIn(ScreenId),
    InputEnabled,
    InfoBoxesSpawned { screen: ScreenId, count: usize },
    Completed { from: ScreenId, to: ScreenId },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionState {
    Idle,
    Transitioning { from: ScreenId, to: ScreenId },
}

/// Everything a transition touches, borrowed for one call
pub struct TransitionDeps<'a> {
    pub screens: &'a mut ScreenRegistry,
    pub markers: &'a mut MarkerRegistry,
    pub fader: &'a mut Fader,
    pub popup: &'a mut InfoPopupController,
    pub spawner: &'a mut PointOfInterestSpawner,
    pub scene: &'a mut dyn SceneService,
}

#[derive(Debug, Clone, Copy)]
enum Stage {
    HidingPopup(Option<FadeHandle>),
    FadingOut(Option<FadeHandle>),
    FadingIn(Option<FadeHandle>),
}

#[derive(Debug, Clone, Copy)]
struct Transition {
    from: ScreenId,
    to: ScreenId,
    stage: Stage,
}

pub struct ScreenTransitionController {
    current: ScreenId,
    back_target: ScreenId,
    fade_speed: f32,
    active: Option<Transition>,
    events: Vec<TransitionEvent>,
}

impl ScreenTransitionController {
    pub fn new(back_target: ScreenId, fade_speed: f32) -> Self {
        ScreenTransitionController {
            current: ScreenId::MAIN,
            back_target,
            fade_speed,
            active: None,
            events: Vec::new(),
        }
    }

    pub fn current(&self) -> ScreenId {
        self.current
    }

    pub fn state(&self) -> TransitionState {
        match self.active {
            Some(t) => TransitionState::Transitioning {
                from: t.from,
                to: t.to,
            },
            None => TransitionState::Idle,
        }
    }

    pub fn is_transitioning(&self) -> bool {
        self.active.is_some()
    }

    pub fn resolve(&self, route: Route) -> ScreenId {
        match route {
            Route::Screen(id) => id,
            Route::Back => self.back_target,
        }
    }

    /// Starts a transition toward `route`. Returns false when the request is
    /// dropped: a transition is already running, the target does not exist,
    /// or the target is already current.
    pub fn request(&mut self, route: Route, deps: &mut TransitionDeps) -> bool {
        let to = self.resolve(route);

        if let Some(running) = self.active {
            log::debug!(
                "Ignoring transition to {} while {} -> {} is running",
                to,
                running.from,
                running.to
            );
            return false;
        }
        if !deps.screens.contains(to) {
            log::debug!("Ignoring transition to unknown screen {}", to);
            return false;
        }
        if to == self.current {
            log::debug!("Already on {}", to);
            return false;
        }

        let from = self.current;
        log::info!("Transition {} -> {}", from, to);

        deps.markers.disable_all();
        deps.popup.cancel_pending();
        self.events.push(TransitionEvent::InputDisabled);

        let hide = if deps.popup.is_visible(deps.fader) {
            deps.popup.hide(deps.fader)
        } else {
            None
        };

        self.active = Some(Transition {
            from,
            to,
            stage: Stage::HidingPopup(hide),
        });
        self.advance(deps);
        true
    }

    /// Moves the running transition forward as far as finished fades allow
    pub fn tick(&mut self, deps: &mut TransitionDeps) {
        self.advance(deps);
    }

    /// Takes the events recorded since the last call
    pub fn drain_events(&mut self) -> Vec<TransitionEvent> {
        std::mem::take(&mut self.events)
    }

    fn advance(&mut self, deps: &mut TransitionDeps) {
        let Some(mut transition) = self.active.take() else {
            return;
        };

        loop {
            match transition.stage {
                Stage::HidingPopup(handle) => {
                    if Self::waiting(handle, deps.fader) {
                        break;
                    }
                    if handle.is_some() {
                        self.events.push(TransitionEvent::PopupHidden);
                    }

                    let count = deps
                        .spawner
                        .clear(transition.from, deps.scene, deps.fader);
                    deps.popup.forget();
                    self.events.push(TransitionEvent::InfoBoxesCleared {
                        screen: transition.from,
                        count,
                    });

                    let fade = self.fade_screen(transition.from, FadeDirection::Out, deps);
                    transition.stage = Stage::FadingOut(fade);
                }
                Stage::FadingOut(handle) => {
                    if Self::waiting(handle, deps.fader) {
                        break;
                    }
                    self.events.push(TransitionEvent::ScreenFadedOut(transition.from));

                    deps.screens.set_visible(transition.from, false);
                    self.events.push(TransitionEvent::ScreenHidden(transition.from));
                    deps.screens.set_visible(transition.to, true);
                    self.events.push(TransitionEvent::ScreenShown(transition.to));

                    let fade = self.fade_screen(transition.to, FadeDirection::In, deps);
                    transition.stage = Stage::FadingIn(fade);
                }
                Stage::FadingIn(handle) => {
                    if Self::waiting(handle, deps.fader) {
                        break;
                    }
                    self.events.push(TransitionEvent::ScreenFadedIn(transition.to));

                    deps.markers.enable_all();
                    self.events.push(TransitionEvent::InputEnabled);

                    let count = deps
                        .spawner
                        .spawn(transition.to, deps.markers, deps.scene, deps.fader)
                        .len();
                    self.events.push(TransitionEvent::InfoBoxesSpawned {
                        screen: transition.to,
                        count,
                    });

                    self.current = transition.to;
                    self.events.push(TransitionEvent::Completed {
                        from: transition.from,
                        to: transition.to,
                    });
                    log::info!("Now showing {}", transition.to);
                    return;
                }
            }
        }

        self.active = Some(transition);
    }

    fn waiting(handle: Option<FadeHandle>, fader: &Fader) -> bool {
        handle.is_some_and(|h| fader.is_running(h))
    }

    fn fade_screen(
        &self,
        screen: ScreenId,
        direction: FadeDirection,
        deps: &mut TransitionDeps,
    ) -> Option<FadeHandle> {
        let container = deps.screens.get(screen)?.container;
        deps.fader.fade_to(container, direction, self.fade_speed)
    }
}
