//! Hover-triggered info popups
//!
//! Pointer-enter does not show anything by itself: it arms a short debounce
//! timer, and only the marker under the pointer when the timer fires gets its
//! popup. Sweeping the pointer across several markers therefore shows just
//! the one it settles on.
//!
//! Only one popup is ever visible. Showing a new popup snaps any other popup
//! that is still visible (or still fading) to fully hidden first.

use crate::fader::{FadeDirection, FadeHandle, FadeState, FadeTargetId, Fader};
use crate::map::MarkerId;

/// What the pointer rests on when the hover probe fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoverTarget {
    pub marker: MarkerId,
    /// Fade target of the marker's info box, if it has one
    pub info: Option<FadeTargetId>,
}

pub struct InfoPopupController {
    hover_delay: f32,
    fade_speed: f32,
    pending: Option<f32>,
    displayed: Option<FadeTargetId>,
    pointer_over_control: bool,
}

impl InfoPopupController {
    pub fn new(hover_delay: f32, fade_speed: f32) -> Self {
        InfoPopupController {
            hover_delay,
            fade_speed,
            pending: None,
            displayed: None,
            pointer_over_control: false,
        }
    }

    /// Arms (or re-arms) the hover probe
    pub fn on_hover_enter(&mut self, marker: MarkerId) {
        log::trace!("hover enter {}", marker);
        self.pending = Some(self.hover_delay);
    }

    /// Drops any armed probe and fades the displayed popup out
    pub fn on_hover_exit(&mut self, fader: &mut Fader) -> Option<FadeHandle> {
        self.pending = None;
        self.pointer_over_control = false;
        self.hide(fader)
    }

    /// Counts down the hover probe. When it fires, the popup of whatever is
    /// under the pointer right now is shown; returns that marker.
    pub fn tick(
        &mut self,
        delta_time: f32,
        under_pointer: Option<HoverTarget>,
        fader: &mut Fader,
    ) -> Option<MarkerId> {
        let remaining = self.pending? - delta_time;
        if remaining > 0.0 {
            self.pending = Some(remaining);
            return None;
        }
        self.pending = None;

        let Some(target) = under_pointer else {
            log::trace!("hover probe fired over nothing");
            return None;
        };

        self.pointer_over_control = true;
        match target.info {
            Some(info) => {
                self.show(info, fader);
            }
            None => log::debug!("{} has no info box", target.marker),
        }
        Some(target.marker)
    }

    /// Fades `target` in, first snapping any other visible popup to hidden
    pub fn show(&mut self, target: FadeTargetId, fader: &mut Fader) -> Option<FadeHandle> {
        if !fader.contains(target) {
            log::debug!("show requested for missing popup {}", target);
            return None;
        }

        if let Some(previous) = self.displayed.filter(|p| *p != target) {
            let still_showing = fader.alpha(previous).is_some_and(|a| a > 0.0)
                || fader.state(previous).is_some_and(|s| s != FadeState::Idle);
            if still_showing && fader.force_complete(previous, FadeDirection::Out) {
                log::debug!("popup {} pre-empted by {}", previous, target);
            }
        }

        self.displayed = Some(target);
        if fader.alpha(target) == Some(1.0) {
            return None;
        }
        fader.fade_to(target, FadeDirection::In, self.fade_speed)
    }

    /// Fades the displayed popup out. Returns the handle to wait on, or
    /// `None` when there is nothing to hide (no popup, or already at 0).
    pub fn hide(&mut self, fader: &mut Fader) -> Option<FadeHandle> {
        let current = self.displayed?;
        fader.cancel_direction(current, FadeDirection::In);

        if fader.alpha(current).is_none_or(|a| a == 0.0) {
            return None;
        }
        fader.fade_to(current, FadeDirection::Out, self.fade_speed)
    }

    /// True while the displayed popup has any opacity or is fading in
    pub fn is_visible(&self, fader: &Fader) -> bool {
        self.displayed.is_some_and(|id| {
            fader.alpha(id).is_some_and(|a| a > 0.0) || fader.is_fading_in(id)
        })
    }

    /// Disarms a pending hover probe without touching the displayed popup
    pub fn cancel_pending(&mut self) {
        if self.pending.take().is_some() {
            log::trace!("pending hover probe dropped");
        }
    }

    /// Drops the displayed-popup reference; used once its info box is destroyed
    pub fn forget(&mut self) {
        self.displayed = None;
        self.pending = None;
    }

    pub fn displayed(&self) -> Option<FadeTargetId> {
        self.displayed
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Whether the pointer currently rests on an interactive marker
    pub fn is_pointer_over_control(&self) -> bool {
        self.pointer_over_control
    }
}
