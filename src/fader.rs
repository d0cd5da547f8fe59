//! Opacity fades for screens and info popups
//!
//! The [`Fader`] owns every opacity-bearing target in the map UI and moves
//! each one toward its goal (fully transparent or fully opaque) once per
//! tick. A target carries at most one fade at a time: its [`FadeState`] is
//! either idle or holds the single in-flight [`FadeHandle`], so a target can
//! never be fading in and out at once.
//!
//! # Rules
//!
//! - Asking for the fade that is already running returns the same handle.
//! - Asking for the opposite fade cancels the running one and restarts from
//!   the current alpha, with no blending between the two.
//! - A fade ends only by reaching its goal exactly, by [`Fader::cancel`], or
//!   by [`Fader::force_complete`].
//!
//! # Example
//!
//! ```rust
//! use mapnav::fader::{FadeDirection, Fader};
//!
//! let mut fader = Fader::new(3.0);
//! let popup = fader.register(0.0);
//!
//! let handle = fader.fade_to(popup, FadeDirection::In, 2.0).unwrap();
//! while fader.is_running(handle) {
//!     fader.tick(1.0 / 60.0);
//! }
//! assert_eq!(fader.alpha(popup), Some(1.0));
//! ```

use crate::motion::move_towards;
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FadeTargetId(pub u32);

impl fmt::Display for FadeTargetId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "target#{}", self.0)
    }
}

/// Identifies one fade operation. Handles are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FadeHandle(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeDirection {
    In,
    Out,
}

impl FadeDirection {
    /// Alpha the fade ends at
    pub fn goal(self) -> f32 {
        match self {
            FadeDirection::In => 1.0,
            FadeDirection::Out => 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeState {
    Idle,
    FadingIn(FadeHandle),
    FadingOut(FadeHandle),
}

impl FadeState {
    pub fn handle(self) -> Option<FadeHandle> {
        match self {
            FadeState::Idle => None,
            FadeState::FadingIn(h) | FadeState::FadingOut(h) => Some(h),
        }
    }

    pub fn direction(self) -> Option<FadeDirection> {
        match self {
            FadeState::Idle => None,
            FadeState::FadingIn(_) => Some(FadeDirection::In),
            FadeState::FadingOut(_) => Some(FadeDirection::Out),
        }
    }
}

#[derive(Debug, Clone)]
struct FadeTarget {
    alpha: f32,
    state: FadeState,
    speed: f32,
}

pub struct Fader {
    base_rate: f32,
    targets: HashMap<FadeTargetId, FadeTarget>,
    next_target: u32,
    next_handle: u64,
}

impl Fader {
    /// `base_rate` is the alpha change per second at speed multiplier 1.0
    pub fn new(base_rate: f32) -> Self {
        Fader {
            base_rate,
            targets: HashMap::new(),
            next_target: 0,
            next_handle: 0,
        }
    }

    /// Adds an idle target at `alpha` (clamped to 0..=1)
    pub fn register(&mut self, alpha: f32) -> FadeTargetId {
        let id = FadeTargetId(self.next_target);
        self.next_target += 1;
        self.targets.insert(
            id,
            FadeTarget {
                alpha: alpha.clamp(0.0, 1.0),
                state: FadeState::Idle,
                speed: 0.0,
            },
        );
        id
    }

    /// Drops a target together with any fade it was running
    pub fn remove(&mut self, id: FadeTargetId) -> bool {
        self.targets.remove(&id).is_some()
    }

    pub fn contains(&self, id: FadeTargetId) -> bool {
        self.targets.contains_key(&id)
    }

    pub fn alpha(&self, id: FadeTargetId) -> Option<f32> {
        self.targets.get(&id).map(|t| t.alpha)
    }

    pub fn state(&self, id: FadeTargetId) -> Option<FadeState> {
        self.targets.get(&id).map(|t| t.state)
    }

    pub fn is_fading_in(&self, id: FadeTargetId) -> bool {
        matches!(self.state(id), Some(FadeState::FadingIn(_)))
    }

    pub fn is_fading_out(&self, id: FadeTargetId) -> bool {
        matches!(self.state(id), Some(FadeState::FadingOut(_)))
    }

    /// True while the fade identified by `handle` has neither finished nor
    /// been cancelled
    pub fn is_running(&self, handle: FadeHandle) -> bool {
        self.targets
            .values()
            .any(|t| t.state.handle() == Some(handle))
    }

    /// Number of fades currently in flight across all targets
    pub fn active_count(&self) -> usize {
        self.targets
            .values()
            .filter(|t| t.state != FadeState::Idle)
            .count()
    }

    /// Starts (or joins) a fade of `id` toward `direction`'s goal.
    ///
    /// Returns `None` only when `id` is not registered. A target already
    /// sitting at the goal finishes immediately: the returned handle is
    /// never running.
    pub fn fade_to(
        &mut self,
        id: FadeTargetId,
        direction: FadeDirection,
        speed: f32,
    ) -> Option<FadeHandle> {
        let Some(target) = self.targets.get_mut(&id) else {
            log::debug!("fade requested for unknown {}", id);
            return None;
        };

        match (target.state, direction) {
            (FadeState::FadingIn(h), FadeDirection::In)
            | (FadeState::FadingOut(h), FadeDirection::Out) => return Some(h),
            (FadeState::Idle, _) => {}
            (running, _) => {
                log::debug!("{}: cancelling {:?} for {:?}", id, running, direction);
            }
        }

        let handle = FadeHandle(self.next_handle);
        self.next_handle += 1;

        if target.alpha == direction.goal() {
            target.state = FadeState::Idle;
            return Some(handle);
        }

        target.speed = speed;
        target.state = match direction {
            FadeDirection::In => FadeState::FadingIn(handle),
            FadeDirection::Out => FadeState::FadingOut(handle),
        };
        Some(handle)
    }

    /// Advances every running fade by `delta_time` seconds and returns the
    /// handles that reached their goal during this tick
    pub fn tick(&mut self, delta_time: f32) -> Vec<FadeHandle> {
        let mut finished = Vec::new();

        for target in self.targets.values_mut() {
            let (Some(handle), Some(direction)) = (target.state.handle(), target.state.direction())
            else {
                continue;
            };

            let goal = direction.goal();
            let step = (target.speed * self.base_rate * delta_time).max(0.0);
            target.alpha = move_towards(target.alpha, goal, step).clamp(0.0, 1.0);

            if target.alpha == goal {
                target.state = FadeState::Idle;
                finished.push(handle);
            }
        }

        finished
    }

    /// Stops whatever fade `id` is running; alpha stays where it is
    pub fn cancel(&mut self, id: FadeTargetId) -> Option<FadeHandle> {
        let target = self.targets.get_mut(&id)?;
        let cancelled = target.state.handle();
        target.state = FadeState::Idle;
        cancelled
    }

    /// Stops the fade of `id` only if it runs in `direction`
    pub fn cancel_direction(
        &mut self,
        id: FadeTargetId,
        direction: FadeDirection,
    ) -> Option<FadeHandle> {
        let target = self.targets.get_mut(&id)?;
        if target.state.direction() != Some(direction) {
            return None;
        }
        let cancelled = target.state.handle();
        target.state = FadeState::Idle;
        cancelled
    }

    /// Jumps `id` straight to `direction`'s goal and clears its fade
    pub fn force_complete(&mut self, id: FadeTargetId, direction: FadeDirection) -> bool {
        match self.targets.get_mut(&id) {
            Some(target) => {
                target.alpha = direction.goal();
                target.state = FadeState::Idle;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_fade_in_reaches_one_exactly() {
        let mut fader = Fader::new(3.0);
        let id = fader.register(0.0);
        let handle = fader.fade_to(id, FadeDirection::In, 1.0).unwrap();

        let mut ticks = 0;
        while fader.is_running(handle) {
            fader.tick(DT);
            ticks += 1;
            assert!(ticks < 1000);
        }

        assert_eq!(fader.alpha(id), Some(1.0));
        assert_eq!(fader.state(id), Some(FadeState::Idle));
        // 1.0 alpha at 3.0/s is about 20 frames
        assert!((19..=22).contains(&ticks));
    }

    #[test]
    fn test_alpha_moves_monotonically_without_overshoot() {
        let mut fader = Fader::new(3.0);
        let id = fader.register(1.0);
        fader.fade_to(id, FadeDirection::Out, 2.0);

        let mut previous = 1.0;
        while fader.is_fading_out(id) {
            fader.tick(DT);
            let alpha = fader.alpha(id).unwrap();
            assert!(alpha < previous);
            assert!(alpha >= 0.0);
            previous = alpha;
        }
        assert_eq!(previous, 0.0);
    }

    #[test]
    fn test_same_direction_request_is_idempotent() {
        let mut fader = Fader::new(3.0);
        let id = fader.register(0.0);

        let first = fader.fade_to(id, FadeDirection::In, 1.0).unwrap();
        let second = fader.fade_to(id, FadeDirection::In, 1.0).unwrap();
        assert_eq!(first, second);
        assert_eq!(fader.active_count(), 1);

        fader.tick(0.1);
        // single-speed convergence: 0.3 after 0.1s, not 0.6
        assert!((fader.alpha(id).unwrap() - 0.3).abs() < 1e-5);
    }

    #[test]
    fn test_opposite_request_cancels_and_restarts_from_current_alpha() {
        let mut fader = Fader::new(3.0);
        let id = fader.register(0.0);

        let fade_in = fader.fade_to(id, FadeDirection::In, 1.0).unwrap();
        fader.tick(0.1);
        let mid = fader.alpha(id).unwrap();

        let fade_out = fader.fade_to(id, FadeDirection::Out, 1.0).unwrap();
        assert_ne!(fade_in, fade_out);
        assert!(!fader.is_running(fade_in));
        assert!(fader.is_running(fade_out));
        assert_eq!(fader.alpha(id), Some(mid));
        assert_eq!(fader.active_count(), 1);

        fader.tick(0.05);
        assert!(fader.alpha(id).unwrap() < mid);
    }

    #[test]
    fn test_fade_to_current_goal_finishes_immediately() {
        let mut fader = Fader::new(3.0);
        let id = fader.register(1.0);

        let handle = fader.fade_to(id, FadeDirection::In, 1.0).unwrap();
        assert!(!fader.is_running(handle));
        assert_eq!(fader.state(id), Some(FadeState::Idle));
    }

    #[test]
    fn test_cancel_freezes_alpha() {
        let mut fader = Fader::new(3.0);
        let id = fader.register(0.0);
        let handle = fader.fade_to(id, FadeDirection::In, 1.0).unwrap();
        fader.tick(0.1);

        assert_eq!(fader.cancel(id), Some(handle));
        let frozen = fader.alpha(id).unwrap();
        fader.tick(0.1);
        assert_eq!(fader.alpha(id), Some(frozen));
    }

    #[test]
    fn test_cancel_direction_leaves_other_direction_alone() {
        let mut fader = Fader::new(3.0);
        let id = fader.register(1.0);
        fader.fade_to(id, FadeDirection::Out, 1.0);

        assert_eq!(fader.cancel_direction(id, FadeDirection::In), None);
        assert!(fader.is_fading_out(id));
    }

    #[test]
    fn test_force_complete() {
        let mut fader = Fader::new(3.0);
        let id = fader.register(0.6);
        let handle = fader.fade_to(id, FadeDirection::Out, 1.0).unwrap();

        assert!(fader.force_complete(id, FadeDirection::Out));
        assert_eq!(fader.alpha(id), Some(0.0));
        assert!(!fader.is_running(handle));
        assert!(!fader.force_complete(FadeTargetId(99), FadeDirection::Out));
    }

    #[test]
    fn test_unknown_target_is_ignored() {
        let mut fader = Fader::new(3.0);
        assert!(fader.fade_to(FadeTargetId(7), FadeDirection::In, 1.0).is_none());
        assert!(fader.cancel(FadeTargetId(7)).is_none());
    }

    #[test]
    fn test_never_more_than_one_handle_per_target() {
        let mut fader = Fader::new(3.0);
        let id = fader.register(0.5);
        let requests = [
            FadeDirection::In,
            FadeDirection::Out,
            FadeDirection::Out,
            FadeDirection::In,
            FadeDirection::In,
            FadeDirection::Out,
        ];

        for direction in requests {
            fader.fade_to(id, direction, 1.0);
            assert!(fader.active_count() <= 1);
            fader.tick(DT);
            assert!(fader.active_count() <= 1);
        }
    }
}
