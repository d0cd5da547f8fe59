//! Sliding row of character icons
//!
//! While the pointer rests on a marker, the shelf walks left one slot at a
//! time to reveal the icons that do not fit its viewport, pauses after the
//! last slot, then snaps back to rest and starts over. Leaving the marker at
//! any point drops the sequence and puts the shelf straight back at rest.
//!
//! Movement is capped-rate (`Point::move_towards`), not eased, and a new
//! movement request always replaces the previous one.

use crate::config::IconShelfConfig;
use crate::motion::Point;
use crate::scene::{NodeHandle, NodeParent, PrefabKind, SceneService};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShelfState {
    Resting,
    SteppingOut { steps_taken: usize, timer: f32 },
    Paused { timer: f32 },
    SnappingBack,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Movement {
    target: Point,
    speed: f32,
}

pub struct IconShelfAnimator {
    rest: Point,
    slot_width: f32,
    step_count: usize,
    initial_delay: f32,
    step_interval: f32,
    step_speed: f32,
    snap_speed: f32,
    offset: Point,
    state: ShelfState,
    movement: Option<Movement>,
    icons: Vec<NodeHandle>,
}

impl IconShelfAnimator {
    /// Creates the shelf and instantiates its icons through `scene`
    pub fn build(config: &IconShelfConfig, scene: &mut dyn SceneService) -> Self {
        let mut icons = Vec::with_capacity(config.icon_count);
        for i in 0..config.icon_count {
            let position = Point::new(i as f32 * config.slot_width, 0.0);
            match scene.instantiate(PrefabKind::CharacterIcon, position, NodeParent::IconShelf) {
                Ok(node) => {
                    scene.set_label(node, &format!("Hero {}", i + 1));
                    icons.push(node);
                }
                Err(e) => log::warn!("Could not create shelf icon {}: {}", i + 1, e),
            }
        }

        IconShelfAnimator {
            rest: config.origin,
            slot_width: config.slot_width,
            step_count: icons.len().saturating_sub(config.visible_icons),
            initial_delay: config.initial_delay_secs,
            step_interval: config.step_interval_secs,
            step_speed: config.step_speed,
            snap_speed: config.snap_speed,
            offset: config.origin,
            state: ShelfState::Resting,
            movement: None,
            icons,
        }
    }

    /// Advances the shelf by one tick given the shared hover flag
    pub fn tick(&mut self, delta_time: f32, pointer_over_control: bool) {
        if !pointer_over_control {
            self.reset();
            return;
        }

        self.state = match self.state {
            ShelfState::Resting if self.step_count > 0 => ShelfState::SteppingOut {
                steps_taken: 0,
                timer: self.initial_delay - delta_time,
            },
            ShelfState::Resting => ShelfState::Resting,
            ShelfState::SteppingOut { steps_taken, timer } => {
                let timer = timer - delta_time;
                if timer > 0.0 {
                    ShelfState::SteppingOut { steps_taken, timer }
                } else {
                    let steps_taken = steps_taken + 1;
                    let target = self.rest.offset(-(steps_taken as f32) * self.slot_width, 0.0);
                    self.move_to(target, self.step_speed);

                    if steps_taken >= self.step_count {
                        ShelfState::Paused {
                            timer: self.step_interval,
                        }
                    } else {
                        ShelfState::SteppingOut {
                            steps_taken,
                            timer: timer + self.step_interval,
                        }
                    }
                }
            }
            ShelfState::Paused { timer } => {
                let timer = timer - delta_time;
                if timer > 0.0 {
                    ShelfState::Paused { timer }
                } else {
                    self.move_to(self.rest, self.snap_speed);
                    ShelfState::SnappingBack
                }
            }
            ShelfState::SnappingBack if self.movement.is_none() => ShelfState::Resting,
            ShelfState::SnappingBack => ShelfState::SnappingBack,
        };

        if let Some(movement) = self.movement {
            self.offset = self
                .offset
                .move_towards(movement.target, movement.speed * delta_time);
            if self.offset == movement.target {
                self.movement = None;
            }
        }
    }

    fn move_to(&mut self, target: Point, speed: f32) {
        self.movement = Some(Movement { target, speed });
    }

    /// Cancels any sequence and movement and puts the shelf at rest
    fn reset(&mut self) {
        if self.state != ShelfState::Resting || self.offset != self.rest {
            log::trace!("icon shelf reset from {:?}", self.state);
        }
        self.movement = None;
        self.offset = self.rest;
        self.state = ShelfState::Resting;
    }

    pub fn offset(&self) -> Point {
        self.offset
    }

    pub fn rest(&self) -> Point {
        self.rest
    }

    pub fn state(&self) -> ShelfState {
        self.state
    }

    pub fn is_moving(&self) -> bool {
        self.movement.is_some()
    }

    /// How many slots a full sequence walks
    pub fn step_count(&self) -> usize {
        self.step_count
    }

    pub fn slot_width(&self) -> f32 {
        self.slot_width
    }

    pub fn icons(&self) -> &[NodeHandle] {
        &self.icons
    }

    /// Screen position of each icon at the current offset
    pub fn icon_positions(&self) -> impl Iterator<Item = (NodeHandle, Point)> + '_ {
        self.icons
            .iter()
            .enumerate()
            .map(|(i, node)| (*node, self.offset.offset(i as f32 * self.slot_width, 0.0)))
    }
}
