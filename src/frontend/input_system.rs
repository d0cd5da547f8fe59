use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::mouse::MouseButton;
use sdl2::EventPump;

/// High-level actions the map window reacts to
///
/// Raw SDL2 events are translated into these so the main loop never matches
/// on SDL types directly.
#[derive(Debug, Clone, PartialEq)]
pub enum MapAction {
    /// Pointer moved to (x, y) in logical coordinates
    PointerMoved(i32, i32),
    /// Left click at (x, y)
    Click(i32, i32),
    /// Pointer left the window
    PointerLeft,
    Back,
    ToggleDebugOverlay,
    Quit,
}

/// Which actions currently get through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputContext {
    /// Markers are live
    Browsing,
    /// A screen transition is running; clicks and back are dropped
    Transitioning,
}

pub struct InputSystem {
    pub context: InputContext,
}

impl InputSystem {
    pub fn new() -> Self {
        InputSystem {
            context: InputContext::Browsing,
        }
    }

    pub fn update_context(&mut self, transitioning: bool) {
        self.context = if transitioning {
            InputContext::Transitioning
        } else {
            InputContext::Browsing
        };
    }

    /// Drains pending SDL2 events into map actions
    pub fn poll_events(&self, event_pump: &mut EventPump) -> Vec<MapAction> {
        let mut actions = Vec::new();

        for event in event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => actions.push(MapAction::Quit),
                Event::KeyDown {
                    keycode: Some(key), ..
                } => self.handle_keydown(key, &mut actions),
                Event::MouseMotion { x, y, .. } => actions.push(MapAction::PointerMoved(x, y)),
                Event::MouseButtonDown {
                    mouse_btn: MouseButton::Left,
                    x,
                    y,
                    ..
                } => {
                    if self.context == InputContext::Browsing {
                        actions.push(MapAction::Click(x, y));
                    }
                }
                Event::Window {
                    win_event: sdl2::event::WindowEvent::Leave,
                    ..
                } => actions.push(MapAction::PointerLeft),
                _ => {}
            }
        }

        actions
    }

    fn handle_keydown(&self, key: Keycode, actions: &mut Vec<MapAction>) {
        match key {
            Keycode::Escape | Keycode::Backspace => {
                if self.context == InputContext::Browsing {
                    actions.push(MapAction::Back);
                }
            }
            Keycode::F3 => actions.push(MapAction::ToggleDebugOverlay),
            Keycode::Q => actions.push(MapAction::Quit),
            _ => {}
        }
    }
}

impl Default for InputSystem {
    fn default() -> Self {
        Self::new()
    }
}
