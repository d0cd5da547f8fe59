//! Pointer input as seen by the map
//!
//! Whatever does hit-testing (the SDL frontend, a test script) reports which
//! marker the pointer is over and which one was clicked since the last poll.

use crate::map::MarkerId;

pub trait PointerSource {
    /// Marker currently under the pointer, if any
    fn hovered_element(&self) -> Option<MarkerId>;

    /// Marker clicked since the previous call; consumes the click
    fn take_click(&mut self) -> Option<MarkerId>;
}

/// Pointer driven by explicit calls, for tests and replays
#[derive(Debug, Clone, Default)]
pub struct ScriptedPointer {
    hovered: Option<MarkerId>,
    clicked: Option<MarkerId>,
}

impl ScriptedPointer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hover(&mut self, marker: MarkerId) {
        self.hovered = Some(marker);
    }

    pub fn leave(&mut self) {
        self.hovered = None;
    }

    pub fn click(&mut self, marker: MarkerId) {
        self.hovered = Some(marker);
        self.clicked = Some(marker);
    }
}

impl PointerSource for ScriptedPointer {
    fn hovered_element(&self) -> Option<MarkerId> {
        self.hovered
    }

    fn take_click(&mut self) -> Option<MarkerId> {
        self.clicked.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_is_consumed() {
        let mut pointer = ScriptedPointer::new();
        pointer.click(MarkerId(2));

        assert_eq!(pointer.take_click(), Some(MarkerId(2)));
        assert_eq!(pointer.take_click(), None);
        assert_eq!(pointer.hovered_element(), Some(MarkerId(2)));
    }

    #[test]
    fn test_leave_clears_hover() {
        let mut pointer = ScriptedPointer::new();
        pointer.hover(MarkerId(1));
        pointer.leave();
        assert_eq!(pointer.hovered_element(), None);
    }
}
