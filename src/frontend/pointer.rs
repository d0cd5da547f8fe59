use mapnav::map::{MarkerId, MarkerKind, MarkerRegistry, ScreenId};
use mapnav::motion::Point;
use mapnav::input::PointerSource;

/// Half the side of a point-of-interest marker's square
pub const MARKER_HALF: f32 = 8.0;
/// Back buttons are wider than they are tall
pub const BACK_HALF_WIDTH: f32 = 24.0;
pub const BACK_HALF_HEIGHT: f32 = 10.0;

/// Half extents of the clickable area of a marker
pub fn hit_extents(kind: MarkerKind) -> (f32, f32) {
    match kind {
        MarkerKind::PointOfInterest => (MARKER_HALF, MARKER_HALF),
        MarkerKind::Back => (BACK_HALF_WIDTH, BACK_HALF_HEIGHT),
    }
}

/// Mouse position hit-tested against the markers of the current screen
#[derive(Debug, Default)]
pub struct HitTestPointer {
    position: Option<Point>,
    hovered: Option<MarkerId>,
    clicked: Option<MarkerId>,
}

impl HitTestPointer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(&mut self, x: i32, y: i32) {
        self.position = Some(Point::new(x as f32, y as f32));
    }

    pub fn leave(&mut self) {
        self.position = None;
        self.hovered = None;
    }

    pub fn position(&self) -> Option<Point> {
        self.position
    }

    /// Re-evaluates which marker is under the pointer
    pub fn refresh(&mut self, markers: &MarkerRegistry, screen: ScreenId) {
        self.hovered = self.position.and_then(|p| marker_at(markers, screen, p));
    }

    /// Registers a click at (`x`, `y`) on whatever marker is there
    pub fn click(&mut self, x: i32, y: i32, markers: &MarkerRegistry, screen: ScreenId) {
        self.move_to(x, y);
        self.refresh(markers, screen);
        self.clicked = self.hovered;
    }
}

impl PointerSource for HitTestPointer {
    fn hovered_element(&self) -> Option<MarkerId> {
        self.hovered
    }

    fn take_click(&mut self) -> Option<MarkerId> {
        self.clicked.take()
    }
}

/// Topmost marker on `screen` containing `point`
fn marker_at(markers: &MarkerRegistry, screen: ScreenId, point: Point) -> Option<MarkerId> {
    markers
        .on_screen(screen)
        .filter(|m| {
            let (half_w, half_h) = hit_extents(m.kind);
            (point.x - m.anchor.x).abs() <= half_w && (point.y - m.anchor.y).abs() <= half_h
        })
        .last()
        .map(|m| m.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mapnav::MapConfig;

    fn registry() -> MarkerRegistry {
        MarkerRegistry::from_config(&MapConfig::default())
    }

    #[test]
    fn test_hit_on_anchor() {
        let markers = registry();
        let castle = markers
            .find_by_name(ScreenId::MAIN, "Castle")
            .map(|m| (m.id, m.anchor))
            .unwrap();

        let mut pointer = HitTestPointer::new();
        pointer.move_to(castle.1.x as i32 + 3, castle.1.y as i32 - 3);
        pointer.refresh(&markers, ScreenId::MAIN);
        assert_eq!(pointer.hovered_element(), Some(castle.0));
    }

    #[test]
    fn test_miss_and_other_screen() {
        let markers = registry();
        let mut pointer = HitTestPointer::new();
        pointer.move_to(0, 0);
        pointer.refresh(&markers, ScreenId::MAIN);
        assert_eq!(pointer.hovered_element(), None);

        let back = markers.find_by_name(ScreenId(1), "Back").unwrap();
        pointer.move_to(back.anchor.x as i32, back.anchor.y as i32);
        pointer.refresh(&markers, ScreenId::MAIN);
        assert_eq!(pointer.hovered_element(), None);
        pointer.refresh(&markers, ScreenId(1));
        assert_eq!(pointer.hovered_element(), Some(back.id));
    }

    #[test]
    fn test_click_is_consumed() {
        let markers = registry();
        let castle = markers.find_by_name(ScreenId::MAIN, "Castle").unwrap();

        let mut pointer = HitTestPointer::new();
        pointer.click(castle.anchor.x as i32, castle.anchor.y as i32, &markers, ScreenId::MAIN);
        assert_eq!(pointer.take_click(), Some(castle.id));
        assert_eq!(pointer.take_click(), None);
    }

    #[test]
    fn test_leave_clears_hover() {
        let markers = registry();
        let castle = markers.find_by_name(ScreenId::MAIN, "Castle").unwrap();

        let mut pointer = HitTestPointer::new();
        pointer.move_to(castle.anchor.x as i32, castle.anchor.y as i32);
        pointer.refresh(&markers, ScreenId::MAIN);
        pointer.leave();
        assert_eq!(pointer.hovered_element(), None);
        assert_eq!(pointer.position(), None);
    }
}
