//! Draws the map state with plain SDL2 primitives
//!
//! Nothing here owns animation state: every alpha and position is read back
//! from the navigator each frame.

use super::pointer::{hit_extents, MARKER_HALF};
use super::text::{draw_text, draw_text_centered, text_width};
use mapnav::map::{Marker, MarkerKind, Screen};
use mapnav::scene::MemoryScene;
use mapnav::MapNavigator;
use sdl2::pixels::Color;
use sdl2::rect::Rect;
use sdl2::render::{BlendMode, Canvas};
use sdl2::video::Window;

const BACKGROUND: Color = Color::RGB(16, 16, 24);
const ICON_SIZE: u32 = 40;

/// Panel tint per screen index; wraps for larger maps
const SCREEN_TINTS: [(u8, u8, u8); 4] = [
    (46, 78, 52),
    (86, 70, 48),
    (52, 52, 78),
    (78, 44, 54),
];

fn with_alpha(color: Color, alpha: f32) -> Color {
    Color::RGBA(
        color.r,
        color.g,
        color.b,
        (alpha.clamp(0.0, 1.0) * color.a as f32).round() as u8,
    )
}

pub struct MapRenderer {
    pub show_debug: bool,
    width: u32,
    height: u32,
}

impl MapRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        MapRenderer {
            show_debug: false,
            width,
            height,
        }
    }

    pub fn render(
        &self,
        canvas: &mut Canvas<Window>,
        map: &MapNavigator<MemoryScene>,
    ) -> Result<(), String> {
        canvas.set_draw_color(BACKGROUND);
        canvas.clear();
        canvas.set_blend_mode(BlendMode::Blend);

        for screen in map.screens().iter().filter(|s| s.is_visible()) {
            self.render_screen(canvas, map, screen)?;
        }

        self.render_info_boxes(canvas, map)?;
        self.render_shelf(canvas, map)?;

        if self.show_debug {
            self.render_debug(canvas, map)?;
        }

        Ok(())
    }

    fn render_screen(
        &self,
        canvas: &mut Canvas<Window>,
        map: &MapNavigator<MemoryScene>,
        screen: &Screen,
    ) -> Result<(), String> {
        let alpha = map.screen_alpha(screen.id);
        if alpha <= 0.0 {
            return Ok(());
        }

        let (r, g, b) = SCREEN_TINTS[screen.id.index() % SCREEN_TINTS.len()];
        canvas.set_draw_color(with_alpha(Color::RGB(r, g, b), alpha));
        canvas.fill_rect(Rect::new(8, 8, self.width - 16, self.height - 16))?;

        draw_text_centered(
            canvas,
            &screen.name,
            self.width as i32 / 2,
            16,
            with_alpha(Color::RGB(230, 230, 210), alpha),
            2,
        )?;

        for marker in screen.markers.iter().filter_map(|id| map.markers().get(*id)) {
            let hovered = map.hovered() == Some(marker.id);
            self.render_marker(canvas, marker, hovered, alpha)?;
        }

        Ok(())
    }

    fn render_marker(
        &self,
        canvas: &mut Canvas<Window>,
        marker: &Marker,
        hovered: bool,
        alpha: f32,
    ) -> Result<(), String> {
        let (half_w, half_h) = hit_extents(marker.kind);
        let rect = Rect::new(
            (marker.anchor.x - half_w) as i32,
            (marker.anchor.y - half_h) as i32,
            (half_w * 2.0) as u32,
            (half_h * 2.0) as u32,
        );

        let fill = match (marker.kind, hovered) {
            (MarkerKind::Back, false) => Color::RGB(60, 60, 70),
            (MarkerKind::Back, true) => Color::RGB(90, 90, 105),
            (MarkerKind::PointOfInterest, false) => Color::RGB(200, 170, 60),
            (MarkerKind::PointOfInterest, true) => Color::RGB(255, 220, 90),
        };
        canvas.set_draw_color(with_alpha(fill, alpha));
        canvas.fill_rect(rect)?;
        canvas.set_draw_color(with_alpha(Color::RGB(20, 20, 20), alpha));
        canvas.draw_rect(rect)?;

        let label_color = with_alpha(Color::RGB(240, 240, 240), alpha);
        match marker.kind {
            MarkerKind::Back => draw_text_centered(
                canvas,
                "BACK",
                marker.anchor.x as i32,
                marker.anchor.y as i32 - 3,
                label_color,
                1,
            ),
            // Routes carry their name under the marker; plain points rely on the info box
            MarkerKind::PointOfInterest if marker.leads_to.is_some() => draw_text_centered(
                canvas,
                &marker.name,
                marker.anchor.x as i32,
                (marker.anchor.y + MARKER_HALF) as i32 + 4,
                label_color,
                1,
            ),
            MarkerKind::PointOfInterest => Ok(()),
        }
    }

    fn render_info_boxes(
        &self,
        canvas: &mut Canvas<Window>,
        map: &MapNavigator<MemoryScene>,
    ) -> Result<(), String> {
        for info in map.info_boxes() {
            let alpha = map.fader().alpha(info.fade).unwrap_or(0.0);
            if alpha <= 0.0 {
                continue;
            }

            let width = text_width(&info.label, 1) + 12;
            let rect = Rect::new(
                info.position.x as i32 - width as i32 / 2,
                info.position.y as i32 - 8,
                width,
                16,
            );
            canvas.set_draw_color(with_alpha(Color::RGBA(10, 10, 20, 220), alpha));
            canvas.fill_rect(rect)?;
            canvas.set_draw_color(with_alpha(Color::RGB(220, 200, 120), alpha));
            canvas.draw_rect(rect)?;
            draw_text_centered(
                canvas,
                &info.label,
                info.position.x as i32,
                info.position.y as i32 - 3,
                with_alpha(Color::RGB(255, 255, 255), alpha),
                1,
            )?;
        }
        Ok(())
    }

    /// Icon row, clipped to the slots that fit the viewport
    fn render_shelf(
        &self,
        canvas: &mut Canvas<Window>,
        map: &MapNavigator<MemoryScene>,
    ) -> Result<(), String> {
        let shelf = map.shelf();
        let visible = map.config().icon_shelf.visible_icons as u32;
        let rest = shelf.rest();
        let viewport = Rect::new(
            rest.x as i32,
            rest.y as i32,
            (shelf.slot_width() as u32 * visible).max(1),
            ICON_SIZE,
        );

        canvas.set_draw_color(Color::RGBA(0, 0, 0, 140));
        canvas.fill_rect(viewport)?;

        canvas.set_clip_rect(viewport);
        for (node, position) in shelf.icon_positions() {
            let rect = Rect::new(position.x as i32 + 2, position.y as i32 + 2, ICON_SIZE - 4, ICON_SIZE - 4);
            canvas.set_draw_color(Color::RGB(70, 110, 160));
            canvas.fill_rect(rect)?;

            let label = map.scene().get(node).map_or("", |n| n.label.as_str());
            let number = label.rsplit(' ').next().unwrap_or(label);
            draw_text_centered(
                canvas,
                number,
                rect.center().x(),
                rect.center().y() - 7,
                Color::RGB(240, 240, 240),
                2,
            )?;
        }
        canvas.set_clip_rect(None);

        Ok(())
    }

    fn render_debug(
        &self,
        canvas: &mut Canvas<Window>,
        map: &MapNavigator<MemoryScene>,
    ) -> Result<(), String> {
        let current = map.current_screen();
        let lines = [
            format!("SCREEN: {}", current),
            format!("TRANSITIONING: {}", map.is_transitioning()),
            format!("OVER CONTROL: {}", map.is_pointer_over_control()),
            format!("FADES: {}", map.fader().active_count()),
            format!("NODES: {}", map.scene().len()),
        ];

        canvas.set_draw_color(Color::RGBA(0, 0, 0, 180));
        canvas.fill_rect(Rect::new(12, self.height as i32 - 70, 200, 58))?;
        for (i, line) in lines.iter().enumerate() {
            draw_text(
                canvas,
                line,
                16,
                self.height as i32 - 66 + i as i32 * 10,
                Color::RGB(180, 255, 180),
                1,
            )?;
        }
        Ok(())
    }
}
