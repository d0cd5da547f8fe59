mod frontend;

use frontend::{HitTestPointer, InputSystem, MapAction, MapRenderer};
use mapnav::scene::MemoryScene;
use mapnav::transition::TransitionEvent;
use mapnav::{logging, MapConfig, MapNavigator};
use std::path::PathBuf;

// Logical resolution; the window is an integer multiple of this
const MAP_WIDTH: u32 = 640;
const MAP_HEIGHT: u32 = 360;

const FRAME_RATE: u32 = 60;
const DELTA_TIME: f32 = 1.0 / FRAME_RATE as f32;

/// Calculate the largest integer window scale that fits the primary display
fn calculate_window_scale(video_subsystem: &sdl2::VideoSubsystem) -> u32 {
    match video_subsystem.desktop_display_mode(0) {
        Ok(display_mode) => {
            // Leave 10% margin for taskbars/decorations
            let usable_w = (display_mode.w as f32 * 0.9) as i32;
            let usable_h = (display_mode.h as f32 * 0.9) as i32;

            let scale = (usable_w / MAP_WIDTH as i32).min(usable_h / MAP_HEIGHT as i32);
            scale.clamp(1, 4) as u32
        }
        Err(e) => {
            log::warn!("Could not detect monitor size ({}), using 2x scale", e);
            2
        }
    }
}

fn main() -> Result<(), String> {
    logging::init();

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = MapConfig::load_or_default(config_path.as_deref());
    let screen_count = config.screens.len();

    let mut map = MapNavigator::new(config, MemoryScene::new(screen_count))?;

    let sdl_context = sdl2::init()?;
    let video_subsystem = sdl_context.video()?;

    let window_scale = calculate_window_scale(&video_subsystem);
    let window_width = MAP_WIDTH * window_scale;
    let window_height = MAP_HEIGHT * window_scale;
    log::info!(
        "Monitor scale: {}x (window: {}x{})",
        window_scale,
        window_width,
        window_height
    );

    let window = video_subsystem
        .window("Map Navigator", window_width, window_height)
        .position_centered()
        .build()
        .map_err(|e| e.to_string())?;

    let mut canvas = window.into_canvas().build().map_err(|e| e.to_string())?;
    canvas
        .set_logical_size(MAP_WIDTH, MAP_HEIGHT)
        .map_err(|e| e.to_string())?;

    let mut event_pump = sdl_context.event_pump()?;
    let mut input_system = InputSystem::new();
    let mut pointer = HitTestPointer::new();
    let mut renderer = MapRenderer::new(MAP_WIDTH, MAP_HEIGHT);

    'running: loop {
        input_system.update_context(map.is_transitioning());
        let current = map.current_screen();

        for action in input_system.poll_events(&mut event_pump) {
            match action {
                MapAction::Quit => break 'running,
                MapAction::PointerMoved(x, y) => pointer.move_to(x, y),
                MapAction::PointerLeft => pointer.leave(),
                MapAction::Click(x, y) => pointer.click(x, y, map.markers(), current),
                MapAction::Back => {
                    map.on_back();
                }
                MapAction::ToggleDebugOverlay => renderer.show_debug = !renderer.show_debug,
            }
        }

        // Update: hover and clicks feed the navigator, which drives every animation
        pointer.refresh(map.markers(), map.current_screen());
        map.update(DELTA_TIME, &mut pointer);

        for event in map.drain_events() {
            match event {
                TransitionEvent::Completed { from, to } => {
                    log::debug!("transition {} -> {} complete", from, to)
                }
                other => log::trace!("{:?}", other),
            }
        }

        // Render
        renderer.render(&mut canvas, &map)?;
        canvas.present();

        // Cap framerate to ~60 FPS
        std::thread::sleep(std::time::Duration::new(0, 1_000_000_000u32 / FRAME_RATE));
    }

    log::info!("Closing map on {}", map.current_screen());
    Ok(())
}
