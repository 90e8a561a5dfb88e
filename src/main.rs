use std::sync::Arc;
use std::time::{Duration, Instant};

use glam::Vec4;

use crate::abs::App;
use crate::config::Config;
use crate::other::{FrameStats, UpdateContext};
use crate::scenes::{Scene, SceneManager, Stage, clear::ClearScene, triangle::TriangleScene};

mod abs;
mod animation;
mod config;
mod logging;
mod other;
mod scenes;

fn main() {
    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    // The log level lives in the config, so the config is read before the logger exists and
    // any error is reported afterwards.
    let config = Config::load();
    let configured_level = config.as_ref().ok().map(|c| c.log_level.as_str());
    let level = logging::resolve_level(configured_level);
    let init_level = level.as_ref().copied().unwrap_or(log::LevelFilter::Info);
    if let Err(e) = logging::init(init_level) {
        eprintln!("{e}");
    }
    if let Err(e) = level {
        log::warn!("{e}, logging at info");
    }
    let config = config?;
    match Config::default_path() {
        Some(path) if path.exists() => log::info!("Loaded config from {}", path.display()),
        Some(path) => log::info!("No config at {}, using defaults", path.display()),
        None => log::info!("No config directory, using defaults"),
    }

    let stage = match std::env::args().nth(1) {
        Some(arg) => arg.parse::<Stage>()?,
        None => config.stage,
    };

    let mut app = App::new(&config.window)?;
    app.reset_viewport();

    let gl = Arc::clone(&app.gl);
    let clear_color = Vec4::from(config.clear_color);
    let mut scene_manager = SceneManager::new(
        stage,
        Box::new(move |stage| -> Box<dyn Scene> {
            match stage {
                Stage::Clear => Box::new(ClearScene::new(clear_color)),
                Stage::Triangle => Box::new(TriangleScene::new(&gl)),
            }
        }),
    );

    let frame_sleep = Duration::from_millis(config.frame_sleep_ms);
    let mut frame_stats = FrameStats::default();
    let mut frame: u64 = 0;
    let mut last_frame_time = Instant::now();

    'running: loop {
        let now = Instant::now();
        let delta_time = now.duration_since(last_frame_time).as_secs_f32();
        last_frame_time = now;

        let events: Vec<sdl2::event::Event> = app.event_pump.poll_iter().collect();
        for event in &events {
            scene_manager.handle_event(event);
            match event {
                sdl2::event::Event::Quit { .. } => break 'running,
                sdl2::event::Event::Window {
                    win_event: sdl2::event::WindowEvent::SizeChanged(..),
                    ..
                } => app.reset_viewport(),
                _ => {}
            }
        }

        let update_ctx = UpdateContext::new(delta_time);
        if !scene_manager.update(&update_ctx) {
            break 'running;
        }

        scene_manager.render(&app.gl);
        app.swap();
        frame += 1;

        if let Some(report) = frame_stats.record(delta_time) {
            log::debug!(
                "{} stage: {} frames, {:.2} ms average",
                scene_manager.stage(),
                report.frames,
                report.average_delta * 1000.0
            );
        }

        if !frame_sleep.is_zero() {
            std::thread::sleep(frame_sleep);
        }
    }

    log::info!("Closing after {frame} frames");
    Ok(())
}
