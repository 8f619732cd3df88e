mod config;
mod input;
mod particle;
mod renderer;
mod scene;
mod scheduler;
mod solver;

use std::path::PathBuf;
use std::time::{Duration, Instant};

use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};
use rand::SeedableRng;
use rand::rngs::StdRng;

use config::Config;
use input::PointerTracker;
use renderer::Canvas;
use scene::Scene;
use scheduler::FrameLoop;

struct Defaults;

impl Defaults {
    const TITLE: &'static str = "fluxfield";
    const HEADLESS_FRAMES: u64 = 600;
    /// Headless diagnostics are logged every this many frames.
    const STATS_EVERY: u64 = 60;
}

#[derive(Debug, Clone, PartialEq)]
struct CliArgs {
    config_path: PathBuf,
    headless: bool,
    frames: u64,
    seed: Option<u64>,
}

/// Value following `flag`, if present.
fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2).find(|w| w[0] == flag).map(|w| w[1].as_str())
}

/// Parse a numeric flag, logging and ignoring values that do not parse.
fn numeric_flag<T: std::str::FromStr>(args: &[String], flag: &str) -> Option<T> {
    let raw = flag_value(args, flag)?;
    match raw.parse() {
        Ok(v) => Some(v),
        Err(_) => {
            log::warn!("ignoring {flag} {raw:?}: not a valid number");
            None
        }
    }
}

fn parse_args(args: &[String]) -> CliArgs {
    CliArgs {
        config_path: flag_value(args, "--config")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(config::DEFAULT_PATH)),
        headless: args.iter().any(|a| a == "--headless"),
        frames: numeric_flag(args, "--frames").unwrap_or(Defaults::HEADLESS_FRAMES),
        seed: numeric_flag(args, "--seed"),
    }
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    let cli = parse_args(&args);
    let cfg = config::load(&cli.config_path);
    let seed = cli.seed.or(cfg.seed);
    log::info!(
        "grid {}x{}, {} particles, seed {}",
        cfg.solver.size,
        cfg.solver.size,
        cfg.particles.count,
        seed.map_or_else(|| "random".to_string(), |s| s.to_string())
    );

    let frame_loop = if cli.headless {
        FrameLoop::with_interval(Duration::ZERO)
    } else {
        FrameLoop::new(cfg.display.target_fps)
    };
    let stop = frame_loop.stop_handle();
    if let Err(e) = ctrlc::set_handler(move || stop.stop()) {
        log::warn!("could not install Ctrl+C handler: {e}");
    }

    let rng = make_rng(seed);
    if cli.headless {
        run_headless(&cfg, &frame_loop, cli.frames, rng);
    } else if let Err(e) = run_gui(&cfg, &frame_loop, rng) {
        log::error!("window error: {e}");
        std::process::exit(1);
    }
}

fn run_gui(cfg: &Config, frame_loop: &FrameLoop, rng: StdRng) -> Result<(), minifb::Error> {
    let mut w = cfg.display.width;
    let mut h = cfg.display.height;

    let mut window = Window::new(
        Defaults::TITLE,
        w,
        h,
        WindowOptions {
            resize: true,
            ..WindowOptions::default()
        },
    )?;

    let mut canvas = Canvas::new(w, h);
    let mut scene = Scene::new(cfg, w, h, rng);
    let mut tracker = PointerTracker::new();
    let mut events = Vec::new();
    let mut framebuf: Vec<u32> = Vec::new();
    let mut frame_count = 0u32;
    let mut last_fps_time = Instant::now();
    let mut result = Ok(());

    frame_loop.run(|| {
        if !window.is_open() || window.is_key_down(Key::Escape) {
            return false;
        }

        // R: clear the field and reseed particles
        if window.is_key_pressed(Key::R, KeyRepeat::No) {
            log::info!("reset");
            scene.reset();
        }

        // --- Check for window resize ---
        let (new_w, new_h) = window.get_size();
        if (new_w != w || new_h != h) && new_w > 0 && new_h > 0 {
            w = new_w;
            h = new_h;
            canvas.resize(w, h);
            scene.resize(w, h);
        }

        // --- Pointer ---
        let pos = window
            .get_mouse_pos(MouseMode::Discard)
            .map(|(x, y)| (x as f64, y as f64));
        let down = window.get_mouse_down(MouseButton::Left);
        events.clear();
        tracker.poll(pos, down, &mut events);
        for ev in &events {
            scene.handle_pointer(ev);
        }

        scene.frame(&mut canvas);
        canvas.write_argb(&mut framebuf);
        if let Err(e) = window.update_with_buffer(&framebuf, w, h) {
            result = Err(e);
            return false;
        }

        frame_count += 1;
        let now = Instant::now();
        if now.duration_since(last_fps_time) >= Duration::from_secs(1) {
            window.set_title(&format!("{} - {frame_count} fps", Defaults::TITLE));
            log::debug!("{frame_count} fps");
            frame_count = 0;
            last_fps_time = now;
        }
        true
    });

    result
}

/// Render `frames` frames offscreen and log field diagnostics.
/// Returns the number of frames actually rendered.
fn run_headless(cfg: &Config, frame_loop: &FrameLoop, frames: u64, rng: StdRng) -> u64 {
    let (w, h) = (cfg.display.width, cfg.display.height);
    let mut canvas = Canvas::new(w, h);
    let mut scene = Scene::new(cfg, w, h, rng);
    log::info!("headless: {frames} frames at {w}x{h}");

    let start = Instant::now();
    frame_loop.run(|| {
        if scene.frames() >= frames {
            return false;
        }
        scene.frame(&mut canvas);
        let n = scene.frames();
        if n % Defaults::STATS_EVERY == 0 || n == frames {
            let s = scene.stats();
            log::info!(
                "frame {n}: energy {:.4e}, max divergence {:.3e}, max speed {:.4}",
                s.energy,
                s.max_divergence,
                s.max_speed
            );
        }
        scene.frames() < frames
    });

    let rendered = scene.frames();
    let secs = start.elapsed().as_secs_f64();
    if secs > 0.0 {
        log::info!("rendered {rendered} frames in {secs:.2}s ({:.1} fps)", rendered as f64 / secs);
    }
    rendered
}
