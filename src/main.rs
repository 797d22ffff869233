#![deny(clippy::all)]
#![forbid(unsafe_code)]

use crate::audio::RodioBank;
use crate::config::{Config, KeyBindings};
use error_iter::ErrorIter as _;
use game_loop::{game_loop, Time, TimeTrait as _};
use log::{debug, error, info};
use pixels::{Pixels, SurfaceTexture};
use simple_walker::{load_assets, Controls, Flow, Sfx, World};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use std::{env, process};
use winit::dpi::LogicalSize;
use winit::event_loop::EventLoop;
use winit::keyboard::KeyCode;
use winit::window::{Fullscreen, WindowBuilder};
use winit_input_helper::WinitInputHelper;

mod audio;
mod config;
mod keys;

// Fixed time step (60 ticks per second)
const FPS: u32 = 60;
const TIME_STEP: Duration = Duration::from_nanos(1_000_000_000 / FPS as u64);

/// All the ways in which the walker can fail to start or keep running.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unable to read config file `{path}`")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config file `{path}`")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Unknown key name `{0}`")]
    UnknownKey(String),
    #[error("Unable to build the world")]
    World(#[from] simple_walker::Error),
    #[error("No audio output device")]
    AudioDevice(#[from] rodio::StreamError),
    #[error("Unable to create an audio sink")]
    AudioSink(#[from] rodio::PlayError),
    #[error("Unable to decode sound {sfx:?}")]
    AudioDecode {
        sfx: Sfx,
        source: rodio::decoder::DecoderError,
    },
    #[error("Unable to create the window")]
    Window(#[from] winit::error::OsError),
    #[error("Event loop failed")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("Pixel buffer failed")]
    Pixels(#[from] pixels::Error),
}

/// Uber-struct representing the entire game session.
struct Game {
    /// Software renderer.
    pixels: Pixels<'static>,
    /// Walker world.
    world: World,
    /// Player controls for world updates.
    controls: Controls,
    /// Configured keys.
    keys: KeyBindings,
    /// Event manager.
    input: WinitInputHelper,
    /// Sound effect playback.
    sounds: RodioBank,
    /// Fullscreen state last applied to the window.
    fullscreen: bool,
}

impl Game {
    fn new(pixels: Pixels<'static>, world: World, keys: KeyBindings, sounds: RodioBank) -> Self {
        Self {
            pixels,
            world,
            controls: Controls::default(),
            keys,
            input: WinitInputHelper::new(),
            sounds,
            fullscreen: false,
        }
    }

    fn update_controls(&mut self) {
        let input = &self.input;

        self.controls = sample_controls(
            &self.keys,
            self.controls,
            |key| input.key_held(key),
            |key| input.key_pressed(key),
        );
    }
}

/// Build this step's controls from the keyboard state.
///
/// `held` and `pressed` answer for the current input step. A pending fullscreen press in
/// `previous` survives until an update consumes it.
fn sample_controls<H, P>(keys: &KeyBindings, previous: Controls, held: H, pressed: P) -> Controls
where
    H: Fn(KeyCode) -> bool,
    P: Fn(KeyCode) -> bool,
{
    Controls {
        up: held(keys.up),
        down: held(keys.down),
        left: held(keys.left),
        right: held(keys.right),
        // Only the press flips fullscreen, not holding the key
        fullscreen: previous.fullscreen | pressed(keys.fullscreen),
        // A tap that is released within one input step still quits
        quit: held(keys.quit) || pressed(keys.quit),
    }
}

fn main() {
    env_logger::init();

    if let Err(err) = run() {
        log_error("run", err);
        process::exit(1);
    }
}

fn run() -> Result<(), Error> {
    // Enable debug mode with `DEBUG=true` environment variable
    let debug = env::var("DEBUG")
        .unwrap_or_else(|_| "false".to_string())
        .parse()
        .unwrap_or(false);

    let config = Config::from_env()?;
    let keys = config.keys.bindings()?;
    let width = config.window.width;
    let height = config.window.height;

    // Assets are loaded before any window appears; a missing file ends the program here
    let assets = load_assets(&config.assets)?;
    let world = World::new(
        &assets,
        &config.world,
        (width as usize, height as usize),
        Instant::now(),
        debug,
    )?;
    let sounds = RodioBank::new(&assets)?;

    let event_loop = EventLoop::new()?;
    let window = {
        let size = LogicalSize::new(width as f64, height as f64);
        let window = WindowBuilder::new()
            .with_title(&config.window.title)
            .with_inner_size(size)
            .with_min_inner_size(size)
            .build(&event_loop)?;
        Arc::new(window)
    };

    let pixels = {
        let window_size = window.inner_size();
        let surface_texture =
            SurfaceTexture::new(window_size.width, window_size.height, Arc::clone(&window));
        Pixels::new(width, height, surface_texture)?
    };

    info!("Starting {}x{} session", width, height);
    let game = Game::new(pixels, world, keys, sounds);

    let res = game_loop(
        event_loop,
        window,
        game,
        FPS,
        0.1,
        move |g| {
            let game = &mut g.game;

            // Update the world
            let flow = game
                .world
                .update(&game.controls, &mut game.sounds, Instant::now());
            game.controls.fullscreen = false;

            if flow == Flow::Quit {
                g.exit();
                return;
            }

            let fullscreen = game.world.fullscreen();
            if fullscreen != game.fullscreen {
                debug!("Switching fullscreen to {fullscreen}");
                g.window
                    .set_fullscreen(fullscreen.then_some(Fullscreen::Borderless(None)));
                game.fullscreen = fullscreen;
            }
        },
        move |g| {
            // Drawing
            g.game.world.draw(g.game.pixels.frame_mut());
            if let Err(err) = g.game.pixels.render() {
                log_error("pixels.render", err);
                g.exit();
            }

            // Sleep the main thread to limit drawing to the fixed time step.
            // See: https://github.com/parasyte/pixels/issues/174
            let dt = TIME_STEP.as_secs_f64() - Time::now().sub(&g.current_instant());
            if dt > 0.0 {
                std::thread::sleep(Duration::from_secs_f64(dt));
            }
        },
        |g, event| {
            // Let winit_input_helper collect events to build its state.
            if g.game.input.update(event) {
                // Update controls
                g.game.update_controls();

                // Close events
                if g.game.input.key_pressed(KeyCode::Escape) || g.game.input.close_requested() {
                    g.exit();
                    return;
                }

                // Resize the window
                if let Some(size) = g.game.input.window_resized() {
                    if let Err(err) = g.game.pixels.resize_surface(size.width, size.height) {
                        log_error("pixels.resize_surface", err);
                        g.exit();
                    }
                }
            }
        },
    );
    res.map_err(Error::EventLoop)
}

fn log_error<E: std::error::Error + 'static>(method_name: &str, err: E) {
    error!("{method_name}() failed: {err}");
    for source in err.sources().skip(1) {
        error!("  Caused by: {source}");
    }
}
