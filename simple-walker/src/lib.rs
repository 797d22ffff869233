//! A tiny sprite-walking world to demonstrate `pixels`.
//!
//! One player sprite walks around on top of a background image. Arrow keys move it, and each
//! direction shows its own frame from a sprite sheet. A second, free-running animation cycles
//! through the top row of the same sheet. Walking up or down plays a sound cue.
//!
//! The world draws into a plain RGBA buffer and talks to audio through the [`SoundBank`] trait,
//! so it has no window or device dependencies of its own.

#![deny(clippy::all)]
#![forbid(unsafe_code)]

use crate::animation::Animation;
use crate::frames::FrameSelector;
use crate::geo::Point;
use crate::movement::Movement;
use crate::player::Player;
use crate::sprites::{blit, clear, Image};
use log::debug;
use std::path::PathBuf;
use std::time::Instant;

pub use crate::controls::{Controls, Direction, UnknownDirection};
pub use crate::loader::{load_assets, AssetPaths, Assets};
pub use crate::settings::{RenderSettings, SheetLayout, SheetSettings, Settings};
pub use crate::sound::{Sfx, Silence, SoundBank};

pub mod animation;
mod controls;
mod debug;
pub mod frames;
pub mod geo;
mod loader;
pub mod movement;
pub mod player;
mod settings;
pub mod sound;
pub mod sprites;

/// The default screen width (units are in pixels)
pub const WIDTH: usize = 640;
/// The default screen height (units are in pixels)
pub const HEIGHT: usize = 480;

/// All the ways in which building the world can fail.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An asset file could not be read.
    #[error("Unable to read `{path}`")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// An image file could not be decoded.
    #[error("Unable to decode image `{path}`")]
    Image {
        path: PathBuf,
        source: image::ImageError,
    },
    /// The world settings are unusable.
    #[error("Invalid world settings: {0}")]
    Settings(String),
}

/// What the driver should do after an update.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Flow {
    Continue,
    Quit,
}

#[derive(Debug)]
pub struct World {
    player: Player,
    animation: Animation,
    frames: FrameSelector,
    movement: Movement,
    background: Image,
    overlay: bool,
    width: usize,
    height: usize,
    fullscreen: bool,
    debug: bool,
}

impl World {
    /// Create a new simple-walker `World`.
    ///
    /// # Arguments
    ///
    /// * `assets` - Images for the background, player and sprite sheet.
    /// * `settings` - Frame size, timing and movement tunables.
    /// * `size` - Screen size in pixels, `(width, height)`.
    /// * `start` - The instant the animation clock starts at.
    /// * `debug` - Enable debug visualizations.
    ///
    /// # Example
    ///
    /// ```
    /// use simple_walker::sprites::Image;
    /// use simple_walker::{Assets, Settings, World};
    /// use std::time::Instant;
    ///
    /// let assets = Assets::new(
    ///     Image::solid(512, 128, [255, 0, 255, 255]),
    ///     Image::solid(640, 480, [0, 0, 0, 255]),
    ///     Image::solid(32, 32, [255, 255, 255, 255]),
    ///     Default::default(),
    /// );
    ///
    /// let world = World::new(&assets, &Settings::default(), (640, 480), Instant::now(), false)?;
    /// # Ok::<(), simple_walker::Error>(())
    /// ```
    pub fn new(
        assets: &Assets,
        settings: &Settings,
        size: (usize, usize),
        start: Instant,
        debug: bool,
    ) -> Result<World, Error> {
        settings.validate()?;

        let (width, height) = size;
        if width == 0 || height == 0 {
            return Err(Error::Settings("screen size must be non-zero".to_string()));
        }

        Ok(World {
            player: Player::new(assets.player.sprite()),
            animation: Animation::new(settings, start),
            frames: FrameSelector::new(assets.sprite_sheet.clone(), settings),
            movement: Movement::new(settings.speed),
            background: assets.background.clone(),
            overlay: settings.render.overlay,
            width,
            height,
            fullscreen: false,
            debug,
        })
    }

    /// Update the internal state.
    ///
    /// # Arguments
    ///
    /// * `controls`: The player inputs.
    /// * `sounds`: Where sound cues are sent.
    /// * `now`: The current time, for the animation clock.
    ///
    /// Quitting wins over everything else: when `controls.quit` is set nothing is updated.
    pub fn update<B>(&mut self, controls: &Controls, sounds: &mut B, now: Instant) -> Flow
    where
        B: SoundBank + ?Sized,
    {
        if controls.quit {
            debug!("Quit requested");
            return Flow::Quit;
        }

        if controls.fullscreen {
            self.fullscreen = !self.fullscreen;
            debug!("Fullscreen: {}", self.fullscreen);
        }

        // Handle player movement and sprite selection
        self.movement.apply(
            controls,
            &mut self.player,
            &self.frames,
            self.animation.frame(),
            sounds,
        );

        // The overlay runs on its own clock
        self.animation.tick(now);

        Flow::Continue
    }

    /// Draw the internal state to the screen.
    ///
    /// `screen` must hold `width * height` RGBA pixels.
    pub fn draw(&self, screen: &mut [u8]) {
        debug_assert_eq!(screen.len(), self.width * self.height * 4);

        // Clear the screen
        clear(screen, [0, 0, 0, 255]);

        // Draw the background
        blit(screen, self.width, Point::default(), &self.background);

        // Draw the player
        blit(screen, self.width, self.player.pos, &self.player.sprite);

        // Draw the animation overlay
        let overlay = if self.overlay {
            self.frames.sheet().sub_image(self.animation.rect())
        } else {
            None
        };
        if let Some(frame) = &overlay {
            blit(screen, self.width, Point::default(), frame);
        }

        // Draw debug information
        if self.debug {
            debug::draw_player(screen, self.width, &self.player);
            debug::draw_overlay(screen, self.width, overlay.map(|frame| frame.source()));
        }
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn animation(&self) -> &Animation {
        &self.animation
    }

    /// Whether the player has asked for fullscreen mode.
    pub fn fullscreen(&self) -> bool {
        self.fullscreen
    }
}
