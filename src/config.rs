//! Startup configuration.
//!
//! Read from the TOML file named by `WALKER_CONFIG`, else `walker.toml` in the working directory
//! when it exists, else built-in defaults. Every table and field is optional.

use crate::keys::parse_key;
use crate::Error;
use log::info;
use serde::{Deserialize, Serialize};
use simple_walker::{AssetPaths, Settings, HEIGHT, WIDTH};
use std::path::{Path, PathBuf};
use winit::keyboard::KeyCode;

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "WALKER_CONFIG";
/// Config file picked up from the working directory.
pub const CONFIG_FILE: &str = "walker.toml";

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub assets: AssetPaths,
    pub window: WindowConfig,
    pub keys: KeyConfig,
    pub world: Settings,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    /// Logical width, also the size of the pixel buffer.
    pub width: u32,
    /// Logical height, also the size of the pixel buffer.
    pub height: u32,
    pub title: String,
}

/// Key names, see `keys::KEY_NAMES`.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct KeyConfig {
    pub up: String,
    pub down: String,
    pub left: String,
    pub right: String,
    pub fullscreen: String,
    pub quit: String,
}

/// Resolved key bindings.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct KeyBindings {
    pub up: KeyCode,
    pub down: KeyCode,
    pub left: KeyCode,
    pub right: KeyCode,
    pub fullscreen: KeyCode,
    pub quit: KeyCode,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: WIDTH as u32,
            height: HEIGHT as u32,
            title: "pixel walker".to_string(),
        }
    }
}

impl Default for KeyConfig {
    fn default() -> Self {
        Self {
            up: "ArrowUp".to_string(),
            down: "ArrowDown".to_string(),
            left: "ArrowLeft".to_string(),
            right: "ArrowRight".to_string(),
            fullscreen: "KeyF".to_string(),
            quit: "KeyQ".to_string(),
        }
    }
}

impl KeyConfig {
    pub fn bindings(&self) -> Result<KeyBindings, Error> {
        let key = |name: &str| parse_key(name).ok_or_else(|| Error::UnknownKey(name.to_string()));

        Ok(KeyBindings {
            up: key(&self.up)?,
            down: key(&self.down)?,
            left: key(&self.left)?,
            right: key(&self.right)?,
            fullscreen: key(&self.fullscreen)?,
            quit: key(&self.quit)?,
        })
    }
}

impl Config {
    /// Parse a config file.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let text = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(&text).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Find and load the config file, falling back to defaults.
    ///
    /// A file named by `WALKER_CONFIG` must exist.
    pub fn from_env() -> Result<Self, Error> {
        let path = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        Self::discover(path.as_deref(), Path::new(CONFIG_FILE))
    }

    fn discover(explicit: Option<&Path>, fallback: &Path) -> Result<Self, Error> {
        if let Some(path) = explicit {
            info!("Loading config from {}", path.display());
            Self::load(path)
        } else if fallback.exists() {
            info!("Loading config from {}", fallback.display());
            Self::load(fallback)
        } else {
            info!("No config file, using defaults");
            Ok(Self::default())
        }
    }
}
