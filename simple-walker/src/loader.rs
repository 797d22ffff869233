use crate::sound::Sfx;
use crate::sprites::Image;
use crate::Error;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Where the assets live. File names are relative to `dir`.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct AssetPaths {
    pub dir: PathBuf,
    pub sprite_sheet: PathBuf,
    pub background: PathBuf,
    pub player: PathBuf,
    pub huh: PathBuf,
    pub stop: PathBuf,
}

/// A list of assets loaded into memory.
///
/// Loaded once at startup and never modified.
#[derive(Debug)]
pub struct Assets {
    pub sprite_sheet: Image,
    pub background: Image,
    pub player: Image,
    sounds: BTreeMap<Sfx, Arc<[u8]>>,
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("assets"),
            sprite_sheet: PathBuf::from("spritesheet.png"),
            background: PathBuf::from("background.jpg"),
            player: PathBuf::from("player.png"),
            huh: PathBuf::from("dsnoway.wav"),
            stop: PathBuf::from("dspstop.wav"),
        }
    }
}

impl AssetPaths {
    /// Full path of an asset file.
    pub fn resolve(&self, file: &Path) -> PathBuf {
        self.dir.join(file)
    }

    pub fn sound(&self, sfx: Sfx) -> PathBuf {
        match sfx {
            Sfx::Huh => self.resolve(&self.huh),
            Sfx::Stop => self.resolve(&self.stop),
        }
    }
}

impl Assets {
    /// Encoded sound file bytes. Decoding is left to the audio backend.
    pub fn sound(&self, sfx: Sfx) -> Arc<[u8]> {
        // Every `Sfx` is inserted by `load_assets`
        self.sounds.get(&sfx).cloned().unwrap_or_else(|| Arc::from(Vec::new()))
    }

    /// Build an asset set from memory.
    pub fn new(
        sprite_sheet: Image,
        background: Image,
        player: Image,
        sounds: BTreeMap<Sfx, Arc<[u8]>>,
    ) -> Self {
        Self {
            sprite_sheet,
            background,
            player,
            sounds,
        }
    }
}

/// Load all static assets into an `Assets` structure.
///
/// Any missing or undecodable file fails the whole load.
pub fn load_assets(paths: &AssetPaths) -> Result<Assets, Error> {
    info!("Loading assets from {}", paths.dir.display());

    let sprite_sheet = load_image(&paths.resolve(&paths.sprite_sheet))?;
    let background = load_image(&paths.resolve(&paths.background))?;
    let player = load_image(&paths.resolve(&paths.player))?;

    let mut sounds = BTreeMap::new();
    for sfx in Sfx::ALL {
        let path = paths.sound(sfx);
        let data = std::fs::read(&path).map_err(|source| Error::Io {
            path: path.clone(),
            source,
        })?;
        debug!("Loaded {} bytes of audio from {}", data.len(), path.display());
        sounds.insert(sfx, Arc::from(data));
    }

    Ok(Assets::new(sprite_sheet, background, player, sounds))
}

/// Decode a PNG or JPEG into RGBA pixels.
pub fn load_image(path: &Path) -> Result<Image, Error> {
    let data = std::fs::read(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let decoded = image::load_from_memory(&data).map_err(|source| Error::Image {
        path: path.to_path_buf(),
        source,
    })?;

    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();
    debug!("Loaded image {}x{} from {}", width, height, path.display());

    Ok(Image::from_rgba(width as usize, height as usize, rgba.into_raw()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_png() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tiny.png");
        let mut img = image::RgbaImage::new(3, 2);
        img.put_pixel(2, 1, image::Rgba([10, 20, 30, 40]));
        img.save(&path).unwrap();

        let loaded = load_image(&path).unwrap();
        assert_eq!(loaded.bounds().width(), 3);
        assert_eq!(loaded.bounds().height(), 2);
        assert_eq!(loaded.pixel(2, 1), [10, 20, 30, 40]);
        assert_eq!(loaded.pixel(0, 0), [0, 0, 0, 0]);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        let paths = AssetPaths {
            dir: dir.path().to_path_buf(),
            ..AssetPaths::default()
        };

        match load_assets(&paths) {
            Err(Error::Io { path, .. }) => assert!(path.ends_with("spritesheet.png")),
            other => panic!("Expected an I/O error, got {other:?}"),
        }
    }

    #[test]
    fn test_corrupt_image() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"definitely not a png").unwrap();

        assert!(matches!(load_image(&path), Err(Error::Image { .. })));
    }

    #[test]
    fn test_default_paths() {
        let paths = AssetPaths::default();

        assert_eq!(paths.sound(Sfx::Huh), Path::new("assets/dsnoway.wav"));
        assert_eq!(paths.sound(Sfx::Stop), Path::new("assets/dspstop.wav"));
        assert_eq!(
            paths.resolve(&paths.background),
            Path::new("assets/background.jpg")
        );
    }
}
