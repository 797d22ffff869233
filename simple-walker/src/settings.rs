//! Tunables for the world, deserialized from the `[world]` table of the config file.

use crate::controls::Direction;
use crate::Error;
use core::time::Duration;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// World settings. Every field has a default, so a partial table is fine.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Width of one sprite sheet frame in pixels.
    pub frame_width: u32,
    /// Height of one sprite sheet frame in pixels.
    pub frame_height: u32,
    /// Number of frames in the overlay animation.
    pub frame_count: u32,
    /// Milliseconds each overlay frame stays on screen.
    pub frame_duration_ms: u64,
    /// Pixels moved per tick while a direction is held.
    pub speed: i32,
    pub sheet: SheetSettings,
    pub render: RenderSettings,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct SheetSettings {
    pub layout: SheetLayout,
    /// Per-direction offsets into the sheet, keyed by direction label.
    ///
    /// Missing labels keep their default offset. Unknown labels are ignored with a warning.
    pub offsets: BTreeMap<String, i32>,
}

/// How the per-direction offset is applied to the sprite sheet.
///
/// `Columns` treats the offset as a horizontal position and always samples the top row, so rows
/// below the first are never shown. `Rows` treats the offset as a vertical position and walks
/// the columns with the overlay animation.
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum SheetLayout {
    #[default]
    Columns,
    Rows,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct RenderSettings {
    /// Draw the free-running animation frame on top of everything.
    ///
    /// It covers the directional sprite whenever the two overlap.
    pub overlay: bool,
}

impl Settings {
    pub fn frame_duration(&self) -> Duration {
        Duration::from_millis(self.frame_duration_ms)
    }

    /// Reject settings the world cannot run with.
    pub fn validate(&self) -> Result<(), Error> {
        if self.frame_width == 0 || self.frame_height == 0 {
            return Err(Error::Settings("frame size must be non-zero".to_string()));
        }
        if self.frame_count == 0 {
            return Err(Error::Settings("frame_count must be at least 1".to_string()));
        }

        // Sheet coordinates are `i32`; every frame rectangle has to fit
        let limit = i64::from(i32::MAX);
        let width = i64::from(self.frame_width);
        let height = i64::from(self.frame_height);
        if width > limit || height > limit {
            return Err(Error::Settings(format!(
                "frame size {}x{} is too large",
                self.frame_width, self.frame_height
            )));
        }
        if i64::from(self.frame_count) * width > limit {
            return Err(Error::Settings(format!(
                "{} frames of width {} do not fit on a sprite sheet",
                self.frame_count, self.frame_width
            )));
        }
        for (direction, offset) in self.sheet.table() {
            if i64::from(offset) + width.max(height) > limit {
                return Err(Error::Settings(format!(
                    "sheet offset {offset} for {direction} is too large"
                )));
            }
        }

        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            frame_width: 128,
            frame_height: 128,
            frame_count: 4,
            frame_duration_ms: 200,
            speed: 5,
            sheet: SheetSettings::default(),
            render: RenderSettings::default(),
        }
    }
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self { overlay: true }
    }
}

impl SheetSettings {
    /// Resolve the configured offsets into a complete direction table.
    pub fn table(&self) -> [(Direction, i32); 4] {
        let mut table = crate::frames::DEFAULT_OFFSETS;

        for (label, &offset) in &self.offsets {
            match label.parse::<Direction>() {
                Ok(direction) => {
                    if let Some(entry) = table.iter_mut().find(|(d, _)| *d == direction) {
                        entry.1 = offset;
                    }
                }
                Err(err) => log::warn!("Ignoring sheet offset: {err}"),
            }
        }

        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_table() {
        let settings: Settings = toml::from_str(
            r#"
            speed = 3

            [sheet]
            layout = "rows"
            offsets = { down = 128, sideways = 7 }
            "#,
        )
        .unwrap();

        assert_eq!(settings.speed, 3);
        assert_eq!(settings.frame_width, 128);
        assert_eq!(settings.frame_duration(), Duration::from_millis(200));
        assert_eq!(settings.sheet.layout, SheetLayout::Rows);
        assert!(settings.render.overlay);

        let table = settings.sheet.table();
        assert_eq!(
            table,
            [
                (Direction::Up, 0),
                (Direction::Down, 128),
                (Direction::Left, 261),
                (Direction::Right, 390),
            ]
        );
    }

    #[test]
    fn test_validate() {
        assert!(Settings::default().validate().is_ok());

        let settings = Settings {
            frame_count: 0,
            ..Settings::default()
        };
        assert!(matches!(settings.validate(), Err(Error::Settings(_))));
    }

    #[test]
    fn test_validate_rejects_overflowing_frames() {
        let too_wide = Settings {
            frame_width: i32::MAX as u32 + 1,
            ..Settings::default()
        };
        assert!(matches!(too_wide.validate(), Err(Error::Settings(_))));

        let too_tall = Settings {
            frame_height: u32::MAX,
            ..Settings::default()
        };
        assert!(matches!(too_tall.validate(), Err(Error::Settings(_))));

        // Four frames of a billion pixels run off the end of the sheet
        let too_many = Settings {
            frame_width: 1_000_000_000,
            ..Settings::default()
        };
        assert!(matches!(too_many.validate(), Err(Error::Settings(_))));

        // The down offset (131) plus the frame size leaves `i32`
        let offset_overflow = Settings {
            frame_width: i32::MAX as u32,
            frame_count: 1,
            ..Settings::default()
        };
        assert!(matches!(offset_overflow.validate(), Err(Error::Settings(_))));

        let mut settings = Settings::default();
        settings.sheet.offsets.insert("left".to_string(), i32::MAX - 64);
        assert!(matches!(settings.validate(), Err(Error::Settings(_))));

        let mut settings = Settings::default();
        settings.sheet.offsets.insert("left".to_string(), i32::MAX - 128);
        assert!(settings.validate().is_ok());

        // One wide frame is fine as long as every rectangle fits
        let mut settings = Settings {
            frame_width: 1_000_000_000,
            frame_count: 2,
            ..Settings::default()
        };
        settings.sheet.offsets.insert("right".to_string(), 1_000_000_000);
        assert!(settings.validate().is_ok());
    }
}
