//! Slicing the sprite sheet into per-direction frames.

use crate::controls::Direction;
use crate::geo::Rect;
use crate::settings::{SheetLayout, Settings};
use crate::sprites::{Image, SpriteRef};
use log::{debug, warn};

/// Offset of each direction's frames within the sheet.
pub const DEFAULT_OFFSETS: [(Direction, i32); 4] = [
    (Direction::Up, 0),
    (Direction::Down, 131),
    (Direction::Left, 261),
    (Direction::Right, 390),
];

/// Picks the sub-image of the sprite sheet for a direction.
#[derive(Debug)]
pub struct FrameSelector {
    sheet: Image,
    frame_width: i32,
    frame_height: i32,
    layout: SheetLayout,
    table: [(Direction, i32); 4],
}

impl FrameSelector {
    pub fn new(sheet: Image, settings: &Settings) -> Self {
        Self {
            sheet,
            frame_width: settings.frame_width as i32,
            frame_height: settings.frame_height as i32,
            layout: settings.sheet.layout,
            table: settings.sheet.table(),
        }
    }

    pub fn sheet(&self) -> &Image {
        &self.sheet
    }

    fn offset(&self, direction: Direction) -> i32 {
        self.table
            .iter()
            .find_map(|&(d, offset)| (d == direction).then_some(offset))
            .unwrap_or_default()
    }

    /// The source rectangle for `direction`, before clipping to the sheet.
    ///
    /// `frame` is the current animation frame. The `Columns` layout ignores it and always reads
    /// the top row.
    pub fn rect(&self, direction: Direction, frame: u32) -> Rect {
        let offset = self.offset(direction);

        match self.layout {
            SheetLayout::Columns => Rect::from_size(offset, 0, self.frame_width, self.frame_height),
            SheetLayout::Rows => {
                let x = (frame as i32).saturating_mul(self.frame_width);
                Rect::from_size(x, offset, self.frame_width, self.frame_height)
            }
        }
    }

    /// The frame for `direction`.
    ///
    /// Returns `None` when the frame lies entirely outside the sheet.
    pub fn select(&self, direction: Direction, frame: u32) -> Option<SpriteRef> {
        let rect = self.rect(direction, frame);
        let sprite = self.sheet.sub_image(rect);

        if sprite.is_none() {
            debug!("Frame for {direction} at {rect:?} is outside the sprite sheet");
        }

        sprite
    }

    /// The frame for a direction label, e.g. `"up"`.
    ///
    /// Unknown labels are not an error. They log a warning and yield no frame, so the caller
    /// keeps whatever it was showing.
    pub fn select_label(&self, label: &str, frame: u32) -> Option<SpriteRef> {
        match label.parse::<Direction>() {
            Ok(direction) => self.select(direction, frame),
            Err(_) => {
                warn!("Invalid direction: {label}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sprites::Drawable;

    fn selector(layout: SheetLayout) -> FrameSelector {
        let mut settings = Settings::default();
        settings.sheet.layout = layout;

        FrameSelector::new(Image::solid(520, 520, [1, 2, 3, 255]), &settings)
    }

    #[test]
    fn test_every_label() {
        let selector = selector(SheetLayout::Columns);

        for (direction, x) in DEFAULT_OFFSETS {
            let sprite = selector.select_label(direction.label(), 0).unwrap();

            assert_eq!(sprite.source(), Rect::from_size(x, 0, 128, 128));
            assert_eq!(sprite.width(), 128);
            assert_eq!(sprite.height(), 128);
        }
    }

    #[test]
    fn test_columns_always_top_row() {
        let selector = selector(SheetLayout::Columns);

        for frame in 0..4 {
            let rect = selector.rect(Direction::Left, frame);
            assert_eq!(rect.p1.y, 0);
            assert_eq!(rect.p1.x, 261);
        }
    }

    #[test]
    fn test_rows_layout() {
        let selector = selector(SheetLayout::Rows);

        assert_eq!(
            selector.rect(Direction::Down, 2),
            Rect::from_size(256, 131, 128, 128)
        );
        assert_eq!(
            selector.rect(Direction::Up, 0),
            Rect::from_size(0, 0, 128, 128)
        );
    }

    #[test]
    fn test_unknown_label() {
        let selector = selector(SheetLayout::Columns);

        assert!(selector.select_label("sideways", 0).is_none());
        assert!(selector.select_label("", 0).is_none());
    }

    #[test]
    fn test_small_sheet() {
        let settings = Settings::default();
        let selector = FrameSelector::new(Image::solid(256, 128, [0; 4]), &settings);

        assert!(selector.select(Direction::Up, 0).is_some());
        assert!(selector.select(Direction::Right, 0).is_none());
    }
}
