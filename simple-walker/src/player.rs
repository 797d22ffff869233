use crate::geo::{Point, Rect};
use crate::sprites::{Drawable, SpriteRef};

// Player positioning
const PLAYER_START: Point = Point::new(0, 0);

/// The player entity.
#[derive(Debug)]
pub struct Player {
    pub sprite: SpriteRef,
    pub pos: Point,
}

impl Player {
    pub fn new(sprite: SpriteRef) -> Self {
        let pos = PLAYER_START;
        Player { sprite, pos }
    }

    /// Screen-space bounding box of the current sprite.
    pub fn bounds(&self) -> Rect {
        Rect::from_size(
            self.pos.x,
            self.pos.y,
            self.sprite.width() as i32,
            self.sprite.height() as i32,
        )
    }
}
