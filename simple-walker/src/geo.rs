//! Simple geometry primitives.

/// A tiny position vector.
///
/// Coordinates are signed; the player is allowed to wander off the left and top edges.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

/// A tiny rectangle based on two absolute `Point`s.
///
/// `p1` is inclusive, `p2` is exclusive.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Rect {
    pub p1: Point,
    pub p2: Point,
}

impl Point {
    /// Create a new point.
    pub const fn new(x: i32, y: i32) -> Point {
        Point { x, y }
    }
}

impl core::ops::AddAssign for Point {
    fn add_assign(&mut self, other: Self) {
        // Positions are unbounded; they pin at the edge of `i32`
        self.x = self.x.saturating_add(other.x);
        self.y = self.y.saturating_add(other.y);
    }
}

impl Rect {
    /// Create a rectangle from two `Point`s.
    pub const fn new(p1: Point, p2: Point) -> Rect {
        Rect { p1, p2 }
    }

    /// Create a rectangle from its top-left corner and size.
    pub const fn from_size(x: i32, y: i32, width: i32, height: i32) -> Rect {
        Rect {
            p1: Point::new(x, y),
            p2: Point::new(x.saturating_add(width), y.saturating_add(height)),
        }
    }

    pub const fn width(&self) -> i32 {
        self.p2.x.saturating_sub(self.p1.x)
    }

    pub const fn height(&self) -> i32 {
        self.p2.y.saturating_sub(self.p1.y)
    }

    pub const fn is_empty(&self) -> bool {
        self.p2.x <= self.p1.x || self.p2.y <= self.p1.y
    }

    /// The overlapping region of two rectangles, or `None` when they do not overlap.
    pub fn clip(&self, other: &Rect) -> Option<Rect> {
        let rect = self.intersection(other);

        if rect.is_empty() {
            None
        } else {
            Some(rect)
        }
    }

    fn intersection(&self, other: &Rect) -> Rect {
        Rect::new(
            Point::new(self.p1.x.max(other.p1.x), self.p1.y.max(other.p1.y)),
            Point::new(self.p2.x.min(other.p2.x), self.p2.y.min(other.p2.y)),
        )
    }
}
