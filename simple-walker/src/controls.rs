use core::fmt;
use core::str::FromStr;

/// Player control inputs, sampled once per tick.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Controls {
    /// Move the player up.
    pub up: bool,
    /// Move the player down.
    pub down: bool,
    /// Move the player left.
    pub left: bool,
    /// Move the player right.
    pub right: bool,
    /// Flip fullscreen mode. Edge-triggered: true only on the tick the key went down.
    pub fullscreen: bool,
    /// End the session.
    pub quit: bool,
}

/// The four directions the player can walk in.
///
/// Directions are not mutually exclusive; holding two keys walks diagonally.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// A direction label that is not one of `up`, `down`, `left`, `right`.
#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
#[error("unknown direction `{0}`")]
pub struct UnknownDirection(pub String);

impl Controls {
    /// Is the key for `direction` held this tick?
    pub fn held(&self, direction: Direction) -> bool {
        match direction {
            Direction::Up => self.up,
            Direction::Down => self.down,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }
}

impl Direction {
    /// Every direction, in the order inputs are processed.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

impl FromStr for Direction {
    type Err = UnknownDirection;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        Direction::ALL
            .into_iter()
            .find(|direction| direction.label() == label)
            .ok_or_else(|| UnknownDirection(label.to_string()))
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
