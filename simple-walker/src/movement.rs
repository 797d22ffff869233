//! Turning held direction keys into player movement.

use crate::controls::{Controls, Direction};
use crate::frames::FrameSelector;
use crate::geo::Point;
use crate::player::Player;
use crate::sound::{self, Sfx, SoundBank};

/// What happens while one direction is held.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Binding {
    pub direction: Direction,
    /// Added to the player position once per tick.
    pub step: Point,
    /// Sound cue, started only when not already playing.
    pub sfx: Option<Sfx>,
}

/// An ordered list of bindings, evaluated in full every tick.
///
/// Each binding is checked independently. Two held keys both apply, so diagonals work and
/// opposite keys cancel out by adding both steps. When several bindings fire, the last one
/// decides the sprite.
#[derive(Debug)]
pub struct Movement {
    bindings: [Binding; 4],
}

impl Movement {
    /// The standard bindings: up, down, left, right, `speed` pixels per tick.
    pub fn new(speed: i32) -> Self {
        let bindings = [
            Binding {
                direction: Direction::Up,
                step: Point::new(0, speed.saturating_neg()),
                sfx: Some(Sfx::Huh),
            },
            Binding {
                direction: Direction::Down,
                step: Point::new(0, speed),
                sfx: Some(Sfx::Stop),
            },
            Binding {
                direction: Direction::Left,
                step: Point::new(speed.saturating_neg(), 0),
                sfx: None,
            },
            Binding {
                direction: Direction::Right,
                step: Point::new(speed, 0),
                sfx: None,
            },
        ];

        Self { bindings }
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    /// Apply every binding whose direction is held.
    ///
    /// Returns the number of bindings that fired.
    pub fn apply<B>(
        &self,
        controls: &Controls,
        player: &mut Player,
        frames: &FrameSelector,
        frame: u32,
        sounds: &mut B,
    ) -> usize
    where
        B: SoundBank + ?Sized,
    {
        let mut fired = 0;

        for binding in self.bindings.iter().filter(|b| controls.held(b.direction)) {
            if let Some(sfx) = binding.sfx {
                sound::trigger(sounds, sfx);
            }

            // A missing frame leaves the previous sprite on screen
            if let Some(sprite) = frames.select(binding.direction, frame) {
                player.sprite = sprite;
            }

            player.pos += binding.step;
            fired += 1;
        }

        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sound::tests::MockBank;
    use crate::sprites::Image;

    struct Fixture {
        frames: FrameSelector,
        player: Player,
        movement: Movement,
        bank: MockBank,
    }

    fn fixture() -> Fixture {
        let settings = Settings::default();
        let frames = FrameSelector::new(Image::solid(520, 128, [9, 9, 9, 255]), &settings);
        let player = Player::new(Image::solid(16, 16, [1, 1, 1, 255]).sprite());

        Fixture {
            frames,
            player,
            movement: Movement::new(settings.speed),
            bank: MockBank::default(),
        }
    }

    fn press(f: &mut Fixture, controls: Controls) -> usize {
        f.movement
            .apply(&controls, &mut f.player, &f.frames, 0, &mut f.bank)
    }

    #[test]
    fn test_single_key_moves_one_step() {
        let cases = [
            (
                Controls {
                    up: true,
                    ..Controls::default()
                },
                Point::new(0, -5),
            ),
            (
                Controls {
                    down: true,
                    ..Controls::default()
                },
                Point::new(0, 5),
            ),
            (
                Controls {
                    left: true,
                    ..Controls::default()
                },
                Point::new(-5, 0),
            ),
            (
                Controls {
                    right: true,
                    ..Controls::default()
                },
                Point::new(5, 0),
            ),
        ];

        for (controls, expected) in cases {
            let mut f = fixture();

            assert_eq!(press(&mut f, controls), 1);
            assert_eq!(f.player.pos, expected);
        }
    }

    #[test]
    fn test_selects_direction_frame() {
        let mut f = fixture();
        let left = f.frames.select(Direction::Left, 0).unwrap();

        press(
            &mut f,
            Controls {
                left: true,
                ..Controls::default()
            },
        );
        assert!(f.player.sprite.same_as(&left));
    }

    #[test]
    fn test_opposite_keys_both_apply() {
        let mut f = fixture();
        let controls = Controls {
            up: true,
            down: true,
            ..Controls::default()
        };

        // Both fire, the net movement is zero, and both sounds start
        assert_eq!(press(&mut f, controls), 2);
        assert_eq!(f.player.pos, Point::new(0, 0));
        assert_eq!(f.bank.plays, vec![Sfx::Huh, Sfx::Stop]);

        // Down is processed after up, so its frame wins
        let down = f.frames.select(Direction::Down, 0).unwrap();
        assert!(f.player.sprite.same_as(&down));
    }

    #[test]
    fn test_diagonal() {
        let mut f = fixture();
        let controls = Controls {
            down: true,
            right: true,
            ..Controls::default()
        };

        press(&mut f, controls);
        press(&mut f, controls);
        assert_eq!(f.player.pos, Point::new(10, 10));
    }

    #[test]
    fn test_no_bounds_checking() {
        let mut f = fixture();
        let controls = Controls {
            left: true,
            up: true,
            ..Controls::default()
        };

        for _ in 0..100 {
            press(&mut f, controls);
        }
        assert_eq!(f.player.pos, Point::new(-500, -500));
    }

    #[test]
    fn test_held_sound_not_retriggered() {
        let mut f = fixture();
        let controls = Controls {
            up: true,
            ..Controls::default()
        };

        for _ in 0..10 {
            press(&mut f, controls);
        }
        assert_eq!(f.bank.plays, vec![Sfx::Huh]);

        f.bank.finish(Sfx::Huh);
        press(&mut f, controls);
        assert_eq!(f.bank.plays, vec![Sfx::Huh, Sfx::Huh]);
    }

    #[test]
    fn test_horizontal_is_silent() {
        let mut f = fixture();

        press(
            &mut f,
            Controls {
                left: true,
                right: true,
                ..Controls::default()
            },
        );
        assert!(f.bank.plays.is_empty());
    }

    #[test]
    fn test_missing_frame_keeps_sprite() {
        let settings = Settings::default();
        let mut f = fixture();
        // Too narrow for the `right` column
        f.frames = FrameSelector::new(Image::solid(256, 128, [0; 4]), &settings);
        let before = f.player.sprite.clone();

        press(
            &mut f,
            Controls {
                right: true,
                ..Controls::default()
            },
        );
        assert!(f.player.sprite.same_as(&before));
        assert_eq!(f.player.pos, Point::new(5, 0));
    }

    #[test]
    fn test_binding_order() {
        let movement = Movement::new(5);
        let order: Vec<Direction> = movement.bindings().iter().map(|b| b.direction).collect();

        assert_eq!(order, Direction::ALL.to_vec());
    }

    #[test]
    fn test_walking_stops_at_the_edge_of_space() {
        let mut f = fixture();
        f.player.pos = Point::new(i32::MAX - 2, i32::MIN + 2);
        let controls = Controls {
            up: true,
            right: true,
            ..Controls::default()
        };

        press(&mut f, controls);
        press(&mut f, controls);
        assert_eq!(f.player.pos, Point::new(i32::MAX, i32::MIN));
    }

    #[test]
    fn test_extreme_speed() {
        let mut f = fixture();
        f.movement = Movement::new(i32::MIN);

        press(
            &mut f,
            Controls {
                left: true,
                ..Controls::default()
            },
        );
        assert_eq!(f.player.pos, Point::new(i32::MAX, 0));
    }
}
