use log::trace;

/// Sound effects the world can ask for.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Sfx {
    /// Played while walking up.
    Huh,
    /// Played while walking down.
    Stop,
}

impl Sfx {
    pub const ALL: [Sfx; 2] = [Sfx::Huh, Sfx::Stop];
}

/// Playback of the preloaded sound effects.
///
/// Implemented by the audio backend, and by mocks in tests.
pub trait SoundBank {
    /// Is `sfx` audible right now?
    fn is_playing(&self, sfx: Sfx) -> bool;

    /// Start `sfx` from the beginning.
    fn rewind_and_play(&mut self, sfx: Sfx);
}

/// Play `sfx` unless it is already playing.
///
/// A sound that is still playing is left alone: it is neither restarted nor layered.
///
/// Returns `true` when playback was started.
pub fn trigger<B>(bank: &mut B, sfx: Sfx) -> bool
where
    B: SoundBank + ?Sized,
{
    if bank.is_playing(sfx) {
        return false;
    }

    trace!("Playing {sfx:?}");
    bank.rewind_and_play(sfx);

    true
}

/// A sound bank that never makes a sound.
#[derive(Debug, Default)]
pub struct Silence;

impl SoundBank for Silence {
    fn is_playing(&self, _sfx: Sfx) -> bool {
        false
    }

    fn rewind_and_play(&mut self, _sfx: Sfx) {}
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::BTreeSet;

    /// Records every play and reports sounds as playing until `finish` is called.
    #[derive(Debug, Default)]
    pub(crate) struct MockBank {
        pub(crate) playing: BTreeSet<Sfx>,
        pub(crate) plays: Vec<Sfx>,
    }

    impl MockBank {
        pub(crate) fn finish(&mut self, sfx: Sfx) {
            self.playing.remove(&sfx);
        }
    }

    impl SoundBank for MockBank {
        fn is_playing(&self, sfx: Sfx) -> bool {
            self.playing.contains(&sfx)
        }

        fn rewind_and_play(&mut self, sfx: Sfx) {
            self.playing.insert(sfx);
            self.plays.push(sfx);
        }
    }

    #[test]
    fn test_no_retrigger_while_playing() {
        let mut bank = MockBank::default();

        assert!(trigger(&mut bank, Sfx::Huh));
        assert!(!trigger(&mut bank, Sfx::Huh));
        assert!(!trigger(&mut bank, Sfx::Huh));
        assert_eq!(bank.plays, vec![Sfx::Huh]);

        // Other sounds are independent
        assert!(trigger(&mut bank, Sfx::Stop));

        // Once finished, it can play again
        bank.finish(Sfx::Huh);
        assert!(trigger(&mut bank, Sfx::Huh));
        assert_eq!(bank.plays, vec![Sfx::Huh, Sfx::Stop, Sfx::Huh]);
    }

    #[test]
    fn test_silence() {
        let mut bank = Silence;

        assert!(trigger(&mut bank, Sfx::Stop));
        assert!(!bank.is_playing(Sfx::Stop));
    }
}
