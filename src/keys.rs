//! Key names for the `[keys]` config table.
//!
//! Names are the `winit` `KeyCode` variant names, e.g. `ArrowUp`, `KeyQ`, `Space`, `F11`.

use winit::keyboard::KeyCode;

/// Generates `parse_key` and `KEY_NAMES` from a list of `KeyCode` variants.
macro_rules! key_names {
    ($($name:ident),* $(,)?) => {
        /// Every key name accepted in the config file.
        pub const KEY_NAMES: &[&str] = &[$(stringify!($name)),*];

        /// Look up a `KeyCode` by its variant name.
        pub fn parse_key(name: &str) -> Option<KeyCode> {
            match name {
                $(stringify!($name) => Some(KeyCode::$name),)*
                _ => None,
            }
        }
    };
}

key_names!(
    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI, KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO,
    KeyP, KeyQ, KeyR, KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,
    Digit0, Digit1, Digit2, Digit3, Digit4, Digit5, Digit6, Digit7, Digit8, Digit9,
    Numpad0, Numpad1, Numpad2, Numpad3, Numpad4, Numpad5, Numpad6, Numpad7, Numpad8, Numpad9,
    ArrowUp, ArrowDown, ArrowLeft, ArrowRight,
    F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12,
    Space, Enter, Escape, Tab, Backspace, Pause,
    ShiftLeft, ShiftRight, ControlLeft, ControlRight, AltLeft, AltRight,
);
