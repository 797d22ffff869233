use crate::geo::Rect;
use crate::player::Player;
use crate::sprites::rect;

// Colors
const GREEN: [u8; 4] = [0, 255, 0, 255];
const YELLOW: [u8; 4] = [255, 255, 0, 255];

/// Draw bounding box for the player sprite.
pub(crate) fn draw_player(screen: &mut [u8], width: usize, player: &Player) {
    rect(screen, width, &player.bounds(), GREEN);
}

/// Draw bounding box for the animation overlay.
pub(crate) fn draw_overlay(screen: &mut [u8], width: usize, overlay: Option<Rect>) {
    if let Some(overlay) = overlay {
        rect(screen, width, &overlay, YELLOW);
    }
}
