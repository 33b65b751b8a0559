//! Placement for the evasive "no" button
//!
//! Each time the pointer reaches the button it jumps to a random whole-pixel
//! spot where it still fits on screen. Event wiring stays in page script.

use glam::Vec2;
use rand::Rng;

use crate::{Viewport, rand_between};

/// New top-left corner for a `button`-sized element, in CSS pixels.
///
/// Each axis is uniform in `[0, viewport - button)`, floored. An axis where
/// the button does not fit pins to 0.
pub fn evade_position<R: Rng + ?Sized>(rng: &mut R, viewport: Viewport, button: Vec2) -> Vec2 {
    let max_x = viewport.width - button.x;
    let max_y = viewport.height - button.y;
    Vec2::new(
        rand_between(rng, 0.0, max_x).floor(),
        rand_between(rng, 0.0, max_y).floor(),
    )
}
