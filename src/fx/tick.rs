//! Per-frame update and render pass

use rand::Rng;

use super::state::FxState;
use crate::Viewport;
use crate::consts::*;
use crate::renderer::Surface;

/// Whether the host should schedule another frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    /// Request the next frame
    Continue,
    /// Celebration over, surface cleared, loop stopped
    Idle,
}

/// Advance the effect to `now` (ms) and draw it.
///
/// The frame delta is clamped to `[0, MAX_FRAME_DT_MS]` so a long pause
/// (background tab) does not launch particles across the screen.
pub fn step<R, S>(state: &mut FxState<R>, now: f64, viewport: Viewport, surface: &mut S) -> FrameStatus
where
    R: Rng,
    S: Surface + ?Sized,
{
    let dt = ((now - state.last_time) as f32).clamp(0.0, MAX_FRAME_DT_MS);
    state.last_time = now;
    let k = dt / FRAME_MS;

    surface.clear(viewport);

    // Confetti: integrate, cull, top up while the celebration lasts
    for piece in state.confetti.iter_mut() {
        piece.integrate(k);
    }
    state.confetti.retain(|p| p.is_alive(viewport));

    if now < state.stop_at {
        let cap = state.settings.max_confetti();
        let room = cap
            .saturating_sub(state.confetti.len())
            .min(state.settings.confetti_per_frame);
        state.spawn_confetti(room, viewport);
    }

    // Sparks
    for spark in state.sparks.iter_mut() {
        spark.integrate(k);
    }
    state.sparks.retain(|s| s.is_alive());

    for piece in &state.confetti {
        piece.draw(surface);
    }
    for spark in &state.sparks {
        spark.draw(surface);
    }

    if now > state.stop_at && state.is_empty() {
        if state.running {
            log::info!("Celebration finished");
        }
        state.running = false;
        surface.clear(viewport);
        return FrameStatus::Idle;
    }

    FrameStatus::Continue
}
