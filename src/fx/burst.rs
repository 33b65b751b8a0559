//! Firework burst timer chain
//!
//! Bursts run on their own timer chain, not on frames. Each firing spawns one
//! burst and hands back the delay until the next. A chain ends once the stop
//! deadline has passed or a newer `start` superseded it.

use rand::Rng;

use super::particle::burst_origin;
use super::state::FxState;
use crate::{Viewport, rand_between};

/// A pending burst timer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BurstTicket {
    /// Chain this timer belongs to
    pub generation: u64,
    /// Fire after this many ms
    pub delay_ms: f64,
}

impl<R: Rng> FxState<R> {
    /// Fire a burst timer. Returns the next timer of the chain, or `None`
    /// when the chain is finished.
    pub fn fire_burst(&mut self, ticket: BurstTicket, now: f64, viewport: Viewport) -> Option<BurstTicket> {
        if ticket.generation != self.burst_generation {
            log::debug!("Dropping superseded burst chain {}", ticket.generation);
            return None;
        }
        if now > self.stop_at {
            return None;
        }

        let origin = burst_origin(&mut self.rng, viewport);
        let count = self.spawn_burst(origin);
        log::debug!("Burst of {} sparks at ({:.0}, {:.0})", count, origin.x, origin.y);

        let (min, max) = self.settings.burst_interval_ms;
        let delay_ms = rand_between(&mut self.rng, min as f32, max as f32) as f64;
        Some(BurstTicket {
            generation: ticket.generation,
            delay_ms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;

    fn viewport() -> Viewport {
        Viewport::new(1280.0, 720.0)
    }

    #[test]
    fn test_chain_runs_until_deadline() {
        let mut state = FxState::new(5, Settings::default());
        let mut ticket = state.start(0.0, 3000.0, viewport()).burst;
        let mut now = 0.0;
        let mut fired = 0;

        while let Some(t) = ticket {
            now += t.delay_ms;
            let before = state.sparks.len();
            ticket = state.fire_burst(t, now, viewport());
            if ticket.is_some() {
                fired += 1;
                let spawned = state.sparks.len() - before;
                assert!((70..120).contains(&spawned));
                let next = ticket.unwrap().delay_ms;
                assert!((420.0..900.0).contains(&next), "delay {next}");
            } else {
                assert_eq!(state.sparks.len(), before);
            }
        }

        assert!(now > 3000.0);
        // 120 ms lead-in, then at most one burst every 420 ms
        assert!(fired >= 4 && fired <= 8, "fired {fired}");
    }

    #[test]
    fn test_restart_supersedes_old_chain() {
        let mut state = FxState::new(5, Settings::default());
        let old = state.start(0.0, 5000.0, viewport()).burst.unwrap();
        let new = state.start(10.0, 5000.0, viewport()).burst.unwrap();

        assert!(state.fire_burst(old, 130.0, viewport()).is_none());
        assert!(state.sparks.is_empty());
        assert!(state.fire_burst(new, 130.0, viewport()).is_some());
        assert!(!state.sparks.is_empty());
    }

    #[test]
    fn test_late_firing_spawns_nothing() {
        let mut state = FxState::new(5, Settings::default());
        let t = state.start(0.0, 100.0, viewport()).burst.unwrap();
        assert!(state.fire_burst(t, 100.5, viewport()).is_none());
        assert!(state.sparks.is_empty());
    }
}
