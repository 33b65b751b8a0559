//! Simulation state for one celebration instance
//!
//! Both callback chains (frames and burst timers) mutate this object and
//! nothing else; there is no module-level state.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::burst::BurstTicket;
use super::particle::{Confetti, Spark, spawn_burst};
use crate::Viewport;
use crate::settings::Settings;

/// What the host must do after [`FxState::start`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StartOutcome {
    /// A frame loop must be requested (false when one is already pending)
    pub request_frame: bool,
    /// First timer of the new burst chain, if fireworks are enabled
    pub burst: Option<BurstTicket>,
}

/// Complete effect state
#[derive(Debug, Clone)]
pub struct FxState<R = Pcg32> {
    pub settings: Settings,
    /// Live confetti pieces
    pub confetti: Vec<Confetti>,
    /// Live firework sparks
    pub sparks: Vec<Spark>,
    /// A frame callback is pending or executing
    pub(crate) running: bool,
    /// No new particles after this time (ms)
    pub(crate) stop_at: f64,
    /// Timestamp of the previous frame (ms)
    pub(crate) last_time: f64,
    /// Identifies the current burst chain; bumped by every start
    pub(crate) burst_generation: u64,
    pub(crate) rng: R,
}

impl FxState<Pcg32> {
    /// Create an idle effect with a seeded RNG
    pub fn new(seed: u64, settings: Settings) -> Self {
        Self::with_rng(Pcg32::seed_from_u64(seed), settings)
    }
}

impl<R: Rng> FxState<R> {
    /// Create an idle effect drawing randomness from `rng`
    pub fn with_rng(rng: R, settings: Settings) -> Self {
        Self {
            settings,
            confetti: Vec::new(),
            sparks: Vec::new(),
            running: false,
            stop_at: 0.0,
            last_time: 0.0,
            burst_generation: 0,
            rng,
        }
    }

    /// Start (or restart) a celebration lasting `duration_ms` from `now`.
    ///
    /// Restarting while running resets particles and the burst chain but
    /// never asks for a second frame loop.
    pub fn start(&mut self, now: f64, duration_ms: f64, viewport: Viewport) -> StartOutcome {
        self.confetti.clear();
        self.sparks.clear();
        self.stop_at = now + duration_ms.max(0.0);

        let request_frame = !self.running;
        if request_frame {
            self.running = true;
            self.last_time = now;
        }

        let seed = self.settings.initial_confetti();
        self.spawn_confetti(seed, viewport);

        self.burst_generation += 1;
        let burst = self.settings.fireworks_enabled().then(|| BurstTicket {
            generation: self.burst_generation,
            delay_ms: self.settings.first_burst_delay_ms,
        });

        log::info!(
            "Celebration started: {} ms, {} confetti{}",
            duration_ms,
            seed,
            if request_frame { "" } else { " (restart)" }
        );

        StartOutcome { request_frame, burst }
    }

    /// Spawn `count` confetti pieces above the viewport
    pub fn spawn_confetti(&mut self, count: usize, viewport: Viewport) {
        self.confetti.reserve(count);
        for _ in 0..count {
            self.confetti.push(Confetti::spawn(&mut self.rng, viewport));
        }
    }

    /// Spawn one firework burst at `origin`; returns the spark count
    pub fn spawn_burst(&mut self, origin: glam::Vec2) -> usize {
        spawn_burst(&mut self.rng, origin, self.settings.burst_sparks, &mut self.sparks)
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Time (ms) after which no new particles are seeded
    pub fn stop_at(&self) -> f64 {
        self.stop_at
    }

    /// No particles alive
    pub fn is_empty(&self) -> bool {
        self.confetti.is_empty() && self.sparks.is_empty()
    }
}
