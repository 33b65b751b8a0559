//! Deterministic celebration simulation
//!
//! Everything here is host-independent:
//! - Time arrives as explicit `now` timestamps (ms)
//! - Randomness comes from an injected `Rng` (seeded `Pcg32` by default)
//! - Drawing goes through the `Surface` trait

pub mod burst;
pub mod particle;
pub mod state;
pub mod tick;

pub use burst::BurstTicket;
pub use particle::{Confetti, Spark, burst_origin, spawn_burst};
pub use state::{FxState, StartOutcome};
pub use tick::{FrameStatus, step};
