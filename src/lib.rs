//! Celebration FX - confetti and fireworks on a 2D canvas
//!
//! Core modules:
//! - `fx`: Deterministic particle simulation (confetti, sparks, burst scheduling)
//! - `renderer`: Drawing surface abstraction (recording + Canvas 2D)
//! - `color`: Celebration palette
//! - `prompt`: Evasive "no" button placement
//! - `settings`: Tunable effect parameters, persisted in LocalStorage
//! - `error`: Host setup errors

pub mod color;
pub mod error;
pub mod fx;
pub mod prompt;
pub mod renderer;
pub mod settings;

pub use error::FxError;
pub use settings::{QualityPreset, Settings};

use rand::Rng;

/// Effect configuration constants
pub mod consts {
    /// Frame duration the particle velocities are normalized to (60 fps)
    pub const FRAME_MS: f32 = 16.67;
    /// Largest frame delta fed to the integrator; longer pauses are clamped
    pub const MAX_FRAME_DT_MS: f32 = 34.0;

    /// Confetti gravity (units/frame²)
    pub const CONFETTI_GRAVITY: f32 = 0.03;
    /// Confetti is culled once it falls this far below the viewport
    pub const CONFETTI_CULL_MARGIN: f32 = 40.0;

    /// Spark gravity (units/frame²)
    pub const SPARK_GRAVITY: f32 = 0.10;
    /// Multiplicative air drag applied to spark velocity each step
    pub const SPARK_DRAG: f32 = 0.985;
    /// Spark lifetime that maps to full opacity
    pub const SPARK_FULL_ALPHA_LIFE: f32 = 80.0;

    /// Keep burst origins this far from the left, right and top edges
    pub const BURST_MARGIN: f32 = 80.0;
    /// Bursts stay in the upper part of the viewport
    pub const BURST_MAX_HEIGHT_FRACTION: f32 = 0.55;

    /// Default celebration length (ms)
    pub const DEFAULT_DURATION_MS: f64 = 6500.0;
}

/// Viewport size in logical (CSS) pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Uniform draw in `[min, max)`.
///
/// Unlike `Rng::random_range` this never panics on an empty range: when
/// `max <= min` (e.g. a viewport narrower than the burst margins) it
/// returns `min`.
#[inline]
pub fn rand_between<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    if max <= min {
        return min;
    }
    min + rng.random::<f32>() * (max - min)
}
