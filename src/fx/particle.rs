//! Particle types: confetti pieces and firework sparks
//!
//! Velocities are in CSS pixels per 60 fps frame; integration takes the
//! frame-normalized step `k = dt / FRAME_MS`. Lifetimes count frames and drop
//! by exactly one per step regardless of `dt`.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use crate::color::{Color, random_color};
use crate::consts::*;
use crate::renderer::Surface;
use crate::{Viewport, rand_between};

/// A falling, spinning streamer rectangle
#[derive(Debug, Clone, PartialEq)]
pub struct Confetti {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Rectangle width; height is 60% of this
    pub size: f32,
    /// Rotation (radians)
    pub rotation: f32,
    /// Angular velocity (radians/frame)
    pub angular_vel: f32,
    pub color: Color,
    /// Frames left to live
    pub life: f32,
}

impl Confetti {
    /// Spawn a piece just above the viewport, somewhere across its width
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, viewport: Viewport) -> Self {
        Self {
            pos: Vec2::new(
                rand_between(rng, 0.0, viewport.width),
                rand_between(rng, -120.0, -10.0),
            ),
            vel: Vec2::new(rand_between(rng, -2.5, 2.5), rand_between(rng, 2.5, 6.5)),
            size: rand_between(rng, 4.0, 9.0),
            rotation: rand_between(rng, 0.0, TAU),
            angular_vel: rand_between(rng, -0.18, 0.18),
            color: random_color(rng),
            life: rand_between(rng, 240.0, 420.0),
        }
    }

    /// Advance one frame
    pub fn integrate(&mut self, k: f32) {
        self.pos += self.vel * k;
        self.rotation += self.angular_vel * k;
        self.vel.y += CONFETTI_GRAVITY * k;
        self.life -= 1.0;
    }

    /// Still alive and not yet fallen past the bottom margin
    pub fn is_alive(&self, viewport: Viewport) -> bool {
        self.life > 0.0 && self.pos.y < viewport.height + CONFETTI_CULL_MARGIN
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.fill_rotated_rect(self.pos, self.rotation, self.size, self.size * 0.6, self.color);
    }
}

/// One fragment of a firework burst
#[derive(Debug, Clone, PartialEq)]
pub struct Spark {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: Color,
    /// Frames left to live
    pub life: f32,
}

impl Spark {
    /// Spawn a spark at `origin` flying outward at a random angle and speed
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, origin: Vec2) -> Self {
        let angle = rand_between(rng, 0.0, TAU);
        let speed = rand_between(rng, 2.2, 7.5);
        Self {
            pos: origin,
            vel: Vec2::from_angle(angle) * speed,
            radius: rand_between(rng, 1.5, 3.0),
            color: random_color(rng),
            life: rand_between(rng, 40.0, 80.0),
        }
    }

    /// Advance one frame (gravity, then air drag)
    pub fn integrate(&mut self, k: f32) {
        self.pos += self.vel * k;
        self.vel.y += SPARK_GRAVITY * k;
        self.vel *= SPARK_DRAG;
        self.life -= 1.0;
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }

    /// Opacity fades with remaining life
    #[inline]
    pub fn alpha(&self) -> f32 {
        (self.life / SPARK_FULL_ALPHA_LIFE).clamp(0.0, 1.0)
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.fill_circle(self.pos, self.radius, self.color, self.alpha());
    }
}

/// Push one burst of sparks from `origin`; returns how many were spawned.
///
/// The count is uniform in `[count.0, count.1)`.
pub fn spawn_burst<R: Rng + ?Sized>(
    rng: &mut R,
    origin: Vec2,
    count: (u32, u32),
    sparks: &mut Vec<Spark>,
) -> usize {
    let (min, max) = count;
    let n = if max > min { rng.random_range(min..max) } else { min };
    let n = n as usize;
    sparks.reserve(n);
    for _ in 0..n {
        sparks.push(Spark::spawn(rng, origin));
    }
    n
}

/// Random burst origin: inside the side margins, in the upper part of the viewport
pub fn burst_origin<R: Rng + ?Sized>(rng: &mut R, viewport: Viewport) -> Vec2 {
    Vec2::new(
        rand_between(rng, BURST_MARGIN, viewport.width - BURST_MARGIN),
        rand_between(
            rng,
            BURST_MARGIN,
            viewport.height * BURST_MAX_HEIGHT_FRACTION,
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::PALETTE;
    use proptest::prelude::*;
    use rand::{RngCore, SeedableRng};
    use rand_pcg::Pcg32;

    fn spark_with_life(life: f32) -> Spark {
        Spark {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            radius: 2.0,
            color: PALETTE[0],
            life,
        }
    }

    #[test]
    fn test_burst_at_fixed_origin() {
        let mut rng = Pcg32::seed_from_u64(2024);
        let origin = Vec2::new(100.0, 100.0);
        let mut sparks = Vec::new();
        let n = spawn_burst(&mut rng, origin, (70, 120), &mut sparks);

        assert!((70..=120).contains(&n), "burst size {n}");
        assert_eq!(sparks.len(), n);
        for s in &sparks {
            assert_eq!(s.pos, origin);
            let speed = s.vel.length();
            assert!(speed >= 2.2 - 1e-4 && speed < 7.5 + 1e-4, "speed {speed}");
            assert!((1.5..3.0).contains(&s.radius));
            assert!((40.0..80.0).contains(&s.life));
        }
    }

    /// Rng that returns the same word forever
    struct ConstRng(u32);

    impl RngCore for ConstRng {
        fn next_u32(&mut self) -> u32 {
            self.0
        }

        fn next_u64(&mut self) -> u64 {
            ((self.0 as u64) << 32) | self.0 as u64
        }

        fn fill_bytes(&mut self, dst: &mut [u8]) {
            for chunk in dst.chunks_mut(4) {
                chunk.copy_from_slice(&self.0.to_le_bytes()[..chunk.len()]);
            }
        }
    }

    #[test]
    fn test_spark_velocity_from_angle_and_speed() {
        let origin = Vec2::new(30.0, 40.0);

        // Every draw at the bottom of its range: angle 0, speed 2.2
        let s = Spark::spawn(&mut ConstRng(0), origin);
        assert_eq!(s.pos, origin);
        assert!((s.vel - Vec2::new(2.2, 0.0)).length() < 1e-4, "vel {}", s.vel);

        // Every draw at the midpoint: angle pi, speed 4.85
        let s = Spark::spawn(&mut ConstRng(0x8000_0000), origin);
        assert_eq!(s.pos, origin);
        assert!((s.vel - Vec2::new(-4.85, 0.0)).length() < 1e-4, "vel {}", s.vel);
        assert_eq!(s.radius, 2.25);
        assert_eq!(s.life, 60.0);
    }

    #[test]
    fn test_burst_covers_every_direction() {
        let mut rng = Pcg32::seed_from_u64(2024);
        let mut sparks = Vec::new();
        spawn_burst(&mut rng, Vec2::ZERO, (70, 120), &mut sparks);

        let mut quadrants = [false; 4];
        for s in &sparks {
            let q = match (s.vel.x >= 0.0, s.vel.y >= 0.0) {
                (true, true) => 0,
                (false, true) => 1,
                (false, false) => 2,
                (true, false) => 3,
            };
            quadrants[q] = true;
        }
        assert_eq!(quadrants, [true; 4]);
    }

    #[test]
    fn test_burst_degenerate_count() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut sparks = Vec::new();
        assert_eq!(spawn_burst(&mut rng, Vec2::ZERO, (5, 5), &mut sparks), 5);
    }

    #[test]
    fn test_spark_alpha() {
        assert_eq!(spark_with_life(80.0).alpha(), 1.0);
        assert_eq!(spark_with_life(120.0).alpha(), 1.0);
        assert_eq!(spark_with_life(40.0).alpha(), 0.5);
        assert_eq!(spark_with_life(-3.0).alpha(), 0.0);
    }

    #[test]
    fn test_spark_drag_and_gravity() {
        let mut s = spark_with_life(50.0);
        s.vel = Vec2::new(2.0, 0.0);
        s.integrate(1.0);
        assert_eq!(s.pos, Vec2::new(2.0, 0.0));
        assert!((s.vel.x - 2.0 * 0.985).abs() < 1e-6);
        assert!((s.vel.y - 0.10 * 0.985).abs() < 1e-6);
        assert_eq!(s.life, 49.0);
    }

    #[test]
    fn test_confetti_integrate() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut c = Confetti::spawn(&mut rng, Viewport::new(800.0, 600.0));
        let before = c.clone();
        c.integrate(2.0);
        assert_eq!(c.pos, before.pos + before.vel * 2.0);
        assert!((c.vel.y - (before.vel.y + 0.06)).abs() < 1e-6);
        assert!((c.rotation - (before.rotation + before.angular_vel * 2.0)).abs() < 1e-6);
        assert_eq!(c.life, before.life - 1.0);
    }

    #[test]
    fn test_confetti_culled_below_margin() {
        let mut rng = Pcg32::seed_from_u64(3);
        let vp = Viewport::new(800.0, 600.0);
        let mut c = Confetti::spawn(&mut rng, vp);
        c.pos.y = 639.0;
        assert!(c.is_alive(vp));
        c.pos.y = 640.0;
        assert!(!c.is_alive(vp));
    }

    #[test]
    fn test_burst_origin_in_upper_band() {
        let mut rng = Pcg32::seed_from_u64(11);
        let vp = Viewport::new(1280.0, 720.0);
        for _ in 0..200 {
            let o = burst_origin(&mut rng, vp);
            assert!(o.x >= 80.0 && o.x < 1200.0);
            assert!(o.y >= 80.0 && o.y < 720.0 * 0.55);
        }
    }

    #[test]
    fn test_burst_origin_tiny_viewport() {
        let mut rng = Pcg32::seed_from_u64(11);
        let o = burst_origin(&mut rng, Viewport::new(100.0, 100.0));
        assert_eq!(o, Vec2::new(80.0, 80.0));
    }

    proptest! {
        #[test]
        fn confetti_spawns_above_viewport(seed in any::<u64>(), w in 1.0f32..4000.0, h in 1.0f32..4000.0) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let c = Confetti::spawn(&mut rng, Viewport::new(w, h));
            prop_assert!(c.pos.x >= 0.0 && c.pos.x < w);
            prop_assert!(c.pos.y >= -120.0 && c.pos.y < -10.0);
            prop_assert!(c.vel.x >= -2.5 && c.vel.x < 2.5);
            prop_assert!(c.vel.y >= 2.5 && c.vel.y < 6.5);
            prop_assert!(c.size >= 4.0 && c.size < 9.0);
            prop_assert!(c.angular_vel >= -0.18 && c.angular_vel < 0.18);
            prop_assert!(c.life >= 240.0 && c.life < 420.0);
            prop_assert!(PALETTE.contains(&c.color));
        }
    }
}
