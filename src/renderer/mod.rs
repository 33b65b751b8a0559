//! Drawing surfaces
//!
//! The simulation draws through [`Surface`] in logical (CSS) pixels. Backing
//! buffer scaling is the surface's concern.

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;

use glam::Vec2;

use crate::Viewport;
use crate::color::Color;

/// A 2D drawing target
pub trait Surface {
    /// Clear the whole viewport to transparent
    fn clear(&mut self, viewport: Viewport);

    /// Fill a `width` x `height` rectangle centered on `center`, rotated by `rotation` radians
    fn fill_rotated_rect(&mut self, center: Vec2, rotation: f32, width: f32, height: f32, color: Color);

    /// Fill a circle with the given opacity (0..=1)
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color, alpha: f32);
}

/// A recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    Rect {
        center: Vec2,
        rotation: f32,
        width: f32,
        height: f32,
        color: Color,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
        alpha: f32,
    },
}

/// Surface that records draw calls instead of rasterizing (headless runs, tests)
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw calls issued since the last clear
    pub fn frame(&self) -> &[DrawCommand] {
        let start = self
            .commands
            .iter()
            .rposition(|c| *c == DrawCommand::Clear)
            .map(|i| i + 1)
            .unwrap_or(0);
        &self.commands[start..]
    }

    pub fn rect_count(&self) -> usize {
        self.frame()
            .iter()
            .filter(|c| matches!(c, DrawCommand::Rect { .. }))
            .count()
    }

    pub fn circle_count(&self) -> usize {
        self.frame()
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
            .count()
    }

    /// Forget everything recorded so far
    pub fn reset(&mut self) {
        self.commands.clear();
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self, _viewport: Viewport) {
        self.commands.push(DrawCommand::Clear);
    }

    fn fill_rotated_rect(&mut self, center: Vec2, rotation: f32, width: f32, height: f32, color: Color) {
        self.commands.push(DrawCommand::Rect {
            center,
            rotation,
            width,
            height,
            color,
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color, alpha: f32) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
            alpha,
        });
    }
}
