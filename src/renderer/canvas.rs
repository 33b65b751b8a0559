//! Canvas 2D surface (WASM only)

use std::f64::consts::TAU;

use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::Surface;
use crate::Viewport;
use crate::color::Color;
use crate::error::FxError;

/// Draws into an `HtmlCanvasElement` in CSS pixels
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Look up the canvas by element id and grab its 2D context
    pub fn from_element_id(id: &str) -> Result<Self, FxError> {
        let document = web_sys::window()
            .ok_or(FxError::NoWindow)?
            .document()
            .ok_or(FxError::NoDocument)?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id(id)
            .ok_or_else(|| FxError::MissingCanvas(id.to_string()))?
            .dyn_into()
            .map_err(|_| FxError::NotACanvas(id.to_string()))?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or(FxError::NoContext)?
            .dyn_into()
            .map_err(|_| FxError::NoContext)?;
        Ok(Self { canvas, ctx })
    }

    /// Size the backing buffer to the viewport at the device pixel ratio and
    /// set a transform so drawing stays in CSS pixels
    pub fn fit(&self, viewport: Viewport, dpr: f64) -> Result<(), FxError> {
        let dpr = if dpr > 0.0 { dpr } else { 1.0 };
        self.canvas.set_width((viewport.width as f64 * dpr).floor() as u32);
        self.canvas.set_height((viewport.height as f64 * dpr).floor() as u32);

        let style = self.canvas.style();
        style.set_property("width", &format!("{}px", viewport.width))?;
        style.set_property("height", &format!("{}px", viewport.height))?;

        self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)?;
        log::info!(
            "Canvas sized to {}x{} @ {}x",
            viewport.width,
            viewport.height,
            dpr
        );
        Ok(())
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self, viewport: Viewport) {
        self.ctx
            .clear_rect(0.0, 0.0, viewport.width as f64, viewport.height as f64);
    }

    fn fill_rotated_rect(&mut self, center: Vec2, rotation: f32, width: f32, height: f32, color: Color) {
        self.ctx.save();
        let _ = self.ctx.translate(center.x as f64, center.y as f64);
        let _ = self.ctx.rotate(rotation as f64);
        self.ctx.set_fill_style_str(&color.css());
        self.ctx.fill_rect(
            -width as f64 / 2.0,
            -height as f64 / 2.0,
            width as f64,
            height as f64,
        );
        self.ctx.restore();
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color, alpha: f32) {
        self.ctx.set_global_alpha(alpha as f64);
        self.ctx.begin_path();
        let _ = self
            .ctx
            .arc(center.x as f64, center.y as f64, radius as f64, 0.0, TAU);
        self.ctx.set_fill_style_str(&color.css());
        self.ctx.fill();
        self.ctx.set_global_alpha(1.0);
    }
}
