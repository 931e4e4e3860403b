use std::f64::consts::TAU;

use glam::DVec2;
use wasm_bindgen::JsCast;
use web_sys::{window, CanvasRenderingContext2d, HtmlCanvasElement};

use crate::error::SceneError;
use crate::math::Rgba;
use crate::surface::{Size, Surface};

/// `<canvas>` with a 2D context, drawn in CSS pixels.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    size: Size,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, SceneError> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| SceneError::NoContext(canvas.id()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| SceneError::NoContext(canvas.id()))?;

        let mut surface = Self {
            canvas,
            ctx,
            size: Size::default(),
        };
        surface.resize();
        Ok(surface)
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> Size {
        self.size
    }

    fn resize(&mut self) -> Size {
        let dpr = window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0);
        let rect = self.canvas.get_bounding_client_rect();
        self.size = Size::new(rect.width(), rect.height());

        // Backing store in physical pixels, drawing ops in CSS pixels.
        self.canvas.set_width((rect.width() * dpr) as u32);
        self.canvas.set_height((rect.height() * dpr) as u32);
        self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0).ok();
        self.size
    }

    fn clear(&mut self) {
        self.ctx.clear_rect(0.0, 0.0, self.size.width, self.size.height);
    }

    fn set_alpha(&mut self, alpha: f64) {
        self.ctx.set_global_alpha(alpha);
    }

    fn set_shadow(&mut self, blur: f64, color: Rgba) {
        self.ctx.set_shadow_blur(blur);
        self.ctx.set_shadow_color(&color.css());
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Rgba) {
        self.ctx.begin_path();
        self.ctx.arc(center.x, center.y, radius.max(0.0), 0.0, TAU).ok();
        self.ctx.set_fill_style_str(&color.css());
        self.ctx.fill();
    }

    fn stroke_circle(&mut self, center: DVec2, radius: f64, width: f64, color: Rgba) {
        self.ctx.begin_path();
        self.ctx.arc(center.x, center.y, radius.max(0.0), 0.0, TAU).ok();
        self.ctx.set_line_width(width);
        self.ctx.set_stroke_style_str(&color.css());
        self.ctx.stroke();
    }

    fn stroke_line(&mut self, from: DVec2, to: DVec2, width: f64, color: Rgba) {
        self.ctx.begin_path();
        self.ctx.move_to(from.x, from.y);
        self.ctx.line_to(to.x, to.y);
        self.ctx.set_line_width(width);
        self.ctx.set_stroke_style_str(&color.css());
        self.ctx.stroke();
    }

    fn stroke_polygon(&mut self, points: &[DVec2], width: f64, color: Rgba) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        self.ctx.begin_path();
        self.ctx.move_to(first.x, first.y);
        for p in rest {
            self.ctx.line_to(p.x, p.y);
        }
        self.ctx.close_path();
        self.ctx.set_line_width(width);
        self.ctx.set_stroke_style_str(&color.css());
        self.ctx.stroke();
    }

    fn fill_rect(&mut self, origin: DVec2, size: Size, color: Rgba) {
        self.ctx.set_fill_style_str(&color.css());
        self.ctx.fill_rect(origin.x, origin.y, size.width, size.height);
    }
}
