//! Drawing surfaces.
//!
//! Scenes only ever talk to a [`Surface`]; the browser canvas lives behind the
//! `wasm` module and [`Recorder`] stands in for it everywhere else.

use glam::DVec2;

use crate::math::Rgba;

/// Logical (CSS pixel) size of a surface.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> DVec2 {
        DVec2::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn min_side(&self) -> f64 {
        self.width.min(self.height)
    }

    pub fn contains(&self, p: DVec2) -> bool {
        p.x >= 0.0 && p.x <= self.width && p.y >= 0.0 && p.y <= self.height
    }
}

/// 2D drawing primitives a scene paints with.
pub trait Surface {
    fn size(&self) -> Size;

    /// Recompute the backing buffer from the current layout bounds and return
    /// the new logical size.
    fn resize(&mut self) -> Size;

    fn clear(&mut self);
    fn set_alpha(&mut self, alpha: f64);
    /// `blur == 0.0` disables the shadow.
    fn set_shadow(&mut self, blur: f64, color: Rgba);

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Rgba);
    fn stroke_circle(&mut self, center: DVec2, radius: f64, width: f64, color: Rgba);
    fn stroke_line(&mut self, from: DVec2, to: DVec2, width: f64, color: Rgba);
    /// Closed outline through `points`.
    fn stroke_polygon(&mut self, points: &[DVec2], width: f64, color: Rgba);
    fn fill_rect(&mut self, origin: DVec2, size: Size, color: Rgba);
}

/// One recorded call on a [`Recorder`].
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Clear,
    Alpha(f64),
    Shadow { blur: f64, color: Rgba },
    FillCircle { center: DVec2, radius: f64, color: Rgba },
    StrokeCircle { center: DVec2, radius: f64, width: f64, color: Rgba },
    Line { from: DVec2, to: DVec2, width: f64, color: Rgba },
    Polygon { points: Vec<DVec2>, width: f64, color: Rgba },
    FillRect { origin: DVec2, size: Size, color: Rgba },
}

/// In-memory surface that records draw calls.
#[derive(Clone, Debug, Default)]
pub struct Recorder {
    size: Size,
    layout: Size,
    ops: Vec<DrawOp>,
}

impl Recorder {
    pub fn new(width: f64, height: f64) -> Self {
        let size = Size::new(width, height);
        Self {
            size,
            layout: size,
            ops: Vec::new(),
        }
    }

    /// Change the simulated layout bounds; picked up on the next `resize`.
    pub fn set_layout(&mut self, width: f64, height: f64) {
        self.layout = Size::new(width, height);
    }

    /// Calls recorded since the last `clear`.
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn count(&self, pred: impl Fn(&DrawOp) -> bool) -> usize {
        self.ops.iter().filter(|op| pred(op)).count()
    }
}

impl Surface for Recorder {
    fn size(&self) -> Size {
        self.size
    }

    fn resize(&mut self) -> Size {
        self.size = self.layout;
        self.size
    }

    fn clear(&mut self) {
        self.ops.clear();
        self.ops.push(DrawOp::Clear);
    }

    fn set_alpha(&mut self, alpha: f64) {
        self.ops.push(DrawOp::Alpha(alpha));
    }

    fn set_shadow(&mut self, blur: f64, color: Rgba) {
        self.ops.push(DrawOp::Shadow { blur, color });
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Rgba) {
        self.ops.push(DrawOp::FillCircle { center, radius, color });
    }

    fn stroke_circle(&mut self, center: DVec2, radius: f64, width: f64, color: Rgba) {
        self.ops.push(DrawOp::StrokeCircle {
            center,
            radius,
            width,
            color,
        });
    }

    fn stroke_line(&mut self, from: DVec2, to: DVec2, width: f64, color: Rgba) {
        self.ops.push(DrawOp::Line {
            from,
            to,
            width,
            color,
        });
    }

    fn stroke_polygon(&mut self, points: &[DVec2], width: f64, color: Rgba) {
        self.ops.push(DrawOp::Polygon {
            points: points.to_vec(),
            width,
            color,
        });
    }

    fn fill_rect(&mut self, origin: DVec2, size: Size, color: Rgba) {
        self.ops.push(DrawOp::FillRect {
            origin,
            size,
            color,
        });
    }
}
