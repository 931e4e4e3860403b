//! Numeric helpers and colours shared by every scene.

/// Linear interpolation between `a` and `b`.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Clamp `v` into `[min, max]`. A reversed range resolves to `min`.
pub fn clamp(v: f64, min: f64, max: f64) -> f64 {
    if v < min {
        min
    } else if v > max {
        max
    } else {
        v
    }
}

/// Re-map `v` from `[in_min, in_max]` onto `[out_min, out_max]`.
pub fn map_range(v: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    let span = in_max - in_min;
    if span == 0.0 {
        return out_min;
    }
    lerp(out_min, out_max, (v - in_min) / span)
}

pub fn smoothstep(edge0: f64, edge1: f64, x: f64) -> f64 {
    let t = clamp(map_range(x, edge0, edge1, 0.0, 1.0), 0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

pub fn ease_in_out_cubic(t: f64) -> f64 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

pub fn ease_out_quad(t: f64) -> f64 {
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Colour with 8-bit channels and a float alpha, as canvas styles expect.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn with_alpha(self, a: f64) -> Self {
        Self {
            a: clamp(a, 0.0, 1.0),
            ..self
        }
    }

    /// Channel-wise blend toward `other`.
    pub fn mix(self, other: Rgba, t: f64) -> Self {
        let t = clamp(t, 0.0, 1.0);
        let ch = |a: u8, b: u8| lerp(a as f64, b as f64, t).round() as u8;
        Self {
            r: ch(self.r, other.r),
            g: ch(self.g, other.g),
            b: ch(self.b, other.b),
            a: lerp(self.a, other.a, t),
        }
    }

    /// CSS colour string, e.g. `rgba(0, 212, 255, 0.5)`.
    pub fn css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// Site palette.
pub mod palette {
    use super::Rgba;

    pub const CYAN: Rgba = Rgba::rgb(0, 212, 255);
    pub const VIOLET: Rgba = Rgba::rgb(139, 92, 246);
    pub const MAGENTA: Rgba = Rgba::rgb(236, 72, 153);
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);
}
