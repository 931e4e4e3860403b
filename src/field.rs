//! Particle field: drifting particles joined by proximity lines, pushed away
//! by the pointer, with a few slowly rotating outline shapes behind them.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI, TAU};

use glam::DVec2;
use rand::Rng;

use crate::config::{AppContext, FieldOverrides};
use crate::math::{clamp, palette, Rgba};
use crate::surface::{Size, Surface};

const SHAPE_PULSE_STEP: f64 = 0.01;

/// Tuning for one particle field.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldParams {
    pub particles: usize,
    pub shapes: usize,
    /// Pairs closer than this are connected.
    pub connection_distance: f64,
    /// Pointer influence radius; zero disables pointer interaction.
    pub interaction_radius: f64,
    /// Displacement applied at full repulsion strength.
    pub push: f64,
    pub speed_min: f64,
    pub speed_max: f64,
    pub size_min: f64,
    pub size_max: f64,
    pub pulse_step: f64,
    pub repel: bool,
    pub pulse: bool,
    pub pointer_links: bool,
    pub color: Rgba,
    pub far_color: Rgba,
    pub link_color: Rgba,
}

impl FieldParams {
    /// Landing-page hero field.
    pub fn hero(ctx: &AppContext) -> Self {
        let compact = ctx.viewport.is_compact();
        Self {
            particles: if compact { 40 } else { 80 },
            shapes: if compact { 4 } else { 8 },
            connection_distance: 120.0,
            interaction_radius: 100.0,
            push: 3.0,
            speed_min: 0.2,
            speed_max: 0.8,
            size_min: 1.0,
            size_max: 3.0,
            pulse_step: 0.02,
            repel: true,
            pulse: true,
            pointer_links: false,
            color: palette::CYAN,
            far_color: palette::VIOLET,
            link_color: palette::CYAN,
        }
    }

    /// Sparse field behind the loading screen. Ignores the pointer.
    pub fn loading(ctx: &AppContext) -> Self {
        let compact = ctx.viewport.is_compact();
        Self {
            particles: if compact { 20 } else { 40 },
            shapes: 0,
            connection_distance: 100.0,
            interaction_radius: 0.0,
            speed_min: 0.1,
            speed_max: 0.4,
            pulse_step: 0.03,
            repel: false,
            color: palette::VIOLET,
            far_color: palette::MAGENTA,
            link_color: palette::VIOLET,
            ..Self::hero(ctx)
        }
    }

    pub fn with_overrides(mut self, o: &FieldOverrides) -> Self {
        if let Some(v) = o.particles {
            self.particles = v;
        }
        if let Some(v) = o.shapes {
            self.shapes = v;
        }
        if let Some(v) = o.connection_distance {
            self.connection_distance = v.max(0.0);
        }
        if let Some(v) = o.interaction_radius {
            self.interaction_radius = v.max(0.0);
        }
        if let Some(v) = o.repel {
            self.repel = v;
        }
        if let Some(v) = o.pulse {
            self.pulse = v;
        }
        if let Some(v) = o.pointer_links {
            self.pointer_links = v;
        }
        self
    }

    /// Drops every decorative entity when the user prefers reduced motion.
    pub fn respecting_motion(mut self, ctx: &AppContext) -> Self {
        if ctx.reduced_motion {
            self.particles = 0;
            self.shapes = 0;
        }
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: DVec2,
    /// Depth in [0, 1]; only tints the particle.
    pub z: f64,
    /// Heading in radians.
    pub heading: f64,
    pub speed: f64,
    pub size: f64,
    pub opacity: f64,
    pub pulse: f64,
}

impl Particle {
    pub fn new(pos: DVec2, heading: f64, speed: f64) -> Self {
        Self {
            pos,
            z: 0.0,
            heading,
            speed,
            size: 2.0,
            opacity: 0.6,
            pulse: 0.0,
        }
    }

    fn random(rng: &mut impl Rng, bounds: Size, params: &FieldParams) -> Self {
        Self {
            pos: DVec2::new(
                rng.gen_range(0.0..=bounds.width),
                rng.gen_range(0.0..=bounds.height),
            ),
            z: rng.gen(),
            heading: rng.gen_range(0.0..TAU),
            speed: rng.gen_range(params.speed_min..=params.speed_max),
            size: rng.gen_range(params.size_min..=params.size_max),
            opacity: rng.gen_range(0.3..=0.8),
            pulse: rng.gen_range(0.0..TAU),
        }
    }

    pub fn velocity(&self) -> DVec2 {
        DVec2::from_angle(self.heading) * self.speed
    }
}

/// A derived edge between particles `a < b`, rebuilt every frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Connection {
    pub a: usize,
    pub b: usize,
    pub strength: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShapeKind {
    Square,
    Circle,
    Triangle,
    Diamond,
}

impl ShapeKind {
    const ALL: [ShapeKind; 4] = [
        ShapeKind::Square,
        ShapeKind::Circle,
        ShapeKind::Triangle,
        ShapeKind::Diamond,
    ];
}

#[derive(Clone, Debug, PartialEq)]
pub struct Shape {
    pub pos: DVec2,
    pub size: f64,
    pub rotation: f64,
    pub rotation_speed: f64,
    pub kind: ShapeKind,
    pub pulse: f64,
}

impl Shape {
    fn random(rng: &mut impl Rng, bounds: Size) -> Self {
        Self {
            pos: DVec2::new(
                rng.gen_range(0.0..=bounds.width),
                rng.gen_range(0.0..=bounds.height),
            ),
            size: rng.gen_range(20.0..=60.0),
            rotation: rng.gen_range(0.0..TAU),
            rotation_speed: rng.gen_range(-0.01..=0.01),
            kind: ShapeKind::ALL[rng.gen_range(0..ShapeKind::ALL.len())],
            pulse: rng.gen_range(0.0..TAU),
        }
    }

    /// Current size including the breathing effect.
    pub fn scaled_size(&self) -> f64 {
        self.size * (1.0 + 0.1 * self.pulse.sin())
    }

    /// Outline vertices; empty for circles.
    pub fn outline(&self) -> Vec<DVec2> {
        let r = self.scaled_size() / 2.0;
        let vertex = |angle: f64, stretch: f64| {
            let local = DVec2::from_angle(angle) * r;
            let local = DVec2::new(local.x, local.y * stretch);
            self.pos + DVec2::from_angle(self.rotation).rotate(local)
        };
        match self.kind {
            ShapeKind::Circle => Vec::new(),
            ShapeKind::Square => (0..4)
                .map(|k| vertex(FRAC_PI_4 + k as f64 * FRAC_PI_2, 1.0))
                .collect(),
            ShapeKind::Diamond => (0..4)
                .map(|k| vertex(k as f64 * FRAC_PI_2, 1.4))
                .collect(),
            ShapeKind::Triangle => (0..3)
                .map(|k| vertex(-FRAC_PI_2 + k as f64 * TAU / 3.0, 1.0))
                .collect(),
        }
    }
}

/// Fade strength for a pair `distance` apart, or `None` when too far.
pub fn connection_strength(distance: f64, max_distance: f64) -> Option<f64> {
    (distance < max_distance).then(|| (max_distance - distance) / max_distance)
}

/// Repulsion vector pushing `pos` away from `pointer`: the unit separation
/// scaled by `(radius - d) / radius`. `None` outside the radius or when the
/// two points coincide.
pub fn repulsion(pos: DVec2, pointer: DVec2, radius: f64) -> Option<DVec2> {
    let offset = pos - pointer;
    let d = offset.length();
    if d >= radius || d == 0.0 {
        return None;
    }
    Some(offset / d * ((radius - d) / radius))
}

#[derive(Clone, Debug)]
pub struct ParticleField {
    params: FieldParams,
    particles: Vec<Particle>,
    shapes: Vec<Shape>,
    connections: Vec<Connection>,
    pointer: Option<DVec2>,
    pointer_links: Vec<(usize, f64)>,
}

impl ParticleField {
    /// Populate `params.particles` particles and `params.shapes` shapes
    /// uniformly within `bounds`.
    pub fn new(params: FieldParams, bounds: Size, rng: &mut impl Rng) -> Self {
        let particles = (0..params.particles)
            .map(|_| Particle::random(rng, bounds, &params))
            .collect();
        let shapes = (0..params.shapes)
            .map(|_| Shape::random(rng, bounds))
            .collect();
        Self::with_entities(params, particles, shapes)
    }

    pub fn with_entities(params: FieldParams, particles: Vec<Particle>, shapes: Vec<Shape>) -> Self {
        Self {
            params,
            particles,
            shapes,
            connections: Vec::new(),
            pointer: None,
            pointer_links: Vec::new(),
        }
    }

    pub fn params(&self) -> &FieldParams {
        &self.params
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Particle index and strength for every particle linked to the pointer.
    pub fn pointer_links(&self) -> &[(usize, f64)] {
        &self.pointer_links
    }

    pub fn update(&mut self, pointer: Option<DVec2>, bounds: Size) {
        let radius = self.params.interaction_radius;
        for p in &mut self.particles {
            if self.params.repel {
                if let Some(force) = pointer.and_then(|ptr| repulsion(p.pos, ptr, radius)) {
                    p.pos += force * self.params.push;
                }
            }

            p.pos += p.velocity();

            if self.params.pulse {
                p.pulse += self.params.pulse_step;
            }

            // Each axis mirrors one component of the heading independently.
            if p.pos.x < 0.0 || p.pos.x > bounds.width {
                p.heading = PI - p.heading;
            }
            if p.pos.y < 0.0 || p.pos.y > bounds.height {
                p.heading = -p.heading;
            }
            p.pos.x = clamp(p.pos.x, 0.0, bounds.width);
            p.pos.y = clamp(p.pos.y, 0.0, bounds.height);
        }

        for s in &mut self.shapes {
            s.rotation += s.rotation_speed;
            s.pulse += SHAPE_PULSE_STEP;
        }

        self.rebuild_connections();

        self.pointer = pointer;
        self.pointer_links.clear();
        if self.params.pointer_links {
            if let Some(ptr) = pointer {
                self.pointer_links.extend(self.particles.iter().enumerate().filter_map(|(i, p)| {
                    connection_strength(p.pos.distance(ptr), radius).map(|s| (i, s))
                }));
            }
        }
    }

    fn rebuild_connections(&mut self) {
        self.connections.clear();
        let max = self.params.connection_distance;
        for (a, pa) in self.particles.iter().enumerate() {
            for (b, pb) in self.particles.iter().enumerate().skip(a + 1) {
                if let Some(strength) = connection_strength(pa.pos.distance(pb.pos), max) {
                    self.connections.push(Connection { a, b, strength });
                }
            }
        }
    }

    fn breath(&self, phase: f64) -> f64 {
        if self.params.pulse {
            phase.sin()
        } else {
            0.0
        }
    }

    pub fn render<S: Surface>(&self, surface: &mut S) {
        let params = &self.params;

        surface.set_shadow(0.0, params.link_color);
        for c in &self.connections {
            let (a, b) = (&self.particles[c.a], &self.particles[c.b]);
            surface.stroke_line(a.pos, b.pos, 0.5, params.link_color.with_alpha(c.strength * 0.3));
        }
        if let Some(ptr) = self.pointer {
            for &(i, strength) in &self.pointer_links {
                let p = &self.particles[i];
                surface.stroke_line(ptr, p.pos, 0.8, palette::WHITE.with_alpha(strength * 0.4));
            }
        }

        for p in &self.particles {
            let breath = self.breath(p.pulse);
            let color = params.color.mix(params.far_color, p.z);
            surface.set_shadow(p.size * 4.0, color);
            surface.fill_circle(
                p.pos,
                p.size * (1.0 + 0.3 * breath),
                color.with_alpha(p.opacity * (0.7 + 0.3 * breath)),
            );
        }

        surface.set_shadow(0.0, params.color);
        for s in &self.shapes {
            let color = params.far_color.with_alpha(0.15 + 0.1 * s.pulse.sin());
            match s.kind {
                ShapeKind::Circle => surface.stroke_circle(s.pos, s.scaled_size() / 2.0, 1.0, color),
                _ => surface.stroke_polygon(&s.outline(), 1.0, color),
            }
        }
    }
}
