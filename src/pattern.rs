//! Time-driven decorative patterns.
//!
//! Every pattern's geometry is a pure function of the scene clock, so the
//! layout helpers below can be called without a surface.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, TAU};

use glam::DVec2;
use rand::Rng;

use crate::math::{ease_in_out_cubic, ease_out_quad, palette, smoothstep};
use crate::surface::{Size, Surface};

pub const NETWORK_NODES: usize = 8;
pub const ORBITERS: usize = 24;
pub const LAYERS: [usize; 4] = [6, 8, 6, 4];

const SCAN_SPACING: f64 = 6.0;
const SCAN_SPEED: f64 = 20.0;
const ORBIT_PHASE_STEP: f64 = 0.02;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PatternKind {
    Default,
    Hologram,
    Network,
    RadialParticles,
    LayeredNetwork,
}

/// Rotated square of the hologram pattern.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ring {
    pub center: DVec2,
    pub half_size: f64,
    pub rotation: f64,
}

impl Ring {
    pub fn corners(&self) -> [DVec2; 4] {
        let r = self.half_size * std::f64::consts::SQRT_2;
        std::array::from_fn(|k| {
            self.center + DVec2::from_angle(self.rotation + FRAC_PI_4 + k as f64 * FRAC_PI_2) * r
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Hologram {
    pub rings: [Ring; 3],
    /// Y coordinates of the visible scan lines.
    pub scan_lines: Vec<f64>,
}

/// Radii of the three breathing circles of the default pattern.
pub fn default_rings(t: f64, size: Size) -> [f64; 3] {
    let base = size.min_side() * 0.15;
    std::array::from_fn(|i| {
        let phase = ((t * 0.5 + i as f64 / 3.0) % 1.0 + 1.0) % 1.0;
        let wave = if phase < 0.5 { phase * 2.0 } else { 2.0 - phase * 2.0 };
        base * (1.0 + i as f64) * (0.85 + 0.15 * ease_in_out_cubic(wave))
    })
}

pub fn hologram(t: f64, size: Size) -> Hologram {
    let center = size.center();
    let base = size.min_side() * 0.3;
    let rings = std::array::from_fn(|i| Ring {
        center,
        half_size: base * (1.0 - i as f64 * 0.25),
        rotation: t * (0.5 + i as f64 * 0.2) + i as f64 * TAU / 3.0,
    });

    let offset = (t * SCAN_SPEED).rem_euclid(SCAN_SPACING);
    let count = (size.height / SCAN_SPACING).ceil() as usize;
    let scan_lines = (0..count)
        .map(|k| k as f64 * SCAN_SPACING + offset)
        .filter(|y| *y <= size.height)
        .collect();

    Hologram { rings, scan_lines }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Network {
    pub center: DVec2,
    pub nodes: Vec<DVec2>,
    /// Index pairs `(a, b)` with `a < b`.
    pub edges: Vec<(usize, usize)>,
    pub core_radius: f64,
}

pub fn network(t: f64, size: Size, n: usize) -> Network {
    let center = size.center();
    let radius = size.min_side() * 0.32;
    let nodes: Vec<DVec2> = (0..n)
        .map(|i| center + DVec2::from_angle(i as f64 * TAU / n as f64 + t * 0.3) * radius)
        .collect();

    let threshold = radius * 1.1;
    let mut edges = Vec::new();
    for a in 0..nodes.len() {
        for b in a + 1..nodes.len() {
            if nodes[a].distance(nodes[b]) < threshold {
                edges.push((a, b));
            }
        }
    }

    Network {
        center,
        nodes,
        edges,
        core_radius: 10.0 + 4.0 * (t * 3.0).sin(),
    }
}

/// Element of the radial-particles pattern.
#[derive(Clone, Debug, PartialEq)]
pub struct Orbiter {
    pub angle: f64,
    pub speed: f64,
    pub base_radius: f64,
    pub base_size: f64,
    pub phase: f64,
}

impl Orbiter {
    fn random(rng: &mut impl Rng, i: usize, n: usize) -> Self {
        Self {
            angle: i as f64 * TAU / n as f64,
            speed: rng.gen_range(0.2..=0.6),
            base_radius: rng.gen_range(0.2..=0.45),
            base_size: rng.gen_range(1.5..=3.5),
            phase: rng.gen_range(0.0..TAU),
        }
    }

    /// Position and radius at time `t`. `base_radius` is a fraction of the
    /// surface's shorter side.
    pub fn place(&self, t: f64, size: Size) -> (DVec2, f64) {
        let radius = self.base_radius * size.min_side() + 12.0 * (t * 2.0 + self.phase).sin();
        let pos = size.center() + DVec2::from_angle(self.angle + t * self.speed) * radius;
        let dot = (self.base_size + 1.5 * (t * 3.0 + self.phase).sin()).max(0.5);
        (pos, dot)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Neuron {
    pub pos: DVec2,
    /// In [0, 1].
    pub activation: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Synapse {
    pub from: (usize, usize),
    pub to: (usize, usize),
    pub opacity: f64,
}

pub fn layered_network(t: f64, size: Size, layers: &[usize]) -> Vec<Vec<Neuron>> {
    let columns = layers.len() as f64 + 1.0;
    layers
        .iter()
        .enumerate()
        .map(|(l, &n)| {
            let x = size.width * (l as f64 + 1.0) / columns;
            (0..n)
                .map(|i| Neuron {
                    pos: DVec2::new(x, size.height * (i as f64 + 1.0) / (n as f64 + 1.0)),
                    activation: ((t * 2.0 + l as f64 * 0.8 + i as f64 * 0.5).sin() + 1.0) / 2.0,
                })
                .collect()
        })
        .collect()
}

/// Fully connected edges between consecutive layers.
pub fn synapses(neurons: &[Vec<Neuron>]) -> Vec<Synapse> {
    neurons
        .windows(2)
        .enumerate()
        .flat_map(|(l, pair)| {
            pair[0].iter().enumerate().flat_map(move |(i, a)| {
                pair[1].iter().enumerate().map(move |(j, b)| Synapse {
                    from: (l, i),
                    to: (l + 1, j),
                    opacity: 0.5 * (a.activation + b.activation) / 2.0,
                })
            })
        })
        .collect()
}

/// A pattern and the little state it carries between frames.
#[derive(Clone, Debug)]
pub struct PatternScene {
    kind: PatternKind,
    orbiters: Vec<Orbiter>,
}

impl PatternScene {
    pub fn new(kind: PatternKind, rng: &mut impl Rng) -> Self {
        let orbiters = match kind {
            PatternKind::RadialParticles => (0..ORBITERS)
                .map(|i| Orbiter::random(rng, i, ORBITERS))
                .collect(),
            _ => Vec::new(),
        };
        Self { kind, orbiters }
    }

    pub fn kind(&self) -> PatternKind {
        self.kind
    }

    pub fn orbiters(&self) -> &[Orbiter] {
        &self.orbiters
    }

    pub fn update(&mut self) {
        for o in &mut self.orbiters {
            o.phase = (o.phase + ORBIT_PHASE_STEP) % TAU;
        }
    }

    pub fn render<S: Surface>(&self, t: f64, surface: &mut S) {
        let size = surface.size();
        match self.kind {
            PatternKind::Default => {
                let center = size.center();
                for (i, r) in default_rings(t, size).into_iter().enumerate() {
                    surface.stroke_circle(center, r, 1.0, palette::CYAN.with_alpha(0.3 - i as f64 * 0.08));
                }
            }
            PatternKind::Hologram => render_hologram(&hologram(t, size), size, surface),
            PatternKind::Network => render_network(&network(t, size, NETWORK_NODES), surface),
            PatternKind::RadialParticles => {
                let max = size.min_side() / 2.0;
                surface.set_shadow(8.0, palette::MAGENTA);
                for o in &self.orbiters {
                    let (pos, dot) = o.place(t, size);
                    let falloff = ease_out_quad(1.0 - (pos.distance(size.center()) / max).min(1.0));
                    surface.fill_circle(pos, dot, palette::MAGENTA.with_alpha(0.3 + 0.6 * falloff));
                }
                surface.set_shadow(0.0, palette::MAGENTA);
            }
            PatternKind::LayeredNetwork => {
                let neurons = layered_network(t, size, &LAYERS);
                for s in synapses(&neurons) {
                    let a = neurons[s.from.0][s.from.1].pos;
                    let b = neurons[s.to.0][s.to.1].pos;
                    surface.stroke_line(a, b, 0.5, palette::VIOLET.with_alpha(s.opacity));
                }
                for n in neurons.iter().flatten() {
                    surface.fill_circle(n.pos, 3.0 + 3.0 * n.activation, palette::CYAN.with_alpha(0.4 + 0.6 * n.activation));
                }
            }
        }
    }
}

fn render_hologram<S: Surface>(h: &Hologram, size: Size, surface: &mut S) {
    surface.set_shadow(10.0, palette::CYAN);
    for (i, ring) in h.rings.iter().enumerate() {
        surface.stroke_polygon(&ring.corners(), 1.5, palette::CYAN.with_alpha(0.6 - i as f64 * 0.15));
    }
    surface.set_shadow(0.0, palette::CYAN);

    let fade = size.height * 0.15;
    for &y in &h.scan_lines {
        let edge = smoothstep(0.0, fade, y) * smoothstep(0.0, fade, size.height - y);
        surface.fill_rect(DVec2::new(0.0, y), Size::new(size.width, 1.0), palette::CYAN.with_alpha(0.08 * edge));
    }
}

fn render_network<S: Surface>(net: &Network, surface: &mut S) {
    for &(a, b) in &net.edges {
        surface.stroke_line(net.nodes[a], net.nodes[b], 1.0, palette::VIOLET.with_alpha(0.4));
    }
    surface.set_shadow(6.0, palette::CYAN);
    for &node in &net.nodes {
        surface.fill_circle(node, 4.0, palette::CYAN);
    }
    surface.set_shadow(16.0, palette::MAGENTA);
    surface.fill_circle(net.center, net.core_radius, palette::MAGENTA.with_alpha(0.8));
    surface.set_shadow(0.0, palette::MAGENTA);
}
