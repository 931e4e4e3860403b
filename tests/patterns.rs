use std::f64::consts::TAU;

use backdrop_wasm::pattern::{
    default_rings, hologram, layered_network, network, synapses, PatternKind, PatternScene, LAYERS, NETWORK_NODES, ORBITERS,
};
use backdrop_wasm::scene::Animation;
use backdrop_wasm::surface::DrawOp;
use backdrop_wasm::{AppContext, Recorder, Scene, SceneEntry, SceneKind, Size};
use rand::rngs::SmallRng;
use rand::SeedableRng;

const SIZE: Size = Size::new(600.0, 400.0);

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn hologram_is_a_function_of_time() {
    assert_eq!(hologram(1.3, SIZE), hologram(1.3, SIZE));
    assert_ne!(hologram(1.3, SIZE), hologram(1.4, SIZE));

    let h = hologram(0.0, SIZE);
    assert!(approx(h.rings[1].rotation - h.rings[0].rotation, TAU / 3.0));
    assert!(approx(h.rings[2].rotation - h.rings[0].rotation, 2.0 * TAU / 3.0));
    assert!(h.rings.windows(2).all(|w| w[0].half_size > w[1].half_size));
    for ring in &h.rings {
        for c in ring.corners() {
            assert!(approx(c.distance(ring.center), ring.half_size * std::f64::consts::SQRT_2));
        }
    }
}

#[test]
fn scan_lines_scroll_and_stay_on_canvas() {
    let a = hologram(0.0, SIZE);
    let b = hologram(0.1, SIZE);
    assert!(a.scan_lines.iter().all(|y| (0.0..=SIZE.height).contains(y)));
    assert!(b.scan_lines.iter().all(|y| (0.0..=SIZE.height).contains(y)));
    assert!(approx(a.scan_lines[0], 0.0));
    assert!(approx(b.scan_lines[0], 2.0));
}

#[test]
fn layered_network_is_pure_and_shaped_by_layers() {
    let first = layered_network(2.5, SIZE, &LAYERS);
    let second = layered_network(2.5, SIZE, &LAYERS);
    assert_eq!(first, second);

    let counts: Vec<usize> = first.iter().map(Vec::len).collect();
    assert_eq!(counts, [6, 8, 6, 4]);
    for layer in &first {
        let x = layer[0].pos.x;
        assert!(layer.iter().all(|n| n.pos.x == x));
        assert!(layer.iter().all(|n| (0.0..=1.0).contains(&n.activation)));
    }
    assert!(approx(first[0][0].pos.x, SIZE.width / 5.0));
    assert!(approx(first[1][0].pos.y, SIZE.height / 9.0));
}

#[test]
fn synapse_opacity_tracks_endpoint_activation() {
    let neurons = layered_network(0.7, SIZE, &LAYERS);
    let edges = synapses(&neurons);
    assert_eq!(edges.len(), 6 * 8 + 8 * 6 + 6 * 4);
    for s in &edges {
        assert_eq!(s.to.0, s.from.0 + 1);
        let a = neurons[s.from.0][s.from.1].activation;
        let b = neurons[s.to.0][s.to.1].activation;
        assert!(approx(s.opacity, 0.5 * (a + b) / 2.0));
    }
}

#[test]
fn network_links_ring_neighbours() {
    let net = network(0.9, SIZE, NETWORK_NODES);
    assert_eq!(net.nodes.len(), 8);
    let radius = SIZE.min_side() * 0.32;
    assert!(net.nodes.iter().all(|n| approx(n.distance(net.center), radius)));
    // Adjacent nodes are 0.77r apart, next-but-one 1.41r: only the ring survives.
    assert_eq!(net.edges.len(), 8);
    assert!((6.0..=14.0).contains(&net.core_radius));
}

#[test]
fn default_rings_breathe_within_bounds() {
    for step in 0..100 {
        let rings = default_rings(step as f64 * 0.1, SIZE);
        assert!(rings.windows(2).all(|w| w[0] < w[1]));
        assert!(rings[2] <= SIZE.min_side() * 0.45 + 1e-9);
    }
}

#[test]
fn radial_pattern_advances_only_orbiter_phase() {
    let mut rng = SmallRng::seed_from_u64(2);
    let mut scene = PatternScene::new(PatternKind::RadialParticles, &mut rng);
    assert_eq!(scene.orbiters().len(), ORBITERS);

    let before = scene.orbiters().to_vec();
    scene.update();
    for (a, b) in before.iter().zip(scene.orbiters()) {
        assert_eq!((a.angle, a.speed, a.base_radius), (b.angle, b.speed, b.base_radius));
        assert!(approx(b.phase, (a.phase + 0.02) % TAU));
    }

    let o = &scene.orbiters()[0];
    assert_eq!(o.place(1.0, SIZE), o.place(1.0, SIZE));

    let plain = PatternScene::new(PatternKind::Hologram, &mut rng);
    assert!(plain.orbiters().is_empty());
}

#[test]
fn rendering_twice_at_the_same_time_is_identical() {
    let ctx = AppContext::default();
    for kind in [
        SceneKind::Default,
        SceneKind::Hologram,
        SceneKind::Network,
        SceneKind::RadialParticles,
        SceneKind::LayeredNetwork,
    ] {
        let entry = SceneEntry::new("pattern", "c", kind);
        let mut scene = Scene::new(&entry, Some(Recorder::new(SIZE.width, SIZE.height)), &ctx);
        assert!(matches!(scene.animation(), Animation::Pattern(p) if Some(p.kind()) == kind.pattern()));

        scene.update(None);
        scene.render();
        let first = scene.surface().unwrap().ops().to_vec();
        scene.render();
        assert_eq!(first, scene.surface().unwrap().ops(), "{kind:?}");
        assert!(first.len() > 2);
    }
}

#[test]
fn hologram_scene_draws_three_rings() {
    let mut rng = SmallRng::seed_from_u64(0);
    let mut scene = Scene::with_animation(
        "holo",
        Some(Recorder::new(SIZE.width, SIZE.height)),
        Animation::Pattern(PatternScene::new(PatternKind::Hologram, &mut rng)),
    );
    scene.render();
    let surface = scene.surface().unwrap();
    assert_eq!(surface.count(|op| matches!(op, DrawOp::Polygon { points, .. } if points.len() == 4)), 3);
    assert!(surface.count(|op| matches!(op, DrawOp::FillRect { .. })) > 0);
}
