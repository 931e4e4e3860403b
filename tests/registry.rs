use std::cell::Cell;
use std::rc::Rc;

use backdrop_wasm::config::FieldOverrides;
use backdrop_wasm::surface::DrawOp;
use backdrop_wasm::{
    AppContext, Manifest, Recorder, Registry, Scene, SceneControl, SceneEntry, SceneError, SceneKind, Size, Viewport,
};

fn recorder() -> Option<Recorder> {
    Some(Recorder::new(640.0, 360.0))
}

fn loaded(ctx: AppContext) -> Registry<Scene<Recorder>> {
    let mut registry = Registry::new(ctx);
    registry.load(&Manifest::default(), |entry, ctx| Scene::new(entry, recorder(), ctx));
    registry
}

#[test]
fn scenes_without_surface_are_ignored() {
    let ctx = AppContext::default();
    let mut registry: Registry<Scene<Recorder>> = Registry::new(ctx.clone());

    let entry = SceneEntry::new("hero", "missing-canvas", SceneKind::Hero);
    let mut idle = Scene::new(&entry, None, &ctx);
    assert!(!idle.start());
    assert!(!idle.frame(None));
    idle.update(None);
    idle.render();
    assert_eq!(idle.time(), 0.0);

    assert!(!registry.register("hero", idle));
    assert!(registry.is_empty());

    assert!(registry.register("hero", Scene::new(&entry, recorder(), &ctx)));
    assert_eq!(registry.len(), 1);
}

/// Stands in for a scene driven by frame callbacks, which keeps running on
/// its own until `stop` is called.
struct Ticker {
    running: Rc<Cell<bool>>,
}

impl Ticker {
    fn new() -> (Self, Rc<Cell<bool>>) {
        let running = Rc::new(Cell::new(false));
        (Self { running: running.clone() }, running)
    }
}

impl SceneControl for Ticker {
    fn start(&mut self) -> bool {
        !self.running.replace(true)
    }
    fn stop(&mut self) {
        self.running.set(false);
    }
    fn resize(&mut self) {}
    fn is_running(&self) -> bool {
        self.running.get()
    }
    fn is_attached(&self) -> bool {
        true
    }
}

#[test]
fn replacing_a_scene_stops_the_old_one() {
    let mut registry = Registry::new(AppContext::default());
    let (first, first_running) = Ticker::new();
    assert!(registry.register("hero", first));
    assert_eq!(registry.start_all(), 1);
    assert!(first_running.get());

    let (second, second_running) = Ticker::new();
    assert!(registry.register("hero", second));
    assert!(!first_running.get());
    assert_eq!(registry.len(), 1);

    assert_eq!(registry.start_all(), 1);
    assert!(second_running.get());
    assert!(!first_running.get());
}

#[test]
fn load_keeps_only_attached_scenes() {
    let mut registry = Registry::new(AppContext::default());
    let kept = registry.load(&Manifest::default(), |entry, ctx| {
        let surface = (entry.kind != SceneKind::Network).then(|| Recorder::new(400.0, 300.0));
        Scene::new(entry, surface, ctx)
    });
    assert_eq!(kept, 5);
    assert!(registry.get("network").is_none());
    assert_eq!(
        registry.ids().collect::<Vec<_>>(),
        ["hero", "hologram", "loading", "neural", "orbit"]
    );
}

#[test]
fn broadcast_start_and_stop() {
    let mut registry = loaded(AppContext::default());
    assert_eq!(registry.len(), 6);

    assert_eq!(registry.start_all(), 6);
    assert_eq!(registry.start_all(), 0);
    assert!(registry.ids().all(|id| registry.get(id).unwrap().is_running()));

    registry.stop_all();
    assert!(registry.ids().all(|id| !registry.get(id).unwrap().is_running()));

    assert_eq!(registry.start_all(), 6);
}

#[test]
fn resize_all_picks_up_new_layout() {
    let mut registry = loaded(AppContext::default());
    registry
        .get_mut("hero")
        .and_then(Scene::surface_mut)
        .unwrap()
        .set_layout(1024.0, 768.0);

    registry.resize_all();
    assert_eq!(registry.get("hero").unwrap().bounds(), Size::new(1024.0, 768.0));
    assert_eq!(registry.get("neural").unwrap().bounds(), Size::new(640.0, 360.0));
}

#[test]
fn shrinking_the_canvas_pulls_particles_back_inside() {
    let mut registry = loaded(AppContext::default());
    registry.start_all();
    let hero = registry.get_mut("hero").unwrap();
    hero.surface_mut().unwrap().set_layout(100.0, 80.0);
    hero.resize();
    assert!(hero.frame(None));

    let bounds = hero.bounds();
    assert!(hero.field().unwrap().particles().iter().all(|p| bounds.contains(p.pos)));
}

#[test]
fn reduced_motion_creates_no_decorative_particles() {
    let ctx = AppContext::new(Viewport::default(), true, 9);
    let mut registry = loaded(ctx);

    for id in ["loading", "hero"] {
        let field = registry.get(id).unwrap().field().unwrap();
        assert!(field.particles().is_empty(), "{id} has particles");
        assert!(field.shapes().is_empty());
    }
    assert_eq!(registry.start_all(), 0);
    assert!(!registry.get("hologram").unwrap().is_running());
}

#[test]
fn frame_updates_then_renders() {
    let ctx = AppContext::default();
    let mut scene = Scene::new(&SceneEntry::new("neural", "c", SceneKind::LayeredNetwork), recorder(), &ctx);
    assert!(scene.surface().unwrap().ops().is_empty());

    scene.start();
    scene.frame(None);
    assert!(scene.time() > 0.0);
    let ops = scene.surface().unwrap().ops();
    assert_eq!(ops[0], DrawOp::Clear);
    assert_eq!(ops.iter().filter(|op| matches!(op, DrawOp::FillCircle { .. })).count(), 24);
}

#[test]
fn same_seed_same_scene() {
    let entry = SceneEntry::new("hero", "hero-canvas", SceneKind::Hero);
    let ctx = AppContext::default();
    let a = Scene::new(&entry, recorder(), &ctx);
    let b = Scene::new(&entry, recorder(), &ctx);
    assert_eq!(a.field().unwrap().particles(), b.field().unwrap().particles());

    let other = SceneEntry::new("loading", "hero-canvas", SceneKind::Hero);
    let c = Scene::new(&other, recorder(), &ctx);
    assert_ne!(a.field().unwrap().particles(), c.field().unwrap().particles());
}

#[test]
fn manifest_parses_kinds_and_overrides() {
    let manifest = Manifest::from_json(
        r#"{
            "scenes": [
                { "id": "hero", "canvas": "hero-canvas", "kind": "hero",
                  "field": { "particles": 5, "pointer_links": true, "interaction_radius": 150 } },
                { "id": "orbit", "canvas": "orbit-canvas", "kind": "radial-particles" }
            ]
        }"#,
    )
    .unwrap();

    assert_eq!(manifest.scenes.len(), 2);
    assert_eq!(manifest.scenes[1].kind, SceneKind::RadialParticles);
    assert_eq!(manifest.scenes[1].field, FieldOverrides::default());

    let scene = Scene::new(&manifest.scenes[0], recorder(), &AppContext::default());
    let field = scene.field().unwrap();
    assert_eq!(field.particles().len(), 5);
    assert!(field.params().pointer_links);
    assert_eq!(field.params().interaction_radius, 150.0);
    assert_eq!(field.params().connection_distance, 120.0);
}

#[test]
fn manifest_rejects_unknown_kind() {
    let err = Manifest::from_json(r#"{ "scenes": [ { "id": "x", "canvas": "x", "kind": "vortex" } ] }"#).unwrap_err();
    assert!(matches!(err, SceneError::Manifest(_)));
    assert!(err.to_string().starts_with("invalid scene manifest"));
}
