#![cfg(target_arch = "wasm32")]

use backdrop_wasm::{AppContext, Manifest, Recorder, Registry, Scene};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test(async)]
async fn canvas_has_2d_context() {
    let window = web_sys::window().unwrap();
    let document = window.document().unwrap();
    let canvas = document
        .create_element("canvas")
        .unwrap()
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .unwrap();
    canvas.set_width(320);
    canvas.set_height(200);

    let ctx = canvas.get_context("2d").unwrap();
    assert!(ctx.is_some());
}

#[wasm_bindgen_test]
fn reduced_motion_query_is_answerable() {
    let window = web_sys::window().unwrap();
    let query = window.match_media("(prefers-reduced-motion: reduce)").unwrap();
    assert!(query.is_some());
}

#[wasm_bindgen_test]
fn scenes_run_inside_the_browser() {
    let mut registry = Registry::new(AppContext::default());
    let kept = registry.load(&Manifest::default(), |entry, ctx| {
        Scene::new(entry, Some(Recorder::new(320.0, 200.0)), ctx)
    });
    assert_eq!(kept, 6);
    assert_eq!(registry.start_all(), 6);

    let hero = registry.get_mut("hero").unwrap();
    for _ in 0..60 {
        assert!(hero.frame(None));
    }
    let bounds = hero.bounds();
    assert!(hero.field().unwrap().particles().iter().all(|p| bounds.contains(p.pos)));
}
