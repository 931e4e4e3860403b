//! Page bootstrap: reads the manifest, builds the scenes and wires the
//! window events that pause, resume and resize them.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use glam::DVec2;
use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{Document, ErrorEvent, HtmlCanvasElement, MouseEvent, PromiseRejectionEvent, Window};

use super::canvas::CanvasSurface;
use super::render::{Pointer, SceneLoop};
use crate::config::{AppContext, Manifest, SceneEntry, Viewport};
use crate::error::SceneError;
use crate::registry::Registry;
use crate::scene::Scene;

const MANIFEST_ID: &str = "scene-manifest";
const RESIZE_DEBOUNCE_MS: i32 = 150;

type Scenes = Rc<RefCell<Registry<SceneLoop>>>;

pub fn boot() -> Result<(), SceneError> {
    let window = web_sys::window().ok_or(SceneError::MissingWindow)?;
    let document = window.document().ok_or(SceneError::MissingWindow)?;

    listen_errors(&window)?;

    let ctx = context(&window);
    log::info!(
        "viewport {}x{}, reduced motion: {}",
        ctx.viewport.width,
        ctx.viewport.height,
        ctx.reduced_motion
    );

    let pointer: Pointer = Rc::new(Cell::new(None));
    let mut registry = Registry::new(ctx);
    registry.load(&manifest(&document), |entry, ctx| build(&document, entry, ctx, &pointer));
    registry.start_all();

    let scenes: Scenes = Rc::new(RefCell::new(registry));
    listen_pointer(&window, &document, pointer)?;
    listen_resize(&window, scenes.clone())?;
    listen_visibility(&document, scenes)?;
    Ok(())
}

fn context(window: &Window) -> AppContext {
    let dim = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| v.ok().and_then(|v| v.as_f64());
    let defaults = Viewport::default();
    let viewport = Viewport::new(
        dim(window.inner_width()).unwrap_or(defaults.width),
        dim(window.inner_height()).unwrap_or(defaults.height),
    );
    let reduced_motion = window
        .match_media("(prefers-reduced-motion: reduce)")
        .ok()
        .flatten()
        .is_some_and(|q| q.matches());
    let seed = (js_sys::Math::random() * u32::MAX as f64) as u64;
    AppContext::new(viewport, reduced_motion, seed)
}

fn manifest(document: &Document) -> Manifest {
    let Some(src) = document
        .get_element_by_id(MANIFEST_ID)
        .and_then(|el| el.text_content())
    else {
        return Manifest::default();
    };
    Manifest::from_json(&src).unwrap_or_else(|e| {
        log::warn!("{e}; using built-in scenes");
        Manifest::default()
    })
}

fn build(document: &Document, entry: &SceneEntry, ctx: &AppContext, pointer: &Pointer) -> SceneLoop {
    let canvas = document
        .get_element_by_id(&entry.canvas)
        .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok());

    let surface = match canvas.clone().map(CanvasSurface::new).transpose() {
        Ok(Some(surface)) => Some(surface),
        Ok(None) => {
            log::warn!("scene {}: {}", entry.id, SceneError::MissingElement(entry.canvas.clone()));
            None
        }
        Err(e) => {
            log::warn!("scene {}: {e}", entry.id);
            None
        }
    };

    let scene = SceneLoop::new(Scene::new(entry, surface, ctx), canvas, pointer.clone());
    if ctx.reduced_motion {
        scene.render_once();
    }
    scene
}

fn listen_pointer(window: &Window, document: &Document, pointer: Pointer) -> Result<(), SceneError> {
    let on_move = {
        let pointer = pointer.clone();
        Closure::wrap(Box::new(move |e: MouseEvent| {
            pointer.set(Some(DVec2::new(e.client_x() as f64, e.client_y() as f64)));
        }) as Box<dyn FnMut(MouseEvent)>)
    };
    window.add_event_listener_with_callback("mousemove", on_move.as_ref().unchecked_ref())?;
    on_move.forget();

    let on_leave = Closure::wrap(Box::new(move || pointer.set(None)) as Box<dyn FnMut()>);
    document.add_event_listener_with_callback("mouseleave", on_leave.as_ref().unchecked_ref())?;
    on_leave.forget();
    Ok(())
}

fn listen_resize(window: &Window, scenes: Scenes) -> Result<(), SceneError> {
    let fire = Closure::wrap(Box::new(move || scenes.borrow_mut().resize_all()) as Box<dyn FnMut()>);
    let timer: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));

    let on_resize = Closure::wrap(Box::new(move || {
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Some(id) = timer.take() {
            window.clear_timeout_with_handle(id);
        }
        match window.set_timeout_with_callback_and_timeout_and_arguments_0(
            fire.as_ref().unchecked_ref(),
            RESIZE_DEBOUNCE_MS,
        ) {
            Ok(id) => timer.set(Some(id)),
            Err(e) => log::error!("resize debounce: {e:?}"),
        }
    }) as Box<dyn FnMut()>);
    window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;
    on_resize.forget();
    Ok(())
}

fn listen_visibility(document: &Document, scenes: Scenes) -> Result<(), SceneError> {
    let doc = document.clone();
    let on_change = Closure::wrap(Box::new(move || {
        let mut scenes = scenes.borrow_mut();
        if doc.hidden() {
            scenes.stop_all();
        } else {
            scenes.start_all();
        }
    }) as Box<dyn FnMut()>);
    document.add_event_listener_with_callback("visibilitychange", on_change.as_ref().unchecked_ref())?;
    on_change.forget();
    Ok(())
}

/// Uncaught errors and rejected promises only reach the log.
fn listen_errors(window: &Window) -> Result<(), SceneError> {
    let on_error = Closure::wrap(Box::new(move |e: ErrorEvent| {
        log::error!("uncaught: {} ({}:{})", e.message(), e.filename(), e.lineno());
    }) as Box<dyn FnMut(ErrorEvent)>);
    window.add_event_listener_with_callback("error", on_error.as_ref().unchecked_ref())?;
    on_error.forget();

    let on_rejection = Closure::wrap(Box::new(move |e: PromiseRejectionEvent| {
        log::error!("unhandled rejection: {:?}", e.reason());
    }) as Box<dyn FnMut(PromiseRejectionEvent)>);
    window.add_event_listener_with_callback("unhandledrejection", on_rejection.as_ref().unchecked_ref())?;
    on_rejection.forget();
    Ok(())
}
