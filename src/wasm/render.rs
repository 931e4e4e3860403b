use std::cell::{Cell, RefCell};
use std::rc::Rc;

use glam::DVec2;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{window, HtmlCanvasElement};

use super::canvas::CanvasSurface;
use crate::registry::SceneControl;
use crate::scene::Scene;

/// Last known pointer position in client coordinates.
pub type Pointer = Rc<Cell<Option<DVec2>>>;

type FrameCallback = Closure<dyn FnMut()>;

/// Drives one scene from `requestAnimationFrame`.
pub struct SceneLoop {
    scene: Rc<RefCell<Scene<CanvasSurface>>>,
    canvas: Option<HtmlCanvasElement>,
    pointer: Pointer,
    // `callback` holds the animation-frame closure so that it can keep calling
    // `request_animation_frame` on itself. Storing it inside an `Option`
    // allows us to create the `Closure` first and then obtain a reference to
    // it from within itself.
    callback: Rc<RefCell<Option<FrameCallback>>>,
    pending: Rc<Cell<Option<i32>>>,
}

fn request_frame(callback: &FrameCallback) -> Result<i32, JsValue> {
    window()
        .ok_or("no window")?
        .request_animation_frame(callback.as_ref().unchecked_ref())
}

impl SceneLoop {
    pub fn new(scene: Scene<CanvasSurface>, canvas: Option<HtmlCanvasElement>, pointer: Pointer) -> Self {
        Self {
            scene: Rc::new(RefCell::new(scene)),
            canvas,
            pointer,
            callback: Rc::new(RefCell::new(None)),
            pending: Rc::new(Cell::new(None)),
        }
    }

    /// Paint the current state once without starting the loop.
    pub fn render_once(&self) {
        self.scene.borrow_mut().render();
    }

    fn ensure_callback(&self) {
        if self.callback.borrow().is_some() {
            return;
        }

        let scene = self.scene.clone();
        let canvas = self.canvas.clone();
        let pointer = self.pointer.clone();
        let pending = self.pending.clone();
        let this = self.callback.clone();

        *self.callback.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            pending.set(None);

            let local = pointer.get().zip(canvas.as_ref()).map(|(p, canvas)| {
                let rect = canvas.get_bounding_client_rect();
                p - DVec2::new(rect.left(), rect.top())
            });

            // A callback dispatched before `stop` lands here and returns early.
            if !scene.borrow_mut().frame(local) {
                return;
            }

            // schedule next
            if let Some(callback) = this.borrow().as_ref() {
                match request_frame(callback) {
                    Ok(id) => pending.set(Some(id)),
                    Err(e) => log::error!("requestAnimationFrame failed: {e:?}"),
                }
            }
        }) as Box<dyn FnMut()>));
    }

    fn arm(&self) -> Result<(), JsValue> {
        self.ensure_callback();
        if let Some(callback) = self.callback.borrow().as_ref() {
            self.pending.set(Some(request_frame(callback)?));
        }
        Ok(())
    }
}

impl SceneControl for SceneLoop {
    fn start(&mut self) -> bool {
        if !self.scene.borrow_mut().start() {
            return false;
        }
        if let Err(e) = self.arm() {
            log::error!("scene {}: could not schedule frame: {e:?}", self.scene.borrow().id());
            self.scene.borrow_mut().stop();
            return false;
        }
        true
    }

    fn stop(&mut self) {
        self.scene.borrow_mut().stop();
        if let (Some(id), Some(window)) = (self.pending.take(), window()) {
            window.cancel_animation_frame(id).ok();
        }
    }

    fn resize(&mut self) {
        let mut scene = self.scene.borrow_mut();
        scene.resize();
        // Resizing clears the canvas; paused scenes repaint their last state.
        if !scene.is_running() {
            scene.render();
        }
    }

    fn is_running(&self) -> bool {
        self.scene.borrow().is_running()
    }

    fn is_attached(&self) -> bool {
        self.scene.borrow().surface().is_some()
    }
}
