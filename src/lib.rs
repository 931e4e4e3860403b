//! Ambient canvas scenes for the marketing site: a particle field behind the
//! hero and loading screen plus a handful of time-driven patterns.
//!
//! Everything outside `wasm` is plain Rust and runs on the host; the `wasm`
//! module binds it to real canvases.

pub mod config;
pub mod error;
pub mod field;
pub mod math;
pub mod pattern;
pub mod registry;
pub mod scene;
pub mod surface;

pub use config::{AppContext, Manifest, SceneEntry, SceneKind, Viewport};
pub use error::SceneError;
pub use registry::{Registry, SceneControl};
pub use scene::Scene;
pub use surface::{Recorder, Size, Surface};

// Only compile wasm-specific code when targeting wasm32.

#[cfg(target_arch = "wasm32")]
mod wasm {
    use wasm_bindgen::prelude::*;

    mod app;
    mod canvas;
    mod render;

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).ok();

        app::boot()?;
        Ok(())
    }
}
