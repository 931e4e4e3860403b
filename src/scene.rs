//! A scene: one canvas, its entities and its clock.
//!
//! The scene itself does not schedule anything. Whoever owns it calls
//! [`Scene::frame`] once per display refresh while it reports running; the
//! flag check at the top of `frame` makes a callback that was already in
//! flight when [`Scene::stop`] ran a no-op.

use glam::DVec2;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::config::{AppContext, SceneEntry, SceneKind};
use crate::field::{FieldParams, ParticleField};
use crate::pattern::PatternScene;
use crate::registry::SceneControl;
use crate::surface::{Size, Surface};

/// Local clock advance per frame.
pub const TIME_STEP: f64 = 0.016;

#[derive(Clone, Debug)]
pub enum Animation {
    Field(ParticleField),
    Pattern(PatternScene),
}

impl Animation {
    fn update(&mut self, pointer: Option<DVec2>, bounds: Size) {
        match self {
            Animation::Field(field) => field.update(pointer, bounds),
            Animation::Pattern(pattern) => pattern.update(),
        }
    }

    fn render<S: Surface>(&self, t: f64, surface: &mut S) {
        match self {
            Animation::Field(field) => field.render(surface),
            Animation::Pattern(pattern) => pattern.render(t, surface),
        }
    }
}

pub struct Scene<S> {
    id: String,
    surface: Option<S>,
    running: bool,
    time: f64,
    bounds: Size,
    animation: Animation,
}

impl<S: Surface> Scene<S> {
    /// Build the scene described by `entry`. A missing surface yields an idle
    /// scene rather than an error.
    pub fn new(entry: &SceneEntry, mut surface: Option<S>, ctx: &AppContext) -> Self {
        let bounds = surface.as_mut().map(|s| s.resize()).unwrap_or_default();
        let mut rng = SmallRng::seed_from_u64(ctx.seed_for(&entry.id));

        let animation = match entry.kind.pattern() {
            Some(kind) => Animation::Pattern(PatternScene::new(kind, &mut rng)),
            None => {
                let preset = match entry.kind {
                    SceneKind::Loading => FieldParams::loading(ctx),
                    _ => FieldParams::hero(ctx),
                };
                let params = preset.with_overrides(&entry.field).respecting_motion(ctx);
                Animation::Field(ParticleField::new(params, bounds, &mut rng))
            }
        };

        Self::with_animation(&entry.id, surface, animation)
    }

    pub fn with_animation(id: &str, surface: Option<S>, animation: Animation) -> Self {
        let bounds = surface.as_ref().map(|s| s.size()).unwrap_or_default();
        Self {
            id: id.to_owned(),
            surface,
            running: false,
            time: 0.0,
            bounds,
            animation,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn bounds(&self) -> Size {
        self.bounds
    }

    pub fn animation(&self) -> &Animation {
        &self.animation
    }

    pub fn field(&self) -> Option<&ParticleField> {
        match &self.animation {
            Animation::Field(field) => Some(field),
            Animation::Pattern(_) => None,
        }
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Stopped -> Running. Returns `false` if already running or idle, in
    /// which case the caller must not arm another callback chain.
    pub fn start(&mut self) -> bool {
        if self.running || self.surface.is_none() {
            return false;
        }
        self.running = true;
        log::debug!("scene {}: start", self.id);
        true
    }

    pub fn stop(&mut self) {
        if self.running {
            self.running = false;
            log::debug!("scene {}: stop", self.id);
        }
    }

    /// Body of one frame callback. Returns whether another frame should be
    /// requested.
    pub fn frame(&mut self, pointer: Option<DVec2>) -> bool {
        if !self.running {
            return false;
        }
        self.update(pointer);
        self.render();
        true
    }

    pub fn update(&mut self, pointer: Option<DVec2>) {
        if self.surface.is_none() {
            return;
        }
        self.time += TIME_STEP;
        self.animation.update(pointer, self.bounds);
    }

    pub fn render(&mut self) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        surface.clear();
        surface.set_alpha(1.0);
        self.animation.render(self.time, surface);
    }

    /// Recompute the surface resolution from its current layout bounds.
    pub fn resize(&mut self) {
        if let Some(surface) = self.surface.as_mut() {
            self.bounds = surface.resize();
            log::debug!(
                "scene {}: resized to {}x{}",
                self.id,
                self.bounds.width,
                self.bounds.height
            );
        }
    }
}

impl<S: Surface> SceneControl for Scene<S> {
    fn start(&mut self) -> bool {
        Scene::start(self)
    }

    fn stop(&mut self) {
        Scene::stop(self)
    }

    fn resize(&mut self) {
        Scene::resize(self)
    }

    fn is_running(&self) -> bool {
        Scene::is_running(self)
    }

    fn is_attached(&self) -> bool {
        self.surface.is_some()
    }
}
