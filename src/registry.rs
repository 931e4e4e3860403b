//! Id -> scene mapping used to pause, resume and resize every scene at once.

use std::collections::BTreeMap;

use crate::config::{AppContext, Manifest, SceneEntry};

/// What the registry needs from a scene, whether it is driven by hand or by
/// the browser's frame callbacks.
pub trait SceneControl {
    /// Returns `true` when the scene went from stopped to running.
    fn start(&mut self) -> bool;
    fn stop(&mut self);
    fn resize(&mut self);
    fn is_running(&self) -> bool;
    /// Whether the scene has a drawing surface at all.
    fn is_attached(&self) -> bool;
}

pub struct Registry<C> {
    ctx: AppContext,
    scenes: BTreeMap<String, C>,
}

impl<C: SceneControl> Registry<C> {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            scenes: BTreeMap::new(),
        }
    }

    /// Adds `scene` under `id`. A previous entry with the same id is stopped
    /// before it is dropped. Scenes without a surface are dropped and `false`
    /// is returned.
    pub fn register(&mut self, id: impl Into<String>, scene: C) -> bool {
        let id = id.into();
        if !scene.is_attached() {
            log::debug!("scene {id}: no surface, not registered");
            return false;
        }
        if let Some(mut old) = self.scenes.insert(id.clone(), scene) {
            old.stop();
            log::debug!("scene {id}: replaced");
        }
        true
    }

    /// Builds and registers every manifest entry; returns how many were kept.
    pub fn load(&mut self, manifest: &Manifest, mut build: impl FnMut(&SceneEntry, &AppContext) -> C) -> usize {
        let mut kept = 0;
        for entry in &manifest.scenes {
            let scene = build(entry, &self.ctx);
            if self.register(entry.id.clone(), scene) {
                kept += 1;
            }
        }
        log::info!("registered {kept} of {} scenes", manifest.scenes.len());
        kept
    }

    /// Starts every scene unless the user prefers reduced motion. Returns the
    /// number of scenes that were actually started.
    pub fn start_all(&mut self) -> usize {
        if self.ctx.reduced_motion {
            log::debug!("reduced motion: scenes stay paused");
            return 0;
        }
        let mut started = 0;
        for scene in self.scenes.values_mut() {
            if scene.start() {
                started += 1;
            }
        }
        started
    }

    pub fn stop_all(&mut self) {
        for scene in self.scenes.values_mut() {
            scene.stop();
        }
    }

    pub fn resize_all(&mut self) {
        for scene in self.scenes.values_mut() {
            scene.resize();
        }
    }

    pub fn get(&self, id: &str) -> Option<&C> {
        self.scenes.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut C> {
        self.scenes.get_mut(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.scenes.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }
}
