use glam::{Vec2, Vec3};
use rustc_hash::{FxHashMap, FxHashSet};

use super::{AssetId, EntityDesc, EntityId, EntityTransform, LoadCompletion, Renderer};
use crate::camera::core::Camera;
use crate::geometry::Ray;

/// How the headless renderer maps between pixels and world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    /// Use the camera set by the viewer.
    Perspective,
    /// Orthographic view straight down -Y, centred on the world origin.
    /// Pixel offsets from the viewport centre map to world (x, z) divided by
    /// `pixels_per_unit`.
    TopDown {
        /// Screen scale.
        pixels_per_unit: f32,
        /// Height rays start from.
        height: f32,
    },
}

/// State of one entity in the headless scene.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessEntity {
    /// What was created.
    pub desc: EntityDesc,
    /// Last transform set.
    pub transform: EntityTransform,
    /// Visibility flag.
    pub enabled: bool,
}

/// In-memory [`Renderer`] with deterministic asset loading.
///
/// Loads stay pending until [`resolve_loads`](Self::resolve_loads) runs, so
/// callers can interleave input with in-flight loads.
#[derive(Debug)]
pub struct HeadlessRenderer {
    entities: FxHashMap<EntityId, HeadlessEntity>,
    next_entity: u64,
    next_asset: u64,
    camera: Camera,
    viewport: Vec2,
    projection: Projection,
    pending: Vec<LoadCompletion>,
    failing: FxHashSet<String>,
    loads_started: usize,
}

impl HeadlessRenderer {
    /// Renderer with a perspective projection over a `width` x `height`
    /// canvas.
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            entities: FxHashMap::default(),
            next_entity: 1,
            next_asset: 1,
            camera: Camera::default(),
            viewport: Vec2::new(width, height),
            projection: Projection::Perspective,
            pending: Vec::new(),
            failing: FxHashSet::default(),
            loads_started: 0,
        }
    }

    /// Switch the pixel/world mapping.
    #[must_use]
    pub fn with_projection(mut self, projection: Projection) -> Self {
        self.projection = projection;
        self
    }

    /// Make every future load of `url` fail.
    pub fn fail_url(&mut self, url: impl Into<String>) {
        let _ = self.failing.insert(url.into());
    }

    /// Complete every pending load, in request order. Returns how many
    /// were resolved.
    pub fn resolve_loads(&mut self) -> usize {
        let pending = std::mem::take(&mut self.pending);
        let count = pending.len();
        for completion in pending {
            if self.failing.contains(completion.url()) {
                let message = format!("asset not found: {}", completion.url());
                completion.complete(Err(message));
            } else {
                let asset = AssetId(self.next_asset);
                self.next_asset += 1;
                completion.complete(Ok(asset));
            }
        }
        count
    }

    /// Loads requested but not yet resolved.
    #[must_use]
    pub fn pending_loads(&self) -> usize {
        self.pending.len()
    }

    /// Loads requested since creation.
    #[must_use]
    pub fn loads_started(&self) -> usize {
        self.loads_started
    }

    /// Look up an entity.
    #[must_use]
    pub fn entity(&self, id: EntityId) -> Option<&HeadlessEntity> {
        self.entities.get(&id)
    }

    /// Number of live entities.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Last camera set by the viewer.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }
}

impl Renderer for HeadlessRenderer {
    fn create_entity(&mut self, desc: EntityDesc) -> EntityId {
        let id = EntityId(self.next_entity);
        self.next_entity += 1;
        let _ = self.entities.insert(
            id,
            HeadlessEntity {
                desc,
                transform: EntityTransform::default(),
                enabled: true,
            },
        );
        id
    }

    fn destroy_entity(&mut self, id: EntityId) {
        let _ = self.entities.remove(&id);
    }

    fn set_transform(&mut self, id: EntityId, transform: EntityTransform) {
        if let Some(entity) = self.entities.get_mut(&id) {
            entity.transform = transform;
        }
    }

    fn set_enabled(&mut self, id: EntityId, enabled: bool) {
        if let Some(entity) = self.entities.get_mut(&id) {
            entity.enabled = enabled;
        }
    }

    fn set_camera(&mut self, camera: &Camera) {
        self.camera = camera.clone();
    }

    fn viewport(&self) -> Vec2 {
        self.viewport
    }

    fn screen_to_world_ray(&self, x: f32, y: f32) -> Option<Ray> {
        match self.projection {
            Projection::Perspective => {
                self.camera.screen_to_world_ray(Vec2::new(x, y), self.viewport)
            }
            Projection::TopDown {
                pixels_per_unit,
                height,
            } => {
                if pixels_per_unit <= 0.0 {
                    return None;
                }
                let world = (Vec2::new(x, y) - self.viewport * 0.5) / pixels_per_unit;
                Some(Ray::new(Vec3::new(world.x, height, world.y), Vec3::NEG_Y))
            }
        }
    }

    fn world_to_screen(&self, point: Vec3) -> Option<Vec3> {
        match self.projection {
            Projection::Perspective => self.camera.world_to_screen(point, self.viewport),
            Projection::TopDown {
                pixels_per_unit,
                height,
            } => {
                let screen = Vec2::new(point.x, point.z) * pixels_per_unit + self.viewport * 0.5;
                Some(Vec3::new(screen.x, screen.y, height - point.y))
            }
        }
    }

    fn load_asset(&mut self, completion: LoadCompletion) {
        log::debug!("headless load queued: {}", completion.url());
        self.loads_started += 1;
        self.pending.push(completion);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use super::*;

    #[test]
    fn top_down_maps_pixels_to_ground() {
        let r = HeadlessRenderer::new(800.0, 600.0).with_projection(Projection::TopDown {
            pixels_per_unit: 100.0,
            height: 10.0,
        });
        let ray = r.screen_to_world_ray(500.0, 100.0).unwrap();
        assert_eq!(ray.origin, Vec3::new(1.0, 10.0, -2.0));
        let back = r.world_to_screen(Vec3::new(1.0, 0.0, -2.0)).unwrap();
        assert_eq!(back, Vec3::new(500.0, 100.0, 10.0));
    }

    #[test]
    fn loads_resolve_in_order_and_honour_failures() {
        let mut r = HeadlessRenderer::new(800.0, 600.0);
        r.fail_url("/missing.sog");
        let (tx, rx) = mpsc::channel();
        r.load_asset(LoadCompletion::new(1, "/a.sog", tx.clone()));
        r.load_asset(LoadCompletion::new(2, "/missing.sog", tx));
        assert_eq!(r.pending_loads(), 2);
        assert_eq!(r.resolve_loads(), 2);

        let first = rx.try_recv().unwrap();
        assert_eq!(first.request, 1);
        assert!(first.result.is_ok());
        let second = rx.try_recv().unwrap();
        assert_eq!(second.url, "/missing.sog");
        assert!(second.result.is_err());
    }

    #[test]
    fn destroyed_entities_ignore_updates() {
        let mut r = HeadlessRenderer::new(800.0, 600.0);
        let id = r.create_entity(EntityDesc::Splat { asset: AssetId(1) });
        r.destroy_entity(id);
        r.set_enabled(id, false);
        assert!(r.entity(id).is_none());
        assert_eq!(r.entity_count(), 0);
    }
}
