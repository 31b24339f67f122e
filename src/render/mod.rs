//! The renderer this crate drives, seen as an opaque collaborator.
//!
//! The host's 3D engine implements [`Renderer`]: it owns the scene graph
//! and the asset pipeline, and the viewer only holds [`EntityId`] handles.
//! Asset loads are asynchronous; the renderer reports back through a
//! [`LoadCompletion`] which the session drains on its next tick.

mod headless;

use std::sync::mpsc;

use glam::{Quat, Vec2, Vec3};
pub use headless::{HeadlessEntity, HeadlessRenderer, Projection};

use crate::camera::core::Camera;
use crate::geometry::Ray;

/// Handle to a scene entity owned by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u64);

/// Handle to a loaded asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AssetId(pub u64);

/// RGB colour, components in `[0, 1]`.
pub type Rgb = [f32; 3];

/// What an entity draws.
#[derive(Debug, Clone, PartialEq)]
pub enum EntityDesc {
    /// Solid box centred on the entity origin.
    Box {
        /// Half size along each axis before scaling.
        half_extents: Vec3,
        /// Diffuse colour.
        color: Rgb,
    },
    /// Flat translucent rectangle in the entity's XZ plane.
    Plane {
        /// Extent along local X.
        width: f32,
        /// Extent along local Z.
        length: f32,
        /// Diffuse colour.
        color: Rgb,
        /// Alpha in `[0, 1]`.
        opacity: f32,
    },
    /// Edges of an axis-aligned box, centred on the entity origin.
    WireBox {
        /// Half size along each axis.
        half_extents: Vec3,
        /// Line colour.
        color: Rgb,
    },
    /// Instance of a loaded splat asset.
    Splat {
        /// The loaded asset.
        asset: AssetId,
    },
}

/// Entity placement in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntityTransform {
    /// Translation.
    pub position: Vec3,
    /// Orientation.
    pub rotation: Quat,
    /// Per-axis scale.
    pub scale: Vec3,
}

impl Default for EntityTransform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl EntityTransform {
    /// Identity transform moved to `position`.
    #[must_use]
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }
}

/// Result of one asset load, delivered through the session's channel.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadOutcome {
    /// Caller-chosen request tag.
    pub request: u64,
    /// URL that was requested.
    pub url: String,
    /// Loaded asset, or the loader's error message.
    pub result: Result<AssetId, String>,
}

/// One-shot callback for an asynchronous asset load.
///
/// Dropping it without calling [`complete`](Self::complete) leaves the load
/// pending forever, which the viewer tolerates.
#[derive(Debug)]
pub struct LoadCompletion {
    request: u64,
    url: String,
    tx: mpsc::Sender<LoadOutcome>,
}

impl LoadCompletion {
    /// Completion for request `request` of `url`, reporting on `tx`.
    #[must_use]
    pub fn new(request: u64, url: impl Into<String>, tx: mpsc::Sender<LoadOutcome>) -> Self {
        Self {
            request,
            url: url.into(),
            tx,
        }
    }

    /// URL being loaded.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Report the result. A closed channel (session destroyed) is ignored.
    pub fn complete(self, result: Result<AssetId, String>) {
        let _ = self.tx.send(LoadOutcome {
            request: self.request,
            url: self.url,
            result,
        });
    }
}

/// Scene-graph, camera, and asset services the viewer needs from the host
/// engine.
pub trait Renderer {
    /// Create an entity, enabled, at the identity transform.
    fn create_entity(&mut self, desc: EntityDesc) -> EntityId;

    /// Release an entity. Unknown ids are ignored.
    fn destroy_entity(&mut self, id: EntityId);

    /// Move an entity.
    fn set_transform(&mut self, id: EntityId, transform: EntityTransform);

    /// Show or hide an entity.
    fn set_enabled(&mut self, id: EntityId, enabled: bool);

    /// Camera used for drawing and for the ray/projection queries below.
    fn set_camera(&mut self, camera: &Camera);

    /// Canvas size in pixels.
    fn viewport(&self) -> Vec2;

    /// World ray through the canvas pixel `(x, y)`.
    fn screen_to_world_ray(&self, x: f32, y: f32) -> Option<Ray>;

    /// Project a world point to canvas pixels; `z` is depth in front of the
    /// camera.
    fn world_to_screen(&self, point: Vec3) -> Option<Vec3>;

    /// Start loading `completion.url()`; report through `completion`.
    fn load_asset(&mut self, completion: LoadCompletion);
}
