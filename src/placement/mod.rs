//! Placeholder placement on a constrained ground plane.
//!
//! The [`PlacementSystem`] owns the registry of placed markers, the
//! placement plane, and the transient interaction state (one-shot placement
//! mode, the current drag, the selection). Screen points become plane
//! positions by unprojecting through the renderer, intersecting the plane's
//! height, and clamping into its rotated rectangle, so every placeholder
//! always sits inside the plane footprint.

/// Placeholder type catalogue.
pub mod kinds;
/// The placement plane and its partial updates.
pub mod plane;
/// Id-keyed, insertion-ordered placeholder storage.
pub mod registry;

use glam::Vec3;
pub use kinds::PlaceholderKind;
pub use plane::{PlacementPlane, PlaneUpdate};
pub use registry::{PlaceholderId, PlaceholderRecord, PlaceholderRegistry};

use crate::geometry::PanBounds;
use crate::options::PlacementOptions;
use crate::render::{EntityId, Renderer};
use crate::util::numeric::finite_vec3_or;

/// Ground-plane radius within which a click picks a placeholder.
pub const PICK_RADIUS: f32 = 0.6;
/// Smallest allowed scale on any axis.
pub const MIN_SCALE: f32 = 0.01;
/// Largest allowed scale on any axis.
pub const MAX_SCALE: f32 = 10.0;

/// Armed placement: the next qualifying pointer-down spawns this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementMode {
    /// Catalogue type to spawn.
    pub type_id: String,
    /// Label for the spawned placeholder.
    pub display_name: String,
}

/// Placement mode, drag, selection and the placeholder registry.
///
/// Placement mode and an active drag never coexist: entering placement
/// mode is refused while dragging and a drag cannot start while placement
/// mode is armed.
#[derive(Debug)]
pub struct PlacementSystem {
    registry: PlaceholderRegistry,
    plane: PlacementPlane,
    plane_entity: Option<EntityId>,
    mode: Option<PlacementMode>,
    drag: Option<PlaceholderId>,
    selected: Option<PlaceholderId>,
}

impl PlacementSystem {
    /// Create the system with its plane centred over `bounds`, or over the
    /// default bounds when no camera bounds are available.
    #[must_use]
    pub fn new(options: &PlacementOptions, bounds: Option<PanBounds>) -> Self {
        let bounds = bounds.unwrap_or_default();
        Self {
            registry: PlaceholderRegistry::new(),
            plane: PlacementPlane::new(options, &bounds),
            plane_entity: None,
            mode: None,
            drag: None,
            selected: None,
        }
    }

    /// Create the plane visual.
    pub fn attach<R: Renderer + ?Sized>(&mut self, renderer: &mut R) {
        if self.plane_entity.is_some() {
            return;
        }
        let entity = renderer.create_entity(PlacementPlane::entity_desc());
        renderer.set_transform(entity, self.plane.entity_transform());
        renderer.set_enabled(entity, self.plane.visible);
        self.plane_entity = Some(entity);
    }

    /// Release the plane visual and every placeholder entity.
    pub fn destroy<R: Renderer + ?Sized>(&mut self, renderer: &mut R) {
        for entity in self.registry.drain() {
            renderer.destroy_entity(entity);
        }
        if let Some(entity) = self.plane_entity.take() {
            renderer.destroy_entity(entity);
        }
        self.mode = None;
        self.drag = None;
        self.selected = None;
    }

    // ── Placement mode ───────────────────────────────────────────────────

    /// Arm placement of `type_id`. Refused while a drag is active.
    pub fn enter_placement_mode(&mut self, type_id: &str, display_name: &str) -> bool {
        if self.drag.is_some() {
            log::debug!("placement mode for '{type_id}' refused: drag in progress");
            return false;
        }
        self.mode = Some(PlacementMode {
            type_id: type_id.to_owned(),
            display_name: display_name.to_owned(),
        });
        true
    }

    /// Disarm placement. Returns whether it was armed.
    pub fn cancel_placement_mode(&mut self) -> bool {
        self.mode.take().is_some()
    }

    /// Armed placement, if any.
    #[must_use]
    pub fn placement_mode(&self) -> Option<&PlacementMode> {
        self.mode.as_ref()
    }

    // ── Registry reads ───────────────────────────────────────────────────

    /// All placeholders in insertion order.
    pub fn placeholders(&self) -> impl Iterator<Item = &PlaceholderRecord> + '_ {
        self.registry.iter()
    }

    /// One placeholder.
    #[must_use]
    pub fn placeholder(&self, id: PlaceholderId) -> Option<&PlaceholderRecord> {
        self.registry.get(id)
    }

    /// The registry.
    #[must_use]
    pub fn registry(&self) -> &PlaceholderRegistry {
        &self.registry
    }

    // ── Screen-space operations ──────────────────────────────────────────

    /// Spawn the armed type where the screen point meets the plane.
    ///
    /// The new placeholder is selected and placement mode is cleared. Does
    /// nothing if no mode is armed or the ray misses the plane.
    pub fn place_at<R: Renderer + ?Sized>(
        &mut self,
        renderer: &mut R,
        x: f32,
        y: f32,
    ) -> Option<PlaceholderId> {
        let mode = self.mode.as_ref()?;
        let ray = renderer.screen_to_world_ray(x, y)?;
        let ground = self.plane.project(&ray)?;

        let kind = PlaceholderKind::for_type(&mode.type_id);
        let id = self.registry.allocate_id();
        let record = PlaceholderRecord {
            id,
            type_id: mode.type_id.clone(),
            display_name: mode.display_name.clone(),
            position: Vec3::new(ground.x, self.plane.y + kind.y_offset, ground.z),
            yaw_degrees: 0.0,
            scale: kind.default_scale(),
            y_offset: kind.y_offset,
        };
        let entity = renderer.create_entity(registry::entity_desc(&kind));
        renderer.set_transform(entity, record.entity_transform());
        log::info!("placed {id} ({}) at {:?}", record.type_id, record.position);

        self.registry.insert(record, entity);
        self.mode = None;
        self.selected = Some(id);
        Some(id)
    }

    /// Nearest placeholder within [`PICK_RADIUS`] of where the screen point
    /// meets the plane. Equal distances resolve to the earliest placed.
    pub fn pick_at<R: Renderer + ?Sized>(&self, renderer: &R, x: f32, y: f32) -> Option<PlaceholderId> {
        let ray = renderer.screen_to_world_ray(x, y)?;
        let hit = self.plane.intersect(&ray)?;

        let mut best: Option<(PlaceholderId, f32)> = None;
        for record in self.registry.iter() {
            let d = (record.position.x - hit.x).hypot(record.position.z - hit.z);
            if d >= PICK_RADIUS {
                continue;
            }
            if best.is_none_or(|(_, best_d)| d < best_d) {
                best = Some((record.id, d));
            }
        }
        best.map(|(id, _)| id)
    }

    // ── Drag ─────────────────────────────────────────────────────────────

    /// Start dragging `id`. Refused while placement mode is armed or for an
    /// unknown id.
    pub fn begin_drag(&mut self, id: PlaceholderId) -> bool {
        if self.mode.is_some() || self.registry.get(id).is_none() {
            return false;
        }
        self.drag = Some(id);
        true
    }

    /// Move the dragged placeholder to where the screen point meets the
    /// plane. Height, yaw and scale are untouched. Returns whether it
    /// moved.
    pub fn update_drag<R: Renderer + ?Sized>(&mut self, renderer: &mut R, x: f32, y: f32) -> bool {
        let Some(id) = self.drag else {
            return false;
        };
        let Some(ground) = renderer
            .screen_to_world_ray(x, y)
            .and_then(|ray| self.plane.project(&ray))
        else {
            return false;
        };
        let plane_y = self.plane.y;
        let updated = self.registry.update(id, |record| {
            record.position = Vec3::new(ground.x, plane_y + record.y_offset, ground.z);
        });
        if let Some((entity, transform)) = updated {
            renderer.set_transform(entity, transform);
            true
        } else {
            // Deleted mid-drag.
            self.drag = None;
            false
        }
    }

    /// Finish the drag, returning the placeholder that was dragged.
    pub fn end_drag(&mut self) -> Option<PlaceholderId> {
        self.drag.take()
    }

    /// Placeholder being dragged.
    #[must_use]
    pub fn dragging(&self) -> Option<PlaceholderId> {
        self.drag
    }

    // ── Pointer arbitration ──────────────────────────────────────────────

    /// Primary pointer press. Spawns when placement mode is armed,
    /// otherwise picks, selects and starts dragging. A press that hits no
    /// placeholder clears the selection and is left for the camera.
    /// Returns whether the event was claimed.
    pub fn pointer_down<R: Renderer + ?Sized>(&mut self, renderer: &mut R, x: f32, y: f32) -> bool {
        if self.mode.is_some() {
            // Claimed even on a miss so the click never orbits the camera.
            let _ = self.place_at(renderer, x, y);
            return true;
        }
        match self.pick_at(renderer, x, y) {
            Some(id) => {
                self.selected = Some(id);
                self.begin_drag(id)
            }
            None => {
                self.selected = None;
                false
            }
        }
    }

    /// Pointer motion. Claimed while a drag is active.
    pub fn pointer_move<R: Renderer + ?Sized>(&mut self, renderer: &mut R, x: f32, y: f32) -> bool {
        if self.drag.is_none() {
            return false;
        }
        let _ = self.update_drag(renderer, x, y);
        true
    }

    /// Pointer release. Claimed if it ended a drag.
    pub fn pointer_up(&mut self) -> bool {
        self.end_drag().is_some()
    }

    // ── Selection ────────────────────────────────────────────────────────

    /// Select a placeholder, or clear the selection with `None`. Unknown
    /// ids are ignored. Never affects placement mode. Returns whether the
    /// selection changed.
    pub fn select(&mut self, id: Option<PlaceholderId>) -> bool {
        if id.is_some_and(|id| self.registry.get(id).is_none()) {
            return false;
        }
        let changed = self.selected != id;
        self.selected = id;
        changed
    }

    /// Selected placeholder id.
    #[must_use]
    pub fn selected_id(&self) -> Option<PlaceholderId> {
        self.selected
    }

    /// Selected placeholder.
    #[must_use]
    pub fn selected(&self) -> Option<&PlaceholderRecord> {
        self.selected.and_then(|id| self.registry.get(id))
    }

    /// Yaw of the selection in degrees; 0 when nothing is selected.
    #[must_use]
    pub fn selected_yaw(&self) -> f32 {
        self.selected().map_or(0.0, |record| record.yaw_degrees)
    }

    /// Scale of the selection; one when nothing is selected.
    #[must_use]
    pub fn selected_scale(&self) -> Vec3 {
        self.selected().map_or(Vec3::ONE, |record| record.scale)
    }

    /// Set the selection's yaw. Non-finite values are ignored.
    pub fn set_selected_yaw<R: Renderer + ?Sized>(&mut self, renderer: &mut R, degrees: f32) -> bool {
        if !degrees.is_finite() {
            return false;
        }
        self.update_selected(renderer, |record| record.yaw_degrees = degrees)
    }

    /// Add to the selection's yaw, without wrapping.
    pub fn nudge_selected_rotation<R: Renderer + ?Sized>(&mut self, renderer: &mut R, delta: f32) -> bool {
        if !delta.is_finite() {
            return false;
        }
        self.update_selected(renderer, |record| record.yaw_degrees += delta)
    }

    /// Set the selection's scale, clamping each axis into
    /// `[MIN_SCALE, MAX_SCALE]`. A non-finite axis keeps its value.
    pub fn set_selected_scale<R: Renderer + ?Sized>(&mut self, renderer: &mut R, scale: Vec3) -> bool {
        self.update_selected(renderer, |record| {
            record.scale = finite_vec3_or(scale, record.scale).clamp(Vec3::splat(MIN_SCALE), Vec3::splat(MAX_SCALE));
        })
    }

    /// Remove the selected placeholder and release its entity.
    pub fn delete_selected<R: Renderer + ?Sized>(&mut self, renderer: &mut R) -> Option<PlaceholderId> {
        let id = self.selected.take()?;
        let (_, entity) = self.registry.remove(id)?;
        renderer.destroy_entity(entity);
        if self.drag == Some(id) {
            self.drag = None;
        }
        log::info!("deleted placeholder {id}");
        Some(id)
    }

    fn update_selected<R, F>(&mut self, renderer: &mut R, f: F) -> bool
    where
        R: Renderer + ?Sized,
        F: FnOnce(&mut PlaceholderRecord),
    {
        let Some(id) = self.selected else {
            return false;
        };
        match self.registry.update(id, f) {
            Some((entity, transform)) => {
                renderer.set_transform(entity, transform);
                true
            }
            None => false,
        }
    }

    // ── Plane ────────────────────────────────────────────────────────────

    /// Current plane.
    #[must_use]
    pub fn plane(&self) -> &PlacementPlane {
        &self.plane
    }

    /// Apply a partial plane update. A height change moves every
    /// placeholder to the new height, keeping its horizontal position.
    /// Returns whether the plane changed.
    pub fn set_plane<R: Renderer + ?Sized>(&mut self, renderer: &mut R, update: &PlaneUpdate) -> bool {
        let old_y = self.plane.y;
        if !self.plane.apply(update) {
            return false;
        }
        if self.plane.y != old_y {
            let plane_y = self.plane.y;
            let ids: Vec<_> = self.registry.ids().collect();
            for id in ids {
                let updated = self.registry.update(id, |record| {
                    record.position.y = plane_y + record.y_offset;
                });
                if let Some((entity, transform)) = updated {
                    renderer.set_transform(entity, transform);
                }
            }
        }
        if let Some(entity) = self.plane_entity {
            renderer.set_transform(entity, self.plane.entity_transform());
            renderer.set_enabled(entity, self.plane.visible);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::render::{HeadlessRenderer, Projection};

    const PPU: f32 = 100.0;

    /// Renderer looking straight down: pixel (400 + 100x, 300 + 100z) is
    /// world (x, z).
    fn renderer() -> HeadlessRenderer {
        HeadlessRenderer::new(800.0, 600.0).with_projection(Projection::TopDown {
            pixels_per_unit: PPU,
            height: 10.0,
        })
    }

    fn px(x: f32, z: f32) -> (f32, f32) {
        (400.0 + x * PPU, 300.0 + z * PPU)
    }

    /// Axis-aligned 6 x 4 plane at y = 0 centred on the origin.
    fn system(r: &mut HeadlessRenderer) -> PlacementSystem {
        let options = PlacementOptions {
            plane_y: 0.0,
            rotation_y_degrees: 0.0,
            width: 6.0,
            length: 4.0,
            visible: false,
        };
        let bounds = PanBounds::new(Vec3::new(-1.0, 0.0, -1.0), Vec3::new(1.0, 2.0, 1.0));
        let mut sys = PlacementSystem::new(&options, Some(bounds));
        sys.attach(r);
        sys
    }

    fn place(sys: &mut PlacementSystem, r: &mut HeadlessRenderer, ty: &str, x: f32, z: f32) -> PlaceholderId {
        assert!(sys.enter_placement_mode(ty, ty));
        let (sx, sy) = px(x, z);
        sys.place_at(r, sx, sy).unwrap()
    }

    #[test]
    fn place_is_one_shot_and_selects() {
        let mut r = renderer();
        let mut sys = system(&mut r);
        let id = place(&mut sys, &mut r, "chair", 1.0, 0.5);
        assert!(sys.placement_mode().is_none());
        assert_eq!(sys.selected_id(), Some(id));
        let rec = sys.placeholder(id).unwrap();
        assert!((rec.position - Vec3::new(1.0, 0.35, 0.5)).length() < 1e-5);
        assert_eq!(rec.yaw_degrees, 0.0);
        assert_eq!(rec.scale, Vec3::ONE);
        let (sx, sy) = px(0.0, 0.0);
        assert!(sys.place_at(&mut r, sx, sy).is_none());
    }

    #[test]
    fn far_click_lands_on_plane_edge() {
        let mut r = renderer();
        let mut sys = system(&mut r);
        let id = place(&mut sys, &mut r, "table", 10.0, 0.0);
        let rec = sys.placeholder(id).unwrap();
        assert!((rec.position.x - 3.0).abs() < 1e-4);
        assert!(rec.position.z.abs() < 1e-4);
        assert!(sys.plane().rect().contains(Vec2::new(rec.position.x, rec.position.z), 1e-4));
    }

    #[test]
    fn placements_stay_inside_rotated_plane() {
        let mut r = renderer();
        let mut sys = system(&mut r);
        assert!(sys.set_plane(&mut r, &PlaneUpdate {
            rotation_y_degrees: Some(27.0),
            ..PlaneUpdate::default()
        }));
        for &(x, z) in &[(9.0, 9.0), (-3.5, 0.2), (0.1, -2.9), (2.5, 1.9)] {
            let id = place(&mut sys, &mut r, "chair", x, z);
            let p = sys.placeholder(id).unwrap().position;
            assert!(sys.plane().rect().contains(Vec2::new(p.x, p.z), 1e-4));
        }
    }

    #[test]
    fn miss_keeps_mode_armed() {
        let mut r = HeadlessRenderer::new(800.0, 600.0).with_projection(Projection::TopDown {
            pixels_per_unit: PPU,
            height: -5.0,
        });
        let mut sys = system(&mut r);
        assert!(sys.enter_placement_mode("chair", "Chair"));
        // Rays start below the plane and point down.
        assert!(sys.place_at(&mut r, 400.0, 300.0).is_none());
        assert!(sys.placement_mode().is_some());
    }

    #[test]
    fn pick_prefers_nearest_then_earliest() {
        let mut r = renderer();
        let mut sys = system(&mut r);
        let a = place(&mut sys, &mut r, "chair", 0.0, 0.0);
        let b = place(&mut sys, &mut r, "chair", 0.5, 0.0);
        let (sx, sy) = px(0.4, 0.0);
        assert_eq!(sys.pick_at(&r, sx, sy), Some(b));
        let (sx, sy) = px(0.25, 0.0);
        assert_eq!(sys.pick_at(&r, sx, sy), Some(a));
        let (sx, sy) = px(2.0, 1.5);
        assert_eq!(sys.pick_at(&r, sx, sy), None);
    }

    #[test]
    fn drag_moves_horizontally_and_keeps_offset() {
        let mut r = renderer();
        let mut sys = system(&mut r);
        let id = place(&mut sys, &mut r, "table", 0.0, 0.0);
        assert!(sys.nudge_selected_rotation(&mut r, 30.0));
        assert!(sys.begin_drag(id));
        let (sx, sy) = px(-1.0, 1.0);
        assert!(sys.update_drag(&mut r, sx, sy));
        let rec = sys.placeholder(id).unwrap();
        assert!((rec.position - Vec3::new(-1.0, 0.2, 1.0)).length() < 1e-5);
        assert_eq!(rec.yaw_degrees, 30.0);
        assert_eq!(sys.end_drag(), Some(id));
        assert!(!sys.update_drag(&mut r, sx, sy));
    }

    #[test]
    fn placement_and_drag_are_exclusive() {
        let mut r = renderer();
        let mut sys = system(&mut r);
        let id = place(&mut sys, &mut r, "chair", 0.0, 0.0);
        assert!(sys.begin_drag(id));
        assert!(!sys.enter_placement_mode("table", "Table"));
        let _ = sys.end_drag();
        assert!(sys.enter_placement_mode("table", "Table"));
        assert!(!sys.begin_drag(id));
    }

    #[test]
    fn pointer_down_claims_pick_and_drags() {
        let mut r = renderer();
        let mut sys = system(&mut r);
        let id = place(&mut sys, &mut r, "chair", 1.0, 1.0);
        assert!(sys.select(None));
        let (sx, sy) = px(1.1, 1.0);
        assert!(sys.pointer_down(&mut r, sx, sy));
        assert_eq!(sys.selected_id(), Some(id));
        assert_eq!(sys.dragging(), Some(id));
        let (sx, sy) = px(2.0, 1.0);
        assert!(sys.pointer_move(&mut r, sx, sy));
        assert!(sys.pointer_up());
        let (sx, sy) = px(-2.0, -1.5);
        assert!(!sys.pointer_down(&mut r, sx, sy));
        assert!(!sys.pointer_move(&mut r, sx, sy));
    }

    #[test]
    fn empty_click_clears_selection_without_claiming() {
        let mut r = renderer();
        let mut sys = system(&mut r);
        let id = place(&mut sys, &mut r, "chair", 0.0, 0.0);
        assert_eq!(sys.selected_id(), Some(id));
        let (sx, sy) = px(2.5, 1.5);
        assert!(!sys.pointer_down(&mut r, sx, sy));
        assert!(sys.selected_id().is_none());
        assert!(sys.dragging().is_none());
        assert_eq!(sys.registry().len(), 1);
    }

    #[test]
    fn selecting_keeps_placement_mode() {
        let mut r = renderer();
        let mut sys = system(&mut r);
        let id = place(&mut sys, &mut r, "chair", 0.0, 0.0);
        assert!(sys.select(None));
        assert!(sys.enter_placement_mode("table", "Table"));
        assert!(sys.select(Some(id)));
        assert!(sys.placement_mode().is_some());
    }

    #[test]
    fn scale_is_clamped_per_axis() {
        let mut r = renderer();
        let mut sys = system(&mut r);
        let _ = place(&mut sys, &mut r, "chair", 0.0, 0.0);
        assert!(sys.set_selected_scale(&mut r, Vec3::new(50.0, 0.005, 2.0)));
        assert_eq!(sys.selected_scale(), Vec3::new(10.0, 0.01, 2.0));
        assert!(sys.set_selected_scale(&mut r, Vec3::new(f32::NAN, 3.0, f32::INFINITY)));
        assert_eq!(sys.selected_scale(), Vec3::new(10.0, 3.0, 2.0));
    }

    #[test]
    fn nudge_does_not_wrap() {
        let mut r = renderer();
        let mut sys = system(&mut r);
        let _ = place(&mut sys, &mut r, "chair", 0.0, 0.0);
        for _ in 0..25 {
            assert!(sys.nudge_selected_rotation(&mut r, 15.0));
        }
        assert_eq!(sys.selected_yaw(), 375.0);
    }

    #[test]
    fn delete_selected_clears_selection_and_entity() {
        let mut r = renderer();
        let mut sys = system(&mut r);
        let id = place(&mut sys, &mut r, "chair", 0.0, 0.0);
        let entity = sys.registry().entity(id).unwrap();
        assert_eq!(sys.delete_selected(&mut r), Some(id));
        assert!(sys.selected().is_none());
        assert!(r.entity(entity).is_none());
        assert_eq!(sys.selected_yaw(), 0.0);
        assert_eq!(sys.selected_scale(), Vec3::ONE);
        assert!(sys.delete_selected(&mut r).is_none());
    }

    #[test]
    fn plane_height_change_rehomes_placeholders() {
        let mut r = renderer();
        let mut sys = system(&mut r);
        let chair = place(&mut sys, &mut r, "chair", 1.0, -1.0);
        let table = place(&mut sys, &mut r, "table", -1.0, 1.0);
        assert!(sys.set_plane(&mut r, &PlaneUpdate {
            y: Some(2.0),
            visible: Some(true),
            ..PlaneUpdate::default()
        }));
        let c = sys.placeholder(chair).unwrap().position;
        let t = sys.placeholder(table).unwrap().position;
        assert!((c - Vec3::new(1.0, 2.35, -1.0)).length() < 1e-5);
        assert!((t - Vec3::new(-1.0, 2.2, 1.0)).length() < 1e-5);
        let entity = sys.registry().entity(chair).unwrap();
        assert_eq!(r.entity(entity).unwrap().transform.position, c);
    }

    #[test]
    fn destroy_releases_every_entity() {
        let mut r = renderer();
        let mut sys = system(&mut r);
        let _ = place(&mut sys, &mut r, "chair", 0.0, 0.0);
        let _ = place(&mut sys, &mut r, "lamp", 1.0, 0.0);
        assert_eq!(r.entity_count(), 3);
        sys.destroy(&mut r);
        assert_eq!(r.entity_count(), 0);
        assert!(sys.placeholders().next().is_none());
    }
}
