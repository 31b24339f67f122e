use std::collections::BTreeMap;
use std::fmt;

use glam::{Quat, Vec3};
use serde::{Serialize, Serializer};

use super::kinds::PlaceholderKind;
use crate::render::{EntityDesc, EntityId, EntityTransform};

/// Unique, monotonically increasing placeholder id, shown as `ph_N`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlaceholderId(pub u64);

impl fmt::Display for PlaceholderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ph_{}", self.0)
    }
}

impl Serialize for PlaceholderId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A placed marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceholderRecord {
    /// Registry key.
    pub id: PlaceholderId,
    /// Catalogue type (`chair`, `table`, or any custom id).
    pub type_id: String,
    /// Label shown in the host UI.
    pub display_name: String,
    /// Centre in world space; `y` is the plane height plus `y_offset`.
    pub position: Vec3,
    /// Rotation about +Y in degrees, unbounded.
    pub yaw_degrees: f32,
    /// Per-axis scale, each in `[0.01, 10]`.
    pub scale: Vec3,
    /// Height of the centre above the plane.
    pub y_offset: f32,
}

impl PlaceholderRecord {
    pub(crate) fn entity_transform(&self) -> EntityTransform {
        EntityTransform {
            position: self.position,
            rotation: Quat::from_rotation_y(self.yaw_degrees.to_radians()),
            scale: self.scale,
        }
    }
}

#[derive(Debug)]
struct Entry {
    record: PlaceholderRecord,
    entity: EntityId,
}

/// Placeholder records keyed by id, each owning one renderer entity.
///
/// Ids are handed out in increasing order and never reused, so iteration
/// order is insertion order.
#[derive(Debug, Default)]
pub struct PlaceholderRegistry {
    entries: BTreeMap<PlaceholderId, Entry>,
    next_id: u64,
    revision: u64,
}

impl PlaceholderRegistry {
    /// Empty registry; the first id is `ph_1`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve the next id.
    pub(crate) fn allocate_id(&mut self) -> PlaceholderId {
        self.next_id += 1;
        PlaceholderId(self.next_id)
    }

    /// Store a record with its entity.
    pub(crate) fn insert(&mut self, record: PlaceholderRecord, entity: EntityId) {
        self.revision += 1;
        let _ = self.entries.insert(record.id, Entry { record, entity });
    }

    /// Remove a record, returning it with the entity it owned.
    pub(crate) fn remove(&mut self, id: PlaceholderId) -> Option<(PlaceholderRecord, EntityId)> {
        let entry = self.entries.remove(&id)?;
        self.revision += 1;
        Some((entry.record, entry.entity))
    }

    /// Mutate a record; returns its entity and the updated transform.
    /// The revision only advances if the record actually changed.
    pub(crate) fn update<F>(&mut self, id: PlaceholderId, f: F) -> Option<(EntityId, EntityTransform)>
    where
        F: FnOnce(&mut PlaceholderRecord),
    {
        let entry = self.entries.get_mut(&id)?;
        let before = entry.record.clone();
        f(&mut entry.record);
        if entry.record != before {
            self.revision += 1;
        }
        Some((entry.entity, entry.record.entity_transform()))
    }

    /// Remove everything, returning the owned entities.
    pub(crate) fn drain(&mut self) -> Vec<EntityId> {
        if !self.entries.is_empty() {
            self.revision += 1;
        }
        std::mem::take(&mut self.entries)
            .into_values()
            .map(|entry| entry.entity)
            .collect()
    }

    /// Look up a record.
    #[must_use]
    pub fn get(&self, id: PlaceholderId) -> Option<&PlaceholderRecord> {
        self.entries.get(&id).map(|entry| &entry.record)
    }

    /// Renderer entity for a record.
    #[must_use]
    pub fn entity(&self, id: PlaceholderId) -> Option<EntityId> {
        self.entries.get(&id).map(|entry| entry.entity)
    }

    /// Records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &PlaceholderRecord> + '_ {
        self.entries.values().map(|entry| &entry.record)
    }

    /// Ids in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = PlaceholderId> + '_ {
        self.entries.keys().copied()
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Counter bumped by every mutation, for change detection.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

/// Entity description for a placeholder kind.
pub(crate) fn entity_desc(kind: &PlaceholderKind) -> EntityDesc {
    EntityDesc::Box {
        half_extents: kind.half_extents,
        color: kind.color,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: PlaceholderId) -> PlaceholderRecord {
        PlaceholderRecord {
            id,
            type_id: "chair".into(),
            display_name: "Chair".into(),
            position: Vec3::ZERO,
            yaw_degrees: 0.0,
            scale: Vec3::ONE,
            y_offset: 0.35,
        }
    }

    #[test]
    fn ids_are_monotonic_and_never_reused() {
        let mut reg = PlaceholderRegistry::new();
        let a = reg.allocate_id();
        reg.insert(record(a), EntityId(10));
        let _ = reg.remove(a);
        let b = reg.allocate_id();
        assert!(b > a);
        assert_eq!(b.to_string(), "ph_2");
    }

    #[test]
    fn iteration_follows_insertion_order() {
        let mut reg = PlaceholderRegistry::new();
        let ids: Vec<_> = (0..4).map(|_| reg.allocate_id()).collect();
        for (i, id) in ids.iter().enumerate() {
            reg.insert(record(*id), EntityId(i as u64));
        }
        let _ = reg.remove(ids[1]);
        let order: Vec<_> = reg.ids().collect();
        assert_eq!(order, vec![ids[0], ids[2], ids[3]]);
    }

    #[test]
    fn unchanged_update_keeps_revision() {
        let mut reg = PlaceholderRegistry::new();
        let id = reg.allocate_id();
        reg.insert(record(id), EntityId(1));
        let rev = reg.revision();
        assert!(reg.update(id, |r| r.yaw_degrees = 0.0).is_some());
        assert_eq!(reg.revision(), rev);
        assert!(reg.update(id, |r| r.yaw_degrees = 30.0).is_some());
        assert_eq!(reg.revision(), rev + 1);
        assert!(reg.update(PlaceholderId(99), |r| r.yaw_degrees = 1.0).is_none());
    }

    #[test]
    fn id_serializes_as_display_string() {
        let json = serde_json::to_value(record(PlaceholderId(7))).unwrap();
        assert_eq!(json["id"], "ph_7");
        assert_eq!(json["typeId"], "chair");
    }
}
