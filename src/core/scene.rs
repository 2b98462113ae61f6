//! In-Memory-Szene: Referenz-Implementierung aller Welt-Schnittstellen.
//!
//! Entities liegen in einer Arena (`IndexMap<EntityId, SceneObject>`).
//! Der Hit-Test arbeitet auf der XZ-Ebene unter dem Zeiger, das Terrain
//! ist flach auf Höhe 0. Dient als Host für Tests, Benchmarks und den
//! Headless-Treiber der Binary.

use super::world::{
    ContentLookup, EntityHost, Hit, Projection, SceneQuery, TerrainHost,
};
use super::{
    CategoryId, ContentCatalog, ContentDefinition, ContentId, EntityId, EntityType, LayerMask,
    LayerResolution, LayerTicket, SplatMap, Transform, TypeSet, UndoAction, UndoPayload,
};
use glam::Vec3;
use indexmap::IndexMap;
use std::cell::Cell;

/// Standard-Pick-Radius der Szene in Welteinheiten.
pub const SCENE_PICK_RADIUS: f32 = 1.0;
/// Stapelhöhe eines Objekts bei Skalierung 1.
pub const OBJECT_STACK_HEIGHT: f32 = 1.0;

/// Ein Objekt in der Szenen-Arena.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    pub id: EntityId,
    pub entity_type: EntityType,
    pub definition: Option<ContentId>,
    pub transform: Transform,
    pub layer: LayerMask,
    pub in_placement: bool,
    pub auto_elevate: bool,
    pub respawn_on_place: bool,
    pub draggable: bool,
    /// Besitzer (Spline eines Kontrollpunkts)
    pub owner: Option<EntityId>,
    /// Unterkomponenten in Reihenfolge
    pub children: Vec<EntityId>,
}

impl SceneObject {
    fn resting_layer(&self) -> LayerMask {
        match self.entity_type {
            EntityType::SplineHandle => LayerMask::HANDLES,
            _ => LayerMask::DEFAULT,
        }
    }
}

/// Referenz-Welt für den Interaktions-Kern.
pub struct Scene {
    objects: IndexMap<EntityId, SceneObject>,
    next_id: u64,
    catalog: ContentCatalog,
    terrain: Option<SplatMap>,
    terrain_id: EntityId,
    pointer: Vec3,
    pointer_over_ui: bool,
    hover: Option<EntityId>,
    pick_radius: f32,
    handle_queries: Cell<usize>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Leere Szene ohne Terrain.
    pub fn new() -> Self {
        Self {
            objects: IndexMap::new(),
            // 0 ist für das Terrain reserviert
            next_id: 1,
            catalog: ContentCatalog::new(),
            terrain: None,
            terrain_id: EntityId(0),
            pointer: Vec3::ZERO,
            pointer_over_ui: false,
            hover: None,
            pick_radius: SCENE_PICK_RADIUS,
            handle_queries: Cell::new(0),
        }
    }

    pub fn with_catalog(mut self, catalog: ContentCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_terrain(mut self, splat_map: SplatMap) -> Self {
        self.terrain = Some(splat_map);
        self
    }

    pub fn with_pick_radius(mut self, radius: f32) -> Self {
        self.pick_radius = radius.max(0.0);
        self
    }

    pub fn catalog_mut(&mut self) -> &mut ContentCatalog {
        &mut self.catalog
    }

    /// Setzt den Bodenpunkt unter dem Zeiger (Y wird ignoriert).
    pub fn set_pointer(&mut self, x: f32, z: f32) {
        self.pointer = Vec3::new(x, 0.0, z);
    }

    pub fn set_pointer_over_ui(&mut self, over_ui: bool) {
        self.pointer_over_ui = over_ui;
    }

    pub fn object(&self, id: EntityId) -> Option<&SceneObject> {
        self.objects.get(&id)
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// IDs aller Objekte eines Typs in Erzeugungsreihenfolge.
    pub fn ids_of_type(&self, entity_type: EntityType) -> Vec<EntityId> {
        self.objects
            .values()
            .filter(|o| o.entity_type == entity_type)
            .map(|o| o.id)
            .collect()
    }

    pub fn hovered(&self) -> Option<EntityId> {
        self.hover
    }

    /// Wie oft `drag_handles` abgefragt wurde.
    pub fn handle_query_count(&self) -> usize {
        self.handle_queries.get()
    }

    /// Erzeugt ein bereits platziertes Objekt aus einer Katalog-Definition.
    pub fn spawn_placed(&mut self, definition: ContentId, position: Vec3) -> Option<EntityId> {
        let definition = self.catalog.item(definition)?.clone();
        Some(self.spawn(&definition, Transform::from_position(position)))
    }

    fn allocate_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    fn insert(&mut self, object: SceneObject) -> EntityId {
        let id = object.id;
        self.objects.insert(id, object);
        id
    }

    fn planar_distance(&self, position: Vec3) -> f32 {
        glam::Vec2::new(position.x - self.pointer.x, position.z - self.pointer.z).length()
    }

    fn stack_top_under_pointer(&self) -> f32 {
        self.objects
            .values()
            .filter(|o| o.layer == LayerMask::DEFAULT && o.entity_type == EntityType::Object)
            .filter(|o| self.planar_distance(o.transform.position) <= self.pick_radius)
            .map(|o| o.transform.position.y + OBJECT_STACK_HEIGHT * o.transform.scale.y)
            .fold(0.0, f32::max)
    }
}

impl EntityHost for Scene {
    fn spawn(&mut self, definition: &ContentDefinition, transform: Transform) -> EntityId {
        let id = self.allocate_id();
        let object = SceneObject {
            id,
            entity_type: definition.entity_type,
            definition: Some(definition.id),
            transform,
            layer: LayerMask::DEFAULT,
            in_placement: false,
            auto_elevate: definition.auto_elevate,
            respawn_on_place: definition.respawn_on_place,
            draggable: definition.entity_type != EntityType::Spline,
            owner: None,
            children: Vec::new(),
        };
        let layer = object.resting_layer();
        let id = self.insert(SceneObject { layer, ..object });
        log::debug!("Scene: {} '{}' erzeugt", id, definition.name);
        id
    }

    fn destroy(&mut self, id: EntityId) {
        let Some(object) = self.objects.shift_remove(&id) else {
            return;
        };
        for child in object.children {
            self.destroy(child);
        }
        if let Some(owner) = object.owner.and_then(|o| self.objects.get_mut(&o)) {
            owner.children.retain(|c| *c != id);
        }
        if self.hover == Some(id) {
            self.hover = None;
        }
        log::debug!("Scene: {} entfernt", id);
    }

    fn exists(&self, id: EntityId) -> bool {
        self.objects.contains_key(&id)
    }

    fn entity_type(&self, id: EntityId) -> Option<EntityType> {
        self.objects.get(&id).map(|o| o.entity_type)
    }

    fn definition_of(&self, id: EntityId) -> Option<ContentId> {
        self.objects.get(&id).and_then(|o| o.definition)
    }

    fn transform(&self, id: EntityId) -> Option<Transform> {
        self.objects.get(&id).map(|o| o.transform)
    }

    fn set_transform(&mut self, id: EntityId, transform: Transform) {
        if let Some(object) = self.objects.get_mut(&id) {
            object.transform = transform;
        }
    }

    fn move_to(&mut self, id: EntityId, point: Vec3) {
        if let Some(object) = self.objects.get_mut(&id) {
            object.transform.position = point;
        }
    }

    fn pick_up(&mut self, id: EntityId) {
        if let Some(object) = self.objects.get_mut(&id) {
            object.in_placement = true;
            object.layer = LayerMask::IGNORE_RAYCAST;
        }
    }

    fn release(&mut self, id: EntityId) {
        if let Some(object) = self.objects.get_mut(&id) {
            object.in_placement = false;
            object.layer = object.resting_layer();
        }
    }

    fn in_placement_mode(&self, id: EntityId) -> bool {
        self.objects.get(&id).is_some_and(|o| o.in_placement)
    }

    fn auto_elevates(&self, id: EntityId) -> bool {
        self.objects.get(&id).is_some_and(|o| o.auto_elevate)
    }

    fn respawns_on_place(&self, id: EntityId) -> bool {
        self.objects.get(&id).is_some_and(|o| o.respawn_on_place)
    }

    fn is_draggable(&self, id: EntityId) -> bool {
        self.objects.get(&id).is_some_and(|o| o.draggable)
    }

    fn drag_handles(&self, id: EntityId) -> Vec<EntityId> {
        self.handle_queries.set(self.handle_queries.get() + 1);
        self.objects
            .get(&id)
            .map(|o| {
                o.children
                    .iter()
                    .copied()
                    .filter(|c| self.objects.get(c).is_some_and(|h| h.draggable))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn set_hover(&mut self, id: Option<EntityId>) {
        self.hover = id.filter(|i| self.objects.contains_key(i));
    }

    fn add_spline_point(&mut self, spline: EntityId, point: Vec3) -> Option<EntityId> {
        if self.entity_type(spline) != Some(EntityType::Spline) {
            return None;
        }
        let id = self.allocate_id();
        self.insert(SceneObject {
            id,
            entity_type: EntityType::SplineHandle,
            definition: None,
            transform: Transform::from_position(point),
            layer: LayerMask::HANDLES,
            in_placement: false,
            auto_elevate: false,
            respawn_on_place: false,
            draggable: true,
            owner: Some(spline),
            children: Vec::new(),
        });
        if let Some(owner) = self.objects.get_mut(&spline) {
            owner.children.push(id);
        }
        Some(id)
    }

    fn spline_point_count(&self, spline: EntityId) -> usize {
        self.objects.get(&spline).map_or(0, |o| {
            o.children
                .iter()
                .filter(|c| self.objects.get(*c).is_some_and(|h| !h.in_placement))
                .count()
        })
    }

    fn owner_of(&self, id: EntityId) -> Option<EntityId> {
        self.objects.get(&id).and_then(|o| o.owner)
    }

    fn apply_inverse(&mut self, action: &UndoAction) -> bool {
        match &action.payload {
            UndoPayload::Create { .. } => {
                if !self.exists(action.target) {
                    return false;
                }
                self.destroy(action.target);
                true
            }
            UndoPayload::Transform { before } => {
                if !self.exists(action.target) {
                    return false;
                }
                self.set_transform(action.target, *before);
                true
            }
            UndoPayload::TerrainPaint(snapshot) => match self.terrain.as_mut() {
                Some(map) => {
                    map.restore_region(&snapshot.pre_paint_layer_textures, snapshot.dirty_rect)
                }
                None => false,
            },
        }
    }
}

impl SceneQuery for Scene {
    fn raycast(&self, filter: TypeSet, mask: LayerMask, require_handle: bool) -> Option<Hit> {
        self.objects
            .values()
            .filter(|o| filter.contains(o.entity_type))
            .filter(|o| o.layer.intersects(mask))
            .filter(|o| !require_handle || o.draggable)
            .map(|o| (o, self.planar_distance(o.transform.position)))
            .filter(|(_, distance)| *distance <= self.pick_radius)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(o, _)| Hit {
                entity: o.id,
                point: o.transform.position,
            })
    }

    fn pointer_world_point(&self, projection: Projection) -> Vec3 {
        match projection {
            Projection::StackableSurface => {
                Vec3::new(self.pointer.x, self.stack_top_under_pointer(), self.pointer.z)
            }
            Projection::FixedHeight(height) => Vec3::new(self.pointer.x, height, self.pointer.z),
            Projection::Terrain => Vec3::new(self.pointer.x, 0.0, self.pointer.z),
        }
    }

    fn is_pointer_over_ui(&self) -> bool {
        self.pointer_over_ui
    }
}

impl ContentLookup for Scene {
    fn definition(&self, id: ContentId) -> Option<ContentDefinition> {
        self.catalog.item(id).cloned()
    }

    fn category_size(&self, id: CategoryId) -> usize {
        self.catalog.category_size(id)
    }

    fn pick_from_category(&mut self, id: CategoryId) -> Option<ContentDefinition> {
        self.catalog.pick_from_category(id)
    }

    fn request_layer(&mut self, address: &str) -> LayerTicket {
        self.catalog.request_layer(address)
    }

    fn poll_layer(&mut self, ticket: LayerTicket) -> LayerResolution {
        self.catalog.poll_layer(ticket)
    }
}

impl TerrainHost for Scene {
    fn terrain_id(&self) -> Option<EntityId> {
        self.terrain.as_ref().map(|_| self.terrain_id)
    }

    fn splat_map(&self) -> Option<&SplatMap> {
        self.terrain.as_ref()
    }

    fn splat_map_mut(&mut self) -> Option<&mut SplatMap> {
        self.terrain.as_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::UndoKind;

    fn scene() -> Scene {
        let mut catalog = ContentCatalog::new();
        catalog.add_item(ContentDefinition::new(1, "Kiste", EntityType::Object));
        catalog.add_item(ContentDefinition::new(2, "Rampe", EntityType::Spline));
        Scene::new().with_catalog(catalog)
    }

    #[test]
    fn picked_up_entity_is_invisible_to_raycasts() {
        let mut scene = scene();
        let id = scene
            .spawn_placed(ContentId(1), Vec3::ZERO)
            .expect("Definition vorhanden");
        scene.set_pointer(0.2, 0.0);
        assert!(scene
            .raycast(TypeSet::all(), LayerMask::pickable(), false)
            .is_some());

        scene.pick_up(id);
        assert!(scene.in_placement_mode(id));
        assert!(scene
            .raycast(TypeSet::all(), LayerMask::pickable(), false)
            .is_none());

        scene.release(id);
        assert!(!scene.in_placement_mode(id));
        assert_eq!(
            scene
                .raycast(TypeSet::all(), LayerMask::pickable(), false)
                .map(|h| h.entity),
            Some(id)
        );
    }

    #[test]
    fn raycast_respects_type_filter() {
        let mut scene = scene();
        scene.spawn_placed(ContentId(1), Vec3::ZERO);
        let only_splines = TypeSet::of(&[EntityType::Spline]);
        assert!(scene
            .raycast(only_splines, LayerMask::pickable(), false)
            .is_none());
    }

    #[test]
    fn stackable_projection_lands_on_top_of_objects() {
        let mut scene = scene();
        scene.spawn_placed(ContentId(1), Vec3::new(3.0, 0.0, 3.0));
        scene.set_pointer(3.0, 3.0);
        let point = scene.pointer_world_point(Projection::StackableSurface);
        assert_eq!(point, Vec3::new(3.0, OBJECT_STACK_HEIGHT, 3.0));
        let fixed = scene.pointer_world_point(Projection::FixedHeight(2.5));
        assert_eq!(fixed.y, 2.5);
    }

    #[test]
    fn destroying_spline_removes_its_points() {
        let mut scene = scene();
        let spline = scene
            .spawn_placed(ContentId(2), Vec3::ZERO)
            .expect("Definition vorhanden");
        let a = scene
            .add_spline_point(spline, Vec3::ZERO)
            .expect("Spline vorhanden");
        let b = scene
            .add_spline_point(spline, Vec3::X)
            .expect("Spline vorhanden");
        scene.pick_up(b);
        assert_eq!(scene.spline_point_count(spline), 1);
        assert_eq!(scene.owner_of(a), Some(spline));
        assert_eq!(scene.drag_handles(spline), vec![a, b]);

        scene.destroy(spline);
        assert!(!scene.exists(a));
        assert!(!scene.exists(b));
        assert_eq!(scene.object_count(), 0);
    }

    #[test]
    fn destroying_point_unlinks_it_from_spline() {
        let mut scene = scene();
        let spline = scene
            .spawn_placed(ContentId(2), Vec3::ZERO)
            .expect("Definition vorhanden");
        let a = scene
            .add_spline_point(spline, Vec3::ZERO)
            .expect("Spline vorhanden");
        scene.destroy(a);
        assert!(scene.drag_handles(spline).is_empty());
    }

    #[test]
    fn apply_inverse_of_create_destroys_target() {
        let mut scene = scene();
        let id = scene
            .spawn_placed(ContentId(1), Vec3::ZERO)
            .expect("Definition vorhanden");
        let action = UndoAction {
            kind: UndoKind::Create,
            target: id,
            payload: UndoPayload::Create {
                definition: Some(ContentId(1)),
                transform: Transform::default(),
            },
        };
        assert!(scene.apply_inverse(&action));
        assert!(!scene.exists(id));
        assert!(!scene.apply_inverse(&action));
    }
}
