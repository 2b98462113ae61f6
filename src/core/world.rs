//! Schnittstellen zu den externen Kollaborateuren des Interaktions-Kerns.
//!
//! Der Kern rendert nicht, lädt keine Inhalte und besitzt keine Entities.
//! Er spricht ausschließlich über diese Traits mit der Welt.

use super::{
    CategoryId, ContentDefinition, ContentId, EntityId, EntityType, LayerMask, LayerResolution,
    LayerTicket, SplatMap, Transform, TypeSet, UndoAction,
};
use glam::Vec3;

/// Treffer eines Raycasts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub entity: EntityId,
    pub point: Vec3,
}

/// Projektion des Mauszeigers in die Welt
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    /// Oberste stapelbare Oberfläche unter dem Zeiger
    StackableSurface,
    /// Ebene auf fester Höhe
    FixedHeight(f32),
    /// Terrain-Oberfläche
    Terrain,
}

/// Primitive des Entity-Vertrags. `place()` und `cancel_placement()` baut
/// der Kern selbst darauf auf (siehe `app::placement::lifecycle`).
pub trait EntityHost {
    /// Erzeugt eine Entity aus einer Definition.
    fn spawn(&mut self, definition: &ContentDefinition, transform: Transform) -> EntityId;

    /// Entfernt eine Entity samt Unterkomponenten.
    fn destroy(&mut self, id: EntityId);

    fn exists(&self, id: EntityId) -> bool;

    fn entity_type(&self, id: EntityId) -> Option<EntityType>;

    fn definition_of(&self, id: EntityId) -> Option<ContentId>;

    fn transform(&self, id: EntityId) -> Option<Transform>;

    fn set_transform(&mut self, id: EntityId, transform: Transform);

    /// Setzt nur die Position.
    fn move_to(&mut self, id: EntityId, point: Vec3);

    /// Platzierungsmodus an: raycast-transparent, folgt dem Zeiger.
    fn pick_up(&mut self, id: EntityId);

    /// Platzierungsmodus aus: zurück auf den normalen Raycast-Layer.
    fn release(&mut self, id: EntityId);

    fn in_placement_mode(&self, id: EntityId) -> bool;

    fn auto_elevates(&self, id: EntityId) -> bool;

    fn respawns_on_place(&self, id: EntityId) -> bool;

    fn is_draggable(&self, id: EntityId) -> bool;

    /// Greifbare Unterkomponenten einer Entity (z.B. Spline-Kontrollpunkte).
    fn drag_handles(&self, id: EntityId) -> Vec<EntityId>;

    /// Setzt das Hover-Highlight (`None` = keins).
    fn set_hover(&mut self, id: Option<EntityId>);

    /// Hängt einen neuen Kontrollpunkt an eine Spline an.
    fn add_spline_point(&mut self, spline: EntityId, point: Vec3) -> Option<EntityId>;

    /// Anzahl platzierter (nicht schwebender) Kontrollpunkte.
    fn spline_point_count(&self, spline: EntityId) -> usize;

    /// Besitzer einer Unterkomponente (Spline eines Kontrollpunkts).
    fn owner_of(&self, id: EntityId) -> Option<EntityId>;

    /// Wendet die inverse Nutzlast einer Undo-Aktion an.
    fn apply_inverse(&mut self, action: &UndoAction) -> bool;
}

/// Hit-Test, Zeiger-Projektion und UI-Blockade.
pub trait SceneQuery {
    fn raycast(&self, filter: TypeSet, mask: LayerMask, require_handle: bool) -> Option<Hit>;

    fn pointer_world_point(&self, projection: Projection) -> Vec3;

    fn is_pointer_over_ui(&self) -> bool;
}

/// Inhalts-Lookup und asynchrone Textur-Layer-Auflösung.
pub trait ContentLookup {
    fn definition(&self, id: ContentId) -> Option<ContentDefinition>;

    fn category_size(&self, id: CategoryId) -> usize;

    fn pick_from_category(&mut self, id: CategoryId) -> Option<ContentDefinition>;

    fn request_layer(&mut self, address: &str) -> LayerTicket;

    fn poll_layer(&mut self, ticket: LayerTicket) -> LayerResolution;
}

/// Zugriff auf die Terrain-Splatmap.
pub trait TerrainHost {
    /// Entity-ID des Terrains (Ziel von Mal-Undo-Aktionen).
    fn terrain_id(&self) -> Option<EntityId>;

    fn splat_map(&self) -> Option<&SplatMap>;

    fn splat_map_mut(&mut self) -> Option<&mut SplatMap>;
}

/// Alles, was die Interaktions-Modi von der Welt brauchen.
pub trait EditorWorld: EntityHost + SceneQuery + ContentLookup + TerrainHost {}

impl<T: EntityHost + SceneQuery + ContentLookup + TerrainHost> EditorWorld for T {}
