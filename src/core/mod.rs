//! Core-Domänentypen: Entities, Inhalte, Splatmap, Undo-Aktionen und Welt-Schnittstellen.

pub mod content;
pub mod entity;
/// Referenz-Welt (Arena) für Tests, Benchmarks und den Headless-Treiber
pub mod scene;
pub mod terrain;
pub mod undo;
/// Schnittstellen zu externen Kollaborateuren
pub mod world;

pub use content::{
    CategoryId, ContentCatalog, ContentDefinition, ContentId, LayerResolution, LayerTicket,
};
pub use entity::{EntityId, EntityType, LayerMask, Transform, TypeSet};
pub use scene::{Scene, SceneObject};
pub use terrain::{DirtyRect, SplatMap};
pub use undo::{PaintUndoSnapshot, UndoAction, UndoKind, UndoPayload};
pub use world::{
    ContentLookup, EditorWorld, EntityHost, Hit, Projection, SceneQuery, TerrainHost,
};
