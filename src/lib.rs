//! Scene Editor Core Library.
//! Interaktions-Kern (Modi, Platzierung, Terrain-Pinsel, Selektion/Undo)
//! als Library exportiert für Tests und Wiederverwendung.

pub mod app;
pub mod core;
pub mod shared;

pub use app::{
    AppController, AppIntent, EditorError, EditorEvent, EditorState, InputSignals, ModeId,
    PlacementSource,
};
pub use core::{
    CategoryId, ContentCatalog, ContentDefinition, ContentId, DirtyRect, EditorWorld, EntityId,
    EntityType, Scene, SplatMap, Transform, UndoKind,
};
pub use shared::{CursorKind, EditorOptions};
