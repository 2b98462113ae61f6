//! Undo-Aktionen: Art, Ziel und inverse Nutzlast einer Mutation.

use super::{ContentId, DirtyRect, EntityId, Transform};

/// Art einer aufgezeichneten Mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UndoKind {
    Create,
    Move,
    Rotate,
    Scale,
    Elevate,
    PaintTerrain,
}

/// Vor-Mal-Zustand eines Pinselstrichs.
#[derive(Debug, Clone, PartialEq)]
pub struct PaintUndoSnapshot {
    /// Vollständige Layer-Buffer vor dem Strich
    pub pre_paint_layer_textures: Vec<Vec<f32>>,
    /// Bereich, den der Strich tatsächlich verändert hat
    pub dirty_rect: DirtyRect,
}

/// Zustand vor der Mutation, genug um sie rückgängig zu machen.
#[derive(Debug, Clone, PartialEq)]
pub enum UndoPayload {
    /// Entity wurde erzeugt; Rücknahme = Entfernen
    Create {
        definition: Option<ContentId>,
        transform: Transform,
    },
    /// Lage vor Move/Rotate/Scale/Elevate
    Transform { before: Transform },
    /// Splatmap-Zustand vor einem Pinselstrich
    TerrainPaint(PaintUndoSnapshot),
}

/// Ein Eintrag des Undo-Logs.
#[derive(Debug, Clone, PartialEq)]
pub struct UndoAction {
    pub kind: UndoKind,
    pub target: EntityId,
    pub payload: UndoPayload,
}
