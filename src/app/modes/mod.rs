//! Interaktions-Modi und die Mode-Machine.
//!
//! Genau ein Modus ist aktiv. Modi bekommen ihren gesamten Zugriff auf
//! Welt, Selektion, Undo-Log, Cursor und Events über einen `ModeContext`
//! und fordern Übergänge nur über ihren Rückgabewert an.

mod idle;
mod machine;
mod object_placement;
mod spline_placement;
mod terrain_paint;

pub use idle::{IdleMode, PointerDrag};
pub use machine::ModeMachine;
pub use object_placement::ObjectPlacementMode;
pub use spline_placement::SplinePlacementMode;
pub use terrain_paint::{LayerState, TerrainPaintMode};

use super::events::{EditorEvent, EventBus};
use super::history::UndoLog;
use super::input::InputSignals;
use super::selection::SelectionRegistry;
use crate::core::{EditorWorld, EntityId, EntityType, TypeSet};
use crate::shared::{CursorKind, CursorState, EditorOptions};
use std::fmt;

/// Schlüssel der Modus-Registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModeId {
    /// Idle für alle Typen
    Idle,
    /// Idle nur für Objekte
    IdleObjects,
    /// Idle für Splines und ihre Kontrollpunkte
    IdleSplines,
    ObjectPlacement,
    SplinePlacement,
    TerrainPaint,
}

impl ModeId {
    pub const ALL: [ModeId; 6] = [
        ModeId::Idle,
        ModeId::IdleObjects,
        ModeId::IdleSplines,
        ModeId::ObjectPlacement,
        ModeId::SplinePlacement,
        ModeId::TerrainPaint,
    ];

    /// Idle-Modus, der einen Entity-Typ bearbeiten darf.
    pub fn idle_for(entity_type: EntityType) -> ModeId {
        match entity_type {
            EntityType::Object => ModeId::IdleObjects,
            EntityType::Spline | EntityType::SplineHandle => ModeId::IdleSplines,
        }
    }

    /// Bearbeitbare Typen eines Idle-Modus, `None` für alle anderen Modi.
    pub fn editable_types(self) -> Option<TypeSet> {
        match self {
            ModeId::Idle => Some(TypeSet::all()),
            ModeId::IdleObjects => Some(TypeSet::of(&[EntityType::Object])),
            ModeId::IdleSplines => {
                Some(TypeSet::of(&[EntityType::Spline, EntityType::SplineHandle]))
            }
            ModeId::ObjectPlacement | ModeId::SplinePlacement | ModeId::TerrainPaint => None,
        }
    }

    pub fn is_idle(self) -> bool {
        self.editable_types().is_some()
    }
}

impl fmt::Display for ModeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ModeId::Idle => "Idle",
            ModeId::IdleObjects => "Idle(Objekte)",
            ModeId::IdleSplines => "Idle(Splines)",
            ModeId::ObjectPlacement => "Objekt-Platzierung",
            ModeId::SplinePlacement => "Spline-Platzierung",
            ModeId::TerrainPaint => "Terrain-Malen",
        };
        f.write_str(name)
    }
}

/// Übergangswunsch eines Modus am Ende seines Ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeRequest {
    Stay,
    Change(ModeId),
    /// Zum Idle-Modus des Typs wechseln (Fallback: allgemeines Idle)
    IdleFor(EntityType),
}

/// Expliziter Zugriff eines Modus auf den Editor-Zustand für einen Aufruf.
pub struct ModeContext<'a> {
    pub input: &'a InputSignals,
    pub world: &'a mut dyn EditorWorld,
    pub selection: &'a mut SelectionRegistry,
    pub undo: &'a mut dyn UndoLog,
    pub cursor: &'a mut CursorState,
    pub events: &'a mut EventBus,
    pub options: &'a EditorOptions,
}

impl ModeContext<'_> {
    pub fn publish(&mut self, event: EditorEvent) {
        self.events.publish(event);
    }

    /// Setzt den Cursor und meldet Änderungen.
    pub fn set_cursor(&mut self, kind: CursorKind) {
        if self.cursor.set(kind) {
            self.events.publish(EditorEvent::CursorChanged { cursor: kind });
        }
    }

    pub fn select(&mut self, id: EntityId) -> bool {
        let changed = self.selection.select(id);
        if changed {
            self.publish_selection();
        }
        changed
    }

    pub fn switch_selection(&mut self, id: EntityId) -> bool {
        let changed = self.selection.switch_selection(id);
        if changed {
            self.publish_selection();
        }
        changed
    }

    pub fn deselect(&mut self, caller: EntityId) -> bool {
        let changed = self.selection.deselect(caller);
        if changed {
            self.publish_selection();
        }
        changed
    }

    fn publish_selection(&mut self) {
        let current = self.selection.current();
        self.events.publish(EditorEvent::SelectionChanged { current });
    }
}

/// Geschlossene Menge der Interaktions-Modi.
pub enum InteractionMode {
    Idle(IdleMode),
    ObjectPlacement(ObjectPlacementMode),
    SplinePlacement(SplinePlacementMode),
    TerrainPaint(TerrainPaintMode),
}

impl InteractionMode {
    /// Erstellt den Modus für einen Registry-Schlüssel.
    pub fn for_id(id: ModeId, options: &EditorOptions) -> Self {
        match id.editable_types() {
            Some(editable) => InteractionMode::Idle(IdleMode::new(id, editable)),
            None => match id {
                ModeId::SplinePlacement => {
                    InteractionMode::SplinePlacement(SplinePlacementMode::new())
                }
                ModeId::TerrainPaint => {
                    InteractionMode::TerrainPaint(TerrainPaintMode::new(options))
                }
                _ => InteractionMode::ObjectPlacement(ObjectPlacementMode::new()),
            },
        }
    }

    pub fn enter(&mut self, ctx: &mut ModeContext<'_>) {
        match self {
            InteractionMode::Idle(mode) => mode.enter(ctx),
            InteractionMode::ObjectPlacement(mode) => mode.enter(ctx),
            InteractionMode::SplinePlacement(mode) => mode.enter(ctx),
            InteractionMode::TerrainPaint(mode) => mode.enter(ctx),
        }
    }

    pub fn tick(&mut self, ctx: &mut ModeContext<'_>) -> ModeRequest {
        match self {
            InteractionMode::Idle(mode) => mode.tick(ctx),
            InteractionMode::ObjectPlacement(mode) => mode.tick(ctx),
            InteractionMode::SplinePlacement(mode) => mode.tick(ctx),
            InteractionMode::TerrainPaint(mode) => mode.tick(ctx),
        }
    }

    pub fn exit(&mut self, ctx: &mut ModeContext<'_>) {
        match self {
            InteractionMode::Idle(mode) => mode.exit(ctx),
            InteractionMode::ObjectPlacement(mode) => mode.exit(ctx),
            InteractionMode::SplinePlacement(mode) => mode.exit(ctx),
            InteractionMode::TerrainPaint(mode) => mode.exit(ctx),
        }
    }

    /// Modus hat eine laufende Interaktion (Drag, schwebende Entity, Strich).
    pub fn is_busy(&self) -> bool {
        match self {
            InteractionMode::Idle(mode) => mode.is_busy(),
            InteractionMode::ObjectPlacement(mode) => mode.is_busy(),
            InteractionMode::SplinePlacement(mode) => mode.is_busy(),
            InteractionMode::TerrainPaint(mode) => mode.is_busy(),
        }
    }
}
