//! Editor-State: zentrale Datenhaltung des Interaktions-Kerns.
//!
//! Wird einmal beim Start erzeugt und explizit an Controller und Modi
//! übergeben.

use super::events::EventBus;
use super::history::EditHistory;
use super::input::InputSignals;
use super::modes::{ModeContext, ModeId, ModeMachine};
use super::selection::SelectionRegistry;
use crate::core::{EditorWorld, EntityId};
use crate::shared::{CursorKind, CursorState, EditorOptions};

/// Hauptzustand des Editors
pub struct EditorState {
    /// Registry und aktiver Interaktions-Modus
    pub modes: ModeMachine,
    /// Aktuell bearbeitete Entity
    pub selection: SelectionRegistry,
    /// Undo-Log (begrenzter Stack)
    pub history: EditHistory,
    /// Angeforderter Cursor
    pub cursor: CursorState,
    /// Ausgehende Events
    pub events: EventBus,
    /// Laufzeit-Optionen
    pub options: EditorOptions,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new(EditorOptions::default())
    }
}

impl EditorState {
    /// Erstellt einen neuen State mit allen Modi, aktiv ist das allgemeine Idle.
    pub fn new(options: EditorOptions) -> Self {
        Self::with_modes(&ModeId::ALL, options)
    }

    /// State mit einer Auswahl an registrierten Modi.
    pub fn with_modes(modes: &[ModeId], options: EditorOptions) -> Self {
        Self {
            modes: ModeMachine::with_modes(modes, &options),
            selection: SelectionRegistry::new(),
            history: EditHistory::new_with_capacity(options.history_depth),
            cursor: CursorState::new(),
            events: EventBus::new(),
            options,
        }
    }

    pub fn active_mode(&self) -> ModeId {
        self.modes.active()
    }

    pub fn selected(&self) -> Option<EntityId> {
        self.selection.current()
    }

    pub fn cursor(&self) -> CursorKind {
        self.cursor.current()
    }

    /// Teilt den State in die Mode-Machine und den Kontext für ihre Modi.
    pub fn split<'a>(
        &'a mut self,
        world: &'a mut dyn EditorWorld,
        input: &'a InputSignals,
    ) -> (&'a mut ModeMachine, ModeContext<'a>) {
        let ctx = ModeContext {
            input,
            world,
            selection: &mut self.selection,
            undo: &mut self.history,
            cursor: &mut self.cursor,
            events: &mut self.events,
            options: &self.options,
        };
        (&mut self.modes, ctx)
    }
}
