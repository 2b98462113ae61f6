//! Ereignisse des Interaktions-Kerns: eingehende Intents und ausgehende Events.

mod bus;
mod intent;

pub use bus::{EventBus, SubscriberId};
pub use intent::AppIntent;

use super::modes::ModeId;
use crate::core::{DirtyRect, EntityId};
use crate::shared::CursorKind;

/// Vom Kern erzeugte Benachrichtigung für UI und Präsentationsschicht.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    /// `exit` des alten Modus ist abgeschlossen
    ModeExited { mode: ModeId },
    /// `enter` des neuen Modus ist abgeschlossen
    ModeEntered { mode: ModeId },
    /// Moduswechsel vollständig (nach `enter`)
    ModeChanged { from: ModeId, to: ModeId },
    /// Aktuell bearbeitete Entity hat gewechselt
    SelectionChanged { current: Option<EntityId> },
    /// Cursor-Darstellung soll wechseln
    CursorChanged { cursor: CursorKind },
    /// Klick auf ein im aktiven Modus nicht bearbeitbares Objekt
    DeniedFeedback { entity: EntityId },
    /// Escape im allgemeinen Idle ohne Selektion: Hauptmenü öffnen
    OpenMainMenuRequested,
    /// Gehaltener Klick wurde als Drag erkannt
    DragStarted { entity: EntityId },
    /// Entity hat den Platzierungsmodus regulär verlassen
    EntityPlaced { entity: EntityId },
    /// Pinselstrich mit Änderungen wurde ins Undo-Log übergeben
    PaintStrokeCommitted { dirty_rect: DirtyRect },
}
