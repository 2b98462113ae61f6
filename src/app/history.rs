//! Undo-Log: Schnittstelle für den Kern und begrenzter Aktions-Stack.

use crate::core::{EntityId, UndoAction, UndoKind, UndoPayload};

/// Schreib-Schnittstelle, über die der Kern Mutationen meldet.
///
/// Der Kern liest nie zurück; `record` wird vor (bzw. atomar mit) der
/// Mutation aufgerufen, die Nutzlast beschreibt den Zustand davor.
pub trait UndoLog {
    fn record(&mut self, kind: UndoKind, target: EntityId, payload: UndoPayload);
}

/// Einfacher Undo-Manager mit maximaler Tiefe.
#[derive(Default)]
pub struct EditHistory {
    undo_stack: Vec<UndoAction>,
    max_depth: usize,
}

impl EditHistory {
    /// Erstellt einen neuen History-Manager mit maximaler Tiefe.
    pub fn new_with_capacity(max_depth: usize) -> Self {
        Self {
            undo_stack: Vec::with_capacity(max_depth.min(1024)),
            max_depth: max_depth.max(1),
        }
    }

    /// Prüft ob Undo möglich ist.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.undo_stack.is_empty()
    }

    /// Read-only Sicht auf alle Einträge (älteste zuerst).
    pub fn actions(&self) -> &[UndoAction] {
        &self.undo_stack
    }

    /// Anzahl der Einträge einer Art.
    pub fn count_of(&self, kind: UndoKind) -> usize {
        self.undo_stack.iter().filter(|a| a.kind == kind).count()
    }

    /// Entnimmt die jüngste Aktion (Aufrufer wendet sie an).
    pub fn pop_undo(&mut self) -> Option<UndoAction> {
        self.undo_stack.pop()
    }
}

impl UndoLog for EditHistory {
    fn record(&mut self, kind: UndoKind, target: EntityId, payload: UndoPayload) {
        if self.undo_stack.len() >= self.max_depth {
            self.undo_stack.remove(0);
        }
        log::debug!("Undo aufgezeichnet: {:?} für {}", kind, target);
        self.undo_stack.push(UndoAction {
            kind,
            target,
            payload,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Transform;

    fn move_payload(x: f32) -> UndoPayload {
        UndoPayload::Transform {
            before: Transform::from_position(glam::Vec3::new(x, 0.0, 0.0)),
        }
    }

    #[test]
    fn empty_history_cannot_undo() {
        let history = EditHistory::new_with_capacity(10);
        assert!(!history.can_undo());
        assert!(history.is_empty());
    }

    #[test]
    fn record_enables_undo() {
        let mut history = EditHistory::new_with_capacity(10);
        history.record(UndoKind::Move, EntityId(1), move_payload(0.0));
        assert!(history.can_undo());
        assert_eq!(history.count_of(UndoKind::Move), 1);
    }

    #[test]
    fn pop_returns_newest_first() {
        let mut history = EditHistory::new_with_capacity(10);
        history.record(UndoKind::Move, EntityId(1), move_payload(1.0));
        history.record(UndoKind::Elevate, EntityId(2), move_payload(2.0));

        let newest = history.pop_undo().expect("undo vorhanden");
        assert_eq!(newest.kind, UndoKind::Elevate);
        assert_eq!(newest.target, EntityId(2));
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn respects_max_depth() {
        let mut history = EditHistory::new_with_capacity(3);

        for i in 1..=5 {
            history.record(UndoKind::Move, EntityId(i), move_payload(i as f32));
        }

        // Nur 3 Undo-Schritte sollten möglich sein, die ältesten sind verworfen
        assert_eq!(history.len(), 3);
        assert_eq!(history.actions()[0].target, EntityId(3));
    }

    #[test]
    fn pop_undo_on_empty_returns_none() {
        let mut history = EditHistory::new_with_capacity(10);
        assert!(history.pop_undo().is_none());
    }
}
