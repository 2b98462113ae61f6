//! Selektions-Registry: höchstens eine aktuell bearbeitete Entity.

use crate::core::EntityId;

/// Hält die eine, global sichtbare "aktuell bearbeitete" Entity.
///
/// Nur `select`, `deselect` und `switch_selection` schreiben `current`.
/// Verstöße gegen die Exklusivität werden geloggt und ignoriert.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionRegistry {
    current: Option<EntityId>,
}

impl SelectionRegistry {
    /// Erstellt eine leere Registry.
    pub fn new() -> Self {
        Self { current: None }
    }

    pub fn current(&self) -> Option<EntityId> {
        self.current
    }

    pub fn is_selected(&self, id: EntityId) -> bool {
        self.current == Some(id)
    }

    /// Selektiert `id`, sofern nichts anderes selektiert ist.
    pub fn select(&mut self, id: EntityId) -> bool {
        match self.current {
            Some(current) if current == id => {
                log::warn!("Selektion: {} ist bereits selektiert", id);
                false
            }
            Some(current) => {
                log::warn!(
                    "Selektion: {} kann nicht selektiert werden, {} ist noch aktiv",
                    id,
                    current
                );
                false
            }
            None => {
                self.current = Some(id);
                true
            }
        }
    }

    /// Hebt die Selektion auf, wenn `caller` die aktuelle Entity ist.
    pub fn deselect(&mut self, caller: EntityId) -> bool {
        match self.current {
            None => {
                log::warn!("Deselektion durch {}: nichts selektiert", caller);
                false
            }
            Some(current) if current != caller => {
                log::warn!(
                    "Deselektion durch {} ignoriert: {} ist selektiert",
                    caller,
                    current
                );
                false
            }
            Some(_) => {
                self.current = None;
                true
            }
        }
    }

    /// Deselektiert die aktuelle Entity (falls vorhanden) und selektiert `id`.
    pub fn switch_selection(&mut self, id: EntityId) -> bool {
        if let Some(current) = self.current {
            if current == id {
                log::debug!("Selektionswechsel: {} ist bereits selektiert", id);
                return false;
            }
            self.deselect(current);
        }
        self.select(id)
    }
}
