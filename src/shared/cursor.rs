//! Cursor-Zustand, den die Modi für die Präsentationsschicht anfordern.

/// Achse für Skalierungs-Cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Angeforderte Cursor-Darstellung
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorKind {
    #[default]
    Default,
    /// Über einem selektierbaren Objekt
    Select,
    /// Objekt wird verschoben oder folgt dem Zeiger
    Move,
    /// Über einem Objekt, das der aktive Modus nicht bearbeiten darf
    Denied,
    /// Wartet auf asynchrone Auflösung
    Wait,
    /// Terrain-Pinsel bereit
    Paint,
    /// Skalierung entlang einer Achse
    ScaleAxis(Axis),
}

/// Aktueller Cursor
#[derive(Debug, Clone, Default)]
pub struct CursorState {
    current: CursorKind,
}

impl CursorState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> CursorKind {
        self.current
    }

    /// Setzt den Cursor. Gibt `true` zurück, wenn er sich geändert hat.
    pub fn set(&mut self, kind: CursorKind) -> bool {
        if self.current == kind {
            return false;
        }
        self.current = kind;
        true
    }
}
