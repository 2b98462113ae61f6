//! Pro Tick abgetastete Eingabe-Signale.
//!
//! Die Eingabeschicht erzeugt genau ein `InputSignals` pro Tick; alle Modi
//! sehen im selben Tick dieselben Werte.

use glam::{Vec2, Vec3};

/// Kontinuierliche Tastatur-Bearbeitung mit Start- und Stop-Flanke.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EditSignal<T> {
    /// Taste in diesem Tick gedrückt
    pub started: bool,
    /// Richtung/Stärke in diesem Tick (0 = keine Änderung)
    pub amount: T,
    /// Taste in diesem Tick losgelassen
    pub stopped: bool,
}

impl<T: Default> EditSignal<T> {
    /// Start-Flanke mit erstem Betrag.
    pub fn start(amount: T) -> Self {
        Self {
            started: true,
            amount,
            stopped: false,
        }
    }

    /// Gehaltene Taste ohne Flanke.
    pub fn hold(amount: T) -> Self {
        Self {
            started: false,
            amount,
            stopped: false,
        }
    }

    /// Stop-Flanke ohne weitere Änderung.
    pub fn stop() -> Self {
        Self {
            started: false,
            amount: T::default(),
            stopped: true,
        }
    }
}

/// Eingabe eines Ticks
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSignals {
    /// Primärtaste in diesem Tick gedrückt (Flanke)
    pub confirm: bool,
    /// Primärtaste wird gehalten
    pub primary_held: bool,
    /// Primärtaste in diesem Tick losgelassen (Flanke)
    pub primary_released: bool,
    /// Abbrechen (Escape / Rechtsklick)
    pub cancel: bool,
    /// Zeiger hat sich seit dem letzten Tick bewegt
    pub pointer_moved: bool,
    /// Verschieben auf der XZ-Ebene
    pub nudge: EditSignal<Vec2>,
    /// Anheben/Absenken
    pub elevate: EditSignal<f32>,
    /// Drehen um die Hochachse
    pub rotate: EditSignal<f32>,
    /// Skalieren je Achse
    pub scale: EditSignal<Vec3>,
    /// Dauer des Ticks in Sekunden
    pub delta_time: f32,
}

impl InputSignals {
    /// Tick ohne Eingabe.
    pub fn idle(delta_time: f32) -> Self {
        Self {
            delta_time,
            ..Self::default()
        }
    }

    /// Primärtaste gedrückt (Klick-Beginn).
    pub fn press(delta_time: f32) -> Self {
        Self {
            confirm: true,
            primary_held: true,
            ..Self::idle(delta_time)
        }
    }

    /// Primärtaste gehalten, optional mit Zeigerbewegung.
    pub fn hold(delta_time: f32, pointer_moved: bool) -> Self {
        Self {
            primary_held: true,
            pointer_moved,
            ..Self::idle(delta_time)
        }
    }

    /// Primärtaste losgelassen.
    pub fn release(delta_time: f32) -> Self {
        Self {
            primary_released: true,
            ..Self::idle(delta_time)
        }
    }

    /// Abbrechen gedrückt.
    pub fn cancel(delta_time: f32) -> Self {
        Self {
            cancel: true,
            ..Self::idle(delta_time)
        }
    }
}
