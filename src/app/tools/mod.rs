//! Werkzeuge der Interaktions-Modi: Terrain-Pinsel, Drag-Timer und
//! kontinuierliche Tastatur-Bearbeitung.

/// Terrain-Pinsel mit Undo-Snapshot je Strich.
pub mod brush;
/// Tastatur-Bearbeitung mit Start/Stop-Paaren.
pub mod continuous_edit;
mod drag;

pub use brush::{blend_cell, BrushEngine, BrushSettings};
pub use continuous_edit::{ContinuousEdit, EditChannel};
pub use drag::DragTimer;
