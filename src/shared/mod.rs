//! Geteilte Typen für layer-übergreifende Verträge.
//!
//! Enthält Optionen und Cursor-Zustand, die zwischen Interaktions-Kern
//! und Präsentationsschicht geteilt werden.

mod cursor;
pub mod options;

pub use cursor::{Axis, CursorKind, CursorState};
pub use options::EditorOptions;
