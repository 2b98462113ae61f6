//! Application-Layer: Controller, State, Modi, Events und Werkzeuge.

pub mod controller;
pub mod error;
pub mod events;
pub mod history;
pub mod input;
/// Interaktions-Modi und Mode-Machine
pub mod modes;
pub mod placement;
pub mod selection;
/// Editor State
///
/// Dieses Modul hält den Zustand des Interaktions-Kerns (Modi, Selektion, Undo, Events).
pub mod state;
pub mod tools;

pub use controller::AppController;
pub use error::EditorError;
pub use events::{AppIntent, EditorEvent, EventBus, SubscriberId};
pub use history::{EditHistory, UndoLog};
pub use input::{EditSignal, InputSignals};
pub use modes::{InteractionMode, ModeContext, ModeId, ModeMachine, ModeRequest};
pub use placement::{PlacementSession, PlacementSource, SplineSession, SplineTarget};
pub use selection::SelectionRegistry;
pub use state::EditorState;
pub use tools::{BrushEngine, BrushSettings};
