//! Platzierungs-Sessions und das Lebenszyklus-Protokoll schwebender Entities.

pub mod lifecycle;
mod session;

pub use session::{PlacementSession, PlacementSource, SplineSession, SplineTarget};
