//! Typisierte Fehler der Intent-Verarbeitung.

use super::modes::ModeId;
use crate::core::{CategoryId, ContentId};

/// Fehler, die beim Anwenden eines `AppIntent` auftreten können.
///
/// Alle Fälle sind behebbar: der Controller gibt sie zurück, der Host loggt
/// sie und arbeitet mit dem nächsten Frame weiter.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditorError {
    #[error("Unbekannte Inhalts-Definition {0:?}")]
    UnknownContent(ContentId),
    #[error("Kategorie {0:?} enthält keine Einträge")]
    EmptyCategory(CategoryId),
    #[error("Keine Terrain-Splatmap vorhanden")]
    NoTerrain,
    #[error("Modus {0:?} ist nicht registriert")]
    ModeNotRegistered(ModeId),
    #[error("Keine Spline selektiert")]
    NoSplineSelected,
    #[error("Terrain-Mal-Modus ist nicht aktiv")]
    TerrainPaintInactive,
}
