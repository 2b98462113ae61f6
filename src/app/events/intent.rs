use super::super::modes::ModeId;
use super::super::placement::PlacementSource;
use super::super::tools::BrushSettings;
use crate::core::ContentId;

/// App-Intents aus der UI (Buttons, Slider, Menü).
///
/// Intents sind Eingaben ohne eigene Mutationslogik; der Controller wendet
/// sie vor dem Tick desselben Frames auf den Editor-Zustand an.
#[derive(Debug, Clone, PartialEq)]
pub enum AppIntent {
    /// Spawn-Button: Objekt-Platzierung starten
    StartPlacementRequested {
        source: PlacementSource,
        continuous: bool,
    },
    /// Kontinuierliche Platzierung in der laufenden Session umschalten
    ContinuousPlacementToggled { enabled: bool },
    /// Neue Spline aus einer Definition zeichnen
    StartSplineRequested { definition: ContentId },
    /// "Punkt hinzufügen"-Button an der selektierten Spline
    AddSplineHandleRequested,
    /// Terrain-Mal-Modus mit Textur-Adresse starten
    TerrainPaintRequested { layer_address: String },
    /// Mal-Layer im laufenden Terrain-Modus wechseln
    PaintLayerChanged { layer_address: String },
    /// Pinsel-Slider geändert
    BrushSettingsChanged { settings: BrushSettings },
    /// Direkter Moduswechsel (Menü/Toolbar)
    ChangeModeRequested { mode: ModeId },
    /// Letzte Aktion rückgängig machen
    UndoRequested,
}
