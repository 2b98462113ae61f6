//! Zentrale Konfiguration für den Interaktions-Kern.
//!
//! `EditorOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use serde::{Deserialize, Serialize};

// ── Drag & Tastatur ─────────────────────────────────────────────────

/// Verzögerung (Sekunden), bevor ein gehaltener Klick als Drag gilt.
pub const DRAG_DELAY_SECS: f32 = 0.15;
/// Verschiebe-Geschwindigkeit per Tastatur (Welteinheiten/Sekunde).
pub const NUDGE_SPEED: f32 = 5.0;
/// Höhen-Geschwindigkeit per Tastatur (Welteinheiten/Sekunde).
pub const ELEVATE_SPEED: f32 = 2.0;
/// Dreh-Geschwindigkeit per Tastatur (Grad/Sekunde).
pub const ROTATE_SPEED_DEG: f32 = 90.0;
/// Relative Skalierungsänderung pro Sekunde.
pub const SCALE_SPEED: f32 = 0.5;
/// Kleinste erlaubte Skalierung pro Achse.
pub const MIN_SCALE: f32 = 0.05;

// ── Platzierung ─────────────────────────────────────────────────────

/// Feste Platzierungshöhe für nicht stapelnde Objekte.
pub const PLACEMENT_HEIGHT: f32 = 0.0;

// ── Terrain-Pinsel ──────────────────────────────────────────────────

/// Standard-Pinselradius in Zellen.
pub const BRUSH_RADIUS: f32 = 8.0;
/// Kleinster Pinselradius in Zellen.
pub const BRUSH_RADIUS_MIN: f32 = 0.5;
/// Größter Pinselradius in Zellen.
pub const BRUSH_RADIUS_MAX: f32 = 256.0;
/// Standard-Weichheit des Pinselrands (0 = harte Kante).
pub const BRUSH_SMOOTHNESS: f32 = 0.5;
/// Standard-Deckkraft des Pinsels.
pub const BRUSH_OPACITY: f32 = 1.0;

// ── History ─────────────────────────────────────────────────────────

/// Maximale Anzahl Undo-Einträge.
pub const HISTORY_DEPTH: usize = 200;

// ── Laufzeit-Optionen (serialisierbar) ─────────────────────────────

/// Alle zur Laufzeit änderbaren Editor-Optionen.
/// Wird als `scene_editor_core.toml` neben der Binary gespeichert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorOptions {
    // ── Drag & Tastatur ─────────────────────────────────────────
    /// Drag-Erkennungsverzögerung in Sekunden
    pub drag_delay_secs: f32,
    /// Tastatur-Verschiebung in Welteinheiten/Sekunde
    pub nudge_speed: f32,
    /// Tastatur-Anheben in Welteinheiten/Sekunde
    pub elevate_speed: f32,
    /// Tastatur-Drehung in Grad/Sekunde
    pub rotate_speed_deg: f32,
    /// Tastatur-Skalierung (relativ) pro Sekunde
    #[serde(default = "default_scale_speed")]
    pub scale_speed: f32,

    // ── Platzierung ─────────────────────────────────────────────
    /// Höhe der Platzierungsebene für nicht stapelnde Objekte
    pub placement_height: f32,

    // ── Terrain-Pinsel ──────────────────────────────────────────
    /// Pinselradius in Zellen
    pub brush_radius: f32,
    /// Weichheit des Pinselrands [0, 1]
    pub brush_smoothness: f32,
    /// Deckkraft [0, 1]
    pub brush_opacity: f32,

    // ── History ─────────────────────────────────────────────────
    /// Maximale Undo-Tiefe
    #[serde(default = "default_history_depth")]
    pub history_depth: usize,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            drag_delay_secs: DRAG_DELAY_SECS,
            nudge_speed: NUDGE_SPEED,
            elevate_speed: ELEVATE_SPEED,
            rotate_speed_deg: ROTATE_SPEED_DEG,
            scale_speed: SCALE_SPEED,

            placement_height: PLACEMENT_HEIGHT,

            brush_radius: BRUSH_RADIUS,
            brush_smoothness: BRUSH_SMOOTHNESS,
            brush_opacity: BRUSH_OPACITY,

            history_depth: HISTORY_DEPTH,
        }
    }
}

/// Serde-Default für `scale_speed` (Abwärtskompatibilität bestehender TOML-Dateien).
fn default_scale_speed() -> f32 {
    SCALE_SPEED
}

/// Serde-Default für `history_depth` (Abwärtskompatibilität).
fn default_history_depth() -> usize {
    HISTORY_DEPTH
}

impl EditorOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| std::path::PathBuf::from("scene_editor_core"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join("scene_editor_core.toml")
    }
}
