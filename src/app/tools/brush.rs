//! Terrain-Pinsel: Intensitäts-Abfall, Layer-Blending und Strich-Verwaltung.
//!
//! Ein Strich besteht aus Drücken (Snapshot aller Layer, leeres
//! Dirty-Rect), beliebig vielen `paint_at`-Aufrufen beim Ziehen und dem
//! Loslassen. Nur Striche, die mindestens eine Zelle verändert haben,
//! liefern einen `PaintUndoSnapshot`.

use crate::core::{DirtyRect, PaintUndoSnapshot, SplatMap};
use crate::shared::options::{
    BRUSH_OPACITY, BRUSH_RADIUS, BRUSH_RADIUS_MAX, BRUSH_RADIUS_MIN, BRUSH_SMOOTHNESS,
};
use crate::shared::EditorOptions;
use glam::{IVec2, Vec2};

/// Toleranz für Gewichtsvergleiche.
const WEIGHT_EPSILON: f32 = 1e-6;

/// Pinsel-Parameter in Raster-Zellen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrushSettings {
    /// Radius in Zellen
    pub radius: f32,
    /// Anteil des Radius mit weichem Abfall (0 = harte Kante)
    pub smoothness: f32,
    /// Maximale Intensität im Zentrum
    pub opacity: f32,
}

impl Default for BrushSettings {
    fn default() -> Self {
        Self {
            radius: BRUSH_RADIUS,
            smoothness: BRUSH_SMOOTHNESS,
            opacity: BRUSH_OPACITY,
        }
    }
}

impl BrushSettings {
    /// Pinsel aus den Editor-Optionen.
    pub fn from_options(options: &EditorOptions) -> Self {
        Self {
            radius: options.brush_radius,
            smoothness: options.brush_smoothness,
            opacity: options.brush_opacity,
        }
        .clamped()
    }

    /// Begrenzt alle Werte auf ihren gültigen Bereich.
    pub fn clamped(self) -> Self {
        let radius = if self.radius.is_finite() {
            self.radius.clamp(BRUSH_RADIUS_MIN, BRUSH_RADIUS_MAX)
        } else {
            BRUSH_RADIUS
        };
        Self {
            radius,
            smoothness: clamp_unit(self.smoothness),
            opacity: clamp_unit(self.opacity),
        }
    }

    /// Intensität bei gegebenem Abstand zum Pinselzentrum.
    ///
    /// `None` außerhalb des Radius. Innerhalb des harten Kerns
    /// (`(1 - smoothness) * radius`) gilt die volle Deckkraft, danach fällt
    /// sie über `smoothness * radius` linear auf 0 ab.
    pub fn intensity(&self, distance: f32) -> Option<f32> {
        if distance > self.radius {
            return None;
        }
        let hard_core = (1.0 - self.smoothness) * self.radius;
        let smoothed = (distance - hard_core).max(0.0);
        let falloff = self.smoothness * self.radius;
        if falloff <= WEIGHT_EPSILON {
            return Some(self.opacity);
        }
        let t = (smoothed / falloff).clamp(0.0, 1.0);
        Some(lerp(self.opacity, 0.0, t))
    }
}

fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Mischt `intensity` in den aktiven Layer einer Zelle.
///
/// Der aktive Layer wächst nur (`intensity > aktuelles Gewicht`); alle
/// anderen Layer werden so skaliert, dass die Summe 1 bleibt.
/// Gibt `true` zurück, wenn die Zelle verändert wurde.
pub fn blend_cell(layers: &mut [Vec<f32>], index: usize, active: usize, intensity: f32) -> bool {
    let Some(current) = layers.get(active).and_then(|buffer| buffer.get(index)).copied() else {
        return false;
    };
    if intensity <= current + WEIGHT_EPSILON {
        return false;
    }
    let remaining = 1.0 - current;
    if remaining <= WEIGHT_EPSILON {
        return false;
    }
    let scale = (1.0 - intensity) / remaining;
    for (layer, buffer) in layers.iter_mut().enumerate() {
        let Some(weight) = buffer.get_mut(index) else {
            continue;
        };
        if layer == active {
            *weight = intensity;
        } else {
            *weight *= scale;
        }
    }
    true
}

/// Laufender Strich
#[derive(Debug, Clone)]
struct Stroke {
    pre_paint: Vec<Vec<f32>>,
    dirty_rect: DirtyRect,
    last_cell: IVec2,
}

/// Pinsel-Engine des Terrain-Mal-Modus.
#[derive(Debug, Clone, Default)]
pub struct BrushEngine {
    settings: BrushSettings,
    stroke: Option<Stroke>,
}

impl BrushEngine {
    pub fn new(settings: BrushSettings) -> Self {
        Self {
            settings: settings.clamped(),
            stroke: None,
        }
    }

    pub fn settings(&self) -> BrushSettings {
        self.settings
    }

    /// Übernimmt neue Pinsel-Parameter (geklemmt). Wirkt auch mitten im Strich.
    pub fn set_settings(&mut self, settings: BrushSettings) {
        self.settings = settings.clamped();
    }

    pub fn stroke_active(&self) -> bool {
        self.stroke.is_some()
    }

    /// Bisher berührte Zellen des laufenden Strichs.
    pub fn dirty_rect(&self) -> Option<DirtyRect> {
        self.stroke.as_ref().map(|s| s.dirty_rect)
    }

    /// Beginnt einen Strich: Snapshot aller Layer, leeres Dirty-Rect.
    ///
    /// Ein noch laufender Strich wird verworfen; der Aufrufer beendet ihn
    /// vorher mit `end_stroke`, wenn er ins Undo-Log soll.
    pub fn begin_stroke(&mut self, map: &SplatMap, center: Vec2) {
        if self.stroke.is_some() {
            log::debug!("Pinsel: laufender Strich wird durch neuen ersetzt");
        }
        self.stroke = Some(Stroke {
            pre_paint: map.snapshot_layers(),
            dirty_rect: DirtyRect::empty(),
            last_cell: cell_of(center),
        });
    }

    /// Malt an `center` (Raster-Koordinaten) in den Layer `layer`.
    ///
    /// Ohne laufenden Strich oder wenn das Zentrum die Zelle nicht
    /// gewechselt hat, passiert nichts. Gibt die Anzahl veränderter Zellen
    /// zurück.
    pub fn paint_at(&mut self, map: &mut SplatMap, center: Vec2, layer: usize) -> usize {
        let settings = self.settings;
        let Some(stroke) = self.stroke.as_mut() else {
            return 0;
        };
        if layer >= map.layer_count() {
            log::warn!(
                "Pinsel: Layer {} existiert nicht ({} Layer)",
                layer,
                map.layer_count()
            );
            return 0;
        }
        let cell = cell_of(center);
        if cell == stroke.last_cell {
            return 0;
        }
        stroke.last_cell = cell;

        // Zellbereich in f32 auf das Raster klemmen, erst dann nach i32
        let Some((min_x, max_x)) = cell_span(center.x, settings.radius, map.width()) else {
            return 0;
        };
        let Some((min_y, max_y)) = cell_span(center.y, settings.radius, map.height()) else {
            return 0;
        };

        let mut changed = 0;
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let distance = Vec2::new(x as f32, y as f32).distance(center);
                let Some(intensity) = settings.intensity(distance) else {
                    continue;
                };
                let Some(index) = map.index(x, y) else {
                    continue;
                };
                if blend_cell(map.layers_mut(), index, layer, intensity) {
                    stroke.dirty_rect.include(x, y);
                    changed += 1;
                }
            }
        }
        changed
    }

    /// Beendet den Strich. Liefert den Undo-Snapshot nur, wenn Zellen
    /// verändert wurden.
    pub fn end_stroke(&mut self) -> Option<PaintUndoSnapshot> {
        let stroke = self.stroke.take()?;
        if stroke.dirty_rect.is_empty() {
            log::debug!("Pinsel: leerer Strich, kein Undo-Eintrag");
            return None;
        }
        Some(PaintUndoSnapshot {
            pre_paint_layer_textures: stroke.pre_paint,
            dirty_rect: stroke.dirty_rect,
        })
    }
}

fn cell_of(center: Vec2) -> IVec2 {
    center.floor().as_ivec2()
}

/// Zellen `[min, max]` einer Achse, die der Pinsel um `center` erreichen kann.
///
/// `None`, wenn der Bereich das Raster nicht schneidet.
fn cell_span(center: f32, radius: f32, len: usize) -> Option<(i32, i32)> {
    if len == 0 || !center.is_finite() {
        return None;
    }
    let last = (len - 1) as f32;
    let min = (center - radius).floor().max(0.0);
    let max = (center + radius).ceil().min(last);
    (min <= max).then_some((min as i32, max as i32))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn brush(radius: f32, smoothness: f32, opacity: f32) -> BrushSettings {
        BrushSettings {
            radius,
            smoothness,
            opacity,
        }
    }

    #[test]
    fn center_is_full_and_edge_is_zero() {
        let settings = brush(20.0, 0.5, 1.0);
        assert_relative_eq!(settings.intensity(0.0).expect("im Radius"), 1.0);
        assert_relative_eq!(settings.intensity(10.0).expect("im Radius"), 1.0);
        assert_relative_eq!(settings.intensity(15.0).expect("im Radius"), 0.5);
        assert_relative_eq!(settings.intensity(20.0).expect("im Radius"), 0.0);
        assert!(settings.intensity(20.01).is_none());
    }

    #[test]
    fn hard_brush_uses_opacity_everywhere() {
        let settings = brush(4.0, 0.0, 0.7);
        assert_relative_eq!(settings.intensity(0.0).expect("im Radius"), 0.7);
        assert_relative_eq!(settings.intensity(4.0).expect("im Radius"), 0.7);
    }

    #[test]
    fn intensity_never_increases_with_distance() {
        let settings = brush(12.0, 0.8, 0.9);
        let mut previous = f32::MAX;
        for step in 0..=120 {
            let value = settings.intensity(step as f32 * 0.1).expect("im Radius");
            assert!(value <= previous + 1e-6);
            previous = value;
        }
    }

    #[test]
    fn clamped_limits_ranges() {
        let settings = brush(0.1, 1.7, -0.3).clamped();
        assert_relative_eq!(settings.radius, BRUSH_RADIUS_MIN);
        assert_relative_eq!(settings.smoothness, 1.0);
        assert_relative_eq!(settings.opacity, 0.0);
    }

    #[test]
    fn clamped_caps_huge_radius() {
        assert_relative_eq!(brush(1e12, 0.5, 1.0).clamped().radius, BRUSH_RADIUS_MAX);
        assert_relative_eq!(brush(f32::INFINITY, 0.5, 1.0).clamped().radius, BRUSH_RADIUS);
    }

    #[test]
    fn huge_radius_paints_whole_map_without_overflow() {
        let mut map = SplatMap::new(8, 8, 2);
        let mut engine = BrushEngine::new(brush(1e12, 0.5, 1.0));
        engine.begin_stroke(&map, Vec2::new(0.5, 0.5));
        assert_eq!(engine.paint_at(&mut map, Vec2::new(4.5, 4.5), 1), 64);
        assert_relative_eq!(map.weight(1, 7, 7).expect("Zelle vorhanden"), 1.0);
        let snapshot = engine.end_stroke().expect("Strich hat Zellen verändert");
        assert!(snapshot.dirty_rect.contains(0, 0));
        assert!(snapshot.dirty_rect.contains(7, 7));
    }

    #[test]
    fn far_off_map_centers_are_ignored() {
        let mut map = SplatMap::new(8, 8, 2);
        let before = map.clone();
        let mut engine = BrushEngine::new(brush(5.0, 0.5, 1.0));
        engine.begin_stroke(&map, Vec2::new(4.5, 4.5));
        for center in [
            Vec2::new(3.0e9, 4.5),
            Vec2::new(-3.0e9, 4.5),
            Vec2::new(4.5, 3.0e9),
            Vec2::new(f32::MAX, f32::MAX),
            Vec2::new(f32::NAN, 4.5),
        ] {
            assert_eq!(engine.paint_at(&mut map, center, 1), 0);
        }
        assert_eq!(map, before);
        assert!(engine.end_stroke().is_none());
    }

    #[test]
    fn cell_span_clamps_to_grid() {
        assert_eq!(cell_span(4.5, 2.0, 8), Some((2, 7)));
        assert_eq!(cell_span(-1.0, 2.0, 8), Some((0, 1)));
        assert_eq!(cell_span(20.0, 2.0, 8), None);
        assert_eq!(cell_span(4.0, 1.0, 0), None);
    }

    #[test]
    fn blend_keeps_sum_and_only_grows_active_layer() {
        let mut layers = vec![vec![0.6], vec![0.3], vec![0.1]];
        assert!(blend_cell(&mut layers, 0, 1, 0.5));
        assert_relative_eq!(layers[1][0], 0.5);
        let sum: f32 = layers.iter().map(|l| l[0]).sum();
        assert_relative_eq!(sum, 1.0, epsilon = 1e-5);
        // Verhältnis der übrigen Layer bleibt erhalten
        assert_relative_eq!(layers[0][0] / layers[2][0], 6.0, epsilon = 1e-4);

        // Geringere Intensität ändert nichts
        assert!(!blend_cell(&mut layers, 0, 1, 0.4));
        assert_relative_eq!(layers[1][0], 0.5);
    }

    #[test]
    fn blend_on_saturated_cell_is_noop() {
        let mut layers = vec![vec![0.0], vec![1.0]];
        assert!(!blend_cell(&mut layers, 0, 1, 1.0));
        assert!(!blend_cell(&mut layers, 3, 1, 1.0));
    }

    #[test]
    fn stroke_paints_and_keeps_weights_normalized() {
        let mut map = SplatMap::new(16, 16, 3);
        let mut engine = BrushEngine::new(brush(3.0, 0.5, 1.0));
        engine.begin_stroke(&map, Vec2::new(2.5, 2.5));
        let changed = engine.paint_at(&mut map, Vec2::new(8.2, 8.2), 2);
        assert!(changed > 0);

        for y in 0..16 {
            for x in 0..16 {
                let weights = map.cell_weights(x, y).expect("Zelle vorhanden");
                let sum: f32 = weights.iter().sum();
                assert_relative_eq!(sum, 1.0, epsilon = 1e-5);
            }
        }
        assert_relative_eq!(map.weight(2, 8, 8).expect("Zelle vorhanden"), 1.0);

        let snapshot = engine.end_stroke().expect("Strich hat Zellen verändert");
        assert!(snapshot.dirty_rect.contains(8, 8));
        assert!(!snapshot.dirty_rect.contains(0, 0));
        assert_eq!(snapshot.pre_paint_layer_textures[0][0], 1.0);
        assert!(!engine.stroke_active());
    }

    #[test]
    fn same_cell_is_not_painted_twice() {
        let mut map = SplatMap::new(8, 8, 2);
        let mut engine = BrushEngine::new(brush(1.0, 0.0, 1.0));
        engine.begin_stroke(&map, Vec2::new(4.2, 4.2));
        assert_eq!(engine.paint_at(&mut map, Vec2::new(4.7, 4.4), 1), 0);
        assert!(engine.end_stroke().is_none());
    }

    #[test]
    fn stroke_outside_map_records_nothing() {
        let mut map = SplatMap::new(8, 8, 2);
        let before = map.clone();
        let mut engine = BrushEngine::new(brush(2.0, 0.5, 1.0));
        engine.begin_stroke(&map, Vec2::new(-50.0, -50.0));
        assert_eq!(engine.paint_at(&mut map, Vec2::new(-40.0, -40.0), 1), 0);
        assert!(engine.end_stroke().is_none());
        assert_eq!(map, before);
    }

    #[test]
    fn paint_without_stroke_is_ignored() {
        let mut map = SplatMap::new(8, 8, 2);
        let mut engine = BrushEngine::default();
        assert_eq!(engine.paint_at(&mut map, Vec2::new(3.0, 3.0), 1), 0);
        assert!(engine.end_stroke().is_none());
    }
}
