//! Terrain-Splatmap: mehrlagige Gewichtskarten auf einem Zell-Raster.

use glam::{Vec2, Vec3};

/// Minimales Begrenzungsrechteck berührter Zellen (inklusive Grenzen).
///
/// Startet invertiert (leer) und wächst mit jeder `include`-Koordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirtyRect {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl Default for DirtyRect {
    fn default() -> Self {
        Self::empty()
    }
}

impl DirtyRect {
    /// Invertierte (leere) Ausdehnung.
    pub fn empty() -> Self {
        Self {
            min_x: i32::MAX,
            min_y: i32::MAX,
            max_x: i32::MIN,
            max_y: i32::MIN,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    /// Erweitert das Rechteck um eine Zelle.
    pub fn include(&mut self, x: i32, y: i32) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }
}

/// Gewichtskarten aller Terrain-Layer.
///
/// Invariante: an jeder Zelle summieren sich die Gewichte aller Layer zu 1.
#[derive(Debug, Clone, PartialEq)]
pub struct SplatMap {
    width: usize,
    height: usize,
    /// Ein Buffer pro Layer, zeilenweise (`y * width + x`)
    layers: Vec<Vec<f32>>,
    /// Weltposition (XZ) der Zelle (0, 0)
    origin: Vec2,
    /// Zellen pro Welteinheit je Achse
    cells_per_unit: Vec2,
}

impl SplatMap {
    /// Erstellt eine Karte, die vollständig auf Layer 0 gewichtet ist.
    pub fn new(width: usize, height: usize, layer_count: usize) -> Self {
        let layer_count = layer_count.max(1);
        let cells = width * height;
        let mut layers = vec![vec![0.0; cells]; layer_count];
        layers[0].fill(1.0);
        Self {
            width,
            height,
            layers,
            origin: Vec2::ZERO,
            cells_per_unit: Vec2::ONE,
        }
    }

    /// Setzt die Abbildung Welt-XZ → Raster.
    pub fn with_mapping(mut self, origin: Vec2, cells_per_unit: Vec2) -> Self {
        self.origin = origin;
        self.cells_per_unit = cells_per_unit;
        self
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Rechnet einen Weltpunkt in (kontinuierliche) Raster-Koordinaten um.
    pub fn world_to_grid(&self, point: Vec3) -> Vec2 {
        Vec2::new(
            (point.x - self.origin.x) * self.cells_per_unit.x,
            (point.z - self.origin.y) * self.cells_per_unit.y,
        )
    }

    /// Linearer Buffer-Index einer Zelle, `None` außerhalb des Rasters.
    pub fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        (x < self.width && y < self.height).then_some(y * self.width + x)
    }

    pub fn weight(&self, layer: usize, x: i32, y: i32) -> Option<f32> {
        let index = self.index(x, y)?;
        self.layers.get(layer).map(|buffer| buffer[index])
    }

    /// Gewichte aller Layer an einer Zelle.
    pub fn cell_weights(&self, x: i32, y: i32) -> Option<Vec<f32>> {
        let index = self.index(x, y)?;
        Some(self.layers.iter().map(|buffer| buffer[index]).collect())
    }

    pub fn layers(&self) -> &[Vec<f32>] {
        &self.layers
    }

    pub fn layers_mut(&mut self) -> &mut [Vec<f32>] {
        &mut self.layers
    }

    /// Vollständige Kopie aller Layer-Buffer.
    pub fn snapshot_layers(&self) -> Vec<Vec<f32>> {
        self.layers.clone()
    }

    /// Stellt den Bereich `rect` aller Layer aus `source` wieder her.
    ///
    /// Gibt `false` zurück, wenn `source` nicht zum Raster passt.
    pub fn restore_region(&mut self, source: &[Vec<f32>], rect: DirtyRect) -> bool {
        let cells = self.width * self.height;
        if source.len() != self.layers.len() || source.iter().any(|b| b.len() != cells) {
            log::warn!("Splatmap-Restore: Snapshot passt nicht zum Raster");
            return false;
        }
        if rect.is_empty() {
            return true;
        }
        let min_x = rect.min_x.max(0);
        let min_y = rect.min_y.max(0);
        let max_x = rect.max_x.min(self.width as i32 - 1);
        let max_y = rect.max_y.min(self.height as i32 - 1);
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let Some(index) = self.index(x, y) else {
                    continue;
                };
                for (layer, buffer) in self.layers.iter_mut().enumerate() {
                    buffer[index] = source[layer][index];
                }
            }
        }
        true
    }
}
