use crate::core::{CategoryId, ContentId, EntityId};

/// Woher die zu platzierende Definition kommt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementSource {
    /// Ein festes Katalog-Item
    Item(ContentId),
    /// Zufälliges Item einer Kategorie, bei jedem Spawn neu gezogen
    Category(CategoryId),
}

/// Transienter Zustand einer Objekt-Platzierung.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementSession {
    pub source: PlacementSource,
    /// Nach dem Platzieren sofort ein neues Objekt erzeugen
    pub continuous: bool,
    /// Entity, deren Transform das nächste Spawn übernimmt
    pub cloned_transform_source: Option<EntityId>,
}

impl PlacementSession {
    pub fn new(source: PlacementSource, continuous: bool) -> Self {
        Self {
            source,
            continuous,
            cloned_transform_source: None,
        }
    }

    /// Folge-Session der kontinuierlichen Platzierung.
    pub fn continued_from(&self, placed: EntityId) -> Self {
        Self {
            cloned_transform_source: Some(placed),
            ..*self
        }
    }
}

/// Ziel einer Spline-Platzierung.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplineTarget {
    /// Neue Spline aus einer Definition
    New(ContentId),
    /// Vorhandene Spline um Kontrollpunkte erweitern
    Extend(EntityId),
}

/// Transienter Zustand einer Spline-Platzierung.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplineSession {
    pub target: SplineTarget,
}

impl SplineSession {
    pub fn new_spline(definition: ContentId) -> Self {
        Self {
            target: SplineTarget::New(definition),
        }
    }

    pub fn extend(spline: EntityId) -> Self {
        Self {
            target: SplineTarget::Extend(spline),
        }
    }
}
