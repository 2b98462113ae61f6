//! Entity-Handles, Entity-Typen und Transformationen der Szene.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Handle auf ein Objekt in der Arena des Welt-Hosts.
///
/// Zerstörte Entities lösen einfach nicht mehr auf; Modi und Selektion
/// halten nie Besitz, nur diese ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Kategorie eines editierbaren Objekts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityType {
    /// Freies Objekt (Prop, Gebäude, Deko)
    Object,
    /// Spline-/Rampen-Körper
    Spline,
    /// Kontrollpunkt einer Spline
    SplineHandle,
}

impl EntityType {
    /// Alle bekannten Typen
    pub const ALL: [EntityType; 3] = [
        EntityType::Object,
        EntityType::Spline,
        EntityType::SplineHandle,
    ];

    fn bit(self) -> u8 {
        match self {
            EntityType::Object => 1,
            EntityType::Spline => 1 << 1,
            EntityType::SplineHandle => 1 << 2,
        }
    }
}

/// Menge von Entity-Typen (Bitmaske über `EntityType`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TypeSet(u8);

impl TypeSet {
    /// Leere Menge
    pub const EMPTY: TypeSet = TypeSet(0);

    /// Universelle Menge aller Typen.
    pub fn all() -> Self {
        Self::of(&EntityType::ALL)
    }

    /// Menge aus einer Typ-Liste.
    pub fn of(types: &[EntityType]) -> Self {
        Self(types.iter().fold(0, |acc, t| acc | t.bit()))
    }

    /// Prüft ob der Typ enthalten ist.
    pub fn contains(self, entity_type: EntityType) -> bool {
        self.0 & entity_type.bit() != 0
    }

    /// Komplement innerhalb der universellen Menge.
    pub fn complement(self) -> Self {
        Self(Self::all().0 & !self.0)
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// `true` wenn die Menge alle Typen enthält.
    pub fn is_universal(self) -> bool {
        self == Self::all()
    }
}

/// Raycast-Layer eines Scene-Objekts (Bitmaske).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LayerMask(pub u32);

impl LayerMask {
    /// Normale, raycastbare Objekte
    pub const DEFAULT: LayerMask = LayerMask(1);
    /// Objekte im Platzierungsmodus (für Raycasts unsichtbar)
    pub const IGNORE_RAYCAST: LayerMask = LayerMask(1 << 1);
    /// Greifbare Unterkomponenten (Spline-Kontrollpunkte)
    pub const HANDLES: LayerMask = LayerMask(1 << 2);

    /// Alles, was ein Editor-Klick treffen darf.
    pub fn pickable() -> Self {
        Self(Self::DEFAULT.0 | Self::HANDLES.0)
    }

    pub fn intersects(self, other: LayerMask) -> bool {
        self.0 & other.0 != 0
    }
}

/// Lage eines Objekts in der Welt
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Identitäts-Transformation an einer Position.
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complement_of_objects_contains_spline_types() {
        let objects = TypeSet::of(&[EntityType::Object]);
        let rest = objects.complement();
        assert!(!rest.contains(EntityType::Object));
        assert!(rest.contains(EntityType::Spline));
        assert!(rest.contains(EntityType::SplineHandle));
    }

    #[test]
    fn universal_set_has_empty_complement() {
        assert!(TypeSet::all().is_universal());
        assert!(TypeSet::all().complement().is_empty());
    }

    #[test]
    fn pickable_mask_excludes_placement_layer() {
        assert!(LayerMask::pickable().intersects(LayerMask::DEFAULT));
        assert!(LayerMask::pickable().intersects(LayerMask::HANDLES));
        assert!(!LayerMask::pickable().intersects(LayerMask::IGNORE_RAYCAST));
    }
}
