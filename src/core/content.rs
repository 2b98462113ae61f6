//! Inhalts-Katalog: platzierbare Definitionen, Kategorien und Textur-Layer.

use super::EntityType;
use indexmap::IndexMap;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// ID einer platzierbaren Inhalts-Definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentId(pub u32);

/// ID einer Inhalts-Kategorie
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryId(pub u32);

/// Beschreibung eines spawnbaren Inhalts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentDefinition {
    pub id: ContentId,
    pub name: String,
    pub entity_type: EntityType,
    /// Stapelt sich beim Platzieren auf darunterliegende Objekte
    pub auto_elevate: bool,
    /// Objekt erzeugt nach dem Platzieren selbst ein Folgeobjekt
    pub respawn_on_place: bool,
}

impl ContentDefinition {
    /// Erstellt eine Definition ohne Sonderverhalten.
    pub fn new(id: u32, name: &str, entity_type: EntityType) -> Self {
        Self {
            id: ContentId(id),
            name: name.to_string(),
            entity_type,
            auto_elevate: false,
            respawn_on_place: false,
        }
    }

    pub fn with_auto_elevate(mut self) -> Self {
        self.auto_elevate = true;
        self
    }

    pub fn with_respawn_on_place(mut self) -> Self {
        self.respawn_on_place = true;
        self
    }
}

/// Ticket einer asynchronen Layer-Auflösung.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerTicket(pub u64);

/// Zustand einer Layer-Auflösung beim Pollen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerResolution {
    /// Noch nicht aufgelöst
    Pending,
    /// Layer-Index ist bekannt
    Ready(usize),
    /// Adresse unbekannt oder Ticket ungültig
    Failed,
}

/// Höchstzahl offener Layer-Anfragen; darüber fällt die älteste weg.
pub const MAX_PENDING_LAYERS: usize = 64;

struct PendingLayer {
    address: String,
    remaining_polls: u32,
}

/// In-Memory-Katalog für Definitionen, Kategorien und Textur-Adressen.
///
/// Die Layer-Auflösung simuliert Ladezeit: ein Ticket ist erst nach
/// `layer_latency` Polls bereit.
pub struct ContentCatalog {
    items: IndexMap<ContentId, ContentDefinition>,
    categories: IndexMap<CategoryId, Vec<ContentId>>,
    layers: IndexMap<String, usize>,
    pending: IndexMap<LayerTicket, PendingLayer>,
    layer_latency: u32,
    next_ticket: u64,
    rng: StdRng,
}

impl Default for ContentCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentCatalog {
    /// Erstellt einen leeren Katalog mit festem Seed.
    pub fn new() -> Self {
        Self::with_seed(0x5eed)
    }

    /// Erstellt einen leeren Katalog mit eigenem Seed für Kategorie-Auswahl.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            items: IndexMap::new(),
            categories: IndexMap::new(),
            layers: IndexMap::new(),
            pending: IndexMap::new(),
            layer_latency: 0,
            next_ticket: 1,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Registriert eine Definition (ersetzt gleiche ID).
    pub fn add_item(&mut self, definition: ContentDefinition) {
        self.items.insert(definition.id, definition);
    }

    /// Registriert eine Kategorie mit ihren Einträgen.
    pub fn add_category(&mut self, id: CategoryId, items: Vec<ContentId>) {
        self.categories.insert(id, items);
    }

    /// Registriert eine Textur-Adresse für einen Splat-Layer.
    pub fn add_layer(&mut self, address: &str, index: usize) {
        self.layers.insert(address.to_string(), index);
    }

    /// Anzahl Polls, bis eine Layer-Anfrage bereit ist.
    pub fn set_layer_latency(&mut self, polls: u32) {
        self.layer_latency = polls;
    }

    pub fn item(&self, id: ContentId) -> Option<&ContentDefinition> {
        self.items.get(&id)
    }

    /// Anzahl auflösbarer Einträge einer Kategorie.
    pub fn category_size(&self, id: CategoryId) -> usize {
        self.categories.get(&id).map_or(0, |items| {
            items.iter().filter(|i| self.items.contains_key(*i)).count()
        })
    }

    /// Wählt zufällig eine Definition aus der Kategorie.
    pub fn pick_from_category(&mut self, id: CategoryId) -> Option<ContentDefinition> {
        let candidates: Vec<ContentId> = self
            .categories
            .get(&id)?
            .iter()
            .copied()
            .filter(|i| self.items.contains_key(i))
            .collect();
        let chosen = candidates.choose(&mut self.rng)?;
        self.items.get(chosen).cloned()
    }

    /// Startet die Auflösung einer Textur-Adresse.
    pub fn request_layer(&mut self, address: &str) -> LayerTicket {
        let ticket = LayerTicket(self.next_ticket);
        self.next_ticket += 1;
        if self.pending.len() >= MAX_PENDING_LAYERS {
            if let Some((dropped, stale)) = self.pending.shift_remove_index(0) {
                log::debug!(
                    "Layer-Anfrage {:?} ({}) verworfen, zu viele offene Anfragen",
                    dropped,
                    stale.address
                );
            }
        }
        self.pending.insert(
            ticket,
            PendingLayer {
                address: address.to_string(),
                remaining_polls: self.layer_latency,
            },
        );
        ticket
    }

    /// Pollt eine laufende Auflösung.
    ///
    /// Sobald das Ergebnis feststeht (`Ready` oder `Failed`), ist das Ticket
    /// verbraucht; weitere Polls liefern `Failed`.
    pub fn poll_layer(&mut self, ticket: LayerTicket) -> LayerResolution {
        let Some(pending) = self.pending.get_mut(&ticket) else {
            return LayerResolution::Failed;
        };
        if pending.remaining_polls > 0 {
            pending.remaining_polls -= 1;
            return LayerResolution::Pending;
        }
        let Some(done) = self.pending.shift_remove(&ticket) else {
            return LayerResolution::Failed;
        };
        match self.layers.get(&done.address) {
            Some(&index) => LayerResolution::Ready(index),
            None => LayerResolution::Failed,
        }
    }

    /// Anzahl noch offener Layer-Anfragen.
    pub fn pending_layers(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> ContentCatalog {
        let mut catalog = ContentCatalog::new();
        catalog.add_item(ContentDefinition::new(1, "Kiste", EntityType::Object));
        catalog.add_item(ContentDefinition::new(2, "Fass", EntityType::Object));
        catalog.add_category(
            CategoryId(10),
            vec![ContentId(1), ContentId(2), ContentId(99)],
        );
        catalog.add_layer("terrain/grass", 1);
        catalog
    }

    #[test]
    fn category_pick_only_returns_known_items() {
        let mut catalog = catalog();
        assert_eq!(catalog.category_size(CategoryId(10)), 2);
        for _ in 0..20 {
            let def = catalog
                .pick_from_category(CategoryId(10))
                .expect("Kategorie hat Inhalte");
            assert!(def.id == ContentId(1) || def.id == ContentId(2));
        }
    }

    #[test]
    fn unknown_category_yields_none() {
        let mut catalog = catalog();
        assert!(catalog.pick_from_category(CategoryId(77)).is_none());
        assert_eq!(catalog.category_size(CategoryId(77)), 0);
    }

    #[test]
    fn layer_resolution_waits_for_latency() {
        let mut catalog = catalog();
        catalog.set_layer_latency(2);
        let ticket = catalog.request_layer("terrain/grass");
        assert_eq!(catalog.poll_layer(ticket), LayerResolution::Pending);
        assert_eq!(catalog.poll_layer(ticket), LayerResolution::Pending);
        assert_eq!(catalog.poll_layer(ticket), LayerResolution::Ready(1));
        assert_eq!(catalog.pending_layers(), 0);
        assert_eq!(catalog.poll_layer(ticket), LayerResolution::Failed);
    }

    #[test]
    fn resolved_and_failed_tickets_are_released() {
        let mut catalog = catalog();
        for _ in 0..1000 {
            let ticket = catalog.request_layer("terrain/grass");
            assert_eq!(catalog.poll_layer(ticket), LayerResolution::Ready(1));
            let ticket = catalog.request_layer("terrain/lava");
            assert_eq!(catalog.poll_layer(ticket), LayerResolution::Failed);
        }
        assert_eq!(catalog.pending_layers(), 0);
    }

    #[test]
    fn abandoned_requests_are_capped() {
        let mut catalog = catalog();
        catalog.set_layer_latency(1);
        let first = catalog.request_layer("terrain/grass");
        let last = (0..MAX_PENDING_LAYERS * 3)
            .map(|_| catalog.request_layer("terrain/grass"))
            .last()
            .expect("Anfragen gestellt");
        assert_eq!(catalog.pending_layers(), MAX_PENDING_LAYERS);
        assert_eq!(catalog.poll_layer(first), LayerResolution::Failed);
        assert_eq!(catalog.poll_layer(last), LayerResolution::Pending);
        assert_eq!(catalog.poll_layer(last), LayerResolution::Ready(1));
    }

    #[test]
    fn unknown_address_fails() {
        let mut catalog = catalog();
        let ticket = catalog.request_layer("terrain/lava");
        assert_eq!(catalog.poll_layer(ticket), LayerResolution::Failed);
        assert_eq!(
            catalog.poll_layer(LayerTicket(999)),
            LayerResolution::Failed
        );
    }
}
