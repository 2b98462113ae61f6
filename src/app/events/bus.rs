//! Event-Bus mit expliziten Abonnements.
//!
//! Jeder Abonnent besitzt eine eigene Queue, die er selbst leert. Die
//! Lebensdauer eines Abonnements endet mit `unsubscribe`; danach werden
//! keine Events mehr für ihn gepuffert.

use super::EditorEvent;
use indexmap::IndexMap;
use std::collections::VecDeque;

/// Obergrenze gepufferter Events pro Abonnent.
const MAX_QUEUED_EVENTS: usize = 1024;

/// Handle eines Abonnements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

/// Verteilt `EditorEvent`s an alle aktiven Abonnenten.
#[derive(Default)]
pub struct EventBus {
    subscribers: IndexMap<SubscriberId, VecDeque<EditorEvent>>,
    next_id: u64,
    published: u64,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registriert einen Abonnenten. Er sieht nur Events ab jetzt.
    pub fn subscribe(&mut self) -> SubscriberId {
        let id = SubscriberId(self.next_id);
        self.next_id += 1;
        self.subscribers.insert(id, VecDeque::new());
        id
    }

    /// Beendet ein Abonnement und verwirft seine Queue.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        self.subscribers.shift_remove(&id).is_some()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Anzahl aller jemals veröffentlichten Events.
    pub fn published_count(&self) -> u64 {
        self.published
    }

    /// Veröffentlicht ein Event an alle Abonnenten.
    pub fn publish(&mut self, event: EditorEvent) {
        self.published += 1;
        for queue in self.subscribers.values_mut() {
            if queue.len() >= MAX_QUEUED_EVENTS {
                queue.pop_front();
            }
            queue.push_back(event.clone());
        }
    }

    /// Entnimmt alle gepufferten Events eines Abonnenten.
    pub fn drain(&mut self, id: SubscriberId) -> Vec<EditorEvent> {
        self.subscribers
            .get_mut(&id)
            .map(|queue| queue.drain(..).collect())
            .unwrap_or_default()
    }
}
