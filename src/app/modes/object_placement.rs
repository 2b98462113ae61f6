//! Objekt-Platzierung: schwebendes Objekt folgt dem Zeiger bis zur
//! Bestätigung oder zum Abbruch.

use super::{ModeContext, ModeId, ModeRequest};
use crate::app::placement::{lifecycle, PlacementSession};
use crate::core::EntityId;

/// Modus für genau eine aktive Platzierungs-Session.
#[derive(Debug, Default)]
pub struct ObjectPlacementMode {
    session: Option<PlacementSession>,
    entity: Option<EntityId>,
}

impl ObjectPlacementMode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> Option<&PlacementSession> {
        self.session.as_ref()
    }

    /// Aktuell schwebende Entity
    pub fn entity(&self) -> Option<EntityId> {
        self.entity
    }

    pub fn is_busy(&self) -> bool {
        self.entity.is_some()
    }

    /// Hinterlegt die Session für das nächste `enter`.
    pub fn set_session(&mut self, session: PlacementSession) {
        self.session = Some(session);
    }

    pub fn set_continuous(&mut self, enabled: bool) {
        match self.session.as_mut() {
            Some(session) => session.continuous = enabled,
            None => log::debug!("Objekt-Platzierung: keine Session für Dauer-Modus"),
        }
    }

    /// Ersetzt die laufende Session, ohne den Modus zu verlassen.
    pub fn restart(&mut self, ctx: &mut ModeContext<'_>, session: PlacementSession) {
        if let Some(entity) = self.entity.take() {
            lifecycle::cancel_placement(ctx, entity);
        }
        self.session = Some(session);
        self.entity = lifecycle::spawn_for_session(ctx, &session);
    }

    pub fn enter(&mut self, ctx: &mut ModeContext<'_>) {
        match self.session {
            Some(session) => self.entity = lifecycle::spawn_for_session(ctx, &session),
            None => log::warn!("Objekt-Platzierung ohne Session betreten"),
        }
    }

    pub fn exit(&mut self, ctx: &mut ModeContext<'_>) {
        if let Some(entity) = self.entity.take() {
            lifecycle::cancel_placement(ctx, entity);
        }
        self.session = None;
    }

    pub fn tick(&mut self, ctx: &mut ModeContext<'_>) -> ModeRequest {
        let (Some(session), Some(entity)) = (self.session, self.entity) else {
            return ModeRequest::Change(ModeId::Idle);
        };
        if !ctx.world.exists(entity) {
            log::warn!("Objekt-Platzierung: {} wurde extern entfernt", entity);
            self.entity = None;
            self.session = None;
            return ModeRequest::Change(ModeId::Idle);
        }

        lifecycle::follow_pointer(ctx, entity);

        if ctx.input.cancel {
            lifecycle::cancel_placement(ctx, entity);
            self.entity = None;
            self.session = None;
            return ModeRequest::Change(ModeId::Idle);
        }

        if !ctx.input.confirm || ctx.world.is_pointer_over_ui() {
            return ModeRequest::Stay;
        }

        lifecycle::place(ctx, entity);
        self.entity = None;

        if session.continuous && !ctx.world.respawns_on_place(entity) {
            let next = session.continued_from(entity);
            self.session = Some(next);
            self.entity = lifecycle::spawn_for_session(ctx, &next);
            if self.entity.is_some() {
                return ModeRequest::Stay;
            }
        }

        self.session = None;
        match ctx.world.entity_type(entity) {
            Some(entity_type) => ModeRequest::IdleFor(entity_type),
            None => ModeRequest::Change(ModeId::Idle),
        }
    }
}
