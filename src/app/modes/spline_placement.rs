//! Spline-Platzierung: jeder bestätigte Klick setzt einen Kontrollpunkt,
//! danach schwebt sofort der nächste.

use super::{ModeContext, ModeId, ModeRequest};
use crate::app::placement::{lifecycle, SplineSession, SplineTarget};
use crate::core::{EntityId, EntityType, Projection, Transform, UndoKind, UndoPayload};

/// Modus zum Zeichnen oder Erweitern einer Spline.
#[derive(Debug, Default)]
pub struct SplinePlacementMode {
    session: Option<SplineSession>,
    spline: Option<EntityId>,
    /// Schwebender Kontrollpunkt
    pending: Option<EntityId>,
    /// In dieser Session platzierte Punkte
    committed: usize,
    /// `Create` der Spline selbst ist bereits im Undo-Log
    spline_recorded: bool,
    /// Unterdrückt genau eine Platzierung im laufenden Tick
    suppress_once: bool,
}

impl SplinePlacementMode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> Option<&SplineSession> {
        self.session.as_ref()
    }

    pub fn spline(&self) -> Option<EntityId> {
        self.spline
    }

    pub fn pending_point(&self) -> Option<EntityId> {
        self.pending
    }

    pub fn committed_points(&self) -> usize {
        self.committed
    }

    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    pub fn set_session(&mut self, session: SplineSession) {
        self.session = Some(session);
    }

    /// Die nächste Bestätigung im selben Tick ignorieren (UI-Button-Klick).
    pub fn suppress_next_placement(&mut self) {
        self.suppress_once = true;
    }

    /// Ersetzt die laufende Session, ohne den Modus zu verlassen.
    pub fn restart(&mut self, ctx: &mut ModeContext<'_>, session: SplineSession) {
        self.abandon(ctx);
        self.session = Some(session);
        self.begin(ctx);
    }

    pub fn enter(&mut self, ctx: &mut ModeContext<'_>) {
        if self.session.is_none() {
            log::warn!("Spline-Platzierung ohne Session betreten");
            return;
        }
        self.begin(ctx);
    }

    pub fn exit(&mut self, ctx: &mut ModeContext<'_>) {
        self.abandon(ctx);
        self.session = None;
        self.suppress_once = false;
    }

    pub fn tick(&mut self, ctx: &mut ModeContext<'_>) -> ModeRequest {
        let request = self.tick_inner(ctx);
        self.suppress_once = false;
        request
    }

    fn tick_inner(&mut self, ctx: &mut ModeContext<'_>) -> ModeRequest {
        let (Some(spline), Some(pending)) = (self.spline, self.pending) else {
            self.abandon(ctx);
            self.session = None;
            return ModeRequest::Change(ModeId::Idle);
        };
        if !ctx.world.exists(spline) || !ctx.world.exists(pending) {
            log::warn!("Spline-Platzierung: Spline {} wurde extern entfernt", spline);
            self.abandon(ctx);
            self.session = None;
            return ModeRequest::Change(ModeId::Idle);
        }

        lifecycle::follow_pointer(ctx, pending);

        if ctx.input.cancel {
            let keep_spline = self.spline_recorded || self.committed > 0;
            self.abandon(ctx);
            self.session = None;
            if keep_spline && ctx.world.exists(spline) {
                ctx.select(spline);
                return ModeRequest::IdleFor(EntityType::Spline);
            }
            return ModeRequest::Change(ModeId::Idle);
        }

        if !ctx.input.confirm || ctx.world.is_pointer_over_ui() {
            return ModeRequest::Stay;
        }
        if self.suppress_once {
            log::debug!("Spline-Platzierung: Klick des Punkt-Buttons ignoriert");
            return ModeRequest::Stay;
        }

        if !self.spline_recorded {
            let transform = ctx.world.transform(spline).unwrap_or_default();
            ctx.undo.record(
                UndoKind::Create,
                spline,
                UndoPayload::Create {
                    definition: ctx.world.definition_of(spline),
                    transform,
                },
            );
            self.spline_recorded = true;
        }
        lifecycle::place(ctx, pending);
        self.committed += 1;
        self.pending = None;
        self.spawn_point(ctx, spline);
        if self.pending.is_none() {
            self.session = None;
            return ModeRequest::IdleFor(EntityType::Spline);
        }
        ModeRequest::Stay
    }

    /// Löst das Ziel der Session auf und erzeugt den ersten schwebenden Punkt.
    fn begin(&mut self, ctx: &mut ModeContext<'_>) {
        let Some(session) = self.session else {
            return;
        };
        self.committed = 0;
        let spline = match session.target {
            SplineTarget::New(definition) => {
                let Some(definition) = ctx.world.definition(definition) else {
                    log::warn!("Spline-Platzierung: Definition {:?} unbekannt", definition);
                    return;
                };
                let origin = ctx
                    .world
                    .pointer_world_point(Projection::FixedHeight(ctx.options.placement_height));
                self.spline_recorded = false;
                ctx.world.spawn(&definition, Transform::from_position(origin))
            }
            SplineTarget::Extend(spline) => {
                if ctx.world.entity_type(spline) != Some(EntityType::Spline) {
                    log::warn!("Spline-Platzierung: {} ist keine Spline", spline);
                    return;
                }
                self.spline_recorded = true;
                spline
            }
        };
        self.spline = Some(spline);
        self.spawn_point(ctx, spline);
        if self.pending.is_none() {
            // Ohne ersten Punkt keine Session; eine frische Spline fällt weg
            self.abandon(ctx);
            return;
        }
        log::info!("Spline-Platzierung an {} gestartet", spline);
    }

    fn spawn_point(&mut self, ctx: &mut ModeContext<'_>, spline: EntityId) {
        let point = ctx
            .world
            .pointer_world_point(Projection::FixedHeight(ctx.options.placement_height));
        match ctx.world.add_spline_point(spline, point) {
            Some(handle) => {
                lifecycle::pick_up(ctx, handle);
                self.pending = Some(handle);
            }
            None => log::warn!("Spline-Platzierung: Punkt an {} nicht erzeugt", spline),
        }
    }

    /// Verwirft den schwebenden Punkt und eine noch leere neue Spline.
    fn abandon(&mut self, ctx: &mut ModeContext<'_>) {
        if let Some(pending) = self.pending.take() {
            lifecycle::cancel_placement(ctx, pending);
        }
        if let Some(spline) = self.spline.take() {
            if !self.spline_recorded && self.committed == 0 {
                if ctx.selection.is_selected(spline) {
                    ctx.deselect(spline);
                }
                ctx.world.destroy(spline);
                log::info!("Spline-Platzierung: leere Spline {} verworfen", spline);
            }
        }
        self.reset();
    }

    fn reset(&mut self) {
        self.spline = None;
        self.pending = None;
        self.committed = 0;
        self.spline_recorded = false;
    }
}
