//! Registry aller Modi und geordnete Übergänge zwischen ihnen.

use super::{
    InteractionMode, ModeContext, ModeId, ModeRequest, ObjectPlacementMode, SplinePlacementMode,
    TerrainPaintMode,
};
use crate::app::error::EditorError;
use crate::app::events::EditorEvent;
use crate::app::placement::{PlacementSession, SplineSession};
use crate::shared::EditorOptions;
use indexmap::IndexMap;

/// Besitzt alle Modi; genau einer ist aktiv.
pub struct ModeMachine {
    registry: IndexMap<ModeId, InteractionMode>,
    active: ModeId,
}

impl ModeMachine {
    /// Machine mit allen Modi, aktiv ist das allgemeine Idle.
    pub fn new(options: &EditorOptions) -> Self {
        Self::with_modes(&ModeId::ALL, options)
    }

    /// Machine mit einer Auswahl an Modi. Das allgemeine Idle ist immer dabei.
    pub fn with_modes(ids: &[ModeId], options: &EditorOptions) -> Self {
        let mut registry = IndexMap::new();
        registry.insert(ModeId::Idle, InteractionMode::for_id(ModeId::Idle, options));
        for &id in ids {
            registry
                .entry(id)
                .or_insert_with(|| InteractionMode::for_id(id, options));
        }
        Self {
            registry,
            active: ModeId::Idle,
        }
    }

    pub fn active(&self) -> ModeId {
        self.active
    }

    pub fn contains(&self, id: ModeId) -> bool {
        self.registry.contains_key(&id)
    }

    pub fn mode(&self, id: ModeId) -> Option<&InteractionMode> {
        self.registry.get(&id)
    }

    pub fn mode_mut(&mut self, id: ModeId) -> Option<&mut InteractionMode> {
        self.registry.get_mut(&id)
    }

    /// Aktiver Modus hat eine laufende Interaktion.
    pub fn is_busy(&self) -> bool {
        self.registry
            .get(&self.active)
            .is_some_and(InteractionMode::is_busy)
    }

    /// Registrierter Idle-Modus für einen Typ, sonst allgemeines Idle.
    pub fn idle_for(&self, entity_type: crate::core::EntityType) -> ModeId {
        let id = ModeId::idle_for(entity_type);
        if self.contains(id) {
            id
        } else {
            ModeId::Idle
        }
    }

    /// Wechselt den aktiven Modus: `exit` → aktiv setzen → `enter` → Event.
    ///
    /// No-op für den aktiven oder einen nicht registrierten Modus.
    pub fn change(&mut self, to: ModeId, ctx: &mut ModeContext<'_>) -> bool {
        if to == self.active {
            log::debug!("Moduswechsel: {} ist bereits aktiv", to);
            return false;
        }
        if !self.contains(to) {
            log::warn!("Moduswechsel: {} ist nicht registriert", to);
            return false;
        }

        let from = self.active;
        if let Some(mode) = self.registry.get_mut(&from) {
            mode.exit(ctx);
        }
        ctx.publish(EditorEvent::ModeExited { mode: from });

        self.active = to;
        if let Some(mode) = self.registry.get_mut(&to) {
            mode.enter(ctx);
        }
        ctx.publish(EditorEvent::ModeEntered { mode: to });
        ctx.publish(EditorEvent::ModeChanged { from, to });
        log::info!("Modus: {} → {}", from, to);
        true
    }

    /// Tickt den aktiven Modus und wendet danach dessen Übergangswunsch an.
    pub fn tick(&mut self, ctx: &mut ModeContext<'_>) -> ModeRequest {
        let request = match self.registry.get_mut(&self.active) {
            Some(mode) => mode.tick(ctx),
            None => ModeRequest::Change(ModeId::Idle),
        };
        self.apply(request, ctx);
        request
    }

    fn apply(&mut self, request: ModeRequest, ctx: &mut ModeContext<'_>) {
        match request {
            ModeRequest::Stay => {}
            ModeRequest::Change(to) => {
                self.change(to, ctx);
            }
            ModeRequest::IdleFor(entity_type) => {
                let to = self.idle_for(entity_type);
                self.change(to, ctx);
            }
        }
    }

    /// Startet eine Objekt-Platzierung; läuft bereits eine, wird sie ersetzt.
    pub fn start_placement(
        &mut self,
        session: PlacementSession,
        ctx: &mut ModeContext<'_>,
    ) -> Result<(), EditorError> {
        let already_active = self.active == ModeId::ObjectPlacement;
        let mode = self
            .object_placement_mut()
            .ok_or(EditorError::ModeNotRegistered(ModeId::ObjectPlacement))?;
        if already_active {
            mode.restart(ctx, session);
            return Ok(());
        }
        mode.set_session(session);
        self.change(ModeId::ObjectPlacement, ctx);
        Ok(())
    }

    /// Startet eine Spline-Platzierung; läuft bereits eine, wird sie ersetzt.
    pub fn start_spline(
        &mut self,
        session: SplineSession,
        ctx: &mut ModeContext<'_>,
    ) -> Result<(), EditorError> {
        let already_active = self.active == ModeId::SplinePlacement;
        let mode = self
            .spline_placement_mut()
            .ok_or(EditorError::ModeNotRegistered(ModeId::SplinePlacement))?;
        if already_active {
            mode.restart(ctx, session);
            return Ok(());
        }
        mode.set_session(session);
        self.change(ModeId::SplinePlacement, ctx);
        Ok(())
    }

    /// Startet das Terrain-Malen oder wechselt im laufenden Modus den Layer.
    pub fn start_terrain_paint(
        &mut self,
        layer_address: &str,
        ctx: &mut ModeContext<'_>,
    ) -> Result<(), EditorError> {
        if ctx.world.terrain_id().is_none() {
            return Err(EditorError::NoTerrain);
        }
        let already_active = self.active == ModeId::TerrainPaint;
        let mode = self
            .terrain_paint_mut()
            .ok_or(EditorError::ModeNotRegistered(ModeId::TerrainPaint))?;
        if already_active {
            mode.change_layer(ctx, layer_address);
            return Ok(());
        }
        mode.set_layer_address(layer_address);
        self.change(ModeId::TerrainPaint, ctx);
        Ok(())
    }

    /// Unterdrückt die nächste Spline-Platzierung im laufenden Tick.
    pub fn suppress_spline_placement(&mut self) {
        if let Some(mode) = self.spline_placement_mut() {
            mode.suppress_next_placement();
        }
    }

    pub fn object_placement(&self) -> Option<&ObjectPlacementMode> {
        match self.registry.get(&ModeId::ObjectPlacement) {
            Some(InteractionMode::ObjectPlacement(mode)) => Some(mode),
            _ => None,
        }
    }

    pub fn object_placement_mut(&mut self) -> Option<&mut ObjectPlacementMode> {
        match self.registry.get_mut(&ModeId::ObjectPlacement) {
            Some(InteractionMode::ObjectPlacement(mode)) => Some(mode),
            _ => None,
        }
    }

    pub fn spline_placement(&self) -> Option<&SplinePlacementMode> {
        match self.registry.get(&ModeId::SplinePlacement) {
            Some(InteractionMode::SplinePlacement(mode)) => Some(mode),
            _ => None,
        }
    }

    pub fn spline_placement_mut(&mut self) -> Option<&mut SplinePlacementMode> {
        match self.registry.get_mut(&ModeId::SplinePlacement) {
            Some(InteractionMode::SplinePlacement(mode)) => Some(mode),
            _ => None,
        }
    }

    pub fn terrain_paint(&self) -> Option<&TerrainPaintMode> {
        match self.registry.get(&ModeId::TerrainPaint) {
            Some(InteractionMode::TerrainPaint(mode)) => Some(mode),
            _ => None,
        }
    }

    pub fn terrain_paint_mut(&mut self) -> Option<&mut TerrainPaintMode> {
        match self.registry.get_mut(&ModeId::TerrainPaint) {
            Some(InteractionMode::TerrainPaint(mode)) => Some(mode),
            _ => None,
        }
    }
}
