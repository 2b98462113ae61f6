//! Application Controller: wendet Intents an und tickt die Mode-Machine.

use super::error::EditorError;
use super::events::{AppIntent, EditorEvent};
use super::input::InputSignals;
use super::modes::ModeId;
use super::placement::{PlacementSession, PlacementSource, SplineSession};
use super::state::EditorState;
use crate::core::{EditorWorld, EntityType};

/// Orchestriert UI-Intents und Frame-Ticks auf den EditorState.
#[derive(Default)]
pub struct AppController;

impl AppController {
    /// Erstellt einen neuen Controller.
    pub fn new() -> Self {
        Self
    }

    /// Ein vollständiger Frame: erst alle Intents, dann genau ein Tick.
    ///
    /// Fehlgeschlagene Intents werden geloggt; der Frame läuft weiter.
    pub fn frame<W: EditorWorld>(
        &mut self,
        state: &mut EditorState,
        world: &mut W,
        intents: Vec<AppIntent>,
        input: &InputSignals,
    ) {
        for intent in intents {
            if let Err(e) = self.handle_intent(state, world, intent) {
                log::warn!("Intent fehlgeschlagen: {:#}", e);
            }
        }
        self.tick(state, world, input);
    }

    /// Tickt den aktiven Modus mit den Eingaben dieses Frames.
    pub fn tick<W: EditorWorld>(
        &mut self,
        state: &mut EditorState,
        world: &mut W,
        input: &InputSignals,
    ) {
        let (modes, mut ctx) = state.split(world, input);
        modes.tick(&mut ctx);
    }

    /// Verarbeitet einen Intent.
    pub fn handle_intent<W: EditorWorld>(
        &mut self,
        state: &mut EditorState,
        world: &mut W,
        intent: AppIntent,
    ) -> anyhow::Result<()> {
        let input = InputSignals::default();

        match intent {
            AppIntent::StartPlacementRequested { source, continuous } => {
                match source {
                    PlacementSource::Item(id) => {
                        if world.definition(id).is_none() {
                            return Err(EditorError::UnknownContent(id).into());
                        }
                    }
                    PlacementSource::Category(id) => {
                        if world.category_size(id) == 0 {
                            return Err(EditorError::EmptyCategory(id).into());
                        }
                    }
                }
                let (modes, mut ctx) = state.split(world, &input);
                modes.start_placement(PlacementSession::new(source, continuous), &mut ctx)?;
            }
            AppIntent::ContinuousPlacementToggled { enabled } => {
                if let Some(mode) = state.modes.object_placement_mut() {
                    mode.set_continuous(enabled);
                }
            }
            AppIntent::StartSplineRequested { definition } => {
                let is_spline = world
                    .definition(definition)
                    .is_some_and(|d| d.entity_type == EntityType::Spline);
                if !is_spline {
                    return Err(EditorError::UnknownContent(definition).into());
                }
                let (modes, mut ctx) = state.split(world, &input);
                modes.start_spline(SplineSession::new_spline(definition), &mut ctx)?;
            }
            AppIntent::AddSplineHandleRequested => {
                let spline = state
                    .selection
                    .current()
                    .and_then(|id| match world.entity_type(id) {
                        Some(EntityType::Spline) => Some(id),
                        Some(EntityType::SplineHandle) => world.owner_of(id),
                        _ => None,
                    })
                    .ok_or(EditorError::NoSplineSelected)?;
                let (modes, mut ctx) = state.split(world, &input);
                modes.start_spline(SplineSession::extend(spline), &mut ctx)?;
                // Der Button-Klick darf nicht gleich einen Punkt setzen
                modes.suppress_spline_placement();
            }
            AppIntent::TerrainPaintRequested { layer_address } => {
                let (modes, mut ctx) = state.split(world, &input);
                modes.start_terrain_paint(&layer_address, &mut ctx)?;
            }
            AppIntent::PaintLayerChanged { layer_address } => {
                let (modes, mut ctx) = state.split(world, &input);
                if modes.active() != ModeId::TerrainPaint {
                    return Err(EditorError::TerrainPaintInactive.into());
                }
                modes.start_terrain_paint(&layer_address, &mut ctx)?;
            }
            AppIntent::BrushSettingsChanged { settings } => {
                if let Some(mode) = state.modes.terrain_paint_mut() {
                    mode.set_brush(settings);
                }
            }
            AppIntent::ChangeModeRequested { mode } => {
                let (modes, mut ctx) = state.split(world, &input);
                if !modes.contains(mode) {
                    return Err(EditorError::ModeNotRegistered(mode).into());
                }
                modes.change(mode, &mut ctx);
            }
            AppIntent::UndoRequested => self.undo(state, world),
        }

        Ok(())
    }

    /// Nimmt die jüngste Aktion zurück, sofern keine Interaktion läuft.
    fn undo<W: EditorWorld>(&mut self, state: &mut EditorState, world: &mut W) {
        if state.modes.is_busy() {
            log::debug!("Undo während laufender Interaktion ignoriert");
            return;
        }
        let Some(action) = state.history.pop_undo() else {
            log::debug!("Undo: nichts aufgezeichnet");
            return;
        };
        if !world.apply_inverse(&action) {
            log::warn!(
                "Undo: {:?} für {} konnte nicht angewendet werden",
                action.kind,
                action.target
            );
            return;
        }
        log::info!("Undo: {:?} für {}", action.kind, action.target);

        if let Some(current) = state.selection.current() {
            if !world.exists(current) && state.selection.deselect(current) {
                state
                    .events
                    .publish(EditorEvent::SelectionChanged { current: None });
            }
        }
    }
}
