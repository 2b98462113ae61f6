//! Terrain-Malen: Layer-Auflösung per Ticket, Pinselstriche mit
//! Undo-Snapshot.

use super::{ModeContext, ModeId, ModeRequest};
use crate::app::events::EditorEvent;
use crate::app::tools::{BrushEngine, BrushSettings};
use crate::core::{LayerResolution, LayerTicket, Projection, UndoKind, UndoPayload};
use crate::shared::{CursorKind, EditorOptions};

/// Auflösung des aktiven Mal-Layers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerState {
    /// Noch nicht angefragt
    Unresolved,
    /// Anfrage läuft
    Pending(LayerTicket),
    Ready(usize),
    Failed,
}

/// Modus zum Malen auf der Terrain-Splatmap.
pub struct TerrainPaintMode {
    brush: BrushEngine,
    layer_address: Option<String>,
    layer: LayerState,
}

impl TerrainPaintMode {
    pub fn new(options: &EditorOptions) -> Self {
        Self {
            brush: BrushEngine::new(BrushSettings::from_options(options)),
            layer_address: None,
            layer: LayerState::Unresolved,
        }
    }

    pub fn brush(&self) -> &BrushEngine {
        &self.brush
    }

    pub fn layer_state(&self) -> LayerState {
        self.layer
    }

    pub fn layer_address(&self) -> Option<&str> {
        self.layer_address.as_deref()
    }

    pub fn is_busy(&self) -> bool {
        self.brush.stroke_active()
    }

    pub fn set_brush(&mut self, settings: BrushSettings) {
        self.brush.set_settings(settings);
        log::debug!("Terrain-Malen: Pinsel {:?}", self.brush.settings());
    }

    /// Hinterlegt die Textur-Adresse für das nächste `enter`.
    pub fn set_layer_address(&mut self, address: &str) {
        self.layer_address = Some(address.to_owned());
        self.layer = LayerState::Unresolved;
    }

    /// Wechselt den Layer im laufenden Modus; neue Auflösung, `Wait`-Cursor.
    pub fn change_layer(&mut self, ctx: &mut ModeContext<'_>, address: &str) {
        self.finish_stroke(ctx);
        self.set_layer_address(address);
        self.request_layer(ctx);
    }

    pub fn enter(&mut self, ctx: &mut ModeContext<'_>) {
        if ctx.world.terrain_id().is_none() {
            log::warn!("Terrain-Malen: keine Splatmap vorhanden");
            self.layer = LayerState::Failed;
            return;
        }
        self.request_layer(ctx);
    }

    pub fn exit(&mut self, ctx: &mut ModeContext<'_>) {
        self.finish_stroke(ctx);
        self.layer = LayerState::Unresolved;
        ctx.set_cursor(CursorKind::Default);
    }

    pub fn tick(&mut self, ctx: &mut ModeContext<'_>) -> ModeRequest {
        if ctx.world.terrain_id().is_none() {
            return ModeRequest::Change(ModeId::Idle);
        }
        if ctx.input.cancel {
            self.finish_stroke(ctx);
            return ModeRequest::Change(ModeId::Idle);
        }

        let layer = match self.poll_layer(ctx) {
            LayerState::Ready(layer) => layer,
            LayerState::Failed => {
                log::warn!(
                    "Terrain-Malen: Layer '{}' nicht auflösbar",
                    self.layer_address.as_deref().unwrap_or("")
                );
                return ModeRequest::Change(ModeId::Idle);
            }
            LayerState::Unresolved | LayerState::Pending(_) => return ModeRequest::Stay,
        };

        let input = *ctx.input;
        let over_ui = ctx.world.is_pointer_over_ui();
        let pointer = ctx.world.pointer_world_point(Projection::Terrain);
        let Some(map) = ctx.world.splat_map_mut() else {
            return ModeRequest::Change(ModeId::Idle);
        };
        let center = map.world_to_grid(pointer);

        if input.confirm && !over_ui {
            self.brush.begin_stroke(map, center);
        } else if self.brush.stroke_active()
            && input.primary_held
            && input.pointer_moved
            && !over_ui
        {
            self.brush.paint_at(map, center, layer);
        }

        if self.brush.stroke_active() && (input.primary_released || !input.primary_held) {
            self.finish_stroke(ctx);
        }
        ModeRequest::Stay
    }

    fn request_layer(&mut self, ctx: &mut ModeContext<'_>) {
        let Some(address) = self.layer_address.as_deref() else {
            log::warn!("Terrain-Malen: keine Textur-Adresse gesetzt");
            self.layer = LayerState::Failed;
            return;
        };
        let ticket = ctx.world.request_layer(address);
        self.layer = LayerState::Pending(ticket);
        ctx.set_cursor(CursorKind::Wait);
    }

    fn poll_layer(&mut self, ctx: &mut ModeContext<'_>) -> LayerState {
        if let LayerState::Pending(ticket) = self.layer {
            self.layer = match ctx.world.poll_layer(ticket) {
                LayerResolution::Pending => LayerState::Pending(ticket),
                LayerResolution::Ready(index) => {
                    let layer_count = ctx.world.splat_map().map_or(0, |m| m.layer_count());
                    if index < layer_count {
                        ctx.set_cursor(CursorKind::Paint);
                        log::info!("Terrain-Malen: Layer {} bereit", index);
                        LayerState::Ready(index)
                    } else {
                        LayerState::Failed
                    }
                }
                LayerResolution::Failed => LayerState::Failed,
            };
        }
        self.layer
    }

    /// Beendet einen laufenden Strich und übergibt ihn ans Undo-Log.
    fn finish_stroke(&mut self, ctx: &mut ModeContext<'_>) {
        let Some(snapshot) = self.brush.end_stroke() else {
            return;
        };
        let Some(terrain) = ctx.world.terrain_id() else {
            return;
        };
        let dirty_rect = snapshot.dirty_rect;
        ctx.undo.record(
            UndoKind::PaintTerrain,
            terrain,
            UndoPayload::TerrainPaint(snapshot),
        );
        ctx.publish(EditorEvent::PaintStrokeCommitted { dirty_rect });
        log::info!("Terrain-Malen: Strich {:?} übernommen", dirty_rect);
    }
}
