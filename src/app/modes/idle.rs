//! Idle-Modus: Hover, Klick, Drag und Tastatur-Bearbeitung für einen
//! Satz bearbeitbarer Entity-Typen.

use super::{ModeContext, ModeId, ModeRequest};
use crate::app::events::EditorEvent;
use crate::app::tools::{ContinuousEdit, DragTimer};
use crate::core::{EntityId, LayerMask, Projection, Transform, TypeSet, UndoKind, UndoPayload};
use crate::shared::CursorKind;

/// Zustand des Zeiger-Drags
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PointerDrag {
    #[default]
    Idle,
    /// Primärtaste auf einem greifbaren Ziel gedrückt, Timer läuft
    Armed { target: EntityId, timer: DragTimer },
    /// Ziel folgt dem Zeiger
    Dragging { target: EntityId, before: Transform },
}

/// Idle-Modus für einen Typ-Satz.
pub struct IdleMode {
    id: ModeId,
    editable: TypeSet,
    /// Selektion, für die `draggable` berechnet wurde
    cached_for: Option<EntityId>,
    draggable: Vec<EntityId>,
    drag: PointerDrag,
    hover: Option<EntityId>,
    edit: ContinuousEdit,
}

impl IdleMode {
    pub fn new(id: ModeId, editable: TypeSet) -> Self {
        Self {
            id,
            editable,
            cached_for: None,
            draggable: Vec::new(),
            drag: PointerDrag::Idle,
            hover: None,
            edit: ContinuousEdit::new(),
        }
    }

    pub fn id(&self) -> ModeId {
        self.id
    }

    pub fn editable(&self) -> TypeSet {
        self.editable
    }

    pub fn drag(&self) -> PointerDrag {
        self.drag
    }

    /// Gecachte greifbare Unterkomponenten der Selektion.
    pub fn draggable_handles(&self) -> &[EntityId] {
        &self.draggable
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.drag, PointerDrag::Dragging { .. }) || self.edit.is_active()
    }

    pub fn enter(&mut self, ctx: &mut ModeContext<'_>) {
        self.drag = PointerDrag::Idle;
        self.cached_for = None;
        self.draggable.clear();
        ctx.set_cursor(CursorKind::Default);
    }

    pub fn exit(&mut self, ctx: &mut ModeContext<'_>) {
        if let PointerDrag::Dragging { target, before } = self.drag {
            self.finish_drag(ctx, target, before);
        }
        self.drag = PointerDrag::Idle;
        self.edit.finish_all(ctx);
        self.clear_hover(ctx);
    }

    pub fn tick(&mut self, ctx: &mut ModeContext<'_>) -> ModeRequest {
        // Verwaiste Selektion (z.B. nach Undo) aufheben
        if let Some(current) = ctx.selection.current() {
            if !ctx.world.exists(current) {
                log::debug!("Idle: selektierte Entity {} existiert nicht mehr", current);
                ctx.deselect(current);
            }
        }
        let selected = ctx.selection.current();

        // 1. Selektion außerhalb des bearbeitbaren Satzes → passendes Idle
        if let Some(entity_type) = selected.and_then(|id| ctx.world.entity_type(id)) {
            if !self.editable.contains(entity_type) {
                return ModeRequest::IdleFor(entity_type);
            }
        }

        // 2. Greifbare Unterkomponenten nur bei Selektionswechsel neu abfragen
        if selected != self.cached_for {
            self.edit.finish_all(ctx);
            self.cached_for = selected;
            self.draggable = selected
                .map(|id| ctx.world.drag_handles(id))
                .unwrap_or_default();
        }

        // Laufender Zeiger-Drag
        if let Some(request) = self.update_drag(ctx) {
            return request;
        }

        // 3. Hover/Klick, solange nicht gezogen wird
        let dragging = matches!(self.drag, PointerDrag::Dragging { .. });
        if !dragging {
            if ctx.world.is_pointer_over_ui() {
                self.clear_hover(ctx);
                ctx.set_cursor(CursorKind::Default);
            } else {
                self.pick(ctx);
            }
        }

        // 4. Tastatur-Bearbeitung der Selektion
        match selected {
            Some(id) if !dragging && ctx.world.is_draggable(id) => self.edit.update(ctx, id),
            _ => self.edit.finish_all(ctx),
        }

        // 5. Abbrechen
        if ctx.input.cancel {
            return self.cancel(ctx);
        }
        ModeRequest::Stay
    }

    fn pick(&mut self, ctx: &mut ModeContext<'_>) {
        let confirm = ctx.input.confirm;
        let target = self.pick_handle(ctx).or_else(|| {
            ctx.world
                .raycast(self.editable, LayerMask::pickable(), false)
                .map(|hit| hit.entity)
        });
        if let Some(entity) = target {
            if confirm {
                self.click(ctx, entity);
            } else {
                self.set_hover(ctx, entity);
            }
            return;
        }

        self.clear_hover(ctx);
        let denied = self.editable.complement();
        match ctx.world.raycast(denied, LayerMask::pickable(), false) {
            Some(hit) => {
                ctx.set_cursor(CursorKind::Denied);
                if confirm {
                    ctx.publish(EditorEvent::DeniedFeedback { entity: hit.entity });
                }
            }
            None => ctx.set_cursor(CursorKind::Default),
        }
    }

    /// Gecachte Unterkomponente der Selektion unter dem Zeiger. Geht
    /// näheren Entities vor.
    fn pick_handle(&self, ctx: &ModeContext<'_>) -> Option<EntityId> {
        if self.draggable.is_empty() {
            return None;
        }
        ctx.world
            .raycast(self.editable, LayerMask::HANDLES, true)
            .map(|hit| hit.entity)
            .filter(|entity| self.draggable.contains(entity))
    }

    fn click(&mut self, ctx: &mut ModeContext<'_>, entity: EntityId) {
        let grabbable = ctx.selection.is_selected(entity) || self.draggable.contains(&entity);
        if grabbable {
            if ctx.world.is_draggable(entity) {
                self.drag = PointerDrag::Armed {
                    target: entity,
                    timer: DragTimer::armed(ctx.options.drag_delay_secs),
                };
            }
            return;
        }
        self.edit.finish_all(ctx);
        ctx.switch_selection(entity);
        ctx.set_cursor(CursorKind::Select);
    }

    fn set_hover(&mut self, ctx: &mut ModeContext<'_>, entity: EntityId) {
        if self.hover != Some(entity) {
            self.hover = Some(entity);
            ctx.world.set_hover(Some(entity));
        }
        ctx.set_cursor(CursorKind::Select);
    }

    fn clear_hover(&mut self, ctx: &mut ModeContext<'_>) {
        if self.hover.take().is_some() {
            ctx.world.set_hover(None);
        }
    }

    /// Schaltet den Drag-Zustand weiter. `Some` beendet den Tick.
    fn update_drag(&mut self, ctx: &mut ModeContext<'_>) -> Option<ModeRequest> {
        let input = *ctx.input;
        match self.drag {
            PointerDrag::Idle => None,
            PointerDrag::Armed { target, mut timer } => {
                if !input.primary_held || input.primary_released {
                    // Losgelassen vor Ablauf: war ein normaler Klick
                    self.drag = PointerDrag::Idle;
                    return None;
                }
                if !timer.tick(input.delta_time) {
                    self.drag = PointerDrag::Armed { target, timer };
                    return None;
                }
                let Some(before) = ctx.world.transform(target) else {
                    self.drag = PointerDrag::Idle;
                    return None;
                };
                self.edit.finish_all(ctx);
                self.drag = PointerDrag::Dragging { target, before };
                ctx.publish(EditorEvent::DragStarted { entity: target });
                ctx.set_cursor(CursorKind::Move);
                log::debug!("Idle: Drag von {} gestartet", target);
                None
            }
            PointerDrag::Dragging { target, before } => {
                if input.cancel {
                    ctx.world.set_transform(target, before);
                    self.drag = PointerDrag::Idle;
                    ctx.set_cursor(CursorKind::Default);
                    log::debug!("Idle: Drag von {} abgebrochen", target);
                    return Some(ModeRequest::Stay);
                }
                if input.primary_held && !input.primary_released {
                    let height = ctx
                        .world
                        .transform(target)
                        .map_or(before.position.y, |t| t.position.y);
                    let point = ctx.world.pointer_world_point(Projection::FixedHeight(height));
                    ctx.world.move_to(target, point);
                    return None;
                }
                self.finish_drag(ctx, target, before);
                self.drag = PointerDrag::Idle;
                ctx.set_cursor(CursorKind::Select);
                None
            }
        }
    }

    fn finish_drag(&mut self, ctx: &mut ModeContext<'_>, target: EntityId, before: Transform) {
        let moved = ctx.world.transform(target).is_some_and(|now| now != before);
        if moved {
            ctx.undo
                .record(UndoKind::Move, target, UndoPayload::Transform { before });
        }
    }

    fn cancel(&mut self, ctx: &mut ModeContext<'_>) -> ModeRequest {
        if let Some(current) = ctx.selection.current() {
            self.edit.finish_all(ctx);
            self.drag = PointerDrag::Idle;
            ctx.deselect(current);
            ctx.set_cursor(CursorKind::Default);
            return ModeRequest::Stay;
        }
        if self.id != ModeId::Idle {
            return ModeRequest::Change(ModeId::Idle);
        }
        ctx.publish(EditorEvent::OpenMainMenuRequested);
        ModeRequest::Stay
    }
}
