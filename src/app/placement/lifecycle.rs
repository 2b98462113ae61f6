//! Platzierungs-Protokoll auf Basis der Entity-Primitive:
//! spawn → pick_up → follow_pointer → place / cancel_placement.

use super::super::events::EditorEvent;
use super::super::modes::ModeContext;
use super::{PlacementSession, PlacementSource};
use crate::core::{EntityId, Projection, Transform, UndoKind, UndoPayload};
use crate::shared::CursorKind;

/// Erzeugt die Entity einer Session und nimmt sie auf.
///
/// Gibt `None` zurück, wenn die Definition nicht aufgelöst werden kann.
pub fn spawn_for_session(ctx: &mut ModeContext<'_>, session: &PlacementSession) -> Option<EntityId> {
    let definition = match session.source {
        PlacementSource::Item(id) => ctx.world.definition(id),
        PlacementSource::Category(id) => ctx.world.pick_from_category(id),
    };
    let Some(definition) = definition else {
        log::warn!("Platzierung: Quelle {:?} liefert keine Definition", session.source);
        return None;
    };

    let transform = session
        .cloned_transform_source
        .and_then(|source| ctx.world.transform(source))
        .unwrap_or_else(|| {
            Transform::from_position(
                ctx.world
                    .pointer_world_point(Projection::FixedHeight(ctx.options.placement_height)),
            )
        });

    let id = ctx.world.spawn(&definition, transform);
    log::info!("Platzierung: '{}' als {} erzeugt", definition.name, id);
    pick_up(ctx, id);
    Some(id)
}

/// Versetzt eine Entity in den Platzierungsmodus und selektiert sie.
pub fn pick_up(ctx: &mut ModeContext<'_>, id: EntityId) {
    ctx.switch_selection(id);
    ctx.world.pick_up(id);
    ctx.set_cursor(CursorKind::Move);
}

/// Bewegt die schwebende Entity auf die Projektion des Zeigers.
pub fn follow_pointer(ctx: &mut ModeContext<'_>, id: EntityId) {
    let projection = if ctx.world.auto_elevates(id) {
        Projection::StackableSurface
    } else {
        Projection::FixedHeight(ctx.options.placement_height)
    };
    let point = ctx.world.pointer_world_point(projection);
    ctx.world.move_to(id, point);
}

/// Platziert die Entity: erst `Create` ins Undo-Log, dann `release`.
pub fn place(ctx: &mut ModeContext<'_>, id: EntityId) {
    let Some(transform) = ctx.world.transform(id) else {
        log::warn!("Platzierung: {} existiert nicht mehr", id);
        return;
    };
    ctx.undo.record(
        UndoKind::Create,
        id,
        UndoPayload::Create {
            definition: ctx.world.definition_of(id),
            transform,
        },
    );
    ctx.world.release(id);
    ctx.set_cursor(CursorKind::Default);
    ctx.publish(EditorEvent::EntityPlaced { entity: id });
    log::info!("Platzierung: {} bei {:?} abgesetzt", id, transform.position);
}

/// Bricht die Platzierung ab: deselektieren und entfernen, kein Undo.
pub fn cancel_placement(ctx: &mut ModeContext<'_>, id: EntityId) {
    if ctx.selection.is_selected(id) {
        ctx.deselect(id);
    }
    ctx.world.destroy(id);
    ctx.set_cursor(CursorKind::Default);
    log::info!("Platzierung von {} abgebrochen", id);
}
