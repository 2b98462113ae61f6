use glam::Vec3;
use scene_editor_core::app::{PlacementSource, SplineTarget};
use scene_editor_core::core::{EntityHost, LayerMask, UndoPayload};
use scene_editor_core::{
    AppController, AppIntent, CategoryId, ContentCatalog, ContentDefinition, ContentId,
    EditorError, EditorEvent, EditorState, EntityId, EntityType, InputSignals, ModeId, Scene,
    UndoKind,
};

const DT: f32 = 1.0 / 60.0;

fn catalog() -> ContentCatalog {
    let mut catalog = ContentCatalog::with_seed(1);
    catalog.add_item(ContentDefinition::new(1, "Kiste", EntityType::Object).with_auto_elevate());
    catalog.add_item(ContentDefinition::new(2, "Zaun", EntityType::Object));
    catalog.add_item(ContentDefinition::new(3, "Feldweg", EntityType::Spline));
    catalog.add_item(
        ContentDefinition::new(4, "Brunnen", EntityType::Object).with_respawn_on_place(),
    );
    catalog.add_category(CategoryId(10), vec![ContentId(1), ContentId(2)]);
    catalog.add_category(CategoryId(99), vec![ContentId(77)]);
    catalog
}

fn setup() -> (AppController, EditorState, Scene) {
    (
        AppController::new(),
        EditorState::default(),
        Scene::new().with_catalog(catalog()),
    )
}

fn step(
    controller: &mut AppController,
    state: &mut EditorState,
    world: &mut Scene,
    x: f32,
    z: f32,
    input: InputSignals,
) {
    world.set_pointer(x, z);
    controller.tick(state, world, &input);
}

fn start_item(
    controller: &mut AppController,
    state: &mut EditorState,
    world: &mut Scene,
    item: u32,
    continuous: bool,
) {
    controller
        .handle_intent(
            state,
            world,
            AppIntent::StartPlacementRequested {
                source: PlacementSource::Item(ContentId(item)),
                continuous,
            },
        )
        .expect("Platzierung sollte starten");
}

#[test]
fn test_spawn_button_places_object_and_returns_to_object_idle() {
    let (mut controller, mut state, mut world) = setup();
    world.set_pointer(5.0, 5.0);
    start_item(&mut controller, &mut state, &mut world, 2, false);

    assert_eq!(state.active_mode(), ModeId::ObjectPlacement);
    let entity = state
        .modes
        .object_placement()
        .and_then(|m| m.entity())
        .expect("schwebende Entity vorhanden");
    assert!(world.in_placement_mode(entity));
    assert_eq!(state.selected(), Some(entity));
    assert_eq!(world.object(entity).map(|o| o.layer), Some(LayerMask::IGNORE_RAYCAST));

    step(&mut controller, &mut state, &mut world, 6.0, 7.0, InputSignals::idle(DT));
    assert_eq!(
        world.transform(entity).map(|t| t.position),
        Some(Vec3::new(6.0, 0.0, 7.0))
    );

    step(&mut controller, &mut state, &mut world, 6.0, 7.0, InputSignals::press(DT));

    assert_eq!(state.active_mode(), ModeId::IdleObjects);
    assert!(!world.in_placement_mode(entity));
    assert_eq!(world.object(entity).map(|o| o.layer), Some(LayerMask::DEFAULT));
    assert_eq!(state.history.len(), 1);
    let action = &state.history.actions()[0];
    assert_eq!(action.kind, UndoKind::Create);
    assert_eq!(action.target, entity);
    match &action.payload {
        UndoPayload::Create {
            definition,
            transform,
        } => {
            assert_eq!(*definition, Some(ContentId(2)));
            assert_eq!(transform.position, Vec3::new(6.0, 0.0, 7.0));
        }
        other => panic!("Unerwartete Nutzlast: {other:?}"),
    }
}

#[test]
fn test_auto_elevating_object_stacks_on_placed_object() {
    let (mut controller, mut state, mut world) = setup();
    let base = world
        .spawn_placed(ContentId(2), Vec3::new(3.0, 0.0, 3.0))
        .expect("Definition vorhanden");
    world.set_pointer(3.0, 3.0);
    start_item(&mut controller, &mut state, &mut world, 1, false);
    let entity = state
        .modes
        .object_placement()
        .and_then(|m| m.entity())
        .expect("schwebende Entity vorhanden");
    assert_ne!(entity, base);

    step(&mut controller, &mut state, &mut world, 3.0, 3.0, InputSignals::idle(DT));
    assert_eq!(
        world.transform(entity).map(|t| t.position),
        Some(Vec3::new(3.0, 1.0, 3.0))
    );
}

#[test]
fn test_continuous_placement_spawns_clone_and_stays() {
    let (mut controller, mut state, mut world) = setup();
    world.set_pointer(1.0, 1.0);
    start_item(&mut controller, &mut state, &mut world, 2, true);
    let first = state
        .modes
        .object_placement()
        .and_then(|m| m.entity())
        .expect("erste Entity vorhanden");

    step(&mut controller, &mut state, &mut world, 2.0, 2.0, InputSignals::press(DT));

    assert_eq!(state.active_mode(), ModeId::ObjectPlacement);
    let placement = state.modes.object_placement().expect("Modus registriert");
    let second = placement.entity().expect("neue Entity schwebt");
    assert_ne!(first, second);
    assert_eq!(
        placement.session().and_then(|s| s.cloned_transform_source),
        Some(first)
    );
    assert_eq!(world.transform(second), world.transform(first));
    assert!(world.in_placement_mode(second));
    assert!(!world.in_placement_mode(first));
    assert_eq!(state.selected(), Some(second));
    assert_eq!(state.history.count_of(UndoKind::Create), 1);

    step(&mut controller, &mut state, &mut world, 4.0, 2.0, InputSignals::press(DT));
    assert_eq!(state.history.count_of(UndoKind::Create), 2);

    step(&mut controller, &mut state, &mut world, 4.0, 2.0, InputSignals::cancel(DT));
    assert_eq!(state.active_mode(), ModeId::Idle);
    assert_eq!(world.ids_of_type(EntityType::Object).len(), 2);
    assert_eq!(state.history.count_of(UndoKind::Create), 2);
}

#[test]
fn test_self_respawning_type_leaves_continuous_mode() {
    let (mut controller, mut state, mut world) = setup();
    start_item(&mut controller, &mut state, &mut world, 4, true);
    step(&mut controller, &mut state, &mut world, 0.0, 0.0, InputSignals::press(DT));
    assert_eq!(state.active_mode(), ModeId::IdleObjects);
    assert_eq!(world.object_count(), 1);
}

#[test]
fn test_cancel_mid_placement_destroys_entity_without_undo() {
    let (mut controller, mut state, mut world) = setup();
    start_item(&mut controller, &mut state, &mut world, 2, false);
    let entity = state
        .modes
        .object_placement()
        .and_then(|m| m.entity())
        .expect("schwebende Entity vorhanden");

    step(&mut controller, &mut state, &mut world, 2.0, 2.0, InputSignals::idle(DT));
    step(&mut controller, &mut state, &mut world, 2.0, 2.0, InputSignals::cancel(DT));

    assert!(!world.exists(entity));
    assert_eq!(state.selected(), None);
    assert_eq!(state.active_mode(), ModeId::Idle);
    assert!(state.history.is_empty());
}

#[test]
fn test_confirm_over_ui_does_not_place() {
    let (mut controller, mut state, mut world) = setup();
    start_item(&mut controller, &mut state, &mut world, 2, false);
    world.set_pointer_over_ui(true);
    step(&mut controller, &mut state, &mut world, 2.0, 2.0, InputSignals::press(DT));
    assert_eq!(state.active_mode(), ModeId::ObjectPlacement);
    assert!(state.history.is_empty());
}

#[test]
fn test_leaving_placement_mode_cancels_in_flight_entity() {
    let (mut controller, mut state, mut world) = setup();
    start_item(&mut controller, &mut state, &mut world, 2, false);
    let entity = state
        .modes
        .object_placement()
        .and_then(|m| m.entity())
        .expect("schwebende Entity vorhanden");

    controller
        .handle_intent(
            &mut state,
            &mut world,
            AppIntent::ChangeModeRequested {
                mode: ModeId::IdleObjects,
            },
        )
        .expect("Moduswechsel sollte gelingen");

    assert_eq!(state.active_mode(), ModeId::IdleObjects);
    assert!(!world.exists(entity));
    assert_eq!(state.selected(), None);
}

#[test]
fn test_second_spawn_button_restarts_session_in_place() {
    let (mut controller, mut state, mut world) = setup();
    let subscriber = state.events.subscribe();
    start_item(&mut controller, &mut state, &mut world, 2, false);
    let first = state
        .modes
        .object_placement()
        .and_then(|m| m.entity())
        .expect("erste Entity vorhanden");

    start_item(&mut controller, &mut state, &mut world, 1, false);
    let second = state
        .modes
        .object_placement()
        .and_then(|m| m.entity())
        .expect("zweite Entity vorhanden");

    assert!(!world.exists(first));
    assert!(world.exists(second));
    assert_eq!(world.object_count(), 1);
    let changes = state
        .events
        .drain(subscriber)
        .into_iter()
        .filter(|e| matches!(e, EditorEvent::ModeChanged { .. }))
        .count();
    assert_eq!(changes, 1);
}

#[test]
fn test_category_placement_picks_known_item() {
    let (mut controller, mut state, mut world) = setup();
    controller
        .handle_intent(
            &mut state,
            &mut world,
            AppIntent::StartPlacementRequested {
                source: PlacementSource::Category(CategoryId(10)),
                continuous: false,
            },
        )
        .expect("Kategorie sollte Einträge haben");
    let entity = state
        .modes
        .object_placement()
        .and_then(|m| m.entity())
        .expect("schwebende Entity vorhanden");
    let definition = world.definition_of(entity).expect("Definition gesetzt");
    assert!(definition == ContentId(1) || definition == ContentId(2));
}

#[test]
fn test_invalid_sources_are_rejected_without_mode_change() {
    let (mut controller, mut state, mut world) = setup();

    let err = controller
        .handle_intent(
            &mut state,
            &mut world,
            AppIntent::StartPlacementRequested {
                source: PlacementSource::Category(CategoryId(99)),
                continuous: false,
            },
        )
        .expect_err("leere Kategorie");
    assert_eq!(
        err.downcast_ref::<EditorError>(),
        Some(&EditorError::EmptyCategory(CategoryId(99)))
    );

    let err = controller
        .handle_intent(
            &mut state,
            &mut world,
            AppIntent::StartPlacementRequested {
                source: PlacementSource::Item(ContentId(42)),
                continuous: false,
            },
        )
        .expect_err("unbekanntes Item");
    assert_eq!(
        err.downcast_ref::<EditorError>(),
        Some(&EditorError::UnknownContent(ContentId(42)))
    );

    assert_eq!(state.active_mode(), ModeId::Idle);
    assert_eq!(world.object_count(), 0);
}

#[test]
fn test_spline_points_are_committed_until_cancel() {
    let (mut controller, mut state, mut world) = setup();
    world.set_pointer(0.0, 0.0);
    controller
        .handle_intent(
            &mut state,
            &mut world,
            AppIntent::StartSplineRequested {
                definition: ContentId(3),
            },
        )
        .expect("Spline sollte starten");
    assert_eq!(state.active_mode(), ModeId::SplinePlacement);
    let spline = state
        .modes
        .spline_placement()
        .and_then(|m| m.spline())
        .expect("Spline erzeugt");

    step(&mut controller, &mut state, &mut world, 1.0, 0.0, InputSignals::press(DT));
    step(&mut controller, &mut state, &mut world, 3.0, 0.0, InputSignals::press(DT));
    let pending = state
        .modes
        .spline_placement()
        .and_then(|m| m.pending_point())
        .expect("nächster Punkt schwebt");
    assert_eq!(world.spline_point_count(spline), 2);

    step(&mut controller, &mut state, &mut world, 5.0, 0.0, InputSignals::cancel(DT));

    assert_eq!(state.active_mode(), ModeId::IdleSplines);
    assert_eq!(state.selected(), Some(spline));
    assert!(!world.exists(pending));
    assert_eq!(world.spline_point_count(spline), 2);
    // Spline selbst plus zwei Punkte
    assert_eq!(state.history.count_of(UndoKind::Create), 3);
    assert_eq!(state.history.actions()[0].target, spline);
}

#[test]
fn test_cancelled_empty_spline_is_removed() {
    let (mut controller, mut state, mut world) = setup();
    controller
        .handle_intent(
            &mut state,
            &mut world,
            AppIntent::StartSplineRequested {
                definition: ContentId(3),
            },
        )
        .expect("Spline sollte starten");
    step(&mut controller, &mut state, &mut world, 0.0, 0.0, InputSignals::cancel(DT));

    assert_eq!(state.active_mode(), ModeId::Idle);
    assert_eq!(world.object_count(), 0);
    assert_eq!(state.selected(), None);
    assert!(state.history.is_empty());
}

#[test]
fn test_add_handle_button_click_does_not_place_point() {
    let (mut controller, mut state, mut world) = setup();
    controller
        .handle_intent(
            &mut state,
            &mut world,
            AppIntent::StartSplineRequested {
                definition: ContentId(3),
            },
        )
        .expect("Spline sollte starten");
    step(&mut controller, &mut state, &mut world, 0.0, 0.0, InputSignals::press(DT));
    step(&mut controller, &mut state, &mut world, 2.0, 0.0, InputSignals::cancel(DT));
    let spline = state.selected().expect("Spline selektiert");
    assert_eq!(world.spline_point_count(spline), 1);
    let recorded = state.history.len();

    // Klick auf den Button: Intent und Bestätigung im selben Frame
    world.set_pointer(6.0, 0.0);
    controller.frame(
        &mut state,
        &mut world,
        vec![AppIntent::AddSplineHandleRequested],
        &InputSignals::press(DT),
    );
    assert_eq!(state.active_mode(), ModeId::SplinePlacement);
    assert_eq!(
        state.modes.spline_placement().and_then(|m| m.session()).map(|s| s.target),
        Some(SplineTarget::Extend(spline))
    );
    assert_eq!(world.spline_point_count(spline), 1);
    assert_eq!(state.history.len(), recorded);

    // Nächster Klick setzt den Punkt; die Spline wird nicht erneut aufgezeichnet
    step(&mut controller, &mut state, &mut world, 6.0, 0.0, InputSignals::press(DT));
    assert_eq!(world.spline_point_count(spline), 2);
    assert_eq!(state.history.len(), recorded + 1);
}

#[test]
fn test_add_handle_without_spline_selection_fails() {
    let (mut controller, mut state, mut world) = setup();
    let err = controller
        .handle_intent(&mut state, &mut world, AppIntent::AddSplineHandleRequested)
        .expect_err("keine Spline selektiert");
    assert_eq!(
        err.downcast_ref::<EditorError>(),
        Some(&EditorError::NoSplineSelected)
    );
}

#[test]
fn test_undo_is_ignored_during_placement_and_reverts_create_afterwards() {
    let (mut controller, mut state, mut world) = setup();
    start_item(&mut controller, &mut state, &mut world, 2, false);
    step(&mut controller, &mut state, &mut world, 1.0, 1.0, InputSignals::press(DT));
    let placed = state.selected().expect("platzierte Entity selektiert");

    start_item(&mut controller, &mut state, &mut world, 2, false);
    controller
        .handle_intent(&mut state, &mut world, AppIntent::UndoRequested)
        .expect("Undo läuft durch");
    assert!(world.exists(placed));
    assert_eq!(state.history.len(), 1);

    step(&mut controller, &mut state, &mut world, 1.0, 1.0, InputSignals::cancel(DT));
    controller
        .handle_intent(&mut state, &mut world, AppIntent::UndoRequested)
        .expect("Undo läuft durch");
    assert!(!world.exists(placed));
    assert!(state.history.is_empty());
    assert_eq!(state.selected(), None::<EntityId>);
}
