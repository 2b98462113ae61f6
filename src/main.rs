//! Scene Editor Core: Headless-Treiber.
//!
//! Spielt eine kurze, geskriptete Sitzung gegen die Referenz-Szene ab
//! (Objekt platzieren, Spline zeichnen, Terrain bemalen, Undo) und loggt
//! alle Events des Interaktions-Kerns.

use glam::Vec2;
use scene_editor_core::app::BrushSettings;
use scene_editor_core::{
    AppController, AppIntent, CategoryId, ContentCatalog, ContentDefinition, ContentId,
    EditorOptions, EditorState, EntityType, InputSignals, PlacementSource, Scene, SplatMap,
};

/// Dauer eines Frames im Skript (60 Hz).
const FRAME_SECS: f32 = 1.0 / 60.0;

/// Ein Frame des Skripts: Intents, Zeigerposition (XZ), Eingabe.
struct ScriptFrame {
    intents: Vec<AppIntent>,
    pointer: Vec2,
    input: InputSignals,
}

impl ScriptFrame {
    fn new(pointer: Vec2, input: InputSignals) -> Self {
        Self {
            intents: Vec::new(),
            pointer,
            input,
        }
    }

    fn with_intent(mut self, intent: AppIntent) -> Self {
        self.intents.push(intent);
        self
    }
}

fn main() -> anyhow::Result<()> {
    // Logger initialisieren
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("Scene Editor Core v{} startet...", env!("CARGO_PKG_VERSION"));

    // Optionen aus TOML laden (oder Standardwerte)
    let config_path = EditorOptions::config_path();
    let options = EditorOptions::load_from_file(&config_path);

    let mut world = Scene::new()
        .with_catalog(demo_catalog())
        .with_terrain(SplatMap::new(64, 64, 3));
    let mut state = EditorState::new(options);
    let mut controller = AppController::new();
    let subscriber = state.events.subscribe();

    for (index, frame) in demo_script().into_iter().enumerate() {
        world.set_pointer(frame.pointer.x, frame.pointer.y);
        controller.frame(&mut state, &mut world, frame.intents, &frame.input);
        for event in state.events.drain(subscriber) {
            log::info!("Frame {:>3}: {:?}", index, event);
        }
    }

    log::info!(
        "Sitzung beendet: Modus {}, {} Objekte, {} Undo-Einträge",
        state.active_mode(),
        world.object_count(),
        state.history.len()
    );
    state.events.unsubscribe(subscriber);
    Ok(())
}

fn demo_catalog() -> ContentCatalog {
    let mut catalog = ContentCatalog::with_seed(7);
    catalog.add_item(ContentDefinition::new(1, "Kiste", EntityType::Object).with_auto_elevate());
    catalog.add_item(ContentDefinition::new(2, "Zaun", EntityType::Object));
    catalog.add_item(ContentDefinition::new(3, "Feldweg", EntityType::Spline));
    catalog.add_category(CategoryId(10), vec![ContentId(1), ContentId(2)]);
    catalog.add_layer("terrain/gras", 1);
    catalog.add_layer("terrain/fels", 2);
    catalog.set_layer_latency(2);
    catalog
}

fn demo_script() -> Vec<ScriptFrame> {
    let dt = FRAME_SECS;
    let mut script = Vec::new();

    // Kiste platzieren
    script.push(
        ScriptFrame::new(Vec2::new(4.0, 4.0), InputSignals::idle(dt)).with_intent(
            AppIntent::StartPlacementRequested {
                source: PlacementSource::Item(ContentId(1)),
                continuous: false,
            },
        ),
    );
    script.push(ScriptFrame::new(Vec2::new(5.0, 5.0), InputSignals::press(dt)));
    script.push(ScriptFrame::new(Vec2::new(5.0, 5.0), InputSignals::release(dt)));

    // Zwei Objekte aus der Kategorie, dann Abbruch
    script.push(
        ScriptFrame::new(Vec2::new(10.0, 2.0), InputSignals::idle(dt)).with_intent(
            AppIntent::StartPlacementRequested {
                source: PlacementSource::Category(CategoryId(10)),
                continuous: true,
            },
        ),
    );
    script.push(ScriptFrame::new(Vec2::new(10.0, 2.0), InputSignals::press(dt)));
    script.push(ScriptFrame::new(Vec2::new(12.0, 2.0), InputSignals::press(dt)));
    script.push(ScriptFrame::new(Vec2::new(14.0, 2.0), InputSignals::cancel(dt)));

    // Feldweg mit drei Punkten
    script.push(
        ScriptFrame::new(Vec2::new(20.0, 20.0), InputSignals::idle(dt)).with_intent(
            AppIntent::StartSplineRequested {
                definition: ContentId(3),
            },
        ),
    );
    for x in [20.0, 24.0, 28.0] {
        script.push(ScriptFrame::new(Vec2::new(x, 20.0), InputSignals::press(dt)));
    }
    script.push(ScriptFrame::new(Vec2::new(30.0, 20.0), InputSignals::cancel(dt)));

    // Terrain bemalen
    script.push(
        ScriptFrame::new(Vec2::new(32.0, 32.0), InputSignals::idle(dt))
            .with_intent(AppIntent::TerrainPaintRequested {
                layer_address: "terrain/gras".to_owned(),
            })
            .with_intent(AppIntent::BrushSettingsChanged {
                settings: BrushSettings {
                    radius: 4.0,
                    smoothness: 0.5,
                    opacity: 1.0,
                },
            }),
    );
    for _ in 0..3 {
        script.push(ScriptFrame::new(Vec2::new(32.0, 32.0), InputSignals::idle(dt)));
    }
    script.push(ScriptFrame::new(Vec2::new(32.0, 32.0), InputSignals::press(dt)));
    for step in 1..=6 {
        let x = 32.0 + step as f32 * 2.0;
        script.push(ScriptFrame::new(Vec2::new(x, 32.0), InputSignals::hold(dt, true)));
    }
    script.push(ScriptFrame::new(Vec2::new(44.0, 32.0), InputSignals::release(dt)));
    script.push(ScriptFrame::new(Vec2::new(44.0, 32.0), InputSignals::cancel(dt)));

    // Strich zurücknehmen
    script.push(
        ScriptFrame::new(Vec2::new(44.0, 32.0), InputSignals::idle(dt))
            .with_intent(AppIntent::UndoRequested),
    );
    script
}
