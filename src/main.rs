use std::path::Path;

use glam::Vec3;
use splatview::input::{InputEvent, MouseButton};
use splatview::options::ViewerOptions;
use splatview::render::HeadlessRenderer;
use splatview::{ViewerCommand, ViewerSession};

const WIDTH: f32 = 1280.0;
const HEIGHT: f32 = 720.0;
const DT: f32 = 1.0 / 60.0;

fn run_frames(session: &mut ViewerSession<HeadlessRenderer>, frames: usize) {
    for _ in 0..frames {
        session.tick(DT);
    }
}

fn log_telemetry(session: &ViewerSession<HeadlessRenderer>, label: &str) {
    match serde_json::to_string(&session.telemetry()) {
        Ok(json) => log::info!("{label}: {json}"),
        Err(e) => log::error!("telemetry serialization failed: {e}"),
    }
}

fn orbit_drag(session: &mut ViewerSession<HeadlessRenderer>, from: (f32, f32), to: (f32, f32)) {
    let _ = session.handle_input(InputEvent::PointerDown {
        button: MouseButton::Left,
        x: from.0,
        y: from.1,
    });
    for step in 1..=10 {
        let t = step as f32 / 10.0;
        let _ = session.handle_input(InputEvent::PointerMove {
            x: from.0 + (to.0 - from.0) * t,
            y: from.1 + (to.1 - from.1) * t,
        });
    }
    let _ = session.handle_input(InputEvent::PointerUp {
        button: MouseButton::Left,
    });
}

fn main() {
    env_logger::init();

    let options = match std::env::args().nth(1) {
        Some(path) => match ViewerOptions::load(Path::new(&path)) {
            Ok(options) => options,
            Err(e) => {
                log::error!("{e}");
                std::process::exit(1);
            }
        },
        None => ViewerOptions::default(),
    };

    let mut session = ViewerSession::initialize(options, HeadlessRenderer::new(WIDTH, HEIGHT));
    let _ = session.subscribe(|event| log::info!("event: {event:?}"));

    // Main scene streams in.
    let _ = session.renderer_mut().resolve_loads();
    run_frames(&mut session, 5);
    log_telemetry(&session, "initial camera");

    // Orbit, zoom, and pan with the arrow keys.
    orbit_drag(&mut session, (640.0, 360.0), (760.0, 330.0));
    let _ = session.handle_input(InputEvent::Wheel { delta_y: -3.0 });
    let _ = session.handle_input(InputEvent::KeyDown {
        key: "ArrowLeft".into(),
    });
    run_frames(&mut session, 30);
    let _ = session.handle_input(InputEvent::KeyUp {
        key: "ArrowLeft".into(),
    });
    run_frames(&mut session, 60);
    log_telemetry(&session, "after orbit");

    // Drop a chair under the cursor and adjust it.
    session.execute(ViewerCommand::SetPlane(splatview::placement::PlaneUpdate {
        visible: Some(true),
        ..Default::default()
    }));
    let _ = session.enter_placement_mode("chair", "Chair");
    let _ = session.handle_input(InputEvent::PointerDown {
        button: MouseButton::Left,
        x: WIDTH * 0.5,
        y: HEIGHT * 0.5,
    });
    let _ = session.handle_input(InputEvent::PointerUp {
        button: MouseButton::Left,
    });
    let _ = session.handle_input(InputEvent::KeyDown { key: "KeyE".into() });
    session.execute(ViewerCommand::SetSelectedScale {
        scale: Vec3::new(1.5, 1.0, 1.5),
    });
    match serde_json::to_string(&session.placeholders().collect::<Vec<_>>()) {
        Ok(json) => log::info!("placeholders: {json}"),
        Err(e) => log::error!("placeholder serialization failed: {e}"),
    }

    // Visit the first hotspot, then leave the viewer.
    session.execute(ViewerCommand::ActivateHotspot { index: 0 });
    let _ = session.renderer_mut().resolve_loads();
    run_frames(&mut session, 5);
    log_telemetry(&session, "hotspot camera");
    session.execute(ViewerCommand::Back);
    session.execute(ViewerCommand::Back);

    let renderer = session.destroy();
    log::info!("entities left after teardown: {}", renderer.entity_count());
}
