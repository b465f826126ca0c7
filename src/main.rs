//! Linked Rotation entry point
//!
//! On the web, mounts the canvas and wires pointer input to the stage. Natively, runs
//! the stage headlessly through one full round trip of the chain.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_stage {
    use std::cell::RefCell;
    use std::rc::Rc;

    use linked_rotation::platform::web::{self, CanvasSurface, IntervalScheduler, SharedStage};
    use linked_rotation::{Stage, StageConfig, StageError};

    pub fn run() -> Result<(), StageError> {
        let window = web::window()?;
        let document = web::document()?;

        let (width, height) = web::viewport_size(&window)?;
        let config = StageConfig::for_viewport(width, height);
        config.validate()?;
        let (canvas_width, canvas_height) = config.canvas_size();
        let canvas = web::mount_canvas(&document, canvas_width, canvas_height)?;
        log::info!(
            "Stage {}x{}, {} segments every {} ms",
            config.width,
            config.height,
            config.node_count,
            config.tick_interval_ms
        );

        let surface = CanvasSurface::new(&canvas)?;
        let stage: SharedStage = Rc::new(RefCell::new(Stage::new(
            config,
            surface,
            IntervalScheduler::new(window),
        )));
        stage.borrow_mut().render();

        let tap_stage = Rc::clone(&stage);
        web::on_pointer_down(&canvas, move || {
            if let Err(e) = Stage::tap(&tap_stage) {
                log::error!("Failed to start animation: {e}");
            }
        })?;

        log::info!("Linked Rotation running!");
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

    log::info!("Linked Rotation starting...");
    if let Err(e) = wasm_stage::run() {
        log::error!("Startup failed: {e}");
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Linked Rotation (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the canvas version");

    if let Err(e) = run_headless() {
        log::error!("Headless run failed: {e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Tap through the chain and back, ticking the manual scheduler after each tap
#[cfg(not(target_arch = "wasm32"))]
fn run_headless() -> Result<(), linked_rotation::StageError> {
    use std::cell::RefCell;
    use std::rc::Rc;

    use linked_rotation::renderer::Recorder;
    use linked_rotation::{ManualScheduler, Stage, StageConfig};

    let config = StageConfig::default();
    config.validate()?;
    let scheduler = ManualScheduler::new();
    let surface = Recorder::new(config.width, config.height);
    let taps = config.node_count * 2;
    let stage = Rc::new(RefCell::new(Stage::new(config, surface, scheduler.clone())));
    stage.borrow_mut().render();

    for tap in 1..=taps {
        let node = stage.borrow().controller().active_index();
        if !Stage::tap(&stage)? {
            log::warn!("Tap {tap} ignored");
            continue;
        }
        let ticks = scheduler.run_until_idle(1_000);
        let stage = stage.borrow();
        log::info!(
            "Tap {tap}: node {node} animated for {ticks} ticks, pivot now node {} ({:?})",
            stage.controller().active_index(),
            stage.controller().direction()
        );
    }

    println!(
        "\n✓ Round trip complete: {} frames drawn",
        stage.borrow().surface().frame_count()
    );
    Ok(())
}
