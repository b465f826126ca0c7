//! Stage: surface, chain controller and driver wired together
//!
//! A tap starts the pivot segment animating and the driver ticking. Every tick
//! redraws and advances the pivot; the tick that completes the segment stops the
//! driver, so it runs exactly as long as a segment is mid-animation.

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::StageConfig;
use crate::driver::{Driver, Scheduler};
use crate::error::StageError;
use crate::renderer::Surface;
use crate::sim::{ChainController, TickResult};

pub struct Stage<C: Surface, S: Scheduler> {
    config: StageConfig,
    surface: C,
    controller: ChainController,
    driver: Driver<S>,
}

impl<C, S> Stage<C, S>
where
    C: Surface + 'static,
    S: Scheduler + 'static,
{
    pub fn new(config: StageConfig, surface: C, scheduler: S) -> Self {
        let controller = ChainController::from_config(&config);
        let driver = Driver::new(scheduler, config.tick_interval_ms);
        Self {
            config,
            surface,
            controller,
            driver,
        }
    }

    pub fn config(&self) -> &StageConfig {
        &self.config
    }

    pub fn surface(&self) -> &C {
        &self.surface
    }

    pub fn controller(&self) -> &ChainController {
        &self.controller
    }

    pub fn is_running(&self) -> bool {
        self.driver.is_running()
    }

    /// Clear to the background and draw the pivot
    pub fn render(&mut self) {
        self.surface.clear(&self.config.background);
        self.controller.draw(&mut self.surface, &self.config);
    }

    /// One driver tick: redraw, then advance
    pub fn tick(&mut self) -> TickResult {
        self.render();
        let result = self.controller.update();
        if result.is_complete() {
            self.driver.stop();
        }
        result
    }

    /// Pointer-down handler.
    ///
    /// Returns `Ok(true)` if a new segment animation began and the driver started.
    /// A tap while a segment is animating changes nothing.
    pub fn tap(stage: &Rc<RefCell<Self>>) -> Result<bool, StageError> {
        let mut this = stage.borrow_mut();
        if !this.controller.start_updating() {
            log::debug!("Tap ignored, node {} still animating", this.controller.active_index());
            return Ok(false);
        }
        log::debug!(
            "Animating node {} ({:?})",
            this.controller.active_index(),
            this.controller.direction()
        );

        let weak = Rc::downgrade(stage);
        let started = this.driver.start(move || {
            if let Some(stage) = weak.upgrade() {
                stage.borrow_mut().tick();
            }
        });
        if started.is_err() {
            // No timer will advance the pivot; leave it tappable
            this.controller.cancel_updating();
        }
        started
    }
}
