//! Linked Rotation - a chain of line segments that fold open and closed on tap
//!
//! Core modules:
//! - `sim`: Deterministic animation (segment rotation, chain traversal)
//! - `driver`: Periodic tick driver over a platform scheduler
//! - `renderer`: 2D surface abstraction and a recording surface
//! - `stage`: Wires input, driver and drawing together
//! - `platform`: Browser canvas and timer bindings

pub mod config;
pub mod driver;
pub mod error;
pub mod platform;
pub mod renderer;
pub mod sim;
pub mod stage;

pub use config::StageConfig;
pub use driver::{Driver, ManualScheduler, Scheduler};
pub use error::StageError;
pub use stage::Stage;

/// Animation constants
pub mod consts {
    /// Segments in the chain
    pub const NODE_COUNT: usize = 5;
    /// Driver cadence
    pub const TICK_INTERVAL_MS: u32 = 50;
    /// Progress added to the active axis per tick
    pub const SCALE_STEP: f32 = 0.1;
    /// Accumulated progress that completes one axis
    pub const STEP_THRESHOLD: f32 = 1.0;

    pub const BACKGROUND_COLOR: &str = "#212121";
    pub const STROKE_COLOR: &str = "#2ecc71";
    /// Stroke width = segment size / this
    pub const STROKE_WIDTH_DIVISOR: f32 = 15.0;

    /// Surface size used when no viewport is available (headless runs)
    pub const DEFAULT_WIDTH: f32 = 800.0;
    pub const DEFAULT_HEIGHT: f32 = 600.0;
}
