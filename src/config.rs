//! Stage configuration
//!
//! Everything the stage would otherwise read from ambient globals. Defaults match
//! the fixed constants in [`crate::consts`]; the viewport size is filled in at startup.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::StageError;

/// Stage configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StageConfig {
    /// Surface width in pixels (viewport at startup)
    pub width: f32,
    /// Surface height in pixels (viewport at startup)
    pub height: f32,
    /// Segments in the chain
    pub node_count: usize,
    /// Milliseconds between ticks
    pub tick_interval_ms: u32,
    /// Progress added per tick
    pub step: f32,
    /// CSS color the surface is cleared to
    pub background: String,
    /// CSS color of the segment stroke
    pub stroke_color: String,
    /// Stroke width is the segment size divided by this
    pub stroke_width_divisor: f32,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            node_count: NODE_COUNT,
            tick_interval_ms: TICK_INTERVAL_MS,
            step: SCALE_STEP,
            background: BACKGROUND_COLOR.to_string(),
            stroke_color: STROKE_COLOR.to_string(),
            stroke_width_divisor: STROKE_WIDTH_DIVISOR,
        }
    }
}

impl StageConfig {
    /// Defaults sized to the given viewport
    pub fn for_viewport(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Canvas backing size in whole pixels
    pub fn canvas_size(&self) -> (u32, u32) {
        (self.width.round() as u32, self.height.round() as u32)
    }

    /// Parse overrides; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, StageError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), StageError> {
        if self.node_count == 0 {
            return Err(StageError::InvalidConfig("node_count must be at least 1".into()));
        }
        if self.tick_interval_ms == 0 {
            return Err(StageError::InvalidConfig("tick_interval_ms must be positive".into()));
        }
        if !(self.step > 0.0 && self.step <= STEP_THRESHOLD) {
            return Err(StageError::InvalidConfig(format!(
                "step must be in (0, {STEP_THRESHOLD}], got {}",
                self.step
            )));
        }
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(StageError::InvalidConfig(format!(
                "surface must have a positive size, got {}x{}",
                self.width, self.height
            )));
        }
        if !(self.stroke_width_divisor > 0.0) {
            return Err(StageError::InvalidConfig(
                "stroke_width_divisor must be positive".into(),
            ));
        }
        Ok(())
    }
}
