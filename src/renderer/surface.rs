//! Immediate-mode 2D drawing surface
//!
//! The subset of a canvas context the stage draws with. The browser implementation
//! lives in `platform::web`; [`super::Recorder`] captures commands for headless runs.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Line end style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LineCap {
    Butt,
    #[default]
    Round,
    Square,
}

impl LineCap {
    /// Canvas `lineCap` keyword
    pub fn as_str(&self) -> &'static str {
        match self {
            LineCap::Butt => "butt",
            LineCap::Round => "round",
            LineCap::Square => "square",
        }
    }
}

/// Stroke parameters for a line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    /// CSS color string
    pub color: String,
    pub width: f32,
    pub cap: LineCap,
}

/// A 2D drawing target with a save/restore transform stack
pub trait Surface {
    /// Drawable size in pixels
    fn size(&self) -> Vec2;

    /// Fill the whole surface with a solid color
    fn clear(&mut self, color: &str);

    /// Push the current transform
    fn save(&mut self);

    /// Pop the last saved transform
    fn restore(&mut self);

    fn translate(&mut self, offset: Vec2);

    /// Rotate by `angle` radians (clockwise in screen space)
    fn rotate(&mut self, angle: f32);

    /// Stroke a single line from `from` to `to` in the current transform
    fn stroke_line(&mut self, from: Vec2, to: Vec2, style: &StrokeStyle);
}
