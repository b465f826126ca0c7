//! Command-recording surface for headless runs and tests

use glam::Vec2;

use super::surface::{StrokeStyle, Surface};

/// One recorded surface call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear { color: String },
    Save,
    Restore,
    Translate(Vec2),
    Rotate(f32),
    Line { from: Vec2, to: Vec2, style: StrokeStyle },
}

/// A surface that draws nothing and remembers every call
#[derive(Debug, Clone)]
pub struct Recorder {
    size: Vec2,
    commands: Vec<DrawCommand>,
}

impl Recorder {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of frames drawn (one clear per frame)
    pub fn frame_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Clear { .. }))
            .count()
    }

    /// Commands issued since the most recent clear
    pub fn last_frame(&self) -> &[DrawCommand] {
        let start = self
            .commands
            .iter()
            .rposition(|c| matches!(c, DrawCommand::Clear { .. }))
            .unwrap_or(0);
        &self.commands[start..]
    }
}

impl Surface for Recorder {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn clear(&mut self, color: &str) {
        self.commands.push(DrawCommand::Clear {
            color: color.to_string(),
        });
    }

    fn save(&mut self) {
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.commands.push(DrawCommand::Restore);
    }

    fn translate(&mut self, offset: Vec2) {
        self.commands.push(DrawCommand::Translate(offset));
    }

    fn rotate(&mut self, angle: f32) {
        self.commands.push(DrawCommand::Rotate(angle));
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, style: &StrokeStyle) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            style: style.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_frame_starts_at_latest_clear() {
        let mut rec = Recorder::new(100.0, 50.0);
        rec.clear("#000");
        rec.save();
        rec.clear("#111");
        rec.rotate(0.5);

        assert_eq!(rec.frame_count(), 2);
        assert_eq!(
            rec.last_frame(),
            &[
                DrawCommand::Clear {
                    color: "#111".into()
                },
                DrawCommand::Rotate(0.5)
            ]
        );
        assert_eq!(rec.size(), Vec2::new(100.0, 50.0));
    }
}
