//! Fixed-length doubly-linked chain of segments
//!
//! Nodes live in a single arena and refer to their neighbors by index. The chain is
//! built once and never grows or shrinks.

use std::f32::consts::FRAC_PI_2;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::controller::Direction;
use super::scale::{ScaleState, TickResult};
use crate::config::StageConfig;
use crate::renderer::{LineCap, StrokeStyle, Surface};

/// Where a traversal step from a node lands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hop {
    /// Moved onto the neighbor at this index
    Neighbor(usize),
    /// No neighbor in that direction; stay on this (end) node
    Boundary(usize),
}

impl Hop {
    pub fn index(self) -> usize {
        match self {
            Hop::Neighbor(i) | Hop::Boundary(i) => i,
        }
    }
}

/// One segment of the chain
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainNode {
    index: usize,
    state: ScaleState,
    next: Option<usize>,
    prev: Option<usize>,
}

impl ChainNode {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn state(&self) -> &ScaleState {
        &self.state
    }

    pub fn next(&self) -> Option<usize> {
        self.next
    }

    pub fn prev(&self) -> Option<usize> {
        self.prev
    }

    /// Rotation applied to the segment, blended from both axes
    pub fn angle(&self) -> f32 {
        let [p0, p1] = self.state.progress();
        let axis = self.state.axis() as f32;
        -FRAC_PI_2 * (1.0 - axis) * p0 + FRAC_PI_2 * p1 * axis
    }

    /// Stroke this segment. Does not mutate any animation state.
    pub fn draw<S: Surface>(&self, surface: &mut S, config: &StageConfig) {
        let extent = surface.size();
        let size = extent.x.min(extent.y) / config.node_count as f32;
        let axis = self.state.axis() as f32;
        let style = StrokeStyle {
            color: config.stroke_color.clone(),
            width: size / config.stroke_width_divisor,
            cap: LineCap::Round,
        };

        surface.save();
        surface.translate(Vec2::new(size, axis * size));
        surface.rotate(self.angle());
        surface.stroke_line(
            Vec2::new(size * axis, 0.0),
            Vec2::new(size, size * (1.0 - axis)),
            &style,
        );
        surface.restore();
    }

    pub fn update(&mut self) -> TickResult {
        self.state.advance()
    }

    /// Returns `true` only when a new sweep actually began
    pub fn start_updating(&mut self) -> bool {
        self.state.start_updating()
    }

    pub fn cancel_updating(&mut self) -> bool {
        self.state.cancel_updating()
    }

    /// Step one node in `direction`, or report the chain end.
    pub fn neighbor(&self, direction: Direction) -> Hop {
        let link = match direction {
            Direction::Forward => self.next,
            Direction::Backward => self.prev,
        };
        match link {
            Some(i) => Hop::Neighbor(i),
            None => Hop::Boundary(self.index),
        }
    }
}

/// Arena of linked nodes, index 0 first
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chain {
    nodes: Vec<ChainNode>,
}

impl Chain {
    /// Build `len` nodes, each linked to its neighbors.
    ///
    /// `len` must be at least 1.
    pub fn new(len: usize, step: f32) -> Self {
        assert!(len > 0, "chain needs at least one node");
        let nodes = (0..len)
            .map(|index| ChainNode {
                index,
                state: ScaleState::new(step),
                next: (index + 1 < len).then_some(index + 1),
                prev: index.checked_sub(1),
            })
            .collect();
        Self { nodes }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, index: usize) -> &ChainNode {
        &self.nodes[index]
    }

    pub fn node_mut(&mut self, index: usize) -> &mut ChainNode {
        &mut self.nodes[index]
    }

    pub fn nodes(&self) -> &[ChainNode] {
        &self.nodes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{DrawCommand, Recorder};

    #[test]
    fn test_chain_links() {
        let chain = Chain::new(5, 0.1);
        assert_eq!(chain.len(), 5);
        assert_eq!(chain.node(0).prev(), None);
        assert_eq!(chain.node(0).next(), Some(1));
        assert_eq!(chain.node(2).prev(), Some(1));
        assert_eq!(chain.node(2).next(), Some(3));
        assert_eq!(chain.node(4).next(), None);
        for (i, node) in chain.nodes().iter().enumerate() {
            assert_eq!(node.index(), i);
        }
    }

    #[test]
    fn test_neighbor_at_boundaries() {
        let chain = Chain::new(5, 0.1);
        assert_eq!(chain.node(0).neighbor(Direction::Forward), Hop::Neighbor(1));
        assert_eq!(chain.node(0).neighbor(Direction::Backward), Hop::Boundary(0));
        assert_eq!(chain.node(4).neighbor(Direction::Forward), Hop::Boundary(4));
        assert_eq!(chain.node(4).neighbor(Direction::Backward), Hop::Neighbor(3));
    }

    #[test]
    fn test_single_node_is_both_ends() {
        let chain = Chain::new(1, 0.1);
        assert_eq!(chain.node(0).neighbor(Direction::Forward), Hop::Boundary(0));
        assert_eq!(chain.node(0).neighbor(Direction::Backward), Hop::Boundary(0));
    }

    #[test]
    fn test_angle_sweeps_quarter_turn() {
        let mut chain = Chain::new(5, 0.1);
        let node = chain.node_mut(0);
        assert_eq!(node.angle(), 0.0);

        node.start_updating();
        for _ in 0..5 {
            node.update();
        }
        assert!((node.angle() + FRAC_PI_2 * 0.5).abs() < 1e-4);

        // Axis 1 starts from zero progress
        for _ in 0..5 {
            node.update();
        }
        assert_eq!(node.state().axis(), 1);
        assert_eq!(node.angle(), 0.0);

        while !node.update().is_complete() {}
        assert!((node.angle() - FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn test_draw_emits_one_transformed_line() {
        let chain = Chain::new(5, 0.1);
        let config = StageConfig::default();
        let mut rec = Recorder::new(1000.0, 500.0);
        chain.node(0).draw(&mut rec, &config);

        let size = 100.0;
        let cmds = rec.commands();
        assert_eq!(cmds.len(), 5);
        assert_eq!(cmds[0], DrawCommand::Save);
        assert_eq!(cmds[1], DrawCommand::Translate(Vec2::new(size, 0.0)));
        assert_eq!(cmds[2], DrawCommand::Rotate(0.0));
        match &cmds[3] {
            DrawCommand::Line { from, to, style } => {
                assert_eq!(*from, Vec2::ZERO);
                assert_eq!(*to, Vec2::new(size, size));
                assert_eq!(style.color, config.stroke_color);
                assert!((style.width - size / 15.0).abs() < 1e-4);
                assert_eq!(style.cap, LineCap::Round);
            }
            other => panic!("expected a line, got {other:?}"),
        }
        assert_eq!(cmds[4], DrawCommand::Restore);
    }
}
