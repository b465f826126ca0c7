//! Chain traversal state machine
//!
//! One pivot node animates at a time. When it completes, the pivot moves to the next
//! node in the traversal direction; at either end of the chain the pivot stays put and
//! the direction reverses, so the chain ping-pongs forever.

use serde::{Deserialize, Serialize};

use super::chain::{Chain, Hop};
use super::scale::TickResult;
use crate::config::StageConfig;
use crate::renderer::Surface;

/// Traversal direction along the chain (and sweep direction within a segment)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    /// Forward for non-negative values
    pub fn from_sign(sign: f32) -> Self {
        if sign >= 0.0 {
            Direction::Forward
        } else {
            Direction::Backward
        }
    }

    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Direction::Forward => 1.0,
            Direction::Backward => -1.0,
        }
    }

    #[inline]
    pub fn offset(self) -> isize {
        match self {
            Direction::Forward => 1,
            Direction::Backward => -1,
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }
}

/// Owns the chain and tracks which node is the pivot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainController {
    chain: Chain,
    active: usize,
    direction: Direction,
}

impl ChainController {
    /// Start at node 0 heading forward
    pub fn new(chain: Chain) -> Self {
        Self {
            chain,
            active: 0,
            direction: Direction::Forward,
        }
    }

    pub fn from_config(config: &StageConfig) -> Self {
        Self::new(Chain::new(config.node_count, config.step))
    }

    pub fn chain(&self) -> &Chain {
        &self.chain
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Whether the pivot is mid-animation
    #[cfg(test)]
    pub fn is_animating(&self) -> bool {
        !self.chain.node(self.active).state().is_idle()
    }

    pub fn draw<S: Surface>(&self, surface: &mut S, config: &StageConfig) {
        self.chain.node(self.active).draw(surface, config);
    }

    pub fn start_updating(&mut self) -> bool {
        self.chain.node_mut(self.active).start_updating()
    }

    /// Return the pivot to idle if its sweep never got going
    pub fn cancel_updating(&mut self) -> bool {
        self.chain.node_mut(self.active).cancel_updating()
    }

    /// Advance the pivot. On completion the pivot moves on before returning.
    pub fn update(&mut self) -> TickResult {
        let result = self.chain.node_mut(self.active).update();
        if result.is_complete() {
            let hop = self.chain.node(self.active).neighbor(self.direction);
            if let Hop::Boundary(_) = hop {
                self.direction = self.direction.reversed();
                log::info!(
                    "Reached end of chain at node {}, reversing {:?}",
                    self.active,
                    self.direction
                );
            }
            self.active = hop.index();
            log::debug!("Pivot now node {} ({:?})", self.active, self.direction);
        }
        result
    }
}
