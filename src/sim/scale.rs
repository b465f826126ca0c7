//! Per-segment rotation state
//!
//! A segment rotates through two axes. Opening sweeps axis 0 then axis 1 from 0 to 1;
//! closing sweeps axis 1 then axis 0 from 1 back to 0. Every activation is exactly
//! two axis transitions regardless of the step size.

use serde::{Deserialize, Serialize};

use super::controller::Direction;
use crate::consts::{SCALE_STEP, STEP_THRESHOLD};

/// Number of rotation axes per segment
pub const AXIS_COUNT: usize = 2;

/// Slack applied to the threshold so accumulated float steps still land on a whole step
const THRESHOLD_EPSILON: f32 = 1e-4;

/// Outcome of a single animation tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickResult {
    /// The segment is mid-animation
    Continuing,
    /// Both axes finished and the segment went idle
    SegmentComplete,
}

impl TickResult {
    #[inline]
    pub fn is_complete(self) -> bool {
        self == TickResult::SegmentComplete
    }
}

/// Rotation progress for one segment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleState {
    /// Progress per axis, each in [0, 1]
    progress: [f32; AXIS_COUNT],
    /// `None` while idle
    direction: Option<Direction>,
    /// Value the current sweep started from (0 or 1)
    checkpoint: f32,
    /// Axis currently animating
    axis: usize,
    /// Progress added per tick
    step: f32,
}

impl Default for ScaleState {
    fn default() -> Self {
        Self::new(SCALE_STEP)
    }
}

impl ScaleState {
    pub fn new(step: f32) -> Self {
        Self {
            progress: [0.0; AXIS_COUNT],
            direction: None,
            checkpoint: 0.0,
            axis: 0,
            step,
        }
    }

    pub fn progress(&self) -> [f32; AXIS_COUNT] {
        self.progress
    }

    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    pub fn checkpoint(&self) -> f32 {
        self.checkpoint
    }

    pub fn axis(&self) -> usize {
        self.axis
    }

    pub fn is_idle(&self) -> bool {
        self.direction.is_none()
    }

    /// Begin a sweep away from the current checkpoint.
    ///
    /// Returns `false` without touching anything if a sweep is already running.
    pub fn start_updating(&mut self) -> bool {
        if self.direction.is_some() {
            return false;
        }
        self.direction = Some(Direction::from_sign(1.0 - 2.0 * self.checkpoint));
        true
    }

    /// Abandon a sweep that has not advanced yet, returning to idle.
    ///
    /// `start_updating` only sets the direction, so clearing it restores the exact
    /// pre-start state. Returns `false` if the segment was already idle.
    pub fn cancel_updating(&mut self) -> bool {
        self.direction.take().is_some()
    }

    /// Advance the active axis by one step.
    pub fn advance(&mut self) -> TickResult {
        let Some(direction) = self.direction else {
            return TickResult::Continuing;
        };
        let sign = direction.sign();

        self.progress[self.axis] += self.step * sign;
        if (self.progress[self.axis] - self.checkpoint).abs() < STEP_THRESHOLD - THRESHOLD_EPSILON {
            return TickResult::Continuing;
        }

        // Whole step crossed: close the axis exactly at its bound
        let target = self.checkpoint + sign;
        self.progress[self.axis] = target;

        let next = self.axis as isize + direction.offset();
        if (0..AXIS_COUNT as isize).contains(&next) {
            self.axis = next as usize;
            return TickResult::Continuing;
        }

        self.checkpoint = target;
        self.direction = None;
        TickResult::SegmentComplete
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn run_to_completion(state: &mut ScaleState) -> usize {
        let mut ticks = 0;
        loop {
            ticks += 1;
            if state.advance().is_complete() {
                return ticks;
            }
            assert!(ticks < 1000, "segment never completed");
        }
    }

    #[test]
    fn test_start_sets_forward_from_zero_checkpoint() {
        let mut state = ScaleState::default();
        assert!(state.is_idle());
        assert!(state.start_updating());
        assert_eq!(state.direction(), Some(Direction::Forward));
    }

    #[test]
    fn test_start_is_ignored_mid_animation() {
        let mut state = ScaleState::default();
        assert!(state.start_updating());
        state.advance();
        assert!(!state.start_updating());
        assert_eq!(state.direction(), Some(Direction::Forward));
    }

    #[test]
    fn test_activation_takes_twenty_ticks() {
        let mut state = ScaleState::default();
        state.start_updating();
        assert_eq!(run_to_completion(&mut state), 20);
        assert!(state.is_idle());
        assert_eq!(state.axis(), 1);
        assert_eq!(state.progress(), [1.0, 1.0]);
        assert_eq!(state.checkpoint(), 1.0);
    }

    #[test]
    fn test_axis_switches_after_ten_ticks() {
        let mut state = ScaleState::default();
        state.start_updating();
        for _ in 0..9 {
            assert_eq!(state.advance(), TickResult::Continuing);
            assert_eq!(state.axis(), 0);
        }
        assert_eq!(state.advance(), TickResult::Continuing);
        assert_eq!(state.axis(), 1);
        assert_eq!(state.progress()[0], 1.0);
    }

    #[test]
    fn test_second_activation_closes_segment() {
        let mut state = ScaleState::default();
        state.start_updating();
        run_to_completion(&mut state);

        assert!(state.start_updating());
        assert_eq!(state.direction(), Some(Direction::Backward));
        assert_eq!(run_to_completion(&mut state), 20);
        assert_eq!(state.axis(), 0);
        assert_eq!(state.progress(), [0.0, 0.0]);
        assert_eq!(state.checkpoint(), 0.0);
    }

    #[test]
    fn test_cancel_restores_idle_state() {
        let mut state = ScaleState::default();
        assert!(!state.cancel_updating());
        state.start_updating();
        assert!(state.cancel_updating());
        assert_eq!(state, ScaleState::default());
        assert!(state.start_updating());
        assert_eq!(state.direction(), Some(Direction::Forward));
    }

    #[test]
    fn test_advance_while_idle_is_noop() {
        let mut state = ScaleState::default();
        assert_eq!(state.advance(), TickResult::Continuing);
        assert_eq!(state, ScaleState::default());
    }

    proptest! {
        #[test]
        fn axis_stays_in_range(ticks in 0usize..200) {
            let mut state = ScaleState::default();
            state.start_updating();
            for _ in 0..ticks {
                let result = state.advance();
                prop_assert!(state.axis() < AXIS_COUNT);
                if result.is_complete() {
                    prop_assert!(state.is_idle());
                    state.start_updating();
                } else {
                    prop_assert!(!state.is_idle());
                }
                for p in state.progress() {
                    prop_assert!((-0.001..=1.001).contains(&p));
                }
            }
        }
    }
}
