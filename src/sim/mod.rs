//! Deterministic animation module
//!
//! All animation logic lives here. This module must be pure and deterministic:
//! - Fixed step per tick only
//! - No timers, no platform dependencies
//! - Drawing goes through the `Surface` trait and never mutates state

pub mod chain;
pub mod controller;
pub mod scale;

pub use chain::{Chain, ChainNode, Hop};
pub use controller::{ChainController, Direction};
pub use scale::{AXIS_COUNT, ScaleState, TickResult};
