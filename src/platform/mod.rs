//! Platform abstraction layer
//!
//! Browser bindings for:
//! - Canvas 2D drawing
//! - Interval timers
//! - Pointer input
//!
//! Native builds use `renderer::Recorder` and `driver::ManualScheduler` instead.

#[cfg(target_arch = "wasm32")]
pub mod web;
