//! Canvas rendering module
//!
//! Segments are stroked through the [`Surface`] trait so the animation can be drawn
//! to a browser canvas or recorded headlessly.

pub mod recorder;
pub mod surface;

pub use recorder::{DrawCommand, Recorder};
pub use surface::{LineCap, StrokeStyle, Surface};
