//! Editorial timeline model consumed and produced by the converter.
//!
//! Only the construction/inspection contract the converter relies on is modeled:
//! tracks of clips, gaps and nested stacks with rational-time source ranges and markers.

/// Timeline object graph.
pub mod model;
/// Rational time values and ranges.
pub mod time;
