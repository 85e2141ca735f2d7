//! FCPXML document model and byte-level entry points.

/// Reading and writing documents as XML text.
pub mod io;
/// Element types of the FCPXML tree.
pub mod model;
/// Polymorphic `<spine>` list.
pub mod spine;
