//! Crate-wide building blocks shared by every conversion stage.

/// Error taxonomy and result alias.
pub mod error;
