//! Bidirectional converter between Final Cut Pro XML (FCPXML) and an editorial timeline model.
//!
//! - Parse FCPXML into a typed [`Document`] ([`document::io`])
//! - Decode it into a [`Timeline`] of video/audio tracks ([`Decoder`])
//! - Encode a timeline back into a single-spine FCPXML document ([`Encoder`])
#![forbid(unsafe_code)]

/// Two-way mapping between documents and timelines.
pub mod convert;
/// FCPXML document model and XML entry points.
pub mod document;
/// Crate-wide error type.
pub mod foundation;
/// `"<value>/<rate>s"` time attribute codec.
pub mod rational;
/// Editorial timeline model.
pub mod timeline;

pub use crate::convert::decode::{DecodeOpts, Decoder, decode, decode_str, read_timeline};
pub use crate::convert::encode::{EncodeOpts, Encoder, encode, encode_to_string, write_timeline};
pub use crate::document::model::Document;
pub use crate::foundation::error::{FcpxError, FcpxResult};
pub use crate::rational::{TimeCodec, format_rational_time, parse_rational_time};
pub use crate::timeline::model::{
    Clip, Composable, ExternalReference, Gap, Marker, MarkerColor, Stack, Timeline, Track,
    TrackKind, Transition,
};
pub use crate::timeline::time::{RationalTime, TimeRange};
