//! Two-way mapping between the FCPXML document model and the timeline model.
//!
//! FCPXML has a single linear spine; the timeline has parallel video and audio tracks.
//! Decoding fans the spine out into one track per kind, encoding folds the tracks back
//! into one spine by position.

/// FCPXML document -> timeline.
pub mod decode;
/// Timeline -> FCPXML document.
pub mod encode;

/// Stack metadata key holding the `ref` id of a decoded `<ref-clip>`.
pub const REF_METADATA_KEY: &str = "fcpx_ref";
/// Stack metadata key holding the `srcEnable` value of a decoded `<ref-clip>`.
pub const SRC_ENABLE_METADATA_KEY: &str = "fcpx_src_enable";

/// `srcEnable` value that routes a ref-clip to the audio track.
pub const AUDIO_SRC_ENABLE: &str = "audio";

/// Name of the synthesized video track.
pub const VIDEO_TRACK_NAME: &str = "Video 1";
/// Name of the synthesized audio track.
pub const AUDIO_TRACK_NAME: &str = "Audio 1";

/// `ref` written for stacks that carry no recorded reference id.
pub const DEFAULT_REF_ID: &str = "r1";
/// `format` written on the encoded sequence.
pub const DEFAULT_SEQUENCE_FORMAT: &str = "r1";
