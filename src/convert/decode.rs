use std::io::Read;

use crate::convert::{
    AUDIO_SRC_ENABLE, AUDIO_TRACK_NAME, REF_METADATA_KEY, SRC_ENABLE_METADATA_KEY,
    VIDEO_TRACK_NAME,
};
use crate::document::io::{parse_document, read_document};
use crate::document::model::{self as doc, Document};
use crate::document::spine::{Spine, SpineItem};
use crate::foundation::error::{FcpxError, FcpxResult};
use crate::rational::TimeCodec;
use crate::timeline::model::{
    Clip, Composable, ExternalReference, Gap, Marker, MarkerColor, Stack, Timeline, Track,
    TrackKind,
};
use crate::timeline::time::{RationalTime, TimeRange};

/// Options for [`Decoder`].
#[derive(Clone, Debug, Default)]
pub struct DecodeOpts {
    /// Time attribute codec (carries the bare-number rate).
    pub codec: TimeCodec,
}

/// The two tracks a spine fans out into, before empty ones are dropped.
#[derive(Clone, Debug)]
pub struct SpineTracks {
    pub video: Track,
    pub audio: Track,
}

impl SpineTracks {
    fn new() -> Self {
        Self {
            video: Track::new(VIDEO_TRACK_NAME, TrackKind::Video),
            audio: Track::new(AUDIO_TRACK_NAME, TrackKind::Audio),
        }
    }

    /// Tracks worth emitting, video first. A track holding nothing but gaps carries no
    /// content and is dropped, so a spine of only gaps decodes to a timeline with no tracks
    /// and its length is lost.
    pub fn into_tracks(self) -> Vec<Track> {
        [self.video, self.audio]
            .into_iter()
            .filter(has_content)
            .collect()
    }
}

fn has_content(track: &Track) -> bool {
    track
        .children
        .iter()
        .any(|c| !matches!(c, Composable::Gap(_)))
}

/// Converts FCPXML documents into timelines.
#[derive(Clone, Debug, Default)]
pub struct Decoder {
    opts: DecodeOpts,
}

impl Decoder {
    pub fn new(opts: DecodeOpts) -> Self {
        Self { opts }
    }

    /// Decode the first reachable project of `doc`.
    #[tracing::instrument(skip(self, doc), fields(version = %doc.version))]
    pub fn decode(&self, doc: &Document) -> FcpxResult<Timeline> {
        let project = doc.resolve_project().ok_or(FcpxError::NoProjectFound)?;
        let mut timeline = Timeline::new(project.name.as_str());

        let Some(spine) = project.sequence.as_ref().and_then(|s| s.spine.as_ref()) else {
            tracing::debug!(project = %project.name, "project has no spine");
            return Ok(timeline);
        };

        let tracks = self.decode_spine(spine)?.into_tracks();
        tracing::debug!(
            project = %project.name,
            tracks = tracks.len(),
            "decoded spine"
        );
        if let Some(root) = timeline.tracks_mut() {
            for track in tracks {
                root.append_child(track);
            }
        }
        Ok(timeline)
    }

    /// Fan the spine out into a video and an audio track, in spine order.
    pub fn decode_spine(&self, spine: &Spine) -> FcpxResult<SpineTracks> {
        let mut tracks = SpineTracks::new();
        for item in &spine.items {
            match item {
                SpineItem::Clip(c) => self.decode_clip(c, &mut tracks)?,
                SpineItem::Video(v) => {
                    let clip = self.decode_video(v)?;
                    tracks.video.append_child(clip);
                }
                SpineItem::Audio(a) => {
                    let clip = self.decode_audio(a)?;
                    tracks.audio.append_child(clip);
                }
                SpineItem::Gap(g) => {
                    let range = TimeRange::new(
                        RationalTime::default(),
                        self.duration("gap", &g.duration)?,
                    );
                    tracks.video.append_child(Gap::new(g.name.as_str(), Some(range)));
                    tracks.audio.append_child(Gap::new(g.name.as_str(), Some(range)));
                }
                SpineItem::RefClip(r) => self.decode_ref_clip(r, &mut tracks)?,
                SpineItem::Transition(t) => {
                    tracing::debug!(name = %t.name, "transition not converted");
                }
                SpineItem::Title(t) => {
                    tracing::debug!(name = %t.name, "title not converted");
                }
            }
        }
        Ok(tracks)
    }

    fn decode_clip(&self, clip: &doc::Clip, tracks: &mut SpineTracks) -> FcpxResult<()> {
        let range = self.source_range(clip.element_name(), &clip.start, &clip.duration)?;
        let markers = self.decode_markers(&clip.markers)?;

        // Any number of lanes collapses into one clip per track.
        if !clip.videos.is_empty() || !clip.reference.is_empty() {
            tracks.video.append_child(Clip::new(
                clip.name.as_str(),
                Some(ExternalReference::new(clip.reference.as_str())),
                Some(range),
                markers.clone(),
            ));
        }
        if !clip.audios.is_empty() || !clip.audio_duration.is_empty() {
            tracks.audio.append_child(Clip::new(
                clip.name.as_str(),
                Some(ExternalReference::new(clip.reference.as_str())),
                Some(range),
                markers,
            ));
        }
        Ok(())
    }

    fn decode_video(&self, video: &doc::Video) -> FcpxResult<Clip> {
        Ok(Clip::new(
            video.name.as_str(),
            Some(ExternalReference::new(video.reference.as_str())),
            Some(self.source_range("video", &video.start, &video.duration)?),
            self.decode_markers(&video.markers)?,
        ))
    }

    fn decode_audio(&self, audio: &doc::Audio) -> FcpxResult<Clip> {
        Ok(Clip::new(
            audio.name.as_str(),
            Some(ExternalReference::new(audio.reference.as_str())),
            Some(self.source_range("audio", &audio.start, &audio.duration)?),
            self.decode_markers(&audio.markers)?,
        ))
    }

    /// Compound clips become opaque stacks; the referenced media is never expanded.
    fn decode_ref_clip(&self, ref_clip: &doc::RefClip, tracks: &mut SpineTracks) -> FcpxResult<()> {
        let range = self.source_range("ref-clip", &ref_clip.start, &ref_clip.duration)?;
        let markers = self.decode_markers(&ref_clip.markers)?;

        let mut stack = Stack::new(ref_clip.name.as_str(), Some(range), markers);
        stack.set_metadata(REF_METADATA_KEY, ref_clip.reference.as_str());
        if !ref_clip.src_enable.is_empty() {
            stack.set_metadata(SRC_ENABLE_METADATA_KEY, ref_clip.src_enable.as_str());
        }

        if ref_clip.src_enable == AUDIO_SRC_ENABLE {
            tracks.audio.append_child(stack);
        } else {
            tracks.video.append_child(stack);
        }
        Ok(())
    }

    fn decode_markers(&self, markers: &[doc::Marker]) -> FcpxResult<Vec<Marker>> {
        markers.iter().map(|m| self.decode_marker(m)).collect()
    }

    fn decode_marker(&self, marker: &doc::Marker) -> FcpxResult<Marker> {
        let range = self.source_range("marker", &marker.start, &marker.duration)?;
        Ok(Marker::new(
            marker.value.as_str(),
            range,
            MarkerColor::Green,
            marker.note.as_str(),
        ))
    }

    fn source_range(
        &self,
        element: &'static str,
        start: &str,
        duration: &str,
    ) -> FcpxResult<TimeRange> {
        let duration = self.duration(element, duration)?;
        let start = self
            .opts
            .codec
            .parse(start)
            .map_err(|e| FcpxError::MalformedStart {
                element,
                value: e.text,
            })?;
        Ok(TimeRange::new(start, duration))
    }

    fn duration(&self, element: &'static str, text: &str) -> FcpxResult<RationalTime> {
        self.opts
            .codec
            .parse(text)
            .map_err(|e| FcpxError::MalformedDuration {
                element,
                value: e.text,
            })
    }
}

/// Decode with default options.
pub fn decode(doc: &Document) -> FcpxResult<Timeline> {
    Decoder::default().decode(doc)
}

/// Parse FCPXML text and decode it.
pub fn decode_str(xml: &str) -> FcpxResult<Timeline> {
    decode(&parse_document(xml)?)
}

/// Read FCPXML from `r` and decode it.
pub fn read_timeline<R: Read>(r: R) -> FcpxResult<Timeline> {
    decode(&read_document(r)?)
}

#[cfg(test)]
#[path = "../../tests/unit/convert/decode.rs"]
mod tests;
