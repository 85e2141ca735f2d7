use std::io::Write;

use crate::convert::{
    DEFAULT_REF_ID, DEFAULT_SEQUENCE_FORMAT, REF_METADATA_KEY, SRC_ENABLE_METADATA_KEY,
};
use crate::document::io::{DEFAULT_INDENT, to_xml_string, write_document};
use crate::document::model::{self as doc, DEFAULT_VERSION, Document};
use crate::document::spine::{Spine, SpineItem};
use crate::foundation::error::{FcpxError, FcpxResult};
use crate::rational::TimeCodec;
use crate::timeline::model::{Clip, Composable, Gap, Marker, Stack, Timeline, TrackKind};
use crate::timeline::time::RationalTime;

/// Options for [`Encoder`].
#[derive(Clone, Debug)]
pub struct EncodeOpts {
    /// `version` attribute of the written `<fcpxml>`.
    pub version: String,
    /// `format` attribute of the written `<sequence>`.
    pub sequence_format: String,
    /// `ref` used for stacks without a recorded reference id.
    pub default_ref: String,
    pub codec: TimeCodec,
    /// Spaces per nesting level when writing text; `0` writes a single line.
    pub indent: usize,
}

impl Default for EncodeOpts {
    fn default() -> Self {
        Self {
            version: DEFAULT_VERSION.to_string(),
            sequence_format: DEFAULT_SEQUENCE_FORMAT.to_string(),
            default_ref: DEFAULT_REF_ID.to_string(),
            codec: TimeCodec::default(),
            indent: DEFAULT_INDENT,
        }
    }
}

/// Converts timelines into FCPXML documents.
#[derive(Clone, Debug, Default)]
pub struct Encoder {
    opts: EncodeOpts,
}

impl Encoder {
    pub fn new(opts: EncodeOpts) -> Self {
        Self { opts }
    }

    pub fn opts(&self) -> &EncodeOpts {
        &self.opts
    }

    /// Fold the timeline's tracks back into a single spine.
    ///
    /// Video items drive the spine. The audio item at the same index is folded into a
    /// video clip when both are clips; audio items past the end of the video list are not
    /// written.
    #[tracing::instrument(skip(self, timeline), fields(timeline = %timeline.name))]
    pub fn encode(&self, timeline: &Timeline) -> FcpxResult<Document> {
        let root = timeline.tracks().ok_or(FcpxError::NoTracksInTimeline)?;

        let mut video: Vec<&Composable> = Vec::new();
        let mut audio: Vec<&Composable> = Vec::new();
        for child in &root.children {
            let Composable::Track(track) = child else {
                tracing::debug!(
                    kind = child.kind_name(),
                    name = child.name(),
                    "ignoring non-track root child"
                );
                continue;
            };
            match track.kind {
                TrackKind::Video => video.extend(track.children.iter()),
                TrackKind::Audio => audio.extend(track.children.iter()),
            }
        }

        let mut items = Vec::with_capacity(video.len());
        for (i, item) in video.iter().enumerate() {
            let paired = match audio.get(i) {
                Some(Composable::Clip(c)) => Some(c),
                _ => None,
            };
            items.push(self.encode_item(item, paired)?);
        }
        if audio.len() > video.len() {
            tracing::debug!(
                dropped = audio.len() - video.len(),
                "audio items without a video counterpart are not written"
            );
        }
        tracing::debug!(items = items.len(), "encoded spine");

        Ok(Document {
            version: self.opts.version.clone(),
            projects: vec![doc::Project {
                name: timeline.name.clone(),
                sequence: Some(doc::Sequence {
                    format: self.opts.sequence_format.clone(),
                    spine: Some(Spine::new(items)),
                    ..doc::Sequence::default()
                }),
                ..doc::Project::default()
            }],
            ..Document::default()
        })
    }

    /// Encode and write as FCPXML text.
    pub fn encode_to_string(&self, timeline: &Timeline) -> FcpxResult<String> {
        to_xml_string(&self.encode(timeline)?, self.opts.indent)
    }

    pub fn write_timeline<W: Write>(&self, w: W, timeline: &Timeline) -> FcpxResult<()> {
        write_document(w, &self.encode(timeline)?, self.opts.indent)
    }

    fn encode_item(&self, item: &Composable, paired: Option<&Clip>) -> FcpxResult<SpineItem> {
        match item {
            Composable::Clip(c) => match paired {
                Some(a) => self.encode_paired_clip(c, a),
                None => self.encode_video(c).map(SpineItem::Video),
            },
            Composable::Gap(g) => self.encode_gap(g).map(SpineItem::Gap),
            Composable::Stack(s) => self.encode_stack(s).map(SpineItem::RefClip),
            Composable::Track(_) | Composable::Transition(_) => {
                Err(FcpxError::unsupported_item(item.kind_name(), item.name()))
            }
        }
    }

    fn encode_video(&self, clip: &Clip) -> FcpxResult<doc::Video> {
        Ok(doc::Video {
            name: clip.name.clone(),
            reference: media_ref(clip).to_string(),
            start: self.start_of(clip.source_range.map(|r| r.start_time)),
            duration: self.opts.codec.format(clip.duration()?),
            markers: self.encode_markers(&clip.markers),
            ..doc::Video::default()
        })
    }

    /// Video clip plus its positional audio partner as one `<asset-clip>`.
    fn encode_paired_clip(&self, video: &Clip, audio: &Clip) -> FcpxResult<SpineItem> {
        let duration = self.opts.codec.format(video.duration()?);
        let audio_duration = self.opts.codec.format(audio.duration()?);
        let reference = media_ref(video).to_string();
        // Clip-level markers already cover an audio half decoded from the same clip.
        let audio_markers = if audio.markers == video.markers {
            Vec::new()
        } else {
            self.encode_markers(&audio.markers)
        };

        Ok(SpineItem::Clip(doc::Clip {
            name: video.name.clone(),
            reference: reference.clone(),
            start: self.start_of(video.source_range.map(|r| r.start_time)),
            duration: duration.clone(),
            audio_duration: audio_duration.clone(),
            videos: vec![doc::Video {
                reference,
                duration,
                ..doc::Video::default()
            }],
            audios: vec![doc::Audio {
                name: audio.name.clone(),
                reference: media_ref(audio).to_string(),
                start: self.start_of(audio.source_range.map(|r| r.start_time)),
                duration: audio_duration,
                markers: audio_markers,
                ..doc::Audio::default()
            }],
            markers: self.encode_markers(&video.markers),
            ..doc::Clip::default()
        }))
    }

    fn encode_gap(&self, gap: &Gap) -> FcpxResult<doc::Gap> {
        Ok(doc::Gap {
            name: gap.name.clone(),
            duration: self.opts.codec.format(gap.duration()?),
            ..doc::Gap::default()
        })
    }

    fn encode_stack(&self, stack: &Stack) -> FcpxResult<doc::RefClip> {
        let reference = stack
            .metadata_str(REF_METADATA_KEY)
            .filter(|r| !r.is_empty())
            .unwrap_or(self.opts.default_ref.as_str());
        Ok(doc::RefClip {
            name: stack.name.clone(),
            reference: reference.to_string(),
            start: self.start_of(stack.source_range.map(|r| r.start_time)),
            duration: self.opts.codec.format(stack.duration()?),
            src_enable: stack
                .metadata_str(SRC_ENABLE_METADATA_KEY)
                .unwrap_or_default()
                .to_string(),
            markers: self.encode_markers(&stack.markers),
            ..doc::RefClip::default()
        })
    }

    fn encode_markers(&self, markers: &[Marker]) -> Vec<doc::Marker> {
        markers
            .iter()
            .map(|m| doc::Marker {
                start: self.opts.codec.format(m.marked_range.start_time),
                duration: self.opts.codec.format(m.marked_range.duration),
                value: m.name.clone(),
                note: m.comment.clone(),
                ..doc::Marker::default()
            })
            .collect()
    }

    fn start_of(&self, start: Option<RationalTime>) -> String {
        self.opts.codec.format(start.unwrap_or_default())
    }
}

fn media_ref(clip: &Clip) -> &str {
    clip.media_reference
        .as_ref()
        .map_or("", |r| r.target_url.as_str())
}

/// Encode with default options.
pub fn encode(timeline: &Timeline) -> FcpxResult<Document> {
    Encoder::default().encode(timeline)
}

/// Encode with default options and write FCPXML text.
pub fn encode_to_string(timeline: &Timeline) -> FcpxResult<String> {
    Encoder::default().encode_to_string(timeline)
}

/// Encode with default options and write FCPXML to `w`.
pub fn write_timeline<W: Write>(w: W, timeline: &Timeline) -> FcpxResult<()> {
    Encoder::default().write_timeline(w, timeline)
}

#[cfg(test)]
#[path = "../../tests/unit/convert/encode.rs"]
mod tests;
