//! Typed mirror of the FCPXML element tree.
//!
//! Attributes are `@`-prefixed fields (XML layer convention); absent attributes read as empty
//! strings and are not written back. Child lists keep document order.

use serde::{Deserialize, Serialize};

use crate::document::spine::Spine;

/// Schema version written by the encoder.
pub const DEFAULT_VERSION: &str = "1.9";

/// Root `<fcpxml>` element.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename = "fcpxml")]
pub struct Document {
    #[serde(rename = "@version", default)]
    pub version: String,
    #[serde(rename = "resources", default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<Resources>,
    #[serde(rename = "library", default, skip_serializing_if = "Option::is_none")]
    pub library: Option<Library>,
    #[serde(rename = "event", default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<Event>,
    #[serde(rename = "project", default, skip_serializing_if = "Vec::is_empty")]
    pub projects: Vec<Project>,
}

impl Document {
    /// First reachable project.
    ///
    /// Precedence: root projects, then the library's own projects, then the first library
    /// event holding a project, then the first root event holding a project. First match
    /// wins.
    pub fn resolve_project(&self) -> Option<&Project> {
        if let Some(p) = self.projects.first() {
            return Some(p);
        }
        if let Some(lib) = &self.library {
            if let Some(p) = lib.projects.first() {
                return Some(p);
            }
            if let Some(p) = lib.events.iter().find_map(|e| e.projects.first()) {
                return Some(p);
            }
        }
        self.events.iter().find_map(|e| e.projects.first())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Library {
    #[serde(rename = "@location", default, skip_serializing_if = "String::is_empty")]
    pub location: String,
    #[serde(rename = "event", default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<Event>,
    #[serde(rename = "project", default, skip_serializing_if = "Vec::is_empty")]
    pub projects: Vec<Project>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "@name", default)]
    pub name: String,
    #[serde(rename = "@uid", default, skip_serializing_if = "String::is_empty")]
    pub uid: String,
    #[serde(rename = "project", default, skip_serializing_if = "Vec::is_empty")]
    pub projects: Vec<Project>,
    #[serde(rename = "asset-clip", default, skip_serializing_if = "Vec::is_empty")]
    pub clips: Vec<Clip>,
    #[serde(rename = "ref-clip", default, skip_serializing_if = "Vec::is_empty")]
    pub ref_clips: Vec<RefClip>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(rename = "@name", default)]
    pub name: String,
    #[serde(rename = "@uid", default, skip_serializing_if = "String::is_empty")]
    pub uid: String,
    #[serde(rename = "@modDate", default, skip_serializing_if = "String::is_empty")]
    pub mod_date: String,
    #[serde(rename = "sequence", default, skip_serializing_if = "Option::is_none")]
    pub sequence: Option<Sequence>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Sequence {
    #[serde(rename = "@format", default, skip_serializing_if = "String::is_empty")]
    pub format: String,
    #[serde(rename = "@duration", default, skip_serializing_if = "String::is_empty")]
    pub duration: String,
    #[serde(rename = "@tcStart", default, skip_serializing_if = "String::is_empty")]
    pub tc_start: String,
    #[serde(rename = "@tcFormat", default, skip_serializing_if = "String::is_empty")]
    pub tc_format: String,
    #[serde(rename = "@audioLayout", default, skip_serializing_if = "String::is_empty")]
    pub audio_layout: String,
    #[serde(rename = "@audioRate", default, skip_serializing_if = "String::is_empty")]
    pub audio_rate: String,
    #[serde(rename = "spine", default, skip_serializing_if = "Option::is_none")]
    pub spine: Option<Spine>,
}

/// Tag of a clip written as a storyline item.
pub const ASSET_CLIP_TAG: &str = "asset-clip";
/// Tag of a generic clip container.
pub const CLIP_TAG: &str = "clip";

/// `<asset-clip>` / `<clip>`: a clip that may carry nested video and audio components.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Clip {
    /// Tag the clip was read from; empty for clips built in code.
    #[serde(skip)]
    pub tag: &'static str,
    #[serde(rename = "@name", default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(rename = "@ref", default, skip_serializing_if = "String::is_empty")]
    pub reference: String,
    #[serde(rename = "@offset", default, skip_serializing_if = "String::is_empty")]
    pub offset: String,
    #[serde(rename = "@start", default, skip_serializing_if = "String::is_empty")]
    pub start: String,
    #[serde(rename = "@duration", default, skip_serializing_if = "String::is_empty")]
    pub duration: String,
    #[serde(rename = "@tcFormat", default, skip_serializing_if = "String::is_empty")]
    pub tc_format: String,
    #[serde(rename = "@audioStart", default, skip_serializing_if = "String::is_empty")]
    pub audio_start: String,
    #[serde(rename = "@audioDuration", default, skip_serializing_if = "String::is_empty")]
    pub audio_duration: String,
    #[serde(rename = "@audioRole", default, skip_serializing_if = "String::is_empty")]
    pub audio_role: String,
    /// Video components, one per lane.
    #[serde(rename = "video", default, skip_serializing_if = "Vec::is_empty")]
    pub videos: Vec<Video>,
    /// Audio components, one per lane.
    #[serde(rename = "audio", default, skip_serializing_if = "Vec::is_empty")]
    pub audios: Vec<Audio>,
    #[serde(rename = "marker", default, skip_serializing_if = "Vec::is_empty")]
    pub markers: Vec<Marker>,
    #[serde(rename = "keyword", default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<Keyword>,
    #[serde(rename = "metadata", default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl Clip {
    /// Element tag used when reporting errors about this clip.
    pub fn element_name(&self) -> &'static str {
        if self.tag.is_empty() {
            ASSET_CLIP_TAG
        } else {
            self.tag
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Video {
    #[serde(rename = "@name", default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(rename = "@ref", default, skip_serializing_if = "String::is_empty")]
    pub reference: String,
    #[serde(rename = "@lane", default, skip_serializing_if = "String::is_empty")]
    pub lane: String,
    #[serde(rename = "@offset", default, skip_serializing_if = "String::is_empty")]
    pub offset: String,
    #[serde(rename = "@start", default, skip_serializing_if = "String::is_empty")]
    pub start: String,
    #[serde(rename = "@duration", default, skip_serializing_if = "String::is_empty")]
    pub duration: String,
    #[serde(rename = "marker", default, skip_serializing_if = "Vec::is_empty")]
    pub markers: Vec<Marker>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Audio {
    #[serde(rename = "@name", default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(rename = "@ref", default, skip_serializing_if = "String::is_empty")]
    pub reference: String,
    #[serde(rename = "@lane", default, skip_serializing_if = "String::is_empty")]
    pub lane: String,
    #[serde(rename = "@offset", default, skip_serializing_if = "String::is_empty")]
    pub offset: String,
    #[serde(rename = "@start", default, skip_serializing_if = "String::is_empty")]
    pub start: String,
    #[serde(rename = "@duration", default, skip_serializing_if = "String::is_empty")]
    pub duration: String,
    #[serde(rename = "@role", default, skip_serializing_if = "String::is_empty")]
    pub role: String,
    #[serde(rename = "audio-channel", default, skip_serializing_if = "Vec::is_empty")]
    pub channels: Vec<Channel>,
    #[serde(rename = "marker", default, skip_serializing_if = "Vec::is_empty")]
    pub markers: Vec<Marker>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    #[serde(rename = "@role", default, skip_serializing_if = "String::is_empty")]
    pub role: String,
    #[serde(rename = "@srcCh", default, skip_serializing_if = "String::is_empty")]
    pub src_ch: String,
    #[serde(rename = "@start", default, skip_serializing_if = "String::is_empty")]
    pub start: String,
    #[serde(rename = "@duration", default, skip_serializing_if = "String::is_empty")]
    pub duration: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Gap {
    #[serde(rename = "@name", default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(rename = "@offset", default, skip_serializing_if = "String::is_empty")]
    pub offset: String,
    #[serde(rename = "@start", default, skip_serializing_if = "String::is_empty")]
    pub start: String,
    #[serde(rename = "@duration", default, skip_serializing_if = "String::is_empty")]
    pub duration: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Title {
    #[serde(rename = "@name", default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(rename = "@ref", default, skip_serializing_if = "String::is_empty")]
    pub reference: String,
    #[serde(rename = "@offset", default, skip_serializing_if = "String::is_empty")]
    pub offset: String,
    #[serde(rename = "@start", default, skip_serializing_if = "String::is_empty")]
    pub start: String,
    #[serde(rename = "@duration", default, skip_serializing_if = "String::is_empty")]
    pub duration: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    #[serde(rename = "@name", default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(rename = "@offset", default, skip_serializing_if = "String::is_empty")]
    pub offset: String,
    #[serde(rename = "@duration", default, skip_serializing_if = "String::is_empty")]
    pub duration: String,
    #[serde(rename = "filter-video", default, skip_serializing_if = "Option::is_none")]
    pub filter_video: Option<Filter>,
    #[serde(rename = "filter-audio", default, skip_serializing_if = "Option::is_none")]
    pub filter_audio: Option<Filter>,
}

/// `<filter-video>` / `<filter-audio>` inside a transition.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    #[serde(rename = "@ref", default, skip_serializing_if = "String::is_empty")]
    pub reference: String,
    #[serde(rename = "@name", default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(rename = "param", default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<Param>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Param {
    #[serde(rename = "@name", default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(rename = "@key", default, skip_serializing_if = "String::is_empty")]
    pub key: String,
    #[serde(rename = "@value", default, skip_serializing_if = "String::is_empty")]
    pub value: String,
}

/// `<ref-clip>`: reference to a compound clip stored as a `<media>` resource.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RefClip {
    #[serde(rename = "@name", default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(rename = "@ref", default, skip_serializing_if = "String::is_empty")]
    pub reference: String,
    #[serde(rename = "@offset", default, skip_serializing_if = "String::is_empty")]
    pub offset: String,
    #[serde(rename = "@start", default, skip_serializing_if = "String::is_empty")]
    pub start: String,
    #[serde(rename = "@duration", default, skip_serializing_if = "String::is_empty")]
    pub duration: String,
    /// `"audio"` routes the clip to audio; anything else means video.
    #[serde(rename = "@srcEnable", default, skip_serializing_if = "String::is_empty")]
    pub src_enable: String,
    #[serde(rename = "@useAudioSubroles", default, skip_serializing_if = "String::is_empty")]
    pub use_audio_subroles: String,
    #[serde(rename = "marker", default, skip_serializing_if = "Vec::is_empty")]
    pub markers: Vec<Marker>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    #[serde(rename = "@start", default, skip_serializing_if = "String::is_empty")]
    pub start: String,
    #[serde(rename = "@duration", default, skip_serializing_if = "String::is_empty")]
    pub duration: String,
    #[serde(rename = "@value", default, skip_serializing_if = "String::is_empty")]
    pub value: String,
    #[serde(rename = "@note", default, skip_serializing_if = "String::is_empty")]
    pub note: String,
    #[serde(rename = "@completed", default, skip_serializing_if = "String::is_empty")]
    pub completed: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Keyword {
    #[serde(rename = "@start", default, skip_serializing_if = "String::is_empty")]
    pub start: String,
    #[serde(rename = "@duration", default, skip_serializing_if = "String::is_empty")]
    pub duration: String,
    #[serde(rename = "@value", default, skip_serializing_if = "String::is_empty")]
    pub value: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(rename = "md", default, skip_serializing_if = "Vec::is_empty")]
    pub entries: Vec<MetadataEntry>,
}

/// `<md key=… value=…/>`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MetadataEntry {
    #[serde(rename = "@key", default, skip_serializing_if = "String::is_empty")]
    pub key: String,
    #[serde(rename = "@value", default, skip_serializing_if = "String::is_empty")]
    pub value: String,
}

/// `<resources>`: id-addressed shared definitions. Never resolved by the converter.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Resources {
    #[serde(rename = "format", default, skip_serializing_if = "Vec::is_empty")]
    pub formats: Vec<Format>,
    #[serde(rename = "asset", default, skip_serializing_if = "Vec::is_empty")]
    pub assets: Vec<Asset>,
    #[serde(rename = "media", default, skip_serializing_if = "Vec::is_empty")]
    pub media: Vec<Media>,
    #[serde(rename = "effect", default, skip_serializing_if = "Vec::is_empty")]
    pub effects: Vec<Effect>,
}

impl Resources {
    /// Compound clip body with the given id.
    pub fn media_by_id(&self, id: &str) -> Option<&Media> {
        self.media.iter().find(|m| m.id == id)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Format {
    #[serde(rename = "@id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(rename = "@name", default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(rename = "@frameDuration", default, skip_serializing_if = "String::is_empty")]
    pub frame_duration: String,
    #[serde(rename = "@width", default, skip_serializing_if = "String::is_empty")]
    pub width: String,
    #[serde(rename = "@height", default, skip_serializing_if = "String::is_empty")]
    pub height: String,
    #[serde(rename = "@colorSpace", default, skip_serializing_if = "String::is_empty")]
    pub color_space: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    #[serde(rename = "@id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(rename = "@name", default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(rename = "@uid", default, skip_serializing_if = "String::is_empty")]
    pub uid: String,
    #[serde(rename = "@src", default, skip_serializing_if = "String::is_empty")]
    pub src: String,
    #[serde(rename = "@start", default, skip_serializing_if = "String::is_empty")]
    pub start: String,
    #[serde(rename = "@duration", default, skip_serializing_if = "String::is_empty")]
    pub duration: String,
    #[serde(rename = "@format", default, skip_serializing_if = "String::is_empty")]
    pub format: String,
    #[serde(rename = "@hasVideo", default, skip_serializing_if = "String::is_empty")]
    pub has_video: String,
    #[serde(rename = "@hasAudio", default, skip_serializing_if = "String::is_empty")]
    pub has_audio: String,
    #[serde(rename = "@audioSources", default, skip_serializing_if = "String::is_empty")]
    pub audio_sources: String,
    #[serde(rename = "@audioChannels", default, skip_serializing_if = "String::is_empty")]
    pub audio_channels: String,
    #[serde(rename = "@audioRate", default, skip_serializing_if = "String::is_empty")]
    pub audio_rate: String,
}

/// `<media>`: compound clip body referenced by `<ref-clip ref=…>`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Media {
    #[serde(rename = "@id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(rename = "@name", default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(rename = "@uid", default, skip_serializing_if = "String::is_empty")]
    pub uid: String,
    #[serde(rename = "@modDate", default, skip_serializing_if = "String::is_empty")]
    pub mod_date: String,
    #[serde(rename = "sequence", default, skip_serializing_if = "Option::is_none")]
    pub sequence: Option<Sequence>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Effect {
    #[serde(rename = "@id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(rename = "@name", default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(rename = "@uid", default, skip_serializing_if = "String::is_empty")]
    pub uid: String,
}

#[cfg(test)]
#[path = "../../tests/unit/document/model.rs"]
mod tests;
