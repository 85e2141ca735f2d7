use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::{FcpxError, FcpxResult};
use crate::timeline::time::{RationalTime, TimeRange};

/// Name given to the root stack created by [`Timeline::new`].
pub const ROOT_STACK_NAME: &str = "tracks";

/// Editorial timeline: a name and a root stack of tracks.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Timeline {
    pub name: String,
    /// Root stack. `None` only for hand-built timelines; [`Timeline::new`] always sets it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracks: Option<Stack>,
}

impl Timeline {
    /// Create an empty timeline with an empty root stack.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tracks: Some(Stack::new(ROOT_STACK_NAME, None, Vec::new())),
        }
    }

    /// Root stack, if present.
    pub fn tracks(&self) -> Option<&Stack> {
        self.tracks.as_ref()
    }

    /// Mutable root stack, if present.
    pub fn tracks_mut(&mut self) -> Option<&mut Stack> {
        self.tracks.as_mut()
    }

    /// Tracks of the root stack with `kind == Video`, in order.
    pub fn video_tracks(&self) -> Vec<&Track> {
        self.tracks_of_kind(TrackKind::Video)
    }

    /// Tracks of the root stack with `kind == Audio`, in order.
    pub fn audio_tracks(&self) -> Vec<&Track> {
        self.tracks_of_kind(TrackKind::Audio)
    }

    fn tracks_of_kind(&self, kind: TrackKind) -> Vec<&Track> {
        let Some(stack) = &self.tracks else {
            return Vec::new();
        };
        stack
            .children
            .iter()
            .filter_map(|c| match c {
                Composable::Track(t) if t.kind == kind => Some(t),
                _ => None,
            })
            .collect()
    }

    /// Parse a timeline from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> FcpxResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| FcpxError::serde(format!("parse timeline JSON: {e}")))
    }

    /// Parse a timeline from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> FcpxResult<Self> {
        let path = path.as_ref();
        let f = File::open(path)
            .with_context(|| format!("open timeline JSON '{}'", path.display()))?;
        Self::from_reader(BufReader::new(f))
    }

    /// Write the timeline as pretty-printed JSON.
    pub fn to_writer<W: std::io::Write>(&self, w: W) -> FcpxResult<()> {
        serde_json::to_writer_pretty(w, self)
            .map_err(|e| FcpxError::serde(format!("write timeline JSON: {e}")))
    }

    /// All clips in the timeline, depth-first in child order.
    pub fn find_clips(&self) -> Vec<&Clip> {
        let mut out = Vec::new();
        if let Some(stack) = &self.tracks {
            collect_clips(&stack.children, &mut out);
        }
        out
    }
}

fn collect_clips<'a>(children: &'a [Composable], out: &mut Vec<&'a Clip>) {
    for child in children {
        match child {
            Composable::Clip(c) => out.push(c),
            Composable::Track(t) => collect_clips(&t.children, out),
            Composable::Stack(s) => collect_clips(&s.children, out),
            Composable::Gap(_) | Composable::Transition(_) => {}
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackKind {
    Video,
    Audio,
}

/// Ordered sequence of composable items of one media kind.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Track {
    pub name: String,
    pub kind: TrackKind,
    #[serde(default)]
    pub children: Vec<Composable>,
}

impl Track {
    pub fn new(name: impl Into<String>, kind: TrackKind) -> Self {
        Self {
            name: name.into(),
            kind,
            children: Vec::new(),
        }
    }

    pub fn append_child(&mut self, child: impl Into<Composable>) {
        self.children.push(child.into());
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Sum of child durations, expressed at the first child's rate.
    pub fn duration(&self) -> FcpxResult<RationalTime> {
        let mut total: Option<RationalTime> = None;
        for child in &self.children {
            let d = child.duration()?;
            total = Some(match total {
                None => d,
                Some(acc) => {
                    let d = d.rescaled_to(acc.rate);
                    RationalTime::new(acc.value + d.value, acc.rate)
                }
            });
        }
        total.ok_or_else(|| FcpxError::duration_unset("track", &self.name))
    }
}

/// Any item that can live inside a track or stack.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(tag = "schema", rename_all = "snake_case")]
pub enum Composable {
    Clip(Clip),
    Gap(Gap),
    Stack(Stack),
    Track(Track),
    Transition(Transition),
}

impl Composable {
    pub fn name(&self) -> &str {
        match self {
            Self::Clip(c) => &c.name,
            Self::Gap(g) => &g.name,
            Self::Stack(s) => &s.name,
            Self::Track(t) => &t.name,
            Self::Transition(t) => &t.name,
        }
    }

    /// Lowercase kind label used in logs and errors.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Clip(_) => "clip",
            Self::Gap(_) => "gap",
            Self::Stack(_) => "stack",
            Self::Track(_) => "track",
            Self::Transition(_) => "transition",
        }
    }

    pub fn duration(&self) -> FcpxResult<RationalTime> {
        match self {
            Self::Clip(c) => c.duration(),
            Self::Gap(g) => g.duration(),
            Self::Stack(s) => s.duration(),
            Self::Track(t) => t.duration(),
            Self::Transition(t) => Ok(t.duration()),
        }
    }
}

impl From<Clip> for Composable {
    fn from(v: Clip) -> Self {
        Self::Clip(v)
    }
}

impl From<Gap> for Composable {
    fn from(v: Gap) -> Self {
        Self::Gap(v)
    }
}

impl From<Stack> for Composable {
    fn from(v: Stack) -> Self {
        Self::Stack(v)
    }
}

impl From<Track> for Composable {
    fn from(v: Track) -> Self {
        Self::Track(v)
    }
}

impl From<Transition> for Composable {
    fn from(v: Transition) -> Self {
        Self::Transition(v)
    }
}

/// Media a clip points at. Only the target id/url is modeled.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ExternalReference {
    #[serde(default)]
    pub target_url: String,
}

impl ExternalReference {
    pub fn new(target_url: impl Into<String>) -> Self {
        Self {
            target_url: target_url.into(),
        }
    }
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Clip {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_reference: Option<ExternalReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_range: Option<TimeRange>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub markers: Vec<Marker>,
}

impl Clip {
    pub fn new(
        name: impl Into<String>,
        media_reference: Option<ExternalReference>,
        source_range: Option<TimeRange>,
        markers: Vec<Marker>,
    ) -> Self {
        Self {
            name: name.into(),
            media_reference,
            source_range,
            markers,
        }
    }

    /// Length of the source range; fails when no range is set.
    pub fn duration(&self) -> FcpxResult<RationalTime> {
        self.source_range
            .map(|r| r.duration)
            .ok_or_else(|| FcpxError::duration_unset("clip", &self.name))
    }
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Gap {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_range: Option<TimeRange>,
}

impl Gap {
    pub fn new(name: impl Into<String>, source_range: Option<TimeRange>) -> Self {
        Self {
            name: name.into(),
            source_range,
        }
    }

    pub fn duration(&self) -> FcpxResult<RationalTime> {
        self.source_range
            .map(|r| r.duration)
            .ok_or_else(|| FcpxError::duration_unset("gap", &self.name))
    }
}

/// Parallel composition of children. Also used as an opaque nested item (compound clip).
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Stack {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_range: Option<TimeRange>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub markers: Vec<Marker>,
    #[serde(default)]
    pub children: Vec<Composable>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, serde_json::Value>,
}

impl Stack {
    pub fn new(
        name: impl Into<String>,
        source_range: Option<TimeRange>,
        markers: Vec<Marker>,
    ) -> Self {
        Self {
            name: name.into(),
            source_range,
            markers,
            children: Vec::new(),
            metadata: BTreeMap::new(),
        }
    }

    pub fn append_child(&mut self, child: impl Into<Composable>) {
        self.children.push(child.into());
    }

    pub fn set_metadata(&mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) {
        self.metadata.insert(key.into(), value.into());
    }

    pub fn metadata(&self) -> &BTreeMap<String, serde_json::Value> {
        &self.metadata
    }

    /// String metadata value under `key`; non-string values read as absent.
    pub fn metadata_str(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).and_then(serde_json::Value::as_str)
    }

    /// Source range length, else the longest child.
    pub fn duration(&self) -> FcpxResult<RationalTime> {
        if let Some(r) = self.source_range {
            return Ok(r.duration);
        }
        let mut longest: Option<RationalTime> = None;
        for child in &self.children {
            let d = child.duration()?;
            if longest.is_none_or(|l| d.to_seconds() > l.to_seconds()) {
                longest = Some(d);
            }
        }
        longest.ok_or_else(|| FcpxError::duration_unset("stack", &self.name))
    }
}

/// Blend between adjacent items. Carried for completeness; FCPXML conversion rejects it.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Transition {
    pub name: String,
    #[serde(default)]
    pub transition_type: String,
    #[serde(default)]
    pub in_offset: RationalTime,
    #[serde(default)]
    pub out_offset: RationalTime,
}

impl Transition {
    pub fn duration(&self) -> RationalTime {
        let out = self.out_offset.rescaled_to(self.in_offset.rate);
        RationalTime::new(self.in_offset.value + out.value, self.in_offset.rate)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MarkerColor {
    Pink,
    #[default]
    Red,
    Orange,
    Yellow,
    Green,
    Cyan,
    Blue,
    Purple,
    Magenta,
    Black,
    White,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Marker {
    pub name: String,
    pub marked_range: TimeRange,
    #[serde(default)]
    pub color: MarkerColor,
    #[serde(default)]
    pub comment: String,
}

impl Marker {
    pub fn new(
        name: impl Into<String>,
        marked_range: TimeRange,
        color: MarkerColor,
        comment: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            marked_range,
            color,
            comment: comment.into(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/model.rs"]
mod tests;
