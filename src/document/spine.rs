//! The heterogeneous `<spine>` list.
//!
//! Children are decoded in document order by tag name into [`SpineItem`]; unknown tags are
//! skipped together with their subtree so newer FCPXML revisions still load.

use std::fmt;

use serde::de::{IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::document::model::{
    ASSET_CLIP_TAG, Audio, CLIP_TAG, Clip, Gap, RefClip, Title, Transition, Video,
};

/// One entry of the primary storyline.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum SpineItem {
    /// `<asset-clip>` or `<clip>`; always written back as `<asset-clip>`.
    #[serde(rename = "asset-clip")]
    Clip(Clip),
    #[serde(rename = "video")]
    Video(Video),
    #[serde(rename = "audio")]
    Audio(Audio),
    #[serde(rename = "gap")]
    Gap(Gap),
    #[serde(rename = "title")]
    Title(Title),
    #[serde(rename = "transition")]
    Transition(Transition),
    #[serde(rename = "ref-clip")]
    RefClip(RefClip),
}

impl SpineItem {
    /// Element tag this item is written as.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Clip(_) => "asset-clip",
            Self::Video(_) => "video",
            Self::Audio(_) => "audio",
            Self::Gap(_) => "gap",
            Self::Title(_) => "title",
            Self::Transition(_) => "transition",
            Self::RefClip(_) => "ref-clip",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SpineTag {
    /// Carries the tag it was read from.
    Clip(&'static str),
    Video,
    Audio,
    Gap,
    Title,
    Transition,
    RefClip,
}

impl SpineTag {
    fn from_name(name: &str) -> Option<Self> {
        // Dispatch on the local name; namespace prefixes are irrelevant.
        let local = name.rsplit(':').next().unwrap_or(name);
        Some(match local {
            "asset-clip" => Self::Clip(ASSET_CLIP_TAG),
            "clip" => Self::Clip(CLIP_TAG),
            "video" => Self::Video,
            "audio" => Self::Audio,
            "gap" => Self::Gap,
            "title" => Self::Title,
            "transition" => Self::Transition,
            "ref-clip" => Self::RefClip,
            _ => return None,
        })
    }
}

/// `<spine>`: ordered, mixed list of storyline items.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Spine {
    #[serde(rename = "$value")]
    pub items: Vec<SpineItem>,
}

impl Spine {
    pub fn new(items: Vec<SpineItem>) -> Self {
        Self { items }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<'de> Deserialize<'de> for Spine {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(SpineVisitor)
    }
}

struct SpineVisitor;

impl<'de> Visitor<'de> for SpineVisitor {
    type Value = Spine;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a <spine> element")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Spine, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut items = Vec::new();
        // Keys arrive in document order: attributes (`@`-prefixed), text (`$text`) and one
        // key per child element.
        while let Some(key) = map.next_key::<String>()? {
            let Some(tag) = SpineTag::from_name(&key) else {
                if !key.starts_with('@') && key != "$text" {
                    tracing::debug!(tag = %key, "skipping unrecognized spine element");
                }
                map.next_value::<IgnoredAny>()?;
                continue;
            };

            let item = match tag {
                SpineTag::Clip(tag) => {
                    let mut clip: Clip = map.next_value()?;
                    clip.tag = tag;
                    SpineItem::Clip(clip)
                }
                SpineTag::Video => SpineItem::Video(map.next_value()?),
                SpineTag::Audio => SpineItem::Audio(map.next_value()?),
                SpineTag::Gap => SpineItem::Gap(map.next_value()?),
                SpineTag::Title => SpineItem::Title(map.next_value()?),
                SpineTag::Transition => SpineItem::Transition(map.next_value()?),
                SpineTag::RefClip => SpineItem::RefClip(map.next_value()?),
            };
            items.push(item);
        }
        Ok(Spine { items })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/document/spine.rs"]
mod tests;
