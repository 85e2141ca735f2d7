use super::*;
use crate::document::io::parse_document;

fn spine_of(inner: &str) -> Spine {
    let xml = format!(
        r#"<fcpxml version="1.9"><project name="p"><sequence><spine>{inner}</spine></sequence></project></fcpxml>"#
    );
    let doc = parse_document(&xml).unwrap();
    doc.projects.into_iter().next().unwrap().sequence.unwrap().spine.unwrap()
}

fn tags(spine: &Spine) -> Vec<&'static str> {
    spine.items.iter().map(SpineItem::tag).collect()
}

#[test]
fn keeps_document_order_across_kinds() {
    let spine = spine_of(
        r#"
        <video name="v1" duration="24/24s"/>
        <gap name="g" duration="12/24s"/>
        <asset-clip name="c" ref="r2" duration="48/24s"/>
        <audio name="a" duration="24/24s"/>
        <transition name="t" duration="6/24s"/>
        <title name="ti" duration="24/24s"/>
        <ref-clip name="rc" ref="r1" duration="24/24s"/>
        "#,
    );
    assert_eq!(
        tags(&spine),
        ["video", "gap", "asset-clip", "audio", "transition", "title", "ref-clip"]
    );
}

#[test]
fn clip_and_asset_clip_share_a_variant() {
    let spine = spine_of(r#"<clip name="a"/><asset-clip name="b"/>"#);
    let names: Vec<_> = spine
        .items
        .iter()
        .map(|i| match i {
            SpineItem::Clip(c) => c.name.clone(),
            other => panic!("unexpected {other:?}"),
        })
        .collect();
    assert_eq!(names, ["a", "b"]);
}

#[test]
fn unknown_elements_are_skipped_with_their_subtree() {
    let spine = spine_of(
        r#"
        <video name="v1" duration="24/24s"/>
        <mc-clip name="multicam" duration="24/24s">
            <mc-source angleID="a"><video name="nested"/></mc-source>
        </mc-clip>
        <video name="v2" duration="24/24s"/>
        "#,
    );
    assert_eq!(spine.items.len(), 2);
    let names: Vec<_> = spine
        .items
        .iter()
        .filter_map(|i| match i {
            SpineItem::Video(v) => Some(v.name.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(names, ["v1", "v2"]);
}

#[test]
fn empty_spine_has_no_items() {
    assert!(spine_of("").is_empty());
}

#[test]
fn nested_children_decode_fully() {
    let spine = spine_of(
        r#"<asset-clip name="c" ref="r2" duration="48/24s" audioDuration="48/24s">
            <marker start="12/24s" value="m1"/>
            <video ref="r2" duration="48/24s"/>
            <marker start="24/24s" value="m2"/>
            <audio ref="r2" duration="48/24s" role="dialogue"/>
        </asset-clip>"#,
    );
    let SpineItem::Clip(clip) = &spine.items[0] else {
        panic!("expected clip");
    };
    assert_eq!(clip.videos.len(), 1);
    assert_eq!(clip.audios[0].role, "dialogue");
    let values: Vec<_> = clip.markers.iter().map(|m| m.value.as_str()).collect();
    assert_eq!(values, ["m1", "m2"]);
}

#[test]
fn transition_keeps_filters() {
    let spine = spine_of(
        r#"<transition name="Cross Dissolve" offset="0s" duration="1s">
            <filter-video ref="r12" name="Cross Dissolve">
                <param name="Amount" key="2" value="50"/>
            </filter-video>
            <filter-audio ref="r13" name="Audio Crossfade"/>
        </transition>"#,
    );
    let SpineItem::Transition(t) = &spine.items[0] else {
        panic!("expected transition");
    };
    assert_eq!(t.filter_video.as_ref().unwrap().params[0].value, "50");
    assert_eq!(t.filter_audio.as_ref().unwrap().name, "Audio Crossfade");
}
