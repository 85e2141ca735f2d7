use super::*;

fn rt(value: f64, rate: f64) -> RationalTime {
    RationalTime::new(value, rate)
}

fn range(start: f64, dur: f64, rate: f64) -> Option<TimeRange> {
    Some(TimeRange::new(rt(start, rate), rt(dur, rate)))
}

#[test]
fn new_timeline_has_empty_root_stack() {
    let tl = Timeline::new("t");
    let stack = tl.tracks().unwrap();
    assert_eq!(stack.name, ROOT_STACK_NAME);
    assert!(stack.children.is_empty());
    assert!(tl.video_tracks().is_empty());
    assert!(tl.audio_tracks().is_empty());
}

#[test]
fn tracks_are_filtered_by_kind() {
    let mut tl = Timeline::new("t");
    let root = tl.tracks_mut().unwrap();
    root.append_child(Track::new("V1", TrackKind::Video));
    root.append_child(Track::new("A1", TrackKind::Audio));
    root.append_child(Track::new("V2", TrackKind::Video));

    let names: Vec<_> = tl.video_tracks().iter().map(|t| t.name.clone()).collect();
    assert_eq!(names, ["V1", "V2"]);
    assert_eq!(tl.audio_tracks().len(), 1);
}

#[test]
fn clip_duration_requires_source_range() {
    let clip = Clip::new("c", None, None, Vec::new());
    assert!(matches!(
        clip.duration(),
        Err(FcpxError::DurationUnset { kind: "clip", .. })
    ));

    let clip = Clip::new("c", None, range(10.0, 48.0, 24.0), Vec::new());
    assert_eq!(clip.duration().unwrap(), rt(48.0, 24.0));
}

#[test]
fn stack_duration_falls_back_to_longest_child() {
    let mut stack = Stack::new("s", None, Vec::new());
    assert!(stack.duration().is_err());

    stack.append_child(Gap::new("g", range(0.0, 24.0, 24.0)));
    stack.append_child(Clip::new("c", None, range(0.0, 60.0, 30.0), Vec::new()));
    assert_eq!(stack.duration().unwrap(), rt(60.0, 30.0));

    stack.source_range = range(0.0, 5.0, 24.0);
    assert_eq!(stack.duration().unwrap(), rt(5.0, 24.0));
}

#[test]
fn track_duration_sums_at_first_rate() {
    let mut track = Track::new("V", TrackKind::Video);
    track.append_child(Gap::new("g", range(0.0, 24.0, 24.0)));
    track.append_child(Gap::new("g", range(0.0, 48.0, 48.0)));
    assert_eq!(track.duration().unwrap(), rt(48.0, 24.0));
}

#[test]
fn stack_metadata_reads_strings_only() {
    let mut stack = Stack::new("s", None, Vec::new());
    stack.set_metadata("fcpx_ref", "r7");
    stack.set_metadata("count", 3);
    assert_eq!(stack.metadata_str("fcpx_ref"), Some("r7"));
    assert_eq!(stack.metadata_str("count"), None);
    assert_eq!(stack.metadata().len(), 2);
}

#[test]
fn find_clips_descends_into_tracks_and_stacks() {
    let mut tl = Timeline::new("t");
    let mut nested = Stack::new("compound", None, Vec::new());
    nested.append_child(Clip::new("inner", None, None, Vec::new()));

    let mut v = Track::new("V", TrackKind::Video);
    v.append_child(Clip::new("outer", None, None, Vec::new()));
    v.append_child(nested);
    tl.tracks_mut().unwrap().append_child(v);

    let names: Vec<_> = tl.find_clips().iter().map(|c| c.name.clone()).collect();
    assert_eq!(names, ["outer", "inner"]);
}

#[test]
fn json_roundtrip_keeps_item_kinds() {
    let mut tl = Timeline::new("t");
    let mut v = Track::new("V", TrackKind::Video);
    v.append_child(Gap::new("g", range(0.0, 12.0, 24.0)));
    v.append_child(Stack::new("s", range(0.0, 24.0, 24.0), Vec::new()));
    tl.tracks_mut().unwrap().append_child(v);

    let mut buf = Vec::new();
    tl.to_writer(&mut buf).unwrap();
    let de = Timeline::from_reader(buf.as_slice()).unwrap();
    let kinds: Vec<_> = de.video_tracks()[0]
        .children
        .iter()
        .map(Composable::kind_name)
        .collect();
    assert_eq!(kinds, ["gap", "stack"]);
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = Timeline::from_reader(&b"{\"name\": 3}"[..]).unwrap_err();
    assert!(err.to_string().starts_with("serialization error: parse timeline JSON"));

    let err = Timeline::from_path("does/not/exist.json").unwrap_err();
    assert!(matches!(err, FcpxError::Other(_)));
}
