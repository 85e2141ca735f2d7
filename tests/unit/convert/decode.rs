use super::*;

fn project_xml(inner: &str) -> String {
    format!(
        r#"<fcpxml version="1.9"><project name="Cut"><sequence format="r1"><spine>{inner}</spine></sequence></project></fcpxml>"#
    )
}

fn spine_tracks(inner: &str) -> SpineTracks {
    let doc = parse_document(&project_xml(inner)).unwrap();
    let spine = doc.projects.into_iter().next().unwrap().sequence.unwrap().spine.unwrap();
    Decoder::default().decode_spine(&spine).unwrap()
}

fn rt(value: f64, rate: f64) -> RationalTime {
    RationalTime::new(value, rate)
}

#[test]
fn video_and_gaps_materialize_one_video_track() {
    let tl = decode_str(&project_xml(
        r#"<video name="a" duration="1200/24s"/>
           <gap name="g" duration="600/24s"/>
           <video name="b" duration="1800/24s"/>"#,
    ))
    .unwrap();

    assert_eq!(tl.name, "Cut");
    let video = tl.video_tracks();
    assert_eq!(video.len(), 1);
    assert_eq!(video[0].name, VIDEO_TRACK_NAME);
    assert_eq!(video[0].children.len(), 3);
    assert!(tl.audio_tracks().is_empty());
    assert_eq!(video[0].duration().unwrap(), rt(3600.0, 24.0));
}

#[test]
fn gap_fans_out_to_both_tracks_at_zero_start() {
    let tracks = spine_tracks(r#"<gap name="g" offset="10s" start="5s" duration="600/24s"/>"#);
    for track in [&tracks.video, &tracks.audio] {
        let [Composable::Gap(g)] = track.children.as_slice() else {
            panic!("expected a single gap on {}", track.name);
        };
        let range = g.source_range.unwrap();
        assert_eq!(range.start_time, RationalTime::default());
        assert_eq!(range.duration, rt(600.0, 24.0));
    }
    assert!(tracks.into_tracks().is_empty());
}

#[test]
fn clip_with_video_and_audio_yields_two_clips() {
    let tl = decode_str(&project_xml(
        r#"<asset-clip name="Interview" ref="r2" start="24/24s" duration="48/24s" audioDuration="48/24s">
               <video ref="r2" duration="48/24s"/>
               <audio ref="r2" duration="48/24s"/>
               <marker start="30/24s" value="beat"/>
           </asset-clip>"#,
    ))
    .unwrap();

    let clips = tl.find_clips();
    assert_eq!(clips.len(), 2);
    for clip in clips {
        assert_eq!(clip.name, "Interview");
        assert_eq!(clip.media_reference.as_ref().unwrap().target_url, "r2");
        let range = clip.source_range.unwrap();
        assert_eq!(range.start_time, rt(24.0, 24.0));
        assert_eq!(range.duration, rt(48.0, 24.0));
        assert_eq!(clip.markers.len(), 1);
    }
    assert_eq!(tl.video_tracks().len(), 1);
    assert_eq!(tl.audio_tracks().len(), 1);
}

#[test]
fn clip_branches_are_independent() {
    let tracks = spine_tracks(
        r#"<asset-clip name="music" audioDuration="96/24s" duration="96/24s"/>
           <clip name="bare" duration="24/24s"/>"#,
    );
    assert!(tracks.video.is_empty());
    assert_eq!(tracks.audio.children.len(), 1);
    assert_eq!(tracks.audio.children[0].name(), "music");
}

#[test]
fn standalone_video_and_audio_land_on_their_tracks() {
    let tl = decode_str(&project_xml(
        r#"<video name="v" ref="r4" duration="10s"><marker start="1s" value="m"/></video>
           <audio name="a" ref="r5" duration="5s"/>"#,
    ))
    .unwrap();

    let video = tl.video_tracks();
    let audio = tl.audio_tracks();
    assert_eq!(video[0].children[0].name(), "v");
    assert_eq!(audio[0].children[0].name(), "a");

    let Composable::Clip(v) = &video[0].children[0] else {
        panic!("expected clip");
    };
    assert_eq!(v.duration().unwrap(), rt(10.0, 24.0));
    assert_eq!(v.markers[0].marked_range.start_time, rt(1.0, 24.0));
}

#[test]
fn markers_map_value_note_and_green() {
    let tracks = spine_tracks(
        r#"<video name="v" duration="240/24s">
               <marker start="48/24s" value="Chapter" note="intro"/>
           </video>"#,
    );
    let Composable::Clip(clip) = &tracks.video.children[0] else {
        panic!("expected clip");
    };
    let marker = &clip.markers[0];
    assert_eq!(marker.name, "Chapter");
    assert_eq!(marker.comment, "intro");
    assert_eq!(marker.color, MarkerColor::Green);
    assert_eq!(marker.marked_range.start_time, rt(48.0, 24.0));
    assert_eq!(marker.marked_range.duration, RationalTime::default());
}

#[test]
fn ref_clip_becomes_stack_routed_by_src_enable() {
    let tracks = spine_tracks(
        r#"<ref-clip name="Compound" ref="r7" duration="100/24s"/>
           <ref-clip name="Music Bed" ref="r8" duration="200/24s" srcEnable="audio"/>
           <ref-clip name="Picture" ref="r9" duration="50/24s" srcEnable="video"/>"#,
    );

    let names = |t: &Track| t.children.iter().map(|c| c.name().to_string()).collect::<Vec<_>>();
    assert_eq!(names(&tracks.video), ["Compound", "Picture"]);
    assert_eq!(names(&tracks.audio), ["Music Bed"]);

    let Composable::Stack(stack) = &tracks.audio.children[0] else {
        panic!("expected stack");
    };
    assert_eq!(stack.metadata_str(REF_METADATA_KEY), Some("r8"));
    assert_eq!(stack.metadata_str(SRC_ENABLE_METADATA_KEY), Some("audio"));
    assert_eq!(stack.duration().unwrap(), rt(200.0, 24.0));

    let Composable::Stack(plain) = &tracks.video.children[0] else {
        panic!("expected stack");
    };
    assert_eq!(plain.metadata_str(REF_METADATA_KEY), Some("r7"));
    assert!(plain.metadata_str(SRC_ENABLE_METADATA_KEY).is_none());
    assert!(plain.children.is_empty());
}

#[test]
fn transitions_titles_and_unknown_tags_are_skipped() {
    let tracks = spine_tracks(
        r#"<video name="a" duration="24/24s"/>
           <transition name="Cross Dissolve" duration="12/24s"/>
           <title name="Basic Title" ref="r3" duration="24/24s"/>
           <mc-clip name="multi" duration="24/24s"/>
           <video name="b" duration="24/24s"/>"#,
    );
    assert_eq!(tracks.video.children.len(), 2);
    assert!(tracks.audio.is_empty());
}

#[test]
fn bad_times_name_the_element() {
    let err = decode_str(&project_xml(r#"<gap duration="abc"/>"#)).unwrap_err();
    assert!(matches!(
        err,
        FcpxError::MalformedDuration { element: "gap", ref value } if value == "abc"
    ));

    let err = decode_str(&project_xml(
        r#"<video name="v" duration="24/24s"><marker start="x/24s" value="m"/></video>"#,
    ))
    .unwrap_err();
    assert!(matches!(err, FcpxError::MalformedStart { element: "marker", .. }));

    let err = decode_str(&project_xml(r#"<ref-clip ref="r1" duration="1/0/2s"/>"#)).unwrap_err();
    assert!(matches!(err, FcpxError::MalformedDuration { element: "ref-clip", .. }));
}

#[test]
fn empty_spine_and_missing_sequence_give_empty_root() {
    let tl = decode_str(&project_xml("")).unwrap();
    assert!(tl.tracks().unwrap().children.is_empty());

    let tl = decode_str(r#"<fcpxml version="1.9"><project name="Bare"/></fcpxml>"#).unwrap();
    assert_eq!(tl.name, "Bare");
    assert!(tl.tracks().unwrap().children.is_empty());
}

#[test]
fn document_without_project_is_rejected() {
    let err = decode_str(r#"<fcpxml version="1.9"><resources/></fcpxml>"#).unwrap_err();
    assert!(matches!(err, FcpxError::NoProjectFound));
}

#[test]
fn codec_default_rate_applies_to_bare_numbers() {
    let doc = parse_document(&project_xml(r#"<video name="v" duration="3s"/>"#)).unwrap();
    let decoder = Decoder::new(DecodeOpts {
        codec: TimeCodec::with_default_rate(30.0),
    });
    let tl = decoder.decode(&doc).unwrap();
    assert_eq!(tl.find_clips()[0].duration().unwrap(), rt(3.0, 30.0));
}

#[test]
fn repeated_root_elements_decode_the_first_project() {
    let tl = decode_str(
        r#"<fcpxml version="1.9">
            <project name="A"><sequence><spine><video name="a" duration="1s"/></spine></sequence></project>
            <project name="B"/>
        </fcpxml>"#,
    )
    .unwrap();
    assert_eq!(tl.name, "A");
    assert_eq!(tl.find_clips().len(), 1);

    let tl = decode_str(
        r#"<fcpxml version="1.9">
            <event name="one"/>
            <event name="two"><project name="Picked"/></event>
        </fcpxml>"#,
    )
    .unwrap();
    assert_eq!(tl.name, "Picked");
}

#[test]
fn audio_lanes_collapse_into_one_audio_clip() {
    let tracks = spine_tracks(
        r#"<clip name="Walk" ref="r2" duration="48/24s">
               <video ref="r2" duration="48/24s"/>
               <audio ref="r3" lane="-1" duration="48/24s"/>
               <audio ref="r4" lane="-2" duration="48/24s"/>
           </clip>"#,
    );
    assert_eq!(tracks.video.children.len(), 1);
    assert_eq!(tracks.audio.children.len(), 1);
    assert_eq!(tracks.audio.children[0].name(), "Walk");
}

#[test]
fn clip_errors_name_the_source_tag() {
    let err = decode_str(&project_xml(r#"<clip name="c" ref="r2" duration="bad"/>"#)).unwrap_err();
    assert!(matches!(
        err,
        FcpxError::MalformedDuration { element: "clip", ref value } if value == "bad"
    ));

    let err =
        decode_str(&project_xml(r#"<asset-clip name="c" ref="r2" start="?" duration="1s"/>"#))
            .unwrap_err();
    assert!(matches!(err, FcpxError::MalformedStart { element: "asset-clip", .. }));
}

#[test]
fn gaps_only_spine_yields_no_tracks() {
    let tl = decode_str(&project_xml(r#"<gap duration="10s"/><gap duration="5s"/>"#)).unwrap();
    assert!(tl.tracks().unwrap().children.is_empty());
}
