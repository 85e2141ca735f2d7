use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        FcpxError::malformed_input("x")
            .to_string()
            .contains("malformed input:")
    );
    assert!(
        FcpxError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
    assert_eq!(
        FcpxError::NoProjectFound.to_string(),
        "no project found in FCPXML document"
    );
}

#[test]
fn time_errors_name_element_and_value() {
    let err = FcpxError::MalformedDuration {
        element: "video",
        value: "abc".to_string(),
    };
    let msg = err.to_string();
    assert!(msg.contains("duration"));
    assert!(msg.contains("<video>"));
    assert!(msg.contains("'abc'"));

    let err = FcpxError::MalformedStart {
        element: "marker",
        value: "x/y".to_string(),
    };
    assert!(err.to_string().contains("start on <marker>"));
}

#[test]
fn item_errors_carry_kind_and_name() {
    let err = FcpxError::unsupported_item("transition", "Dissolve");
    assert!(err.to_string().contains("transition 'Dissolve'"));

    let err = FcpxError::duration_unset("gap", "g0");
    assert!(err.to_string().contains("gap 'g0'"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = FcpxError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
