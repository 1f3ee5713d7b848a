use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        TransitionError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        TransitionError::render("x")
            .to_string()
            .contains("render error:")
    );
    assert!(
        TransitionError::media("x")
            .to_string()
            .contains("media error:")
    );
    assert!(
        TransitionError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = TransitionError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
