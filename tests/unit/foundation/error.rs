use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        StorycamError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(StorycamError::parse("x").to_string().contains("parse error:"));
    assert!(StorycamError::not_found("x").to_string().contains("not found:"));
    assert!(StorycamError::io("x").to_string().contains("io error:"));
    assert!(
        StorycamError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = StorycamError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
