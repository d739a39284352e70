use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        CurveError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        CurveError::conversion("x")
            .to_string()
            .contains("conversion error:")
    );
    assert!(
        CurveError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = CurveError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn json_errors_map_to_serde_variant() {
    let err: CurveError = serde_json::from_str::<Vec<f64>>("[1, oops]")
        .unwrap_err()
        .into();
    assert!(matches!(err, CurveError::Serde(_)));
}
