use super::*;

#[test]
fn defaults_validate() {
    let o = ConvertOpts::default();
    o.validate().unwrap();
    assert_eq!(o.samples, 20);
    assert_eq!(o.max_cycles, 10);
    assert_eq!(o.fine_tune.iterations, 15);
    assert_eq!(o.fine_tune.samples, 200);
}

#[test]
fn partial_json_fills_defaults() {
    let o = ConvertOpts::from_json_str(r#"{"max_segments": 2, "fine_tune": {"iterations": 5}}"#)
        .unwrap();
    assert_eq!(o.max_segments, 2);
    assert_eq!(o.fine_tune.iterations, 5);
    assert_eq!(o.fine_tune.samples, 200);
    assert_eq!(o.max_error_3d, 0.03);
}

#[test]
fn zero_counts_and_bad_bounds_are_rejected() {
    let o = ConvertOpts {
        samples: 0,
        ..ConvertOpts::default()
    };
    assert!(o.validate().unwrap_err().to_string().contains("samples"));

    let o = ConvertOpts {
        max_error_3d: -1.0,
        ..ConvertOpts::default()
    };
    assert!(o.validate().unwrap_err().to_string().contains("max_error_3d"));

    assert!(ConvertOpts::from_json_str(r#"{"max_cycles": 0}"#).is_err());
}
