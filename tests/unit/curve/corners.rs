use super::*;

fn smooth_then_right_angle() -> PathCurve {
    // Anchor 1 is smooth in both halves; anchor 2 turns the path by 90 degrees.
    PathCurve::from_flat(
        &[0.0, 0.0, 1.0, 0.3, 2.0, 0.6, 3.0, 1.0],
        &[
            0.3, 0.1, 0.7, 0.2, 1.3, 0.4, 1.7, 0.5, 2.3, 0.7, 2.7, 0.9,
        ],
        &[
            0.0, 0.0, 0.0, 3.0, 0.0, 0.0, 6.0, 0.0, 0.0, 6.0, 3.0, 0.0,
        ],
        &[
            1.0, 0.0, 0.0, 2.0, 0.0, 0.0, 4.0, 0.0, 0.0, 5.0, 0.0, 0.0, 6.0, 1.0, 0.0, 6.0, 2.0,
            0.0,
        ],
        serde_json::Value::Null,
    )
    .unwrap()
}

#[test]
fn detects_spatial_corner_only() {
    assert_eq!(path_corners(&smooth_then_right_angle()), vec![0, 2]);
}

#[test]
fn easing_corner_is_detected() {
    let e = EasingCurve::from_flat(
        &[0.0, 0.0, 1.0, 1.0, 2.0, 0.0],
        &[0.3, 0.3, 0.7, 0.7, 1.3, 0.7, 1.7, 0.3],
    )
    .unwrap();
    assert_eq!(easing_corners(&e), vec![0, 1]);
}

#[test]
fn zero_handle_is_not_a_corner() {
    let e = EasingCurve::from_flat(
        &[0.0, 0.0, 1.0, 1.0, 2.0, 0.0],
        &[0.3, 0.3, 1.0, 1.0, 1.3, 0.7, 1.7, 0.3],
    )
    .unwrap();
    assert_eq!(easing_corners(&e), vec![0]);
}

#[test]
fn runs_cover_every_segment() {
    assert_eq!(runs(&[0], 3), vec![(0, 3)]);
    assert_eq!(runs(&[0, 2], 3), vec![(0, 2), (2, 3)]);
}
