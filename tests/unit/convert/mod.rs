use super::*;

#[test]
fn sample_times_end_exactly_on_span_end() {
    assert_eq!(sample_times(0.0, 1.0, 4), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    let t = sample_times(0.1, 0.7, 3);
    assert_eq!(t.len(), 4);
    assert_eq!(t[0], 0.1);
    assert_eq!(t[3], 0.7);
    assert_eq!(sample_times(2.0, 3.0, 0), vec![2.0, 3.0]);
}

#[test]
fn end_tangents_use_outside_neighbours() {
    let pts: Vec<Vec2> = (0..4).map(|i| Vec2::new(i as f64, i as f64)).collect();
    let d = std::f64::consts::FRAC_1_SQRT_2;

    let (l, r) = end_tangents(&pts, 0, 3);
    assert!((l - Vec2::new(d, d)).hypot() < 1e-12);
    assert!((r - Vec2::new(-d, -d)).hypot() < 1e-12);

    let (l, r) = end_tangents(&pts, 1, 2);
    assert!((l - Vec2::new(d, d)).hypot() < 1e-12);
    assert!((r - Vec2::new(-d, -d)).hypot() < 1e-12);
}

#[test]
fn boundaries_pick_nearest_samples_in_order() {
    let samples: Vec<Vec3> = (0..=10).map(|i| Vec3::new(i as f64, 0.0, 0.0)).collect();
    let b = boundary_indices(&samples, &[Vec3::new(3.2, 0.0, 0.0), Vec3::new(7.9, 0.0, 0.0)]);
    assert_eq!(b, vec![0, 3, 8, 10]);
    assert_eq!(boundary_indices(&samples, &[]), vec![0, 10]);
}

#[test]
fn coincident_interior_anchors_still_advance() {
    let samples: Vec<Vec3> = (0..=5).map(|i| Vec3::new(i as f64, 0.0, 0.0)).collect();
    let at = Vec3::new(2.0, 0.0, 0.0);
    assert_eq!(boundary_indices(&samples, &[at, at]), vec![0, 2, 3, 5]);
}

#[test]
fn polyline_length_sums_steps() {
    let pts = [Vec2::new(0.0, 0.0), Vec2::new(3.0, 4.0), Vec2::new(3.0, 5.0)];
    assert!((polyline_length(&pts) - 6.0).abs() < 1e-12);
    assert_eq!(polyline_length::<Vec2>(&[]), 0.0);
}

#[test]
fn converter_rejects_invalid_opts() {
    let opts = ConvertOpts {
        max_segments: 0,
        ..ConvertOpts::default()
    };
    assert!(Converter::new(opts).is_err());
    let c = Converter::new(ConvertOpts::default()).unwrap();
    assert!(c.cache().is_empty());
    assert_eq!(c.opts().samples, 20);
}
