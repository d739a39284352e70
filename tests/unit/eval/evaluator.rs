use super::*;

fn eased() -> EasingCurve {
    EasingCurve::from_flat(&[0.0, 0.0, 1.0, 1.0], &[0.42, 0.0, 0.58, 1.0]).unwrap()
}

fn bent_path() -> SpatialPath {
    SpatialPath::from_flat(
        &[0.0, 0.0, 0.0, 4.0, 0.0, 0.0],
        &[0.0, 4.0, 0.0, 4.0, 4.0, 0.0],
    )
    .unwrap()
}

#[test]
fn format_names_round_trip() {
    for f in [CurveFormat::Native, CurveFormat::Interchange] {
        assert_eq!(f.as_str().parse::<CurveFormat>().unwrap(), f);
        assert_eq!(f.evaluator().format(), f);
        assert_eq!(f.opposite().opposite(), f);
    }
    assert!("lottie".parse::<CurveFormat>().is_err());
}

#[test]
fn out_of_range_times_clamp_to_end_anchors() {
    let mut cache = ArcLengthCache::default();
    let path = bent_path();
    for ev in [CurveFormat::Native.evaluator(), CurveFormat::Interchange.evaluator()] {
        let before = ev.evaluate_3d(-1.0, &eased(), &path, &mut cache);
        assert_eq!(before.ease.segment, SegmentHit::Before);
        assert_eq!(before.point, path.anchors()[0]);
        let after = ev.evaluate_3d(2.0, &eased(), &path, &mut cache);
        assert_eq!(after.ease.segment, SegmentHit::After);
        assert_eq!(after.point, path.anchors()[1]);
        assert_eq!(after.ease.value, 1.0);
    }
}

#[test]
fn interchange_reads_raw_parameter() {
    let s = InterchangeEvaluator.evaluate(0.5, &eased());
    assert_eq!(s.param, 0.5);
    // y(0.5) of (0, 0, 1, 1) values.
    assert!((s.value - 0.5).abs() < 1e-12);
    let q = InterchangeEvaluator.evaluate(0.25, &eased());
    assert!((q.value - cubic_scalar(0.0, 0.0, 1.0, 1.0, 0.25)).abs() < 1e-12);
}

#[test]
fn native_solves_time_as_timing_function() {
    let e = eased();
    let s = NativeEvaluator.evaluate(0.25, &e);
    let x = cubic_scalar(0.0, 0.42, 0.58, 1.0, s.param);
    assert!((x - 0.25).abs() < 1e-9);
    assert!((s.value - cubic_scalar(0.0, 0.0, 1.0, 1.0, s.param)).abs() < 1e-9);
    assert_eq!(NativeEvaluator.evaluate(1.0, &e).value, 1.0);
}

#[test]
fn native_path_is_arc_length_correct() {
    let mut cache = ArcLengthCache::default();
    let linear = EasingCurve::from_flat(
        &[0.0, 0.0, 1.0, 1.0],
        &[1.0 / 3.0, 1.0 / 3.0, 2.0 / 3.0, 2.0 / 3.0],
    )
    .unwrap();
    let path = bent_path();
    // Symmetric path: half the progress lands on the midpoint.
    let mid = NativeEvaluator.evaluate_3d(0.5, &linear, &path, &mut cache);
    assert!((mid.point.x - 2.0).abs() < 2e-2);
    assert!((mid.path_param - 0.5).abs() < 2e-3);

    // Interchange reads t = 0.25 directly, which is not a quarter of the length.
    let quarter = InterchangeEvaluator.evaluate_3d(0.25, &linear, &path, &mut cache);
    assert!((quarter.path_param - 0.25).abs() < 1e-9);
    let native_quarter = NativeEvaluator.evaluate_3d(0.25, &linear, &path, &mut cache);
    assert!((native_quarter.path_param - 0.25).abs() > 1e-3);
}

#[test]
fn multi_segment_lookup_picks_containing_segment() {
    let e = EasingCurve::from_flat(
        &[0.0, 0.0, 1.0, 0.5, 3.0, 1.0],
        &[0.3, 0.15, 0.7, 0.35, 1.6, 0.65, 2.4, 0.85],
    )
    .unwrap();
    assert_eq!(InterchangeEvaluator.evaluate(0.0, &e).segment, SegmentHit::Within(0));
    assert_eq!(InterchangeEvaluator.evaluate(1.0, &e).segment, SegmentHit::Within(0));
    assert_eq!(InterchangeEvaluator.evaluate(1.5, &e).segment, SegmentHit::Within(1));
    assert_eq!(InterchangeEvaluator.evaluate(3.0, &e).value, 1.0);
}
