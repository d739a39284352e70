use super::*;
use kurbo::ParamCurveArclen;

fn bend() -> Cubic<Vec3> {
    [
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(0.0, 4.0, 0.0),
        Vec3::new(4.0, 4.0, 0.0),
        Vec3::new(4.0, 0.0, 0.0),
    ]
}

#[test]
fn total_length_matches_kurbo_oracle() {
    let c = bend();
    let k = kurbo::CubicBez::new(
        (c[0].x, c[0].y),
        (c[1].x, c[1].y),
        (c[2].x, c[2].y),
        (c[3].x, c[3].y),
    );
    let oracle = k.arclen(1e-9);
    let table = ArcLengthTable::new(c, DEFAULT_DENSITY);
    assert!((table.total_length() - oracle).abs() / oracle < 1e-3);
}

#[test]
fn table_size_grows_with_density() {
    assert_eq!(table_size(1000), 11);
    assert_eq!(table_size(10), 11);
    assert_eq!(table_size(100_000), 100);
    assert_eq!(ArcLengthTable::new(bend(), 1000).len(), 11);
}

#[test]
fn endpoints_are_exact_and_lookup_is_monotonic() {
    let table = ArcLengthTable::new(bend(), DEFAULT_DENSITY);
    assert_eq!(table.find_t_by_length(0.0), 0.0);
    assert_eq!(table.find_t_by_length(1.0), 1.0);
    assert_eq!(table.find_t_by_length(-0.5), 0.0);
    assert_eq!(table.find_t_by_length(1.5), 1.0);

    let mut last = 0.0;
    for i in 0..=2000 {
        let t = table.find_t_by_length(f64::from(i) / 2000.0);
        assert!(t >= last, "t went backwards at step {i}: {t} < {last}");
        assert!((0.0..=1.0).contains(&t));
        last = t;
    }
}

#[test]
fn symmetric_curve_hits_midpoint_at_half_length() {
    let table = ArcLengthTable::new(bend(), DEFAULT_DENSITY);
    assert!((table.find_t_by_length(0.5) - 0.5).abs() < 2e-3);
}

#[test]
fn uniform_line_maps_percent_to_parameter() {
    let line = [
        Vec3::zeros(),
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(2.0, 0.0, 0.0),
        Vec3::new(3.0, 0.0, 0.0),
    ];
    let table = ArcLengthTable::new(line, DEFAULT_DENSITY);
    assert!((table.total_length() - 3.0).abs() < 1e-9);
    for p in [0.1, 0.25, 0.5, 0.9] {
        assert!((table.find_t_by_length(p) - p).abs() < 1e-6);
    }
}

#[test]
fn zero_length_curve_passes_percent_through() {
    let p = Vec3::new(1.0, 2.0, 3.0);
    let table = ArcLengthTable::new([p; 4], DEFAULT_DENSITY);
    assert_eq!(table.total_length(), 0.0);
    assert_eq!(table.find_t_by_length(0.3), 0.3);
}
