use super::*;
use kurbo::{ParamCurve, ParamCurveDeriv};

fn arch() -> Cubic<Vec2> {
    [
        Vec2::new(0.0, 0.0),
        Vec2::new(1.0, 2.0),
        Vec2::new(3.0, 2.0),
        Vec2::new(4.0, 0.0),
    ]
}

fn to_kurbo(c: &Cubic<Vec2>) -> kurbo::CubicBez {
    kurbo::CubicBez::new(
        c[0].to_point(),
        c[1].to_point(),
        c[2].to_point(),
        c[3].to_point(),
    )
}

#[test]
fn cubic_point_matches_kurbo() {
    let c = arch();
    let k = to_kurbo(&c);
    for i in 0..=10 {
        let t = f64::from(i) / 10.0;
        let ours = cubic_point(&c, t);
        let theirs = k.eval(t);
        assert!((ours.x - theirs.x).abs() < 1e-12);
        assert!((ours.y - theirs.y).abs() < 1e-12);
    }
}

#[test]
fn cubic_derivative_matches_kurbo() {
    let c = arch();
    let d = to_kurbo(&c).deriv();
    for i in 0..=10 {
        let t = f64::from(i) / 10.0;
        let ours = cubic_derivative(&c, t);
        let theirs = d.eval(t);
        assert!((ours.x - theirs.x).abs() < 1e-12);
        assert!((ours.y - theirs.y).abs() < 1e-12);
    }
}

#[test]
fn endpoints_are_exact() {
    let c = [
        Vec3::new(0.1, 0.2, 0.3),
        Vec3::new(5.0, -1.0, 2.0),
        Vec3::new(-3.0, 4.0, 1.0),
        Vec3::new(7.7, 8.8, 9.9),
    ];
    assert_eq!(cubic_point(&c, 0.0), c[0]);
    assert_eq!(cubic_point(&c, 1.0), c[3]);
}

#[test]
fn straight_line_has_zero_curvature() {
    let c = [
        Vec3::zeros(),
        Vec3::new(1.0, 1.0, 1.0),
        Vec3::new(2.0, 2.0, 2.0),
        Vec3::new(3.0, 3.0, 3.0),
    ];
    assert!(cubic_curvature(&c, 0.5) < 1e-12);
}

#[test]
fn map_percent_handles_zero_span() {
    assert_eq!(map_percent(3.0, 2.0, 2.0), 0.0);
    assert_eq!(map_percent(3.0, 2.0, 4.0), 0.5);
    assert_eq!(map_range(0.5, 2.0, 4.0), 3.0);
}

#[test]
fn angle_at_straight_and_right_angle() {
    let v = Vec2::new(0.0, 0.0);
    let straight = angle_at(Vec2::new(-1.0, 0.0), Vec2::new(2.0, 0.0), v).unwrap();
    assert!((straight - std::f64::consts::PI).abs() < 1e-12);

    let right = angle_at(Vec2::new(-1.0, 0.0), Vec2::new(0.0, 1.0), v).unwrap();
    assert!((right - std::f64::consts::FRAC_PI_2).abs() < 1e-12);

    assert!(angle_at(v, Vec2::new(1.0, 0.0), v).is_none());
}
