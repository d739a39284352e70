use super::*;
use crate::foundation::core::{Vec2, Vec3};

fn sample<P: FitPoint>(c: &Cubic<P>, n: usize) -> (Vec<P>, Vec<f64>) {
    let ts: Vec<f64> = (0..=n).map(|i| i as f64 / n as f64).collect();
    (ts.iter().map(|&t| cubic_point(c, t)).collect(), ts)
}

#[test]
fn hinted_fit_recovers_exact_cubic() {
    let c = [
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(1.0, 2.0, 0.5),
        Vec3::new(3.0, 2.5, -0.5),
        Vec3::new(4.0, 0.0, 1.0),
    ];
    let (pts, ts) = sample(&c, 30);
    let fit = LeastSquaresFitter.fit(&pts, &FitOptions::new(1e-6).with_hint(&ts));
    assert_eq!(fit.len(), 1);
    for (a, b) in fit[0].iter().zip(c.iter()) {
        assert!((*a - *b).length() < 1e-9, "{a:?} vs {b:?}");
    }
}

#[test]
fn tangent_constrained_line_gets_third_handles() {
    let pts: Vec<Vec2> = (0..=20)
        .map(|i| {
            let t = f64::from(i) / 20.0;
            Vec2::new(t, t)
        })
        .collect();
    let dir = Vec2::new(1.0, 1.0);
    let fit = LeastSquaresFitter.fit(&pts, &FitOptions::new(1e-6).with_tangents(dir, -dir));
    assert_eq!(fit.len(), 1);
    assert!((fit[0][1] - Vec2::new(1.0 / 3.0, 1.0 / 3.0)).hypot() < 1e-9);
    assert!((fit[0][2] - Vec2::new(2.0 / 3.0, 2.0 / 3.0)).hypot() < 1e-9);
}

#[test]
fn splits_respect_cap_and_join_smoothly() {
    // A wave that one cubic cannot follow.
    let pts: Vec<Vec2> = (0..=80)
        .map(|i| {
            let x = f64::from(i) / 80.0;
            Vec2::new(x, (x * std::f64::consts::TAU * 2.0).sin())
        })
        .collect();
    let opts = FitOptions::new(1e-3).with_max_segments(3);
    let fit = LeastSquaresFitter.fit(&pts, &opts);
    assert_eq!(fit.len(), 3);
    assert_eq!(fit[0][0], pts[0]);
    assert_eq!(fit[2][3], pts[80]);
    for w in fit.windows(2) {
        assert_eq!(w[0][3], w[1][0]);
        // Handles on both sides of a join are collinear with it.
        let a = w[0][2] - w[0][3];
        let b = w[1][1] - w[1][0];
        assert!(a.cross(b).abs() < 1e-9 * (a.hypot() * b.hypot()).max(1.0));
        assert!(a.dot(b) <= 0.0);
    }

    let one = LeastSquaresFitter.fit(&pts, &FitOptions::new(1e-3));
    assert_eq!(one.len(), 1);
}

#[test]
fn easy_input_stops_below_the_cap() {
    let c = [
        Vec2::new(0.0, 0.0),
        Vec2::new(0.2, 0.6),
        Vec2::new(0.7, 1.0),
        Vec2::new(1.0, 1.0),
    ];
    let (pts, ts) = sample(&c, 40);
    let fit = LeastSquaresFitter.fit(
        &pts,
        &FitOptions::new(1e-6).with_max_segments(4).with_hint(&ts),
    );
    assert_eq!(fit.len(), 1);
}

#[test]
fn tiny_inputs() {
    let opts = FitOptions::<Vec2>::new(1e-3);
    assert!(LeastSquaresFitter.fit(&[], &opts).is_empty());
    let p = Vec2::new(1.0, 2.0);
    assert_eq!(LeastSquaresFitter.fit(&[p], &opts), vec![[p; 4]]);
    let q = Vec2::new(4.0, 2.0);
    let line = LeastSquaresFitter.fit(&[p, q], &opts);
    assert_eq!(line[0], [p, Vec2::new(2.0, 2.0), Vec2::new(3.0, 2.0), q]);
}
