use super::*;
use crate::eval::evaluator::{CurveFormat, InterchangeEvaluator};
use crate::foundation::math::cubic_scalar;

fn line() -> Cubic<Vec2> {
    [
        Vec2::new(0.0, 0.0),
        Vec2::new(1.0 / 3.0, 1.0 / 3.0),
        Vec2::new(2.0 / 3.0, 2.0 / 3.0),
        Vec2::new(1.0, 1.0),
    ]
}

#[test]
fn matching_candidate_converges_without_moving() {
    let out = fine_tune(
        line(),
        &InterchangeEvaluator,
        |t| t,
        1e-4,
        FineTuneOpts::default(),
    );
    assert_eq!(out.outcome, FineTuneOutcome::Converged);
    assert_eq!(out.iterations, 0);
    assert_eq!(out.cubic, line());
}

#[test]
fn steps_reduce_the_residual() {
    // Target: an ease-in-out read at the raw parameter.
    let target = |t: f64| cubic_scalar(0.0, 0.0, 1.0, 1.0, t);
    let ev = CurveFormat::Interchange.evaluator();

    let first = fine_tune(
        line(),
        ev,
        target,
        1e-12,
        FineTuneOpts {
            iterations: 1,
            samples: 200,
        },
    );
    let tuned = fine_tune(line(), ev, target, 1e-12, FineTuneOpts::default());

    assert_eq!(tuned.outcome, FineTuneOutcome::IterationCapReached);
    assert_eq!(tuned.iterations, 15);
    assert!(tuned.rmse < first.rmse, "{} !< {}", tuned.rmse, first.rmse);
    // Anchors never move; the first control is pulled down toward the target's.
    assert_eq!(tuned.cubic[0], line()[0]);
    assert_eq!(tuned.cubic[3], line()[3]);
    assert!(tuned.cubic[1].y < line()[1].y);
    assert!(tuned.cubic[2].y > line()[2].y);
}
