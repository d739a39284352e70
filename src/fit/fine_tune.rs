use crate::eval::evaluator::Evaluator;
use crate::foundation::core::Vec2;
use crate::foundation::math::{Cubic, FitPoint, rmse_from_squares};

/// Optimizer limits.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FineTuneOpts {
    /// Maximum gradient steps.
    pub iterations: usize,
    /// Time samples per table.
    pub samples: usize,
}

impl Default for FineTuneOpts {
    fn default() -> Self {
        Self {
            iterations: 15,
            samples: 200,
        }
    }
}

/// How the optimizer stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FineTuneOutcome {
    /// RMSE dropped below half the precision.
    Converged,
    /// The iteration cap was hit first; the last refined segment is returned.
    IterationCapReached,
}

/// Refined easing segment with its final residual.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FineTuned {
    /// Segment with adjusted interior controls; anchors are untouched.
    pub cubic: Cubic<Vec2>,
    /// Stop reason.
    pub outcome: FineTuneOutcome,
    /// RMSE measured on the last table walk.
    pub rmse: f64,
    /// Gradient steps applied.
    pub iterations: usize,
}

/// `(time, value)` samples of a curve indexed by normalized cumulative length.
struct LengthTable {
    points: Vec<Vec2>,
    lengths: Vec<f64>,
}

impl LengthTable {
    fn sample(t0: f64, t1: f64, samples: usize, value: impl Fn(f64) -> f64) -> Self {
        let n = samples.max(1);
        let points: Vec<Vec2> = (0..=n)
            .map(|i| {
                let t = if i == n {
                    t1
                } else {
                    t0 + (t1 - t0) * (i as f64 / n as f64)
                };
                Vec2::new(t, value(t))
            })
            .collect();
        let mut lengths = Vec::with_capacity(points.len());
        let mut acc = 0.0;
        lengths.push(acc);
        for w in points.windows(2) {
            acc += FitPoint::distance(w[1], w[0]);
            lengths.push(acc);
        }
        if acc > 0.0 {
            lengths.iter_mut().for_each(|l| *l /= acc);
        }
        Self { points, lengths }
    }

    /// Sample whose normalized length is closest to `u`.
    fn nearest(&self, u: f64) -> Vec2 {
        let i = self.lengths.partition_point(|l| *l < u);
        if i == 0 {
            return self.points[0];
        }
        if i >= self.lengths.len() {
            return self.points[self.points.len() - 1];
        }
        if (self.lengths[i] - u).abs() < (u - self.lengths[i - 1]).abs() {
            self.points[i]
        } else {
            self.points[i - 1]
        }
    }
}

/// Refine the interior controls of one easing segment so that the candidate format's reading
/// of it follows `target` over the segment's time span.
///
/// Each iteration walks both length tables in fixed steps, collects the residual between
/// matching samples and moves each control by its Bernstein-weighted residual sum. Stops once
/// the RMSE drops under `precision / 2` or after `opts.iterations` steps.
pub fn fine_tune(
    cubic: Cubic<Vec2>,
    candidate: &dyn Evaluator,
    target: impl Fn(f64) -> f64,
    precision: f64,
    opts: FineTuneOpts,
) -> FineTuned {
    let (t0, t1) = (cubic[0].x, cubic[3].x);
    let samples = opts.samples.max(1);
    let step = (10.0 / samples as f64).min(1.0);
    let walk = (1.0 / step).ceil() as usize;
    let goal = LengthTable::sample(t0, t1, samples, &target);

    let mut cubic = cubic;
    let mut rmse = f64::INFINITY;
    for iteration in 0..opts.iterations {
        let current = cubic;
        let cand = LengthTable::sample(t0, t1, samples, |t| {
            candidate.segment_value(t, &current).0
        });

        let mut w1 = Vec2::ZERO;
        let mut w2 = Vec2::ZERO;
        let mut sum_sq = 0.0;
        for k in 0..=walk {
            let u = (k as f64 * step).min(1.0);
            let residual = goal.nearest(u) - cand.nearest(u);
            let v = 1.0 - u;
            w1 += residual * (3.0 * u * v * v * step);
            w2 += residual * (3.0 * v * u * u * step);
            sum_sq += FitPoint::dot(residual, residual);
        }
        rmse = rmse_from_squares(sum_sq, walk + 1);
        tracing::trace!(iteration, rmse, "fine-tune step");
        if rmse < precision / 2.0 {
            return FineTuned {
                cubic,
                outcome: FineTuneOutcome::Converged,
                rmse,
                iterations: iteration,
            };
        }
        cubic[1] += w1;
        cubic[2] += w2;
    }
    FineTuned {
        cubic,
        outcome: FineTuneOutcome::IterationCapReached,
        rmse,
        iterations: opts.iterations,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/fit/fine_tune.rs"]
mod tests;
