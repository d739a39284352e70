use crate::foundation::math::cubic_scalar;

const NEWTON_ITERATIONS: usize = 8;
const BISECTION_ITERATIONS: usize = 64;
const SOLVE_EPSILON: f64 = 1e-12;

/// Result of solving a unit-square timing curve for one time fraction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EasingSolve {
    /// Eased output fraction `y(s)`.
    pub eased: f64,
    /// Bezier parameter `s` with `x(s) == fraction`.
    pub param: f64,
}

/// Timing curve from `(0, 0)` to `(1, 1)` with controls `(x1, y1)` and `(x2, y2)`.
///
/// Control x coordinates are clamped into `[0, 1]` so that `x(s)` stays monotonic and every time
/// fraction has exactly one solution.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UnitEasing {
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
}

impl UnitEasing {
    /// Build a timing curve.
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            x1: x1.clamp(0.0, 1.0),
            y1,
            x2: x2.clamp(0.0, 1.0),
            y2,
        }
    }

    #[inline]
    fn x_at(&self, s: f64) -> f64 {
        cubic_scalar(0.0, self.x1, self.x2, 1.0, s)
    }

    #[inline]
    fn dx_at(&self, s: f64) -> f64 {
        let u = 1.0 - s;
        3.0 * u * u * self.x1 + 6.0 * u * s * (self.x2 - self.x1) + 3.0 * s * s * (1.0 - self.x2)
    }

    /// Solve for the parameter whose x equals `fraction`, then evaluate y there.
    ///
    /// Fractions at or outside the unit interval map exactly to the matching endpoint.
    pub fn solve(&self, fraction: f64) -> EasingSolve {
        if fraction.is_nan() || fraction <= 0.0 {
            return EasingSolve {
                eased: 0.0,
                param: 0.0,
            };
        }
        if fraction >= 1.0 {
            return EasingSolve {
                eased: 1.0,
                param: 1.0,
            };
        }
        let param = self.param_for(fraction);
        let eased = if self.x1 == self.y1 && self.x2 == self.y2 {
            fraction
        } else {
            cubic_scalar(0.0, self.y1, self.y2, 1.0, param)
        };
        EasingSolve { eased, param }
    }

    fn param_for(&self, fraction: f64) -> f64 {
        let mut s = fraction;
        for _ in 0..NEWTON_ITERATIONS {
            let err = self.x_at(s) - fraction;
            if err.abs() < SOLVE_EPSILON {
                return s;
            }
            let slope = self.dx_at(s);
            if slope.abs() < 1e-6 {
                break;
            }
            s -= err / slope;
            if !(0.0..=1.0).contains(&s) {
                break;
            }
        }

        let (mut lo, mut hi) = (0.0, 1.0);
        let mut mid = fraction;
        for _ in 0..BISECTION_ITERATIONS {
            let x = self.x_at(mid);
            if (x - fraction).abs() < SOLVE_EPSILON {
                break;
            }
            if x < fraction {
                lo = mid;
            } else {
                hi = mid;
            }
            mid = 0.5 * (lo + hi);
        }
        mid
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/easing.rs"]
mod tests;
