use std::fmt::Debug;
use std::ops::{Add, Mul, Neg, Sub};

use crate::foundation::core::{Vec2, Vec3};

/// A cubic bezier as `[anchor0, control1, control2, anchor3]`.
pub type Cubic<P> = [P; 4];

/// Vector operations shared by 2D easing points and 3D path points.
///
/// Fitting, splitting and arc-length code is written once against this trait and instantiated
/// for [`Vec2`] (easing curves) and [`Vec3`] (spatial paths).
pub trait FitPoint:
    Copy
    + Debug
    + PartialEq
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<f64, Output = Self>
    + Neg<Output = Self>
{
    /// Additive identity.
    const ZERO: Self;

    /// Euclidean dot product.
    fn dot(self, other: Self) -> f64;

    /// Magnitude of the cross product (`|a x b|`); scalar cross in 2D.
    fn cross_norm(self, other: Self) -> f64;

    /// Euclidean length.
    fn length(self) -> f64 {
        FitPoint::dot(self, self).sqrt()
    }

    /// Euclidean distance to `other`.
    fn distance(self, other: Self) -> f64 {
        FitPoint::length(self - other)
    }

    /// Unit vector in the same direction, or zero for degenerate input.
    fn unit_or_zero(self) -> Self {
        let len = FitPoint::length(self);
        if len > 0.0 && len.is_finite() {
            self * (1.0 / len)
        } else {
            Self::ZERO
        }
    }
}

impl FitPoint for Vec2 {
    const ZERO: Self = Vec2::ZERO;

    fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    fn cross_norm(self, other: Self) -> f64 {
        (self.x * other.y - self.y * other.x).abs()
    }
}

impl FitPoint for Vec3 {
    const ZERO: Self = Vec3::new(0.0, 0.0, 0.0);

    fn dot(self, other: Self) -> f64 {
        Vec3::dot(&self, &other)
    }

    fn cross_norm(self, other: Self) -> f64 {
        self.cross(&other).norm()
    }
}

/// Cubic Bernstein weights `[(1-t)^3, 3t(1-t)^2, 3t^2(1-t), t^3]`.
#[inline]
pub fn bernstein(t: f64) -> [f64; 4] {
    let u = 1.0 - t;
    [u * u * u, 3.0 * t * u * u, 3.0 * t * t * u, t * t * t]
}

/// Evaluate a 1D cubic bezier.
#[inline]
pub fn cubic_scalar(p0: f64, p1: f64, p2: f64, p3: f64, t: f64) -> f64 {
    let [a, b, c, d] = bernstein(t);
    a * p0 + b * p1 + c * p2 + d * p3
}

/// Evaluate a cubic bezier at parameter `t`.
#[inline]
pub fn cubic_point<P: FitPoint>(c: &Cubic<P>, t: f64) -> P {
    let [a, b, cc, d] = bernstein(t);
    c[0] * a + c[1] * b + c[2] * cc + c[3] * d
}

/// First derivative `dB/dt`.
#[inline]
pub fn cubic_derivative<P: FitPoint>(c: &Cubic<P>, t: f64) -> P {
    let u = 1.0 - t;
    (c[1] - c[0]) * (3.0 * u * u) + (c[2] - c[1]) * (6.0 * u * t) + (c[3] - c[2]) * (3.0 * t * t)
}

/// Second derivative `d2B/dt2`.
#[inline]
pub fn cubic_second_derivative<P: FitPoint>(c: &Cubic<P>, t: f64) -> P {
    let u = 1.0 - t;
    (c[2] - c[1] * 2.0 + c[0]) * (6.0 * u) + (c[3] - c[2] * 2.0 + c[1]) * (6.0 * t)
}

/// Curvature `|d1 x d2| / |d1|^3`; infinite where the derivative vanishes.
pub fn cubic_curvature<P: FitPoint>(c: &Cubic<P>, t: f64) -> f64 {
    let d1 = cubic_derivative(c, t);
    let d2 = cubic_second_derivative(c, t);
    let speed = d1.length();
    if speed <= f64::EPSILON {
        return f64::INFINITY;
    }
    d1.cross_norm(d2) / (speed * speed * speed)
}

/// Normalize `num` into `[min, max]`; a zero-width span maps to 0.
#[inline]
pub fn map_percent(num: f64, min: f64, max: f64) -> f64 {
    if min == max {
        return 0.0;
    }
    (num - min) / (max - min)
}

/// Inverse of [`map_percent`].
#[inline]
pub fn map_range(p: f64, min: f64, max: f64) -> f64 {
    min + (max - min) * p
}

/// Angle at `vertex` between the directions to `a` and `b`.
///
/// Returns `None` when either handle has zero length.
pub fn angle_at<P: FitPoint>(a: P, b: P, vertex: P) -> Option<f64> {
    let va = a - vertex;
    let vb = b - vertex;
    let la = va.length();
    let lb = vb.length();
    if la <= 0.0 || lb <= 0.0 {
        return None;
    }
    let cos = (va.dot(vb) / (la * lb)).clamp(-1.0, 1.0);
    Some(cos.acos())
}

/// Root-mean-square of a sequence of squared errors.
pub fn rmse_from_squares(sum_of_squares: f64, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    (sum_of_squares / count as f64).sqrt()
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
