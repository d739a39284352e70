use crate::foundation::math::{
    Cubic, FitPoint, bernstein, cubic_derivative, cubic_point, cubic_second_derivative,
};

const REPARAM_ITERATIONS: usize = 4;
const ALPHA_EPSILON: f64 = 1e-12;

/// Options for one fitting call.
#[derive(Clone, Copy, Debug)]
pub struct FitOptions<'a, P> {
    /// Largest accepted distance between a sample and the fitted curve.
    pub max_error: f64,
    /// Upper bound on the number of returned cubics.
    pub max_segments: usize,
    /// Unit directions leaving the first point and leaving the last point back into the curve.
    pub tangents: Option<(P, P)>,
    /// Fixed per-sample parameters; renormalized per piece and never reparameterized.
    pub hint: Option<&'a [f64]>,
}

impl<'a, P: FitPoint> FitOptions<'a, P> {
    /// Options with a single segment, free end tangents and chord-length parameters.
    pub fn new(max_error: f64) -> Self {
        Self {
            max_error,
            max_segments: 1,
            tangents: None,
            hint: None,
        }
    }

    /// Allow up to `n` segments (at least one).
    pub fn with_max_segments(mut self, n: usize) -> Self {
        self.max_segments = n.max(1);
        self
    }

    /// Constrain the end tangents.
    pub fn with_tangents(mut self, left: P, right: P) -> Self {
        self.tangents = Some((left, right));
        self
    }

    /// Seed parameters instead of chord length.
    pub fn with_hint(mut self, hint: &'a [f64]) -> Self {
        self.hint = Some(hint);
        self
    }
}

/// Fits a point sequence with a piecewise cubic.
///
/// The returned cubics are consecutive: each starts where the previous one ends, the first
/// starts at `points[0]` and the last ends at the final point.
pub trait CurveFitter {
    /// Fit `points`, returning at most `opts.max_segments` cubics.
    fn fit<P: FitPoint>(&self, points: &[P], opts: &FitOptions<'_, P>) -> Vec<Cubic<P>>;
}

/// Least-squares fitter that splits the worst piece at its largest deviation until the error
/// bound or the segment cap is reached.
///
/// Interior splits share a centered tangent so joins stay G1.
#[derive(Clone, Copy, Debug, Default)]
pub struct LeastSquaresFitter;

#[derive(Clone, Copy, Debug)]
struct Piece<P> {
    first: usize,
    last: usize,
    left: Option<P>,
    right: Option<P>,
    cubic: Cubic<P>,
    error: f64,
    worst: usize,
}

impl CurveFitter for LeastSquaresFitter {
    fn fit<P: FitPoint>(&self, points: &[P], opts: &FitOptions<'_, P>) -> Vec<Cubic<P>> {
        match points.len() {
            0 => return Vec::new(),
            1 => return vec![[points[0]; 4]],
            _ => {}
        }
        let (left, right) = match opts.tangents {
            Some((l, r)) => (nonzero(l), nonzero(r)),
            None => (None, None),
        };
        let hint = opts.hint.filter(|h| h.len() == points.len());

        let mut pieces = vec![fit_piece(points, hint, 0, points.len() - 1, left, right)];
        while pieces.len() < opts.max_segments.max(1) {
            let Some(k) = pieces
                .iter()
                .enumerate()
                .filter(|(_, p)| p.error > opts.max_error && p.last - p.first >= 2)
                .max_by(|a, b| a.1.error.total_cmp(&b.1.error))
                .map(|(k, _)| k)
            else {
                break;
            };
            let piece = pieces[k];
            let at = piece.worst;
            let center = nonzero(points[at - 1] - points[at + 1]);
            let l = fit_piece(points, hint, piece.first, at, piece.left, center);
            let r = fit_piece(points, hint, at, piece.last, center.map(|c| -c), piece.right);
            pieces.splice(k..=k, [l, r]);
        }
        pieces.into_iter().map(|p| p.cubic).collect()
    }
}

fn nonzero<P: FitPoint>(v: P) -> Option<P> {
    let u = v.unit_or_zero();
    (u != P::ZERO).then_some(u)
}

fn fit_piece<P: FitPoint>(
    points: &[P],
    hint: Option<&[f64]>,
    first: usize,
    last: usize,
    left: Option<P>,
    right: Option<P>,
) -> Piece<P> {
    let pts = &points[first..=last];
    let fixed = hint.and_then(|h| normalized_hint(&h[first..=last]));
    let mut params = fixed.clone().unwrap_or_else(|| chord_length(pts));

    let mut cubic = least_squares(pts, &params, left, right);
    let (mut error, mut worst) = max_error(pts, &cubic, &params);
    if fixed.is_none() {
        for _ in 0..REPARAM_ITERATIONS {
            let next_params = reparameterize(pts, &cubic, &params);
            let next = least_squares(pts, &next_params, left, right);
            let (e, w) = max_error(pts, &next, &next_params);
            if e >= error {
                break;
            }
            params = next_params;
            cubic = next;
            error = e;
            worst = w;
        }
    }
    Piece {
        first,
        last,
        left,
        right,
        cubic,
        error,
        worst: first + worst,
    }
}

fn normalized_hint(h: &[f64]) -> Option<Vec<f64>> {
    let (a, b) = (h[0], h[h.len() - 1]);
    let span = b - a;
    if span == 0.0 || !span.is_finite() || h.iter().any(|v| !v.is_finite()) {
        return None;
    }
    Some(h.iter().map(|v| (v - a) / span).collect())
}

fn chord_length<P: FitPoint>(pts: &[P]) -> Vec<f64> {
    let mut acc = Vec::with_capacity(pts.len());
    acc.push(0.0);
    for w in pts.windows(2) {
        let last = acc[acc.len() - 1];
        acc.push(last + w[1].distance(w[0]));
    }
    let total = acc[acc.len() - 1];
    if total > 0.0 {
        acc.iter().map(|d| d / total).collect()
    } else {
        let n = (pts.len() - 1).max(1) as f64;
        (0..pts.len()).map(|i| i as f64 / n).collect()
    }
}

/// Least-squares interior controls with endpoints pinned to the first and last point.
///
/// A constrained end keeps its control on the given tangent ray; a free end solves for the
/// control position directly.
fn least_squares<P: FitPoint>(pts: &[P], u: &[f64], left: Option<P>, right: Option<P>) -> Cubic<P> {
    let p0 = pts[0];
    let p3 = pts[pts.len() - 1];
    let dist = p3.distance(p0);
    if pts.len() == 2 {
        return heuristic(p0, p3, left, right, dist);
    }

    let (mut s11, mut s12, mut s22) = (0.0, 0.0, 0.0);
    let (mut r1, mut r2) = (P::ZERO, P::ZERO);
    for (d, &t) in pts.iter().zip(u) {
        let [b0, b1, b2, b3] = bernstein(t);
        // Left/right fixed controls contribute to the residual through their anchor.
        let base = p0 * (b0 + if left.is_some() { b1 } else { 0.0 })
            + p3 * (b3 + if right.is_some() { b2 } else { 0.0 });
        let r = *d - base;
        s11 += b1 * b1;
        s12 += b1 * b2;
        s22 += b2 * b2;
        r1 = r1 + r * b1;
        r2 = r2 + r * b2;
    }

    match (left, right) {
        (Some(tl), Some(tr)) => {
            // Unknowns: alpha_l, alpha_r.
            let c11 = s11;
            let c12 = s12 * tl.dot(tr);
            let c22 = s22;
            let x1 = r1.dot(tl);
            let x2 = r2.dot(tr);
            let det = c11 * c22 - c12 * c12;
            let (al, ar) = if det.abs() > ALPHA_EPSILON {
                ((x1 * c22 - c12 * x2) / det, (c11 * x2 - x1 * c12) / det)
            } else {
                (f64::NAN, f64::NAN)
            };
            let floor = ALPHA_EPSILON * dist;
            if !(al > floor && ar > floor && al.is_finite() && ar.is_finite()) {
                return heuristic(p0, p3, left, right, dist);
            }
            [p0, p0 + tl * al, p3 + tr * ar, p3]
        }
        (None, None) => {
            // Unknowns: both control positions.
            let det = s11 * s22 - s12 * s12;
            if det.abs() <= ALPHA_EPSILON {
                return heuristic(p0, p3, None, None, dist);
            }
            let c1 = (r1 * s22 - r2 * s12) * (1.0 / det);
            let c2 = (r2 * s11 - r1 * s12) * (1.0 / det);
            [p0, c1, c2, p3]
        }
        (Some(tl), None) => {
            // Unknowns: alpha_l and the right control position.
            let det = s11 * s22 - s12 * s12;
            let al = (r1.dot(tl) * s22 - s12 * r2.dot(tl)) / det;
            if !(al.is_finite() && al > ALPHA_EPSILON * dist) || s22 <= ALPHA_EPSILON {
                return heuristic(p0, p3, left, None, dist);
            }
            let c2 = (r2 - tl * (al * s12)) * (1.0 / s22);
            [p0, p0 + tl * al, c2, p3]
        }
        (None, Some(tr)) => {
            let det = s11 * s22 - s12 * s12;
            let ar = (r2.dot(tr) * s11 - s12 * r1.dot(tr)) / det;
            if !(ar.is_finite() && ar > ALPHA_EPSILON * dist) || s11 <= ALPHA_EPSILON {
                return heuristic(p0, p3, None, right, dist);
            }
            let c1 = (r1 - tr * (ar * s12)) * (1.0 / s11);
            [p0, c1, p3 + tr * ar, p3]
        }
    }
}

/// Controls a third of the chord away, along the tangents when given.
fn heuristic<P: FitPoint>(p0: P, p3: P, left: Option<P>, right: Option<P>, dist: f64) -> Cubic<P> {
    let third = (p3 - p0) * (1.0 / 3.0);
    let c1 = left.map_or(p0 + third, |t| p0 + t * (dist / 3.0));
    let c2 = right.map_or(p3 - third, |t| p3 + t * (dist / 3.0));
    [p0, c1, c2, p3]
}

/// Largest sample distance and the index it occurs at (interior where possible).
fn max_error<P: FitPoint>(pts: &[P], cubic: &Cubic<P>, u: &[f64]) -> (f64, usize) {
    let mut best = (0.0, pts.len() / 2);
    for (i, (p, &t)) in pts.iter().zip(u).enumerate() {
        let d = cubic_point(cubic, t).distance(*p);
        if d > best.0 && i > 0 && i + 1 < pts.len() {
            best = (d, i);
        }
    }
    best
}

/// One Newton step per sample towards the closest parameter on `cubic`.
fn reparameterize<P: FitPoint>(pts: &[P], cubic: &Cubic<P>, u: &[f64]) -> Vec<f64> {
    pts.iter()
        .zip(u)
        .map(|(p, &t)| {
            let d = cubic_point(cubic, t) - *p;
            let d1 = cubic_derivative(cubic, t);
            let d2 = cubic_second_derivative(cubic, t);
            let num = d.dot(d1);
            let den = d1.dot(d1) + d.dot(d2);
            if den.abs() <= f64::EPSILON {
                t
            } else {
                (t - num / den).clamp(0.0, 1.0)
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/fit/fitter.rs"]
mod tests;
