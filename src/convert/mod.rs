pub mod easing;
pub mod opts;
pub mod path;

use crate::arclen::cache::ArcLengthCache;
use crate::convert::opts::ConvertOpts;
use crate::fit::fitter::{CurveFitter, LeastSquaresFitter};
use crate::foundation::core::{Vec2, Vec3};
use crate::foundation::error::CurveResult;
use crate::foundation::math::FitPoint;

/// Outcome of converting one corner-to-corner run.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct RunReport {
    /// Index of the run's first anchor in the input curve.
    pub first_anchor: usize,
    /// Segments emitted for the run.
    pub segments: usize,
    /// Refit cycles spent.
    pub cycles: usize,
    /// Final RMSE of the emitted candidate against the source samples.
    pub rmse: f64,
    /// Whether spatial refitting was bypassed because of a coincident handle.
    pub copoint: bool,
}

/// Converted curve plus one report per run.
#[derive(Clone, Debug, PartialEq)]
pub struct Conversion<C> {
    /// Converted curve.
    pub curve: C,
    /// Reports in run order.
    pub runs: Vec<RunReport>,
}

/// Error-bounded converter between curve formats.
///
/// Owns the arc-length table cache used by every native evaluation it performs, so repeated
/// conversions of similar curves reuse tables.
#[derive(Debug)]
pub struct Converter<F = LeastSquaresFitter> {
    opts: ConvertOpts,
    fitter: F,
    cache: ArcLengthCache,
}

impl Converter {
    /// Converter with the default least-squares fitter.
    pub fn new(opts: ConvertOpts) -> CurveResult<Self> {
        Self::with_fitter(opts, LeastSquaresFitter)
    }
}

impl<F: CurveFitter> Converter<F> {
    /// Converter with a caller-provided fitter.
    pub fn with_fitter(opts: ConvertOpts, fitter: F) -> CurveResult<Self> {
        opts.validate()?;
        Ok(Self {
            cache: ArcLengthCache::new(opts.cache_capacity, opts.arc_length_density),
            opts,
            fitter,
        })
    }

    /// Active options.
    pub fn opts(&self) -> &ConvertOpts {
        &self.opts
    }

    /// Arc-length table cache.
    pub fn cache(&self) -> &ArcLengthCache {
        &self.cache
    }
}

/// `samples + 1` evenly spaced times over `[start, end]`, the last one exactly `end`.
pub(crate) fn sample_times(start: f64, end: f64, samples: usize) -> Vec<f64> {
    let n = samples.max(1);
    let step = (end - start) / n as f64;
    (0..=n)
        .map(|i| if i == n { end } else { start + step * i as f64 })
        .collect()
}

/// End tangents for the sub-range `a..=b` of `points`, read from the neighbours just outside it
/// where they exist.
pub(crate) fn end_tangents(points: &[Vec2], a: usize, b: usize) -> (Vec2, Vec2) {
    let last = points.len() - 1;
    let left = points[a + 1] - points[a.saturating_sub(1)];
    let right = points[b - 1] - points[(b + 1).min(last)];
    (left.unit_or_zero(), right.unit_or_zero())
}

/// Sample indices bounding each candidate segment: `0`, the samples closest to the interior
/// anchors, then the final sample. Indices strictly increase.
pub(crate) fn boundary_indices(samples: &[Vec3], interior: &[Vec3]) -> Vec<usize> {
    let last = samples.len() - 1;
    let mut out = Vec::with_capacity(interior.len() + 2);
    out.push(0);
    for (j, anchor) in interior.iter().enumerate() {
        let lo = out[out.len() - 1] + 1;
        let hi = last.saturating_sub(interior.len() - j).max(lo);
        let mut best = lo;
        let mut best_d = f64::INFINITY;
        for (i, s) in samples.iter().enumerate().take(hi + 1).skip(lo) {
            let d = FitPoint::distance(*s, *anchor);
            if d < best_d {
                best_d = d;
                best = i;
            }
        }
        out.push(best);
    }
    out.push(last);
    out
}

/// Polyline length of consecutive points.
pub(crate) fn polyline_length<P: FitPoint>(points: &[P]) -> f64 {
    points.windows(2).map(|w| w[1].distance(w[0])).sum()
}

#[cfg(test)]
#[path = "../../tests/unit/convert/mod.rs"]
mod tests;
