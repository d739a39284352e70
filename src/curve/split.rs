use crate::arclen::cache::ArcLengthCache;
use crate::curve::model::SpatialPath;
use crate::foundation::core::Vec3;
use crate::foundation::error::{CurveError, CurveResult};
use crate::foundation::math::{Cubic, FitPoint};

/// Split one cubic at `t` into exact left and right halves.
pub fn split_at<P: FitPoint>(c: &Cubic<P>, t: f64) -> (Cubic<P>, Cubic<P>) {
    let lerp = |a: P, b: P| a + (b - a) * t;
    let p01 = lerp(c[0], c[1]);
    let p12 = lerp(c[1], c[2]);
    let p23 = lerp(c[2], c[3]);
    let p012 = lerp(p01, p12);
    let p123 = lerp(p12, p23);
    let mid = lerp(p012, p123);
    ([c[0], p01, p012, mid], [mid, p123, p23, c[3]])
}

fn check_params(params: &[f64]) -> CurveResult<()> {
    if let Some(bad) = params.iter().find(|t| !(**t > 0.0 && **t < 1.0)) {
        return Err(CurveError::validation(format!(
            "split parameter {bad} is outside (0, 1)"
        )));
    }
    if params.windows(2).any(|w| w[1] <= w[0]) {
        return Err(CurveError::validation(
            "split parameters must be strictly ascending",
        ));
    }
    Ok(())
}

/// Split one cubic at every parameter in `params` (strictly ascending, inside `(0, 1)`).
///
/// Each parameter is renormalized against the span that remains after the previous cut, so the
/// pieces reproduce the original geometry exactly. Returns `params.len() + 1` pieces.
pub fn split_at_params<P: FitPoint>(c: &Cubic<P>, params: &[f64]) -> CurveResult<Vec<Cubic<P>>> {
    check_params(params)?;
    let mut pieces = Vec::with_capacity(params.len() + 1);
    let mut rest = *c;
    let mut last_t = 0.0;
    for &t in params {
        let local = (t - last_t) / (1.0 - last_t);
        let (left, right) = split_at(&rest, local);
        pieces.push(left);
        rest = right;
        last_t = t;
    }
    pieces.push(rest);
    Ok(pieces)
}

/// Split one 3D cubic at arc-length percentages (strictly ascending, inside `(0, 1)`).
///
/// Percentages are converted to bezier parameters through the arc-length table, then cut
/// exactly. Percentages that collapse onto the same parameter produce a single cut.
pub fn split_at_lengths(
    c: &Cubic<Vec3>,
    percents: &[f64],
    cache: &mut ArcLengthCache,
) -> CurveResult<Vec<Cubic<Vec3>>> {
    check_params(percents)?;
    let table = cache.table(c);
    let mut params: Vec<f64> = Vec::with_capacity(percents.len());
    for &p in percents {
        let t = table.find_t_by_length(p);
        if t > 0.0 && t < 1.0 && params.last().is_none_or(|&last| t > last) {
            params.push(t);
        }
    }
    split_at_params(c, &params)
}

impl SpatialPath {
    /// Replace segment `index` by its exact split at `params`.
    pub fn split_segment(&self, index: usize, params: &[f64]) -> CurveResult<Self> {
        self.resegment(index, |c| split_at_params(c, params))
    }

    /// Replace segment `index` by its exact split at arc-length `percents`.
    pub fn split_segment_at_lengths(
        &self,
        index: usize,
        percents: &[f64],
        cache: &mut ArcLengthCache,
    ) -> CurveResult<Self> {
        self.resegment(index, |c| split_at_lengths(c, percents, cache))
    }

    fn resegment(
        &self,
        index: usize,
        split: impl FnOnce(&Cubic<Vec3>) -> CurveResult<Vec<Cubic<Vec3>>>,
    ) -> CurveResult<Self> {
        if index >= self.segment_count() {
            return Err(CurveError::validation(format!(
                "segment {index} out of range for a {}-segment path",
                self.segment_count()
            )));
        }
        let mut cubics = self.segments();
        let pieces = split(&cubics[index])?;
        cubics.splice(index..=index, pieces);
        Self::from_cubics(&cubics)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/curve/split.rs"]
mod tests;
