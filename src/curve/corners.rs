use crate::curve::model::{EasingCurve, PathCurve};
use crate::foundation::core::vec_of;
use crate::foundation::math::{FitPoint, angle_at};

/// Allowed deviation (radians) of the handle angle from a straight line before an anchor
/// counts as a corner.
pub const CORNER_TOLERANCE: f64 = 0.02;

fn breaks<P: FitPoint>(incoming: P, outgoing: P, anchor: P) -> bool {
    // Zero-length handles carry no direction and never break.
    angle_at(incoming, outgoing, anchor)
        .is_some_and(|a| (a - std::f64::consts::PI).abs() > CORNER_TOLERANCE)
}

fn easing_breaks(curve: &EasingCurve, i: usize) -> bool {
    breaks(
        vec_of(curve.controls()[i - 1][1]),
        vec_of(curve.controls()[i][0]),
        vec_of(curve.anchors()[i]),
    )
}

/// Anchor indices where either the easing curve or the spatial path breaks tangent continuity.
///
/// Always starts with `0`; interior anchors follow in ascending order.
pub fn path_corners(curve: &PathCurve) -> Vec<usize> {
    let path = curve.path();
    let mut out = vec![0];
    for i in 1..curve.segment_count() {
        if easing_breaks(curve.easing(), i)
            || breaks(path.controls()[i - 1][1], path.controls()[i][0], path.anchors()[i])
        {
            out.push(i);
        }
    }
    out
}

/// Anchor indices where an easing curve breaks tangent continuity, starting with `0`.
pub fn easing_corners(curve: &EasingCurve) -> Vec<usize> {
    let mut out = vec![0];
    out.extend((1..curve.segment_count()).filter(|&i| easing_breaks(curve, i)));
    out
}

/// Inclusive anchor ranges between consecutive corners; the last run ends at the final anchor.
pub fn runs(corners: &[usize], segment_count: usize) -> Vec<(usize, usize)> {
    corners
        .iter()
        .enumerate()
        .map(|(k, &first)| (first, corners.get(k + 1).copied().unwrap_or(segment_count)))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/curve/corners.rs"]
mod tests;
