use crate::arclen::cache::ArcLengthCache;
use crate::curve::model::{EasingCurve, SpatialPath};
use crate::eval::easing::UnitEasing;
use crate::foundation::core::{Vec2, Vec3};
use crate::foundation::error::CurveError;
use crate::foundation::math::{Cubic, cubic_point, cubic_scalar, map_percent, map_range};

/// Which encoding a curve is evaluated with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurveFormat {
    /// Easing solved as a timing function; path read by arc-length fraction.
    Native,
    /// Easing and path both read at the raw bezier parameter.
    Interchange,
}

impl CurveFormat {
    /// Evaluator implementing this format.
    pub fn evaluator(self) -> &'static dyn Evaluator {
        match self {
            Self::Native => &NativeEvaluator,
            Self::Interchange => &InterchangeEvaluator,
        }
    }

    /// The other format.
    pub fn opposite(self) -> Self {
        match self {
            Self::Native => Self::Interchange,
            Self::Interchange => Self::Native,
        }
    }

    /// Stable lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Native => "native",
            Self::Interchange => "interchange",
        }
    }
}

impl std::fmt::Display for CurveFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CurveFormat {
    type Err = CurveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "native" => Ok(Self::Native),
            "interchange" => Ok(Self::Interchange),
            other => Err(CurveError::validation(format!(
                "unknown curve format '{other}' (expected native or interchange)"
            ))),
        }
    }
}

/// Where a sample time falls relative to the curve's anchors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SegmentHit {
    /// Before the first anchor.
    Before,
    /// Inside segment `i`.
    Within(usize),
    /// After the last anchor.
    After,
}

/// Result of evaluating an easing curve at one time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EaseSample {
    /// Curve value.
    pub value: f64,
    /// Bezier parameter inside the hit segment.
    pub param: f64,
    /// Which segment was evaluated.
    pub segment: SegmentHit,
}

/// Result of evaluating an easing curve and the spatial path it drives.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathSample {
    /// Easing evaluation.
    pub ease: EaseSample,
    /// Spatial position.
    pub point: Vec3,
    /// Parameter on the hit path segment.
    pub path_param: f64,
}

/// One curve encoding's evaluation rules.
pub trait Evaluator: Send + Sync {
    /// Format this evaluator implements.
    fn format(&self) -> CurveFormat;

    /// Value and parameter of easing segment `(a0, c1, c2, a3)` at `time` inside its time span.
    fn segment_value(&self, time: f64, segment: &Cubic<Vec2>) -> (f64, f64);

    /// Parameter on path cubic `cubic` for a progress fraction through the easing segment.
    fn path_param(&self, progress: f64, cubic: &Cubic<Vec3>, cache: &mut ArcLengthCache) -> f64;

    /// Evaluate an easing curve at `time`.
    fn evaluate(&self, time: f64, easing: &EasingCurve) -> EaseSample {
        let anchors = easing.anchors();
        if time < easing.start_time() {
            return EaseSample {
                value: anchors[0].y,
                param: 0.0,
                segment: SegmentHit::Before,
            };
        }
        if time > easing.end_time() {
            return EaseSample {
                value: anchors[anchors.len() - 1].y,
                param: 1.0,
                segment: SegmentHit::After,
            };
        }
        let i = segment_index(easing, time);
        let (value, param) = self.segment_value(time, &easing.segment(i));
        EaseSample {
            value,
            param,
            segment: SegmentHit::Within(i),
        }
    }

    /// Evaluate an easing curve at `time` and the path point it selects.
    ///
    /// Easing segment `i` drives path segment `i`. Times outside the easing span return the
    /// first or last path anchor exactly.
    fn evaluate_3d(
        &self,
        time: f64,
        easing: &EasingCurve,
        path: &SpatialPath,
        cache: &mut ArcLengthCache,
    ) -> PathSample {
        let ease = self.evaluate(time, easing);
        match ease.segment {
            SegmentHit::Before => PathSample {
                ease,
                point: path.anchors()[0],
                path_param: 0.0,
            },
            SegmentHit::After => PathSample {
                ease,
                point: path.anchors()[path.anchors().len() - 1],
                path_param: 1.0,
            },
            SegmentHit::Within(i) => {
                let i = i.min(path.segment_count() - 1);
                let v0 = easing.anchors()[i].y;
                let v1 = easing.anchors()[i + 1].y;
                let progress = map_percent(ease.value, v0, v1);
                let cubic = path.segment(i);
                let path_param = self.path_param(progress, &cubic, cache);
                PathSample {
                    ease,
                    point: cubic_point(&cubic, path_param),
                    path_param,
                }
            }
        }
    }
}

/// Arc-length-correct format: the easing segment is a timing function over its time span and
/// the resulting progress is an arc-length fraction of the path segment.
#[derive(Clone, Copy, Debug, Default)]
pub struct NativeEvaluator;

impl Evaluator for NativeEvaluator {
    fn format(&self) -> CurveFormat {
        CurveFormat::Native
    }

    fn segment_value(&self, time: f64, s: &Cubic<Vec2>) -> (f64, f64) {
        let (t0, t1) = (s[0].x, s[3].x);
        let (v0, v1) = (s[0].y, s[3].y);
        let timing = UnitEasing::new(
            map_percent(s[1].x, t0, t1),
            map_percent(s[1].y, v0, v1),
            map_percent(s[2].x, t0, t1),
            map_percent(s[2].y, v0, v1),
        );
        let solve = timing.solve(map_percent(time, t0, t1));
        let value = if solve.eased == 1.0 {
            v1
        } else {
            map_range(solve.eased, v0, v1)
        };
        (value, solve.param)
    }

    fn path_param(&self, progress: f64, cubic: &Cubic<Vec3>, cache: &mut ArcLengthCache) -> f64 {
        cache.table(cubic).find_t_by_length(progress)
    }
}

/// Raw-parameter format: time maps linearly onto the easing parameter and the easing progress
/// is used directly as the path parameter.
#[derive(Clone, Copy, Debug, Default)]
pub struct InterchangeEvaluator;

impl Evaluator for InterchangeEvaluator {
    fn format(&self) -> CurveFormat {
        CurveFormat::Interchange
    }

    fn segment_value(&self, time: f64, s: &Cubic<Vec2>) -> (f64, f64) {
        let param = map_percent(time, s[0].x, s[3].x);
        (cubic_scalar(s[0].y, s[1].y, s[2].y, s[3].y, param), param)
    }

    fn path_param(&self, progress: f64, _cubic: &Cubic<Vec3>, _cache: &mut ArcLengthCache) -> f64 {
        progress
    }
}

/// First segment whose time span contains `time`.
fn segment_index(easing: &EasingCurve, time: f64) -> usize {
    let anchors = easing.anchors();
    let after = anchors.partition_point(|a| a.x < time);
    after.saturating_sub(1).min(easing.segment_count() - 1)
}

#[cfg(test)]
#[path = "../../tests/unit/eval/evaluator.rs"]
mod tests;
